//! Defines the interface to the inference engines.
//!
//! Both engines answer the same question, the natural-log probability of a
//! query's observed entries with unobserved entries marginalized away, and
//! must agree on every query. `EliminationEngine` is the production path,
//! linear in the number of variables; `ExhaustiveEngine` enumerates every
//! completion of the unobserved entries and exists as a correctness oracle.

use dataset::Observation;
use tree::Tree;
use util::Result;

use ndarray::{Array3, ArrayView1};

mod elimination;
mod exhaustive;

pub use self::elimination::EliminationEngine;
pub use self::exhaustive::ExhaustiveEngine;


/// An `InferenceEngine` answers marginal log-probability queries of the form
/// `ln P(observed entries)` against a learned model.
pub trait InferenceEngine {

    /// The natural-log probability of the observed entries of `query`,
    /// marginalizing over the unobserved ones.
    ///
    /// # Errors
    /// * `CltError::DimensionMismatch`, if the query length differs from the
    ///   model's variable count
    fn log_prob(&self, query: ArrayView1<Observation>) -> Result<f64>;

}


/// Log-probability of a complete assignment: the product rule along the
/// tree. Each variable contributes its CPT entry at (parent value, own
/// value); the root reads its duplicated marginal row at index 0.
fn joint_log_prob(tree: &Tree, params: &Array3<f64>, assignment: &[usize]) -> f64 {
    (0..tree.d())
        .map(|i| match tree.parent(i) {
            Some(p) => params[[i, assignment[p], assignment[i]]],
            None => params[[i, 0, assignment[i]]]
        })
        .sum()
}
