//! Defines an `InferenceEngine` that answers marginal queries by brute-force
//! enumeration of every completion of the unobserved entries.
//!
//! The cost is exponential in the number of unobserved variables, so this
//! engine is a correctness oracle for `EliminationEngine`, not a production
//! path.

use dataset::Observation;
use tree::Tree;
use util::{log_sum_exp, CltError, Result};

use ndarray::{Array3, ArrayView1};

use super::{joint_log_prob, InferenceEngine};

/// Exact marginal inference by exhaustive enumeration.
pub struct ExhaustiveEngine<'a> {

    /// The tree the model factorizes over
    tree: &'a Tree,

    /// The D×2×2 log conditional probability tables
    params: &'a Array3<f64>

}

impl<'a> ExhaustiveEngine<'a> {

    /// Create an engine for the given tree and log CPT tensor.
    ///
    /// # Errors
    /// * `CltError::DimensionMismatch`, if the tensor is not D×2×2 for the
    ///   tree's D
    pub fn new(tree: &'a Tree, params: &'a Array3<f64>) -> Result<Self> {
        if params.dim() != (tree.d(), 2, 2) {
            return Err(CltError::DimensionMismatch {
                expected: tree.d(),
                actual: params.dim().0
            });
        }

        Ok(ExhaustiveEngine { tree, params })
    }

}

impl<'a> InferenceEngine for ExhaustiveEngine<'a> {

    /// Enumerate all `2^k` completions of the `k` unobserved entries,
    /// compute each completion's joint log-probability by the product rule,
    /// and combine them by log-sum-exp.
    ///
    /// # Errors
    /// * `CltError::DimensionMismatch`, if the query length differs from the
    ///   model's variable count
    /// * `CltError::TooManyMissing`, if more than 63 entries are unobserved
    ///   (the completion counter cannot be represented; the enumeration
    ///   could never finish at that size anyway)
    fn log_prob(&self, query: ArrayView1<Observation>) -> Result<f64> {
        let d = self.tree.d();
        if query.len() != d {
            return Err(CltError::DimensionMismatch { expected: d, actual: query.len() });
        }

        let missing: Vec<usize> = (0..d).filter(|&i| query[i].is_missing()).collect();
        if missing.len() > 63 {
            return Err(CltError::TooManyMissing { count: missing.len() });
        }

        let mut assignment: Vec<usize> = query.iter()
            .map(|o| o.index().unwrap_or(0))
            .collect();

        let mut terms = Vec::new();
        for completion in 0..(1u64 << missing.len()) {
            for (bit, &i) in missing.iter().enumerate() {
                assignment[i] = ((completion >> bit) & 1) as usize;
            }

            terms.push(joint_log_prob(self.tree, self.params, &assignment));
        }

        Ok(log_sum_exp(&terms))
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    use ndarray::Array1;

    fn two_variable_parts() -> (Tree, Array3<f64>) {
        let tree = Tree::from_parents(vec![None, Some(0)]).unwrap();
        let params = array![
            [[0.7_f64.ln(), 0.3_f64.ln()], [0.7_f64.ln(), 0.3_f64.ln()]],
            [[0.1_f64.ln(), 0.9_f64.ln()], [0.8_f64.ln(), 0.2_f64.ln()]]
        ];

        (tree, params)
    }

    #[test]
    fn fully_observed_has_one_completion() {
        let (tree, params) = two_variable_parts();
        let engine = ExhaustiveEngine::new(&tree, &params).unwrap();

        let query = Array1::from_vec(vec![
            Observation::Observed(true),
            Observation::Observed(false)
        ]);

        let expected = (0.3_f64 * 0.8).ln();
        assert!((engine.log_prob(query.view()).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn marginalizes_over_completions() {
        let (tree, params) = two_variable_parts();
        let engine = ExhaustiveEngine::new(&tree, &params).unwrap();

        let query = Array1::from_vec(vec![
            Observation::Missing,
            Observation::Observed(false)
        ]);

        // P(X1 = 0) = 0.7 * 0.1 + 0.3 * 0.8
        let expected = (0.7_f64 * 0.1 + 0.3 * 0.8).ln();
        assert!((engine.log_prob(query.view()).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn rejects_unrepresentable_enumerations() {
        // a 70-variable chain; the parameters are never touched because the
        // query is rejected up front
        let mut parents = vec![None];
        for v in 1..70 {
            parents.push(Some(v - 1));
        }
        let tree = Tree::from_parents(parents).unwrap();
        let params = Array3::<f64>::zeros((70, 2, 2));
        let engine = ExhaustiveEngine::new(&tree, &params).unwrap();

        let query = Array1::from_elem(70, Observation::Missing);
        match engine.log_prob(query.view()).expect_err("missing error") {
            CltError::TooManyMissing { count } => assert_eq!(70, count),
            _ => panic!("wrong error type")
        };
    }

}
