//! Defines an `InferenceEngine` that answers marginal queries exactly by
//! variable elimination over the tree, in time linear in the number of
//! variables.
//!
//! This is the sum-product algorithm of Koller & Friedman Algorithm 9.1,
//! specialized to a tree with binary variables: eliminating leaves-to-root
//! means every variable's only remaining neighbor at elimination time is its
//! parent, so no factor ever grows beyond two entries.

use dataset::Observation;
use tree::Tree;
use util::{log_sum_exp, CltError, Result};

use ndarray::{Array3, ArrayView1};

use super::{joint_log_prob, InferenceEngine};

/// The per-variable factor arena used during a query.
///
/// A factor is either a fully determined log contribution, or, for a
/// variable whose value is still free, a pending pair of log values indexed
/// by that variable's own value, accumulating the messages sent up from its
/// subtree.
#[derive(Clone, Copy, Debug)]
enum Factor {
    Scalar(f64),
    Pair([f64; 2])
}

/// Exact marginal inference by leaves-to-root variable elimination.
pub struct EliminationEngine<'a> {

    /// The tree the model factorizes over
    tree: &'a Tree,

    /// The D×2×2 log conditional probability tables
    params: &'a Array3<f64>,

    /// Precomputed elimination order: every variable before its parent
    order: Vec<usize>

}

impl<'a> EliminationEngine<'a> {

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

        let order = tree.post_order();
        Ok(EliminationEngine { tree, params, order })
    }

    /// Marginalize the unobserved entries of a partially observed query.
    fn eliminate(&self, query: &ArrayView1<Observation>) -> f64 {
        let d = self.tree.d();

        // one factor per variable: a Pair accumulator for each unobserved
        // variable, a Scalar for the rest
        let mut factors: Vec<Factor> = query.iter()
            .map(|o| match *o {
                Observation::Missing => Factor::Pair([0.0, 0.0]),
                Observation::Observed(_) => Factor::Scalar(0.0)
            })
            .collect();

        // observed variables contribute their CPT entry: a Scalar when the
        // parent value is known (or the variable is the root), otherwise the
        // CPT column over the unobserved parent's value, folded into the
        // parent's accumulator
        for i in 0..d {
            let x = match query[i].index() {
                Some(x) => x,
                None => continue
            };

            match self.tree.parent(i) {
                None => {
                    add_scalar(&mut factors[i], self.params[[i, 0, x]]);
                },
                Some(p) => match query[p].index() {
                    Some(u) => {
                        add_scalar(&mut factors[i], self.params[[i, u, x]]);
                    },
                    None => {
                        add_pair(&mut factors[p], [
                            self.params[[i, 0, x]],
                            self.params[[i, 1, x]]
                        ]);
                    }
                }
            }
        }

        // eliminate each unobserved variable leaves-to-root: combine its CPT
        // slice with its accumulated pair and reduce over its own value by
        // log-sum-exp, leaving either a Scalar or a message into the parent's
        // accumulator
        for idx in 0..self.order.len() {
            let v = self.order[idx];
            if ! query[v].is_missing() {
                continue;
            }

            let acc = match factors[v] {
                Factor::Pair(acc) => acc,
                Factor::Scalar(_) => panic!("unobserved variable was eliminated twice")
            };

            match self.tree.parent(v) {
                None => {
                    let reduced = log_sum_exp(&[
                        self.params[[v, 0, 0]] + acc[0],
                        self.params[[v, 0, 1]] + acc[1]
                    ]);
                    factors[v] = Factor::Scalar(reduced);
                },
                Some(p) => match query[p].index() {
                    Some(u) => {
                        let reduced = log_sum_exp(&[
                            self.params[[v, u, 0]] + acc[0],
                            self.params[[v, u, 1]] + acc[1]
                        ]);
                        factors[v] = Factor::Scalar(reduced);
                    },
                    None => {
                        let mut message = [0.0; 2];
                        for u in 0..2 {
                            message[u] = log_sum_exp(&[
                                self.params[[v, u, 0]] + acc[0],
                                self.params[[v, u, 1]] + acc[1]
                            ]);
                        }
                        add_pair(&mut factors[p], message);
                        factors[v] = Factor::Scalar(0.0);
                    }
                }
            }
        }

        // every factor has been reduced; the query's log-probability is the
        // sum of the surviving scalars
        factors.iter()
            .map(|f| match *f {
                Factor::Scalar(value) => value,
                Factor::Pair(_) => panic!("unobserved variable survived elimination")
            })
            .sum()
    }

}

fn add_scalar(factor: &mut Factor, value: f64) {
    match *factor {
        Factor::Scalar(ref mut current) => *current += value,
        Factor::Pair(_) => panic!("expected a scalar factor")
    }
}

fn add_pair(factor: &mut Factor, values: [f64; 2]) {
    match *factor {
        Factor::Pair(ref mut current) => {
            current[0] += values[0];
            current[1] += values[1];
        },
        Factor::Scalar(_) => panic!("expected a pair factor")
    }
}

impl<'a> InferenceEngine for EliminationEngine<'a> {

    fn log_prob(&self, query: ArrayView1<Observation>) -> Result<f64> {
        if query.len() != self.tree.d() {
            return Err(CltError::DimensionMismatch {
                expected: self.tree.d(),
                actual: query.len()
            });
        }

        // fully observed queries factor directly; no elimination needed
        if query.iter().all(|o| ! o.is_missing()) {
            let assignment: Vec<usize> = query.iter()
                .map(|o| o.index().expect("query has no missing entries"))
                .collect();
            return Ok(joint_log_prob(self.tree, self.params, &assignment));
        }

        Ok(self.eliminate(&query))
    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use util::log_sum_exp;

    use ndarray::Array1;

    /// A two-variable model with hand-picked parameters:
    /// P(X0 = 1) = 0.3, P(X1 = 1 | X0 = 0) = 0.9, P(X1 = 1 | X0 = 1) = 0.2.
    fn two_variable_parts() -> (Tree, Array3<f64>) {
        let tree = Tree::from_parents(vec![None, Some(0)]).unwrap();
        let params = array![
            [[0.7_f64.ln(), 0.3_f64.ln()], [0.7_f64.ln(), 0.3_f64.ln()]],
            [[0.1_f64.ln(), 0.9_f64.ln()], [0.8_f64.ln(), 0.2_f64.ln()]]
        ];

        (tree, params)
    }

    #[test]
    fn fully_observed_is_the_product_rule() {
        let (tree, params) = two_variable_parts();
        let engine = EliminationEngine::new(&tree, &params).unwrap();

        let query = Array1::from_vec(vec![
            Observation::Observed(false),
            Observation::Observed(true)
        ]);

        let expected = (0.7_f64 * 0.9).ln();
        assert!((engine.log_prob(query.view()).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    /// An observed child below an unobserved parent couples the child's CPT
    /// column to the parent's marginal before the parent is summed out.
    fn observed_child_of_unobserved_parent() {
        let (tree, params) = two_variable_parts();
        let engine = EliminationEngine::new(&tree, &params).unwrap();

        let query = Array1::from_vec(vec![
            Observation::Missing,
            Observation::Observed(true)
        ]);

        // P(X1 = 1) = 0.7 * 0.9 + 0.3 * 0.2
        let expected = (0.7_f64 * 0.9 + 0.3 * 0.2).ln();
        assert!((engine.log_prob(query.view()).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn unobserved_child_of_observed_parent() {
        let (tree, params) = two_variable_parts();
        let engine = EliminationEngine::new(&tree, &params).unwrap();

        let query = Array1::from_vec(vec![
            Observation::Observed(true),
            Observation::Missing
        ]);

        // the child's conditional sums to one, leaving the root marginal
        assert!((engine.log_prob(query.view()).unwrap() - 0.3_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn unobserved_middle_of_a_chain() {
        // X0 -> X1 -> X2 with X1 marginalized away
        let tree = Tree::from_parents(vec![None, Some(0), Some(1)]).unwrap();
        let params = array![
            [[0.6_f64.ln(), 0.4_f64.ln()], [0.6_f64.ln(), 0.4_f64.ln()]],
            [[0.1_f64.ln(), 0.9_f64.ln()], [0.8_f64.ln(), 0.2_f64.ln()]],
            [[0.3_f64.ln(), 0.7_f64.ln()], [0.5_f64.ln(), 0.5_f64.ln()]]
        ];
        let engine = EliminationEngine::new(&tree, &params).unwrap();

        let query = Array1::from_vec(vec![
            Observation::Observed(false),
            Observation::Missing,
            Observation::Observed(true)
        ]);

        // P(X0 = 0, X2 = 1) = P(X0 = 0) * sum over x1 of
        //   P(X1 = x1 | X0 = 0) * P(X2 = 1 | X1 = x1)
        let expected = 0.6_f64.ln() + log_sum_exp(&[
            (0.1_f64 * 0.7).ln(),
            (0.9_f64 * 0.5).ln()
        ]);

        assert!((engine.log_prob(query.view()).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn all_missing_yields_certainty() {
        let (tree, params) = two_variable_parts();
        let engine = EliminationEngine::new(&tree, &params).unwrap();

        let query = Array1::from_elem(2, Observation::Missing);
        assert!(engine.log_prob(query.view()).unwrap().abs() < 1e-12);
    }

    #[test]
    fn rejects_mismatched_params() {
        let tree = Tree::from_parents(vec![None, Some(0)]).unwrap();
        let params = Array3::<f64>::zeros((3, 2, 2));

        assert!(EliminationEngine::new(&tree, &params).is_err());
    }

}
