//! Estimation of the smoothed log conditional probability tables.

use dataset::Dataset;
use tree::Tree;
use util::{CltError, Result};

use ndarray::Array3;

/// Estimate the D×2×2 tensor of natural-log conditional probability tables
/// for the given tree, with additive smoothing `alpha`.
///
/// The tensor is indexed `[variable][parent value][own value]`. For a
/// non-root variable the 2×2 count table over (parent value, own value) is
/// smoothed by `alpha` per cell and each parent-value row is normalized
/// independently. The root has no parent: its two value counts are smoothed
/// by `2 * alpha` each (the total smoothing mass of a conditional table),
/// normalized once, and stored in both rows so every variable shares the
/// same 2×2 shape.
///
/// Smoothing keeps every probability strictly positive, so the logs are
/// always finite.
///
/// # Errors
/// * `CltError::InvalidAlpha`, if `alpha` is not strictly positive
/// * `CltError::DimensionMismatch`, if the tree and dataset disagree on the
///   number of variables
pub fn log_parameters(data: &Dataset, tree: &Tree, alpha: f64) -> Result<Array3<f64>> {
    if ! (alpha > 0.0) {
        return Err(CltError::InvalidAlpha(alpha));
    }

    if tree.d() != data.d() {
        return Err(CltError::DimensionMismatch { expected: data.d(), actual: tree.d() });
    }

    let n = data.n();
    let d = data.d();
    let values = data.values();

    let mut params = Array3::<f64>::zeros((d, 2, 2));

    for i in 0..d {
        match tree.parent(i) {
            None => {
                let mut counts = [2.0 * alpha; 2];
                for k in 0..n {
                    counts[values[[k, i]] as usize] += 1.0;
                }

                let total = counts[0] + counts[1];
                for x in 0..2 {
                    let log_prob = (counts[x] / total).ln();
                    params[[i, 0, x]] = log_prob;
                    params[[i, 1, x]] = log_prob;
                }
            },
            Some(parent) => {
                let mut counts = [[alpha; 2]; 2];
                for k in 0..n {
                    counts[values[[k, parent]] as usize][values[[k, i]] as usize] += 1.0;
                }

                for u in 0..2 {
                    let row_total = counts[u][0] + counts[u][1];
                    for x in 0..2 {
                        params[[i, u, x]] = (counts[u][x] / row_total).ln();
                    }
                }
            }
        }
    }

    Ok(params)
}


#[cfg(test)]
mod tests {

    use super::*;

    fn correlated_dataset() -> Dataset {
        Dataset::new(array![
            [0, 0, 0],
            [1, 1, 1],
            [0, 0, 0],
            [1, 1, 1]
        ]).unwrap()
    }

    fn chain_tree() -> Tree {
        Tree::from_parents(vec![None, Some(0), Some(1)]).unwrap()
    }

    #[test]
    fn rejects_nonpositive_alpha() {
        let data = correlated_dataset();
        let tree = chain_tree();

        assert!(log_parameters(&data, &tree, 0.0).is_err());
        assert!(log_parameters(&data, &tree, -0.5).is_err());
    }

    #[test]
    fn rejects_mismatched_tree() {
        let data = correlated_dataset();
        let tree = Tree::from_parents(vec![None, Some(0)]).unwrap();

        match log_parameters(&data, &tree, 0.01).expect_err("missing error") {
            CltError::DimensionMismatch { expected, actual } => assert_eq!((3, 2), (expected, actual)),
            _ => panic!("wrong error type")
        };
    }

    #[test]
    fn rows_normalize_to_one() {
        let data = correlated_dataset();
        let tree = chain_tree();
        let params = log_parameters(&data, &tree, 0.01).unwrap();

        for (i, u) in iproduct!(0..3, 0..2) {
            let total: f64 = (0..2).map(|x| params[[i, u, x]].exp()).sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn root_rows_are_duplicated() {
        let data = correlated_dataset();
        let tree = chain_tree();
        let params = log_parameters(&data, &tree, 0.01).unwrap();

        for x in 0..2 {
            assert_eq!(params[[0, 0, x]], params[[0, 1, x]]);
        }

        // two of four samples are ones, and the 2-alpha smoothing is
        // symmetric, so the root marginal is exactly fair
        assert!((params[[0, 0, 1]].exp() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn perfect_correlation_is_near_deterministic() {
        let data = correlated_dataset();
        let tree = chain_tree();
        let alpha = 0.01;
        let params = log_parameters(&data, &tree, alpha).unwrap();

        // each child copies its parent in all samples: 2 matching counts
        // against alpha mismatching mass per parent value
        let expected = ((2.0 + alpha) / (2.0 + 2.0 * alpha)).ln();

        for i in 1..3 {
            assert!((params[[i, 0, 0]] - expected).abs() < 1e-12);
            assert!((params[[i, 1, 1]] - expected).abs() < 1e-12);

            assert!(params[[i, 0, 1]].exp() < 0.01);
            assert!(params[[i, 1, 0]].exp() < 0.01);

            // smoothing keeps even contradicted entries finite
            assert!(params[[i, 0, 1]].is_finite());
        }
    }

}
