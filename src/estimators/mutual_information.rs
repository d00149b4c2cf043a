//! Estimation of the smoothed pairwise mutual-information matrix.

use dataset::Dataset;
use util::{CltError, Result};

use itertools::Itertools;
use ndarray::Array2;

/// Estimate the D×D matrix of pairwise mutual information between the
/// dataset's variables, with additive smoothing `alpha`.
///
/// For each unordered pair the four joint counts are smoothed by `alpha`
/// and normalized by `n + 4 * alpha`; marginals are the row and column sums
/// of the smoothed joint table, and
///
/// ```text
/// MI(i, j) = sum over a, b of p(a, b) * (ln p(a, b) - ln p(a) - ln p(b))
/// ```
///
/// The matrix is symmetric with an unused zero diagonal. Smoothing keeps
/// every cell strictly positive, so no logarithm of zero can occur.
///
/// # Errors
/// * `CltError::InvalidAlpha`, if `alpha` is not strictly positive
pub fn mutual_information(data: &Dataset, alpha: f64) -> Result<Array2<f64>> {
    if ! (alpha > 0.0) {
        return Err(CltError::InvalidAlpha(alpha));
    }

    let n = data.n();
    let d = data.d();
    let values = data.values();

    let mut mi = Array2::<f64>::zeros((d, d));
    let normalizer = n as f64 + 4.0 * alpha;

    for (i, j) in (0..d).tuple_combinations() {
        let mut joint = [[alpha; 2]; 2];
        for k in 0..n {
            joint[values[[k, i]] as usize][values[[k, j]] as usize] += 1.0;
        }

        let mut pairwise = 0.0;
        let p_i = [
            (joint[0][0] + joint[0][1]) / normalizer,
            (joint[1][0] + joint[1][1]) / normalizer
        ];
        let p_j = [
            (joint[0][0] + joint[1][0]) / normalizer,
            (joint[0][1] + joint[1][1]) / normalizer
        ];

        for a in 0..2 {
            for b in 0..2 {
                let p_ab = joint[a][b] / normalizer;
                pairwise += p_ab * (p_ab.ln() - p_i[a].ln() - p_j[b].ln());
            }
        }

        mi[[i, j]] = pairwise;
        mi[[j, i]] = pairwise;
    }

    Ok(mi)
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn rejects_nonpositive_alpha() {
        let data = Dataset::new(array![[0, 1], [1, 0]]).unwrap();

        for alpha in vec![0.0, -1.0] {
            match mutual_information(&data, alpha).expect_err("missing error") {
                CltError::InvalidAlpha(a) => assert_eq!(alpha, a),
                _ => panic!("wrong error type")
            };
        }
    }

    #[test]
    fn matrix_is_symmetric_and_nonnegative() {
        let data = Dataset::new(array![
            [0, 0, 1],
            [1, 1, 0],
            [0, 1, 1],
            [1, 0, 0]
        ]).unwrap();

        let mi = mutual_information(&data, 0.01).unwrap();

        for (i, j) in iproduct!(0..3, 0..3) {
            assert_eq!(mi[[i, j]], mi[[j, i]]);
            assert!(mi[[i, j]] >= 0.0);
        }
    }

    #[test]
    fn diagonal_is_unused() {
        let data = Dataset::new(array![[0, 1], [1, 0]]).unwrap();
        let mi = mutual_information(&data, 0.01).unwrap();

        assert_eq!(0.0, mi[[0, 0]]);
        assert_eq!(0.0, mi[[1, 1]]);
    }

    #[test]
    fn independent_columns_carry_no_information() {
        // the empirical joint of columns 0 and 1 factorizes exactly, and the
        // smoothed counts (1 + alpha each) preserve that, so the mutual
        // information is exactly zero up to floating error
        let data = Dataset::new(array![
            [0, 0],
            [0, 1],
            [1, 0],
            [1, 1]
        ]).unwrap();

        let mi = mutual_information(&data, 0.01).unwrap();
        assert!(mi[[0, 1]].abs() < 1e-12);
    }

    #[test]
    fn random_independent_columns_carry_little_information() {
        use ndarray_rand::RandomExt;
        use rand::distributions::Range;

        let samples = Array2::<f64>::random((1000, 2), Range::new(0.0, 1.0))
            .mapv(|v| (v < 0.5) as u8);
        let data = Dataset::new(samples).unwrap();

        let mi = mutual_information(&data, 0.01).unwrap();
        assert!(mi[[0, 1]] < 0.05);
    }

    #[test]
    fn correlated_columns_dominate_independent_ones() {
        // columns 0 and 1 are copies; column 2 alternates independently
        let data = Dataset::new(array![
            [0, 0, 0],
            [0, 0, 1],
            [1, 1, 0],
            [1, 1, 1]
        ]).unwrap();

        let mi = mutual_information(&data, 0.01).unwrap();

        assert!(mi[[0, 1]] > mi[[0, 2]]);
        assert!(mi[[0, 1]] > mi[[1, 2]]);

        // a perfectly correlated pair of fair coins carries about ln 2 nats
        assert!(mi[[0, 1]] > 0.5);
    }

}
