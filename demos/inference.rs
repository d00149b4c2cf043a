//! Compares the variable-elimination inference path against the exhaustive
//! oracle on a batch of partially observed queries.

extern crate chowliu;
extern crate ndarray;
extern crate rand;

use chowliu::{BinaryChowLiu, Dataset, Observation};
use ndarray::Array2;
use rand::{thread_rng, Rng};

fn main() -> chowliu::Result<()> {
    let mut rng = thread_rng();

    ////////////////////////////////////////////////////////////////////////
    // Step 1:  Generate a dataset from a noisy chain over five variables
    let n = 2000;
    let d = 5;
    let mut data = Array2::<u8>::zeros((n, d));
    for k in 0..n {
        let mut previous = (rng.gen::<f64>() < 0.5) as u8;
        for v in 0..d {
            let value = if rng.gen::<f64>() < 0.15 { 1 - previous } else { previous };
            data[[k, v]] = value;
            previous = value;
        }
    }

    let dataset = Dataset::new(data)?;
    let model = BinaryChowLiu::builder(&dataset).fit(&mut rng)?;

    ////////////////////////////////////////////////////////////////////////
    // Step 2:  Pose a batch of queries with varying amounts of evidence
    let mut patterns: Vec<Vec<Observation>> = Vec::new();
    patterns.push(vec![Observation::Observed(true); d]);
    patterns.push(vec![Observation::Missing; d]);
    for missing in 0..d {
        let mut query = vec![Observation::Observed(false); d];
        query[missing] = Observation::Missing;
        patterns.push(query);
    }
    for observed in 0..d {
        let mut query = vec![Observation::Missing; d];
        query[observed] = Observation::Observed(true);
        patterns.push(query);
    }

    let rows = patterns.len();
    let flat: Vec<Observation> = patterns.into_iter().flat_map(|q| q).collect();
    let queries = Array2::from_shape_vec((rows, d), flat)
        .expect("query batch dimensions are consistent");

    ////////////////////////////////////////////////////////////////////////
    // Step 3:  Answer the batch with both engines and compare
    let fast = model.log_prob(&queries, false)?;
    let reference = model.log_prob(&queries, true)?;

    println!("query                    | elimination | exhaustive");
    println!("-------------------------+-------------+-----------");
    for k in 0..rows {
        let rendered: String = (0..d)
            .map(|v| match queries[[k, v]] {
                Observation::Observed(true) => '1',
                Observation::Observed(false) => '0',
                Observation::Missing => '?'
            })
            .collect();

        println!("{:>24} | {:>11.6} | {:>10.6}", rendered, fast[k], reference[k]);
        assert!((fast[k] - reference[k]).abs() < 1e-9);
    }

    println!();
    println!("engines agree on all {} queries", rows);

    Ok(())
}
