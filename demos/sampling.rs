//! Draws samples from a learned model and checks that their average
//! log-likelihood matches the model's average log-likelihood on the data it
//! was trained on.

extern crate chowliu;
#[macro_use]
extern crate ndarray;
extern crate ndarray_rand;
extern crate rand;

use chowliu::{fully_observed, BinaryChowLiu, Dataset};
use ndarray::{Array2, Axis};
use ndarray_rand::RandomExt;
use rand::distributions::Range;
use rand::{thread_rng, Rng};

fn main() -> chowliu::Result<()> {
    let mut rng = thread_rng();

    ////////////////////////////////////////////////////////////////////////
    // Step 1:  Generate training data: two correlated columns plus two
    //          independent noise columns
    let n = 3000;
    let mut structured = Array2::<u8>::zeros((n, 2));
    for k in 0..n {
        let first = (rng.gen::<f64>() < 0.3) as u8;
        let second = if rng.gen::<f64>() < 0.05 { 1 - first } else { first };
        structured[[k, 0]] = first;
        structured[[k, 1]] = second;
    }

    let noise = Array2::<f64>::random((n, 2), Range::new(0.0, 1.0))
        .mapv(|v| (v < 0.5) as u8);

    let mut data = Array2::<u8>::zeros((n, 4));
    data.slice_mut(s![.., 0..2]).assign(&structured);
    data.slice_mut(s![.., 2..4]).assign(&noise);

    let dataset = Dataset::new(data)?;
    let model = BinaryChowLiu::builder(&dataset).fit(&mut rng)?;

    ////////////////////////////////////////////////////////////////////////
    // Step 2:  Evaluate the model on its own training data
    let train_ll = model.average_log_likelihood(&dataset.to_queries())?;
    println!("average log-likelihood on training data: {:.4}", train_ll);

    ////////////////////////////////////////////////////////////////////////
    // Step 3:  Sample from the model and evaluate the samples
    for &count in [100usize, 1000, 10000].iter() {
        let samples = model.sample(count, &mut rng);
        let sample_ll = model.average_log_likelihood(&fully_observed(&samples)?)?;

        let ones = samples.mapv(|v| v as u32).sum_axis(Axis(0));
        println!(
            "{:>6} samples: average log-likelihood {:.4}, ones per column {:?}",
            count, sample_ll, ones
        );
    }

    Ok(())
}
