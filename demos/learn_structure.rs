//! Learns a Chow-Liu tree from synthetic correlated data and prints the
//! recovered structure and parameters.
//!
//! The generating process is a chain: `weather` drives `sprinkler`, which
//! drives `wet_grass`, while `cat_asleep` is independent noise. The learned
//! spanning tree should connect the chain variables to each other and hang
//! the noise variable off whichever edge is least bad.

extern crate chowliu;
extern crate ndarray;
extern crate rand;

use chowliu::{BinaryChowLiu, Dataset};
use ndarray::Array2;
use rand::{thread_rng, Rng};

fn main() -> chowliu::Result<()> {
    let mut rng = thread_rng();

    ////////////////////////////////////////////////////////////////////////
    // Step 1:  Generate a dataset from a known chain process
    let n = 5000;
    let mut data = Array2::<u8>::zeros((n, 4));
    for k in 0..n {
        let weather = (rng.gen::<f64>() < 0.4) as u8;
        let sprinkler = if rng.gen::<f64>() < 0.1 { 1 - weather } else { weather };
        let wet_grass = if rng.gen::<f64>() < 0.2 { 1 - sprinkler } else { sprinkler };
        let cat_asleep = (rng.gen::<f64>() < 0.5) as u8;

        data[[k, 0]] = weather;
        data[[k, 1]] = sprinkler;
        data[[k, 2]] = wet_grass;
        data[[k, 3]] = cat_asleep;
    }

    let names = vec!["weather", "sprinkler", "wet_grass", "cat_asleep"];
    let dataset = Dataset::with_names(data, names.iter().map(|n| String::from(*n)).collect())?;

    ////////////////////////////////////////////////////////////////////////
    // Step 2:  Fit the model, rooted at the head of the chain
    let model = BinaryChowLiu::builder(&dataset).root(0).fit(&mut rng)?;

    ////////////////////////////////////////////////////////////////////////
    // Step 3:  Report the learned structure
    println!("Mutual information:");
    let mi = model.mutual_information();
    for i in 0..dataset.d() {
        for j in 0..dataset.d() {
            print!("  {:.4}", mi[[i, j]]);
        }
        println!();
    }

    println!();
    println!("Learned tree:");
    for v in 0..dataset.d() {
        match model.tree().parent(v) {
            Some(p) => println!(
                "  {} <- {}",
                dataset.name_of(v).unwrap(),
                dataset.name_of(p).unwrap()
            ),
            None => println!("  {} (root)", dataset.name_of(v).unwrap())
        };
    }

    println!();
    println!("Conditional probability tables:");
    println!("                | P(0|0) | P(1|0) | P(0|1) | P(1|1)");
    println!("----------------+--------+--------+--------+-------");
    let params = model.log_parameters();
    for v in 0..dataset.d() {
        println!(
            "{:>15} | {:.4} | {:.4} | {:.4} | {:.4}",
            dataset.name_of(v).unwrap(),
            params[[v, 0, 0]].exp(),
            params[[v, 0, 1]].exp(),
            params[[v, 1, 0]].exp(),
            params[[v, 1, 1]].exp()
        );
    }

    Ok(())
}
