//! Defines an ancestral sampler for Chow-Liu models.
//!
//! Implementation of forward sampling, Koller & Friedman Algorithm 12.1:
//! every variable is drawn conditioned on its already-sampled parent, so a
//! full pass in any topological order yields an exact joint sample.

use tree::Tree;
use util::{CltError, Result};

use ndarray::{Array1, Array3};
use rand::Rng;

/// A `Sampler` that draws independent assignments from the joint
/// distribution encoded by a tree and its log CPT tensor.
///
/// The randomness source is supplied by the caller, so sampling is
/// reproducible under a seeded generator.
pub struct AncestralSampler<'a, R: Rng + 'a> {

    /// The tree the model factorizes over
    tree: &'a Tree,

    /// The D×2×2 log conditional probability tables
    params: &'a Array3<f64>,

    /// The randomness source
    rng: &'a mut R

}

impl<'a, R: Rng + 'a> AncestralSampler<'a, R> {

    /// Create a sampler for the given tree and log CPT tensor.
    ///
    /// # Errors
    /// * `CltError::DimensionMismatch`, if the tensor is not D×2×2 for the
    ///   tree's D
    pub fn new(tree: &'a Tree, params: &'a Array3<f64>, rng: &'a mut R) -> Result<Self> {
        if params.dim() != (tree.d(), 2, 2) {
            return Err(CltError::DimensionMismatch {
                expected: tree.d(),
                actual: params.dim().0
            });
        }

        Ok(AncestralSampler { tree, params, rng })
    }

    fn get_sample(&mut self) -> Array1<u8> {
        let d = self.tree.d();
        let root = self.tree.root();

        let mut values: Vec<Option<bool>> = vec![None; d];
        values[root] = Some(self.bernoulli(self.params[[root, 0, 1]].exp()));
        let mut assigned = 1;

        // repeatedly scan for variables whose parent has been assigned but
        // whose own value has not; each full scan settles at least one tree
        // level, so the loop finishes within depth passes
        while assigned < d {
            for i in 0..d {
                if values[i].is_some() {
                    continue;
                }

                // invariant: only the root has no parent, and it is assigned
                // before the scan starts
                let parent = self.tree.parent(i).expect("non-root variable has a parent");
                if let Some(parent_value) = values[parent] {
                    let p = self.params[[i, parent_value as usize, 1]].exp();
                    values[i] = Some(self.bernoulli(p));
                    assigned += 1;
                }
            }
        }

        Array1::from_vec(
            values.into_iter()
                  .map(|v| v.expect("every variable was assigned") as u8)
                  .collect()
        )
    }

    /// A single Bernoulli trial with success probability `p`.
    fn bernoulli(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

}

impl<'a, R: Rng + 'a> super::Sampler for AncestralSampler<'a, R> {

    fn sample(&mut self) -> Array1<u8> {
        self.get_sample()
    }

}
