//! Defines the `BinaryChowLiu` model: the learned Chow-Liu tree over binary
//! variables, together with its query and sampling surface.
//!
//! Learning follows Chow & Liu (1968): pairwise mutual information is
//! estimated from the data, the maximum-weight spanning tree over those
//! weights becomes the model structure, and a smoothed conditional
//! probability table is estimated for every variable given its parent. The
//! three steps are pure functions (`estimators::mutual_information`,
//! `Tree::from_mutual_information`, `estimators::log_parameters`); this type
//! composes them once at fit time and caches the results.

use dataset::{Dataset, Observation};
use estimators::{log_parameters, mutual_information};
use inference::{EliminationEngine, ExhaustiveEngine, InferenceEngine};
use samplers::{AncestralSampler, Sampler};
use tree::Tree;
use util::{CltError, Result};

use ndarray::{Array1, Array2, Array3};
use rand::Rng;

/// The default additive-smoothing constant.
pub const DEFAULT_ALPHA: f64 = 0.01;


/// A Chow-Liu tree model over binary variables.
///
/// The model is immutable once fit. The root, drawn uniformly at random
/// when the builder is not given one, is part of the model's identity and
/// is never re-drawn.
#[derive(Debug)]
pub struct BinaryChowLiu {

    /// The smoothing constant the model was fit with
    alpha: f64,

    /// The learned pairwise mutual-information matrix
    mi: Array2<f64>,

    /// The learned tree structure
    tree: Tree,

    /// The learned D×2×2 log conditional probability tables
    log_params: Array3<f64>

}

impl BinaryChowLiu {

    /// Start building a model for the given dataset.
    pub fn builder(data: &Dataset) -> ChowLiuBuilder {
        ChowLiuBuilder { data, root: None, alpha: DEFAULT_ALPHA }
    }

    /// Fit a model with the default smoothing constant and a randomly drawn
    /// root. Equivalent to `BinaryChowLiu::builder(data).fit(rng)`.
    pub fn fit<R: Rng>(data: &Dataset, rng: &mut R) -> Result<Self> {
        BinaryChowLiu::builder(data).fit(rng)
    }

    /// The number of variables.
    pub fn d(&self) -> usize {
        self.tree.d()
    }

    /// The smoothing constant the model was fit with.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The learned tree structure.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The learned structure as a parent array with a `-1` sentinel at the
    /// root.
    pub fn parent_array(&self) -> Array1<isize> {
        self.tree.parent_array()
    }

    /// The learned D×2×2 tensor of natural-log conditional probability
    /// tables, indexed `[variable][parent value][own value]`. The root's two
    /// rows both hold its marginal.
    pub fn log_parameters(&self) -> &Array3<f64> {
        &self.log_params
    }

    /// The pairwise mutual-information matrix the structure was selected
    /// from.
    pub fn mutual_information(&self) -> &Array2<f64> {
        &self.mi
    }

    /// The natural-log probability of each query row, marginalizing over its
    /// missing entries.
    ///
    /// With `exhaustive` set, the answers come from brute-force enumeration
    /// over all completions of the missing entries: exponentially slower,
    /// useful only to cross-check the default variable-elimination path.
    ///
    /// The batch fails as a whole: its width is validated before any row is
    /// evaluated, and no partial results are returned.
    ///
    /// # Errors
    /// * `CltError::DimensionMismatch`, if the batch width differs from the
    ///   model's variable count
    /// * `CltError::TooManyMissing`, on the exhaustive path, if a row has
    ///   more than 63 missing entries
    pub fn log_prob(&self, queries: &Array2<Observation>, exhaustive: bool) -> Result<Array1<f64>> {
        if queries.cols() != self.d() {
            return Err(CltError::DimensionMismatch {
                expected: self.d(),
                actual: queries.cols()
            });
        }

        let mut results = Array1::<f64>::zeros(queries.rows());

        if exhaustive {
            let engine = ExhaustiveEngine::new(&self.tree, &self.log_params)?;
            for (k, query) in queries.outer_iter().enumerate() {
                results[k] = engine.log_prob(query)?;
            }
        } else {
            let engine = EliminationEngine::new(&self.tree, &self.log_params)?;
            for (k, query) in queries.outer_iter().enumerate() {
                results[k] = engine.log_prob(query)?;
            }
        }

        Ok(results)
    }

    /// The mean log-probability of the query rows under the model, e.g. the
    /// average log-likelihood of a held-out or sampled dataset.
    ///
    /// # Errors
    /// * everything `log_prob` reports
    /// * `CltError::EmptyDataset`, if the batch has no rows
    pub fn average_log_likelihood(&self, queries: &Array2<Observation>) -> Result<f64> {
        if queries.rows() == 0 {
            return Err(CltError::EmptyDataset);
        }

        let log_probs = self.log_prob(queries, false)?;
        Ok(log_probs.scalar_sum() / log_probs.len() as f64)
    }

    /// Draw `count` independent samples from the model's joint distribution,
    /// one per row.
    pub fn sample<R: Rng>(&self, count: usize, rng: &mut R) -> Array2<u8> {
        let mut samples = Array2::<u8>::zeros((count, self.d()));

        // constructing the sampler cannot fail: the tensor shape was checked
        // at fit time
        let mut sampler = AncestralSampler::new(&self.tree, &self.log_params, rng)
            .expect("model tensors are consistent");

        for k in 0..count {
            samples.row_mut(k).assign(&sampler.sample());
        }

        samples
    }

}


/// Builder for `BinaryChowLiu`. Validation is deferred to `fit`, which
/// reports the first problem with the requested configuration.
pub struct ChowLiuBuilder<'a> {

    /// The dataset to fit to
    data: &'a Dataset,

    /// The requested root; drawn uniformly at random if absent
    root: Option<usize>,

    /// The smoothing constant
    alpha: f64

}

impl<'a> ChowLiuBuilder<'a> {

    /// Root the learned tree at the given variable.
    pub fn root(mut self, root: usize) -> Self {
        self.root = Some(root);
        self
    }

    /// Use the given additive-smoothing constant instead of `DEFAULT_ALPHA`.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Learn the model: estimate mutual information, select and root the
    /// spanning tree, and estimate the log conditional probability tables.
    ///
    /// The randomness source is used only to draw the root when none was
    /// requested, so a seeded generator makes construction reproducible.
    ///
    /// # Errors
    /// * `CltError::InvalidAlpha`, if the smoothing constant is not strictly
    ///   positive
    /// * `CltError::InvalidRoot`, if the requested root is out of range
    pub fn fit<R: Rng>(self, rng: &mut R) -> Result<BinaryChowLiu> {
        let d = self.data.d();

        if ! (self.alpha > 0.0) {
            return Err(CltError::InvalidAlpha(self.alpha));
        }

        if let Some(root) = self.root {
            if root >= d {
                return Err(CltError::InvalidRoot { root, dimension: d });
            }
        }

        let root = match self.root {
            Some(root) => root,
            None => rng.gen_range(0, d)
        };

        let mi = mutual_information(self.data, self.alpha)?;
        debug!("estimated mutual information over {} variable pairs", d * (d - 1) / 2);

        let tree = Tree::from_mutual_information(&mi, root)?;

        let log_params = log_parameters(self.data, &tree, self.alpha)?;
        debug!("estimated log CPTs for {} variables with alpha = {}", d, self.alpha);

        Ok(BinaryChowLiu { alpha: self.alpha, mi, tree, log_params })
    }

}
