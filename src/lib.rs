extern crate bidir_map;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
#[macro_use]
extern crate ndarray;
extern crate ndarray_rand;
extern crate rand;

pub mod dataset;
pub mod estimators;
pub mod inference;
pub mod model;
pub mod samplers;
pub mod tree;
pub mod util;

pub use dataset::{fully_observed, Dataset, Observation};
pub use model::{BinaryChowLiu, ChowLiuBuilder, DEFAULT_ALPHA};
pub use tree::Tree;
pub use util::{log_sum_exp, CltError, Result};
