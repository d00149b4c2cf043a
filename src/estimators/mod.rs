//! Defines the estimation routines that learn a Chow-Liu model from data:
//! the smoothed pairwise mutual-information matrix that drives structure
//! selection, and the smoothed log conditional probability tables attached
//! to a chosen tree.
//!
//! Both are pure functions over immutable inputs; callers compose them (and
//! cache their results) explicitly. `model::BinaryChowLiu` does exactly that
//! at fit time.

mod mutual_information;
mod parameters;

pub use self::mutual_information::mutual_information;
pub use self::parameters::log_parameters;
