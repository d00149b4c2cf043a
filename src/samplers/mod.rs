//! Defines the `Sampler` trait - an object that can randomly draw complete
//! assignments from a learned model.

use ndarray::Array1;

pub mod ancestral;

pub use self::ancestral::AncestralSampler;

pub trait Sampler {

    /// Draw a complete assignment from the associated model.
    fn sample(&mut self) -> Array1<u8>;

}
