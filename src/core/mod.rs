pub mod catalog;
pub mod estimator;
pub mod sampler;

pub use crate::domain::model::{ClassificationResult, Coupon, FootprintReport};
pub use crate::domain::ports::{FootprintSampler, ImageClassifier, ImageRef};
pub use crate::utils::error::Result;
