pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::gemini::{GeminiClassifier, GeminiConfig};
pub use app::{router, AppState};
pub use config::AppConfig;
pub use core::{catalog::Catalog, estimator::FootprintEstimator};
pub use domain::model::{ClassificationResult, Coupon, FootprintReport};
pub use utils::error::{EcoError, Result};
