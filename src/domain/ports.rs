use crate::domain::model::ClassificationResult;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// An uploaded image that has been staged on disk.
#[derive(Debug, Clone, Copy)]
pub struct ImageRef<'a> {
    pub path: &'a Path,
    pub mime_type: &'a str,
}

#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(&self, image: ImageRef<'_>) -> Result<ClassificationResult>;

    /// Model identifier echoed back in every report.
    fn model(&self) -> &str;
}

/// Source of footprints for garments missing from the lookup table.
pub trait FootprintSampler: Send + Sync {
    /// Uniform sample in `[min, max]` kilograms.
    fn sample_kg(&self, min: f64, max: f64) -> f64;
}
