use crate::domain::ports::FootprintSampler;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

/// Draws from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSampler;

impl FootprintSampler for RandomSampler {
    fn sample_kg(&self, min: f64, max: f64) -> f64 {
        rand::rng().random_range(min..=max)
    }
}

/// Reproducible sampler for demos and tests.
#[derive(Debug)]
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl FootprintSampler for SeededSampler {
    fn sample_kg(&self, min: f64, max: f64) -> f64 {
        match self.rng.lock() {
            Ok(mut rng) => rng.random_range(min..=max),
            // 鎖中毒時沿用原本的 rng 狀態
            Err(poisoned) => poisoned.into_inner().random_range(min..=max),
        }
    }
}

/// Seeded when `seed` is set, thread RNG otherwise.
pub fn sampler_for(seed: Option<u64>) -> Arc<dyn FootprintSampler> {
    match seed {
        Some(seed) => Arc::new(SeededSampler::new(seed)),
        None => Arc::new(RandomSampler),
    }
}
