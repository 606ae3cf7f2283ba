pub mod catalog_file;

use crate::adapters::gemini::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::core::catalog::Catalog;
use crate::core::estimator::FootprintEstimator;
use crate::core::sampler;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "eco-footprint")]
#[command(about = "Estimates a garment's carbon footprint from a photo and hands out eco coupons")]
pub struct AppConfig {
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:80")]
    pub bind_addr: String,

    #[arg(long, env = "AUTH_USER")]
    pub auth_user: String,

    #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true)]
    pub auth_password: String,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "60")]
    pub request_timeout_secs: u64,

    /// Directory for temporary upload files (defaults to the OS temp dir)
    #[arg(long, env = "STAGING_DIR")]
    pub staging_dir: Option<PathBuf>,

    /// TOML file overriding the garment table and coupon catalog
    #[arg(long, env = "CATALOG_FILE")]
    pub catalog_file: Option<PathBuf>,

    /// Seed for footprints of unlisted garments (random when unset)
    #[arg(long, env = "FOOTPRINT_SEED")]
    pub footprint_seed: Option<u64>,

    #[arg(long, env = "VERBOSE", help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "JSON_LOGS", help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl AppConfig {
    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            base_url: self.gemini_base_url.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_file {
            Some(path) => {
                tracing::info!("📋 Loading catalog from {}", path.display());
                catalog_file::CatalogFile::from_file(path)?.into_catalog()
            }
            None => Ok(Catalog::default()),
        }
    }

    pub fn build_estimator(&self) -> Result<FootprintEstimator> {
        let catalog = Arc::new(self.load_catalog()?);
        if let Some(seed) = self.footprint_seed {
            tracing::info!("🎲 Using seeded footprint sampler (seed {})", seed);
        }
        Ok(FootprintEstimator::new(
            catalog,
            sampler::sampler_for(self.footprint_seed),
        ))
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_socket_addr("bind_addr", &self.bind_addr)?;
        validation::validate_non_empty_string("auth_user", &self.auth_user)?;
        validation::validate_secret("auth_password", &self.auth_password)?;
        validation::validate_secret("gemini_api_key", &self.gemini_api_key)?;
        validation::validate_url("gemini_base_url", &self.gemini_base_url)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_range("request_timeout_secs", self.request_timeout_secs, 1, 600)?;

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}
