use anyhow::Context;
use clap::Parser;
use eco_footprint::adapters::gemini::{GeminiClassifier, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use eco_footprint::adapters::staging::StagedUpload;
use eco_footprint::config::catalog_file::CatalogFile;
use eco_footprint::core::sampler::sampler_for;
use eco_footprint::domain::ports::ImageClassifier;
use eco_footprint::utils::logger;
use eco_footprint::{Catalog, FootprintEstimator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// 對本機圖片執行分類與碳足跡估算，輸出 JSON 報告
#[derive(Debug, Parser)]
#[command(name = "estimate")]
#[command(about = "Classify a local garment photo and print its footprint report")]
struct EstimateArgs {
    /// Image file to classify
    image: PathBuf,

    #[arg(long, default_value = "image/png")]
    mime_type: String,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    gemini_base_url: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "CATALOG_FILE")]
    catalog_file: Option<PathBuf>,

    #[arg(long, env = "FOOTPRINT_SEED")]
    footprint_seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_tool_logger();
    let args = EstimateArgs::parse();

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;

    let catalog = match &args.catalog_file {
        Some(path) => CatalogFile::from_file(path)?.into_catalog()?,
        None => Catalog::default(),
    };
    let estimator = FootprintEstimator::new(Arc::new(catalog), sampler_for(args.footprint_seed));

    let classifier = GeminiClassifier::new(GeminiConfig {
        api_key: args.gemini_api_key,
        base_url: args.gemini_base_url,
        model: args.model,
        timeout: Duration::from_secs(60),
    })?;

    let staged = StagedUpload::stage(&std::env::temp_dir(), bytes, &args.mime_type).await?;
    let classification = classifier
        .classify(staged.image())
        .await
        .context("classification failed")?;
    drop(staged);

    let report = estimator.estimate(&classification, classifier.model());
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
