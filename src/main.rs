use clap::Parser;
use eco_footprint::adapters::gemini::GeminiClassifier;
use eco_footprint::app::auth::CredentialStore;
use eco_footprint::utils::{logger, validation::Validate};
use eco_footprint::{router, AppConfig, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();

    // 初始化日誌
    logger::init_server_logger(config.verbose, config.json_logs);

    tracing::info!("Starting eco-footprint server");
    if config.verbose {
        tracing::debug!(
            "Config: bind_addr={}, model={}, base_url={}, timeout={}s",
            config.bind_addr,
            config.model,
            config.gemini_base_url,
            config.request_timeout_secs
        );
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let estimator = match config.build_estimator() {
        Ok(estimator) => estimator,
        Err(e) => {
            tracing::error!(
                "❌ Failed to load catalog: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e);
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::info!(
        "📋 Catalog ready: {} garments, {} coupons",
        estimator.catalog().garment_count(),
        estimator.catalog().coupons().len()
    );

    let classifier = GeminiClassifier::new(config.gemini_config())?;
    let state = AppState::new(
        Arc::new(classifier),
        estimator,
        CredentialStore::new(config.auth_user.clone(), config.auth_password.clone()),
        config.staging_dir(),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("✅ Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown signal received");
}
