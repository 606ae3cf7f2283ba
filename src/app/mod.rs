pub mod auth;
pub mod routes;

use crate::core::estimator::FootprintEstimator;
use crate::domain::ports::ImageClassifier;
use auth::CredentialStore;
use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn ImageClassifier>,
    pub estimator: FootprintEstimator,
    pub credentials: Arc<CredentialStore>,
    pub staging_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        classifier: Arc<dyn ImageClassifier>,
        estimator: FootprintEstimator,
        credentials: CredentialStore,
        staging_dir: PathBuf,
    ) -> Self {
        Self {
            classifier,
            estimator,
            credentials: Arc::new(credentials),
            staging_dir: Arc::new(staging_dir),
        }
    }
}

pub fn router(state: AppState) -> Router {
    router_with_body_limit(state, MAX_UPLOAD_BYTES)
}

/// 與 `router` 相同，但可指定 body 上限
pub fn router_with_body_limit(state: AppState, limit: usize) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/upload", post(routes::upload))
        .layer(axum::extract::DefaultBodyLimit::max(limit))
        .with_state(state)
}
