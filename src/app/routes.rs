use crate::adapters::staging::StagedUpload;
use crate::app::auth::BasicCredentials;
use crate::app::AppState;
use crate::domain::model::FootprintReport;
use crate::utils::error::{EcoError, Result};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub const UPLOAD_FIELD: &str = "file";
const DEFAULT_MIME_TYPE: &str = "image/png";

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

struct Upload {
    bytes: Vec<u8>,
    mime_type: String,
}

/// 超過 body 上限時回 413，其餘解析錯誤回 422
fn multipart_error(context: &str, e: MultipartError) -> EcoError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        EcoError::PayloadTooLarge {
            message: e.body_text(),
        }
    } else {
        EcoError::InvalidUpload {
            message: format!("{}: {}", context, e.body_text()),
        }
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Malformed multipart body", e))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let mime_type = field
            .content_type()
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read upload", e))?;
        return Ok(Upload {
            bytes: bytes.to_vec(),
            mime_type,
        });
    }

    Err(EcoError::InvalidUpload {
        message: format!("Missing multipart field '{}'", UPLOAD_FIELD),
    })
}

pub async fn upload(
    State(state): State<AppState>,
    credentials: BasicCredentials,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<FootprintReport>> {
    state.credentials.verify(&credentials)?;

    let multipart = multipart.map_err(|e| EcoError::InvalidUpload {
        message: e.body_text(),
    })?;
    let upload = read_upload(multipart).await?;

    // 暫存檔在離開此區塊時一定會被刪除
    let classification = {
        let staged =
            StagedUpload::stage(&state.staging_dir, upload.bytes, &upload.mime_type).await?;
        tracing::debug!("Read content size: {} bytes", staged.size());
        state.classifier.classify(staged.image()).await?
    };

    let report = state
        .estimator
        .estimate(&classification, state.classifier.model());
    Ok(Json(report))
}
