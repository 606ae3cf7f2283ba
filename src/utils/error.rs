use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoError {
    #[error("Classifier request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Classifier returned status {status}: {message}")]
    ClassifierStatusError { status: u16, message: String },

    #[error("Failed to process classifier response: {message}")]
    ClassifierResponseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Invalid upload: {message}")]
    InvalidUpload { message: String },

    #[error("Upload exceeds the body limit: {message}")]
    PayloadTooLarge { message: String },
}

pub type Result<T> = std::result::Result<T, EcoError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Auth,
    Input,
    Classifier,
    Config,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

pub const INVALID_CREDENTIALS_DETAIL: &str = "Invalid credentials.";
pub const CLASSIFIER_RESPONSE_DETAIL: &str = "Failed to process classifier response.";
pub const PAYLOAD_TOO_LARGE_DETAIL: &str = "Uploaded file is too large.";
pub const UNEXPECTED_ERROR_DETAIL: &str = "An unexpected error occurred.";

impl EcoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EcoError::Unauthorized => ErrorCategory::Auth,
            EcoError::InvalidUpload { .. } | EcoError::PayloadTooLarge { .. } => {
                ErrorCategory::Input
            }
            EcoError::ApiError(_)
            | EcoError::ClassifierStatusError { .. }
            | EcoError::ClassifierResponseError { .. } => ErrorCategory::Classifier,
            EcoError::ConfigError { .. }
            | EcoError::InvalidConfigValueError { .. }
            | EcoError::MissingConfigError { .. } => ErrorCategory::Config,
            EcoError::IoError(_) | EcoError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Auth | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Classifier => ErrorSeverity::Medium,
            ErrorCategory::Internal => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EcoError::Unauthorized => "檢查 Basic auth 帳號密碼 (AUTH_USER / AUTH_PASSWORD)",
            EcoError::InvalidUpload { .. } => "Send the image as a multipart field named 'file'",
            EcoError::PayloadTooLarge { .. } => "上傳檔案需小於 20 MiB",
            EcoError::ApiError(_) | EcoError::ClassifierStatusError { .. } => {
                "Check GEMINI_API_KEY, GEMINI_BASE_URL and network connectivity"
            }
            EcoError::ClassifierResponseError { .. } => {
                "The classifier did not return the expected JSON; retry with a clearer photo"
            }
            EcoError::ConfigError { .. }
            | EcoError::InvalidConfigValueError { .. }
            | EcoError::MissingConfigError { .. } => {
                "檢查命令列參數或環境變數設定，或執行 --help 查看說明"
            }
            EcoError::IoError(_) => "Check that the staging directory exists and is writable",
            EcoError::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EcoError::Unauthorized => StatusCode::UNAUTHORIZED,
            EcoError::InvalidUpload { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            EcoError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 回傳給用戶端的訊息，內部細節只寫入日誌
    pub fn public_detail(&self) -> String {
        match self {
            EcoError::Unauthorized => INVALID_CREDENTIALS_DETAIL.to_string(),
            EcoError::InvalidUpload { message } => message.clone(),
            EcoError::PayloadTooLarge { .. } => PAYLOAD_TOO_LARGE_DETAIL.to_string(),
            EcoError::ClassifierResponseError { .. } => CLASSIFIER_RESPONSE_DETAIL.to_string(),
            _ => UNEXPECTED_ERROR_DETAIL.to_string(),
        }
    }
}

impl IntoResponse for EcoError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                self,
                self.category(),
                self.severity()
            );
        } else {
            tracing::warn!("🔶 Request rejected: {}", self);
        }

        let body = Json(serde_json::json!({ "detail": self.public_detail() }));
        let mut response = (status, body).into_response();
        if matches!(self, EcoError::Unauthorized) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}
