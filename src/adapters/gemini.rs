use crate::domain::model::ClassificationResult;
use crate::domain::ports::{ImageClassifier, ImageRef};
use crate::utils::error::{EcoError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const CLASSIFY_PROMPT: &str = "Identify clothing items and category data in JSON format. \
if there is no clothing items send all values as invalid. here is an example json format \
{\"category\": \"Casual Wear\", \"items\": [\"hoodie\", \"sweatpants\"], \"cloth_image\": \"valid/invalid\"}.";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct GeminiClassifier {
    client: Client,
    cfg: Arc<GeminiConfig>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: UploadedFile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    uri: String,
    mime_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    File { file_data: FileData<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct FileData<'a> {
    mime_type: &'a str,
    file_uri: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

/// The classifier must return all three keys.
#[derive(Debug, Deserialize)]
struct ClothingPayload {
    category: String,
    items: Vec<String>,
    cloth_image: String,
}

impl GeminiClassifier {
    pub fn new(cfg: GeminiConfig) -> Result<Self> {
        let client = Client::builder().timeout(cfg.timeout).build()?;
        Ok(Self {
            client,
            cfg: Arc::new(cfg),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.cfg.base_url.trim_end_matches('/'), path)
    }

    async fn upload_file(&self, image: ImageRef<'_>) -> Result<UploadedFile> {
        let bytes = tokio::fs::read(image.path).await?;
        tracing::debug!("📡 Uploading {} bytes ({}) to classifier", bytes.len(), image.mime_type);

        let response = self
            .client
            .post(self.endpoint("/upload/v1beta/files"))
            .query(&[("uploadType", "media")])
            .header(API_KEY_HEADER, &self.cfg.api_key)
            .header(reqwest::header::CONTENT_TYPE, image.mime_type)
            .body(bytes)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let uploaded: UploadResponse = response.json().await?;
        Ok(uploaded.file)
    }

    async fn generate(&self, file: &UploadedFile, fallback_mime: &str) -> Result<serde_json::Value> {
        let mime_type = file.mime_type.as_deref().unwrap_or(fallback_mime);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::File {
                        file_data: FileData {
                            mime_type,
                            file_uri: &file.uri,
                        },
                    },
                    Part::Text { text: "\n\n" },
                    Part::Text {
                        text: CLASSIFY_PROMPT,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let path = format!("/v1beta/models/{}:generateContent", self.cfg.model);
        tracing::debug!("📡 Requesting classification from model {}", self.cfg.model);

        let response = self
            .client
            .post(self.endpoint(&path))
            .header(API_KEY_HEADER, &self.cfg.api_key)
            .json(&body)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    tracing::debug!("📡 Classifier response status: {}", status);
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::error!("❌ Classifier request failed with status: {}", status);
    Err(EcoError::ClassifierStatusError {
        status: status.as_u16(),
        message,
    })
}

/// 從 generateContent 回應中取出第一個候選的文字並解析成分類結果
pub fn parse_generate_response(response: &serde_json::Value) -> Result<ClassificationResult> {
    let text = response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(|v| v.as_str())
        .ok_or_else(|| EcoError::ClassifierResponseError {
            message: "response has no candidate text".to_string(),
        })?;

    parse_classification_text(text)
}

pub fn parse_classification_text(text: &str) -> Result<ClassificationResult> {
    let payload: ClothingPayload =
        serde_json::from_str(text).map_err(|e| EcoError::ClassifierResponseError {
            message: e.to_string(),
        })?;

    Ok(ClassificationResult {
        category: Some(payload.category),
        items: payload.items,
        image_validity: payload.cloth_image,
    })
}

#[async_trait::async_trait]
impl ImageClassifier for GeminiClassifier {
    async fn classify(&self, image: ImageRef<'_>) -> Result<ClassificationResult> {
        let file = self.upload_file(image).await?;
        let response = self.generate(&file, image.mime_type).await?;
        let result = parse_generate_response(&response)?;

        tracing::info!(
            "📥 Classified image: category={:?}, {} item(s), cloth_image={}",
            result.category,
            result.items.len(),
            result.image_validity
        );
        Ok(result)
    }

    fn model(&self) -> &str {
        &self.cfg.model
    }
}
