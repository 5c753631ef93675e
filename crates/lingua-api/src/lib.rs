use lingua_types::{HealthStatus, Language, TranslateRequest, TranslateResponse};
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status decoded from the service's error envelope.
    #[error("{code}: {message}")]
    Remote { code: String, message: String },
}

/// Remote translation service interface
#[async_trait::async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Service/model readiness, polled periodically
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    /// Supported languages, fetched once per session
    async fn languages(&self) -> Result<Vec<Language>, ApiError>;

    /// Translate text according to the request
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, ApiError>;
}

#[derive(Deserialize)]
struct LanguagesBody {
    languages: Vec<Language>,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Deserialize, Default)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP/JSON client for the translation service
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(remote_error(status.as_u16(), &body))
    }
}

/// Map a non-success response to `Remote`, tolerating an absent or
/// partial `{error: {code, message}}` envelope.
fn remote_error(status: u16, body: &[u8]) -> ApiError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let detail = parsed.error.unwrap_or_default();
    ApiError::Remote {
        code: detail.code.unwrap_or_else(|| "HTTP_ERROR".to_string()),
        message: detail
            .message
            .unwrap_or_else(|| format!("Request failed ({status})")),
    }
}

#[async_trait::async_trait]
impl TranslationBackend for HttpBackend {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self.client.get(self.url("/api/health")).send().await?;
        Self::decode(response).await
    }

    async fn languages(&self) -> Result<Vec<Language>, ApiError> {
        let response = self.client.get(self.url("/api/languages")).send().await?;
        let body: LanguagesBody = Self::decode(response).await?;
        Ok(body.languages)
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/api/translate"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }
}
