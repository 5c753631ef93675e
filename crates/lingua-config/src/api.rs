use std::env;

#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL of the translation service
    pub base_url: String,
    /// Health poll interval gating the not-ready submit guard
    pub health_poll_ms: u64,
}

impl ApiConfig {
    pub fn new() -> Self {
        let base_url = env::var("LINGUA_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let health_poll_ms = env::var("LINGUA_HEALTH_POLL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000); // 10 seconds default

        Self {
            base_url,
            health_poll_ms,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}
