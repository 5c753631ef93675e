use std::env;

use self::api::ApiConfig;

pub mod api;

pub struct Config {
    pub api: ApiConfig,

    /// Target language preselected when nothing else informs one
    pub default_target_lang: String,
    /// Poll interval for the OS appearance probe while theme = system
    pub theme_poll_ms: u64,
}

impl Config {
    pub fn new() -> Self {
        let default_target_lang =
            env::var("LINGUA_DEFAULT_TARGET").unwrap_or_else(|_| "es".to_string());

        let theme_poll_ms = env::var("LINGUA_THEME_POLL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1000); // 1 second default

        Config {
            api: ApiConfig::new(),
            default_target_lang,
            theme_poll_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
