use std::env;
use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use lingua_api::TranslationBackend;
use lingua_types::{AppEvent, HealthStatus};
use tokio_util::sync::CancellationToken;

/// Injectable OS dark-mode probe; `None` means no signal available.
pub type SystemThemeProbe = Arc<dyn Fn() -> Option<bool> + Send + Sync>;

/// Fallback probe driven by `LINGUA_SYSTEM_DARK=1|0`.
pub fn env_probe() -> SystemThemeProbe {
    Arc::new(|| match env::var("LINGUA_SYSTEM_DARK").ok()?.as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    })
}

/// Poll `/api/health`; a failed check reports the model as not loaded so
/// the submit guard trips rather than erroring.
pub async fn health_watcher(
    backend: Arc<dyn TranslationBackend>,
    interval: Duration,
    cancel: CancellationToken,
    tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            _ = ticker.tick() => {}
        }
        let status = match backend.health().await {
            Ok(status) => status,
            Err(e) => {
                tracing::debug!("health check failed: {e}");
                HealthStatus {
                    status: "error".to_string(),
                    model_loaded: false,
                    model_name: None,
                }
            }
        };
        tx.send(AppEvent::HealthChanged(status)).await?;
    }
}

/// One-shot supported-language fetch at startup.
pub async fn load_languages(
    backend: Arc<dyn TranslationBackend>,
    tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let outcome = backend.languages().await.map_err(|e| e.to_string());
    tx.send(AppEvent::LanguagesLoaded(outcome)).await?;
    Ok(())
}

/// Forward OS appearance changes into the loop while the token is live.
pub async fn system_theme_watcher(
    probe: SystemThemeProbe,
    interval: Duration,
    cancel: CancellationToken,
    tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(interval);
    let mut last = None;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            _ = ticker.tick() => {}
        }
        if let Some(dark) = probe()
            && last != Some(dark)
        {
            last = Some(dark);
            tx.send(AppEvent::SystemThemeChanged(dark)).await?;
        }
    }
}
