use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lingua_api::TranslationBackend;
use lingua_core::keyboard;
use lingua_core::notify::{NOTIFICATION_TTL, NotificationBus};
use lingua_core::session::Session;
use lingua_core::theme::ThemeController;
use lingua_store::{KeyValueStore, prefs};
use lingua_types::{AppEvent, CatalogState, KeyContext, KeyEvent, ShortcutAction};
use tokio_util::sync::CancellationToken;

use crate::io::{self, SystemThemeProbe};
use crate::state::AppState;

pub mod clipboard;
pub mod export;
pub mod history;
pub mod submit;
pub mod swap;
pub mod theme;

/// Everything the event handlers mutate, owned by the event loop.
pub struct AppCtx {
    pub session: Session,
    pub theme: ThemeController,
    pub bus: NotificationBus,
    pub catalog: CatalogState,
    pub model_name: Option<String>,
    pub store: Arc<dyn KeyValueStore>,
    pub backend: Arc<dyn TranslationBackend>,
    /// app -> UI
    pub tx_ui: AsyncSender<AppEvent>,
    /// loopback for spawned tasks posting completions into the loop
    pub tx_app: AsyncSender<AppEvent>,
    pub cancel: CancellationToken,
    pub theme_watch: Option<CancellationToken>,
    pub theme_poll_ms: u64,
    pub probe: SystemThemeProbe,
}

impl AppCtx {
    pub async fn emit_session(&self) -> anyhow::Result<()> {
        self.tx_ui
            .send(AppEvent::SessionChanged(self.session.snapshot()))
            .await?;
        Ok(())
    }

    /// Push a notification, schedule its per-item expiry, forward it to
    /// the UI.
    pub async fn notify(&mut self, message: impl Into<String>) -> anyhow::Result<()> {
        let notification = self.bus.push(message);
        let tx = self.tx_app.clone();
        let id = notification.id.clone();
        tokio::spawn(async move {
            tokio::time::sleep(NOTIFICATION_TTL).await;
            let _ = tx.send(AppEvent::NotificationExpired(id)).await;
        });
        self.tx_ui.send(AppEvent::Notified(notification)).await?;
        Ok(())
    }
}

/// App's main loop
#[allow(clippy::too_many_arguments)]
pub async fn event_loop(
    state: Arc<AppState>,
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn TranslationBackend>,
    rx: AsyncReceiver<AppEvent>,
    tx_ui: AsyncSender<AppEvent>,
    tx_app: AsyncSender<AppEvent>,
    probe: SystemThemeProbe,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (default_target, theme_poll_ms) = {
        let config = state.config.read().await;
        (config.default_target_lang.clone(), config.theme_poll_ms)
    };
    let mode = prefs::load_mode(store.as_ref());
    let theme_pref = prefs::load_theme(store.as_ref());

    let mut ctx = AppCtx {
        session: Session::new(mode, default_target),
        theme: ThemeController::new(theme_pref),
        bus: NotificationBus::new(),
        catalog: CatalogState::Loading,
        model_name: None,
        store,
        backend,
        tx_ui,
        tx_app,
        cancel,
        theme_watch: None,
        theme_poll_ms,
        probe,
    };

    // One-shot catalog fetch; the result comes back as an event.
    tokio::spawn(io::load_languages(ctx.backend.clone(), ctx.tx_app.clone()));
    theme::sync_watch(&mut ctx);

    ctx.tx_ui
        .send(AppEvent::ThemeChanged {
            preference: ctx.theme.preference(),
            effective: ctx.theme.effective(),
        })
        .await?;
    ctx.tx_ui
        .send(AppEvent::HistoryChanged(lingua_store::history::load(
            ctx.store.as_ref(),
        )))
        .await?;
    ctx.tx_ui
        .send(AppEvent::CatalogChanged(ctx.catalog.clone()))
        .await?;
    ctx.emit_session().await?;

    tracing::info!("event loop started");
    loop {
        let event = tokio::select! {
            _ = ctx.cancel.cancelled() => {
                tracing::info!("event loop cancelled");
                return Ok(());
            }
            event = rx.recv() => event?,
        };
        handle_event(&mut ctx, event).await?;
    }
}

pub async fn handle_event(ctx: &mut AppCtx, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::SourceTextChanged(text) => {
            ctx.session.set_source_text(text);
            ctx.emit_session().await?;
        }
        AppEvent::SourceLangChanged(code) => {
            ctx.session.set_source_lang(code);
            ctx.emit_session().await?;
        }
        AppEvent::TargetLangChanged(code) => {
            ctx.session.set_target_lang(code);
            ctx.emit_session().await?;
        }
        AppEvent::ModeChanged(mode) => {
            ctx.session.set_mode(mode);
            if let Err(e) = prefs::save_mode(ctx.store.as_ref(), mode) {
                tracing::warn!("failed to persist mode: {e}");
            }
            ctx.emit_session().await?;
        }
        AppEvent::Submit => submit::handle_submit(ctx).await?,
        AppEvent::TranslateFinished {
            generation,
            outcome,
        } => submit::handle_translate_finished(ctx, generation, outcome).await?,
        AppEvent::Swap => swap::handle_swap(ctx).await?,
        AppEvent::OutputClicked => swap::handle_output_click(ctx).await?,
        AppEvent::ClearSession => {
            ctx.session.clear();
            ctx.emit_session().await?;
        }
        AppEvent::RestoreHistory(id) => history::handle_restore(ctx, &id).await?,
        AppEvent::ClearHistory => history::handle_clear(ctx).await?,
        AppEvent::CopyTranslation => clipboard::handle_copy(ctx).await?,
        AppEvent::SaveTranslation(path) => export::handle_save(ctx, path).await?,
        AppEvent::CycleTheme => theme::handle_cycle(ctx).await?,
        AppEvent::SystemThemeChanged(dark) => theme::handle_system_change(ctx, dark).await?,
        AppEvent::KeyDown { event, context } => handle_key(ctx, event, context).await?,
        AppEvent::HealthChanged(status) => {
            let ready = status.model_loaded;
            let changed =
                ready != ctx.session.model_ready() || status.model_name != ctx.model_name;
            ctx.session.set_model_ready(ready);
            ctx.model_name = status.model_name;
            if changed {
                ctx.tx_ui
                    .send(AppEvent::ModelStatusChanged {
                        ready,
                        model_name: ctx.model_name.clone(),
                    })
                    .await?;
                ctx.emit_session().await?;
            }
        }
        AppEvent::LanguagesLoaded(result) => {
            ctx.catalog = match result {
                Ok(languages) => CatalogState::Ready(languages),
                Err(e) => {
                    tracing::warn!("failed to load languages: {e}");
                    CatalogState::Failed
                }
            };
            ctx.tx_ui
                .send(AppEvent::CatalogChanged(ctx.catalog.clone()))
                .await?;
        }
        AppEvent::NotificationExpired(id) => {
            if ctx.bus.expire(&id) {
                ctx.tx_ui.send(AppEvent::NotificationExpired(id)).await?;
            }
        }
        // app -> UI events never loop back here
        AppEvent::SessionChanged(_)
        | AppEvent::CatalogChanged(_)
        | AppEvent::HistoryChanged(_)
        | AppEvent::Notified(_)
        | AppEvent::ThemeChanged { .. }
        | AppEvent::ModelStatusChanged { .. }
        | AppEvent::FocusInput
        | AppEvent::FocusPickerSearch => {}
    }
    Ok(())
}

async fn handle_key(ctx: &mut AppCtx, event: KeyEvent, context: KeyContext) -> anyhow::Result<()> {
    // the loop knows whether a result exists; don't trust the UI for that
    let context = KeyContext {
        has_result: ctx.session.last_translated_text().is_some(),
        ..context
    };
    match keyboard::route(event, context) {
        Some(ShortcutAction::Submit) => submit::handle_submit(ctx).await?,
        Some(ShortcutAction::FocusPickerSearch) => {
            ctx.tx_ui.send(AppEvent::FocusPickerSearch).await?;
        }
        Some(ShortcutAction::CopyTranslation) => clipboard::handle_copy(ctx).await?,
        None => {}
    }
    Ok(())
}
