use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lingua_api::TranslationBackend;
use lingua_store::KeyValueStore;
use lingua_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::{self, SystemThemeProbe};
use crate::state::AppState;
use crate::ui::console_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // snapshot burst capacity
            ui_to_app: kanal::bounded_async(64),  // UI interactions
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn TranslationBackend>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(
        state: Arc<AppState>,
        store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn TranslationBackend>,
    ) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            store,
            backend,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, probe: SystemThemeProbe) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.store.clone(),
            self.backend.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.channels.ui_to_app.0.clone(),
            probe,
            self.cancel_token.child_token(),
        ));

        // Health watcher
        let backend = self.backend.clone();
        let state = self.state.clone();
        let tx = self.channels.ui_to_app.0.clone();
        let token = self.cancel_token.child_token();
        tasks.spawn(async move {
            let interval = {
                let config = state.config.read().await;
                Duration::from_millis(config.api.health_poll_ms)
            };
            io::health_watcher(backend, interval, token, tx).await
        });

        // Console front end
        tasks.spawn(console_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
