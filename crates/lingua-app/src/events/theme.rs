use std::time::Duration;

use lingua_types::AppEvent;

use crate::events::AppCtx;
use crate::io;

pub async fn handle_cycle(ctx: &mut AppCtx) -> anyhow::Result<()> {
    let next = ctx.theme.cycle();
    if let Err(e) = lingua_store::prefs::save_theme(ctx.store.as_ref(), next) {
        tracing::warn!("failed to persist theme: {e}");
    }
    sync_watch(ctx);
    ctx.notify(format!("Theme: {}", next.as_str())).await?;
    emit(ctx).await
}

pub async fn handle_system_change(ctx: &mut AppCtx, dark: bool) -> anyhow::Result<()> {
    if !ctx.theme.wants_system_watch() {
        // late event from a watcher that has since been cancelled
        return Ok(());
    }
    ctx.theme.observe_system(dark);
    emit(ctx).await
}

/// Keep the OS-preference watcher alive exactly while the preference is
/// `system`.
pub fn sync_watch(ctx: &mut AppCtx) {
    if ctx.theme.wants_system_watch() {
        if ctx.theme_watch.is_none() {
            let token = ctx.cancel.child_token();
            tokio::spawn(io::system_theme_watcher(
                ctx.probe.clone(),
                Duration::from_millis(ctx.theme_poll_ms),
                token.clone(),
                ctx.tx_app.clone(),
            ));
            ctx.theme_watch = Some(token);
        }
    } else if let Some(token) = ctx.theme_watch.take() {
        token.cancel();
    }
}

async fn emit(ctx: &AppCtx) -> anyhow::Result<()> {
    ctx.tx_ui
        .send(AppEvent::ThemeChanged {
            preference: ctx.theme.preference(),
            effective: ctx.theme.effective(),
        })
        .await?;
    Ok(())
}
