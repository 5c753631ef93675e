use lingua_types::AppEvent;

use crate::events::AppCtx;

/// Re-seed the session from a past translation. No request, no new entry.
pub async fn handle_restore(ctx: &mut AppCtx, id: &str) -> anyhow::Result<()> {
    let items = lingua_store::history::load(ctx.store.as_ref());
    let Some(item) = items.iter().find(|i| i.id == id) else {
        tracing::warn!("history item {id} not found");
        return Ok(());
    };
    ctx.session.restore(item);
    ctx.notify("Restored from history").await?;
    ctx.emit_session().await?;
    Ok(())
}

pub async fn handle_clear(ctx: &mut AppCtx) -> anyhow::Result<()> {
    if let Err(e) = lingua_store::history::clear(ctx.store.as_ref()) {
        tracing::warn!("failed to clear history: {e}");
    }
    ctx.notify("Cleared history").await?;
    ctx.tx_ui.send(AppEvent::HistoryChanged(Vec::new())).await?;
    Ok(())
}
