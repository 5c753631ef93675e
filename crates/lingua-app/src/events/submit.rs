use lingua_types::{AppEvent, TranslateResponse};

use crate::events::AppCtx;

/// `Idle -> Submitting`. The remote call runs on its own task so the loop
/// keeps handling events; the completion comes back as `TranslateFinished`.
pub async fn handle_submit(ctx: &mut AppCtx) -> anyhow::Result<()> {
    let (generation, request) = match ctx.session.begin_submit() {
        Ok(pair) => pair,
        Err(blocked) => {
            tracing::debug!("submit blocked: {blocked}");
            return Ok(());
        }
    };
    ctx.emit_session().await?;

    let backend = ctx.backend.clone();
    let tx = ctx.tx_app.clone();
    tokio::spawn(async move {
        let outcome = backend
            .translate(&request)
            .await
            .map_err(|e| e.to_string());
        let _ = tx
            .send(AppEvent::TranslateFinished {
                generation,
                outcome,
            })
            .await;
    });
    Ok(())
}

pub async fn handle_translate_finished(
    ctx: &mut AppCtx,
    generation: u64,
    outcome: Result<TranslateResponse, String>,
) -> anyhow::Result<()> {
    match outcome {
        Ok(response) => {
            if let Some(item) = ctx.session.complete(generation, response) {
                match lingua_store::history::append(ctx.store.as_ref(), item) {
                    Ok(items) => ctx.tx_ui.send(AppEvent::HistoryChanged(items)).await?,
                    Err(e) => tracing::warn!("failed to persist history: {e}"),
                }
            } else {
                tracing::debug!("dropping stale translation response");
            }
        }
        Err(message) => {
            ctx.session.fail(generation);
            ctx.notify(message).await?;
        }
    }
    ctx.emit_session().await?;
    Ok(())
}
