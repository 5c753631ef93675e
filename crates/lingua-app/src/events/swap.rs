use lingua_core::session::SwapOutcome;
use lingua_types::AppEvent;

use crate::events::AppCtx;

pub async fn handle_swap(ctx: &mut AppCtx) -> anyhow::Result<()> {
    if ctx.session.swap() == SwapOutcome::TargetNeeded {
        ctx.notify("Pick a target language after swap").await?;
    }
    ctx.emit_session().await?;
    Ok(())
}

/// Clicking the rendered output re-seeds the input: swap, then refocus.
pub async fn handle_output_click(ctx: &mut AppCtx) -> anyhow::Result<()> {
    handle_swap(ctx).await?;
    ctx.tx_ui.send(AppEvent::FocusInput).await?;
    Ok(())
}
