use crate::events::AppCtx;

pub async fn handle_copy(ctx: &mut AppCtx) -> anyhow::Result<()> {
    let Some(text) = ctx.session.last_translated_text().map(str::to_string) else {
        return Ok(());
    };
    match write_clipboard(&text) {
        Ok(()) => ctx.notify("Copied translation").await?,
        Err(e) => {
            tracing::warn!("clipboard write failed: {e}");
            ctx.notify("Could not access the clipboard").await?;
        }
    }
    Ok(())
}

fn write_clipboard(text: &str) -> anyhow::Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}
