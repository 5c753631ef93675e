use std::fs;
use std::path::PathBuf;

use crate::events::AppCtx;

/// Default export file name for a target language.
pub fn default_file_name(target_lang: &str) -> String {
    format!("lingua-{target_lang}.txt")
}

/// Write the last translation to a text file. Without a result this is a
/// no-op, matching the copy action.
pub async fn handle_save(ctx: &mut AppCtx, path: Option<String>) -> anyhow::Result<()> {
    let Some(text) = ctx.session.last_translated_text().map(str::to_string) else {
        return Ok(());
    };
    let path =
        PathBuf::from(path.unwrap_or_else(|| default_file_name(ctx.session.target_lang())));
    match fs::write(&path, &text) {
        Ok(()) => ctx.notify(format!("Saved {}", path.display())).await?,
        Err(e) => {
            tracing::warn!("export write failed: {e}");
            ctx.notify("Could not save the file").await?;
        }
    }
    Ok(())
}
