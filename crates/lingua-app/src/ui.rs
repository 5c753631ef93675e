use kanal::{AsyncReceiver, AsyncSender};
use lingua_core::catalog;
use lingua_types::{AppEvent, CatalogState, HistoryItem, Language, Mode};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

/// Line-oriented console front end. Rendering proper is out of scope;
/// this adapter exists to drive and observe the event contract.
pub async fn console_loop(
    rx: AsyncReceiver<AppEvent>,
    tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut view = ConsoleView::default();
    println!("lingua — type text to translate, :help for commands");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            event = rx.recv() => render(event?, &mut view),
            line = lines.next_line() => {
                let Some(line) = line? else { return Ok(()) };
                if !dispatch_line(line.trim(), &tx, &view).await? {
                    return Ok(());
                }
            }
        }
    }
}

#[derive(Default)]
struct ConsoleView {
    languages: Vec<Language>,
    history: Vec<HistoryItem>,
    pending: bool,
}

fn render(event: AppEvent, view: &mut ConsoleView) {
    match event {
        AppEvent::SessionChanged(snapshot) => {
            if snapshot.pending && !view.pending {
                println!("…translating");
            } else if view.pending
                && !snapshot.pending
                && let Some(result) = &snapshot.last_result
            {
                println!("→ {}", result.translated_text);
                if let Some(code) = &result.detected_source_lang {
                    println!("  detected {code}, {} ms", result.latency_ms);
                }
                if snapshot.detection_uncertain {
                    println!("  detection uncertain — consider choosing a source language");
                }
            }
            view.pending = snapshot.pending;
        }
        AppEvent::Notified(notification) => println!("* {}", notification.message),
        AppEvent::ModelStatusChanged { ready, model_name } => {
            if ready {
                println!(
                    "model ready: {}",
                    model_name.as_deref().unwrap_or("unknown")
                );
            } else {
                println!("model not loaded — translation disabled");
            }
        }
        AppEvent::CatalogChanged(state) => match state {
            CatalogState::Ready(languages) => {
                println!("{} languages available", languages.len());
                view.languages = languages;
            }
            CatalogState::Failed => {
                println!("could not load languages; selection disabled");
                view.languages = Vec::new();
            }
            CatalogState::Loading => {}
        },
        AppEvent::HistoryChanged(items) => view.history = items,
        AppEvent::ThemeChanged { preference, .. } => {
            tracing::debug!("theme preference now {}", preference.as_str());
        }
        // focus changes have no console equivalent
        _ => {}
    }
}

/// Returns `false` when the user asked to quit.
async fn dispatch_line(
    line: &str,
    tx: &AsyncSender<AppEvent>,
    view: &ConsoleView,
) -> anyhow::Result<bool> {
    if line.is_empty() {
        return Ok(true);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    match command {
        ":quit" | ":q" => return Ok(false),
        ":help" => print_help(),
        ":from" => tx.send(AppEvent::SourceLangChanged(rest.to_string())).await?,
        ":to" => tx.send(AppEvent::TargetLangChanged(rest.to_string())).await?,
        ":mode" => match Mode::parse(rest) {
            Some(mode) => tx.send(AppEvent::ModeChanged(mode)).await?,
            None => println!("unknown mode '{rest}' (smart, literal, natural)"),
        },
        ":swap" => tx.send(AppEvent::Swap).await?,
        ":clear" => tx.send(AppEvent::ClearSession).await?,
        ":copy" => tx.send(AppEvent::CopyTranslation).await?,
        ":save" => {
            let path = (!rest.is_empty()).then(|| rest.to_string());
            tx.send(AppEvent::SaveTranslation(path)).await?
        }
        ":theme" => tx.send(AppEvent::CycleTheme).await?,
        ":forget" => tx.send(AppEvent::ClearHistory).await?,
        ":history" => print_history(view),
        ":restore" => match rest.parse::<usize>().ok().and_then(|n| view.history.get(n)) {
            Some(item) => tx.send(AppEvent::RestoreHistory(item.id.clone())).await?,
            None => println!("no history entry '{rest}'"),
        },
        ":langs" => print_languages(rest, view),
        _ if command.starts_with(':') => println!("unknown command {command}, :help lists them"),
        _ => {
            tx.send(AppEvent::SourceTextChanged(line.to_string())).await?;
            tx.send(AppEvent::Submit).await?;
        }
    }
    Ok(true)
}

fn print_help() {
    println!(
        "  <text>            translate the line\n\
         \x20 :from <code>      set source language (auto = detect)\n\
         \x20 :to <code>        set target language\n\
         \x20 :mode <m>         smart | literal | natural\n\
         \x20 :swap             swap source and target\n\
         \x20 :clear            clear input and result\n\
         \x20 :copy             copy last translation\n\
         \x20 :save [path]      save last translation to a file\n\
         \x20 :theme            cycle theme\n\
         \x20 :history          list past translations\n\
         \x20 :restore <n>      restore a history entry\n\
         \x20 :forget           clear history\n\
         \x20 :langs [query]    list/filter languages\n\
         \x20 :quit             exit"
    );
}

fn print_history(view: &ConsoleView) {
    if view.history.is_empty() {
        println!("no history yet");
        return;
    }
    for (index, item) in view.history.iter().enumerate() {
        let mut text: String = item.source_text.chars().take(40).collect();
        if text.len() < item.source_text.len() {
            text.push('…');
        }
        println!(
            "  [{index}] {} → {}  {text}",
            item.source_lang, item.target_lang
        );
    }
}

fn print_languages(query: &str, view: &ConsoleView) {
    let items = catalog::filter(query, &catalog::with_auto(&view.languages));
    if items.is_empty() {
        println!("no matches");
        return;
    }
    for language in items {
        println!("  {:<6} {}", language.code, language.name);
    }
}
