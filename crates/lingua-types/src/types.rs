use serde::{Deserialize, Serialize};

/// Pseudo source-language code that asks the backend to detect the language.
pub const AUTO_LANG: &str = "auto";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    /// Synthetic catalog entry for automatic detection; never returned by the backend.
    pub fn auto() -> Self {
        Self {
            code: AUTO_LANG.to_string(),
            name: "Auto-detect".to_string(),
        }
    }
}

/// Translation strategy requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Smart,
    Literal,
    Natural,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Smart => "smart",
            Mode::Literal => "literal",
            Mode::Natural => "natural",
        }
    }

    pub fn parse(raw: &str) -> Option<Mode> {
        match raw {
            "smart" => Some(Mode::Smart),
            "literal" => Some(Mode::Literal),
            "natural" => Some(Mode::Natural),
            _ => None,
        }
    }
}

/// Persisted display preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn parse(raw: &str) -> Option<Theme> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}

/// Concrete appearance after resolving a `system` preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<TranslateOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub detected_source_lang: Option<String>,
    #[serde(default)]
    pub detection_confidence: Option<f64>,
    #[serde(default)]
    pub used_mode: Option<Mode>,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    pub model_name: Option<String>,
}

/// Immutable record of one successful translation.
///
/// Persisted as camelCase JSON; payloads written before `mode` existed load
/// with `mode = smart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub created_at: u64,
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub detected_source_lang: Option<String>,
    pub latency_ms: u64,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_mode: Option<Mode>,
}

/// Read-only view of the session pushed to the UI after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub source_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub mode: Mode,
    pub pending: bool,
    pub model_ready: bool,
    pub can_submit: bool,
    /// Auto-detect was requested but the last result carried no detection.
    pub detection_uncertain: bool,
    pub last_result: Option<TranslateResponse>,
}

/// Supported-language list as seen by the UI.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    Ready(Vec<Language>),
    Failed,
}

impl CatalogState {
    pub fn languages(&self) -> &[Language] {
        match self {
            CatalogState::Ready(languages) => languages,
            _ => &[],
        }
    }

    /// Language pickers stay disabled until the catalog is ready.
    pub fn selection_disabled(&self) -> bool {
        !matches!(self, CatalogState::Ready(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
    /// IME composition in progress; such events must never trigger shortcuts.
    pub composing: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            shift: false,
            alt: false,
            composing: false,
        }
    }
}

/// Focus state the shortcut router needs to evaluate its guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyContext {
    pub input_focused: bool,
    pub picker_open: bool,
    pub has_result: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Submit,
    FocusPickerSearch,
    CopyTranslation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    // UI -> app
    SourceTextChanged(String),
    SourceLangChanged(String),
    TargetLangChanged(String),
    ModeChanged(Mode),
    Submit,
    Swap,
    /// Clicking the rendered output swaps and refocuses the input.
    OutputClicked,
    ClearSession,
    RestoreHistory(String),
    ClearHistory,
    CopyTranslation,
    /// Write the last translation to a text file; `None` picks the
    /// default `lingua-<target>.txt` name.
    SaveTranslation(Option<String>),
    CycleTheme,
    KeyDown {
        event: KeyEvent,
        context: KeyContext,
    },
    // watcher/task -> app
    HealthChanged(HealthStatus),
    LanguagesLoaded(Result<Vec<Language>, String>),
    TranslateFinished {
        generation: u64,
        outcome: Result<TranslateResponse, String>,
    },
    /// Timer -> app when a toast's TTL elapses; forwarded app -> UI once
    /// the bus has dropped the item.
    NotificationExpired(String),
    SystemThemeChanged(bool),
    // app -> UI
    SessionChanged(SessionSnapshot),
    CatalogChanged(CatalogState),
    HistoryChanged(Vec<HistoryItem>),
    Notified(Notification),
    ThemeChanged {
        preference: Theme,
        effective: Appearance,
    },
    ModelStatusChanged {
        ready: bool,
        model_name: Option<String>,
    },
    FocusInput,
    FocusPickerSearch,
}
