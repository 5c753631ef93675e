use std::time::{SystemTime, UNIX_EPOCH};

use lingua_types::{
    AUTO_LANG, HistoryItem, Mode, SessionSnapshot, TranslateOptions, TranslateRequest,
    TranslateResponse,
};
use uuid::Uuid;

/// Why a submit attempt did not start a request. Blocked submits are
/// no-ops; nothing is queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("translation service not ready")]
    NotReady,
    #[error("enter some text to translate")]
    EmptyInput,
    #[error("choose a target language")]
    NoTarget,
    #[error("a translation is already in flight")]
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    Swapped,
    /// Auto-detect source with no prior detection: the target ends up
    /// unset and the user must pick one.
    TargetNeeded,
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    request: TranslateRequest,
}

/// The translation session state machine.
///
/// One instance per session, mutated only by the application event loop.
/// Every mutation that would make an outstanding request's result stale
/// bumps `generation`; completions carry the generation captured at
/// submit time and are dropped when it no longer matches.
#[derive(Debug)]
pub struct Session {
    source_text: String,
    source_lang: String,
    target_lang: String,
    mode: Mode,
    model_ready: bool,
    last_result: Option<TranslateResponse>,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl Session {
    pub fn new(mode: Mode, target_lang: impl Into<String>) -> Self {
        Self {
            source_text: String::new(),
            source_lang: AUTO_LANG.to_string(),
            target_lang: target_lang.into(),
            mode,
            model_ready: false,
            last_result: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn model_ready(&self) -> bool {
        self.model_ready
    }

    pub fn set_model_ready(&mut self, ready: bool) {
        self.model_ready = ready;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn set_source_lang(&mut self, code: impl Into<String>) {
        self.source_lang = code.into();
        self.generation += 1;
    }

    /// `"auto"` is not a selectable target; such attempts are ignored.
    pub fn set_target_lang(&mut self, code: impl Into<String>) {
        let code = code.into();
        if code == AUTO_LANG {
            return;
        }
        self.target_lang = code;
        self.generation += 1;
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.source_text = text.into();
        self.generation += 1;
    }

    pub fn last_translated_text(&self) -> Option<&str> {
        self.last_result.as_ref().map(|r| r.translated_text.as_str())
    }

    pub fn can_submit(&self) -> bool {
        self.model_ready
            && !self.source_text.trim().is_empty()
            && !self.target_lang.is_empty()
            && self.in_flight.is_none()
    }

    /// `Idle -> Submitting`. Returns the wire request and the generation
    /// token the eventual completion must carry.
    pub fn begin_submit(&mut self) -> Result<(u64, TranslateRequest), SubmitBlocked> {
        if self.in_flight.is_some() {
            return Err(SubmitBlocked::InFlight);
        }
        if !self.model_ready {
            return Err(SubmitBlocked::NotReady);
        }
        if self.source_text.trim().is_empty() {
            return Err(SubmitBlocked::EmptyInput);
        }
        if self.target_lang.is_empty() {
            return Err(SubmitBlocked::NoTarget);
        }

        let request = TranslateRequest {
            text: self.source_text.clone(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            options: Some(TranslateOptions {
                mode: Some(self.mode),
                ..TranslateOptions::default()
            }),
        };
        let generation = self.generation;
        self.in_flight = Some(InFlight {
            generation,
            request: request.clone(),
        });
        Ok((generation, request))
    }

    /// `Submitting -> Succeeded`. Stores the result and returns the
    /// history item built from the request/result pair, or `None` when
    /// the response is stale (session mutated since submit).
    pub fn complete(
        &mut self,
        generation: u64,
        response: TranslateResponse,
    ) -> Option<HistoryItem> {
        let flight = self
            .in_flight
            .take_if(|f| f.generation == generation)?;
        if self.generation != generation {
            return None;
        }

        let mode = flight
            .request
            .options
            .as_ref()
            .and_then(|o| o.mode)
            .unwrap_or(self.mode);
        let item = HistoryItem {
            id: Uuid::new_v4().to_string(),
            created_at: now_millis(),
            source_text: flight.request.text,
            translated_text: response.translated_text.clone(),
            source_lang: flight.request.source_lang,
            target_lang: flight.request.target_lang,
            detected_source_lang: response.detected_source_lang.clone(),
            latency_ms: response.latency_ms,
            mode,
            used_mode: response.used_mode,
        };
        self.last_result = Some(response);
        Some(item)
    }

    /// `Submitting -> Failed`. Returns to idle; `last_result` is left as
    /// it was. The caller surfaces exactly one notification.
    pub fn fail(&mut self, generation: u64) {
        self.in_flight.take_if(|f| f.generation == generation);
    }

    /// Clears input text and the last result.
    pub fn clear(&mut self) {
        self.source_text.clear();
        self.last_result = None;
        self.generation += 1;
    }

    /// Exchange source and target.
    ///
    /// With a concrete source the languages simply trade places (an empty
    /// target maps to an auto source). With `source == "auto"` the new
    /// target is resolved from the last result's detection; without one
    /// the target ends up unset and the caller must prompt for it.
    pub fn swap(&mut self) -> SwapOutcome {
        self.generation += 1;
        let outcome = if self.source_lang == AUTO_LANG {
            let next_target = self
                .last_result
                .as_ref()
                .and_then(|r| r.detected_source_lang.clone())
                .unwrap_or_default();
            self.source_lang = std::mem::take(&mut self.target_lang);
            self.target_lang = next_target;
            if self.target_lang.is_empty() {
                SwapOutcome::TargetNeeded
            } else {
                SwapOutcome::Swapped
            }
        } else {
            let next_source = if self.target_lang.is_empty() {
                AUTO_LANG.to_string()
            } else {
                self.target_lang.clone()
            };
            self.target_lang = std::mem::replace(&mut self.source_lang, next_source);
            SwapOutcome::Swapped
        };
        self.source_text.clear();
        self.last_result = None;
        outcome
    }

    /// Replace the session with a past translation. No request is issued
    /// and no new history entry is created.
    pub fn restore(&mut self, item: &HistoryItem) {
        self.source_text = item.source_text.clone();
        self.source_lang = item.source_lang.clone();
        self.target_lang = item.target_lang.clone();
        self.last_result = Some(TranslateResponse {
            translated_text: item.translated_text.clone(),
            detected_source_lang: item.detected_source_lang.clone(),
            detection_confidence: None,
            used_mode: item.used_mode,
            latency_ms: item.latency_ms,
        });
        self.generation += 1;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            source_text: self.source_text.clone(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            mode: self.mode,
            pending: self.pending(),
            model_ready: self.model_ready,
            can_submit: self.can_submit(),
            detection_uncertain: self.source_lang == AUTO_LANG
                && self
                    .last_result
                    .as_ref()
                    .is_some_and(|r| r.detected_source_lang.is_none()),
            last_result: self.last_result.clone(),
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> Session {
        let mut session = Session::new(Mode::Smart, "es");
        session.set_model_ready(true);
        session
    }

    fn response(text: &str, detected: Option<&str>) -> TranslateResponse {
        TranslateResponse {
            translated_text: text.to_string(),
            detected_source_lang: detected.map(str::to_string),
            detection_confidence: None,
            used_mode: None,
            latency_ms: 42,
        }
    }

    #[test]
    fn submit_succeeds_and_records_history() {
        let mut session = ready_session();
        session.set_source_text("Hello");

        let (generation, request) = session.begin_submit().unwrap();
        assert!(session.pending());
        assert_eq!(request.source_lang, "auto");
        assert_eq!(request.target_lang, "es");

        let item = session
            .complete(generation, response("Hola", Some("en")))
            .unwrap();
        assert!(!session.pending());
        assert_eq!(session.last_translated_text(), Some("Hola"));
        assert_eq!(item.source_text, "Hello");
        assert_eq!(item.source_lang, "auto");
        assert_eq!(item.target_lang, "es");
        assert_eq!(item.detected_source_lang.as_deref(), Some("en"));
        assert_eq!(item.latency_ms, 42);
        assert_eq!(item.mode, Mode::Smart);
    }

    #[test]
    fn submit_guards_report_the_blocking_reason() {
        let mut session = Session::new(Mode::Smart, "es");
        session.set_source_text("Hello");
        assert_eq!(session.begin_submit().unwrap_err(), SubmitBlocked::NotReady);

        session.set_model_ready(true);
        session.set_source_text("   ");
        assert_eq!(
            session.begin_submit().unwrap_err(),
            SubmitBlocked::EmptyInput
        );

        let mut session = ready_session();
        session.set_source_text("Hello");
        session.target_lang.clear();
        assert_eq!(session.begin_submit().unwrap_err(), SubmitBlocked::NoTarget);
    }

    #[test]
    fn second_submit_while_pending_is_rejected() {
        let mut session = ready_session();
        session.set_source_text("Hello");

        session.begin_submit().unwrap();
        assert_eq!(session.begin_submit().unwrap_err(), SubmitBlocked::InFlight);
        assert!(session.pending());
    }

    #[test]
    fn failure_returns_to_idle_and_keeps_last_result() {
        let mut session = ready_session();
        session.set_source_text("Hello");
        let (generation, _) = session.begin_submit().unwrap();
        session.complete(generation, response("Hola", Some("en")));

        session.set_source_text("Hello again");
        let (generation, _) = session.begin_submit().unwrap();
        session.fail(generation);

        assert!(!session.pending());
        assert!(session.can_submit());
        assert_eq!(session.last_translated_text(), Some("Hola"));
    }

    #[test]
    fn stale_response_is_dropped_after_edit() {
        let mut session = ready_session();
        session.set_source_text("Hello");
        let (generation, _) = session.begin_submit().unwrap();

        session.set_source_text("Hello, world");
        let applied = session.complete(generation, response("Hola", Some("en")));

        assert!(applied.is_none());
        assert!(!session.pending());
        assert_eq!(session.last_translated_text(), None);
    }

    #[test]
    fn swap_with_auto_source_uses_detected_language() {
        let mut session = ready_session();
        session.set_source_text("Hello");
        let (generation, _) = session.begin_submit().unwrap();
        session.complete(generation, response("Hola", Some("fr")));

        assert_eq!(session.swap(), SwapOutcome::Swapped);
        assert_eq!(session.source_lang(), "es");
        assert_eq!(session.target_lang(), "fr");
        assert_eq!(session.snapshot().source_text, "");
        assert!(session.last_translated_text().is_none());
    }

    #[test]
    fn swap_with_auto_source_and_no_detection_needs_a_target() {
        let mut session = ready_session();
        assert_eq!(session.swap(), SwapOutcome::TargetNeeded);
        assert_eq!(session.source_lang(), "es");
        assert_eq!(session.target_lang(), "");
    }

    #[test]
    fn swap_with_concrete_languages_exchanges_them() {
        let mut session = ready_session();
        session.set_source_lang("es");
        session.set_target_lang("fr");

        assert_eq!(session.swap(), SwapOutcome::Swapped);
        assert_eq!(session.source_lang(), "fr");
        assert_eq!(session.target_lang(), "es");
    }

    #[test]
    fn swap_with_concrete_source_and_empty_target_falls_back_to_auto() {
        let mut session = ready_session();
        session.set_source_lang("es");
        session.target_lang.clear();

        assert_eq!(session.swap(), SwapOutcome::Swapped);
        assert_eq!(session.source_lang(), "auto");
        assert_eq!(session.target_lang(), "es");
    }

    #[test]
    fn target_lang_rejects_auto() {
        let mut session = ready_session();
        session.set_target_lang("auto");
        assert_eq!(session.target_lang(), "es");
    }

    #[test]
    fn restore_replaces_state_without_new_request() {
        let mut session = ready_session();
        let item = HistoryItem {
            id: "1".to_string(),
            created_at: 1,
            source_text: "bonjour".to_string(),
            translated_text: "hello".to_string(),
            source_lang: "fr".to_string(),
            target_lang: "en".to_string(),
            detected_source_lang: None,
            latency_ms: 9,
            mode: Mode::Natural,
            used_mode: Some(Mode::Natural),
        };

        session.restore(&item);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.source_text, "bonjour");
        assert_eq!(snapshot.source_lang, "fr");
        assert_eq!(snapshot.target_lang, "en");
        assert_eq!(session.last_translated_text(), Some("hello"));
        assert!(!session.pending());
    }

    #[test]
    fn detection_uncertain_is_a_soft_condition() {
        let mut session = ready_session();
        session.set_source_text("Hello");
        let (generation, _) = session.begin_submit().unwrap();
        session.complete(generation, response("Hola", None));

        assert!(session.snapshot().detection_uncertain);

        // a concrete source is never uncertain
        session.set_source_lang("en");
        assert!(!session.snapshot().detection_uncertain);
    }
}
