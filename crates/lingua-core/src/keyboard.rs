use lingua_types::{Key, KeyContext, KeyEvent, ShortcutAction};

/// Map one key-down to a session action, or `None` when no shortcut (or
/// its guard) applies. Events arriving mid IME composition never fire.
///
/// | Combo            | Guard                      | Action            |
/// |------------------|----------------------------|-------------------|
/// | Enter            | input focused              | Submit            |
/// | Ctrl/Cmd+Enter   |                            | Submit            |
/// | Ctrl/Cmd+K       | a picker is open           | FocusPickerSearch |
/// | Ctrl/Cmd+Shift+C | a translated result exists | CopyTranslation   |
pub fn route(event: KeyEvent, context: KeyContext) -> Option<ShortcutAction> {
    if event.composing {
        return None;
    }
    let chord = event.ctrl || event.meta;
    match event.key {
        Key::Enter if chord => Some(ShortcutAction::Submit),
        Key::Enter if !event.shift && !event.alt && context.input_focused => {
            Some(ShortcutAction::Submit)
        }
        Key::Char(c) if chord && c.eq_ignore_ascii_case(&'k') && context.picker_open => {
            Some(ShortcutAction::FocusPickerSearch)
        }
        Key::Char(c)
            if chord && event.shift && c.eq_ignore_ascii_case(&'c') && context.has_result =>
        {
            Some(ShortcutAction::CopyTranslation)
        }
        _ => None,
    }
}
