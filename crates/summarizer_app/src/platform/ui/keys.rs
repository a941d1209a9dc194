use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use summarizer_core::{CopyTarget, Msg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Dispatch(Msg),
    Quit,
    Ignore,
}

/// Translates a key press into a core message. Text editing happens here:
/// the core only ever sees the full new input value.
pub fn map_key(key: KeyEvent, current_url: &str, now: Instant) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Quit,
            KeyCode::Char('l') => KeyAction::Dispatch(Msg::ClearClicked),
            KeyCode::Char('y') => KeyAction::Dispatch(Msg::CopyClicked {
                target: CopyTarget::Summary,
                at: now,
            }),
            KeyCode::Char('k') => KeyAction::Dispatch(Msg::CopyClicked {
                target: CopyTarget::KeyPoints,
                at: now,
            }),
            KeyCode::Char('u') if !current_url.is_empty() => {
                KeyAction::Dispatch(Msg::InputChanged(String::new()))
            }
            _ => KeyAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Enter => KeyAction::Dispatch(Msg::SubmitClicked),
        KeyCode::Backspace => {
            let mut next = current_url.to_string();
            match next.pop() {
                Some(_) => KeyAction::Dispatch(Msg::InputChanged(next)),
                None => KeyAction::Ignore,
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::ALT) => {
            let mut next = current_url.to_string();
            next.push(ch);
            KeyAction::Dispatch(Msg::InputChanged(next))
        }
        _ => KeyAction::Ignore,
    }
}

/// Bracketed paste appends the pasted text without surrounding whitespace or
/// line breaks.
pub fn map_paste(pasted: &str, current_url: &str) -> KeyAction {
    let pasted: String = pasted.trim().chars().filter(|ch| !ch.is_control()).collect();
    if pasted.is_empty() {
        return KeyAction::Ignore;
    }
    KeyAction::Dispatch(Msg::InputChanged(format!("{current_url}{pasted}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_appends_and_backspace_removes() {
        let now = Instant::now();
        assert_eq!(
            map_key(press(KeyCode::Char('m')), "https://exa", now),
            KeyAction::Dispatch(Msg::InputChanged("https://exam".to_string()))
        );
        assert_eq!(
            map_key(press(KeyCode::Backspace), "ab", now),
            KeyAction::Dispatch(Msg::InputChanged("a".to_string()))
        );
        assert_eq!(map_key(press(KeyCode::Backspace), "", now), KeyAction::Ignore);
    }

    #[test]
    fn control_chords_map_to_actions() {
        let now = Instant::now();
        assert_eq!(map_key(ctrl('c'), "", now), KeyAction::Quit);
        assert_eq!(
            map_key(ctrl('l'), "x", now),
            KeyAction::Dispatch(Msg::ClearClicked)
        );
        assert_eq!(
            map_key(ctrl('y'), "x", now),
            KeyAction::Dispatch(Msg::CopyClicked {
                target: CopyTarget::Summary,
                at: now,
            })
        );
        assert_eq!(
            map_key(ctrl('k'), "x", now),
            KeyAction::Dispatch(Msg::CopyClicked {
                target: CopyTarget::KeyPoints,
                at: now,
            })
        );
        assert_eq!(
            map_key(ctrl('u'), "abc", now),
            KeyAction::Dispatch(Msg::InputChanged(String::new()))
        );
        assert_eq!(map_key(ctrl('u'), "", now), KeyAction::Ignore);
    }

    #[test]
    fn enter_submits_and_escape_quits() {
        let now = Instant::now();
        assert_eq!(
            map_key(press(KeyCode::Enter), "x", now),
            KeyAction::Dispatch(Msg::SubmitClicked)
        );
        assert_eq!(map_key(press(KeyCode::Esc), "x", now), KeyAction::Quit);
    }

    #[test]
    fn paste_is_trimmed_and_appended() {
        assert_eq!(
            map_paste("  example.com/a\n", "https://"),
            KeyAction::Dispatch(Msg::InputChanged("https://example.com/a".to_string()))
        );
        assert_eq!(map_paste(" \n ", "x"), KeyAction::Ignore);
    }
}
