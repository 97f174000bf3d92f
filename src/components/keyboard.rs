//! Keyboard bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Something the user asked the app to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    NextPattern,
    NextTheme,
    FasterFps,
    SlowerFps,
    Redraw,
}

impl Command {
    /// Maps a terminal event to a command, if it is bound to one.
    ///
    /// Only key presses count; repeats and releases (reported on some platforms) are
    /// ignored.
    pub fn from_event(event: &Event) -> Option<Command> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        // raw mode swallows SIGINT, so Ctrl-C arrives as a key
        if modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(code, KeyCode::Char('c' | 'C')).then_some(Command::Quit);
        }

        match code {
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Command::Quit),
            KeyCode::Char(' ' | 'n' | 'N') | KeyCode::Right => Some(Command::NextPattern),
            KeyCode::Char('t' | 'T') => Some(Command::NextTheme),
            KeyCode::Char('+' | '=') | KeyCode::Up => Some(Command::FasterFps),
            KeyCode::Char('-' | '_') | KeyCode::Down => Some(Command::SlowerFps),
            KeyCode::Char('r' | 'R') => Some(Command::Redraw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_bindings() {
        let none = KeyModifiers::NONE;
        assert_eq!(Command::from_event(&press(KeyCode::Char('q'), none)), Some(Command::Quit));
        assert_eq!(Command::from_event(&press(KeyCode::Esc, none)), Some(Command::Quit));
        assert_eq!(
            Command::from_event(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(Command::from_event(&press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
        assert_eq!(
            Command::from_event(&press(KeyCode::Char(' '), none)),
            Some(Command::NextPattern)
        );
        assert_eq!(Command::from_event(&press(KeyCode::Char('T'), none)), Some(Command::NextTheme));
        assert_eq!(Command::from_event(&press(KeyCode::Char('+'), none)), Some(Command::FasterFps));
        assert_eq!(Command::from_event(&press(KeyCode::Char('-'), none)), Some(Command::SlowerFps));
        assert_eq!(Command::from_event(&press(KeyCode::Char('z'), none)), None);
    }

    #[test]
    fn test_releases_are_ignored() {
        let mut event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(Command::from_event(&Event::Key(event)), None);
        assert_eq!(Command::from_event(&Event::FocusGained), None);
    }
}
