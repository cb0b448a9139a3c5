use std::time::Duration;

use anyhow::Result;
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    Faster,
    Slower,
    Restart,
    Resize(u16, u16),
    None,
    Unknown,
}

impl KeyCommand {
    pub fn read(timeout: Duration) -> Result<Self> {
        if poll(timeout)? {
            return Ok(read()?.into());
        }

        Ok(Self::None)
    }
}

impl From<Event> for KeyCommand {
    fn from(value: Event) -> Self {
        match value {
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                ..
            }) => Self::Quit,
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) if modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT => match c {
                'q' => Self::Quit,
                '+' | '=' => Self::Faster,
                '-' | '_' => Self::Slower,
                'r' => Self::Restart,
                _ => Self::Unknown,
            },
            Event::Resize(cols, rows) => Self::Resize(cols, rows),
            _ => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn maps_keys() {
        assert_eq!(
            KeyCommand::from(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            KeyCommand::Quit
        );
        assert_eq!(
            KeyCommand::from(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyCommand::Quit
        );
        assert_eq!(
            KeyCommand::from(key(KeyCode::Char('+'), KeyModifiers::SHIFT)),
            KeyCommand::Faster
        );
        assert_eq!(
            KeyCommand::from(key(KeyCode::Char('-'), KeyModifiers::NONE)),
            KeyCommand::Slower
        );
        assert_eq!(
            KeyCommand::from(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            KeyCommand::Unknown
        );
        assert_eq!(
            KeyCommand::from(key(KeyCode::Enter, KeyModifiers::NONE)),
            KeyCommand::None
        );
        assert_eq!(KeyCommand::from(Event::Resize(80, 24)), KeyCommand::Resize(80, 24));
    }
}
