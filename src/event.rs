use std::fmt;

/// Change notifications emitted by the config controls.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SettingsEvent {
    SpeedChanged(i32),
    TextChanged(String),
}

impl fmt::Display for SettingsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsEvent::SpeedChanged(speed) => write!(f, "speed changed to {speed}"),
            SettingsEvent::TextChanged(text) => write!(f, "text changed to {text:?}"),
        }
    }
}
