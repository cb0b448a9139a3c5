use crate::event::SettingsEvent;
use crate::panel::ConfigPanel;
use crate::settings::SettingsStore;
use crate::surface::DrawSurface;

use std::time::Duration;

/// What a host needs from a screensaver module.
pub trait ScreenSaver {
    /// Populates the configuration view.
    fn start_config(&self, panel: &mut dyn ConfigPanel);

    /// Prepares a session on `surface`. `preview` is set for the small
    /// thumbnail view.
    fn start_saver(&mut self, surface: &mut dyn DrawSurface, preview: bool);

    /// Renders frame number `frame`.
    fn draw(&mut self, surface: &mut dyn DrawSurface, frame: u64);

    fn on_event(&mut self, event: SettingsEvent);

    /// Period the host should wait between two `draw` calls.
    fn tick_interval(&self) -> Duration;

    fn save_state(&self, store: &mut dyn SettingsStore);

    fn load_state(&mut self, store: &dyn SettingsStore);
}
