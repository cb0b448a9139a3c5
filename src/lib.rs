//! A screensaver that bounces a short text around the screen, changing color
//! whenever it hits a wall.
//!
//! The host provides a [`DrawSurface`], a [`SettingsStore`] and the config
//! controls; [`BounceAnimator`] does the rest through the [`ScreenSaver`]
//! trait.

pub mod animator;
pub mod color;
pub mod error;
pub mod event;
pub mod geometry;
pub mod panel;
pub mod saver;
pub mod settings;
pub mod surface;

pub use animator::BounceAnimator;
pub use event::SettingsEvent;
pub use panel::ConfigPanel;
pub use saver::ScreenSaver;
pub use settings::{FileStore, MemoryStore, Settings, SettingsStore};
pub use surface::DrawSurface;
