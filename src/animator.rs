use crate::color::{self, Rgba, BLACK, PALETTE};
use crate::error::LayoutError;
use crate::event::SettingsEvent;
use crate::geometry::{Point, Rect, Size};
use crate::panel::ConfigPanel;
use crate::saver::ScreenSaver;
use crate::settings::{self, Settings, SettingsStore, MAX_SPEED, MAX_TEXT_LEN, MIN_SPEED};
use crate::surface::{DrawSurface, FillMode, FontSpec};

use log::{debug, info, trace, warn};

use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const NAME: &str = "JustBounce";
pub const AUTHOR: &str = "by RaV";

/// Where the text starts in the preview thumbnail.
pub const PREVIEW_START: Point = Point { x: 20, y: 30 };

const SPEED_BASE: i32 = 5500;
const PREVIEW_SLOWDOWN: u64 = 10;
const FONT_DIVISOR: f32 = 10.;

/// Converts a speed setting into the period between frames. Higher speeds
/// give shorter periods; previews run ten times slower.
pub fn tick_interval(speed: i32, preview: bool) -> Duration {
    let micros = (SPEED_BASE - settings::clamp_speed(speed as i64)) as u64;
    let micros = if preview {
        micros * PREVIEW_SLOWDOWN
    } else {
        micros
    };

    Duration::from_micros(micros)
}

/// Checks that a text box of size `text` has somewhere to go inside `view`.
pub fn check_fit(view: Size, text: Size) -> Result<Size, LayoutError> {
    if text.fits_within(view) {
        Ok(text)
    } else {
        Err(LayoutError::SurfaceTooSmall { view, text })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Default for Velocity {
    fn default() -> Self {
        Self { dx: 1, dy: 1 }
    }
}

#[derive(Debug, Clone)]
pub struct AnimationState {
    pub text: String,
    /// Left-bottom anchor of the text.
    pub position: Point,
    /// Text box, `None` while the surface cannot hold any text at all.
    pub bounds: Option<Rect>,
    pub velocity: Velocity,
    pub color: Rgba,
    pub speed: i32,
    pub view_size: Size,
    pub needs_restart: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        let defaults = Settings::default();
        Self {
            text: defaults.text,
            position: Point::default(),
            bounds: None,
            velocity: Velocity::default(),
            color: color::WHITE,
            speed: defaults.speed,
            view_size: Size::default(),
            needs_restart: false,
        }
    }
}

/// Bounces a text string around the surface, switching color on every wall
/// hit.
pub struct BounceAnimator {
    state: AnimationState,
    rng: fastrand::Rng,
    fixed_seed: Option<u64>,
    preview: bool,
    session_start: bool,
    interval: Duration,
}

impl Default for BounceAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl BounceAnimator {
    pub fn new() -> Self {
        Self {
            state: AnimationState::default(),
            rng: fastrand::Rng::new(),
            fixed_seed: None,
            preview: false,
            session_start: false,
            interval: tick_interval(settings::DEFAULT_SPEED, false),
        }
    }

    /// Like [`new`](Self::new), but every session reseeds with `seed`
    /// instead of the clock.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            fixed_seed: Some(seed),
            ..Self::new()
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    fn restart(&mut self, surface: &mut dyn DrawSurface) {
        self.state.needs_restart = false;
        self.interval = tick_interval(self.state.speed, self.preview);

        let view = self.state.view_size;
        let font = FontSpec::bold(view.height as f32 / FONT_DIVISOR);
        surface.set_font(font);
        let measured = surface.measure_text(&self.state.text, &font);

        let extent = match check_fit(view, measured) {
            Ok(extent) => Some(extent),
            Err(e) => {
                let clamped = measured.clamp_within(view);
                if clamped.fits_within(view) {
                    warn!("{e}, clamping text box to {clamped}");
                    Some(clamped)
                } else {
                    warn!("{e}, nothing will be drawn");
                    None
                }
            }
        };

        self.state.bounds = match extent {
            Some(extent) => {
                let position = self.start_position(view, extent);
                self.state.position = position;
                Some(Rect::from_left_bottom(position, extent))
            }
            None => None,
        };

        surface.fill(surface.bounds(), BLACK, FillMode::Alpha);

        debug!(
            "restarted with text {:?} at font size {:.1}, box {}, interval {:?}",
            self.state.text,
            font.size,
            self.state
                .bounds
                .map_or_else(|| "none".to_owned(), |b| b.to_string()),
            self.interval,
        );
    }

    fn start_position(&self, view: Size, extent: Size) -> Point {
        if self.preview && self.session_start {
            let fixed = Rect::from_left_bottom(PREVIEW_START, extent);
            let in_view = fixed.left >= 0
                && fixed.right < view.width
                && fixed.top >= 0
                && fixed.bottom < view.height;
            if in_view {
                return PREVIEW_START;
            }
        }

        Point::new(
            self.rng.i32(0..view.width - extent.width),
            self.rng.i32(extent.height..view.height),
        )
    }

    fn bounce(&mut self, view: Rect) {
        let Some(bounds) = self.state.bounds.as_mut() else {
            return;
        };
        let v = &mut self.state.velocity;

        self.state.position = self.state.position.offset(v.dx, v.dy);
        *bounds = bounds.offset_by(v.dx, v.dy);

        if !bounds.inside_horizontally(&view) {
            v.dx = -v.dx;
            self.state.color = color::next_color(self.state.color, &self.rng, &PALETTE);
            trace!("horizontal bounce at {}, color {}", self.state.position, self.state.color);
        }

        if !bounds.inside_vertically(&view) {
            v.dy = -v.dy;
            self.state.color = color::next_color(self.state.color, &self.rng, &PALETTE);
            trace!("vertical bounce at {}, color {}", self.state.position, self.state.color);
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

impl ScreenSaver for BounceAnimator {
    fn start_config(&self, panel: &mut dyn ConfigPanel) {
        panel.add_label(NAME, true);
        panel.add_label(AUTHOR, false);
        panel.add_text_control(
            settings::TEXT_KEY,
            &format!("Text (max {MAX_TEXT_LEN} characters):"),
            &self.state.text,
        );
        panel.add_slider(settings::SPEED_KEY, "Speed:", MIN_SPEED, MAX_SPEED, self.state.speed);
    }

    fn start_saver(&mut self, surface: &mut dyn DrawSurface, preview: bool) {
        self.rng = fastrand::Rng::with_seed(self.fixed_seed.unwrap_or_else(clock_seed));
        self.preview = preview;
        self.session_start = true;
        self.state.view_size = surface.bounds().size();
        self.state.velocity = Velocity::default();
        self.state.color = color::next_color(BLACK, &self.rng, &PALETTE);

        info!(
            "starting {} session on a {} surface",
            if preview { "preview" } else { "full" },
            self.state.view_size
        );
        self.restart(surface);
    }

    fn draw(&mut self, surface: &mut dyn DrawSurface, frame: u64) {
        if frame == 0 || self.state.needs_restart {
            self.restart(surface);
        }
        self.session_start = false;

        let view = surface.bounds();
        surface.fill(view, BLACK, FillMode::Solid);

        if self.state.bounds.is_none() {
            return;
        }
        self.bounce(view);
        surface.draw_text(&self.state.text, self.state.position, self.state.color);
    }

    fn on_event(&mut self, event: SettingsEvent) {
        info!("{event}");
        match event {
            SettingsEvent::SpeedChanged(speed) => {
                self.state.speed = settings::clamp_speed(speed as i64);
            }
            SettingsEvent::TextChanged(text) => {
                if settings::is_valid_text(&text) {
                    self.state.text = text;
                } else {
                    warn!("rejected text {text:?}: longer than {MAX_TEXT_LEN} characters");
                }
            }
        }
        self.state.needs_restart = true;
    }

    fn tick_interval(&self) -> Duration {
        self.interval
    }

    fn save_state(&self, store: &mut dyn SettingsStore) {
        Settings {
            speed: self.state.speed,
            text: self.state.text.clone(),
        }
        .save(store);
    }

    fn load_state(&mut self, store: &dyn SettingsStore) {
        let Settings { speed, text } = Settings::load(store);
        self.state.speed = speed;
        self.state.text = text;
        self.state.needs_restart = true;
        self.interval = tick_interval(speed, self.preview);
    }
}
