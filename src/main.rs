mod cli;
mod config;
mod input;
mod logging;
mod term;

use config::Config;
use input::KeyCommand;
use justbounce::{BounceAnimator, FileStore, ScreenSaver, SettingsEvent};
use term::{PanelText, TerminalSurface};

use anyhow::{Context, Result};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use log::{error, info, warn};

use std::io::{stdout, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

const SPEED_STEP: i32 = 250;

fn main() -> ExitCode {
    let matches = cli::build().get_matches();
    let config = Config::from(&matches);

    if let Err(e) = logging::init(&config) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }

    let mut store = match &config.settings_path {
        Some(path) => match FileStore::open(path) {
            Ok(store) => Some(store),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            warn!("no config directory found, settings will not be saved");
            None
        }
    };

    let mut saver = BounceAnimator::new();
    if let Some(store) = &store {
        saver.load_state(store);
    }
    if let Some(text) = &config.text {
        saver.on_event(SettingsEvent::TextChanged(text.clone()));
    }
    if let Some(speed) = config.speed {
        saver.on_event(SettingsEvent::SpeedChanged(speed));
    }

    if config.show_config {
        let mut panel = PanelText::default();
        saver.start_config(&mut panel);
        for line in panel.lines {
            println!("{line}");
        }
        return ExitCode::SUCCESS;
    }

    let mut code = match with_screen(|| run(&mut saver, config.preview)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    };

    if let Some(store) = &mut store {
        saver.save_state(store);
        if let Err(e) = store.save() {
            error!("{e}");
            eprintln!("error: {e}");
            code = ExitCode::FAILURE;
        }
    }

    code
}

/// Runs `body` between `setup` and `teardown`. `teardown` runs on every
/// path, and an error from `setup` or `body` wins over one from `teardown`.
fn scoped<S, B, T>(setup: S, body: B, teardown: T) -> Result<()>
where
    S: FnOnce() -> Result<()>,
    B: FnOnce() -> Result<()>,
    T: FnOnce() -> Result<()>,
{
    let result = setup().and_then(|_| body());
    let restored = teardown();

    result.and(restored)
}

/// Runs `f` on the alternate screen in raw mode.
fn with_screen<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    scoped(
        || {
            execute!(
                stdout(),
                cursor::Hide,
                EnterAlternateScreen,
                Clear(ClearType::All),
            )
            .context("failed to prepare the terminal")?;
            enable_raw_mode().context("failed to start raw mode")
        },
        f,
        || {
            let raw = disable_raw_mode().context("failed to disable raw mode");
            let screen = execute!(stdout(), cursor::Show, LeaveAlternateScreen)
                .context("failed to leave the alternate screen");
            raw.and(screen)
        },
    )
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Handles input until the tick that started at `f_start` is over. `read`
/// is polled with the time left in the tick.
fn wait_for_tick<W, R>(
    saver: &mut BounceAnimator,
    surface: &mut TerminalSurface<W>,
    preview: bool,
    frame: &mut u64,
    f_start: Instant,
    mut read: R,
) -> Result<Flow>
where
    W: Write,
    R: FnMut(Duration) -> Result<KeyCommand>,
{
    loop {
        let remaining = saver.tick_interval().saturating_sub(f_start.elapsed());
        if remaining.is_zero() {
            return Ok(Flow::Continue);
        }

        match read(remaining)? {
            KeyCommand::Quit => return Ok(Flow::Quit),
            KeyCommand::Faster => {
                let speed = saver.state().speed + SPEED_STEP;
                saver.on_event(SettingsEvent::SpeedChanged(speed));
            }
            KeyCommand::Slower => {
                let speed = saver.state().speed - SPEED_STEP;
                saver.on_event(SettingsEvent::SpeedChanged(speed));
            }
            KeyCommand::Restart => {
                let text = saver.state().text.clone();
                saver.on_event(SettingsEvent::TextChanged(text));
            }
            KeyCommand::Resize(cols, rows) => {
                info!("terminal resized to {cols}x{rows}");
                surface.resize(cols, rows);
                saver.start_saver(surface, preview);
                *frame = 0;
            }
            KeyCommand::Unknown => (),
            KeyCommand::None => {
                // poll may wake a little early, finish the tick precisely
                spin_sleep::sleep(saver.tick_interval().saturating_sub(f_start.elapsed()));
                return Ok(Flow::Continue);
            }
        }
    }
}

fn run(saver: &mut BounceAnimator, preview: bool) -> Result<()> {
    let (cols, rows) = terminal::size().context("failed to read the terminal size")?;
    let mut surface = TerminalSurface::new(stdout(), cols, rows);
    saver.start_saver(&mut surface, preview);
    info!("press q to quit");

    let mut frame: u64 = 0;
    loop {
        let f_start = Instant::now();

        saver.draw(&mut surface, frame);
        surface.present()?;
        frame += 1;

        let flow = wait_for_tick(
            saver,
            &mut surface,
            preview,
            &mut frame,
            f_start,
            KeyCommand::read,
        )?;
        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;

    fn preview_saver() -> (BounceAnimator, TerminalSurface<Vec<u8>>) {
        let mut surface = TerminalSurface::new(Vec::new(), 80, 24);
        let mut saver = BounceAnimator::with_seed(5);
        saver.start_saver(&mut surface, true);
        (saver, surface)
    }

    #[test]
    fn input_is_polled_with_time_left_in_tick() {
        let (mut saver, mut surface) = preview_saver();
        let mut frame = 1;
        let mut timeouts = Vec::new();
        let mut keys = vec![KeyCommand::None, KeyCommand::Faster];

        let flow = wait_for_tick(
            &mut saver,
            &mut surface,
            true,
            &mut frame,
            Instant::now(),
            |timeout| {
                timeouts.push(timeout);
                Ok(keys.pop().unwrap_or(KeyCommand::None))
            },
        )
        .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(timeouts.len(), 2);
        assert!(timeouts[0] > Duration::ZERO);
        assert!(timeouts[0] <= Duration::from_micros(45000));
        assert!(timeouts[1] <= timeouts[0]);
        assert_eq!(saver.state().speed, 1250);
        assert!(saver.state().needs_restart);
    }

    #[test]
    fn quit_ends_the_tick_at_once() {
        let (mut saver, mut surface) = preview_saver();
        let mut frame = 3;
        let flow = wait_for_tick(
            &mut saver,
            &mut surface,
            true,
            &mut frame,
            Instant::now(),
            |_| Ok(KeyCommand::Quit),
        )
        .unwrap();
        assert_eq!(flow, Flow::Quit);
        assert_eq!(frame, 3);
    }

    #[test]
    fn resize_restarts_the_session() {
        let (mut saver, mut surface) = preview_saver();
        let mut frame = 9;
        let mut keys = vec![KeyCommand::Quit, KeyCommand::Resize(120, 40)];
        wait_for_tick(
            &mut saver,
            &mut surface,
            true,
            &mut frame,
            Instant::now(),
            |_| Ok(keys.pop().unwrap_or(KeyCommand::Quit)),
        )
        .unwrap();
        assert_eq!(frame, 0);
        assert_eq!(saver.state().view_size.width, 119);
    }

    #[test]
    fn teardown_runs_when_setup_fails() {
        let calls = RefCell::new(Vec::new());
        let result = scoped(
            || {
                calls.borrow_mut().push("setup");
                bail!("setup failed")
            },
            || {
                calls.borrow_mut().push("body");
                Ok(())
            },
            || {
                calls.borrow_mut().push("teardown");
                Ok(())
            },
        );
        assert_eq!(result.unwrap_err().to_string(), "setup failed");
        assert_eq!(*calls.borrow(), ["setup", "teardown"]);
    }

    #[test]
    fn body_error_wins_over_teardown_error() {
        let result = scoped(|| Ok(()), || bail!("body failed"), || bail!("teardown failed"));
        assert_eq!(result.unwrap_err().to_string(), "body failed");

        let result = scoped(|| Ok(()), || Ok(()), || bail!("teardown failed"));
        assert_eq!(result.unwrap_err().to_string(), "teardown failed");
    }
}
