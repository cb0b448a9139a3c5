use crate::config::Config;

use anyhow::{Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Picks the log level for `verbosity` repetitions of `-v`. Log files start
/// at warnings, stderr starts silent.
pub fn level(verbosity: u8, to_file: bool) -> LevelFilter {
    let base = if to_file { 2 } else { 0 };
    LEVELS[(base + verbosity as usize).min(LEVELS.len() - 1)]
}

pub fn init(config: &Config) -> Result<()> {
    let level = level(config.verbosity, config.log_file.is_some());
    let dispatch = fern::Dispatch::new().level(level);

    let dispatch = match &config.log_file {
        Some(path) => {
            let file = fern::log_file(path)
                .with_context(|| format!("failed to open log file `{}`", path.display()))?;
            dispatch
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} [{}] {}: {}",
                        chrono::Local::now().format(TIME_FORMAT),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .chain(file)
        }
        None => {
            let colors = ColoredLevelConfig::new()
                .info(Color::Cyan)
                .debug(Color::White)
                .trace(Color::BrightBlack);
            dispatch
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "{} {} {}",
                        chrono::Local::now().format(TIME_FORMAT),
                        colors.color(record.level()),
                        message
                    ))
                })
                .chain(std::io::stderr())
        }
    };

    dispatch.apply().context("failed to install logger")
}
