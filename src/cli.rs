use anyhow::{anyhow, ensure, Result};
use clap::builder::ValueParser;
use clap::{arg, command, value_parser, ArgAction, Command};
use justbounce::settings::{MAX_SPEED, MAX_TEXT_LEN, MIN_SPEED};

use std::path::PathBuf;

const TEXT_LONG_HELP: &str = "Text to bounce around the screen. If not \
specified, the saved text is used (\"HAIKU\" on first run).

At most 15 characters are allowed. The text is saved and reused by later runs.";

const SPEED_LONG_HELP: &str = "Animation speed between 500 and 5000. If not \
specified, the saved speed is used (1000 on first run).

Each frame moves the text by one cell. Frames are 5500 - SPEED microseconds \
apart, so higher numbers mean faster movement. The speed can also be changed \
while running with '+' and '-'.";

const PREVIEW_LONG_HELP: &str = "Run as the small preview would: the text \
starts near the top-left corner and the animation is ten times slower.

Most terminals are far smaller than a real screen, so this is usually the \
more pleasant way to watch.";

const SETTINGS_LONG_HELP: &str = "Path of the JSON settings file. If not \
specified, 'justbounce/settings.json' inside the platform config directory is \
used. The file is created on exit if it does not exist.";

const VERBOSE_LONG_HELP: &str = "Increase log verbosity. May be repeated.

Without '--log-file', logs go to stderr and are off by default (the screen is \
busy with the animation, so redirect stderr if you raise this). With \
'--log-file', warnings are always written.";

pub fn build() -> Command {
    command!()
        .disable_help_flag(true)
        .disable_version_flag(true)
        .after_help("Keys: q quit, +/- change speed, r restart. Use '--help' for detailed information")
        .after_long_help("Keys: q quit, +/- change speed, r restart. Use '-h' for brief information")
        .arg(
            arg!([TEXT] "Text to bounce (at most 15 characters)")
                .long_help(TEXT_LONG_HELP)
                .value_parser(ValueParser::new(parse_text)),
        )
        .next_help_heading("Saver Options")
        .arg(
            arg!(-s --speed <SPEED> "Animation speed between 500 and 5000")
                .long_help(SPEED_LONG_HELP)
                .allow_negative_numbers(true)
                .value_parser(ValueParser::new(parse_speed)),
        )
        .arg(arg!(-p --preview "Run at preview pace").long_help(PREVIEW_LONG_HELP))
        .arg(
            arg!(-c --settings <PATH> "Settings file to load and save")
                .long_help(SETTINGS_LONG_HELP)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(arg!(--"show-config" "Print the configuration panel and quit"))
        .next_help_heading("Logging Options")
        .arg(
            arg!(-l --"log-file" <PATH> "Write log messages to a file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(-v --verbose "Increase log verbosity")
                .long_help(VERBOSE_LONG_HELP)
                .action(ArgAction::Count),
        )
        .next_help_heading("Options")
        .arg(arg!(-h --help "Print help information and quit").action(ArgAction::Help))
        .arg(arg!(-V --version "Print version information and quit").action(ArgAction::Version))
}

pub fn parse_text(s: &str) -> Result<String> {
    let len = s.chars().count();
    ensure!(
        len <= MAX_TEXT_LEN,
        format!("text must be at most {MAX_TEXT_LEN} characters (got {len})")
    );

    Ok(s.to_owned())
}

pub fn parse_speed(s: &str) -> Result<i32> {
    // parse first as i64 so we can report better error messages
    match s.parse::<i64>() {
        Ok(value) => {
            ensure!(
                (MIN_SPEED as i64..=MAX_SPEED as i64).contains(&value),
                format!("speed must be between {MIN_SPEED} and {MAX_SPEED}")
            );
            Ok(value as i32)
        }
        Err(e) => Err(anyhow!(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_bounds_are_inclusive() {
        assert_eq!(parse_speed("500").unwrap(), 500);
        assert_eq!(parse_speed("5000").unwrap(), 5000);
        assert!(parse_speed("499").is_err());
        assert!(parse_speed("5001").is_err());
        assert!(parse_speed("-1000").is_err());
        assert!(parse_speed("fast").is_err());
        assert!(parse_speed("99999999999999999999").is_err());
    }

    #[test]
    fn text_length_is_limited() {
        assert_eq!(parse_text("HAIKU").unwrap(), "HAIKU");
        assert!(parse_text("123456789012345").is_ok());
        assert!(parse_text("1234567890123456").is_err());
    }

    #[test]
    fn parses_full_command_line() {
        let matches = build()
            .try_get_matches_from([
                "justbounce", "hello", "-s", "2000", "-p", "-vv", "--log-file", "out.log",
            ])
            .unwrap();
        assert_eq!(matches.get_one::<String>("TEXT").unwrap(), "hello");
        assert_eq!(*matches.get_one::<i32>("speed").unwrap(), 2000);
        assert!(matches.get_flag("preview"));
        assert_eq!(matches.get_count("verbose"), 2);
        assert_eq!(
            matches.get_one::<PathBuf>("log-file").unwrap(),
            &PathBuf::from("out.log")
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(build()
            .try_get_matches_from(["justbounce", "-s", "10"])
            .is_err());
        assert!(build()
            .try_get_matches_from(["justbounce", "far too long for the screen"])
            .is_err());
    }
}
