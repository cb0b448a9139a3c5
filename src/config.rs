use clap::ArgMatches;
use justbounce::FileStore;

use std::path::PathBuf;

pub struct Config {
    pub text: Option<String>,
    pub speed: Option<i32>,
    pub preview: bool,
    pub settings_path: Option<PathBuf>,
    pub show_config: bool,
    pub log_file: Option<PathBuf>,
    pub verbosity: u8,
}

impl From<&ArgMatches> for Config {
    fn from(value: &ArgMatches) -> Self {
        Self {
            text: value.get_one::<String>("TEXT").cloned(),
            speed: value.get_one::<i32>("speed").copied(),
            preview: value.get_flag("preview"),
            settings_path: value
                .get_one::<PathBuf>("settings")
                .cloned()
                .or_else(FileStore::default_path),
            show_config: value.get_flag("show-config"),
            log_file: value.get_one::<PathBuf>("log-file").cloned(),
            verbosity: value.get_count("verbose"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli;

    #[test]
    fn defaults_leave_settings_alone() {
        let matches = cli::build().try_get_matches_from(["justbounce"]).unwrap();
        let config = Config::from(&matches);
        assert_eq!(config.text, None);
        assert_eq!(config.speed, None);
        assert!(!config.preview);
        assert!(!config.show_config);
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.settings_path, FileStore::default_path());
    }

    #[test]
    fn explicit_settings_path_wins() {
        let matches = cli::build()
            .try_get_matches_from(["justbounce", "-c", "bounce.json", "--show-config"])
            .unwrap();
        let config = Config::from(&matches);
        assert_eq!(config.settings_path, Some(PathBuf::from("bounce.json")));
        assert!(config.show_config);
    }
}
