use crate::error::StoreError;

use log::{info, warn};
use serde_json::{Map, Value};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SPEED_KEY: &str = "speed";
pub const TEXT_KEY: &str = "text";

pub const MIN_SPEED: i32 = 500;
pub const MAX_SPEED: i32 = 5000;
pub const DEFAULT_SPEED: i32 = 1000;

pub const MAX_TEXT_LEN: usize = 15;
pub const DEFAULT_TEXT: &str = "HAIKU";

const APP_DIR: &str = "justbounce";
const SETTINGS_FILE: &str = "settings.json";

/// Clamps any integer into the accepted speed range.
pub fn clamp_speed(value: i64) -> i32 {
    value.clamp(MIN_SPEED as i64, MAX_SPEED as i64) as i32
}

/// Returns `true` if `text` is short enough to be displayed.
pub fn is_valid_text(text: &str) -> bool {
    text.chars().count() <= MAX_TEXT_LEN
}

/// The user-facing options that survive between sessions.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Settings {
    pub speed: i32,
    pub text: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            text: DEFAULT_TEXT.to_owned(),
        }
    }
}

impl Settings {
    /// Reads settings from `store`, falling back to defaults for missing or
    /// unusable values.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let speed = match store.get_int(SPEED_KEY) {
            Some(value) => clamp_speed(value),
            None => {
                if store.contains(SPEED_KEY) {
                    warn!("ignoring non-integer `{SPEED_KEY}` setting");
                }
                DEFAULT_SPEED
            }
        };

        let text = match store.get_str(TEXT_KEY) {
            Some(text) if is_valid_text(text) => text.to_owned(),
            Some(text) => {
                warn!("ignoring `{TEXT_KEY}` setting {text:?}: longer than {MAX_TEXT_LEN} characters");
                DEFAULT_TEXT.to_owned()
            }
            None => {
                if store.contains(TEXT_KEY) {
                    warn!("ignoring non-string `{TEXT_KEY}` setting");
                }
                DEFAULT_TEXT.to_owned()
            }
        };

        Self { speed, text }
    }

    pub fn save(&self, store: &mut dyn SettingsStore) {
        store.set_int(SPEED_KEY, self.speed as i64);
        store.set_str(TEXT_KEY, &self.text);
    }
}

/// A persisted key-value store owned by the host.
pub trait SettingsStore {
    fn contains(&self, key: &str) -> bool;
    fn get_int(&self, key: &str) -> Option<i64>;
    fn get_str(&self, key: &str) -> Option<&str>;
    fn set_int(&mut self, key: &str, value: i64);
    fn set_str(&mut self, key: &str, value: &str);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: Map<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_owned(), Value::from(value));
    }

    fn set_str(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), Value::from(value));
    }
}

/// A [`MemoryStore`] backed by a JSON object on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// `<config dir>/justbounce/settings.json`, if the platform has a config
    /// directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Opens the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no settings at `{}`, using defaults", path.display());
                return Ok(Self {
                    path,
                    inner: MemoryStore::new(),
                });
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let values = match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(values)) => values,
            Ok(_) => return Err(StoreError::NotAnObject { path }),
            Err(source) => return Err(StoreError::Parse { path, source }),
        };

        info!("loaded settings from `{}`", path.display());
        Ok(Self {
            path,
            inner: MemoryStore { values },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the store back to its file, creating parent directories.
    pub fn save(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.inner.values)?;
        fs::write(&self.path, json).map_err(io_err)?;

        info!("saved settings to `{}`", self.path.display());
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.inner.get_int(key)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.inner.get_str(key)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.inner.set_int(key, value)
    }

    fn set_str(&mut self, key: &str, value: &str) {
        self.inner.set_str(key, value)
    }
}
