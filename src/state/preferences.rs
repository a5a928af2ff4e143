//! Persisted user preferences

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

use crate::{error::PreferencesError, timer::MAX_REMINDER_INTERVAL};

/// Reminder interval used when nothing else is configured (30 minutes)
pub const DEFAULT_INTERVAL_SECONDS: u64 = 1800;

/// User preferences stored between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Reminder interval in seconds
    pub interval_seconds: u64,
    /// Sound played on each reminder instead of the system default
    pub custom_sound_path: Option<PathBuf>,
}

impl Preferences {
    /// Create preferences with default values
    pub fn new() -> Self {
        Self {
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            custom_sound_path: None,
        }
    }

    /// Get the reminder interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Load preferences from `path`, falling back to defaults when the file
    /// is missing or unreadable
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preferences at {}, using defaults", path.display());
                return Self::new();
            }
            Err(e) => {
                warn!("Failed to read preferences at {}: {}", path.display(), e);
                return Self::new();
            }
        };

        let mut prefs: Self = match serde_json::from_str(&raw) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Ignoring corrupt preferences at {}: {}", path.display(), e);
                return Self::new();
            }
        };

        if validate_interval_seconds(prefs.interval_seconds as i128).is_err() {
            warn!(
                "Stored interval {}s is out of range, using default of {}s",
                prefs.interval_seconds, DEFAULT_INTERVAL_SECONDS
            );
            prefs.interval_seconds = DEFAULT_INTERVAL_SECONDS;
        }

        debug!("Loaded preferences from {}: {:?}", path.display(), prefs);
        prefs
    }

    /// Write preferences to `path` as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        let io_err = |source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)?;

        info!("Saved preferences to {}", path.display());
        Ok(())
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate user input for the reminder interval, in whole seconds
pub fn parse_interval_input(input: &str) -> Result<Duration, PreferencesError> {
    let trimmed = input.trim();
    match trimmed.parse::<i128>() {
        Ok(seconds) => validate_interval_seconds(seconds),
        Err(_) => Err(PreferencesError::InvalidInterval(trimmed.to_string())),
    }
}

/// Check that `seconds` lies within 1 second and [`MAX_REMINDER_INTERVAL`]
pub fn validate_interval_seconds(seconds: i128) -> Result<Duration, PreferencesError> {
    match u64::try_from(seconds) {
        Ok(secs) if secs > 0 && secs <= MAX_REMINDER_INTERVAL.as_secs() => {
            Ok(Duration::from_secs(secs))
        }
        _ => Err(PreferencesError::InvalidInterval(seconds.to_string())),
    }
}

/// Default preferences location: `$HOME/.config/focus-bell/preferences.json`
pub fn default_preferences_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".config")
        .join("focus-bell")
        .join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_root(name: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        std::env::temp_dir().join(format!("focus_bell_{name}_{suffix}"))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let prefs = Preferences::load(&temp_root("missing").join("prefs.json"));
        assert_eq!(prefs, Preferences::new());
        assert_eq!(prefs.interval(), Duration::from_secs(DEFAULT_INTERVAL_SECONDS));
    }

    #[test]
    fn save_then_load_creates_parent_dirs() {
        let root = temp_root("save");
        let path = root.join("nested").join("prefs.json");
        let prefs = Preferences {
            interval_seconds: 600,
            custom_sound_path: Some(PathBuf::from("/tmp/bell.aiff")),
        };

        prefs.save(&path).expect("save");
        assert_eq!(Preferences::load(&path), prefs);

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn corrupt_or_zero_interval_falls_back() {
        let root = temp_root("corrupt");
        fs::create_dir_all(&root).expect("mkdir");

        let corrupt = root.join("corrupt.json");
        fs::write(&corrupt, "{ not json").expect("write");
        assert_eq!(Preferences::load(&corrupt), Preferences::new());

        let zero = root.join("zero.json");
        fs::write(&zero, r#"{"interval_seconds": 0, "custom_sound_path": "/x.wav"}"#)
            .expect("write");
        let prefs = Preferences::load(&zero);
        assert_eq!(prefs.interval_seconds, DEFAULT_INTERVAL_SECONDS);
        assert_eq!(prefs.custom_sound_path, Some(PathBuf::from("/x.wav")));

        let partial = root.join("partial.json");
        fs::write(&partial, r#"{"interval_seconds": 90}"#).expect("write");
        assert_eq!(Preferences::load(&partial).custom_sound_path, None);

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn parses_interval_input() {
        assert_eq!(parse_interval_input(" 1800 ").unwrap(), Duration::from_secs(1800));
        assert!(matches!(
            parse_interval_input("0"),
            Err(PreferencesError::InvalidInterval(_))
        ));
        assert!(parse_interval_input("-5").is_err());
        assert!(parse_interval_input("ten").is_err());
        assert!(parse_interval_input("").is_err());
        assert_eq!(parse_interval_input("86400").unwrap(), MAX_REMINDER_INTERVAL);
        assert!(parse_interval_input("86401").is_err());
        assert!(parse_interval_input("9223372036854775807").is_err());
        assert!(parse_interval_input("99999999999999999999999999999999999999999").is_err());
    }

    #[test]
    fn oversized_stored_interval_falls_back() {
        let root = temp_root("oversized");
        fs::create_dir_all(&root).expect("mkdir");
        let path = root.join("prefs.json");
        fs::write(&path, r#"{"interval_seconds": 18446744073709551615}"#).expect("write");

        assert_eq!(Preferences::load(&path).interval_seconds, DEFAULT_INTERVAL_SECONDS);

        fs::remove_dir_all(root).expect("cleanup");
    }
}
