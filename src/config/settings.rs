//! Startup settings with XDG Base Directory compliance.
//!
//! Settings are read once when the portal starts. They seed the initial
//! session preferences and tune the simulated network delays; session
//! state itself is never written back.

use std::{
    env::var,
    fs::read_to_string,
    io::Error as StdError,
    path::{Path, PathBuf},
    time::Duration,
};

use {
    serde::{Deserialize, Serialize},
    serde_json::{Error as SerdeJsonError, from_str},
    thiserror::Error,
    tracing::debug,
};

use crate::state::preferences::{Currency, Language, Theme};

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read the settings file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to deserialize settings.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Invalid settings value.
    #[error("Invalid settings value: {reason}")]
    InvalidValue { reason: String },
}

/// Portal startup settings with default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalSettings {
    /// Theme applied when the store is mounted.
    pub default_theme: Theme,
    /// Initial display currency.
    pub default_currency: Currency,
    /// Initial interface language.
    pub default_language: Language,
    /// Whether the sidebar starts expanded.
    pub sidebar_open: bool,
    /// Simulated login round trip in milliseconds.
    pub login_delay_ms: u64,
    /// Simulated catalog fetch in milliseconds.
    pub catalog_delay_ms: u64,
    /// Mock balance credited on login.
    pub demo_balance: f64,
    /// Unread notifications shown in the header badge.
    pub notification_count: u32,
    /// Capacity of the state event broadcast channel.
    pub event_capacity: usize,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            default_theme: Theme::Dark,
            default_currency: Currency::Myr,
            default_language: Language::En,
            sidebar_open: true,
            login_delay_ms: 1000,
            catalog_delay_ms: 1500,
            demo_balance: 1250.75,
            notification_count: 3,
            event_capacity: 64,
        }
    }
}

impl PortalSettings {
    /// Simulated login delay.
    #[must_use]
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    /// Simulated catalog fetch delay.
    #[must_use]
    pub fn catalog_delay(&self) -> Duration {
        Duration::from_millis(self.catalog_delay_ms)
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` for a zero event capacity or a
    /// negative or non-finite demo balance.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.event_capacity == 0 {
            return Err(SettingsError::InvalidValue {
                reason: "event_capacity must be greater than zero".to_string(),
            });
        }
        if !self.demo_balance.is_finite() || self.demo_balance < 0.0 {
            return Err(SettingsError::InvalidValue {
                reason: format!("demo_balance must be non-negative, got {}", self.demo_balance),
            });
        }
        Ok(())
    }
}

/// Handles locating, loading and validating the startup settings.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    /// Loaded settings.
    settings: PortalSettings,
    /// Path the settings were looked up at.
    config_path: PathBuf,
}

impl SettingsManager {
    /// Creates a new settings manager with the default config path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if an existing settings file cannot be read,
    /// parsed or validated.
    pub fn new() -> Result<Self, SettingsError> {
        Self::with_config_path(get_config_path())
    }

    /// Creates a new settings manager with a custom config path.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if an existing settings file cannot be read,
    /// parsed or validated.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self, SettingsError> {
        let settings = if config_path.exists() {
            debug!("Loading settings from existing file: {:?}", config_path);
            let contents = read_to_string(&config_path)?;
            from_str::<PortalSettings>(&contents)?
        } else {
            debug!("No settings file at {:?}, using defaults", config_path);
            PortalSettings::default()
        };
        settings.validate()?;

        Ok(Self {
            settings,
            config_path,
        })
    }

    /// Wraps already-built settings (used by embedders and tests).
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` if the settings do not validate.
    pub fn from_settings(settings: PortalSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            config_path: get_config_path(),
        })
    }

    /// Gets the current settings.
    #[must_use]
    pub fn get_settings(&self) -> &PortalSettings {
        &self.settings
    }

    /// Gets the configuration file path.
    #[must_use]
    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Ensures proper XDG directory usage for the config file.
///
/// # Returns
///
/// The path to the configuration file.
#[must_use]
pub fn get_config_path() -> PathBuf {
    let mut config_dir = get_xdg_config_home();
    config_dir.push("crimson-portal");
    config_dir.push("settings.json");
    config_dir
}

/// Gets the XDG config home directory.
///
/// Uses `XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`.
fn get_xdg_config_home() -> PathBuf {
    if let Ok(config_home) = var("XDG_CONFIG_HOME")
        && !config_home.is_empty()
    {
        return PathBuf::from(config_home);
    }

    if let Ok(home) = var("HOME") {
        let mut path = PathBuf::from(home);
        path.push(".config");
        return path;
    }

    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use std::{fs::write, time::Duration};

    use {serde_json::from_str, tempfile::TempDir};

    use crate::{
        config::settings::{PortalSettings, SettingsError, SettingsManager},
        state::preferences::{Currency, Language, Theme},
    };

    #[test]
    fn test_portal_settings_default() {
        let settings = PortalSettings::default();
        assert_eq!(settings.default_theme, Theme::Dark);
        assert_eq!(settings.default_currency, Currency::Myr);
        assert_eq!(settings.default_language, Language::En);
        assert!(settings.sidebar_open);
        assert_eq!(settings.login_delay(), Duration::from_millis(1000));
        assert_eq!(settings.catalog_delay(), Duration::from_millis(1500));
        assert_eq!(settings.notification_count, 3);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: PortalSettings =
            from_str(r#"{ "default_currency": "BTC", "login_delay_ms": 10 }"#).unwrap();
        assert_eq!(settings.default_currency, Currency::Btc);
        assert_eq!(settings.login_delay_ms, 10);
        assert_eq!(settings.catalog_delay_ms, 1500);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        let manager = SettingsManager::with_config_path(path.clone()).unwrap();
        assert_eq!(manager.get_settings(), &PortalSettings::default());
        assert_eq!(manager.get_config_path(), path.as_path());
    }

    #[test]
    fn test_loads_settings_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        write(
            &path,
            r#"{ "default_theme": "light", "default_language": "ZH", "sidebar_open": false }"#,
        )
        .unwrap();

        let manager = SettingsManager::with_config_path(path).unwrap();
        let settings = manager.get_settings();
        assert_eq!(settings.default_theme, Theme::Light);
        assert_eq!(settings.default_language, Language::Zh);
        assert!(!settings.sidebar_open);
    }

    #[test]
    fn test_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        write(&path, "{ not json").unwrap();

        let result = SettingsManager::with_config_path(path);
        assert!(matches!(result, Err(SettingsError::SerializationError(_))));
    }

    #[test]
    fn test_rejects_zero_event_capacity() {
        let settings = PortalSettings {
            event_capacity: 0,
            ..PortalSettings::default()
        };

        let error = SettingsManager::from_settings(settings).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid settings value: event_capacity must be greater than zero"
        );
    }

    #[test]
    fn test_rejects_negative_balance() {
        let settings = PortalSettings {
            demo_balance: -1.0,
            ..PortalSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
