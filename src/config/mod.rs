//! Startup configuration.
//!
//! This module loads the portal settings from an XDG-compliant location.

pub mod settings;

pub use settings::{PortalSettings, SettingsError, SettingsManager, get_config_path};
