//! Crimson Portal - client state of an online gaming portal
//!
//! Holds the session state of the portal front-end (theme, sidebar,
//! currency, language, mocked authentication) together with the game
//! catalog and its category filter, and notifies views of every change.

pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod state;

// Re-export key types for convenience
pub use {
    catalog::{CatalogSource, CategoryFilter, Game, GameCategory, MockCatalog, StaticCatalog},
    config::{PortalSettings, SettingsManager},
    error::{CatalogError, PreferenceError, StoreError},
    i18n::Translator,
    state::{AppStateEvent, AppStore, AuthStatus, StateObserver, StoreReader},
};
