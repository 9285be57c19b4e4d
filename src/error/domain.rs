//! Domain-specific error types using `thiserror`.
//!
//! This module defines the main error enums for the different domains
//! within the portal: the state store, the catalog source, and preference
//! parsing.

use thiserror::Error;

/// State store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Login attempted with an empty identifier or secret.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// A login is already pending.
    #[error("A login is already in progress")]
    LoginInProgress,
    /// The session was logged out before the pending login completed.
    #[error("Login aborted by logout")]
    LoginAborted,
    /// The store was shut down while an operation was pending.
    #[error("State store is closed")]
    Closed,
    /// The initial catalog load failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Catalog source errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The seed source could not produce a dataset.
    #[error("Catalog unavailable: {reason}")]
    Unavailable { reason: String },
    /// Two games in the dataset share an identifier.
    #[error("Duplicate game id: {id}")]
    DuplicateGameId { id: String },
}

/// Preference parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    /// Currency code outside the supported set.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
    /// Language code outside the supported set.
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),
    /// Theme name outside `light`/`dark`.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}
