//! Operational error context propagation with `anyhow`.
//!
//! This module provides the extension trait used to attach context to
//! fallible calls and the reporter that logs errors and turns them into
//! the short texts shown in the portal's notifications.

use std::{error::Error as StdError, fmt::Display};

use {
    anyhow::{Context, Error, Result as AnyhowResult},
    tracing::{debug, warn},
};

use crate::error::domain::{CatalogError, PreferenceError, StoreError};

/// Extension trait for enhanced error context.
pub trait ResultExt<T, E> {
    /// Adds context to an error with a static string.
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;

    /// Adds context to an error with a formatted string.
    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(context)
    }

    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(format.to_string())
    }
}

/// Centralized error reporting and logging.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Reports a debug-level error (expected rejections such as a double submit).
    pub fn debug(error: &Error, context: &str) {
        debug!(context = context, error = %error, "Rejected operation");
    }

    /// Reports a warning-level error (recoverable issues).
    pub fn warn(error: &Error, context: &str) {
        warn!(context = context, error = %error, "Recoverable error");
    }

    /// Converts an error to a user-friendly message.
    ///
    /// Store and preference errors anywhere in the chain map to the
    /// notification texts of the portal; anything else falls back to the
    /// top-level message.
    pub fn to_user_message(error: &Error) -> String {
        for cause in error.chain() {
            if let Some(store_error) = cause.downcast_ref::<StoreError>() {
                return Self::store_message(store_error).to_string();
            }
            if let Some(preference_error) = cause.downcast_ref::<PreferenceError>() {
                return preference_error.to_string();
            }
        }
        error.to_string()
    }

    fn store_message(error: &StoreError) -> &'static str {
        match error {
            StoreError::InvalidCredentials => "Please check your email and password",
            StoreError::LoginInProgress => "Sign in is already in progress",
            StoreError::LoginAborted => "Sign in was cancelled",
            StoreError::Closed => "The session has ended",
            StoreError::Catalog(CatalogError::Unavailable { .. }) => {
                "Games are unavailable right now, please try again later"
            }
            StoreError::Catalog(CatalogError::DuplicateGameId { .. }) => {
                "The game catalog could not be loaded"
            }
        }
    }
}
