//! Centralized state management with reactive updates to views.
//!
//! This module provides the application state store, the session
//! preferences it holds, the authentication state machine and the
//! document styling hook driven by the theme.

pub mod app_state;
pub mod preferences;
pub mod session;
pub mod theme;

pub use {
    app_state::{AppSnapshot, AppStateEvent, AppStore, StateObserver, StoreReader},
    preferences::{Currency, Language, Theme},
    session::AuthStatus,
    theme::{DocumentRoot, ThemeHook},
};
