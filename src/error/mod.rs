//! Error handling built on `thiserror` and `anyhow`.
//!
//! Domain-specific error types give callers precise variants to match on,
//! while the operational helpers attach context and report errors through
//! `tracing`.

pub mod domain;
pub mod operational;

pub use {
    domain::{CatalogError, PreferenceError, StoreError},
    operational::{ErrorReporter, ResultExt},
};
