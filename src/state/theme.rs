//! Document-level styling hook for the active theme.
//!
//! The store calls a `ThemeHook` whenever the theme changes so that every
//! visual consumer can switch scheme at once, the way a web front-end
//! toggles a `dark` class on the document root.

use std::collections::BTreeSet;

use {parking_lot::RwLock, tracing::debug};

use crate::state::preferences::Theme;

/// Class marking the document root as dark.
pub const DARK_CLASS: &str = "dark";

/// Receives theme changes committed by the store.
pub trait ThemeHook: Send + Sync {
    /// Applies `theme` to the document.
    ///
    /// Runs while the store's state is write-locked; implementations must not
    /// call back into the store.
    fn apply_theme(&self, theme: Theme);
}

/// In-memory document root holding a set of style classes.
#[derive(Debug, Default)]
pub struct DocumentRoot {
    classes: RwLock<BTreeSet<String>>,
}

impl DocumentRoot {
    /// Creates an empty document root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `class` is currently set.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.read().contains(class)
    }

    /// Whether the dark marker is present.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.has_class(DARK_CLASS)
    }

    /// Returns the classes in sorted order.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.classes.read().iter().cloned().collect()
    }
}

impl ThemeHook for DocumentRoot {
    fn apply_theme(&self, theme: Theme) {
        let mut classes = self.classes.write();
        match theme {
            Theme::Dark => {
                classes.insert(DARK_CLASS.to_string());
            }
            Theme::Light => {
                classes.remove(DARK_CLASS);
            }
        }
        debug!("DocumentRoot: Applied {} theme", theme);
    }
}

#[cfg(test)]
mod tests {
    use crate::state::{
        preferences::Theme,
        theme::{DocumentRoot, ThemeHook},
    };

    #[test]
    fn test_dark_marker_follows_theme() {
        let root = DocumentRoot::new();
        assert!(!root.is_dark());

        root.apply_theme(Theme::Dark);
        root.apply_theme(Theme::Dark);
        assert_eq!(root.classes(), ["dark"]);

        root.apply_theme(Theme::Light);
        assert!(!root.is_dark());
        assert!(root.classes().is_empty());
    }
}
