//! Category filter and the projections derived from the game collection.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::catalog::models::{Game, GameCategory};

/// Sentinel filter value that shows every game.
pub const ALL_CATEGORIES: &str = "all";

/// Active category filter.
///
/// Any category id is accepted, including ids that no game carries; such a
/// filter simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Games whose category id equals the contained id.
    Category(String),
}

impl CategoryFilter {
    /// Builds a filter from a category id or the `"all"` sentinel.
    #[must_use]
    pub fn new(category_id: &str) -> Self {
        if category_id == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(category_id.to_string())
        }
    }

    /// Returns the filter as it is stored in `current_filter`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(id) => id,
        }
    }

    /// Whether the game passes the filter.
    #[must_use]
    pub fn matches(&self, game: &Game) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => game.category.id() == id,
        }
    }

    /// Whether the filter names one of the known categories (or is `All`).
    #[must_use]
    pub fn is_known(&self) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => GameCategory::ALL.iter().any(|c| c.id() == id),
        }
    }

    /// Projects `games` through the filter, keeping catalog order.
    #[must_use]
    pub fn apply(&self, games: &[Game]) -> Vec<Game> {
        match self {
            Self::All => games.to_vec(),
            Self::Category(_) => games.iter().filter(|g| self.matches(g)).cloned().collect(),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.as_str().to_string()
    }
}

impl From<GameCategory> for CategoryFilter {
    fn from(value: GameCategory) -> Self {
        Self::Category(value.id().to_string())
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive search over title and provider.
///
/// An empty (or whitespace-only) query returns the whole collection.
#[must_use]
pub fn search(games: &[Game], query: &str) -> Vec<Game> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return games.to_vec();
    }
    games
        .iter()
        .filter(|game| {
            game.title.to_lowercase().contains(&needle)
                || game.provider.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::catalog::{
        filter::{CategoryFilter, search},
        models::{Game, GameCategory},
    };

    fn game(id: &str, category: GameCategory, provider: &str) -> Game {
        Game {
            id: id.to_string(),
            title: format!("Title {id}"),
            image: String::new(),
            category,
            provider: provider.to_string(),
            is_hot: false,
            is_new: false,
            is_favorite: false,
        }
    }

    #[test]
    fn test_sentinel_parses_to_all() {
        assert_eq!(CategoryFilter::new("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::new("slots"),
            CategoryFilter::Category("slots".to_string())
        );
        assert_eq!(CategoryFilter::from(GameCategory::Live).as_str(), "live");
    }

    #[test]
    fn test_apply_keeps_relative_order() {
        let games = vec![
            game("g1", GameCategory::Slots, "NetEnt"),
            game("g2", GameCategory::Table, "Playtech"),
            game("g3", GameCategory::Slots, "Evolution"),
        ];

        let ids: Vec<String> = CategoryFilter::new("slots")
            .apply(&games)
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, ["g1", "g3"]);
        assert_eq!(CategoryFilter::All.apply(&games), games);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let games = vec![game("g1", GameCategory::Slots, "NetEnt")];
        let filter = CategoryFilter::new("fishing");

        assert!(!filter.is_known());
        assert!(filter.apply(&games).is_empty());
    }

    #[test]
    fn test_search_matches_title_and_provider() {
        let games = vec![
            game("g1", GameCategory::Slots, "NetEnt"),
            game("g2", GameCategory::Table, "Playtech"),
        ];

        assert_eq!(search(&games, "PLAYTECH").len(), 1);
        assert_eq!(search(&games, "title g1")[0].id, "g1");
        assert_eq!(search(&games, "  ").len(), 2);
        assert!(search(&games, "crash").is_empty());
    }
}
