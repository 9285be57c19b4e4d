//! Data models for the game catalog and the portal's reference feeds.
//!
//! These structures are loaded once from a catalog source and never
//! mutated afterwards; the store only derives projections over them.

use std::fmt::{Display, Formatter, Result as FmtResult};

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Fixed set of game categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameCategory {
    /// Classic and video slots.
    Slots,
    /// Poker, blackjack, roulette.
    Table,
    /// Live dealer games.
    Live,
    /// Progressive jackpots.
    Jackpot,
    /// In-house exclusives.
    Originals,
    /// Sports betting.
    Sports,
}

impl GameCategory {
    /// Every category, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Slots,
        Self::Table,
        Self::Live,
        Self::Jackpot,
        Self::Originals,
        Self::Sports,
    ];

    /// Returns the category identifier used by filters and slugs.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Slots => "slots",
            Self::Table => "table",
            Self::Live => "live",
            Self::Jackpot => "jackpot",
            Self::Originals => "originals",
            Self::Sports => "sports",
        }
    }
}

impl Display for GameCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(self.id())
    }
}

/// A playable game in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Unique game identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Thumbnail reference.
    pub image: String,
    /// Category the game is listed under.
    pub category: GameCategory,
    /// Studio that supplies the game.
    pub provider: String,
    /// Shown with a "hot" badge.
    #[serde(default)]
    pub is_hot: bool,
    /// Shown with a "new" badge.
    #[serde(default)]
    pub is_new: bool,
    /// Marked as a favourite.
    #[serde(default)]
    pub is_favorite: bool,
}

/// Category reference data shown on the category cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier, matches `GameCategory::id`.
    pub id: String,
    /// Display title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Icon key.
    pub icon: String,
    /// URL slug.
    pub slug: String,
}

/// Game summary embedded in a winner entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Game identifier.
    pub id: String,
    /// Game title.
    pub title: String,
    /// Thumbnail reference.
    pub image: String,
}

/// Entry of the recent winners feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    /// Entry identifier.
    pub id: String,
    /// Public username of the winner.
    pub username: String,
    /// Avatar reference.
    pub avatar: String,
    /// Game the prize was won on.
    pub game: GameSummary,
    /// Prize amount.
    pub amount: f64,
    /// Currency code of the prize.
    pub currency: String,
    /// When the prize was won.
    pub timestamp: DateTime<Utc>,
}

/// Ticker entry of the token price tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPrice {
    /// Token identifier.
    pub id: String,
    /// Token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Price in USD.
    pub price: f64,
    /// Percentage change over 24 hours.
    #[serde(rename = "change24h")]
    pub change_24h: f64,
    /// Icon key.
    pub icon: String,
}

impl TokenPrice {
    /// Whether the 24-hour change is zero or positive.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.change_24h >= 0.0
    }
}

/// Complete dataset produced by a catalog source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    /// Game collection in catalog order.
    pub games: Vec<Game>,
    /// Category reference data.
    pub categories: Vec<Category>,
    /// Recent winners feed.
    pub winners: Vec<Winner>,
    /// Token price ticker.
    pub token_prices: Vec<TokenPrice>,
}
