//! Catalog sources feeding the initial load of the state store.
//!
//! The portal has no backend; `MockCatalog` generates the same seed data
//! the front-end always shipped with and waits a fixed delay to stand in
//! for the network round trip.

use std::{collections::HashSet, time::Duration};

use {
    async_trait::async_trait,
    chrono::{Duration as ChronoDuration, Utc},
    tokio::time::sleep,
    tracing::debug,
};

use crate::{
    catalog::models::{
        CatalogData, Category, Game, GameCategory, GameSummary, TokenPrice, Winner,
    },
    error::CatalogError,
};

/// Number of games in the mock catalog.
pub const MOCK_GAME_COUNT: usize = 24;

/// Number of entries in the mock winners feed.
pub const MOCK_WINNER_COUNT: usize = 10;

/// Category rotation of the mock games. Sports has no mock games.
const MOCK_GAME_CATEGORIES: [GameCategory; 5] = [
    GameCategory::Slots,
    GameCategory::Originals,
    GameCategory::Table,
    GameCategory::Live,
    GameCategory::Jackpot,
];

const MOCK_PROVIDERS: [&str; 5] = [
    "NetEnt",
    "Microgaming",
    "Playtech",
    "Evolution",
    "Pragmatic Play",
];

const MOCK_USERNAMES: [&str; 5] = ["Player1", "CryptoWin", "GamerPro", "LuckyGamer", "BitHunter"];

const MOCK_AMOUNTS: [f64; 5] = [1250.75, 489.50, 2570.25, 860.30, 1025.40];

/// Minutes before "now" of the mock winners, cycled.
const MOCK_WIN_AGES_MINUTES: [i64; 5] = [1, 5, 15, 30, 60];

/// Asynchronous provider of the reference dataset.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Produces the complete dataset.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the dataset cannot be produced.
    async fn load(&self) -> Result<CatalogData, CatalogError>;
}

/// Seed source reproducing the portal's built-in mock data.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    /// Simulated fetch delay.
    delay: Duration,
}

impl MockCatalog {
    /// Creates a mock source that answers after `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Builds the mock dataset without waiting.
    #[must_use]
    pub fn generate() -> CatalogData {
        CatalogData {
            games: mock_games(),
            categories: mock_categories(),
            winners: mock_winners(),
            token_prices: mock_token_prices(),
        }
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn load(&self) -> Result<CatalogData, CatalogError> {
        debug!("MockCatalog: Simulating fetch for {:?}", self.delay);
        sleep(self.delay).await;
        let data = Self::generate();
        validate(&data)?;
        Ok(data)
    }
}

/// Source serving a fixed dataset, optionally after a delay.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    data: CatalogData,
    delay: Duration,
}

impl StaticCatalog {
    /// Serves `data` immediately.
    #[must_use]
    pub fn new(data: CatalogData) -> Self {
        Self {
            data,
            delay: Duration::ZERO,
        }
    }

    /// Serves games only, with empty reference feeds.
    #[must_use]
    pub fn with_games(games: Vec<Game>) -> Self {
        Self::new(CatalogData {
            games,
            ..CatalogData::default()
        })
    }

    /// Sets the simulated delay.
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn load(&self) -> Result<CatalogData, CatalogError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        validate(&self.data)?;
        Ok(self.data.clone())
    }
}

/// Checks that game identifiers are unique.
///
/// # Errors
///
/// Returns `CatalogError::DuplicateGameId` naming the first repeated id.
pub fn validate(data: &CatalogData) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(data.games.len());
    for game in &data.games {
        if !seen.insert(game.id.as_str()) {
            return Err(CatalogError::DuplicateGameId {
                id: game.id.clone(),
            });
        }
    }
    Ok(())
}

fn mock_games() -> Vec<Game> {
    (0..MOCK_GAME_COUNT)
        .map(|index| Game {
            id: format!("game-{}", index + 1),
            title: format!("Game {}", index + 1),
            image: format!("https://picsum.photos/seed/{}/300/200", index + 100),
            category: MOCK_GAME_CATEGORIES[index % MOCK_GAME_CATEGORIES.len()],
            provider: MOCK_PROVIDERS[index % MOCK_PROVIDERS.len()].to_string(),
            is_hot: index % 5 == 0,
            is_new: index % 7 == 0,
            is_favorite: false,
        })
        .collect()
}

fn mock_winners() -> Vec<Winner> {
    let now = Utc::now();
    (0..MOCK_WINNER_COUNT)
        .map(|index| {
            let game_index = index % 5 + 1;
            let age = MOCK_WIN_AGES_MINUTES[index % MOCK_WIN_AGES_MINUTES.len()];
            Winner {
                id: format!("win-{}", index + 1),
                username: MOCK_USERNAMES[index % MOCK_USERNAMES.len()].to_string(),
                avatar: format!("https://api.dicebear.com/6.x/avataaars/svg?seed={index}"),
                game: GameSummary {
                    id: format!("game-{game_index}"),
                    title: format!("Game {game_index}"),
                    image: format!("https://picsum.photos/seed/{}/300/200", game_index + 199),
                },
                amount: MOCK_AMOUNTS[index % MOCK_AMOUNTS.len()],
                currency: "MYR".to_string(),
                timestamp: now - ChronoDuration::minutes(age),
            }
        })
        .collect()
}

fn mock_categories() -> Vec<Category> {
    [
        (GameCategory::Slots, "Slots", "Classic and video slots with exciting themes"),
        (GameCategory::Table, "Table Games", "Poker, Blackjack, Roulette and more"),
        (GameCategory::Live, "Live Casino", "Real-time games with live dealers"),
        (GameCategory::Jackpot, "Jackpots", "Progressive jackpot games with huge prizes"),
        (GameCategory::Originals, "Originals", "Exclusive games only found on our platform"),
        (GameCategory::Sports, "Sports", "Sports betting with competitive odds"),
    ]
    .into_iter()
    .map(|(category, title, description)| Category {
        id: category.id().to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: category.id().to_string(),
        slug: category.id().to_string(),
    })
    .collect()
}

fn mock_token_prices() -> Vec<TokenPrice> {
    [
        ("btc", "Bitcoin", "BTC", 63245.78, 2.4, "bitcoin"),
        ("eth", "Ethereum", "ETH", 3089.42, -1.2, "ethereum"),
        ("bnb", "Binance Coin", "BNB", 564.23, 0.8, "bnb"),
        ("xrp", "Ripple", "XRP", 0.5642, -2.3, "xrp"),
        ("usdt", "Tether", "USDT", 1.00, 0.01, "usdt"),
    ]
    .into_iter()
    .map(|(id, name, symbol, price, change_24h, icon)| TokenPrice {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        price,
        change_24h,
        icon: icon.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use crate::{
        catalog::{
            models::GameCategory,
            source::{
                CatalogSource, MOCK_GAME_COUNT, MOCK_WINNER_COUNT, MockCatalog, StaticCatalog,
                validate,
            },
        },
        error::CatalogError,
    };

    #[test]
    fn test_mock_dataset_shape() {
        let data = MockCatalog::generate();

        assert_eq!(data.games.len(), MOCK_GAME_COUNT);
        assert_eq!(data.winners.len(), MOCK_WINNER_COUNT);
        assert_eq!(data.categories.len(), 6);
        assert_eq!(data.token_prices.len(), 5);
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn test_mock_games_rotate_categories_and_flags() {
        let data = MockCatalog::generate();

        assert_eq!(data.games[0].id, "game-1");
        assert_eq!(data.games[0].category, GameCategory::Slots);
        assert_eq!(data.games[1].category, GameCategory::Originals);
        assert_eq!(data.games[4].category, GameCategory::Jackpot);
        assert_eq!(data.games[5].category, GameCategory::Slots);
        assert!(data.games[0].is_hot && data.games[0].is_new);
        assert!(data.games[7].is_new);
        assert!(data.games[10].is_hot);
        assert!(
            !data
                .games
                .iter()
                .any(|game| game.category == GameCategory::Sports)
        );
    }

    #[test]
    fn test_mock_winners_are_in_the_past() {
        let data = MockCatalog::generate();
        let first = &data.winners[0];

        assert_eq!(first.username, "Player1");
        assert_eq!(first.game.id, "game-1");
        assert_eq!(data.winners[5].game.id, "game-1");
        assert!(data.winners.iter().all(|w| w.timestamp < chrono::Utc::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_catalog_waits_for_delay() {
        let source = MockCatalog::new(Duration::from_millis(1500));
        let started = Instant::now();

        let data = source.load().await.unwrap();

        assert_eq!(data.games.len(), MOCK_GAME_COUNT);
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_static_catalog_rejects_duplicate_ids() {
        let mut games = MockCatalog::generate().games;
        games.push(games[3].clone());

        let result = StaticCatalog::with_games(games).load().await;
        assert_eq!(
            result,
            Err(CatalogError::DuplicateGameId {
                id: "game-4".to_string()
            })
        );
    }
}
