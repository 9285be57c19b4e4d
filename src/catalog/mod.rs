//! Game catalog: data model, category filtering and seed sources.

pub mod filter;
pub mod models;
pub mod source;

pub use {
    filter::{ALL_CATEGORIES, CategoryFilter},
    models::{CatalogData, Category, Game, GameCategory, GameSummary, TokenPrice, Winner},
    source::{CatalogSource, MockCatalog, StaticCatalog},
};
