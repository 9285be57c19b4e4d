//! Crimson Portal - headless session driver
//!
//! Mounts the application state store over the mock catalog, applies the
//! preferences and actions given on the command line, and prints what the
//! portal's views would show.

use std::{path::PathBuf, sync::Arc};

use {
    anyhow::{Error, Result},
    async_trait::async_trait,
    clap::Parser,
    tracing::info,
    tracing_subscriber::EnvFilter,
};

use crimson_portal::{
    AppStateEvent, AppStore, MockCatalog, SettingsManager, StateObserver,
    error::{ErrorReporter, ResultExt},
    state::{DocumentRoot, Theme},
};

/// Command line options.
#[derive(Debug, Parser)]
#[command(name = "crimson-portal", about = "Drive a mocked portal session")]
struct Cli {
    /// Settings file (defaults to the XDG config location).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Category filter to apply, or "all".
    #[arg(long, default_value = "all")]
    filter: String,
    /// Interface language code (EN, ZH, MS, TH).
    #[arg(long)]
    language: Option<String>,
    /// Display currency code (MYR, USD, EUR, BTC, ETH, USDT).
    #[arg(long)]
    currency: Option<String>,
    /// Sign in with this email.
    #[arg(long)]
    email: Option<String>,
    /// Password used with --email.
    #[arg(long, default_value = "")]
    password: String,
    /// Search the catalog by title or provider.
    #[arg(long)]
    search: Option<String>,
    /// Colour scheme (light or dark).
    #[arg(long)]
    theme: Option<String>,
}

/// Logs every state change.
struct LoggingObserver;

#[async_trait]
impl StateObserver for LoggingObserver {
    async fn handle_state_change(&mut self, event: AppStateEvent) {
        info!(?event, "State changed");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let manager = match &cli.config {
        Some(path) => SettingsManager::with_config_path(path.clone()).add_contextf(
            format_args!("Failed to load portal settings from {}", path.display()),
        )?,
        None => SettingsManager::new().add_context("Failed to load portal settings")?,
    };
    let settings = manager.get_settings().clone();
    info!("Using settings from {:?}", manager.get_config_path());

    let document = Arc::new(DocumentRoot::new());
    let (store, load) = AppStore::mount(
        settings.clone(),
        Arc::new(MockCatalog::new(settings.catalog_delay())),
        document.clone(),
    );
    let observer = store.reader().spawn_observer(LoggingObserver);

    if let Some(code) = &cli.language
        && let Err(e) = store.set_language_code(code)
    {
        ErrorReporter::warn(&Error::new(e), "language selection");
    }
    if let Some(code) = &cli.currency
        && let Err(e) = store.set_currency_code(code)
    {
        ErrorReporter::warn(&Error::new(e), "currency selection");
    }
    if let Some(name) = &cli.theme {
        match name.parse::<Theme>() {
            Ok(theme) if theme != store.theme() => store.toggle_theme(),
            Ok(_) => {}
            Err(e) => ErrorReporter::warn(&Error::new(e), "theme selection"),
        }
    }

    load.await
        .add_context("Catalog load task failed")?
        .add_context("Failed to load the game catalog")?;

    let translator = store.translator();
    store.filter_games(&cli.filter);
    let filtered = store.filtered_games();
    println!(
        "{} [{}] - {} (theme: {}, document classes: {:?})",
        translator.translate("games.all"),
        store.current_filter(),
        filtered.len(),
        store.theme(),
        document.classes()
    );
    if filtered.is_empty() {
        println!("  {}", translator.translate("games.empty"));
    }
    for game in &filtered {
        println!("  {:<10} {:<10} {:<10} {}", game.id, game.category, game.title, game.provider);
    }

    if let Some(query) = &cli.search {
        let found = store.search_games(query);
        println!(
            "{} \"{}\": {}",
            translator.translate("allGamesPage.searchPlaceholder"),
            query,
            found.len()
        );
        for game in &found {
            println!("  {:<10} {}", game.id, game.title);
        }
    }

    println!("{}", translator.translate("tokens.title"));
    for token in store.token_prices() {
        let arrow = if token.is_up() { "+" } else { "-" };
        println!(
            "  {:<5} ${:<10} {}{}%",
            token.symbol,
            token.price,
            arrow,
            token.change_24h.abs()
        );
    }

    println!("{}", translator.translate("winners.title"));
    for winner in store.recent_winners().iter().take(5) {
        let amount = format!("{} {:.2}", winner.currency, winner.amount);
        println!(
            "  {}",
            translator.translate_with(
                "winners.won",
                &[
                    ("username", winner.username.as_str()),
                    ("amount", amount.as_str()),
                    ("game", winner.game.title.as_str()),
                ],
            )
        );
    }

    if let Some(email) = &cli.email {
        match store.login(email, &cli.password).await {
            Ok(()) => {
                println!(
                    "{}: {}",
                    translator.translate("auth.loginSuccess"),
                    translator.translate_with("auth.welcomeBack", &[("brand", "CrimsonCoin")])
                );
                println!(
                    "{}: {}",
                    translator.translate("header.balance"),
                    store.balance_display()
                );
                store.logout();
                println!("{}", translator.translate("auth.loggedOutDescription"));
            }
            Err(e) => {
                let error = Error::new(e);
                ErrorReporter::warn(&error, "login");
                println!(
                    "{}: {}",
                    translator.translate("auth.loginFailed"),
                    ErrorReporter::to_user_message(&error)
                );
            }
        }
    }

    store.shutdown();
    observer.await.add_context("State observer task failed")?;
    Ok(())
}
