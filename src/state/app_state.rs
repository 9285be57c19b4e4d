//! Application state store with reactive update mechanisms.
//!
//! This module provides the `AppStore`, the single owner of the session
//! state of the portal. Consumers read through `StoreReader` handles and
//! subscribe to `AppStateEvent`s; every mutation goes through one of the
//! store's operations and commits under a single write lock. Hooks and the
//! broadcast of its events run before that lock is released, so they follow
//! commit order.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    future::{Future, pending},
    ops::Deref,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use {
    anyhow::Error,
    async_trait::async_trait,
    parking_lot::RwLock,
    tokio::{
        select, spawn,
        sync::{
            broadcast::{Receiver, Sender, channel, error::RecvError},
            watch,
        },
        task::JoinHandle,
        time::sleep,
    },
    tracing::{debug, info, warn},
};

use crate::{
    catalog::{
        CatalogSource, Category, CategoryFilter, Game, TokenPrice, Winner, filter::search,
    },
    config::PortalSettings,
    error::{ErrorReporter, PreferenceError, StoreError},
    i18n::Translator,
    state::{
        preferences::{Currency, Language, Theme},
        session::{AuthStatus, LoginTicket, Session, validate_credentials},
        theme::ThemeHook,
    },
};

/// Snapshot of the whole application state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    /// Active colour scheme.
    pub theme: Theme,
    /// Whether the sidebar is expanded.
    pub is_sidebar_open: bool,
    /// Display currency.
    pub currency: Currency,
    /// Interface language.
    pub language: Language,
    /// Authentication status and balance.
    pub session: Session,
    /// Operations (initial load, logins) still in flight.
    pub pending_operations: u32,
    /// Full game collection in catalog order.
    pub games: Vec<Game>,
    /// `games` projected through `current_filter`.
    pub filtered_games: Vec<Game>,
    /// Active category filter.
    pub current_filter: CategoryFilter,
    /// Category reference data.
    pub categories: Vec<Category>,
    /// Recent winners feed.
    pub recent_winners: Vec<Winner>,
    /// Token price ticker.
    pub token_prices: Vec<TokenPrice>,
    /// Unread notifications.
    pub notification_count: u32,
}

impl AppSnapshot {
    /// Creates the pre-load state from the startup settings.
    #[must_use]
    pub fn from_settings(settings: &PortalSettings) -> Self {
        Self {
            theme: settings.default_theme,
            is_sidebar_open: settings.sidebar_open,
            currency: settings.default_currency,
            language: settings.default_language,
            session: Session::default(),
            pending_operations: 0,
            games: Vec::new(),
            filtered_games: Vec::new(),
            current_filter: CategoryFilter::All,
            categories: Vec::new(),
            recent_winners: Vec::new(),
            token_prices: Vec::new(),
            notification_count: settings.notification_count,
        }
    }

    /// Whether the session is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Whether any operation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending_operations > 0
    }

    fn begin_operation(&mut self, events: &mut Vec<AppStateEvent>) {
        if self.pending_operations == 0 {
            events.push(AppStateEvent::LoadingChanged(true));
        }
        self.pending_operations += 1;
    }

    fn end_operation(&mut self, events: &mut Vec<AppStateEvent>) {
        self.pending_operations = self.pending_operations.saturating_sub(1);
        if self.pending_operations == 0 {
            events.push(AppStateEvent::LoadingChanged(false));
        }
    }

    /// Drops the bookkeeping of operations that will never complete.
    fn abandon_pending(&mut self, events: &mut Vec<AppStateEvent>) {
        if self.session.abort_login() {
            events.push(AppStateEvent::AuthStatusChanged(AuthStatus::Anonymous));
        }
        if self.pending_operations > 0 {
            self.pending_operations = 0;
            events.push(AppStateEvent::LoadingChanged(false));
        }
    }

    fn refilter(&mut self) {
        self.filtered_games = self.current_filter.apply(&self.games);
    }
}

/// Application state change events.
#[derive(Debug, Clone, PartialEq)]
pub enum AppStateEvent {
    /// Theme changed.
    ThemeChanged(Theme),
    /// Sidebar expanded (`true`) or collapsed.
    SidebarToggled(bool),
    /// Display currency changed.
    CurrencyChanged(Currency),
    /// Interface language changed.
    LanguageChanged(Language),
    /// Authentication status changed.
    AuthStatusChanged(AuthStatus),
    /// Balance changed.
    BalanceChanged(f64),
    /// Loading started (`true`) or finished.
    LoadingChanged(bool),
    /// Initial catalog committed.
    CatalogLoaded {
        /// Number of games loaded.
        games: usize,
    },
    /// Filter set or filtered projection recomputed.
    FilterChanged {
        /// Active filter.
        filter: CategoryFilter,
        /// Number of games in the projection.
        matches: usize,
    },
    /// Unread notification count changed.
    NotificationsChanged(u32),
}

struct StoreShared {
    state: RwLock<AppSnapshot>,
    state_tx: Sender<AppStateEvent>,
    shutdown_tx: watch::Sender<bool>,
    settings: PortalSettings,
    catalog: Arc<dyn CatalogSource>,
    theme_hook: Arc<dyn ThemeHook>,
    translator: Arc<Translator>,
    initialized: AtomicBool,
}

/// Read-only handle to the store.
///
/// Cheap to clone; every read reflects the latest committed state.
#[derive(Clone)]
pub struct StoreReader {
    shared: Arc<StoreShared>,
}

/// Owning root of the application state.
///
/// Derefs to `StoreReader` for reads.
#[derive(Clone)]
pub struct AppStore {
    reader: StoreReader,
}

impl Debug for StoreReader {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreReader")
            .field("state", &*self.shared.state.read())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Debug for AppStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppStore")
            .field("reader", &self.reader)
            .finish()
    }
}

impl Deref for AppStore {
    type Target = StoreReader;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

impl StoreReader {
    /// Subscribes to application state changes.
    ///
    /// # Returns
    ///
    /// A broadcast receiver for state change events committed from now on.
    pub fn subscribe(&self) -> Receiver<AppStateEvent> {
        self.shared.state_tx.subscribe()
    }

    /// Runs `observer` on its own task until the store shuts down or every
    /// store handle is dropped, then hands the observer back.
    pub fn spawn_observer<O>(&self, mut observer: O) -> JoinHandle<O>
    where
        O: StateObserver + 'static,
    {
        let mut receiver = self.subscribe();
        let mut shutdown = self.shared.shutdown_tx.subscribe();

        spawn(async move {
            loop {
                select! {
                    biased;
                    received = receiver.recv() => match received {
                        Ok(event) => observer.handle_state_change(event).await,
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("State observer lagged, skipped {skipped} events");
                        }
                        Err(RecvError::Closed) => break,
                    },
                    () = wait_for_shutdown(&mut shutdown) => break,
                }
            }
            debug!("State observer stopped");
            observer
        })
    }

    /// Gets a copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> AppSnapshot {
        self.shared.state.read().clone()
    }

    /// Gets the translator following the selected language.
    #[must_use]
    pub fn translator(&self) -> Arc<Translator> {
        Arc::clone(&self.shared.translator)
    }

    /// Gets the startup settings the store was built with.
    #[must_use]
    pub fn settings(&self) -> &PortalSettings {
        &self.shared.settings
    }

    /// Whether the store was shut down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self.shared.shutdown_tx.borrow()
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.shared.state.read().theme
    }

    #[must_use]
    pub fn is_sidebar_open(&self) -> bool {
        self.shared.state.read().is_sidebar_open
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.shared.state.read().currency
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.shared.state.read().language
    }

    #[must_use]
    pub fn auth_status(&self) -> AuthStatus {
        self.shared.state.read().session.status
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.shared.state.read().is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.state.read().is_loading()
    }

    /// Gets the mock balance (zero while signed out).
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.shared.state.read().session.balance
    }

    /// Gets the balance formatted in the selected currency.
    #[must_use]
    pub fn balance_display(&self) -> String {
        let state = self.shared.state.read();
        state.currency.format_amount(state.session.balance)
    }

    #[must_use]
    pub fn games(&self) -> Vec<Game> {
        self.shared.state.read().games.clone()
    }

    #[must_use]
    pub fn filtered_games(&self) -> Vec<Game> {
        self.shared.state.read().filtered_games.clone()
    }

    #[must_use]
    pub fn current_filter(&self) -> CategoryFilter {
        self.shared.state.read().current_filter.clone()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.shared.state.read().categories.clone()
    }

    /// Finds a category by id or slug.
    #[must_use]
    pub fn category(&self, id_or_slug: &str) -> Option<Category> {
        self.shared
            .state
            .read()
            .categories
            .iter()
            .find(|category| category.id == id_or_slug || category.slug == id_or_slug)
            .cloned()
    }

    #[must_use]
    pub fn recent_winners(&self) -> Vec<Winner> {
        self.shared.state.read().recent_winners.clone()
    }

    #[must_use]
    pub fn token_prices(&self) -> Vec<TokenPrice> {
        self.shared.state.read().token_prices.clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> u32 {
        self.shared.state.read().notification_count
    }

    /// Games carrying the "hot" badge, in catalog order.
    #[must_use]
    pub fn hot_games(&self) -> Vec<Game> {
        let state = self.shared.state.read();
        state.games.iter().filter(|g| g.is_hot).cloned().collect()
    }

    /// Games carrying the "new" badge, in catalog order.
    #[must_use]
    pub fn new_games(&self) -> Vec<Game> {
        let state = self.shared.state.read();
        state.games.iter().filter(|g| g.is_new).cloned().collect()
    }

    /// Searches the full catalog by title or provider.
    ///
    /// Independent of the active category filter.
    #[must_use]
    pub fn search_games(&self, query: &str) -> Vec<Game> {
        search(&self.shared.state.read().games, query)
    }
}

impl AppStore {
    /// Creates a store in its pre-load state.
    ///
    /// The initial theme is applied to `theme_hook` right away. The catalog
    /// is not loaded until `initialize` runs; `mount` does both.
    pub fn new(
        settings: PortalSettings,
        catalog: Arc<dyn CatalogSource>,
        theme_hook: Arc<dyn ThemeHook>,
    ) -> Self {
        let (state_tx, _) = channel(settings.event_capacity.max(1));
        let (shutdown_tx, _) = watch::channel(false);
        let state = AppSnapshot::from_settings(&settings);
        let translator = Arc::new(Translator::new(state.language));

        theme_hook.apply_theme(state.theme);
        debug!(
            "AppStore: Created with theme {}, currency {}, language {}",
            state.theme, state.currency, state.language
        );

        Self {
            reader: StoreReader {
                shared: Arc::new(StoreShared {
                    state: RwLock::new(state),
                    state_tx,
                    shutdown_tx,
                    settings,
                    catalog,
                    theme_hook,
                    translator,
                    initialized: AtomicBool::new(false),
                }),
            },
        }
    }

    /// Creates a store and spawns its initial load.
    ///
    /// The store reports `is_loading` from the moment this returns.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn mount(
        settings: PortalSettings,
        catalog: Arc<dyn CatalogSource>,
        theme_hook: Arc<dyn ThemeHook>,
    ) -> (Self, JoinHandle<Result<(), StoreError>>) {
        let store = Self::new(settings, catalog, theme_hook);
        let load = spawn(store.initialize());
        (store, load)
    }

    /// Gets a read-only handle for consumers.
    #[must_use]
    pub fn reader(&self) -> StoreReader {
        self.reader.clone()
    }

    /// Loads the catalog from the store's source.
    ///
    /// Loading is flagged as soon as this is called. Only the first call
    /// loads; later calls resolve immediately. The current filter is
    /// re-applied to the loaded games.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Catalog` if the source fails (the catalog stays
    /// empty and loading ends) and `StoreError::Closed` if the store shuts
    /// down first.
    pub fn initialize(&self) -> impl Future<Output = Result<(), StoreError>> + Send + use<> {
        let started = self.begin_initial_load();
        let store = self.clone();
        async move {
            if started? {
                store.finish_initial_load().await
            } else {
                Ok(())
            }
        }
    }

    /// Flips the theme and updates the document styling hook.
    pub fn toggle_theme(&self) {
        let Some(theme) = self.commit(|state, events| {
            state.theme = state.theme.toggled();
            self.shared.theme_hook.apply_theme(state.theme);
            events.push(AppStateEvent::ThemeChanged(state.theme));
            state.theme
        }) else {
            return;
        };
        debug!("AppStore: Theme toggled to {}", theme);
    }

    /// Expands or collapses the sidebar.
    pub fn toggle_sidebar(&self) {
        self.commit(|state, events| {
            state.is_sidebar_open = !state.is_sidebar_open;
            events.push(AppStateEvent::SidebarToggled(state.is_sidebar_open));
        });
    }

    /// Selects the display currency.
    pub fn set_currency(&self, currency: Currency) {
        self.commit(|state, events| {
            if state.currency != currency {
                state.currency = currency;
                events.push(AppStateEvent::CurrencyChanged(currency));
            }
        });
    }

    /// Selects the display currency by code.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError::UnknownCurrency` for codes outside the
    /// supported set; the selection is left unchanged.
    pub fn set_currency_code(&self, code: &str) -> Result<(), PreferenceError> {
        self.set_currency(code.parse()?);
        Ok(())
    }

    /// Selects the interface language and switches the translator.
    pub fn set_language(&self, language: Language) {
        self.commit(|state, events| {
            if state.language != language {
                state.language = language;
                self.shared.translator.set_language(language);
                events.push(AppStateEvent::LanguageChanged(language));
            }
        });
    }

    /// Selects the interface language by code.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError::UnknownLanguage` for codes outside the
    /// supported set; the selection is left unchanged.
    pub fn set_language_code(&self, code: &str) -> Result<(), PreferenceError> {
        self.set_language(code.parse()?);
        Ok(())
    }

    /// Signs in after a simulated round trip.
    ///
    /// Credentials are checked and loading is flagged synchronously, before
    /// the returned future is polled. The round trip runs on its own task,
    /// so dropping the future does not leave the session half-signed-in.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidCredentials` if either field is empty; state is
    ///   untouched.
    /// - `StoreError::LoginInProgress` if another login is pending.
    /// - `StoreError::LoginAborted` if `logout` ran before completion.
    /// - `StoreError::Closed` if the store shut down first.
    ///
    /// # Panics
    ///
    /// Panics if a valid login is started outside a Tokio runtime.
    pub fn login(
        &self,
        identifier: &str,
        secret: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send + use<> {
        let round_trip = self.begin_login(identifier, secret).map(|ticket| match ticket {
            LoginTicket::Pending(attempt) => Some(spawn(self.clone().finish_login(attempt))),
            LoginTicket::AlreadyAuthenticated => None,
        });

        async move {
            match round_trip? {
                Some(handle) => handle.await.map_err(|_| StoreError::Closed)?,
                None => Ok(()),
            }
        }
    }

    /// Signs out and resets the balance to zero.
    pub fn logout(&self) {
        let Some(previous) = self.commit(|state, events| {
            let previous = state.session.logout();
            if previous != AuthStatus::Anonymous {
                events.push(AppStateEvent::AuthStatusChanged(AuthStatus::Anonymous));
                events.push(AppStateEvent::BalanceChanged(0.0));
            }
            previous
        }) else {
            return;
        };
        if previous != AuthStatus::Anonymous {
            info!("AppStore: Logged out (was {:?})", previous);
        }
    }

    /// Sets the category filter and recomputes `filtered_games`.
    ///
    /// `"all"` shows every game. Ids that match no game, including ids
    /// outside the known categories, give an empty projection.
    pub fn filter_games(&self, category_id: &str) {
        let filter = CategoryFilter::new(category_id);
        if !filter.is_known() {
            debug!("AppStore: Filtering by unknown category {:?}", category_id);
        }

        let Some(matches) = self.commit(move |state, events| {
            state.current_filter = filter;
            state.refilter();
            let matches = state.filtered_games.len();
            events.push(AppStateEvent::FilterChanged {
                filter: state.current_filter.clone(),
                matches,
            });
            matches
        }) else {
            return;
        };
        debug!("AppStore: Filter {:?} matches {} games", category_id, matches);
    }

    /// Clears the unread notification badge.
    pub fn mark_notifications_read(&self) {
        self.commit(|state, events| {
            if state.notification_count != 0 {
                state.notification_count = 0;
                events.push(AppStateEvent::NotificationsChanged(0));
            }
        });
    }

    /// Tears the store down.
    ///
    /// Pending login and load completions are dropped: loading ends and a
    /// pending login falls back to `Anonymous`. Later mutations are ignored
    /// and observers stop after draining queued events.
    pub fn shutdown(&self) {
        let mut state = self.shared.state.write();
        if self.is_closed() {
            return;
        }
        let mut events = Vec::new();
        state.abandon_pending(&mut events);
        self.publish(events);
        self.shared.shutdown_tx.send_replace(true);
        drop(state);
        info!("AppStore: Shut down");
    }

    /// Applies `mutate` under the write lock and publishes its events before
    /// releasing it.
    ///
    /// Side effects performed inside `mutate` run under the same lock.
    /// Returns `None` without touching state once the store is closed.
    fn commit<R>(
        &self,
        mutate: impl FnOnce(&mut AppSnapshot, &mut Vec<AppStateEvent>) -> R,
    ) -> Option<R> {
        let mut state = self.shared.state.write();
        if self.is_closed() {
            debug!("AppStore: Ignoring mutation after shutdown");
            return None;
        }
        let mut events = Vec::new();
        let result = mutate(&mut state, &mut events);
        self.publish(events);
        drop(state);
        Some(result)
    }

    fn publish(&self, events: Vec<AppStateEvent>) {
        for event in events {
            let _ = self.shared.state_tx.send(event);
        }
    }

    /// Resolves `future` unless the store shuts down first.
    async fn unless_closed<F: Future>(&self, future: F) -> Option<F::Output> {
        let mut shutdown = self.shared.shutdown_tx.subscribe();
        select! {
            biased;
            () = wait_for_shutdown(&mut shutdown) => None,
            output = future => Some(output),
        }
    }

    fn begin_initial_load(&self) -> Result<bool, StoreError> {
        if self.shared.initialized.swap(true, Ordering::AcqRel) {
            debug!("AppStore: Catalog already loaded or loading");
            return Ok(false);
        }
        self.commit(|state, events| state.begin_operation(events))
            .ok_or(StoreError::Closed)?;
        Ok(true)
    }

    async fn finish_initial_load(self) -> Result<(), StoreError> {
        let catalog = Arc::clone(&self.shared.catalog);
        // `shutdown` already ended the operation.
        let Some(loaded) = self.unless_closed(catalog.load()).await else {
            debug!("AppStore: Shut down during initial load");
            return Err(StoreError::Closed);
        };

        let result = self
            .commit(move |state, events| {
                let result = loaded.map(|data| {
                    state.games = data.games;
                    state.categories = data.categories;
                    state.recent_winners = data.winners;
                    state.token_prices = data.token_prices;
                    state.refilter();
                    events.push(AppStateEvent::CatalogLoaded {
                        games: state.games.len(),
                    });
                    events.push(AppStateEvent::FilterChanged {
                        filter: state.current_filter.clone(),
                        matches: state.filtered_games.len(),
                    });
                    state.games.len()
                });
                state.end_operation(events);
                result
            })
            .ok_or(StoreError::Closed)?;

        match result {
            Ok(count) => {
                info!(games = count, "AppStore: Catalog loaded");
                Ok(())
            }
            Err(error) => {
                ErrorReporter::warn(&Error::new(error.clone()), "initial catalog load");
                Err(error.into())
            }
        }
    }

    fn begin_login(&self, identifier: &str, secret: &str) -> Result<LoginTicket, StoreError> {
        validate_credentials(identifier, secret)?;

        let ticket = self
            .commit(|state, events| -> Result<LoginTicket, StoreError> {
                let ticket = state.session.begin_login()?;
                if let LoginTicket::Pending(_) = ticket {
                    events.push(AppStateEvent::AuthStatusChanged(AuthStatus::Authenticating));
                    state.begin_operation(events);
                }
                Ok(ticket)
            })
            .ok_or(StoreError::Closed)?;

        if let Err(error) = &ticket {
            ErrorReporter::debug(&Error::new(error.clone()), "login");
        }
        ticket
    }

    async fn finish_login(self, attempt: u64) -> Result<(), StoreError> {
        let delay = self.shared.settings.login_delay();
        // `shutdown` already reverted the pending status.
        if self.unless_closed(sleep(delay)).await.is_none() {
            debug!("AppStore: Shut down during login attempt {attempt}");
            return Err(StoreError::Closed);
        }

        let balance = self.shared.settings.demo_balance;
        let result = self
            .commit(|state, events| {
                let result = state.session.complete_login(attempt, balance);
                if result.is_ok() {
                    events.push(AppStateEvent::AuthStatusChanged(AuthStatus::Authenticated));
                    events.push(AppStateEvent::BalanceChanged(balance));
                }
                state.end_operation(events);
                result
            })
            .ok_or(StoreError::Closed)?;

        match &result {
            Ok(()) => info!("AppStore: Logged in"),
            Err(error) => debug!("AppStore: Login attempt {attempt} dropped: {error}"),
        }
        result
    }
}

/// Resolves once the shutdown flag is set; never if the flag's sender is gone.
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|closed| *closed).await.is_err() {
        pending::<()>().await;
    }
}

/// Trait for views that react to state changes.
///
/// Run an observer with `StoreReader::spawn_observer`.
#[async_trait]
pub trait StateObserver: Send {
    /// Handles a state change event.
    ///
    /// # Arguments
    ///
    /// * `event` - The state change event to handle.
    async fn handle_state_change(&mut self, event: AppStateEvent);
}
