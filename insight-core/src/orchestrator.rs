//! The search session: owns the search and filter state, turns user intents
//! into (debounced or immediate) coordinated searches and keeps the address
//! bar in sync with what is on screen.

use std::{
    fmt,
    sync::{Arc, Weak},
};

use insight_config::SearchSettings;
use insight_contracts::{
    AddressBar, ApiError, ErrorReporter, SearchApi, SearchRequest, SearchResponse,
};
use insight_model::{CategoryCount, FilterState, SearchMode, SearchState};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    coordinator::{Channel, PendingRequestToken, RequestCoordinator},
    debounce::Debouncer,
    filters::{self, FilterAction},
    search::{self, SearchAction},
    taxonomy::TaxonomyCache,
    url_state,
};

/// Collaborators a session talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub api: Arc<dyn SearchApi>,
    pub reporter: Arc<dyn ErrorReporter>,
    pub address_bar: Arc<dyn AddressBar>,
    pub taxonomy: Option<Arc<TaxonomyCache>>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("api", &self.api)
            .field("taxonomy", &self.taxonomy.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct Session {
    search: SearchState,
    filters: FilterState,
}

/// What one search request brought back.
#[derive(Debug)]
struct Fetched {
    response: SearchResponse,
    statistics: Option<Vec<CategoryCount>>,
}

struct Inner {
    collaborators: Collaborators,
    settings: SearchSettings,
    coordinator: RequestCoordinator,
    facet_debouncer: Debouncer<()>,
    price_debouncer: Debouncer<()>,
    session: Mutex<Session>,
    published: watch::Sender<SearchState>,
}

impl Inner {
    fn publish(&self, state: &SearchState) {
        self.published.send_replace(state.clone());
    }

    fn apply_search(&self, session: &mut Session, action: SearchAction) {
        session.search = search::reduce(&session.search, action);
        self.publish(&session.search);
    }

    /// Reduce a filter action, returning whether anything changed. Any change
    /// sends the session back to page 1 and cancels the in-flight search: its
    /// results no longer match the filters, so the session stays loading until
    /// the next search settles.
    ///
    /// Choosing a different ISIC code keeps the selected HS code only when the
    /// taxonomy confirms the HS code sits under the new ISIC code.
    fn apply_filter(&self, action: FilterAction) -> bool {
        let isic_selected = matches!(action, FilterAction::SetIsicCode(Some(_)));
        let mut session = self.session.lock();
        let mut next = filters::reduce(&session.filters, action);

        if isic_selected
            && next.isic_code != session.filters.isic_code
            && let (Some(isic), Some(hs)) = (&next.isic_code, &next.hs_code)
            && !self.hs_belongs_to(hs, isic)
        {
            debug!(%hs, %isic, "clearing hs code outside the new isic code");
            next = filters::reduce(&next, FilterAction::SetHsCode(None));
        }

        if next == session.filters {
            return false;
        }
        debug!(?next, "filters changed");
        session.filters = next;
        self.coordinator.cancel();
        session.search = search::reduce(&session.search, SearchAction::SetPage(1));
        self.apply_search(&mut session, SearchAction::SetLoading(true));
        true
    }

    fn hs_belongs_to(&self, hs: &str, isic: &str) -> bool {
        self.collaborators
            .taxonomy
            .as_ref()
            .is_some_and(|cache| cache.contains_hs_under(hs, isic))
    }

    async fn search(&self) {
        // Registering under the session lock keeps lane order equal to
        // snapshot order.
        let (token, request) = {
            let mut session = self.session.lock();
            self.apply_search(&mut session, SearchAction::SetLoading(true));
            let request =
                SearchRequest::new(&session.search, &session.filters, self.settings.per_page);
            (self.coordinator.begin(), request)
        };

        let api = Arc::clone(&self.collaborators.api);
        let operation = {
            let request = request.clone();
            async move {
                let response = api.search(&request).await?;
                let statistics = if request.mode == SearchMode::Knowledge {
                    match api.statistics(&request).await {
                        Ok(statistics) => Some(statistics),
                        Err(err) if err.is_cancelled() => return Err(err),
                        Err(err) => {
                            warn!(error = %err, "statistics refresh failed; keeping previous counts");
                            None
                        }
                    }
                } else {
                    None
                };
                Ok::<_, ApiError>(Fetched {
                    response,
                    statistics,
                })
            }
        };

        let settled = match self.coordinator.race(&token, operation).await {
            Some(result) => self.settle(&token, &request, result),
            None => false,
        };
        if !settled {
            debug!(keyword = %request.keyword, page = request.page, "search superseded");
        }
    }

    /// Apply an outcome if its search is still current. Holding the session
    /// lock across the check means no search can begin and no filter can
    /// change between the check and the update.
    fn settle(
        &self,
        token: &PendingRequestToken,
        request: &SearchRequest,
        result: Result<Fetched, ApiError>,
    ) -> bool {
        let mut session = self.session.lock();
        if !self.coordinator.complete(token) {
            return false;
        }
        let mut failure = None;

        match result {
            Ok(Fetched {
                response,
                statistics,
            }) => {
                let total_pages = response.meta.total_pages(request.per_page);
                let total_items = response.total_items();
                info!(
                    keyword = %request.keyword,
                    mode = %request.mode,
                    page = request.page,
                    results = response.data.len(),
                    total_items,
                    "search completed"
                );
                session.search = search::reduce(
                    &session.search,
                    SearchAction::SetResults {
                        results: response.data,
                        total_pages,
                        total_items,
                    },
                );
                if let Some(statistics) = statistics {
                    session.search =
                        search::reduce(&session.search, SearchAction::SetStatistics(statistics));
                }
            }
            Err(err) if err.is_cancelled() => {
                self.apply_search(&mut session, SearchAction::SetLoading(false));
                return true;
            }
            Err(err) => {
                warn!(error = %err, keyword = %request.keyword, "search failed");
                failure = Some(
                    err.user_message()
                        .unwrap_or(self.settings.generic_error_message.as_str())
                        .to_string(),
                );
                session.search = search::reduce(
                    &session.search,
                    SearchAction::SetResults {
                        results: Vec::new(),
                        total_pages: 0,
                        total_items: 0,
                    },
                );
            }
        }

        self.apply_search(&mut session, SearchAction::SetLoading(false));
        let query = url_state::encode(&session.search, &session.filters);
        drop(session);

        if let Some(message) = failure {
            self.collaborators.reporter.report(&message);
        }
        self.collaborators.address_bar.replace_query(&query);
        true
    }

    fn shutdown(&self) {
        self.facet_debouncer.cancel();
        self.price_debouncer.cancel();
        self.coordinator.cancel();
    }
}

fn spawn_search(weak: &Weak<Inner>) {
    if let Some(inner) = weak.upgrade() {
        tokio::spawn(async move { inner.search().await });
    }
}

/// One active search page.
///
/// Facet changes are debounced; submitting, paging and switching modes search
/// immediately. Every search runs on a single `search` lane, so only the most
/// recently issued request can ever reach the state. Dropping the
/// orchestrator cancels pending timers and the in-flight request.
pub struct SearchOrchestrator {
    inner: Arc<Inner>,
}

impl fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.inner.session.lock();
        f.debug_struct("SearchOrchestrator")
            .field("search", &session.search)
            .field("filters", &session.filters)
            .finish()
    }
}

impl SearchOrchestrator {
    pub fn new(collaborators: Collaborators, settings: SearchSettings) -> Self {
        Self::with_state(
            collaborators,
            settings,
            SearchState::default(),
            FilterState::default(),
        )
    }

    /// Restore a session from an address-bar query string.
    pub fn from_address_bar(
        query: &str,
        collaborators: Collaborators,
        settings: SearchSettings,
    ) -> Self {
        let (search, filters) = url_state::decode(query);
        Self::with_state(collaborators, settings, search, filters)
    }

    pub fn with_state(
        collaborators: Collaborators,
        settings: SearchSettings,
        search: SearchState,
        filters: FilterState,
    ) -> Self {
        let (published, _) = watch::channel(search.clone());
        let inner = Arc::new_cyclic(|weak: &Weak<Inner>| {
            let facet = weak.clone();
            let price = weak.clone();
            Inner {
                coordinator: RequestCoordinator::new(Channel::Search),
                facet_debouncer: Debouncer::new(settings.facet_debounce, move |()| {
                    spawn_search(&facet)
                }),
                price_debouncer: Debouncer::new(settings.price_debounce, move |()| {
                    spawn_search(&price)
                }),
                session: Mutex::new(Session { search, filters }),
                published,
                collaborators,
                settings,
            }
        });
        Self { inner }
    }

    /// Apply a facet change and schedule a debounced search from page 1.
    pub fn dispatch_filter(&self, action: FilterAction) {
        if self.inner.apply_filter(action) {
            self.inner.facet_debouncer.call(());
        }
    }

    /// Numeric price bounds get their own, longer, quiet period.
    pub fn set_price_range(&self, start: Option<u32>, end: Option<u32>) {
        if self.inner.apply_filter(FilterAction::SetPriceRange { start, end }) {
            self.inner.price_debouncer.call(());
        }
    }

    pub fn reset_filters(&self) {
        self.dispatch_filter(FilterAction::Reset);
    }

    /// Update the query text without searching.
    pub fn set_query(&self, text: &str) {
        let mut session = self.inner.session.lock();
        self.inner
            .apply_search(&mut session, SearchAction::SetQuery(text.to_string()));
    }

    /// Search for the current query from page 1, right away.
    pub async fn submit(&self) {
        self.inner.facet_debouncer.cancel();
        self.inner.price_debouncer.cancel();
        {
            let mut session = self.inner.session.lock();
            self.inner.apply_search(&mut session, SearchAction::SetPage(1));
        }
        self.inner.search().await;
    }

    pub async fn go_to_page(&self, page: u32) {
        self.inner.facet_debouncer.cancel();
        self.inner.price_debouncer.cancel();
        {
            let mut session = self.inner.session.lock();
            self.inner.apply_search(&mut session, SearchAction::SetPage(page));
        }
        self.inner.search().await;
    }

    /// Switch between knowledge and insighter search. Clears the filters the
    /// new mode ignores and searches immediately; a no-op for the current mode.
    pub async fn switch_mode(&self, mode: SearchMode) {
        {
            let mut session = self.inner.session.lock();
            if session.search.mode == mode {
                return;
            }
            session.filters = filters::reduce(&session.filters, FilterAction::EnterMode(mode));
            self.inner
                .apply_search(&mut session, SearchAction::SetMode(mode));
        }
        self.inner.facet_debouncer.cancel();
        self.inner.price_debouncer.cancel();
        self.inner.search().await;
    }

    /// Search with the current state without touching the page, e.g. on
    /// first load after [`SearchOrchestrator::from_address_bar`].
    pub async fn refresh(&self) {
        self.inner.search().await;
    }

    pub fn snapshot(&self) -> (SearchState, FilterState) {
        let session = self.inner.session.lock();
        (session.search.clone(), session.filters.clone())
    }

    pub fn search_state(&self) -> SearchState {
        self.inner.session.lock().search.clone()
    }

    pub fn filters(&self) -> FilterState {
        self.inner.session.lock().filters.clone()
    }

    /// Receiver that observes every search state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.published.subscribe()
    }

    /// A debounced search is waiting for its quiet period.
    pub fn has_pending_search(&self) -> bool {
        self.inner.facet_debouncer.is_pending() || self.inner.price_debouncer.is_pending()
    }

    /// Cancel timers and the in-flight request. Also runs on drop.
    pub fn shutdown(&self) {
        self.inner.shutdown();
    }
}

impl Drop for SearchOrchestrator {
    fn drop(&mut self) {
        self.inner.shutdown();
    }
}
