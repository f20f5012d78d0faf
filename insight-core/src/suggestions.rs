//! Autocomplete for the search box.
//!
//! Keystrokes are debounced into fetches on the `suggestions` lane, which is
//! independent of the main search lane. A small visibility machine decides
//! whether a resolved fetch may still be shown:
//!
//! ```text
//! Hidden --(>= min chars, debounced)--> Loading --(items, focused, not accepted)--> Visible
//!                                          \--(empty or failed)--> Hidden
//! Visible --(escape / click outside / accept)--> ForceHidden --(keystroke)--> Hidden
//! ```

use std::{
    fmt,
    sync::{Arc, Weak},
    time::Duration,
};

use insight_config::SearchSettings;
use insight_contracts::SearchApi;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::{
    coordinator::{Channel, RequestCoordinator},
    debounce::Debouncer,
    text::{Highlighted, highlight, normalize},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Loading,
    Visible,
    /// Dismissed by the user; the current result set stays hidden until the
    /// next keystroke.
    ForceHidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestionState {
    pub items: Vec<String>,
    pub visibility: Visibility,
    /// Keyboard highlight; `None` means nothing is highlighted.
    pub active_index: Option<usize>,
}

/// What pressing Enter in the search box should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterOutcome {
    /// A highlighted suggestion was accepted; search for it.
    Accept(String),
    /// Nothing highlighted; search for the raw input.
    Submit(String),
}

#[derive(Debug, Default)]
struct Session {
    query: String,
    state: SuggestionState,
    focused: bool,
    /// Bumped on every acceptance so fetches that started earlier can tell.
    accepted: u64,
}

impl Session {
    fn hide(&mut self, visibility: Visibility) {
        self.state = SuggestionState {
            visibility,
            ..SuggestionState::default()
        };
    }
}

struct Inner {
    api: Arc<dyn SearchApi>,
    coordinator: RequestCoordinator,
    debouncer: Debouncer<String>,
    session: Mutex<Session>,
    min_chars: usize,
}

impl Inner {
    fn halt(&self) {
        self.debouncer.cancel();
        self.coordinator.cancel();
    }

    /// Debounce elapsed for `query`.
    fn begin_fetch(self: &Arc<Self>, query: String) {
        let generation = {
            let mut session = self.session.lock();
            if !session.focused {
                return;
            }
            session.state.visibility = Visibility::Loading;
            session.state.active_index = None;
            session.accepted
        };

        let inner = Arc::clone(self);
        tokio::spawn(async move { inner.fetch(query, generation).await });
    }

    async fn fetch(&self, query: String, generation: u64) {
        let api = Arc::clone(&self.api);
        let keyword = query.trim().to_string();
        debug!(%keyword, "fetching suggestions");

        self.coordinator
            .run(async move { api.autocomplete(&keyword).await }, |result| {
                let mut session = self.session.lock();
                if session.accepted != generation
                    || !session.focused
                    || session.state.visibility != Visibility::Loading
                {
                    debug!(%query, "suggestions arrived after the session moved on");
                    return;
                }
                match result {
                    Ok(items) if !items.is_empty() => {
                        session.state = SuggestionState {
                            items,
                            visibility: Visibility::Visible,
                            active_index: None,
                        };
                    }
                    Ok(_) => session.hide(Visibility::Hidden),
                    Err(err) => {
                        if !err.is_cancelled() {
                            warn!(error = %err, "autocomplete failed");
                        }
                        session.hide(Visibility::Hidden);
                    }
                }
            })
            .await;
    }
}

/// Autocomplete state for one search box.
pub struct SuggestionEngine {
    inner: Arc<Inner>,
}

impl fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.inner.session.lock();
        f.debug_struct("SuggestionEngine")
            .field("query", &session.query)
            .field("state", &session.state)
            .field("focused", &session.focused)
            .finish()
    }
}

impl SuggestionEngine {
    pub fn new(api: Arc<dyn SearchApi>, settings: &SearchSettings) -> Self {
        Self::with_options(api, settings.suggestion_debounce, settings.min_suggestion_chars)
    }

    pub fn with_options(api: Arc<dyn SearchApi>, delay: Duration, min_chars: usize) -> Self {
        let inner = Arc::new_cyclic(|weak: &Weak<Inner>| {
            let weak = weak.clone();
            Inner {
                api,
                coordinator: RequestCoordinator::new(Channel::Suggestions),
                debouncer: Debouncer::new(delay, move |query: String| {
                    if let Some(inner) = weak.upgrade() {
                        inner.begin_fetch(query);
                    }
                }),
                session: Mutex::new(Session::default()),
                min_chars,
            }
        });
        Self { inner }
    }

    /// The input text changed. Gains focus if it did not have it.
    pub fn input(&self, text: &str) {
        let long_enough = normalize(text).chars().count() >= self.inner.min_chars.max(1);
        {
            let mut session = self.inner.session.lock();
            session.focused = true;
            session.query = text.to_string();
            if !long_enough {
                session.hide(Visibility::Hidden);
            } else if session.state.visibility == Visibility::ForceHidden {
                session.state.visibility = Visibility::Hidden;
            }
        }

        if long_enough {
            self.inner.debouncer.call(text.to_string());
        } else {
            self.inner.halt();
        }
    }

    /// Escape pressed or a click outside the panel.
    pub fn dismiss(&self) {
        self.inner.session.lock().hide(Visibility::ForceHidden);
        self.inner.halt();
    }

    /// The input lost focus with no selection pending: end the session.
    pub fn blur(&self) {
        {
            let mut session = self.inner.session.lock();
            session.focused = false;
            session.hide(Visibility::Hidden);
        }
        self.inner.halt();
    }

    pub fn move_down(&self) {
        let mut session = self.inner.session.lock();
        let state = &mut session.state;
        if state.visibility != Visibility::Visible || state.items.is_empty() {
            return;
        }
        let last = state.items.len() - 1;
        state.active_index = Some(state.active_index.map_or(0, |index| (index + 1).min(last)));
    }

    pub fn move_up(&self) {
        let mut session = self.inner.session.lock();
        let state = &mut session.state;
        if state.visibility != Visibility::Visible {
            return;
        }
        state.active_index = match state.active_index {
            None | Some(0) => None,
            Some(index) => Some(index - 1),
        };
    }

    /// Accept the highlighted suggestion, or submit the raw query.
    pub fn enter(&self) -> EnterOutcome {
        let (active, query) = {
            let session = self.inner.session.lock();
            let active = (session.state.visibility == Visibility::Visible)
                .then_some(session.state.active_index)
                .flatten();
            (active, session.query.clone())
        };

        if let Some(accepted) = active.and_then(|index| self.accept(index)) {
            return EnterOutcome::Accept(accepted);
        }

        self.inner.session.lock().hide(Visibility::ForceHidden);
        self.inner.halt();
        EnterOutcome::Submit(query)
    }

    /// Accept suggestion `index`: hides the panel, clears the input and ends
    /// the session. `None` when there is no such suggestion.
    pub fn accept(&self, index: usize) -> Option<String> {
        let accepted = {
            let mut session = self.inner.session.lock();
            let accepted = session.state.items.get(index).cloned()?;
            session.accepted += 1;
            session.query.clear();
            session.focused = false;
            session.hide(Visibility::ForceHidden);
            accepted
        };
        self.inner.halt();
        Some(accepted)
    }

    pub fn snapshot(&self) -> SuggestionState {
        self.inner.session.lock().state.clone()
    }

    pub fn query(&self) -> String {
        self.inner.session.lock().query.clone()
    }

    pub fn is_focused(&self) -> bool {
        self.inner.session.lock().focused
    }

    /// Current items split around the span matching the typed query.
    pub fn highlighted(&self) -> Vec<Highlighted> {
        let session = self.inner.session.lock();
        session
            .state
            .items
            .iter()
            .map(|item| highlight(item, &session.query))
            .collect()
    }
}

impl Drop for SuggestionEngine {
    fn drop(&mut self) {
        self.inner.halt();
    }
}
