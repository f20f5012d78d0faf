//! Search and filter orchestration for the Insight knowledge marketplace.
//!
//! The crate keeps a free-text query, a dozen interacting facet filters,
//! pagination, taxonomy pickers and the address bar consistent with each
//! other while issuing as few requests as possible:
//!
//! - [`text`]: Arabic-aware normalization and fuzzy highlighting.
//! - [`debounce`] and [`coordinator`]: quiet-period timers and
//!   last-writer-wins request lanes.
//! - [`taxonomy`]: industry/ISIC/HS tree flattening, search and caching.
//! - [`filters`] and [`search`]: pure reducers over the session state.
//! - [`url_state`]: address-bar persistence.
//! - [`suggestions`]: the autocomplete visibility machine.
//! - [`orchestrator`]: the session that wires all of the above to a
//!   [`SearchApi`](insight_contracts::SearchApi).
//! - [`client`]: the HTTP implementation of that API.
#![allow(missing_docs)]

pub mod client;
pub mod coordinator;
pub mod debounce;
pub mod filters;
pub mod orchestrator;
pub mod search;
pub mod suggestions;
pub mod taxonomy;
pub mod text;
pub mod url_state;

pub use client::HttpSearchApi;
pub use coordinator::{Channel, PendingRequestToken, RequestCoordinator};
pub use debounce::Debouncer;
pub use filters::FilterAction;
pub use orchestrator::{Collaborators, SearchOrchestrator};
pub use search::SearchAction;
pub use suggestions::{EnterOutcome, SuggestionEngine, SuggestionState, Visibility};
pub use taxonomy::{TaxonomyCache, TaxonomyError, TaxonomyIndex, TaxonomySet};
pub use text::{Highlighted, MatchSpan, fuzzy_match, highlight, normalize};
