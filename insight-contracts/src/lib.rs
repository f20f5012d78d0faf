//! Boundary contracts for the search engine.
//!
//! The engine talks to three collaborators it does not own: the remote search
//! API, whatever surfaces error toasts, and the browser address bar. Their
//! trait surfaces live here together with the wire payloads, so hosts and test
//! doubles can implement them without depending on the engine itself.
#![allow(missing_docs)]

pub mod api;
pub mod error;
pub mod params;
pub mod wire;

pub use api::{AddressBar, DetachedAddressBar, ErrorReporter, SearchApi, SilentReporter};
pub use error::{ApiError, ValidationErrorBody};
pub use params::{DEFAULT_PER_PAGE, SearchRequest};
pub use wire::{
    AutocompleteData, AutocompleteResponse, PageMeta, SearchResponse, StatisticsResponse,
    TaxonomyResponse,
};
