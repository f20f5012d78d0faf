use std::fmt::Debug;

use async_trait::async_trait;
use insight_model::{CategoryCount, Locale, TaxonomyKind, TaxonomyNode};

use crate::error::ApiError;
use crate::params::SearchRequest;
use crate::wire::SearchResponse;

/// Remote search service.
///
/// Implementations do not need to observe cancellation themselves: the
/// request coordinator drops the returned future when a request is
/// superseded, and discards late results either way.
#[async_trait]
pub trait SearchApi: Send + Sync + Debug {
    /// One page of knowledge items or insighters.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError>;

    /// Per-category result counts for the same filters, without pagination.
    async fn statistics(&self, request: &SearchRequest) -> Result<Vec<CategoryCount>, ApiError>;

    /// Keyword suggestions for the search box.
    async fn autocomplete(&self, keyword: &str) -> Result<Vec<String>, ApiError>;

    /// Full taxonomy tree of `kind` with names for `locale`.
    async fn fetch_taxonomy(
        &self,
        kind: TaxonomyKind,
        locale: Locale,
    ) -> Result<Vec<TaxonomyNode>, ApiError>;
}

/// Surfaces a single human-readable message to the user (a toast, a banner,
/// a line on stderr).
pub trait ErrorReporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Receives the encoded session state whenever the visible results change.
pub trait AddressBar: Send + Sync {
    fn replace_query(&self, query: &str);
}

/// Reporter that drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ErrorReporter for SilentReporter {
    fn report(&self, _message: &str) {}
}

/// Address bar for hosts without one (CLIs, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedAddressBar;

impl AddressBar for DetachedAddressBar {
    fn replace_query(&self, _query: &str) {}
}
