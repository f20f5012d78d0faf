//! Scripted [`SearchApi`] that records every call.
//!
//! Responses are keyed by keyword so tests can make one request slower than
//! another and observe which one reaches the state. Delays use tokio time, so
//! paused-clock tests stay deterministic.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use insight_contracts::{ApiError, PageMeta, SearchApi, SearchRequest, SearchResponse};
use insight_model::{CategoryCount, Locale, TaxonomyKind, TaxonomyNode};
use parking_lot::Mutex;
use serde_json::json;

#[derive(Debug, Clone)]
struct Scripted<T> {
    delay: Duration,
    result: Result<T, ApiError>,
}

#[derive(Debug, Default)]
pub struct FakeApi {
    searches: Mutex<HashMap<String, Scripted<SearchResponse>>>,
    statistics: Mutex<Option<Result<Vec<CategoryCount>, ApiError>>>,
    suggestions: Mutex<HashMap<String, Scripted<Vec<String>>>>,
    taxonomies: Mutex<HashMap<TaxonomyKind, Result<Vec<TaxonomyNode>, ApiError>>>,

    search_calls: Mutex<Vec<SearchRequest>>,
    statistics_calls: Mutex<Vec<SearchRequest>>,
    autocomplete_calls: Mutex<Vec<String>>,
    taxonomy_calls: Mutex<Vec<(TaxonomyKind, Locale)>>,
}

/// A search page with `len` records out of `total`.
pub fn page_of(len: usize, total: u64) -> SearchResponse {
    SearchResponse {
        data: (0..len).map(|id| json!({ "id": id })).collect(),
        meta: PageMeta {
            total: Some(total),
            ..PageMeta::default()
        },
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_returns(self, keyword: &str, response: SearchResponse) -> Self {
        self.search_after(keyword, Duration::ZERO, Ok(response))
    }

    pub fn search_after(
        self,
        keyword: &str,
        delay: Duration,
        result: Result<SearchResponse, ApiError>,
    ) -> Self {
        self.searches
            .lock()
            .insert(keyword.to_string(), Scripted { delay, result });
        self
    }

    pub fn statistics_return(self, result: Result<Vec<CategoryCount>, ApiError>) -> Self {
        *self.statistics.lock() = Some(result);
        self
    }

    pub fn suggests(self, keyword: &str, delay: Duration, items: &[&str]) -> Self {
        let items = items.iter().map(|item| item.to_string()).collect();
        self.suggestions.lock().insert(
            keyword.to_string(),
            Scripted {
                delay,
                result: Ok(items),
            },
        );
        self
    }

    pub fn suggestion_fails(self, keyword: &str, error: ApiError) -> Self {
        self.suggestions.lock().insert(
            keyword.to_string(),
            Scripted {
                delay: Duration::ZERO,
                result: Err(error),
            },
        );
        self
    }

    pub fn taxonomy(self, kind: TaxonomyKind, result: Result<Vec<TaxonomyNode>, ApiError>) -> Self {
        self.taxonomies.lock().insert(kind, result);
        self
    }

    pub fn search_calls(&self) -> Vec<SearchRequest> {
        self.search_calls.lock().clone()
    }

    pub fn statistics_calls(&self) -> Vec<SearchRequest> {
        self.statistics_calls.lock().clone()
    }

    pub fn autocomplete_calls(&self) -> Vec<String> {
        self.autocomplete_calls.lock().clone()
    }

    pub fn taxonomy_calls(&self) -> Vec<(TaxonomyKind, Locale)> {
        self.taxonomy_calls.lock().clone()
    }
}

#[async_trait]
impl SearchApi for FakeApi {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        self.search_calls.lock().push(request.clone());
        let scripted = self.searches.lock().get(&request.keyword).cloned();
        match scripted {
            Some(Scripted { delay, result }) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(SearchResponse::default()),
        }
    }

    async fn statistics(&self, request: &SearchRequest) -> Result<Vec<CategoryCount>, ApiError> {
        self.statistics_calls.lock().push(request.clone());
        self.statistics.lock().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn autocomplete(&self, keyword: &str) -> Result<Vec<String>, ApiError> {
        self.autocomplete_calls.lock().push(keyword.to_string());
        let scripted = self.suggestions.lock().get(keyword).cloned();
        match scripted {
            Some(Scripted { delay, result }) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_taxonomy(
        &self,
        kind: TaxonomyKind,
        locale: Locale,
    ) -> Result<Vec<TaxonomyNode>, ApiError> {
        self.taxonomy_calls.lock().push((kind, locale));
        self.taxonomies
            .lock()
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
