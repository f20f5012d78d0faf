pub mod sources;

use std::time::Duration;

use insight_model::{Locale, TaxonomyKind};
use url::Url;

pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PER_PAGE: u32 = 30;
pub const DEFAULT_FACET_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_PRICE_DEBOUNCE: Duration = Duration::from_millis(1000);
pub const DEFAULT_SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(200);
pub const DEFAULT_MIN_SUGGESTION_CHARS: usize = 2;
pub const DEFAULT_GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchSettings,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub locale: Locale,
    pub paths: EndpointPaths,
}

impl ApiConfig {
    /// Join an endpoint path onto the base URL, tolerating missing or
    /// duplicated slashes on either side.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        let suffix = path.trim_start_matches('/');
        url.set_path(&format!("{base_path}/{suffix}"));
        url
    }
}

/// Endpoint paths relative to [`ApiConfig::base_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPaths {
    pub search: String,
    pub statistics: String,
    pub autocomplete: String,
    pub industries: String,
    pub isic_codes: String,
    pub hs_codes: String,
}

impl EndpointPaths {
    pub fn taxonomy(&self, kind: TaxonomyKind) -> &str {
        match kind {
            TaxonomyKind::Industry => &self.industries,
            TaxonomyKind::IsicCode => &self.isic_codes,
            TaxonomyKind::HsCode => &self.hs_codes,
        }
    }
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            search: "/api/platform/search".to_string(),
            statistics: "/api/platform/search/statistics".to_string(),
            autocomplete: "/api/platform/search/autocomplete".to_string(),
            industries: "/api/platform/industries/tree".to_string(),
            isic_codes: "/api/platform/isic-codes/tree".to_string(),
            hs_codes: "/api/platform/hs-codes/tree".to_string(),
        }
    }
}

/// Search-engine tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub per_page: u32,
    /// Quiet period before a facet change triggers a search.
    pub facet_debounce: Duration,
    /// Quiet period for numeric price-range input.
    pub price_debounce: Duration,
    /// Quiet period before an autocomplete fetch.
    pub suggestion_debounce: Duration,
    /// Minimum normalized query length before suggestions are requested.
    pub min_suggestion_chars: usize,
    /// Shown for failures that carry no user-facing message of their own.
    pub generic_error_message: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            facet_debounce: DEFAULT_FACET_DEBOUNCE,
            price_debounce: DEFAULT_PRICE_DEBOUNCE,
            suggestion_debounce: DEFAULT_SUGGESTION_DEBOUNCE,
            min_suggestion_chars: DEFAULT_MIN_SUGGESTION_CHARS,
            generic_error_message: DEFAULT_GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
