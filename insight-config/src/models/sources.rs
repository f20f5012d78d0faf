use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub api: FileApiConfig,
    #[serde(default)]
    pub search: FileSearchConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Humantime string, e.g. `"30s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industries_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isic_codes_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hs_codes_path: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSearchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_debounce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_debounce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_debounce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_suggestion_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_error_message: Option<String>,
}

/// Values read from `INSIGHT_*` environment variables.
///
/// Everything stays a raw string so the loader can report which variable was
/// malformed instead of silently dropping it.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub api_timeout: Option<String>,
    pub locale: Option<String>,
    pub per_page: Option<String>,
    pub facet_debounce: Option<String>,
    pub price_debounce: Option<String>,
    pub suggestion_debounce: Option<String>,
    pub min_suggestion_chars: Option<String>,
    pub generic_error_message: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            config_path: var("INSIGHT_CONFIG").map(PathBuf::from),
            api_base_url: var("INSIGHT_API_BASE_URL"),
            api_timeout: var("INSIGHT_API_TIMEOUT"),
            locale: var("INSIGHT_LOCALE"),
            per_page: var("INSIGHT_PER_PAGE"),
            facet_debounce: var("INSIGHT_FACET_DEBOUNCE"),
            price_debounce: var("INSIGHT_PRICE_DEBOUNCE"),
            suggestion_debounce: var("INSIGHT_SUGGESTION_DEBOUNCE"),
            min_suggestion_chars: var("INSIGHT_MIN_SUGGESTION_CHARS"),
            generic_error_message: var("INSIGHT_GENERIC_ERROR_MESSAGE"),
        }
    }
}
