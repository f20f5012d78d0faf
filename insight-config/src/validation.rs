use thiserror::Error;

use crate::models::Config;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("search.per_page must be greater than zero")]
    ZeroPageSize,
    #[error("API base URL must use http or https, got '{scheme}'")]
    UnsupportedScheme { scheme: String },
    #[error("API base URL '{url}' cannot carry endpoint paths")]
    OpaqueBaseUrl { url: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(config: &Config) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();
    let base = &config.api.base_url;

    match base.scheme() {
        "https" => {}
        "http" => warnings.push_with_hint(
            format!("API base URL {base} is not using TLS"),
            "Point INSIGHT_API_BASE_URL at an https:// endpoint outside local development",
        ),
        other => {
            return Err(ConfigGuardRailError::UnsupportedScheme {
                scheme: other.to_string(),
            });
        }
    }

    if base.cannot_be_a_base() {
        return Err(ConfigGuardRailError::OpaqueBaseUrl {
            url: base.to_string(),
        });
    }

    if config.search.per_page == 0 {
        return Err(ConfigGuardRailError::ZeroPageSize);
    }

    if config.search.min_suggestion_chars == 0 {
        warnings.push_with_hint(
            "search.min_suggestion_chars is 0; every keystroke will query autocomplete",
            "Use at least 2 to keep autocomplete traffic reasonable",
        );
    }

    if config.search.facet_debounce.is_zero() {
        warnings.push("search.facet_debounce is 0; every facet change triggers a request");
    }

    Ok(warnings)
}
