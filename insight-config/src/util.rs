use std::time::Duration;

use insight_model::{Locale, ParamValue};

use crate::loader::error::ConfigLoadError;

/// Parse a humantime duration such as `"300ms"` or `"1s"`.
pub fn parse_duration(field: &'static str, raw: &str) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw.trim()).map_err(|source| ConfigLoadError::InvalidDuration {
        field,
        value: raw.to_string(),
        source,
    })
}

pub fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    raw: &str,
) -> Result<T, ConfigLoadError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigLoadError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

pub fn parse_locale(raw: &str) -> Result<Locale, ConfigLoadError> {
    Locale::from_param(raw).ok_or_else(|| ConfigLoadError::InvalidLocale {
        value: raw.to_string(),
    })
}
