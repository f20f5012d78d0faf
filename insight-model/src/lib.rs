//! Core data model definitions shared across Insight crates.
//!
//! Everything here is plain data: the search session state, the facet filter
//! state, taxonomy trees and the small enums that name wire values. Behaviour
//! (reducers, codecs, orchestration) lives in `insight-core`.
#![allow(missing_docs)]

pub mod filters;
pub mod search;
pub mod taxonomy;

// Intentionally curated re-exports for downstream consumers.
pub use filters::{Accuracy, FilterState, Geography, Language, PriceMode, Role};
pub use search::{CategoryCount, ResultRecord, SearchMode, SearchState};
pub use taxonomy::{Locale, TaxonomyKind, TaxonomyNames, TaxonomyNode};

/// Parse a wire value that must be one of a fixed set of lowercase names.
pub trait ParamValue: Sized + Copy + 'static {
    /// Every variant, in declaration order.
    fn all() -> &'static [Self];

    /// The value as it appears in query strings and API parameters.
    fn as_param(&self) -> &'static str;

    /// Inverse of [`ParamValue::as_param`]; case-insensitive, trims whitespace.
    fn from_param(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::all()
            .iter()
            .copied()
            .find(|value| value.as_param().eq_ignore_ascii_case(needle))
    }
}
