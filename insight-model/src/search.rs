use std::fmt;

use crate::ParamValue;

/// A single search result. The search API owns the shape; the engine only
/// stores and forwards these records in server order.
pub type ResultRecord = serde_json::Value;

/// Which result shape the remote search returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SearchMode {
    /// Knowledge items (reports, data sets, courses, ...).
    #[default]
    Knowledge,
    /// Insighters, i.e. the companies and individuals publishing knowledge.
    Insighter,
}

impl ParamValue for SearchMode {
    fn all() -> &'static [Self] {
        &[SearchMode::Knowledge, SearchMode::Insighter]
    }

    fn as_param(&self) -> &'static str {
        match self {
            SearchMode::Knowledge => "knowledge",
            SearchMode::Insighter => "insighter",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Result count for one content category, shown as a badge next to the
/// category facet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryCount {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub category: String,
    pub count: u64,
}

impl CategoryCount {
    pub fn new(category: impl Into<String>, count: u64) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// Query text, mode, pagination and the currently displayed result page.
///
/// Only the search orchestrator mutates this, through the search reducer.
/// Rendering code reads snapshots.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    pub query: String,
    pub mode: SearchMode,
    pub loading: bool,
    pub results: Vec<ResultRecord>,
    /// 1-based.
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub statistics: Vec<CategoryCount>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            mode: SearchMode::Knowledge,
            loading: false,
            results: Vec::new(),
            current_page: 1,
            total_pages: 0,
            total_items: 0,
            statistics: Vec::new(),
        }
    }
}

impl SearchState {
    /// Count reported for `category`, zero when the category is absent.
    pub fn count_for(&self, category: &str) -> u64 {
        self.statistics
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}
