//! JSON payloads returned by the remote endpoints.

use insight_model::{CategoryCount, ResultRecord, TaxonomyNode};
use serde::{Deserialize, Serialize};

/// Pagination block of a search response. Every field is optional on the
/// wire; missing values fall back to what the request asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PageMeta {
    /// Page count derived from `total` and the effective page size, falling
    /// back to the server's `last_page` when no total was reported.
    pub fn total_pages(&self, requested_per_page: u32) -> u32 {
        let per_page = u64::from(self.per_page.unwrap_or(requested_per_page).max(1));
        match self.total {
            Some(total) => u32::try_from(total.div_ceil(per_page)).unwrap_or(u32::MAX),
            None => self.last_page.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<ResultRecord>,
    #[serde(default)]
    pub meta: PageMeta,
}

impl SearchResponse {
    pub fn total_items(&self) -> u64 {
        self.meta.total.unwrap_or(self.data.len() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatisticsResponse {
    #[serde(default)]
    pub data: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AutocompleteData {
    #[serde(rename = "searchKeywords", default)]
    pub search_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub data: AutocompleteData,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxonomyResponse {
    #[serde(default)]
    pub data: Vec<TaxonomyNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let meta = PageMeta {
            total: Some(45),
            ..PageMeta::default()
        };
        assert_eq!(meta.total_pages(30), 2);

        let exact = PageMeta {
            total: Some(60),
            per_page: Some(30),
            ..PageMeta::default()
        };
        assert_eq!(exact.total_pages(10), 2);
    }

    #[test]
    fn total_pages_falls_back_to_last_page() {
        let meta = PageMeta {
            last_page: Some(7),
            ..PageMeta::default()
        };
        assert_eq!(meta.total_pages(30), 7);
        assert_eq!(PageMeta::default().total_pages(30), 0);
    }

    #[test]
    fn decodes_search_payload() {
        let payload = r#"{
            "data": [{"id": 1, "title": "Solar atlas"}, {"id": 2}],
            "meta": {"current_page": 1, "last_page": 2, "total": 45, "path": "/search"}
        }"#;
        let response: SearchResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.total_items(), 45);
        assert_eq!(response.meta.total_pages(30), 2);
    }

    #[test]
    fn decodes_autocomplete_and_statistics() {
        let suggestions: AutocompleteResponse =
            serde_json::from_str(r#"{"data":{"searchKeywords":["solar","solar panels"]}}"#)
                .unwrap();
        assert_eq!(suggestions.data.search_keywords, vec!["solar", "solar panels"]);

        let stats: StatisticsResponse =
            serde_json::from_str(r#"{"data":[{"type":"report","count":12},{"type":"data","count":0}]}"#)
                .unwrap();
        assert_eq!(stats.data[0], CategoryCount::new("report", 12));
    }
}
