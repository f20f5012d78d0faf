//! Translation of session state into remote API query parameters.

use insight_model::{FilterState, Language, ParamValue, Role, SearchMode, SearchState};

/// Page size used when configuration does not override it.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Everything needed to issue one search (and its statistics companion).
///
/// Owned so it can move into a spawned request future.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keyword: String,
    pub mode: SearchMode,
    pub page: u32,
    pub per_page: u32,
    pub filters: FilterState,
}

impl SearchRequest {
    pub fn new(search: &SearchState, filters: &FilterState, per_page: u32) -> Self {
        Self {
            keyword: search.query.trim().to_string(),
            mode: search.mode,
            page: search.current_page.max(1),
            per_page: per_page.max(1),
            filters: filters.clone(),
        }
    }

    /// Parameters for the paginated search endpoint.
    pub fn search_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("keyword", self.keyword.clone()),
            ("search_type", self.mode.as_param().to_string()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        self.push_filters(&mut params);
        if self.mode == SearchMode::Knowledge
            && let Some(category) = &self.filters.category
        {
            params.push(("type", category.clone()));
        }
        params
    }

    /// Parameters for the statistics endpoint: the same filters, without
    /// pagination and without the category facet being counted.
    pub fn statistics_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("keyword", self.keyword.clone()),
            ("search_type", self.mode.as_param().to_string()),
        ];
        self.push_filters(&mut params);
        params
    }

    fn push_filters(&self, params: &mut Vec<(&'static str, String)>) {
        let filters = &self.filters;

        params.push(("accuracy", filters.accuracy.as_param().to_string()));

        if filters.language != Language::All {
            params.push(("language", filters.language.as_param().to_string()));
        }
        if let Some(country) = filters.country {
            params.push(("country", country.to_string()));
        }
        if let Some(region) = filters.region {
            params.push(("region", region.to_string()));
        }
        if let Some(bloc) = filters.economic_bloc {
            params.push(("economic_bloc", bloc.to_string()));
        }
        if let Some(industry) = filters.industry_id {
            params.push(("industry", industry.to_string()));
        }
        if let Some(isic) = &filters.isic_code {
            params.push(("isic_code", isic.clone()));
        }
        if let Some(hs) = &filters.hs_code {
            params.push(("hs_code", hs.clone()));
        }
        if let Some(paid) = filters.price_mode.paid_flag() {
            params.push(("paid", paid.to_string()));
            if paid {
                if let Some(start) = filters.price_range_start {
                    params.push(("range_start", start.to_string()));
                }
                if let Some(end) = filters.price_range_end {
                    params.push(("range_end", end.to_string()));
                }
            }
        }
        if self.mode == SearchMode::Insighter && filters.role != Role::All {
            params.push(("role", filters.role.as_param().to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_model::PriceMode;

    fn value<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn search_query_carries_required_parameters() {
        let search = SearchState {
            query: "  solar ".into(),
            ..SearchState::default()
        };
        let request = SearchRequest::new(&search, &FilterState::default(), DEFAULT_PER_PAGE);
        let params = request.search_query();

        assert_eq!(value(&params, "keyword"), Some("solar"));
        assert_eq!(value(&params, "search_type"), Some("knowledge"));
        assert_eq!(value(&params, "page"), Some("1"));
        assert_eq!(value(&params, "per_page"), Some("30"));
        assert_eq!(value(&params, "language"), None);
        assert_eq!(value(&params, "paid"), None);
        assert_eq!(value(&params, "role"), None);
    }

    #[test]
    fn empty_keyword_is_still_sent() {
        let request =
            SearchRequest::new(&SearchState::default(), &FilterState::default(), 30);
        assert_eq!(value(&request.search_query(), "keyword"), Some(""));
    }

    #[test]
    fn category_only_in_knowledge_search() {
        let filters = FilterState {
            category: Some("report".into()),
            role: Role::Company,
            ..FilterState::default()
        };
        let knowledge = SearchRequest::new(&SearchState::default(), &filters, 30);
        assert_eq!(value(&knowledge.search_query(), "type"), Some("report"));
        assert_eq!(value(&knowledge.search_query(), "role"), None);
        assert_eq!(value(&knowledge.statistics_query(), "type"), None);

        let insighter_state = SearchState {
            mode: SearchMode::Insighter,
            ..SearchState::default()
        };
        let insighter = SearchRequest::new(&insighter_state, &filters, 30);
        assert_eq!(value(&insighter.search_query(), "type"), None);
        assert_eq!(value(&insighter.search_query(), "role"), Some("company"));
    }

    #[test]
    fn statistics_query_has_no_pagination() {
        let filters = FilterState {
            country: Some(12),
            price_mode: PriceMode::Paid,
            price_range_start: Some(10),
            price_range_end: Some(99),
            ..FilterState::default()
        };
        let state = SearchState {
            current_page: 4,
            ..SearchState::default()
        };
        let params = SearchRequest::new(&state, &filters, 30).statistics_query();
        assert_eq!(value(&params, "page"), None);
        assert_eq!(value(&params, "per_page"), None);
        assert_eq!(value(&params, "country"), Some("12"));
        assert_eq!(value(&params, "paid"), Some("true"));
        assert_eq!(value(&params, "range_start"), Some("10"));
        assert_eq!(value(&params, "range_end"), Some("99"));
    }

    #[test]
    fn free_price_sends_paid_false_without_range() {
        let filters = FilterState {
            price_mode: PriceMode::Free,
            price_range_start: Some(0),
            ..FilterState::default()
        };
        let params = SearchRequest::new(&SearchState::default(), &filters, 30).search_query();
        assert_eq!(value(&params, "paid"), Some("false"));
        assert_eq!(value(&params, "range_start"), None);
    }
}
