//! Search session transitions.

use insight_model::{CategoryCount, ResultRecord, SearchMode, SearchState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchAction {
    SetQuery(String),
    /// Also returns to page 1 and clears everything shown for the old mode.
    SetMode(SearchMode),
    SetLoading(bool),
    SetResults {
        results: Vec<ResultRecord>,
        total_pages: u32,
        total_items: u64,
    },
    SetPage(u32),
    SetStatistics(Vec<CategoryCount>),
    #[serde(other)]
    Unknown,
}

pub fn reduce(state: &SearchState, action: SearchAction) -> SearchState {
    let mut next = state.clone();

    match action {
        SearchAction::SetQuery(query) => next.query = query,
        SearchAction::SetMode(mode) => {
            next.mode = mode;
            next.current_page = 1;
            next.results.clear();
            next.statistics.clear();
            next.total_pages = 0;
            next.total_items = 0;
        }
        SearchAction::SetLoading(loading) => next.loading = loading,
        SearchAction::SetResults {
            results,
            total_pages,
            total_items,
        } => {
            next.results = results;
            next.total_pages = total_pages;
            next.total_items = total_items;
        }
        SearchAction::SetPage(page) => next.current_page = page.max(1),
        SearchAction::SetStatistics(statistics) => next.statistics = statistics,
        SearchAction::Unknown => {}
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn switching_mode_discards_stale_results() {
        let state = SearchState {
            query: "solar".into(),
            current_page: 3,
            results: vec![json!({"id": 1})],
            total_pages: 4,
            total_items: 100,
            statistics: vec![CategoryCount::new("report", 12)],
            ..SearchState::default()
        };
        let next = reduce(&state, SearchAction::SetMode(SearchMode::Insighter));
        assert_eq!(next.mode, SearchMode::Insighter);
        assert_eq!(next.current_page, 1);
        assert!(next.results.is_empty());
        assert!(next.statistics.is_empty());
        assert_eq!(next.total_items, 0);
        assert_eq!(next.query, "solar");
    }

    #[test]
    fn results_and_paging() {
        let state = reduce(
            &SearchState::default(),
            SearchAction::SetResults {
                results: vec![json!({"id": 1}), json!({"id": 2})],
                total_pages: 2,
                total_items: 45,
            },
        );
        assert_eq!(state.results.len(), 2);
        assert_eq!(state.total_pages, 2);

        assert_eq!(reduce(&state, SearchAction::SetPage(0)).current_page, 1);
        assert_eq!(reduce(&state, SearchAction::SetPage(2)).current_page, 2);
        assert_eq!(reduce(&state, SearchAction::Unknown), state);
    }

    #[test]
    fn actions_decode_from_tagged_json() {
        let action: SearchAction =
            serde_json::from_str(r#"{"type":"SET_QUERY","payload":"solar"}"#).unwrap();
        assert_eq!(action, SearchAction::SetQuery("solar".into()));
        let action: SearchAction =
            serde_json::from_str(r#"{"type":"SET_MODE","payload":"insighter"}"#).unwrap();
        assert_eq!(action, SearchAction::SetMode(SearchMode::Insighter));
    }
}
