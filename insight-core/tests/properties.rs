//! Invariants that must hold for every reachable filter state.

use insight_core::{FilterAction, filters, url_state};
use insight_model::{
    Accuracy, FilterState, Language, PriceMode, Role, SearchMode, SearchState,
};
use proptest::prelude::*;

fn id() -> impl Strategy<Value = Option<u32>> {
    prop::option::of(1u32..500)
}

fn code() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        "[A-Z][0-9]{2,4}",
        "[0-9]{4}(\\.[0-9]{2})?",
        Just("  ".to_string()),
    ])
}

fn action() -> impl Strategy<Value = FilterAction> {
    prop_oneof![
        prop::sample::select(vec![Language::All, Language::Arabic, Language::English])
            .prop_map(FilterAction::SetLanguage),
        id().prop_map(FilterAction::SetCountry),
        id().prop_map(FilterAction::SetRegion),
        id().prop_map(FilterAction::SetEconomicBloc),
        id().prop_map(FilterAction::SetIndustry),
        code().prop_map(FilterAction::SetIsicCode),
        code().prop_map(FilterAction::SetHsCode),
        prop::sample::select(vec![PriceMode::All, PriceMode::Free, PriceMode::Paid])
            .prop_map(FilterAction::SetPriceMode),
        (prop::option::of(0u32..5000), prop::option::of(0u32..5000))
            .prop_map(|(start, end)| FilterAction::SetPriceRange { start, end }),
        prop::sample::select(vec![Accuracy::All, Accuracy::Any])
            .prop_map(FilterAction::SetAccuracy),
        prop::sample::select(vec![Role::All, Role::Company, Role::Individual])
            .prop_map(FilterAction::SetRole),
        prop::option::of("[a-z]{3,10}").prop_map(FilterAction::SetCategory),
        prop::sample::select(vec![SearchMode::Knowledge, SearchMode::Insighter])
            .prop_map(FilterAction::EnterMode),
        Just(FilterAction::Reset),
    ]
}

fn reachable() -> impl Strategy<Value = FilterState> {
    prop::collection::vec(action(), 0..24).prop_map(|actions| {
        actions
            .into_iter()
            .fold(FilterState::default(), |state, action| filters::reduce(&state, action))
    })
}

fn session() -> impl Strategy<Value = SearchState> {
    (
        prop_oneof!["", "[a-z]{1,8}( [a-z]{1,8})?", "[\u{0621}-\u{064A}]{2,8}"],
        prop::sample::select(vec![SearchMode::Knowledge, SearchMode::Insighter]),
        1u32..200,
    )
        .prop_map(|(query, mode, current_page)| SearchState {
            query,
            mode,
            current_page,
            ..SearchState::default()
        })
}

proptest! {
    #[test]
    fn at_most_one_geography_is_ever_selected(state in reachable()) {
        prop_assert!(state.geography_count() <= 1);
    }

    #[test]
    fn price_range_only_accompanies_a_price_mode(state in reachable()) {
        match state.price_mode {
            PriceMode::All => {
                prop_assert_eq!(state.price_range_start, None);
                prop_assert_eq!(state.price_range_end, None);
            }
            PriceMode::Free => {
                prop_assert_eq!(state.price_range_start, Some(0));
                prop_assert_eq!(state.price_range_end, None);
            }
            PriceMode::Paid => {
                if let (Some(start), Some(end)) = (state.price_range_start, state.price_range_end) {
                    prop_assert!(start <= end);
                }
            }
        }
    }

    #[test]
    fn clearing_isic_always_clears_hs(state in reachable()) {
        let next = filters::reduce(&state, FilterAction::SetIsicCode(None));
        prop_assert_eq!(next.isic_code.as_deref(), None);
        prop_assert_eq!(next.hs_code.as_deref(), None);
    }

    #[test]
    fn selected_codes_are_never_blank(state in reachable()) {
        for code in [&state.isic_code, &state.hs_code, &state.category].into_iter().flatten() {
            prop_assert!(!code.trim().is_empty());
            prop_assert_eq!(code.trim(), code.as_str());
        }
    }

    #[test]
    fn insighter_mode_drops_knowledge_facets(state in reachable()) {
        let next = filters::reduce(&state, FilterAction::EnterMode(SearchMode::Insighter));
        prop_assert_eq!(next.industry_id, None);
        prop_assert_eq!(next.isic_code.as_deref(), None);
        prop_assert_eq!(next.hs_code.as_deref(), None);
        prop_assert_eq!(next.category.as_deref(), None);
        prop_assert_eq!(next.price_mode, PriceMode::All);
        prop_assert_eq!(next.geography(), state.geography());
    }

    #[test]
    fn address_bar_restores_every_reachable_session(search in session(), filter_state in reachable()) {
        let encoded = url_state::encode(&search, &filter_state);
        let (decoded_search, decoded_filters) = url_state::decode(&encoded);
        prop_assert_eq!(decoded_search, search);
        prop_assert_eq!(decoded_filters, filter_state);
    }

    #[test]
    fn decoding_arbitrary_input_yields_a_valid_state(query in ".{0,200}") {
        let (search, filters) = url_state::decode(&query);
        prop_assert!(search.current_page >= 1);
        prop_assert!(filters.geography_count() <= 1);
        if filters.price_mode != PriceMode::Paid {
            prop_assert_eq!(filters.price_range_end, None);
        }
    }
}
