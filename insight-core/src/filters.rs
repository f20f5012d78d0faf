//! Facet filter transitions.
//!
//! [`reduce`] is total and pure: every action produces a valid state and the
//! invariants between facets (disjoint geography, HS scoped under ISIC,
//! price range only when paid) are enforced here rather than by callers.

use insight_model::{Accuracy, FilterState, Language, PriceMode, Role, SearchMode};
use serde::{Deserialize, Serialize};

/// A user intent against the facet filters.
///
/// Serialized adjacently tagged (`{"type": "SET_COUNTRY", "payload": 3}`) so
/// host bridges can forward actions as JSON. Unrecognized types decode to
/// [`FilterAction::Unknown`], which leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterAction {
    SetLanguage(Language),
    SetCountry(Option<u32>),
    SetRegion(Option<u32>),
    SetEconomicBloc(Option<u32>),
    SetIndustry(Option<u32>),
    SetIsicCode(Option<String>),
    SetHsCode(Option<String>),
    SetPriceMode(PriceMode),
    SetPriceRange {
        start: Option<u32>,
        end: Option<u32>,
    },
    SetAccuracy(Accuracy),
    SetRole(Role),
    SetCategory(Option<String>),
    /// Drop the filters that mean nothing in the mode being entered.
    EnterMode(SearchMode),
    Reset,
    #[serde(other)]
    Unknown,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|code| !code.is_empty())
}

pub fn reduce(state: &FilterState, action: FilterAction) -> FilterState {
    let mut next = state.clone();

    match action {
        FilterAction::SetLanguage(language) => next.language = language,

        // Selecting one geography clears the other two. Clearing one leaves
        // the others alone; they are already empty for reachable states.
        FilterAction::SetCountry(country) => {
            next.country = country;
            if country.is_some() {
                next.region = None;
                next.economic_bloc = None;
            }
        }
        FilterAction::SetRegion(region) => {
            next.region = region;
            if region.is_some() {
                next.country = None;
                next.economic_bloc = None;
            }
        }
        FilterAction::SetEconomicBloc(bloc) => {
            next.economic_bloc = bloc;
            if bloc.is_some() {
                next.country = None;
                next.region = None;
            }
        }

        FilterAction::SetIndustry(industry) => next.industry_id = industry,

        // A new ISIC code keeps the HS code; the orchestrator revalidates it
        // against the taxonomy before dispatching.
        FilterAction::SetIsicCode(code) => {
            next.isic_code = non_blank(code);
            if next.isic_code.is_none() {
                next.hs_code = None;
            }
        }
        FilterAction::SetHsCode(code) => next.hs_code = non_blank(code),

        FilterAction::SetPriceMode(mode) => {
            next.price_mode = mode;
            match mode {
                PriceMode::Free => {
                    next.price_range_start = Some(0);
                    next.price_range_end = None;
                }
                PriceMode::All => {
                    next.price_range_start = None;
                    next.price_range_end = None;
                }
                PriceMode::Paid => {}
            }
        }
        FilterAction::SetPriceRange { start, end } => {
            let (start, end) = match (start, end) {
                (Some(low), Some(high)) if low > high => (Some(high), Some(low)),
                bounds => bounds,
            };
            next.price_mode = PriceMode::Paid;
            next.price_range_start = start;
            next.price_range_end = end;
        }

        FilterAction::SetAccuracy(accuracy) => next.accuracy = accuracy,
        FilterAction::SetRole(role) => next.role = role,
        FilterAction::SetCategory(category) => next.category = non_blank(category),

        FilterAction::EnterMode(SearchMode::Insighter) => {
            next.industry_id = None;
            next.isic_code = None;
            next.hs_code = None;
            next.category = None;
            next.price_mode = PriceMode::All;
            next.price_range_start = None;
            next.price_range_end = None;
        }
        FilterAction::EnterMode(SearchMode::Knowledge) => {
            next.accuracy = Accuracy::default();
            next.role = Role::default();
        }

        FilterAction::Reset => next = FilterState::default(),
        FilterAction::Unknown => {}
    }

    next
}
