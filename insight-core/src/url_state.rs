//! Address-bar persistence of the search session.
//!
//! Only non-default values are written, so a fresh session encodes to an
//! empty string. Decoding never fails: anything missing or malformed falls
//! back to its default.

use insight_model::{
    Accuracy, FilterState, Language, ParamValue, PriceMode, Role, SearchMode, SearchState,
};
use tracing::warn;
use url::form_urlencoded;

pub const KEYWORD: &str = "keyword";
pub const SEARCH_TYPE: &str = "search_type";
pub const PAGE: &str = "page";
pub const LANGUAGE: &str = "language";
pub const COUNTRY: &str = "country";
pub const REGION: &str = "region";
pub const ECONOMIC_BLOC: &str = "economic_bloc";
pub const INDUSTRY: &str = "industry";
pub const ISIC_CODE: &str = "isic_code";
pub const HS_CODE: &str = "hs_code";
pub const PAID: &str = "paid";
pub const RANGE_START: &str = "range_start";
pub const RANGE_END: &str = "range_end";
pub const ACCURACY: &str = "accuracy";
pub const ROLE: &str = "role";
pub const CATEGORY: &str = "type";

/// Query string (without the leading `?`) for the persisted part of a session.
pub fn encode(search: &SearchState, filters: &FilterState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    if !search.query.is_empty() {
        out.append_pair(KEYWORD, &search.query);
    }
    if search.mode != SearchMode::default() {
        out.append_pair(SEARCH_TYPE, search.mode.as_param());
    }
    if search.current_page > 1 {
        out.append_pair(PAGE, &search.current_page.to_string());
    }
    if filters.language != Language::default() {
        out.append_pair(LANGUAGE, filters.language.as_param());
    }

    let ids = [
        (COUNTRY, filters.country),
        (REGION, filters.region),
        (ECONOMIC_BLOC, filters.economic_bloc),
        (INDUSTRY, filters.industry_id),
    ];
    for (key, value) in ids {
        if let Some(id) = value {
            out.append_pair(key, &id.to_string());
        }
    }
    if let Some(isic) = &filters.isic_code {
        out.append_pair(ISIC_CODE, isic);
    }
    if let Some(hs) = &filters.hs_code {
        out.append_pair(HS_CODE, hs);
    }

    if let Some(paid) = filters.price_mode.paid_flag() {
        out.append_pair(PAID, if paid { "true" } else { "false" });
        if paid {
            if let Some(start) = filters.price_range_start {
                out.append_pair(RANGE_START, &start.to_string());
            }
            if let Some(end) = filters.price_range_end {
                out.append_pair(RANGE_END, &end.to_string());
            }
        }
    }

    if filters.accuracy != Accuracy::default() {
        out.append_pair(ACCURACY, filters.accuracy.as_param());
    }
    if filters.role != Role::default() {
        out.append_pair(ROLE, filters.role.as_param());
    }
    if let Some(category) = &filters.category {
        out.append_pair(CATEGORY, category);
    }

    out.finish()
}

#[derive(Debug, Default)]
struct RawParams {
    pairs: Vec<(String, String)>,
}

impl RawParams {
    fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect(),
        }
    }

    /// Last occurrence wins, matching how browsers resolve repeated keys.
    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn id(&self, key: &str) -> Option<u32> {
        let raw = self.get(key)?;
        match raw.trim().parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(param = key, value = raw, "ignoring non-numeric url parameter");
                None
            }
        }
    }

    fn choice<T: ParamValue + Default>(&self, key: &str) -> T {
        match self.get(key) {
            None => T::default(),
            Some(raw) => T::from_param(raw).unwrap_or_else(|| {
                warn!(param = key, value = raw, "ignoring unrecognised url parameter");
                T::default()
            }),
        }
    }

    fn flag(&self, key: &str) -> Option<bool> {
        let raw = self.get(key)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => {
                warn!(param = key, value = raw, "ignoring non-boolean url parameter");
                None
            }
        }
    }
}

/// Rebuild a session from an address-bar query string. A leading `?` is
/// accepted. Transient fields (loading, results, totals, statistics) come
/// back as defaults.
pub fn decode(query: &str) -> (SearchState, FilterState) {
    let params = RawParams::parse(query);

    let search = SearchState {
        query: params.get(KEYWORD).unwrap_or_default().to_string(),
        mode: params.choice(SEARCH_TYPE),
        current_page: params
            .id(PAGE)
            .filter(|page| *page >= 1)
            .unwrap_or(1),
        ..SearchState::default()
    };

    let mut filters = FilterState {
        language: params.choice(LANGUAGE),
        industry_id: params.id(INDUSTRY),
        isic_code: params.text(ISIC_CODE),
        hs_code: params.text(HS_CODE),
        price_mode: PriceMode::from_paid_flag(params.flag(PAID)),
        accuracy: params.choice(ACCURACY),
        role: params.choice(ROLE),
        category: params.text(CATEGORY),
        ..FilterState::default()
    };

    // A hand-edited URL may name several geographies; keep the first in
    // country, region, bloc order.
    if let Some(country) = params.id(COUNTRY) {
        filters.country = Some(country);
    } else if let Some(region) = params.id(REGION) {
        filters.region = Some(region);
    } else {
        filters.economic_bloc = params.id(ECONOMIC_BLOC);
    }

    match filters.price_mode {
        PriceMode::Paid => {
            filters.price_range_start = params.id(RANGE_START);
            filters.price_range_end = params.id(RANGE_END);
        }
        PriceMode::Free => filters.price_range_start = Some(0),
        PriceMode::All => {}
    }

    (search, filters)
}
