use crate::ParamValue;

/// Content language facet. `All` is never sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Language {
    #[default]
    All,
    Arabic,
    English,
}

impl ParamValue for Language {
    fn all() -> &'static [Self] {
        &[Language::All, Language::Arabic, Language::English]
    }

    fn as_param(&self) -> &'static str {
        match self {
            Language::All => "all",
            Language::Arabic => "arabic",
            Language::English => "english",
        }
    }
}

/// Price facet. A price range is only meaningful for `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PriceMode {
    #[default]
    All,
    Free,
    Paid,
}

impl PriceMode {
    /// Value of the `paid` parameter, `None` when the facet is unset.
    pub fn paid_flag(&self) -> Option<bool> {
        match self {
            PriceMode::All => None,
            PriceMode::Free => Some(false),
            PriceMode::Paid => Some(true),
        }
    }

    pub fn from_paid_flag(flag: Option<bool>) -> Self {
        match flag {
            None => PriceMode::All,
            Some(false) => PriceMode::Free,
            Some(true) => PriceMode::Paid,
        }
    }
}

impl ParamValue for PriceMode {
    fn all() -> &'static [Self] {
        &[PriceMode::All, PriceMode::Free, PriceMode::Paid]
    }

    fn as_param(&self) -> &'static str {
        match self {
            PriceMode::All => "all",
            PriceMode::Free => "free",
            PriceMode::Paid => "paid",
        }
    }
}

/// Whether every query word (`All`) or any query word (`Any`) must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Accuracy {
    All,
    #[default]
    Any,
}

impl ParamValue for Accuracy {
    fn all() -> &'static [Self] {
        &[Accuracy::All, Accuracy::Any]
    }

    fn as_param(&self) -> &'static str {
        match self {
            Accuracy::All => "all",
            Accuracy::Any => "any",
        }
    }
}

/// Insighter role facet, only relevant in insighter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    #[default]
    All,
    Company,
    Individual,
}

impl ParamValue for Role {
    fn all() -> &'static [Self] {
        &[Role::All, Role::Company, Role::Individual]
    }

    fn as_param(&self) -> &'static str {
        match self {
            Role::All => "all",
            Role::Company => "company",
            Role::Individual => "individual",
        }
    }
}

/// The geography facet is a disjoint union: at most one of country, region
/// or economic bloc is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Geography {
    Country(u32),
    Region(u32),
    EconomicBloc(u32),
}

/// Facet filter values for one search session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterState {
    pub language: Language,
    pub country: Option<u32>,
    pub region: Option<u32>,
    pub economic_bloc: Option<u32>,
    pub industry_id: Option<u32>,
    pub isic_code: Option<String>,
    /// Scoped beneath `isic_code`.
    pub hs_code: Option<String>,
    pub price_mode: PriceMode,
    pub price_range_start: Option<u32>,
    pub price_range_end: Option<u32>,
    pub accuracy: Accuracy,
    pub role: Role,
    /// Content-type facet, knowledge mode only.
    pub category: Option<String>,
}

impl FilterState {
    pub fn geography(&self) -> Option<Geography> {
        match (self.country, self.region, self.economic_bloc) {
            (Some(id), _, _) => Some(Geography::Country(id)),
            (None, Some(id), _) => Some(Geography::Region(id)),
            (None, None, Some(id)) => Some(Geography::EconomicBloc(id)),
            (None, None, None) => None,
        }
    }

    /// Number of geography fields currently set. Always 0 or 1 for states
    /// produced by the filter reducer.
    pub fn geography_count(&self) -> usize {
        [self.country, self.region, self.economic_bloc]
            .iter()
            .filter(|value| value.is_some())
            .count()
    }

    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}
