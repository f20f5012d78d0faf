use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use insight_core::FilterAction;
use insight_model::{
    Accuracy, Language, Locale, ParamValue, PriceMode, Role, SearchMode, TaxonomyKind,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "insightctl", version)]
#[command(about = "Query the Insight knowledge marketplace search from a terminal")]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to insight.toml (defaults to INSIGHT_CONFIG, then ./insight.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// .env file to read before resolving INSIGHT_* variables
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one search and print the result page
    Search(SearchArgs),
    /// Show autocomplete suggestions for partial input
    Suggest(SuggestArgs),
    /// Browse the industry, ISIC and HS code trees
    Taxonomy(TaxonomyArgs),
    /// Decode an address-bar query string and print its canonical form
    Url(UrlArgs),
}

/// Accept any wire value of a [`ParamValue`] enum.
fn param<T: ParamValue>(raw: &str) -> Result<T, String> {
    T::from_param(raw).ok_or_else(|| {
        let allowed: Vec<_> = T::all().iter().map(|value| value.as_param()).collect();
        format!("expected one of: {}", allowed.join(", "))
    })
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SearchArgs {
    /// Free-text keyword
    pub keyword: Option<String>,

    /// Start from an address-bar query string, e.g. `keyword=solar&country=12`
    #[arg(long)]
    pub from_url: Option<String>,

    /// knowledge or insighter
    #[arg(long, value_parser = param::<SearchMode>)]
    pub mode: Option<SearchMode>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// all, arabic or english
    #[arg(long, value_parser = param::<Language>)]
    pub language: Option<Language>,

    #[arg(long, conflicts_with_all = ["region", "economic_bloc"])]
    pub country: Option<u32>,

    #[arg(long, conflicts_with = "economic_bloc")]
    pub region: Option<u32>,

    #[arg(long)]
    pub economic_bloc: Option<u32>,

    #[arg(long)]
    pub industry: Option<u32>,

    #[arg(long)]
    pub isic_code: Option<String>,

    #[arg(long)]
    pub hs_code: Option<String>,

    /// all, free or paid
    #[arg(long, value_parser = param::<PriceMode>)]
    pub price: Option<PriceMode>,

    /// Lower price bound; implies a paid search
    #[arg(long)]
    pub min_price: Option<u32>,

    /// Upper price bound; implies a paid search
    #[arg(long)]
    pub max_price: Option<u32>,

    /// all or any
    #[arg(long, value_parser = param::<Accuracy>)]
    pub accuracy: Option<Accuracy>,

    /// all, company or individual (insighter search only)
    #[arg(long, value_parser = param::<Role>)]
    pub role: Option<Role>,

    /// Content type facet (knowledge search only)
    #[arg(long = "type")]
    pub category: Option<String>,

    /// Print the final session as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Facet changes requested on the command line, in reducer order.
    pub fn filter_actions(&self) -> Vec<FilterAction> {
        let mut actions = Vec::new();

        if let Some(language) = self.language {
            actions.push(FilterAction::SetLanguage(language));
        }
        if let Some(country) = self.country {
            actions.push(FilterAction::SetCountry(Some(country)));
        }
        if let Some(region) = self.region {
            actions.push(FilterAction::SetRegion(Some(region)));
        }
        if let Some(bloc) = self.economic_bloc {
            actions.push(FilterAction::SetEconomicBloc(Some(bloc)));
        }
        if let Some(industry) = self.industry {
            actions.push(FilterAction::SetIndustry(Some(industry)));
        }
        if let Some(isic) = &self.isic_code {
            actions.push(FilterAction::SetIsicCode(Some(isic.clone())));
        }
        if let Some(hs) = &self.hs_code {
            actions.push(FilterAction::SetHsCode(Some(hs.clone())));
        }
        if let Some(price) = self.price {
            actions.push(FilterAction::SetPriceMode(price));
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            actions.push(FilterAction::SetPriceRange {
                start: self.min_price,
                end: self.max_price,
            });
        }
        if let Some(accuracy) = self.accuracy {
            actions.push(FilterAction::SetAccuracy(accuracy));
        }
        if let Some(role) = self.role {
            actions.push(FilterAction::SetRole(role));
        }
        if let Some(category) = &self.category {
            actions.push(FilterAction::SetCategory(Some(category.clone())));
        }

        actions
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SuggestArgs {
    /// Partial input as typed into the search box
    pub text: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Industry,
    Isic,
    Hs,
}

impl From<KindArg> for TaxonomyKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Industry => TaxonomyKind::Industry,
            KindArg::Isic => TaxonomyKind::IsicCode,
            KindArg::Hs => TaxonomyKind::HsCode,
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TaxonomyArgs {
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Filter leaves by code or name (Arabic spelling variants match)
    pub query: Option<String>,

    /// en or ar (defaults to the configured locale)
    #[arg(long, value_parser = param::<Locale>)]
    pub locale: Option<Locale>,

    /// For HS codes: list codes under this ISIC code first
    #[arg(long)]
    pub under: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct UrlArgs {
    /// Query string, with or without the leading `?`
    pub query: String,

    /// Print the decoded session as JSON
    #[arg(long)]
    pub json: bool,
}
