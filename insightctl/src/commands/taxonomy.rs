use std::sync::Arc;

use anyhow::Context;
use insight_config::Config;
use insight_core::{HttpSearchApi, TaxonomyCache, taxonomy::partition_by_parent};
use insight_model::{Locale, TaxonomyKind, TaxonomyNode};

use crate::cli::TaxonomyArgs;

fn print_leaf(leaf: &TaxonomyNode, locale: Locale) {
    println!("{:<12} {}", leaf.code, leaf.display_name(locale));
}

pub async fn run(config: &Config, args: TaxonomyArgs) -> anyhow::Result<()> {
    let api = HttpSearchApi::new(config.api.clone()).context("failed to build HTTP client")?;
    let cache = TaxonomyCache::new(Arc::new(api));
    let locale = args.locale.unwrap_or(config.api.locale);
    let kind = TaxonomyKind::from(args.kind);

    let set = cache.initialize(locale).await;
    if let Some(err) = set.errors().iter().find(|err| err.kind() == kind) {
        return Err(err.clone()).with_context(|| format!("{kind} tree unavailable"));
    }

    let matches = set.index(kind).search(args.query.as_deref().unwrap_or(""));
    match (kind, args.under.as_deref()) {
        (TaxonomyKind::HsCode, Some(isic)) => {
            let (related, other) = partition_by_parent(matches, Some(isic));
            for leaf in &related {
                print_leaf(leaf, locale);
            }
            if !related.is_empty() && !other.is_empty() {
                println!("--");
            }
            for leaf in &other {
                print_leaf(leaf, locale);
            }
        }
        _ => {
            for leaf in matches {
                print_leaf(leaf, locale);
            }
        }
    }
    Ok(())
}
