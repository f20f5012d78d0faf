use std::sync::Arc;

use anyhow::Context;
use insight_config::Config;
use insight_core::{
    Collaborators, FilterAction, HttpSearchApi, SearchAction, SearchOrchestrator, filters,
    search as search_store, url_state,
};
use insight_model::{FilterState, SearchState};
use serde_json::json;
use tracing::debug;

use crate::cli::SearchArgs;
use crate::host::{LastQuery, StderrReporter};

/// Session to search with: the `--from-url` state with command-line flags
/// applied on top, through the same reducers the engine uses.
fn initial_state(args: &SearchArgs) -> (SearchState, FilterState) {
    let (mut state, mut facets) = args
        .from_url
        .as_deref()
        .map(url_state::decode)
        .unwrap_or_default();

    if let Some(keyword) = &args.keyword {
        state = search_store::reduce(&state, SearchAction::SetQuery(keyword.clone()));
    }
    if let Some(mode) = args.mode.filter(|mode| *mode != state.mode) {
        facets = filters::reduce(&facets, FilterAction::EnterMode(mode));
        state = search_store::reduce(&state, SearchAction::SetMode(mode));
    }
    for action in args.filter_actions() {
        facets = filters::reduce(&facets, action);
    }
    if let Some(page) = args.page {
        state = search_store::reduce(&state, SearchAction::SetPage(page));
    }

    (state, facets)
}

pub async fn run(config: &Config, args: SearchArgs) -> anyhow::Result<()> {
    let (state, facets) = initial_state(&args);
    debug!(?state, ?facets, "starting search");

    let api = HttpSearchApi::new(config.api.clone()).context("failed to build HTTP client")?;
    let reporter = Arc::new(StderrReporter::default());
    let address_bar = Arc::new(LastQuery::default());
    let session = SearchOrchestrator::with_state(
        Collaborators {
            api: Arc::new(api),
            reporter: reporter.clone(),
            address_bar: address_bar.clone(),
            taxonomy: None,
        },
        config.search.clone(),
        state,
        facets,
    );

    session.refresh().await;
    let (state, facets) = session.snapshot();
    session.shutdown();

    if args.json {
        let output = json!({
            "search": state,
            "filters": facets,
            "url": address_bar.get(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for record in &state.results {
            println!("{}", serde_json::to_string(record)?);
        }
        println!(
            "page {} of {}, {} results",
            state.current_page, state.total_pages, state.total_items
        );
        for count in &state.statistics {
            println!("  {:<16} {}", count.category, count.count);
        }
        if let Some(query) = address_bar.get().filter(|query| !query.is_empty()) {
            println!("?{query}");
        }
    }

    if reporter.reported() {
        anyhow::bail!("search failed");
    }
    Ok(())
}
