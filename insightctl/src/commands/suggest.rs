use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use insight_config::Config;
use insight_core::{HttpSearchApi, SuggestionEngine, Visibility};
use tokio::time::Instant;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

pub async fn run(config: &Config, args: crate::cli::SuggestArgs) -> anyhow::Result<()> {
    let api = HttpSearchApi::new(config.api.clone()).context("failed to build HTTP client")?;
    let engine = SuggestionEngine::new(Arc::new(api), &config.search);

    engine.input(&args.text);
    let deadline = Instant::now() + config.search.suggestion_debounce + config.api.timeout;
    tokio::time::sleep(config.search.suggestion_debounce + POLL_INTERVAL).await;
    while engine.snapshot().visibility == Visibility::Loading && Instant::now() < deadline {
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    let highlighted = engine.highlighted();
    if highlighted.is_empty() {
        eprintln!("no suggestions for {:?}", args.text);
        return Ok(());
    }
    for item in highlighted {
        if item.has_match() {
            println!("{}[{}]{}", item.before, item.matched, item.after);
        } else {
            println!("{}", item.before);
        }
    }
    Ok(())
}
