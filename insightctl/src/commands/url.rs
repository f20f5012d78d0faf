use insight_core::url_state;
use serde_json::json;

use crate::cli::UrlArgs;

/// Offline: decoding never touches the network or the configuration.
pub fn run(args: &UrlArgs) -> anyhow::Result<()> {
    let (state, facets) = url_state::decode(&args.query);
    let canonical = url_state::encode(&state, &facets);

    if args.json {
        let output = json!({
            "url": canonical,
            "keyword": state.query,
            "mode": state.mode,
            "page": state.current_page,
            "filters": facets,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{canonical}");
    }
    Ok(())
}
