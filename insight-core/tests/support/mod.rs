//! Shared doubles for core integration tests.
#![allow(dead_code)]

pub mod api;
pub mod host;

use std::sync::Arc;
use std::time::Duration;

use insight_config::SearchSettings;
use insight_core::{Collaborators, TaxonomyCache};

pub use api::{FakeApi, page_of};
pub use host::{MockReporter, RecordingAddressBar};

/// Settings with short, distinct quiet periods so assertions can tell the
/// facet and price debouncers apart under paused time.
pub fn settings() -> SearchSettings {
    SearchSettings {
        per_page: 30,
        facet_debounce: Duration::from_millis(300),
        price_debounce: Duration::from_millis(1000),
        suggestion_debounce: Duration::from_millis(200),
        min_suggestion_chars: 2,
        ..SearchSettings::default()
    }
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub address_bar: Arc<RecordingAddressBar>,
    pub collaborators: Collaborators,
}

impl Harness {
    pub fn new(api: FakeApi, reporter: MockReporter) -> Self {
        Self::assemble(Arc::new(api), reporter, None)
    }

    pub fn with_taxonomy(api: FakeApi, reporter: MockReporter) -> Self {
        let api = Arc::new(api);
        let cache = Arc::new(TaxonomyCache::new(api.clone()));
        Self::assemble(api, reporter, Some(cache))
    }

    fn assemble(
        api: Arc<FakeApi>,
        reporter: MockReporter,
        taxonomy: Option<Arc<TaxonomyCache>>,
    ) -> Self {
        let address_bar = Arc::new(RecordingAddressBar::default());
        let collaborators = Collaborators {
            api: api.clone(),
            reporter: Arc::new(reporter),
            address_bar: address_bar.clone(),
            taxonomy,
        };
        Self {
            api,
            address_bar,
            collaborators,
        }
    }

    pub fn taxonomy(&self) -> Option<&Arc<TaxonomyCache>> {
        self.collaborators.taxonomy.as_ref()
    }
}

/// Reporter that must never be called.
pub fn quiet_reporter() -> MockReporter {
    let mut reporter = MockReporter::new();
    reporter.expect_report().never();
    reporter
}
