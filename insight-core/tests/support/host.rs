//! Host-side collaborators: the toast surface and the address bar.

use insight_contracts::{AddressBar, ErrorReporter};
use mockall::mock;
use parking_lot::Mutex;

mock! {
    pub Reporter {}

    impl ErrorReporter for Reporter {
        fn report(&self, message: &str);
    }
}

/// Keeps every query string the session pushed to the address bar.
#[derive(Debug, Default)]
pub struct RecordingAddressBar {
    history: Mutex<Vec<String>>,
}

impl RecordingAddressBar {
    pub fn last(&self) -> Option<String> {
        self.history.lock().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl AddressBar for RecordingAddressBar {
    fn replace_query(&self, query: &str) {
        self.history.lock().push(query.to_string());
    }
}
