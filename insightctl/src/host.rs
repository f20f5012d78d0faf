//! Terminal stand-ins for the collaborators a browser host would provide.

use std::sync::atomic::{AtomicBool, Ordering};

use insight_contracts::{AddressBar, ErrorReporter};
use parking_lot::Mutex;

/// Prints user-facing failures to stderr and remembers that one happened.
#[derive(Debug, Default)]
pub struct StderrReporter {
    reported: AtomicBool,
}

impl StderrReporter {
    pub fn reported(&self) -> bool {
        self.reported.load(Ordering::Relaxed)
    }
}

impl ErrorReporter for StderrReporter {
    fn report(&self, message: &str) {
        self.reported.store(true, Ordering::Relaxed);
        eprintln!("error: {message}");
    }
}

/// Keeps the most recent query string instead of a browser location.
#[derive(Debug, Default)]
pub struct LastQuery {
    query: Mutex<Option<String>>,
}

impl LastQuery {
    pub fn get(&self) -> Option<String> {
        self.query.lock().clone()
    }
}

impl AddressBar for LastQuery {
    fn replace_query(&self, query: &str) {
        *self.query.lock() = Some(query.to_string());
    }
}
