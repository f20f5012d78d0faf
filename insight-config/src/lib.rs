//! Shared configuration library for Insight.
//!
//! Loads the API endpoint layout and the search-engine tuning knobs from
//! built-in defaults, an optional TOML file and `INSIGHT_*` environment
//! variables (in that order of precedence), and installs the tracing
//! subscriber for binaries.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod telemetry;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError};
pub use models::{ApiConfig, Config, EndpointPaths, SearchSettings};
pub use validation::{ConfigWarning, ConfigWarnings};
