pub mod error;

use std::{fs, path::PathBuf, time::Duration};

use tracing::debug;
use url::Url;

use self::error::ConfigLoadError;
use crate::{
    models::{
        ApiConfig, Config, DEFAULT_API_TIMEOUT, EndpointPaths, SearchSettings,
        sources::{EnvConfig, FileApiConfig, FileConfig, FileSearchConfig},
    },
    util::{parse_duration, parse_locale, parse_number},
    validation::{self, ConfigWarnings},
};

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = ["insight.toml", "config/insight.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
    env: Option<EnvConfig>,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options, env: None }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Use a fixed environment snapshot instead of the process environment.
    /// No `.env` file is read in this mode.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env = match &self.env {
            Some(env) => env.clone(),
            None => {
                let loaded = self.load_env_file()?;
                if loaded {
                    debug!("loaded .env file");
                }
                EnvConfig::gather()
            }
        };

        let (file, config_present) = self.load_file_config(&env)?;
        let config = compose_config(file.unwrap_or_default(), env)?;
        let mut warnings = ConfigWarnings::default();

        if !config_present {
            warnings.push_with_hint(
                "No insight.toml detected; using defaults and environment variables",
                "Pass --config or set INSIGHT_CONFIG to tune endpoints and debounce windows",
            );
        }

        let guard_rail_warnings = validation::apply_guard_rails(&config)?;
        warnings.extend(guard_rail_warnings);

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let result = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };
        match result {
            Ok(()) => Ok(true),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, bool), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingConfig { path });
                }
                path
            }
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, false)),
            },
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let file: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "configuration file loaded");
        Ok((Some(file), true))
    }
}

fn compose_config(file: FileConfig, env: EnvConfig) -> Result<Config, ConfigLoadError> {
    let FileConfig {
        api: file_api,
        search: file_search,
    } = file;

    let api = compose_api(file_api, &env)?;
    let search = compose_search(file_search, &env)?;

    Ok(Config { api, search })
}

fn compose_api(file: FileApiConfig, env: &EnvConfig) -> Result<ApiConfig, ConfigLoadError> {
    let raw_base = env
        .api_base_url
        .clone()
        .or(file.base_url)
        .ok_or(ConfigLoadError::MissingBaseUrl)?;
    let base_url = Url::parse(raw_base.trim()).map_err(|source| ConfigLoadError::InvalidBaseUrl {
        value: raw_base.clone(),
        source,
    })?;

    let timeout = pick_duration("api.timeout", env.api_timeout.as_deref(), file.timeout)?
        .unwrap_or(DEFAULT_API_TIMEOUT);

    let locale = match env.locale.as_deref().or(file.locale.as_deref()) {
        Some(raw) => parse_locale(raw)?,
        None => Default::default(),
    };

    let defaults = EndpointPaths::default();
    let paths = EndpointPaths {
        search: file.search_path.unwrap_or(defaults.search),
        statistics: file.statistics_path.unwrap_or(defaults.statistics),
        autocomplete: file.autocomplete_path.unwrap_or(defaults.autocomplete),
        industries: file.industries_path.unwrap_or(defaults.industries),
        isic_codes: file.isic_codes_path.unwrap_or(defaults.isic_codes),
        hs_codes: file.hs_codes_path.unwrap_or(defaults.hs_codes),
    };

    Ok(ApiConfig {
        base_url,
        timeout,
        locale,
        paths,
    })
}

fn compose_search(
    file: FileSearchConfig,
    env: &EnvConfig,
) -> Result<SearchSettings, ConfigLoadError> {
    let defaults = SearchSettings::default();

    let per_page = match env.per_page.as_deref() {
        Some(raw) => parse_number("search.per_page", raw)?,
        None => file.per_page.unwrap_or(defaults.per_page),
    };
    let min_suggestion_chars = match env.min_suggestion_chars.as_deref() {
        Some(raw) => parse_number("search.min_suggestion_chars", raw)?,
        None => file
            .min_suggestion_chars
            .unwrap_or(defaults.min_suggestion_chars),
    };

    Ok(SearchSettings {
        per_page,
        facet_debounce: pick_duration(
            "search.facet_debounce",
            env.facet_debounce.as_deref(),
            file.facet_debounce,
        )?
        .unwrap_or(defaults.facet_debounce),
        price_debounce: pick_duration(
            "search.price_debounce",
            env.price_debounce.as_deref(),
            file.price_debounce,
        )?
        .unwrap_or(defaults.price_debounce),
        suggestion_debounce: pick_duration(
            "search.suggestion_debounce",
            env.suggestion_debounce.as_deref(),
            file.suggestion_debounce,
        )?
        .unwrap_or(defaults.suggestion_debounce),
        min_suggestion_chars,
        generic_error_message: env
            .generic_error_message
            .clone()
            .or(file.generic_error_message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(defaults.generic_error_message),
    })
}

/// Environment wins over the file; both are optional.
fn pick_duration(
    field: &'static str,
    env: Option<&str>,
    file: Option<String>,
) -> Result<Option<Duration>, ConfigLoadError> {
    env.map(str::to_string)
        .or(file)
        .map(|raw| parse_duration(field, &raw))
        .transpose()
}
