//! Application configuration.
//!
//! Read once from the environment in `main` and passed down explicitly.

use std::path::PathBuf;

use crate::tago::{DEFAULT_BASE_URL, TagoConfig};

/// Placeholder shipped in sample `.env` files.
const PLACEHOLDER_SERVICE_KEY: &str = "YOUR_SERVICE_KEY";

/// Daejeon (including Gyeryong).
const DEFAULT_CITY_CODE: &str = "25";
const DEFAULT_CITY_NAME: &str = "대전광역시(계룡시)";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors. These are fatal before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No service key was provided
    #[error("SERVICE_KEY is not set; put a valid data.go.kr service key in the environment")]
    MissingServiceKey,

    /// The sample placeholder was left in place
    #[error("SERVICE_KEY is still the placeholder value; replace it with a real key")]
    PlaceholderServiceKey,

    /// A variable held something unusable
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Reject a missing or placeholder service key.
pub fn validate_service_key(key: &str) -> Result<(), ConfigError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::MissingServiceKey);
    }
    if key == PLACEHOLDER_SERVICE_KEY {
        return Err(ConfigError::PlaceholderServiceKey);
    }
    Ok(())
}

/// Where route data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// The live API.
    Live {
        service_key: String,
        base_url: String,
        timeout_secs: u64,
    },
    /// Recorded responses in a directory.
    Mock { data_dir: PathBuf },
}

/// Configuration for one run of the route map tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub source: SourceConfig,
    /// City code sent to the API.
    pub city_code: String,
    /// City name used in the map title and output file name.
    pub city_name: String,
    /// Directory the map file is written to.
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Configuration for the live API with defaults for everything else.
    pub fn new(service_key: impl Into<String>) -> Self {
        Self {
            source: SourceConfig::Live {
                service_key: service_key.into(),
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            city_code: DEFAULT_CITY_CODE.to_string(),
            city_name: DEFAULT_CITY_NAME.to_string(),
            output_dir: PathBuf::from("."),
        }
    }

    /// Configuration serving recorded responses from `data_dir`.
    pub fn mock(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: SourceConfig::Mock {
                data_dir: data_dir.into(),
            },
            ..Self::new(String::new())
        }
    }

    /// Set the city.
    pub fn with_city(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.city_code = code.into();
        self.city_name = name.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// | variable | default |
    /// |---|---|
    /// | `SERVICE_KEY` | required unless `TAGO_MOCK_DIR` is set |
    /// | `TAGO_MOCK_DIR` | unset |
    /// | `TAGO_CITY_CODE` | `25` |
    /// | `TAGO_CITY_NAME` | `대전광역시(계룡시)` |
    /// | `TAGO_BASE_URL` | production |
    /// | `TAGO_TIMEOUT_SECS` | `10` |
    /// | `ROUTE_MAP_OUT_DIR` | `.` |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let source = match get("TAGO_MOCK_DIR") {
            Some(dir) => SourceConfig::Mock {
                data_dir: PathBuf::from(dir),
            },
            None => {
                let service_key = get("SERVICE_KEY").unwrap_or_default();
                validate_service_key(&service_key)?;

                let timeout_secs = match get("TAGO_TIMEOUT_SECS") {
                    Some(raw) => match raw.trim().parse::<u64>() {
                        Ok(secs) if secs > 0 => secs,
                        _ => {
                            return Err(ConfigError::Invalid {
                                name: "TAGO_TIMEOUT_SECS",
                                value: raw,
                            });
                        }
                    },
                    None => DEFAULT_TIMEOUT_SECS,
                };

                SourceConfig::Live {
                    service_key: service_key.trim().to_string(),
                    base_url: get("TAGO_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                    timeout_secs,
                }
            }
        };

        Ok(Self {
            source,
            city_code: get("TAGO_CITY_CODE").unwrap_or_else(|| DEFAULT_CITY_CODE.to_string()),
            city_name: get("TAGO_CITY_NAME").unwrap_or_else(|| DEFAULT_CITY_NAME.to_string()),
            output_dir: get("ROUTE_MAP_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }

    /// Client configuration for the live API, if this is a live config.
    pub fn tago_config(&self) -> Option<TagoConfig> {
        match &self.source {
            SourceConfig::Live {
                service_key,
                base_url,
                timeout_secs,
            } => Some(
                TagoConfig::new(service_key.clone(), self.city_code.clone())
                    .with_base_url(base_url.clone())
                    .with_timeout(*timeout_secs),
            ),
            SourceConfig::Mock { .. } => None,
        }
    }
}
