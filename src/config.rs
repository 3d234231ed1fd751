//! Environment configuration
//!
//! Loaded once at startup. A `.env` file in the working directory is honoured.
//!
//! | Variable | Default |
//! |---|---|
//! | `FLOCK_API_URL` | required |
//! | `FLOCK_API_TOKEN` | none |
//! | `FLOCK_HTTP_TIMEOUT_SECS` | 30 |
//! | `FLOCK_SEARCH_LIMIT` | 10 |

use serde::Serialize;
use std::str::FromStr;

use crate::error::ConfigError;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlockConfig {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub http_timeout_secs: u64,
    pub search_limit: u32,
}

impl FlockConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("FLOCK_API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing {
                key: "FLOCK_API_URL",
            })?;

        Ok(Self {
            api_url: api_url.trim().to_string(),
            api_token: lookup("FLOCK_API_TOKEN").filter(|v| !v.is_empty()),
            http_timeout_secs: env_parse(
                &lookup,
                "FLOCK_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?,
            search_limit: env_parse(&lookup, "FLOCK_SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT)?,
        })
    }
}

fn env_parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        },
        None => Ok(default),
    }
}
