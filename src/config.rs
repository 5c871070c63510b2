//! Environment configuration
//!
//! Read once at startup, after `.env` has been loaded.

use std::env;
use std::time::Duration;

/// Stripe secret key (required)
const ENV_STRIPE_SECRET_KEY: &str = "STRIPE_SECRET_KEY";

/// Stripe API base URL, overridable for local stubs
const ENV_STRIPE_API_BASE: &str = "STRIPE_API_BASE";

/// Pinned Stripe API version
const ENV_STRIPE_API_VERSION: &str = "STRIPE_API_VERSION";

/// Upstream request timeout in seconds
const ENV_STRIPE_TIMEOUT: &str = "STRIPE_TIMEOUT_SECS";

/// Currency preferred for the balance snapshot
const ENV_PRIMARY_CURRENCY: &str = "PRIMARY_CURRENCY";

const ENV_SERVER_HOST: &str = "SERVER_HOST";
const ENV_SERVER_PORT: &str = "SERVER_PORT";

/// Source list for the `frame-ancestors` CSP directive
const ENV_FRAME_ANCESTORS: &str = "FRAME_ANCESTORS";

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_STRIPE_API_VERSION: &str = "2025-12-15.clover";
pub const DEFAULT_STRIPE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PRIMARY_CURRENCY: &str = "eur";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FRAME_ANCESTORS: &str =
    "'self' https://pay.google.com https://js.stripe.com https://hooks.stripe.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub stripe_api_version: String,
    pub stripe_timeout: Duration,
    pub primary_currency: String,
    pub host: String,
    pub port: u16,
    pub frame_ancestors: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let stripe_secret_key =
            get(ENV_STRIPE_SECRET_KEY).ok_or(ConfigError::Missing(ENV_STRIPE_SECRET_KEY))?;

        let port = match get(ENV_SERVER_PORT) {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: ENV_SERVER_PORT,
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get(ENV_STRIPE_TIMEOUT) {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: ENV_STRIPE_TIMEOUT,
                        value,
                    })
                }
            },
            None => DEFAULT_STRIPE_TIMEOUT_SECS,
        };

        Ok(Config {
            stripe_secret_key,
            stripe_api_base: get(ENV_STRIPE_API_BASE)
                .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_string()),
            stripe_api_version: get(ENV_STRIPE_API_VERSION)
                .unwrap_or_else(|| DEFAULT_STRIPE_API_VERSION.to_string()),
            stripe_timeout: Duration::from_secs(timeout_secs),
            primary_currency: get(ENV_PRIMARY_CURRENCY)
                .map(|c| c.to_lowercase())
                .unwrap_or_else(|| DEFAULT_PRIMARY_CURRENCY.to_string()),
            host: get(ENV_SERVER_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            frame_ancestors: get(ENV_FRAME_ANCESTORS)
                .unwrap_or_else(|| DEFAULT_FRAME_ANCESTORS.to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Value of the `Content-Security-Policy` response header
    pub fn content_security_policy(&self) -> String {
        format!("frame-ancestors {}", self.frame_ancestors)
    }
}
