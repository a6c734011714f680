//! Server configuration, loaded from environment variables at startup.

use std::fmt;

use thiserror::Error;

/// A required environment variable is absent or empty.
#[derive(Debug, Error)]
#[error("missing required environment variable {0}")]
pub struct ConfigError(pub &'static str);

/// Runtime configuration for formbridge-server.
///
/// Only the CRM credentials are mandatory; everything else has a default so
/// a `.env` file with two lines is enough to run locally.
#[derive(Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// HubSpot private-app access token (`PRIVATE_APP_ACCESS`).
    pub access_token: String,

    /// HubSpot account (portal) id (`ACCOUNT_ID`). Used to build the
    /// fully-qualified name of the quote custom object.
    pub account_id: String,

    /// CRM API host, overridable for tests and sandboxes.
    pub crm_base_url: String,

    /// Per-request timeout for CRM calls, in seconds.
    pub crm_timeout_secs: u64,

    /// Schema name of the quote-request custom object.
    pub quote_schema: String,

    /// Directory served under `/public`.
    pub static_dir: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("access_token", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("crm_base_url", &self.crm_base_url)
            .field("crm_timeout_secs", &self.crm_timeout_secs)
            .field("quote_schema", &self.quote_schema)
            .field("static_dir", &self.static_dir)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl Config {
    /// Build [`Config`] from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_owned());

        Ok(Self {
            bind_address: or("FORMBRIDGE_BIND", "0.0.0.0:3000"),
            access_token: get("PRIVATE_APP_ACCESS").ok_or(ConfigError("PRIVATE_APP_ACCESS"))?,
            account_id: get("ACCOUNT_ID").ok_or(ConfigError("ACCOUNT_ID"))?,
            crm_base_url: or("FORMBRIDGE_CRM_BASE_URL", formbridge_crm::DEFAULT_BASE_URL),
            crm_timeout_secs: get("FORMBRIDGE_CRM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            quote_schema: or("FORMBRIDGE_QUOTE_SCHEMA", "quote_requests"),
            static_dir: or("FORMBRIDGE_STATIC_DIR", "public"),
            log_level: or("FORMBRIDGE_LOG", "info"),
            log_json: get("FORMBRIDGE_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// Object type path segment of the quote custom object, e.g. `p1234_quote_requests`.
    pub fn quote_object_type(&self) -> String {
        format!("p{}_{}", self.account_id, self.quote_schema)
    }
}
