//! Client configuration.

use crate::error::{CmaError, CmaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Settings for a [`Client`](crate::Client).
///
/// Missing keys fall back to their defaults when deserialized, so a config
/// file only needs the access token.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Bearer token for the default HTTP transport.
    pub access_token: String,
    /// Base URL of the management API (e.g. `https://api.contentful.com`).
    pub base_url: String,
    /// Environment used for entry paths.
    pub environment: String,
    /// Per-request deadline in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Page size requested by collection cursors.
    pub page_limit: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: "https://api.contentful.com".to_string(),
            environment: "master".to_string(),
            timeout_secs: 30,
            user_agent: format!("contentful-cma/{}", env!("CARGO_PKG_VERSION")),
            page_limit: 100,
        }
    }
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks the settings a client cannot work without.
    pub fn validate(&self) -> CmaResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(CmaError::Config("base_url is empty".to_string()));
        }
        if self.page_limit == 0 {
            return Err(CmaError::Config("page_limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("environment", &self.environment)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_limit", &self.page_limit)
            .finish()
    }
}
