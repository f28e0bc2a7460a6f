//! Environment-driven client configuration.
//!
//! The builder covers programmatic setup; this module loads the same options
//! from environment variables for services and the demo binaries.

use std::time::Duration;

use crate::client::{Credential, DEFAULT_TIMEOUT, PushClient, PushClientBuilder, PushError};
use crate::domain::{BaseUrl, ValidationError};

pub const ENV_BASE_URL: &str = "MLIEV_PUSH_BASE_URL";
pub const ENV_APP_ID: &str = "MLIEV_PUSH_APP_ID";
pub const ENV_APP_SECRET: &str = "MLIEV_PUSH_APP_SECRET";
pub const ENV_TIMEOUT_SECS: &str = "MLIEV_PUSH_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Connection settings for [`PushClient`].
///
/// `Debug` output carries the credential with its secret redacted.
#[derive(Debug, Clone)]
pub struct PushConfig {
    pub base_url: BaseUrl,
    pub credential: Credential,
    pub timeout: Duration,
}

impl PushConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `MLIEV_PUSH_BASE_URL` (required)
    /// - `MLIEV_PUSH_APP_ID` (required)
    /// - `MLIEV_PUSH_APP_SECRET` (required)
    /// - `MLIEV_PUSH_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::Missing(var));

        let base_url = BaseUrl::new(required(ENV_BASE_URL)?)?;
        let credential = Credential::new(required(ENV_APP_ID)?, required(ENV_APP_SECRET)?)?;
        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: ENV_TIMEOUT_SECS,
                        value: value.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            base_url,
            credential,
            timeout,
        })
    }

    /// A builder preloaded with these settings, for further customization.
    pub fn into_builder(self) -> PushClientBuilder {
        PushClient::builder(self.base_url.as_str(), self.credential).timeout(self.timeout)
    }

    pub fn build_client(self) -> Result<PushClient, PushError> {
        self.into_builder().build()
    }
}
