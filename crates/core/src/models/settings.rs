use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Default upstream endpoint; the address and `/pnl` are appended per request.
pub const DEFAULT_BASE_URL: &str = "https://hyper-api.plasma.finance/v1/address";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_KEY: &str = "PLASMA_API_KEY";
pub const ENV_BASE_URL: &str = "PLASMA_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "PLASMA_API_TIMEOUT_SECS";

/// Connection settings for the PNL client, fixed at construction time.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub base_url: String,

    /// Sent as the `x-plasma-api-key` header. No header is sent when `None`.
    pub api_key: Option<String>,

    /// Request timeout (native targets only). `0` disables it.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientSettings {
    /// Read settings from the process environment, loading a `.env` file first if present.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable source. Unset or blank variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut settings = Self::default();

        if let Some(url) = read(ENV_BASE_URL) {
            settings.base_url = url;
        }
        settings.api_key = read(ENV_API_KEY);
        if let Some(raw) = read(ENV_TIMEOUT_SECS) {
            settings.timeout_secs = raw.parse().map_err(|_| {
                CoreError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Check the base URL is usable.
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(CoreError::Config("Base URL must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "Base URL '{url}' must start with http:// or https://"
            )));
        }
        Ok(())
    }
}
