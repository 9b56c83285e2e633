use async_trait::async_trait;
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::PnlSource;
use crate::errors::CoreError;
use crate::models::pnl::{PnlData, PnlPeriod, PnlStep};
use crate::models::settings::ClientSettings;
use crate::services::series_service::SeriesService;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-plasma-api-key";

/// Longest upstream error body carried into `CoreError::Api`.
pub const MAX_ERROR_BODY_BYTES: usize = 512;

/// HTTP client for the Plasma address PNL endpoint.
///
/// - **Endpoint**: `GET {base_url}/{address}/pnl?step={step}&period={period}`
/// - **Auth**: `x-plasma-api-key` header, read from settings at construction.
/// - **Response**: JSON object of epoch-second keys to USD values.
///
/// No retries and no caching: every call is exactly one request.
pub struct PlasmaPnlClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PlasmaPnlClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, CoreError> {
        settings.validate()?;

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = if settings.timeout_secs > 0 {
            builder.timeout(Duration::from_secs(settings.timeout_secs))
        } else {
            builder
        };
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim().trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    /// URL of the PNL resource for `address` (query string not included).
    /// The address is not validated; whatever the user typed is sent upstream.
    #[must_use]
    pub fn pnl_url(&self, address: &str) -> String {
        format!("{}/{}/pnl", self.base_url, address)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PnlSource for PlasmaPnlClient {
    fn name(&self) -> &str {
        "Plasma"
    }

    async fn get_pnl(
        &self,
        address: &str,
        step: PnlStep,
        period: PnlPeriod,
    ) -> Result<PnlData, CoreError> {
        let url = self.pnl_url(address);
        tracing::debug!(%address, %step, %period, "Requesting PNL from {}", url);

        let mut request = self
            .client
            .get(&url)
            .query(&[("step", step.as_str()), ("period", period.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::Api {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    truncate_body(body)
                },
            });
        }

        let body = response.text().await?;
        SeriesService::parse_pnl_body(&body)
    }
}

/// Cut `body` to at most `MAX_ERROR_BODY_BYTES` on a char boundary, marking the cut.
fn truncate_body(mut body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body;
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body.truncate(end);
    body.push_str("...");
    body
}
