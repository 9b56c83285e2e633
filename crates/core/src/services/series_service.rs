use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::chart::{PnlFrame, Series};
use crate::models::pnl::PnlData;

/// Milliseconds per second; API keys are seconds, chart points are milliseconds.
const MS_PER_SEC: i64 = 1000;

/// Validates raw PNL responses and shapes them into chart series.
///
/// The core computes all the points; the frontend only renders.
pub struct SeriesService;

impl SeriesService {
    pub fn new() -> Self {
        Self
    }

    /// Parse and validate a raw response body.
    ///
    /// The body must be a JSON object whose keys are integer epoch seconds
    /// and whose values are numbers. Anything else is `MalformedResponse`.
    pub fn parse_pnl_body(body: &str) -> Result<PnlData, CoreError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| CoreError::MalformedResponse(format!("body is not valid JSON: {e}")))?;
        Self::validate(&value)
    }

    /// Validate an already-parsed JSON value against the `PnlData` schema.
    pub fn validate(value: &Value) -> Result<PnlData, CoreError> {
        let object = value.as_object().ok_or_else(|| {
            CoreError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_kind(value)
            ))
        })?;

        let mut data = PnlData::new();
        for (key, raw) in object {
            let epoch_secs: i64 = key.parse().map_err(|_| {
                CoreError::MalformedResponse(format!("key '{key}' is not an integer epoch"))
            })?;
            // One spelling per epoch, otherwise "086400" and "86400" would collapse into one point.
            if epoch_secs.to_string() != *key {
                return Err(CoreError::MalformedResponse(format!(
                    "key '{key}' is not a canonical integer epoch"
                )));
            }
            if epoch_secs.checked_mul(MS_PER_SEC).is_none() {
                return Err(CoreError::MalformedResponse(format!(
                    "epoch {epoch_secs} is out of range"
                )));
            }
            let usd = raw.as_f64().ok_or_else(|| {
                CoreError::MalformedResponse(format!(
                    "value for epoch {key} is {}, expected a number",
                    json_kind(raw)
                ))
            })?;
            data.insert(epoch_secs, usd);
        }

        Ok(data)
    }

    /// Reshape a PNL mapping into chart points, in the mapping's iteration order.
    #[must_use]
    pub fn to_frames(&self, data: &PnlData) -> Vec<PnlFrame> {
        data.iter()
            .map(|(epoch_secs, usd)| PnlFrame {
                timestamp_ms: epoch_secs.saturating_mul(MS_PER_SEC),
                usd,
            })
            .collect()
    }

    /// Build the single series shown for `address`.
    #[must_use]
    pub fn to_series(&self, address: &str, data: &PnlData) -> Series {
        Series {
            label: series_label(address),
            data: self.to_frames(data),
        }
    }

    /// Series shown before the first successful fetch: one zero point at `now`.
    #[must_use]
    pub fn placeholder(&self, address: &str, now: DateTime<Utc>) -> Series {
        Series {
            label: series_label(address),
            data: vec![PnlFrame {
                timestamp_ms: now.timestamp_millis(),
                usd: 0.0,
            }],
        }
    }
}

impl Default for SeriesService {
    fn default() -> Self {
        Self::new()
    }
}

fn series_label(address: &str) -> String {
    format!("{address} PNL")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
