use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::errors::CoreError;

/// One `(value, label)` entry of a form selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

// ── Step ────────────────────────────────────────────────────────────

/// Sampling granularity of the returned PNL series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PnlStep {
    #[serde(rename = "1h")]
    Hour,
    #[default]
    #[serde(rename = "1D")]
    Day,
    #[serde(rename = "1W")]
    Week,
    #[serde(rename = "1M")]
    Month,
}

impl PnlStep {
    pub const ALL: [PnlStep; 4] = [PnlStep::Hour, PnlStep::Day, PnlStep::Week, PnlStep::Month];

    /// Wire value sent as the `step` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "1h",
            Self::Day => "1D",
            Self::Week => "1W",
            Self::Month => "1M",
        }
    }

    /// Human label shown in the step selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hour => "Hour",
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }

    pub fn options() -> Vec<SelectOption> {
        Self::ALL
            .iter()
            .map(|s| SelectOption {
                value: s.as_str(),
                label: s.label(),
            })
            .collect()
    }
}

impl std::fmt::Display for PnlStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PnlStep {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown PNL step '{s}': expected one of 1h, 1D, 1W, 1M"
                ))
            })
    }
}

// ── Period ──────────────────────────────────────────────────────────

/// Total lookback window requested from the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PnlPeriod {
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "2M")]
    TwoMonths,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "4M")]
    FourMonths,
    #[serde(rename = "5M")]
    FiveMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "2Y")]
    TwoYears,
    #[serde(rename = "ALL")]
    All,
}

impl PnlPeriod {
    pub const ALL: [PnlPeriod; 9] = [
        PnlPeriod::OneMonth,
        PnlPeriod::TwoMonths,
        PnlPeriod::ThreeMonths,
        PnlPeriod::FourMonths,
        PnlPeriod::FiveMonths,
        PnlPeriod::SixMonths,
        PnlPeriod::OneYear,
        PnlPeriod::TwoYears,
        PnlPeriod::All,
    ];

    /// Wire value sent as the `period` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1M",
            Self::TwoMonths => "2M",
            Self::ThreeMonths => "3M",
            Self::FourMonths => "4M",
            Self::FiveMonths => "5M",
            Self::SixMonths => "6M",
            Self::OneYear => "1Y",
            Self::TwoYears => "2Y",
            Self::All => "ALL",
        }
    }

    /// The period selector labels its options with the wire value itself.
    pub fn options() -> Vec<SelectOption> {
        Self::ALL
            .iter()
            .map(|p| SelectOption {
                value: p.as_str(),
                label: p.as_str(),
            })
            .collect()
    }
}

impl std::fmt::Display for PnlPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PnlPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown PNL period '{s}': expected one of 1M, 2M, 3M, 4M, 5M, 6M, 1Y, 2Y, ALL"
                ))
            })
    }
}

// ── Data ────────────────────────────────────────────────────────────

/// Sparse mapping of epoch seconds to a USD value, as returned by the API.
///
/// Iterates in ascending key order. Upstream JSON objects with integer keys
/// are enumerated that way by the browser, so the chart order is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PnlData(BTreeMap<i64, f64>);

impl PnlData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, epoch_secs: i64, usd: f64) -> Option<f64> {
        self.0.insert(epoch_secs, usd)
    }

    #[must_use]
    pub fn get(&self, epoch_secs: i64) -> Option<f64> {
        self.0.get(&epoch_secs).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(epoch_secs, usd)` pairs in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(i64, f64)> for PnlData {
    fn from_iter<I: IntoIterator<Item = (i64, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(i64, f64); N]> for PnlData {
    fn from(entries: [(i64, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}
