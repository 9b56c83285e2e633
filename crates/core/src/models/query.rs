use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pnl::{PnlData, PnlPeriod, PnlStep};

/// Address queried when the view first mounts.
pub const DEFAULT_ADDRESS: &str = "0xbdfa4f4492dd7b7cf211209c4791af8d52bf5c50";

/// Form state of the PNL view: the request parameters plus the last fetched frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    pub address: String,
    pub step: PnlStep,
    pub period: PnlPeriod,
    /// `None` until a fetch succeeds, and again while a fetch is in flight
    pub frames: Option<PnlData>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            step: PnlStep::Day,
            period: PnlPeriod::OneMonth,
            frames: None,
        }
    }
}

/// Handle for one in-flight fetch, returned when the fetch starts and
/// consumed when its result is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonic per-view sequence number, for logs
    pub sequence: u64,
    pub address: String,
    pub step: PnlStep,
    pub period: PnlPeriod,
    pub started_at: DateTime<Utc>,
}
