use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::pnl::{PnlData, PnlPeriod, PnlStep};

/// Source of PNL series for an address.
///
/// The HTTP client implements this; the view only talks to the trait, so
/// tests and alternative backends can stand in for the network.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PnlSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the PNL series of `address` sampled every `step` over `period`.
    async fn get_pnl(
        &self,
        address: &str,
        step: PnlStep,
        period: PnlPeriod,
    ) -> Result<PnlData, CoreError>;
}
