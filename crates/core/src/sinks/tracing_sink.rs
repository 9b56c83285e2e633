use super::traits::{ChartSink, Notifier};
use crate::models::chart::ChartOptions;
use crate::models::notification::{Notification, Severity};

/// Default sinks for a view with no frontend attached: everything goes to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ChartSink for TracingSink {
    fn render(&mut self, options: &ChartOptions) {
        for series in &options.data {
            tracing::debug!(
                label = %series.label,
                points = series.data.len(),
                "Chart series updated"
            );
        }
    }
}

impl Notifier for TracingSink {
    fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Success => {
                tracing::info!(duration_ms = notification.duration_ms, "{}", notification.title)
            }
            Severity::Error => {
                tracing::warn!(duration_ms = notification.duration_ms, "{}", notification.title)
            }
        }
    }
}
