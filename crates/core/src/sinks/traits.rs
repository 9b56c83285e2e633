use crate::models::chart::ChartOptions;
use crate::models::notification::Notification;

/// Receives the chart configuration whenever the displayed series changes.
///
/// The actual chart widget lives in the frontend; this is its seam.
pub trait ChartSink: Send + Sync {
    fn render(&mut self, options: &ChartOptions);
}

/// Shows transient toast notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&mut self, notification: Notification);
}
