use std::sync::{Arc, Mutex};

use super::traits::{ChartSink, Notifier};
use crate::models::chart::ChartOptions;
use crate::models::notification::Notification;

/// Chart sink that keeps every rendered frame in memory.
///
/// Clones share the same buffer, so a caller can keep one handle and give
/// the other to the view.
#[derive(Debug, Clone, Default)]
pub struct RecordingChartSink {
    renders: Arc<Mutex<Vec<ChartOptions>>>,
}

impl RecordingChartSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn renders(&self) -> Vec<ChartOptions> {
        self.renders.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<ChartOptions> {
        self.renders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl ChartSink for RecordingChartSink {
    fn render(&mut self, options: &ChartOptions) {
        self.renders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(options.clone());
    }
}

/// Notifier that keeps every notification in memory (shared across clones).
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    pub fn clear(&self) {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}
