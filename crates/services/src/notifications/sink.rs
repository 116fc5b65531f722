use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::items::{ActionItem, Severity};

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, item: &ActionItem) -> Result<()>;
}

/// Writes every item to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn deliver(&self, item: &ActionItem) -> Result<()> {
        match item.severity {
            Severity::Critical => tracing::warn!(
                target: "notifications",
                case_id = %item.case_id,
                kind = ?item.kind,
                "{}",
                item.message
            ),
            Severity::High | Severity::Medium => tracing::info!(
                target: "notifications",
                case_id = %item.case_id,
                kind = ?item.kind,
                "{}",
                item.message
            ),
        }
        Ok(())
    }
}

/// Buffers items in memory until drained.
#[derive(Debug, Default)]
pub struct CollectingNotificationSink {
    items: Mutex<Vec<ActionItem>>,
}

impl CollectingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn drain(&self) -> Vec<ActionItem> {
        std::mem::take(&mut *self.items.lock().await)
    }
}

#[async_trait]
impl NotificationSink for CollectingNotificationSink {
    async fn deliver(&self, item: &ActionItem) -> Result<()> {
        self.items.lock().await.push(item.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Delivers every item; one failed delivery does not stop the rest.
pub async fn dispatch_actions(sink: &dyn NotificationSink, items: &[ActionItem]) -> DispatchReport {
    let mut report = DispatchReport::default();
    for item in items {
        match sink.deliver(item).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::error!(
                    case_id = %item.case_id,
                    "failed to deliver {:?} notification: {}",
                    item.kind,
                    e
                );
                report.failed += 1;
            }
        }
    }
    report
}
