use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::cases::{CaseFilter, CaseStore};
use crate::config::PrioritizationConfig;

use super::recompute::PriorityManager;

/// Periodic recompute of every non-closed case, every
/// `recompute_interval_secs`. The first run starts immediately.
pub struct PriorityScheduler;

impl PriorityScheduler {
    pub fn spawn<S>(
        manager: Arc<PriorityManager<S>>,
        config: &PrioritizationConfig,
        cancel: CancellationToken,
    ) -> JoinHandle<()>
    where
        S: CaseStore + 'static,
    {
        let period = config.recompute_interval();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tracing::info!("priority scheduler stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        tracing::info!("Starting scheduled priority update...");
                        match manager
                            .bulk_update_priorities(CaseFilter::ExcludeClosed, Utc::now())
                            .await
                        {
                            Ok(report) => tracing::info!(
                                succeeded = report.succeeded,
                                skipped = report.skipped,
                                "scheduled priority update completed"
                            ),
                            Err(e) => tracing::error!("scheduled priority update failed: {}", e),
                        }
                    }
                }
            }
        })
    }
}
