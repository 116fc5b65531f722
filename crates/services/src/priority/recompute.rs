use std::time::Instant;

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::{StreamExt, stream};
use serde::Serialize;
use thiserror::Error;
use tracing::Instrument;
use ts_rs::TS;
use uuid::Uuid;

use crate::cases::{CaseFilter, CaseRecord, CaseRecordError, CaseRow, CaseStore};
use crate::config::PrioritizationConfig;
use crate::metrics;

use super::scorer::{ScoreResult, compute_score};

#[derive(Debug, Error)]
pub enum PriorityUpdateError {
    #[error("case {0} not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Malformed(#[from] CaseRecordError),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCase {
    /// The record with `urgency_score` replaced by the fresh score.
    pub record: CaseRecord,
    pub result: ScoreResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
pub struct BatchReport {
    pub succeeded: usize,
    pub skipped: usize,
    pub skipped_case_ids: Vec<Uuid>,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub scored: Vec<ScoredCase>,
    pub skipped: Vec<(Uuid, CaseRecordError)>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.scored.len()
    }

    pub fn skipped(&self) -> usize {
        self.skipped.len()
    }

    pub fn report(&self) -> BatchReport {
        BatchReport {
            succeeded: self.succeeded(),
            skipped: self.skipped(),
            skipped_case_ids: self.skipped.iter().map(|(id, _)| *id).collect(),
        }
    }

    /// Freshly scored records, ready for ranking.
    pub fn into_records(self) -> Vec<CaseRecord> {
        self.scored.into_iter().map(|scored| scored.record).collect()
    }
}

fn score_row(row: CaseRow, now: DateTime<Utc>) -> Result<ScoredCase, CaseRecordError> {
    let mut record = CaseRecord::try_from(row)?;
    let result = compute_score(&record, now);
    record.urgency_score = result.urgency_score;
    Ok(ScoredCase { record, result })
}

/// Scores every row independently. Rows that cannot be read as a case are
/// logged and skipped; they never abort the batch.
pub fn recompute_scores(
    rows: impl IntoIterator<Item = CaseRow>,
    now: DateTime<Utc>,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for row in rows {
        let case_id = row.id;
        match score_row(row, now) {
            Ok(scored) => outcome.scored.push(scored),
            Err(err) => {
                tracing::warn!(%case_id, "skipping case during recompute: {}", err);
                outcome.skipped.push((case_id, err));
            }
        }
    }

    outcome
}

/// Computes scores and writes them back through a [`CaseStore`].
pub struct PriorityManager<S: CaseStore> {
    store: S,
    concurrency: usize,
}

impl<S: CaseStore> PriorityManager<S> {
    pub fn new(store: S, config: &PrioritizationConfig) -> Self {
        Self {
            store,
            concurrency: config.batch_concurrency.max(1),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn update_case_priority(
        &self,
        case_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<ScoreResult, PriorityUpdateError> {
        let row = self
            .store
            .fetch_case(case_id)
            .await?
            .ok_or(PriorityUpdateError::NotFound(case_id))?;
        let scored = self.score_and_store(row, now).await?;
        tracing::info!(
            case_number = %scored.record.case_number,
            urgency_score = scored.result.urgency_score,
            "updated case priority"
        );
        Ok(scored.result)
    }

    pub async fn bulk_update_priorities(
        &self,
        filter: CaseFilter,
        now: DateTime<Utc>,
    ) -> Result<BatchReport> {
        let span = tracing::info_span!("priority.bulk_update", ?filter);
        self.bulk_update_inner(filter, now).instrument(span).await
    }

    async fn bulk_update_inner(
        &self,
        filter: CaseFilter,
        now: DateTime<Utc>,
    ) -> Result<BatchReport> {
        let started = Instant::now();
        let rows = self.store.fetch_cases(filter).await?;

        let results: Vec<(Uuid, Result<ScoredCase, PriorityUpdateError>)> = stream::iter(rows)
            .map(|row| async move {
                let case_id = row.id;
                (case_id, self.score_and_store(row, now).await)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut report = BatchReport::default();
        for (case_id, result) in results {
            match result {
                Ok(_) => report.succeeded += 1,
                Err(err) => {
                    tracing::error!(%case_id, "error updating case priority: {}", err);
                    report.skipped += 1;
                    report.skipped_case_ids.push(case_id);
                }
            }
        }
        report.skipped_case_ids.sort();

        metrics::record_timing(
            "priority.bulk_update.ms",
            started.elapsed().as_secs_f64() * 1_000.0,
        );
        metrics::record_count("priority.bulk_update.succeeded", report.succeeded);
        metrics::record_count("priority.bulk_update.skipped", report.skipped);
        tracing::info!(
            succeeded = report.succeeded,
            skipped = report.skipped,
            "updated priorities"
        );

        Ok(report)
    }

    async fn score_and_store(
        &self,
        row: CaseRow,
        now: DateTime<Utc>,
    ) -> Result<ScoredCase, PriorityUpdateError> {
        let scored = score_row(row, now)?;
        self.store
            .update_urgency_score(scored.record.id, scored.result.urgency_score)
            .await?;
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::cases::{CaseStatus, InMemoryCaseStore};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 8, 30, 0).unwrap()
    }

    fn row(index: usize) -> CaseRow {
        CaseRow {
            id: Uuid::new_v4(),
            case_number: Some(format!("CN-{index:03}")),
            case_type: Some("criminal".into()),
            status: Some("filed".into()),
            priority_level: Some((index % 5) as i32 + 1),
            client_importance: Some(3),
            deadline: Some(now() + Duration::days(index as i64)),
            last_activity: Some(now() - Duration::days(1)),
            ..CaseRow::default()
        }
    }

    #[test]
    fn malformed_row_is_skipped_not_fatal() {
        let mut rows: Vec<CaseRow> = (0..9).map(row).collect();
        let mut broken = row(9);
        broken.priority_level = None;
        let broken_id = broken.id;
        rows.insert(4, broken);

        let outcome = recompute_scores(rows, now());

        assert_eq!(outcome.succeeded(), 9);
        assert_eq!(outcome.skipped(), 1);
        let report = outcome.report();
        assert_eq!(report.skipped_case_ids, vec![broken_id]);
    }

    #[test]
    fn scored_records_carry_fresh_scores() {
        let outcome = recompute_scores([row(2)], now());
        let scored = &outcome.scored[0];
        assert_eq!(scored.record.urgency_score, scored.result.urgency_score);
        assert_eq!(scored.record.status, CaseStatus::Filed);

        let records = outcome.into_records();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn single_update_writes_back() {
        let target = row(1);
        let id = target.id;
        let store = InMemoryCaseStore::from_rows([target]);
        let manager = PriorityManager::new(store, &PrioritizationConfig::default());

        let result = manager.update_case_priority(id, now()).await.unwrap();

        assert_eq!(
            manager.store().urgency_score(id).await,
            Some(result.urgency_score)
        );
    }

    #[tokio::test]
    async fn single_update_reports_missing_case() {
        let manager =
            PriorityManager::new(InMemoryCaseStore::new(), &PrioritizationConfig::default());
        let missing = Uuid::new_v4();

        let err = manager
            .update_case_priority(missing, now())
            .await
            .unwrap_err();
        assert!(matches!(err, PriorityUpdateError::NotFound(id) if id == missing));
    }
}
