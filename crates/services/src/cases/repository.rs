use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{CaseRow, CaseStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseFilter {
    #[default]
    All,
    ExcludeClosed,
}

impl CaseFilter {
    pub fn matches(self, row: &CaseRow) -> bool {
        match self {
            CaseFilter::All => true,
            CaseFilter::ExcludeClosed => {
                row.status.as_deref().map(CaseStatus::parse_lenient) != Some(CaseStatus::Closed)
            }
        }
    }
}

/// Source and sink for case records. Scores are only ever written through
/// `update_urgency_score`.
#[async_trait]
pub trait CaseStore: Send + Sync {
    async fn fetch_case(&self, case_id: Uuid) -> Result<Option<CaseRow>>;

    async fn fetch_cases(&self, filter: CaseFilter) -> Result<Vec<CaseRow>>;

    async fn update_urgency_score(&self, case_id: Uuid, score: f64) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryCaseStore {
    rows: RwLock<BTreeMap<Uuid, CaseRow>>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: impl IntoIterator<Item = CaseRow>) -> Self {
        Self {
            rows: RwLock::new(rows.into_iter().map(|row| (row.id, row)).collect()),
        }
    }

    pub async fn urgency_score(&self, case_id: Uuid) -> Option<f64> {
        self.rows
            .read()
            .await
            .get(&case_id)
            .and_then(|row| row.urgency_score)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl CaseStore for InMemoryCaseStore {
    async fn fetch_case(&self, case_id: Uuid) -> Result<Option<CaseRow>> {
        Ok(self.rows.read().await.get(&case_id).cloned())
    }

    async fn fetch_cases(&self, filter: CaseFilter) -> Result<Vec<CaseRow>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect())
    }

    async fn update_urgency_score(&self, case_id: Uuid, score: f64) -> Result<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(&case_id)
            .ok_or_else(|| anyhow!("case {case_id} not found"))?;
        row.urgency_score = Some(score);
        Ok(())
    }
}
