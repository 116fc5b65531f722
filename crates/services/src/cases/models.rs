use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[ts(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaseType {
    Criminal,
    Civil,
    Family,
    Corporate,
    Immigration,
    PersonalInjury,
    Property,
    Other,
}

impl CaseType {
    /// Unrecognized values collapse to `Other`.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.trim()
            .to_ascii_lowercase()
            .parse()
            .unwrap_or(CaseType::Other)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    TS,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[ts(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaseStatus {
    Filed,
    Investigation,
    Hearing,
    Trial,
    Closed,
    OnHold,
    /// A stored status this build does not recognize.
    Unknown,
}

impl CaseStatus {
    pub fn parse_lenient(raw: &str) -> Self {
        raw.trim()
            .to_ascii_lowercase()
            .parse()
            .unwrap_or(CaseStatus::Unknown)
    }

    /// Statuses for which a passed deadline still counts as overdue.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            CaseStatus::Filed | CaseStatus::Investigation | CaseStatus::Hearing | CaseStatus::Trial
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
pub struct CaseRecord {
    pub id: Uuid,
    pub case_number: String,
    pub case_type: CaseType,
    pub status: CaseStatus,
    /// 1 (most urgent) through 5.
    pub priority_level: i32,
    /// 1 (least important) through 5.
    pub client_importance: Option<i32>,
    pub deadline: Option<DateTime<Utc>>,
    pub next_hearing: Option<DateTime<Utc>>,
    pub assigned_lawyer: Option<Uuid>,
    pub last_activity: Option<DateTime<Utc>>,
    /// Last persisted score; the scorer never writes this.
    pub urgency_score: f64,
}

/// Case as a store hands it back: nullable columns and raw enum strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseRow {
    pub id: Uuid,
    pub case_number: Option<String>,
    pub case_type: Option<String>,
    pub status: Option<String>,
    pub priority_level: Option<i32>,
    pub client_importance: Option<i32>,
    pub deadline: Option<DateTime<Utc>>,
    pub next_hearing: Option<DateTime<Utc>>,
    pub assigned_lawyer: Option<Uuid>,
    pub last_activity: Option<DateTime<Utc>>,
    pub urgency_score: Option<f64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaseRecordError {
    #[error("case {case_id} is missing required field `{field}`")]
    MissingField { case_id: Uuid, field: &'static str },
}

impl TryFrom<CaseRow> for CaseRecord {
    type Error = CaseRecordError;

    fn try_from(row: CaseRow) -> Result<Self, Self::Error> {
        let case_id = row.id;
        let missing = |field| CaseRecordError::MissingField { case_id, field };

        let case_number = row.case_number.ok_or_else(|| missing("case_number"))?;
        let case_type = row
            .case_type
            .as_deref()
            .map(CaseType::parse_lenient)
            .ok_or_else(|| missing("case_type"))?;
        let status = row
            .status
            .as_deref()
            .map(CaseStatus::parse_lenient)
            .ok_or_else(|| missing("status"))?;
        let priority_level = row.priority_level.ok_or_else(|| missing("priority_level"))?;

        Ok(CaseRecord {
            id: row.id,
            case_number,
            case_type,
            status,
            priority_level,
            client_importance: row.client_importance,
            deadline: row.deadline,
            next_hearing: row.next_hearing,
            assigned_lawyer: row.assigned_lawyer,
            last_activity: row.last_activity,
            urgency_score: row.urgency_score.unwrap_or(0.0),
        })
    }
}

impl From<&CaseRecord> for CaseRow {
    fn from(record: &CaseRecord) -> Self {
        CaseRow {
            id: record.id,
            case_number: Some(record.case_number.clone()),
            case_type: Some(record.case_type.to_string()),
            status: Some(record.status.to_string()),
            priority_level: Some(record.priority_level),
            client_importance: record.client_importance,
            deadline: record.deadline,
            next_hearing: record.next_hearing,
            assigned_lawyer: record.assigned_lawyer,
            last_activity: record.last_activity,
            urgency_score: Some(record.urgency_score),
        }
    }
}
