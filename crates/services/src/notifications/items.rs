use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::text::{MAX_MESSAGE_LEN, case_reference, pluralize_days, truncate_with_ellipsis};
use uuid::Uuid;

use crate::cases::{CaseRecord, CaseStatus};
use crate::config::PrioritizationConfig;
use crate::priority::ranking::{overdue_cases, urgent_cases};
use crate::priority::scorer::whole_days;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(rename_all = "snake_case")]
pub enum ActionItemKind {
    Overdue,
    UnassignedUrgent,
    StaleCase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

/// Flat record handed to a notification sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ActionItem {
    pub kind: ActionItemKind,
    pub severity: Severity,
    pub case_id: Uuid,
    pub case_number: String,
    pub message: String,
}

impl ActionItem {
    fn new(kind: ActionItemKind, severity: Severity, case: &CaseRecord, message: String) -> Self {
        Self {
            kind,
            severity,
            case_id: case.id,
            case_number: case.case_number.clone(),
            message: truncate_with_ellipsis(&message, MAX_MESSAGE_LEN),
        }
    }
}

/// Builds the action list: overdue cases first, then urgent cases with no
/// lawyer, then stale filed/investigation cases. Each group is capped by the
/// matching limit in `config`.
pub fn identify_urgent_actions(
    cases: &[CaseRecord],
    now: DateTime<Utc>,
    config: &PrioritizationConfig,
) -> Vec<ActionItem> {
    let mut actions = Vec::new();

    for case in overdue_cases(cases, now)
        .into_iter()
        .take(config.overdue_action_limit)
    {
        let overdue_by = case.deadline.map(|deadline| whole_days(now - deadline)).unwrap_or(0);
        actions.push(ActionItem::new(
            ActionItemKind::Overdue,
            Severity::Critical,
            case,
            format!(
                "Case {} is overdue by {}",
                case_reference(&case.case_number),
                pluralize_days(overdue_by)
            ),
        ));
    }

    for case in urgent_cases(cases, config.urgent_threshold)
        .into_iter()
        .filter(|case| case.assigned_lawyer.is_none())
        .take(config.unassigned_action_limit)
    {
        actions.push(ActionItem::new(
            ActionItemKind::UnassignedUrgent,
            Severity::High,
            case,
            format!(
                "Urgent case {} needs lawyer assignment",
                case_reference(&case.case_number)
            ),
        ));
    }

    let stale_cutoff = now - config.stale_after();
    let mut stale: Vec<&CaseRecord> = cases
        .iter()
        .filter(|case| matches!(case.status, CaseStatus::Filed | CaseStatus::Investigation))
        .filter(|case| case.last_activity.is_some_and(|last| last < stale_cutoff))
        .collect();
    stale.sort_by(|a, b| b.urgency_score.total_cmp(&a.urgency_score));

    for case in stale.into_iter().take(config.stale_action_limit) {
        let idle_days = case.last_activity.map(|last| whole_days(now - last)).unwrap_or(0);
        actions.push(ActionItem::new(
            ActionItemKind::StaleCase,
            Severity::Medium,
            case,
            format!(
                "Case {} has no recent activity for {}",
                case_reference(&case.case_number),
                pluralize_days(idle_days)
            ),
        ));
    }

    actions
}
