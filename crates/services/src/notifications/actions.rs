use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cases::{CaseRecord, CaseStatus, CaseType};
use crate::priority::scorer::whole_days;

const NO_RECENT_ACTIVITY_DAYS: i64 = 7;
const STALE_HIGHLIGHT_DAYS: i64 = 30;

/// Recommended next step for a case. Rules are checked in declaration order
/// and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(rename_all = "snake_case")]
pub enum NextAction {
    ImmediateAttention,
    Urgent,
    AssignLawyer,
    UpdateRequired,
    ContinueInvestigation,
    ScheduleHearing,
    MonitorProgress,
}

impl NextAction {
    pub fn message(self) -> &'static str {
        match self {
            NextAction::ImmediateAttention => "Immediate attention - deadline passed",
            NextAction::Urgent => "Urgent - deadline within 24 hours",
            NextAction::AssignLawyer => "Assign lawyer",
            NextAction::UpdateRequired => "Update required - no recent activity",
            NextAction::ContinueInvestigation => "Continue investigation",
            NextAction::ScheduleHearing => "Schedule hearing date",
            NextAction::MonitorProgress => "Monitor progress",
        }
    }
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub fn next_action(case: &CaseRecord, now: DateTime<Utc>) -> NextAction {
    if let Some(deadline) = case.deadline {
        if deadline <= now {
            return NextAction::ImmediateAttention;
        }
        if deadline - now <= Duration::hours(24) {
            return NextAction::Urgent;
        }
    }

    if case.status == CaseStatus::Filed && case.assigned_lawyer.is_none() {
        return NextAction::AssignLawyer;
    }

    let stale = case
        .last_activity
        .is_none_or(|last| whole_days(now - last) > NO_RECENT_ACTIVITY_DAYS);
    if stale {
        return NextAction::UpdateRequired;
    }

    match case.status {
        CaseStatus::Investigation => NextAction::ContinueInvestigation,
        CaseStatus::Hearing if case.next_hearing.is_none() => NextAction::ScheduleHearing,
        _ => NextAction::MonitorProgress,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(rename_all = "snake_case")]
pub enum UrgencyBand {
    Routine,
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            UrgencyBand::Critical
        } else if score >= 70.0 {
            UrgencyBand::High
        } else if score >= 50.0 {
            UrgencyBand::Medium
        } else if score >= 30.0 {
            UrgencyBand::Low
        } else {
            UrgencyBand::Routine
        }
    }
}

/// Short human-readable reasons a case ranks where it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(rename_all = "snake_case")]
pub enum PriorityHighlight {
    Overdue,
    DueTodayOrTomorrow,
    DueThisWeek,
    HighPriorityLevel,
    ImportantClient,
    UrgentCaseType,
    NoRecentActivity,
}

impl PriorityHighlight {
    pub fn label(self) -> &'static str {
        match self {
            PriorityHighlight::Overdue => "Overdue",
            PriorityHighlight::DueTodayOrTomorrow => "Due today/tomorrow",
            PriorityHighlight::DueThisWeek => "Due this week",
            PriorityHighlight::HighPriorityLevel => "High priority level",
            PriorityHighlight::ImportantClient => "Important client",
            PriorityHighlight::UrgentCaseType => "Urgent case type",
            PriorityHighlight::NoRecentActivity => "No recent activity",
        }
    }
}

pub fn priority_highlights(case: &CaseRecord, now: DateTime<Utc>) -> Vec<PriorityHighlight> {
    let mut highlights = Vec::new();

    if let Some(deadline) = case.deadline {
        match whole_days(deadline - now) {
            days if days <= 0 => highlights.push(PriorityHighlight::Overdue),
            1 => highlights.push(PriorityHighlight::DueTodayOrTomorrow),
            2..=7 => highlights.push(PriorityHighlight::DueThisWeek),
            _ => {}
        }
    }

    if case.priority_level <= 2 {
        highlights.push(PriorityHighlight::HighPriorityLevel);
    }

    if case.client_importance.is_some_and(|importance| importance >= 4) {
        highlights.push(PriorityHighlight::ImportantClient);
    }

    if matches!(case.case_type, CaseType::Criminal | CaseType::PersonalInjury) {
        highlights.push(PriorityHighlight::UrgentCaseType);
    }

    let stale = case
        .last_activity
        .is_none_or(|last| whole_days(now - last) > STALE_HIGHLIGHT_DAYS);
    if stale {
        highlights.push(PriorityHighlight::NoRecentActivity);
    }

    highlights
}
