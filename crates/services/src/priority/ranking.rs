use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::cases::{CaseRecord, CaseStatus};

/// Priority level ascending, urgency descending, deadline ascending with
/// missing deadlines last.
pub fn compare_priority(a: &CaseRecord, b: &CaseRecord) -> Ordering {
    a.priority_level
        .cmp(&b.priority_level)
        .then_with(|| b.urgency_score.total_cmp(&a.urgency_score))
        .then_with(|| match (a.deadline, b.deadline) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Stable: full ties keep their input order.
pub fn rank_cases(cases: &mut [CaseRecord]) {
    cases.sort_by(compare_priority);
}

pub fn prioritized_cases(mut cases: Vec<CaseRecord>, limit: Option<usize>) -> Vec<CaseRecord> {
    rank_cases(&mut cases);
    if let Some(limit) = limit {
        cases.truncate(limit);
    }
    cases
}

/// Open cases at or above `threshold`, most urgent first.
pub fn urgent_cases(cases: &[CaseRecord], threshold: f64) -> Vec<&CaseRecord> {
    let mut urgent: Vec<&CaseRecord> = cases
        .iter()
        .filter(|case| case.urgency_score >= threshold && case.status != CaseStatus::Closed)
        .collect();
    urgent.sort_by(|a, b| b.urgency_score.total_cmp(&a.urgency_score));
    urgent
}

pub fn is_overdue(case: &CaseRecord, now: DateTime<Utc>) -> bool {
    case.status.is_active() && case.deadline.is_some_and(|deadline| deadline < now)
}

/// Active cases past their deadline, longest overdue first.
pub fn overdue_cases(cases: &[CaseRecord], now: DateTime<Utc>) -> Vec<&CaseRecord> {
    let mut overdue: Vec<&CaseRecord> = cases.iter().filter(|case| is_overdue(case, now)).collect();
    overdue.sort_by_key(|case| case.deadline);
    overdue
}
