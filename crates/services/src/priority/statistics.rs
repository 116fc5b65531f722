use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::cases::{CaseRecord, CaseStatus};

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
pub struct PriorityStatistics {
    pub total_cases: usize,
    pub critical_cases: usize,
    pub high_priority_cases: usize,
    pub overdue_cases: usize,
    pub due_this_week: usize,
    pub urgent_cases: usize,
    pub average_urgency_score: f64,
    pub cases_by_status: BTreeMap<CaseStatus, usize>,
}

impl PriorityStatistics {
    pub fn collect(cases: &[CaseRecord], now: DateTime<Utc>, urgent_threshold: f64) -> Self {
        let week_end = now + Duration::days(7);
        let mut cases_by_status = BTreeMap::new();
        let mut stats = PriorityStatistics {
            total_cases: cases.len(),
            critical_cases: 0,
            high_priority_cases: 0,
            overdue_cases: 0,
            due_this_week: 0,
            urgent_cases: 0,
            average_urgency_score: 0.0,
            cases_by_status: BTreeMap::new(),
        };
        let mut score_total = 0.0;

        for case in cases {
            match case.priority_level {
                1 => stats.critical_cases += 1,
                2 => stats.high_priority_cases += 1,
                _ => {}
            }
            // Any past deadline counts here, regardless of status.
            if let Some(deadline) = case.deadline {
                if deadline < now {
                    stats.overdue_cases += 1;
                } else if deadline <= week_end {
                    stats.due_this_week += 1;
                }
            }
            if case.urgency_score >= urgent_threshold {
                stats.urgent_cases += 1;
            }
            score_total += case.urgency_score;
            *cases_by_status.entry(case.status).or_insert(0) += 1;
        }

        if !cases.is_empty() {
            stats.average_urgency_score = score_total / cases.len() as f64;
        }
        stats.cases_by_status = cases_by_status;
        stats
    }
}
