//! Case urgency scoring.
//!
//! Five weighted sub-scores (each 0-100) are combined into a composite,
//! multiplied by a status modifier and clamped into [0, 100]:
//!
//! ```text
//! composite = deadline × 0.40 + priority × 0.30 + client × 0.15
//!           + case_type × 0.10 + activity × 0.05
//! urgency   = clamp(composite × status_modifier, 0, 100)
//! ```
//!
//! Every function here takes `now` explicitly and never reads the clock.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cases::{CaseRecord, CaseStatus, CaseType};

pub const MAX_SCORE: f64 = 100.0;
pub const NO_DEADLINE_SCORE: f64 = 20.0;
pub const DEFAULT_PRIORITY_LEVEL_SCORE: f64 = 60.0;
pub const DEFAULT_CLIENT_IMPORTANCE_SCORE: f64 = 50.0;

const MILLIS_PER_DAY: i64 = 86_400_000;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(rename_all = "snake_case")]
pub enum PriorityFactor {
    DeadlineUrgency,
    CasePriorityLevel,
    ClientImportance,
    CaseTypeUrgency,
    ActivityRecency,
}

impl PriorityFactor {
    pub const ALL: [PriorityFactor; 5] = [
        PriorityFactor::DeadlineUrgency,
        PriorityFactor::CasePriorityLevel,
        PriorityFactor::ClientImportance,
        PriorityFactor::CaseTypeUrgency,
        PriorityFactor::ActivityRecency,
    ];

    /// Percentage of the composite; the five weights sum to 100.
    pub fn weight(self) -> f64 {
        match self {
            PriorityFactor::DeadlineUrgency => 40.0,
            PriorityFactor::CasePriorityLevel => 30.0,
            PriorityFactor::ClientImportance => 15.0,
            PriorityFactor::CaseTypeUrgency => 10.0,
            PriorityFactor::ActivityRecency => 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ScoreResult {
    pub urgency_score: f64,
    /// Unweighted sub-score per factor, each within [0, 100].
    pub factors: BTreeMap<PriorityFactor, f64>,
}

impl ScoreResult {
    pub fn factor(&self, factor: PriorityFactor) -> f64 {
        self.factors.get(&factor).copied().unwrap_or(0.0)
    }
}

/// Whole days in `delta`, rounded toward negative infinity.
pub fn whole_days(delta: Duration) -> i64 {
    delta.num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

pub fn deadline_urgency(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(deadline) = deadline else {
        return NO_DEADLINE_SCORE;
    };

    let remaining = deadline - now;
    let days = whole_days(remaining);
    let hours = remaining.num_milliseconds() as f64 / MILLIS_PER_HOUR;

    if days < 0 {
        (95.0 + days.unsigned_abs() as f64).min(MAX_SCORE)
    } else if hours <= 24.0 {
        90.0
    } else if days <= 3 {
        80.0 - days as f64 * 5.0
    } else if days <= 7 {
        65.0 - days as f64 * 3.0
    } else if days <= 30 {
        40.0 - days as f64
    } else {
        (30.0 - days as f64 / 10.0).max(10.0)
    }
}

pub fn priority_level_score(priority_level: i32) -> f64 {
    match priority_level {
        1 => 100.0,
        2 => 80.0,
        3 => 60.0,
        4 => 40.0,
        5 => 20.0,
        _ => DEFAULT_PRIORITY_LEVEL_SCORE,
    }
}

/// Anything outside 1..=5, including a missing value, scores as the midpoint.
pub fn client_importance_score(client_importance: Option<i32>) -> f64 {
    match client_importance {
        Some(value @ 1..=5) => f64::from(value - 1) * 25.0,
        _ => DEFAULT_CLIENT_IMPORTANCE_SCORE,
    }
}

pub fn case_type_score(case_type: CaseType) -> f64 {
    match case_type {
        CaseType::Criminal | CaseType::PersonalInjury | CaseType::Immigration => 80.0,
        CaseType::Family | CaseType::Property => 60.0,
        CaseType::Civil | CaseType::Corporate => 40.0,
        CaseType::Other => 30.0,
    }
}

pub fn activity_recency(last_activity: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(last_activity) = last_activity else {
        return 0.0;
    };

    // Activity stamped in the future (negative days) lands in the 80 band.
    match whole_days(now - last_activity) {
        0 => 100.0,
        ..=3 => 80.0,
        4..=7 => 60.0,
        8..=14 => 40.0,
        15..=30 => 20.0,
        _ => 0.0,
    }
}

pub fn status_modifier(status: CaseStatus) -> f64 {
    match status {
        CaseStatus::Filed => 1.1,
        CaseStatus::Investigation => 1.0,
        CaseStatus::Hearing => 1.2,
        CaseStatus::Trial => 1.3,
        CaseStatus::OnHold => 0.5,
        CaseStatus::Closed => 0.1,
        CaseStatus::Unknown => 1.0,
    }
}

pub fn compute_score(case: &CaseRecord, now: DateTime<Utc>) -> ScoreResult {
    let factors: BTreeMap<PriorityFactor, f64> = PriorityFactor::ALL
        .into_iter()
        .map(|factor| {
            let raw = match factor {
                PriorityFactor::DeadlineUrgency => deadline_urgency(case.deadline, now),
                PriorityFactor::CasePriorityLevel => priority_level_score(case.priority_level),
                PriorityFactor::ClientImportance => client_importance_score(case.client_importance),
                PriorityFactor::CaseTypeUrgency => case_type_score(case.case_type),
                PriorityFactor::ActivityRecency => activity_recency(case.last_activity, now),
            };
            (factor, raw.clamp(0.0, MAX_SCORE))
        })
        .collect();

    let composite: f64 = factors
        .iter()
        .map(|(factor, score)| score * factor.weight() / 100.0)
        .sum();

    let urgency_score = (composite * status_modifier(case.status)).clamp(0.0, MAX_SCORE);

    tracing::debug!(
        case_number = %case.case_number,
        composite,
        urgency_score,
        "priority computed"
    );

    ScoreResult {
        urgency_score,
        factors,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn base_case() -> CaseRecord {
        CaseRecord {
            id: Uuid::new_v4(),
            case_number: "CN-100".into(),
            case_type: CaseType::Civil,
            status: CaseStatus::Investigation,
            priority_level: 3,
            client_importance: Some(3),
            deadline: None,
            next_hearing: None,
            assigned_lawyer: None,
            last_activity: Some(now()),
            urgency_score: 0.0,
        }
    }

    #[test]
    fn priority_levels_map_to_fixed_scores() {
        let expected = [(1, 100.0), (2, 80.0), (3, 60.0), (4, 40.0), (5, 20.0)];
        for (level, score) in expected {
            assert_eq!(priority_level_score(level), score);
        }
        for level in [-1, 0, 6, 42] {
            assert_eq!(priority_level_score(level), 60.0);
        }
    }

    #[test]
    fn client_importance_is_linear() {
        for value in 1..=5 {
            assert_eq!(
                client_importance_score(Some(value)),
                f64::from((value - 1) * 25)
            );
        }
        assert_eq!(client_importance_score(None), 50.0);
        assert_eq!(client_importance_score(Some(0)), 50.0);
        assert_eq!(client_importance_score(Some(-2)), 50.0);
        assert_eq!(client_importance_score(Some(9)), 50.0);
    }

    #[test]
    fn missing_deadline_is_flat_twenty() {
        assert_eq!(deadline_urgency(None, now()), 20.0);

        let mut case = base_case();
        case.status = CaseStatus::Trial;
        case.priority_level = 1;
        case.last_activity = None;
        let result = compute_score(&case, now());
        assert_eq!(result.factor(PriorityFactor::DeadlineUrgency), 20.0);
    }

    #[test]
    fn deadline_bands() {
        let at = |delta: Duration| deadline_urgency(Some(now() + delta), now());

        assert_eq!(at(Duration::days(-5)), 100.0);
        assert_eq!(at(Duration::days(-2)), 97.0);
        assert_eq!(at(Duration::minutes(-30)), 96.0);
        assert_eq!(at(Duration::hours(5)), 90.0);
        assert_eq!(at(Duration::hours(24)), 90.0);
        assert_eq!(at(Duration::hours(30)), 75.0);
        assert_eq!(at(Duration::days(2)), 70.0);
        assert_eq!(at(Duration::days(3)), 65.0);
        assert_eq!(at(Duration::days(5)), 50.0);
        assert_eq!(at(Duration::days(7)), 44.0);
        assert_eq!(at(Duration::days(10)), 30.0);
        assert_eq!(at(Duration::days(30)), 10.0);
        assert_eq!(at(Duration::days(45)), 25.5);
        assert_eq!(at(Duration::days(400)), 10.0);
    }

    #[test]
    fn partial_overdue_days_round_down() {
        // 4.5 days overdue floors to -5.
        let deadline = now() - Duration::hours(108);
        assert_eq!(deadline_urgency(Some(deadline), now()), 100.0);
    }

    #[test]
    fn case_type_groups() {
        assert_eq!(case_type_score(CaseType::Criminal), 80.0);
        assert_eq!(case_type_score(CaseType::PersonalInjury), 80.0);
        assert_eq!(case_type_score(CaseType::Immigration), 80.0);
        assert_eq!(case_type_score(CaseType::Family), 60.0);
        assert_eq!(case_type_score(CaseType::Property), 60.0);
        assert_eq!(case_type_score(CaseType::Civil), 40.0);
        assert_eq!(case_type_score(CaseType::Corporate), 40.0);
        assert_eq!(case_type_score(CaseType::Other), 30.0);
    }

    #[test]
    fn activity_recency_bands() {
        let ago = |days: i64| activity_recency(Some(now() - Duration::days(days)), now());

        assert_eq!(activity_recency(None, now()), 0.0);
        assert_eq!(ago(0), 100.0);
        assert_eq!(ago(3), 80.0);
        assert_eq!(ago(7), 60.0);
        assert_eq!(ago(14), 40.0);
        assert_eq!(ago(30), 20.0);
        assert_eq!(ago(31), 0.0);
    }

    #[test]
    fn future_activity_scores_in_the_eighty_band() {
        let ahead = |delta: Duration| activity_recency(Some(now() + delta), now());

        assert_eq!(ahead(Duration::days(2)), 80.0);
        assert_eq!(ahead(Duration::minutes(5)), 80.0);
        assert_eq!(ahead(Duration::zero()), 100.0);
    }

    #[test]
    fn composite_uses_weight_table() {
        // deadline 20, priority 60, client 50, civil 40, activity 100
        let result = compute_score(&base_case(), now());
        let expected = 20.0 * 0.4 + 60.0 * 0.3 + 50.0 * 0.15 + 40.0 * 0.1 + 100.0 * 0.05;
        assert!((result.urgency_score - expected).abs() < 1e-9);
        assert_eq!(result.factors.len(), 5);
    }

    #[test]
    fn weights_sum_to_one_hundred() {
        let total: f64 = PriorityFactor::ALL.iter().map(|f| f.weight()).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn closed_and_trial_differ_only_by_modifier() {
        let mut trial = base_case();
        trial.status = CaseStatus::Trial;
        let mut closed = trial.clone();
        closed.status = CaseStatus::Closed;

        let trial_result = compute_score(&trial, now());
        let closed_result = compute_score(&closed, now());

        assert_eq!(trial_result.factors, closed_result.factors);
        let ratio = closed_result.urgency_score / trial_result.urgency_score;
        assert!((ratio - 0.1 / 1.3).abs() < 1e-9);
    }

    #[test]
    fn final_score_is_always_clamped() {
        let statuses = [
            CaseStatus::Filed,
            CaseStatus::Investigation,
            CaseStatus::Hearing,
            CaseStatus::Trial,
            CaseStatus::Closed,
            CaseStatus::OnHold,
            CaseStatus::Unknown,
        ];
        let deadlines = [
            None,
            Some(now() - Duration::days(10_000)),
            Some(now() - Duration::hours(1)),
            Some(now() + Duration::hours(3)),
            Some(now() + Duration::days(5)),
            Some(now() + Duration::days(3_650)),
        ];

        for status in statuses {
            for deadline in deadlines {
                for level in [-3, 1, 3, 5, 99] {
                    for importance in [None, Some(-4), Some(1), Some(5), Some(12)] {
                        let case = CaseRecord {
                            status,
                            deadline,
                            priority_level: level,
                            client_importance: importance,
                            case_type: CaseType::Criminal,
                            ..base_case()
                        };
                        let result = compute_score(&case, now());
                        assert!((0.0..=100.0).contains(&result.urgency_score));
                        for value in result.factors.values() {
                            assert!((0.0..=100.0).contains(value));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn trial_overdue_critical_case_hits_ceiling() {
        let case = CaseRecord {
            status: CaseStatus::Trial,
            deadline: Some(now() - Duration::days(5)),
            priority_level: 1,
            client_importance: Some(5),
            case_type: CaseType::Criminal,
            ..base_case()
        };
        assert_eq!(compute_score(&case, now()).urgency_score, 100.0);
    }

    #[test]
    fn scoring_is_deterministic_for_fixed_now() {
        let mut case = base_case();
        case.deadline = Some(now() + Duration::days(4));
        assert_eq!(compute_score(&case, now()), compute_score(&case, now()));
    }
}
