pub mod ranking;
pub mod recompute;
pub mod scheduler;
pub mod scorer;
pub mod statistics;

pub use ranking::{compare_priority, overdue_cases, prioritized_cases, rank_cases, urgent_cases};
pub use recompute::{
    BatchOutcome, BatchReport, PriorityManager, PriorityUpdateError, ScoredCase, recompute_scores,
};
pub use scheduler::PriorityScheduler;
pub use scorer::{PriorityFactor, ScoreResult, compute_score};
pub use statistics::PriorityStatistics;
