pub mod models;
pub mod repository;

pub use models::{CaseRecord, CaseRecordError, CaseRow, CaseStatus, CaseType};
pub use repository::{CaseFilter, CaseStore, InMemoryCaseStore};
