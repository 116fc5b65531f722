pub mod cases;
pub mod config;
pub mod metrics;
pub mod notifications;
pub mod priority;
