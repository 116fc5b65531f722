pub mod actions;
pub mod items;
pub mod sink;

pub use actions::{NextAction, PriorityHighlight, UrgencyBand, next_action, priority_highlights};
pub use items::{ActionItem, ActionItemKind, Severity, identify_urgent_actions};
pub use sink::{
    CollectingNotificationSink, DispatchReport, NotificationSink, TracingNotificationSink,
    dispatch_actions,
};
