pub const MAX_MESSAGE_LEN: usize = 280;

/// Truncates on a char boundary, appending "..." when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

/// "#CN-2024-001" style reference used in human-facing messages.
pub fn case_reference(case_number: &str) -> String {
    let trimmed = case_number.trim().trim_start_matches('#');
    format!("#{}", trimmed)
}

pub fn pluralize_days(days: i64) -> String {
    if days.abs() == 1 {
        format!("{} day", days)
    } else {
        format!("{} days", days)
    }
}
