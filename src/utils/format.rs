// src/utils/format.rs

/// Formats a duration given in minutes as `h:mm:ss`, or `m:ss` under an hour.
///
/// Zero, negative, non-finite and implausible (> 10000 minutes) values render as `--`.
pub fn format_minutes(minutes: f64) -> String {
    if !minutes.is_finite() || minutes <= 0.0 || minutes > 10_000.0 {
        return "--".to_string();
    }

    let total_seconds = (minutes * 60.0).round() as u64;
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Formats a percentage with at most one decimal, dropping a trailing `.0`.
pub fn format_percentage(percentage: f64) -> String {
    let rounded = (percentage * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}%", rounded as i64)
    } else {
        format!("{:.1}%", rounded)
    }
}
