use std::time::Duration;

/// Format a `Duration` as `MM:SS`, zero padded. Minutes are not wrapped into hours.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
