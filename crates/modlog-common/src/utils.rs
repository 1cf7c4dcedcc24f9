//! Shared utility functions for rendering times and text.

use chrono::{DateTime, Duration, Utc};

const UNITS: [(u64, &str, &str); 4] = [
    (86_400, "d", "day"),
    (3_600, "h", "hour"),
    (60, "m", "minute"),
    (1, "s", "second"),
];

/// Formats a timestamp for display.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Renders a number of seconds in short form, e.g. `1h 5m` or `30s`.
pub fn stringify_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }

    let mut rest = seconds;
    let mut parts = Vec::new();
    for (size, short, _) in UNITS {
        let amount = rest / size;
        rest %= size;
        if amount > 0 {
            parts.push(format!("{amount}{short}"));
        }
    }
    parts.join(" ")
}

/// Renders an elapsed duration in long form, e.g. `2 days, 3 hours and 1 minute`.
///
/// At most the three largest non-zero units are shown. Negative durations
/// are clamped to zero.
pub fn stringify_reldelta(delta: Duration) -> String {
    let mut rest = u64::try_from(delta.num_seconds()).unwrap_or(0);
    let mut parts = Vec::new();
    for (size, _, long) in UNITS {
        let amount = rest / size;
        rest %= size;
        if amount > 0 && parts.len() < 3 {
            let plural = if amount == 1 { "" } else { "s" };
            parts.push(format!("{amount} {long}{plural}"));
        }
    }

    match parts.as_slice() {
        [] => "0 seconds".to_string(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
