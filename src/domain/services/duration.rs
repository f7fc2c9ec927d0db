#[cfg(test)]
#[path = "duration_test.rs"]
mod tests;

const SECOND: u64 = 1000;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

fn divide_rounded(value: u64, unit: u64) -> u64 {
    return (value + unit / 2) / unit;
}

/// Renders a duration in milliseconds the way a person would say it, e.g.
/// "a few seconds", "12 seconds", "3 minutes".
pub fn humanize_duration(millis: u64) -> String {
    if millis < 3 * SECOND {
        return "a few seconds".to_string();
    }

    if millis < 50 * SECOND {
        return format!("{} seconds", divide_rounded(millis, SECOND));
    }

    if millis < 90 * SECOND {
        return "a minute".to_string();
    }

    if millis < 45 * MINUTE {
        return format!("{} minutes", divide_rounded(millis, MINUTE));
    }

    if millis < 90 * MINUTE {
        return "an hour".to_string();
    }

    return format!("{} hours", divide_rounded(millis, HOUR));
}
