use super::humanize_duration;

#[test]
fn it_humanizes_short_durations() {
    assert_eq!(humanize_duration(0), "a few seconds");
    assert_eq!(humanize_duration(2999), "a few seconds");
}

#[test]
fn it_humanizes_seconds() {
    assert_eq!(humanize_duration(3000), "3 seconds");
    assert_eq!(humanize_duration(12_400), "12 seconds");
}

#[test]
fn it_humanizes_minutes() {
    assert_eq!(humanize_duration(60_000), "a minute");
    assert_eq!(humanize_duration(5 * 60_000), "5 minutes");
}

#[test]
fn it_humanizes_hours() {
    assert_eq!(humanize_duration(60 * 60_000), "an hour");
    assert_eq!(humanize_duration(3 * 60 * 60_000), "3 hours");
}
