//! Track time labels shown next to the seek bar.

const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_MINUTE: u64 = 60;

/// Whole seconds for display. Fractions are dropped, never rounded up.
/// Negative and non-finite inputs collapse to zero.
pub fn whole_seconds(secs: f64) -> u64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    secs.floor() as u64
}

/// Format a playback position as `M:SS`, or `HH:MM:SS` once the hour digit is non-zero.
pub fn format_track_time(secs: f64) -> String {
    let total = whole_seconds(secs);
    let hours = total / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Total-duration label. Unknown durations (no metadata yet, live streams) render as `--:--`.
pub fn format_total_time(duration: Option<f64>) -> String {
    match duration {
        Some(secs) => format_track_time(secs),
        None => "--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reference_points() {
        assert_eq!(format_track_time(0.0), "0:00");
        assert_eq!(format_track_time(59.0), "0:59");
        assert_eq!(format_track_time(60.0), "1:00");
        assert_eq!(format_track_time(3600.0), "01:00:00");
        assert_eq!(format_track_time(3661.0), "01:01:01");
    }

    #[test]
    fn fractions_are_floored() {
        assert_eq!(format_track_time(59.9), "0:59");
        assert_eq!(format_track_time(0.999), "0:00");
        assert_eq!(format_track_time(3599.99), "59:59");
    }

    #[test]
    fn minutes_are_unpadded_below_an_hour() {
        for secs in [5.0, 65.0, 605.0, 3599.0] {
            let label = format_track_time(secs);
            let (minutes, seconds) = label.split_once(':').unwrap();
            assert!(!minutes.starts_with('0') || minutes == "0", "{label}");
            assert_eq!(seconds.len(), 2, "{label}");
        }
    }

    #[test]
    fn hour_labels_are_fully_padded() {
        assert_eq!(format_track_time(3605.0), "01:00:05");
        assert_eq!(format_track_time(36_000.0 + 59.0 * 60.0 + 59.0), "10:59:59");
        for secs in [3600.0, 7322.5, 86_399.0] {
            let label = format_track_time(secs);
            assert!(label.split(':').all(|part| part.len() == 2), "{label}");
        }
    }

    #[test]
    fn invalid_input_reads_as_zero() {
        assert_eq!(format_track_time(-5.0), "0:00");
        assert_eq!(format_track_time(f64::NAN), "0:00");
        assert_eq!(format_track_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn unknown_total_uses_placeholder() {
        assert_eq!(format_total_time(None), "--:--");
        assert_eq!(format_total_time(Some(125.4)), "2:05");
    }
}
