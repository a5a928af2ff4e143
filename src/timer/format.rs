//! Elapsed-time rendering

use std::time::Duration;

use super::TimerPhase;

/// Placeholder shown while no timer is running
pub const IDLE_ELAPSED: &str = "00:00:00";

/// Render a duration as `HH:MM:SS`, truncating sub-second precision.
///
/// Hours keep counting past 24 rather than wrapping.
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Human-readable status line for a phase and its elapsed time
pub fn status_text(phase: TimerPhase, elapsed: Duration) -> String {
    match phase {
        TimerPhase::Idle => "Not running".to_string(),
        TimerPhase::Running => format!("Running ({})", format_hms(elapsed)),
        TimerPhase::Paused => format!("Paused ({})", format_hms(elapsed)),
    }
}

/// Compact status-bar title: a state glyph followed by the elapsed clock
pub fn status_title(phase: TimerPhase, elapsed: Duration) -> String {
    match phase {
        TimerPhase::Idle => format!("⏹ {}", IDLE_ELAPSED),
        TimerPhase::Running => format!("▶ {}", format_hms(elapsed)),
        TimerPhase::Paused => format!("⏸ {}", format_hms(elapsed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_instead_of_rounding() {
        assert_eq!(format_hms(Duration::from_millis(9_999)), "00:00:09");
        assert_eq!(format_hms(Duration::from_millis(59_500)), "00:00:59");
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(Duration::ZERO), "00:00:00");
        assert_eq!(format_hms(Duration::from_secs(3_725)), "01:02:05");
        assert_eq!(format_hms(Duration::from_secs(100 * 3600)), "100:00:00");
    }

    #[test]
    fn status_text_per_phase() {
        let four = Duration::from_secs(4);
        assert_eq!(status_text(TimerPhase::Idle, four), "Not running");
        assert_eq!(status_text(TimerPhase::Running, four), "Running (00:00:04)");
        assert_eq!(status_text(TimerPhase::Paused, four), "Paused (00:00:04)");
    }

    #[test]
    fn idle_title_ignores_elapsed() {
        assert_eq!(
            status_title(TimerPhase::Idle, Duration::from_secs(42)),
            "⏹ 00:00:00"
        );
        assert_eq!(
            status_title(TimerPhase::Paused, Duration::from_secs(61)),
            "⏸ 00:01:01"
        );
    }
}
