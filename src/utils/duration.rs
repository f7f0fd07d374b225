//! Conversion from raw second counts into calendar-style durations.

use std::fmt;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;

/// Breakdown of a duration into days/hours/minutes/seconds.
///
/// Display renders the Portuguese listing-time sentence used by the
/// reporting screens, e.g. `"2 dia(s), 3 hora(s), 0 minuto(s), 41 segundo(s)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDuration {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeDuration {
    pub const ZERO: TimeDuration = TimeDuration {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };
}

impl fmt::Display for TimeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} dia(s), {} hora(s), {} minuto(s), {} segundo(s)",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Split a second count into a [`TimeDuration`].
pub fn seconds_to_time_duration(total_seconds: u64) -> TimeDuration {
    let days = total_seconds / SECONDS_PER_DAY;
    let remainder = total_seconds % SECONDS_PER_DAY;
    let hours = remainder / SECONDS_PER_HOUR;
    let remainder = remainder % SECONDS_PER_HOUR;
    let minutes = remainder / SECONDS_PER_MINUTE;
    let seconds = remainder % SECONDS_PER_MINUTE;

    TimeDuration {
        days,
        hours,
        minutes,
        seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seconds() {
        assert_eq!(seconds_to_time_duration(0), TimeDuration::ZERO);
    }

    #[test]
    fn full_breakdown() {
        // 2 days, 3 hours, 4 minutes, 5 seconds
        let total = 2 * SECONDS_PER_DAY + 3 * SECONDS_PER_HOUR + 4 * SECONDS_PER_MINUTE + 5;
        let time = seconds_to_time_duration(total);
        assert_eq!(
            time,
            TimeDuration {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5
            }
        );
    }

    #[test]
    fn formats_portuguese_sentence() {
        let time = seconds_to_time_duration(90);
        assert_eq!(
            time.to_string(),
            "0 dia(s), 0 hora(s), 1 minuto(s), 30 segundo(s)"
        );
    }
}
