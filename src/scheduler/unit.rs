/*
 * Copyright © 2024. EcomDev B.V.
 * All rights reserved.
 * See LICENSE for license details.
 */
use std::time::Duration;

/// Unit of the report period
///
/// Defaults to seconds

#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    #[default]
    Seconds,
    Minutes,
    Hours,
    Days,
}

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

impl TimeUnit {
    /// Converts value in this unit into duration
    ///
    /// Values that do not fit into [`Duration`] saturate instead of overflowing.
    pub fn to_duration(&self, value: u64) -> Duration {
        match self {
            Self::Nanoseconds => Duration::from_nanos(value),
            Self::Microseconds => Duration::from_micros(value),
            Self::Milliseconds => Duration::from_millis(value),
            Self::Seconds => Duration::from_secs(value),
            Self::Minutes => Duration::from_secs(value.saturating_mul(SECS_PER_MINUTE)),
            Self::Hours => Duration::from_secs(value.saturating_mul(SECS_PER_HOUR)),
            Self::Days => Duration::from_secs(value.saturating_mul(SECS_PER_DAY)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_seconds() {
        assert_eq!(TimeUnit::default(), TimeUnit::Seconds)
    }

    #[test]
    fn converts_value_to_duration() {
        assert_eq!(
            TimeUnit::Nanoseconds.to_duration(2_100_000_000),
            Duration::new(2, 100_000_000)
        );

        assert_eq!(
            TimeUnit::Microseconds.to_duration(29_000_020),
            Duration::new(29, 20_000)
        );

        assert_eq!(
            TimeUnit::Milliseconds.to_duration(25_100),
            Duration::new(25, 100_000_000)
        );

        assert_eq!(TimeUnit::Seconds.to_duration(25), Duration::new(25, 0));
        assert_eq!(TimeUnit::Minutes.to_duration(2), Duration::from_secs(120));
        assert_eq!(TimeUnit::Hours.to_duration(1), Duration::from_secs(3_600));
        assert_eq!(TimeUnit::Days.to_duration(1), Duration::from_secs(86_400));
    }

    #[test]
    fn saturates_large_values() {
        assert_eq!(
            TimeUnit::Days.to_duration(u64::MAX),
            Duration::from_secs(u64::MAX)
        );
    }
}
