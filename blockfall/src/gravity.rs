use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BlockfallError, Result};

/// Fall speed setting, 1 (slowest) to 10 (fastest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    pub const DEFAULT: SpeedLevel = SpeedLevel(5);

    /// Build a level, clamping into 1..=10
    pub fn new(level: u8) -> Self {
        SpeedLevel(level.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Time between gravity ticks: 1000ms at level 1 down to 100ms at level 10
    pub fn interval(self) -> Duration {
        Duration::from_millis(1000 - (self.0 as u64 - 1) * 100)
    }

    pub fn faster(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn slower(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for SpeedLevel {
    type Error = BlockfallError;

    fn try_from(level: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(SpeedLevel(level))
        } else {
            Err(BlockfallError::InvalidSpeed(level))
        }
    }
}

impl From<SpeedLevel> for u8 {
    fn from(level: SpeedLevel) -> u8 {
        level.0
    }
}

impl std::fmt::Display for SpeedLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Polled gravity timer.
///
/// The owner feeds it elapsed time and gets back how many ticks became due,
/// so there is no wall clock inside and tests can step it exactly. I.e. with a
/// 300ms interval, `advance(200ms)` yields 0 and the next `advance(200ms)`
/// yields 1 with 100ms carried over.
#[derive(Debug, Clone)]
pub struct GravityClock {
    interval: Duration,
    elapsed: Duration,
}

impl GravityClock {
    pub fn new(interval: Duration) -> Self {
        GravityClock {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated toward the next tick
    pub fn pending(&self) -> Duration {
        self.elapsed
    }

    /// Replace the schedule. Progress toward the old interval is discarded,
    /// the next tick fires one full new interval from now.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        self.elapsed = Duration::ZERO;
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Returns the number of ticks due after `dt` more time has passed
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut ticks = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            ticks += 1;
        }
        ticks
    }
}

impl Default for GravityClock {
    fn default() -> Self {
        Self::new(SpeedLevel::DEFAULT.interval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_intervals() {
        assert_eq!(SpeedLevel::new(1).interval(), Duration::from_millis(1000));
        assert_eq!(SpeedLevel::new(5).interval(), Duration::from_millis(600));
        assert_eq!(SpeedLevel::new(10).interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_speed_clamps_and_validates() {
        assert_eq!(SpeedLevel::new(0).get(), 1);
        assert_eq!(SpeedLevel::new(42).get(), 10);
        assert_eq!(SpeedLevel::new(10).faster().get(), 10);
        assert_eq!(SpeedLevel::new(1).slower().get(), 1);
        assert_eq!(SpeedLevel::try_from(7).map(SpeedLevel::get), Ok(7));
        assert_eq!(SpeedLevel::try_from(0), Err(BlockfallError::InvalidSpeed(0)));
        assert_eq!(SpeedLevel::try_from(11), Err(BlockfallError::InvalidSpeed(11)));
    }

    #[test]
    fn test_speed_deserialize_validates() {
        let level: SpeedLevel = serde_json::from_str("7").unwrap();
        assert_eq!(level.get(), 7);
        assert_eq!(serde_json::to_string(&level).unwrap(), "7");
        assert!(serde_json::from_str::<SpeedLevel>("0").is_err());
        assert!(serde_json::from_str::<SpeedLevel>("11").is_err());
    }

    #[test]
    fn test_clock_fires_once_per_interval() {
        let mut clock = GravityClock::new(Duration::from_millis(300));
        assert_eq!(clock.advance(Duration::from_millis(200)), 0);
        assert_eq!(clock.advance(Duration::from_millis(200)), 1);
        assert_eq!(clock.pending(), Duration::from_millis(100));
        assert_eq!(clock.advance(Duration::from_millis(200)), 1);
        assert_eq!(clock.advance(Duration::from_millis(900)), 3);
    }

    #[test]
    fn test_reset_keeps_interval() {
        let mut clock = GravityClock::new(Duration::from_millis(300));
        assert_eq!(clock.advance(Duration::from_millis(250)), 0);
        clock.reset();
        assert_eq!(clock.pending(), Duration::ZERO);
        assert_eq!(clock.interval(), Duration::from_millis(300));
        assert_eq!(clock.advance(Duration::from_millis(299)), 0);
        assert_eq!(clock.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_set_interval_reschedules_instead_of_stacking() {
        let mut clock = GravityClock::new(Duration::from_millis(1000));
        assert_eq!(clock.advance(Duration::from_millis(900)), 0);

        // Rapid speed changes: every change restarts the countdown
        for level in [3, 8, 2, 10, 6] {
            clock.set_interval(SpeedLevel::new(level).interval());
            assert_eq!(clock.pending(), Duration::ZERO);
            assert_eq!(clock.advance(Duration::from_millis(50)), 0);
        }

        // level 6 = 500ms; 50ms already spent
        assert_eq!(clock.advance(Duration::from_millis(449)), 0);
        assert_eq!(clock.advance(Duration::from_millis(1)), 1);
    }
}
