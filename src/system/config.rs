//! General watch configuration

use chrono::{NaiveTime, Timelike};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Daily period during which alerts are suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuietHours {
    /// First quiet minute of the day (inclusive)
    start: u16,
    /// First minute after the quiet period (exclusive)
    end: u16,
}

impl QuietHours {
    /// Quiet period from `start` up to `end`, both given as (hour, minute).
    ///
    /// If `end` is earlier than `start` the period wraps past midnight.
    pub const fn new(start: (u8, u8), end: (u8, u8)) -> Self {
        Self {
            start: (start.0 as u16 * 60 + start.1 as u16) % MINUTES_PER_DAY,
            end: (end.0 as u16 * 60 + end.1 as u16) % MINUTES_PER_DAY,
        }
    }

    /// Whether `time` falls inside the quiet period
    pub fn is_active(&self, time: NaiveTime) -> bool {
        let minute = (time.hour() * 60 + time.minute()) as u16;
        if self.start <= self.end {
            (self.start..self.end).contains(&minute)
        } else {
            minute >= self.start || minute < self.end
        }
    }
}

/// Watch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchConfig {
    /// Offset of local time from UTC in seconds
    pub utc_offset_secs: i32,
    /// Show the time in 24 hour format
    pub clock_24h: bool,
    /// Period without vibration alerts
    pub quiet_hours: Option<QuietHours>,
}

impl WatchConfig {
    pub const DEFAULT: Self = Self {
        utc_offset_secs: 1 * 3_600,
        clock_24h: true,
        quiet_hours: Some(QuietHours::new((22, 0), (7, 0))),
    };

    pub fn quiet_time_is_active(&self, now: NaiveTime) -> bool {
        self.quiet_hours.is_some_and(|quiet| quiet.is_active(now))
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
