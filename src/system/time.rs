//! Time keeping
//!
//! The watch has no battery-backed RTC, so wall-clock time is a reference
//! point (set at build time or over Bluetooth) plus the uptime elapsed since.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReference {
    /// UTC clock time
    time: NaiveDateTime,
    /// Uptime at which `time` was valid
    uptime_micros: u64,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: NaiveDateTime::default(),
            uptime_micros: 0,
        }
    }
}

impl TimeReference {
    pub fn new(time: NaiveDateTime, uptime_micros: u64) -> Self {
        Self {
            time,
            uptime_micros,
        }
    }

    /// Create new time reference from a UNIX timestamp
    pub fn from_timestamp(secs: i64, uptime_micros: u64) -> Option<Self> {
        let time = DateTime::<Utc>::from_timestamp(secs, 0)?.naive_utc();
        Some(Self::new(time, uptime_micros))
    }

    /// Create new time reference from Current Time Service data.
    ///
    /// Returns `None` for short buffers or impossible dates.
    pub fn from_cts_bytes(bytes: &[u8], uptime_micros: u64) -> Option<Self> {
        let bytes: &[u8; 10] = bytes.get(..10)?.try_into().ok()?;
        let year = u16::from_le_bytes([bytes[0], bytes[1]]) as i32;
        let month = bytes[2] as u32;
        let day = bytes[3] as u32;
        let hour = bytes[4] as u32;
        let min = bytes[5] as u32;
        let sec = bytes[6] as u32;
        // bytes[7] is the day of week, derived from the date anyway
        let milli = bytes[8] as u32 * 1000 / 256; // Convert fractions_256 to milliseconds

        let time = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_milli_opt(hour, min, sec, milli)?;
        Some(Self::new(time, uptime_micros))
    }
}

pub struct TimeManager {
    reference: TimeReference,
    /// Offset of local time from UTC
    utc_offset_secs: i32,
}

impl TimeManager {
    pub fn new(reference: TimeReference, utc_offset_secs: i32) -> Self {
        Self {
            reference,
            utc_offset_secs,
        }
    }

    /// Local time at the given uptime
    pub fn local_time(&self, uptime_micros: u64) -> NaiveDateTime {
        let elapsed = uptime_micros.saturating_sub(self.reference.uptime_micros);
        self.reference.time
            + Duration::microseconds(elapsed as i64)
            + Duration::seconds(self.utc_offset_secs as i64)
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        info!("Clock reference updated");
        self.reference = reference;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn local_time_advances_with_uptime() {
        // 2024-03-04 20:00:00 UTC
        let reference = TimeReference::from_timestamp(1_709_582_400, 5_000_000).unwrap();
        let clock = TimeManager::new(reference, 3_600);

        let now = clock.local_time(5_000_000 + 90 * 1_000_000);
        assert_eq!((now.hour(), now.minute(), now.second()), (21, 1, 30));
    }

    #[test]
    fn uptime_before_reference_does_not_go_backwards() {
        let reference = TimeReference::from_timestamp(0, 10_000_000).unwrap();
        let clock = TimeManager::new(reference, 0);
        assert_eq!(clock.local_time(0), NaiveDateTime::default());
    }

    #[test]
    fn cts_bytes_are_decoded() {
        // 2024-03-04 09:05:07, Monday, 128/256 s
        let bytes = [0xe8, 0x07, 3, 4, 9, 5, 7, 1, 128, 0];
        let reference = TimeReference::from_cts_bytes(&bytes, 0).unwrap();
        let clock = TimeManager::new(reference, 0);
        let now = clock.local_time(0);
        assert_eq!(now.to_string(), "2024-03-04 09:05:07.500");
    }

    #[test]
    fn malformed_cts_bytes_are_rejected() {
        assert_eq!(TimeReference::from_cts_bytes(&[0xe8, 0x07, 3], 0), None);
        let bad_month = [0xe8, 0x07, 13, 4, 9, 5, 7, 1, 0, 0];
        assert_eq!(TimeReference::from_cts_bytes(&bad_month, 0), None);
    }
}
