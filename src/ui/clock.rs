//! Time and date text

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::label::TextBuffer;
use crate::error::Error;

/// "HH:MM"
const TIME_BUF_LEN: usize = 8;
/// "Www Mmm DD"
const DATE_BUF_LEN: usize = 16;

/// Current time and date as display strings
#[derive(Debug, Clone, Default)]
pub struct ClockText {
    time: TextBuffer<TIME_BUF_LEN>,
    date: TextBuffer<DATE_BUF_LEN>,
}

impl ClockText {
    pub const fn new() -> Self {
        Self {
            time: TextBuffer::new(),
            date: TextBuffer::new(),
        }
    }

    /// Regenerate both strings from `now`
    pub fn update(&mut self, now: &NaiveDateTime, clock_24h: bool) -> Result<(), Error> {
        let hour = if clock_24h {
            now.hour()
        } else {
            now.hour12().1
        };
        self.time
            .set(format_args!("{:02}:{:02}", hour, now.minute()))?;
        self.date.set(format_args!(
            "{} {} {:02}",
            now.weekday(),
            month_abbrev(now.month0()),
            now.day()
        ))
    }

    pub fn time(&self) -> &str {
        self.time.as_str()
    }

    pub fn date(&self) -> &str {
        self.date.as_str()
    }
}

fn month_abbrev(month0: u32) -> &'static str {
    match month0 {
        0 => "Jan",
        1 => "Feb",
        2 => "Mar",
        3 => "Apr",
        4 => "May",
        5 => "Jun",
        6 => "Jul",
        7 => "Aug",
        8 => "Sep",
        9 => "Oct",
        10 => "Nov",
        _ => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn time_follows_24h_preference() {
        let mut clock = ClockText::new();
        let evening = at(2024, 3, 4, 21, 7);

        clock.update(&evening, true).unwrap();
        assert_eq!(clock.time(), "21:07");
        clock.update(&evening, false).unwrap();
        assert_eq!(clock.time(), "09:07");
    }

    #[test]
    fn twelve_hour_clock_shows_midnight_and_noon_as_twelve() {
        let mut clock = ClockText::new();
        clock.update(&at(2024, 3, 4, 0, 30), false).unwrap();
        assert_eq!(clock.time(), "12:30");
        clock.update(&at(2024, 3, 4, 12, 0), false).unwrap();
        assert_eq!(clock.time(), "12:00");
        clock.update(&at(2024, 3, 4, 0, 30), true).unwrap();
        assert_eq!(clock.time(), "00:30");
    }

    #[test]
    fn date_ignores_clock_style() {
        let mut clock = ClockText::new();
        let now = at(2024, 3, 4, 21, 7);

        clock.update(&now, true).unwrap();
        assert_eq!(clock.date(), "Mon Mar 04");
        clock.update(&now, false).unwrap();
        assert_eq!(clock.date(), "Mon Mar 04");
    }

    #[test]
    fn every_month_and_weekday_is_abbreviated() {
        let mut clock = ClockText::new();
        clock.update(&at(2023, 12, 31, 8, 0), true).unwrap();
        assert_eq!(clock.date(), "Sun Dec 31");
        clock.update(&at(2025, 9, 17, 8, 0), true).unwrap();
        assert_eq!(clock.date(), "Wed Sep 17");
        for month0 in 0..12 {
            assert_eq!(month_abbrev(month0).len(), 3);
        }
    }

    #[test]
    fn weekdays_use_three_letter_names() {
        let mut clock = ClockText::new();
        for (day, name) in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
            .into_iter()
            .enumerate()
        {
            clock.update(&at(2024, 3, 4 + day as u32, 8, 0), true).unwrap();
            assert_eq!(&clock.date()[..3], name);
        }
    }

    #[test]
    fn strings_start_empty() {
        let clock = ClockText::new();
        assert_eq!(clock.time(), "");
        assert_eq!(clock.date(), "");
    }
}
