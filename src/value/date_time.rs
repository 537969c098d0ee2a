//! Date and time value types
//!
//! These implement the IPTC date/time dataset formats. Out-of-range
//! components are rejected softly: the value is zeroed and a warning is
//! logged, matching the container-load-continues policy for bad entries.

use std::fmt;

use log::warn;

use crate::errors::{MetaError, MetaResult};

/// A calendar date (IPTC DateCreated and friends)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateValue {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Days in a month, honoring leap years
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Days from the civil epoch (1970-01-01) for a given date
///
/// Howard Hinnant's days-from-civil algorithm, valid far beyond the
/// range this crate cares about.
fn days_from_civil(y: i32, m: u32, d: u32) -> i64 {
    let y = if m <= 2 { y - 1 } else { y } as i64;
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (m as i64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

impl DateValue {
    /// Parses `YYYYMMDD` or `YYYY-MM-DD`
    ///
    /// An out-of-range month or day zeroes both fields with a warning
    /// rather than failing the surrounding parse.
    pub fn read_str(&mut self, s: &str) -> MetaResult<()> {
        let compact: String = s.chars().filter(|c| *c != '-').collect();
        if compact.len() != 8 || !compact.chars().all(|c| c.is_ascii_digit()) {
            return Err(MetaError::InvalidValue(format!("invalid date format: {}", s)));
        }

        let year: i32 = compact[0..4].parse().map_err(|_| {
            MetaError::InvalidValue(format!("invalid date year: {}", s))
        })?;
        let month: u32 = compact[4..6].parse().unwrap_or(0);
        let day: u32 = compact[6..8].parse().unwrap_or(0);

        self.year = year;
        if month == 0 || month > 12 || day == 0 || day > days_in_month(year, month) {
            warn!("Invalid date components in '{}', clearing month and day", s);
            self.month = 0;
            self.day = 0;
        } else {
            self.month = month;
            self.day = day;
        }

        Ok(())
    }

    /// Serializes to the 8-byte IPTC wire form `YYYYMMDD`
    pub fn to_wire_string(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }

    /// Seconds since the Unix epoch at midnight of this date
    ///
    /// Returns None when the date is invalid or precedes the epoch.
    pub fn to_i64(&self) -> Option<i64> {
        if self.month == 0 || self.day == 0 {
            return None;
        }
        let days = days_from_civil(self.year, self.month, self.day);
        if days < 0 {
            return None;
        }
        Some(days * 86400)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A time of day with timezone offset (IPTC TimeCreated and friends)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeValue {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Timezone hour offset, signed
    pub tz_hour: i32,
    /// Timezone minute offset, carries the sign of tz_hour
    pub tz_minute: i32,
}

impl TimeValue {
    /// Parses `HHMMSS`, `HHMMSS±HHMM`, `HH:MM:SS`, `HH:MM:SS±HH:MM`,
    /// optionally suffixed with `Z` for UTC
    ///
    /// A leap second (second == 60) is accepted; anything beyond that,
    /// or an hour/minute out of range, zeroes the value with a warning.
    pub fn read_str(&mut self, s: &str) -> MetaResult<()> {
        let trimmed = s.trim_end_matches('Z');
        let compact: String = trimmed.chars().filter(|c| *c != ':').collect();

        let (time_part, tz_part) = match compact.find(|c| c == '+' || c == '-') {
            Some(pos) => (&compact[..pos], Some(&compact[pos..])),
            None => (&compact[..], None),
        };

        if time_part.len() != 6 || !time_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(MetaError::InvalidValue(format!("invalid time format: {}", s)));
        }

        let hour: u32 = time_part[0..2].parse().unwrap_or(99);
        let minute: u32 = time_part[2..4].parse().unwrap_or(99);
        let second: u32 = time_part[4..6].parse().unwrap_or(99);

        let (tz_hour, tz_minute) = match tz_part {
            Some(tz) => {
                if tz.len() != 5 || !tz[1..].chars().all(|c| c.is_ascii_digit()) {
                    return Err(MetaError::InvalidValue(format!("invalid timezone: {}", s)));
                }
                let sign: i32 = if tz.starts_with('-') { -1 } else { 1 };
                let th: i32 = tz[1..3].parse().unwrap_or(0);
                let tm: i32 = tz[3..5].parse().unwrap_or(0);
                (sign * th, sign * tm)
            }
            None => (0, 0),
        };

        if hour > 23 || minute > 59 || second > 60 {
            warn!("Invalid time components in '{}', clearing value", s);
            *self = TimeValue::default();
            return Ok(());
        }

        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self.tz_hour = tz_hour;
        self.tz_minute = tz_minute;
        Ok(())
    }

    /// Serializes to the 11-byte IPTC wire form `HHMMSS±HHMM`
    pub fn to_wire_string(&self) -> String {
        let sign = if self.tz_hour < 0 || self.tz_minute < 0 { '-' } else { '+' };
        format!(
            "{:02}{:02}{:02}{}{:02}{:02}",
            self.hour, self.minute, self.second,
            sign, self.tz_hour.abs(), self.tz_minute.abs()
        )
    }

    /// The UTC second of day, wrapped into 0..86400
    pub fn to_i64(&self) -> Option<i64> {
        let local = self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64;
        let offset = self.tz_hour as i64 * 3600 + self.tz_minute as i64 * 60;
        let mut utc = local - offset;
        while utc < 0 {
            utc += 86400;
        }
        Some(utc % 86400)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.tz_hour < 0 || self.tz_minute < 0 { '-' } else { '+' };
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}:{:02}",
            self.hour, self.minute, self.second,
            sign, self.tz_hour.abs(), self.tz_minute.abs()
        )
    }
}
