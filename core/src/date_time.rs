// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! XSD temporal values
//!
//! [`DateTime`] wraps `time::OffsetDateTime` and uses RFC 3339 for both
//! directions; `+00:00` is rendered as `Z` while non-UTC offsets are
//! preserved. XSD allows a `dateTime` without timezone; such values are
//! read as UTC.
//!
//! [`Date`] and [`Time`] keep the optional timezone of the lexical
//! value so that it is written back unchanged.
//!
//! Examples
//! ```rust
//! use soapgen_core::DateTime;
//! use soapgen_core::XmlText;
//!
//! let z = DateTime::from_text("2023-12-25T10:30:00Z").unwrap();
//! assert_eq!(z.to_text(), "2023-12-25T10:30:00Z");
//!
//! let local = DateTime::from_text("2023-12-25T10:30:00").unwrap();
//! assert_eq!(local, z);
//! ```

use crate::text::InvalidValue;
use crate::text::XmlText;
use core::str::FromStr;
use std::convert::TryFrom;
use std::fmt::Display;
use std::fmt::Error as FmtError;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::time::Duration as StdDuration;
use std::time::SystemTime;
use time::format_description::well_known::Rfc3339;
use time::Month;
use time::OffsetDateTime;
use time::UtcOffset;

/// Type corresponding to `xs:dateTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime(OffsetDateTime);

impl DateTime {
    #[must_use]
    pub const fn new(value: OffsetDateTime) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn inner(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl Default for DateTime {
    fn default() -> Self {
        Self(OffsetDateTime::UNIX_EPOCH)
    }
}

impl From<OffsetDateTime> for DateTime {
    fn from(dt: OffsetDateTime) -> Self {
        Self(dt)
    }
}

impl From<DateTime> for OffsetDateTime {
    fn from(w: DateTime) -> Self {
        w.0
    }
}

impl From<DateTime> for SystemTime {
    fn from(w: DateTime) -> Self {
        let unix_timestamp = w.0.unix_timestamp();
        let nanos = w.0.nanosecond();

        let duration = StdDuration::new(unix_timestamp.unsigned_abs(), nanos);
        if unix_timestamp >= 0 {
            Self::UNIX_EPOCH + duration
        } else {
            Self::UNIX_EPOCH - duration
        }
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = self.0.format(&Rfc3339).map_err(|_| FmtError)?;
        f.write_str(&s)
    }
}

impl FromStr for DateTime {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        OffsetDateTime::parse(s, &Rfc3339)
            .or_else(|_| OffsetDateTime::parse(&format!("{s}Z"), &Rfc3339))
            .map(Self)
            .map_err(|_| InvalidValue::new("dateTime", s))
    }
}

impl XmlText for DateTime {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, InvalidValue> {
        text.parse()
    }
}

/// Type corresponding to `xs:date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    pub date: time::Date,
    pub offset: Option<UtcOffset>,
}

impl Default for Date {
    fn default() -> Self {
        Self {
            date: OffsetDateTime::UNIX_EPOCH.date(),
            offset: None,
        }
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self { date, offset: None }
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.date.year(),
            u8::from(self.date.month()),
            self.date.day()
        )?;
        write_offset(f, self.offset)
    }
}

impl FromStr for Date {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidValue::new("date", s);
        let (value, offset) = split_offset(s.trim()).ok_or_else(invalid)?;
        let (negative, value) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        let mut parts = value.splitn(3, '-');
        let year = parts
            .next()
            .and_then(|v| v.parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let month = parts
            .next()
            .and_then(|v| v.parse::<u8>().ok())
            .and_then(|v| Month::try_from(v).ok())
            .ok_or_else(invalid)?;
        let day = parts
            .next()
            .and_then(|v| v.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        let year = if negative { -year } else { year };
        let date = time::Date::from_calendar_date(year, month, day).map_err(|_| invalid())?;
        Ok(Self { date, offset })
    }
}

impl XmlText for Date {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, InvalidValue> {
        text.parse()
    }
}

/// Type corresponding to `xs:time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    pub time: time::Time,
    pub offset: Option<UtcOffset>,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            time: time::Time::MIDNIGHT,
            offset: None,
        }
    }
}

impl From<time::Time> for Time {
    fn from(time: time::Time) -> Self {
        Self { time, offset: None }
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.time.hour(),
            self.time.minute(),
            self.time.second()
        )?;
        let nanos = self.time.nanosecond();
        if nanos > 0 {
            let fraction = format!("{nanos:09}");
            write!(f, ".{}", fraction.trim_end_matches('0'))?;
        }
        write_offset(f, self.offset)
    }
}

impl FromStr for Time {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidValue::new("time", s);
        let (value, offset) = split_offset(s.trim()).ok_or_else(invalid)?;
        let (hms, fraction) = match value.split_once('.') {
            Some((hms, fraction)) => (hms, Some(fraction)),
            None => (value, None),
        };
        let mut parts = hms.splitn(3, ':');
        let mut next = || parts.next().and_then(|v| v.parse::<u8>().ok());
        let (hour, minute, second) = match (next(), next(), next()) {
            (Some(h), Some(m), Some(s)) => (h, m, s),
            _ => return Err(invalid()),
        };
        let nanos = match fraction {
            Some(fraction) if !fraction.is_empty() && fraction.chars().all(|c| c.is_ascii_digit()) => {
                let digits = fraction.chars().take(9).collect::<String>();
                format!("{digits:0<9}").parse::<u32>().map_err(|_| invalid())?
            }
            Some(_) => return Err(invalid()),
            None => 0,
        };
        let time = time::Time::from_hms_nano(hour, minute, second, nanos).map_err(|_| invalid())?;
        Ok(Self { time, offset })
    }
}

impl XmlText for Time {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, InvalidValue> {
        text.parse()
    }
}

/// Split trailing timezone (`Z`, `+hh:mm`, `-hh:mm`).
fn split_offset(s: &str) -> Option<(&str, Option<UtcOffset>)> {
    if let Some(value) = s.strip_suffix('Z') {
        return Some((value, Some(UtcOffset::UTC)));
    }
    if s.len() > 6 && s.is_char_boundary(s.len() - 6) {
        let (value, tz) = s.split_at(s.len() - 6);
        let sign = match tz.as_bytes()[0] {
            b'+' => 1,
            b'-' => -1,
            _ => return Some((s, None)),
        };
        if tz.as_bytes()[3] != b':' {
            return Some((s, None));
        }
        let hours = tz[1..3].parse::<i8>().ok()?;
        let minutes = tz[4..6].parse::<i8>().ok()?;
        let offset = UtcOffset::from_hms(sign * hours, sign * minutes, 0).ok()?;
        return Some((value, Some(offset)));
    }
    Some((s, None))
}

fn write_offset(f: &mut Formatter<'_>, offset: Option<UtcOffset>) -> FmtResult {
    match offset {
        Some(offset) if offset.is_utc() => f.write_str("Z"),
        Some(offset) => {
            let sign = if offset.is_negative() { '-' } else { '+' };
            write!(
                f,
                "{sign}{:02}:{:02}",
                offset.whole_hours().unsigned_abs(),
                offset.minutes_past_hour().unsigned_abs()
            )
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_utc_z() {
        let s = "2021-03-04T05:06:07Z";
        let w: DateTime = s.parse().unwrap();
        assert_eq!(w.to_string(), s);

        let dt: OffsetDateTime = w.into();
        assert_eq!(dt.offset(), UtcOffset::UTC);
    }

    #[test]
    fn parses_utc_plus00_canonicalizes_to_z_on_display() {
        let w: DateTime = "2021-03-04T05:06:07+00:00".parse().unwrap();
        assert!(w.to_string().ends_with('Z'));
    }

    #[test]
    fn parses_and_displays_positive_offset() {
        let s = "2021-03-04T10:36:07+05:30";
        let w: DateTime = s.parse().unwrap();
        assert_eq!(w.to_string(), s);
    }

    #[test]
    fn parses_and_displays_fractional_seconds() {
        let s = "2021-03-04T05:06:07.123456789Z";
        let w: DateTime = s.parse().unwrap();
        assert_eq!(w.to_string(), s);
    }

    #[test]
    fn date_time_without_timezone_is_utc() {
        let w: DateTime = "2023-12-25T10:30:00".parse().unwrap();
        assert_eq!(w.to_text(), "2023-12-25T10:30:00Z");
        assert!("not-a-date".parse::<DateTime>().is_err());
    }

    #[test]
    fn date_keeps_timezone() {
        assert_eq!(Date::from_text("2023-12-25").unwrap().to_text(), "2023-12-25");
        assert_eq!(Date::from_text("2023-12-25Z").unwrap().to_text(), "2023-12-25Z");
        assert_eq!(
            Date::from_text("2023-12-25-05:00").unwrap().to_text(),
            "2023-12-25-05:00"
        );
        assert!(Date::from_text("2023-02-30").is_err());
    }

    #[test]
    fn time_keeps_fraction_and_timezone() {
        assert_eq!(Time::from_text("10:30:00").unwrap().to_text(), "10:30:00");
        assert_eq!(
            Time::from_text("10:30:00.250+01:00").unwrap().to_text(),
            "10:30:00.25+01:00"
        );
        assert!(Time::from_text("25:00:00").is_err());
        assert!(Time::from_text("10:30").is_err());
    }
}
