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

//! `xs:duration` value.
//!
//! Years and months are kept separately from the day-time part because
//! their length in seconds is not fixed.

use crate::text::InvalidValue;
use crate::text::XmlText;
use core::str::FromStr;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Type corresponding to `xs:duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Duration {
    pub negative: bool,
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub nanos: u32,
}

impl Duration {
    /// Duration that has only day-time components.
    #[must_use]
    pub const fn from_secs(seconds: u64) -> Self {
        Self {
            negative: false,
            years: 0,
            months: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds,
            nanos: 0,
        }
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
            && self.nanos == 0
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        if self.years > 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months > 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 || self.nanos > 0 {
            f.write_str("T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 || self.nanos > 0 {
                write!(f, "{}", self.seconds)?;
                if self.nanos > 0 {
                    let fraction = format!("{:09}", self.nanos);
                    write!(f, ".{}", fraction.trim_end_matches('0'))?;
                }
                f.write_str("S")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidValue::new("duration", s);
        let text = s.trim();
        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let text = text.strip_prefix('P').ok_or_else(invalid)?;
        let (date, time) = match text.split_once('T') {
            Some((_, "")) => return Err(invalid()),
            Some((date, time)) => (date, Some(time)),
            None => (text, None),
        };
        if date.is_empty() && time.is_none() {
            return Err(invalid());
        }

        let mut result = Self {
            negative,
            ..Self::default()
        };
        let mut number = String::new();
        // Designators must follow in this order; each may appear once.
        let mut rank = 0;
        for c in date.chars() {
            match c {
                '0'..='9' => number.push(c),
                'Y' | 'M' | 'D' => {
                    let next_rank = match c {
                        'Y' => 1,
                        'M' => 2,
                        _ => 3,
                    };
                    if number.is_empty() || next_rank <= rank {
                        return Err(invalid());
                    }
                    rank = next_rank;
                    let value = number.parse::<u64>().map_err(|_| invalid())?;
                    number.clear();
                    match c {
                        'Y' => result.years = value,
                        'M' => result.months = value,
                        _ => result.days = value,
                    }
                }
                _ => return Err(invalid()),
            }
        }
        if !number.is_empty() {
            return Err(invalid());
        }

        if let Some(time) = time {
            let mut rank = 0;
            for c in time.chars() {
                match c {
                    '0'..='9' | '.' => number.push(c),
                    'H' | 'M' | 'S' => {
                        let next_rank = match c {
                            'H' => 1,
                            'M' => 2,
                            _ => 3,
                        };
                        if number.is_empty() || next_rank <= rank {
                            return Err(invalid());
                        }
                        rank = next_rank;
                        match c {
                            'H' => result.hours = number.parse().map_err(|_| invalid())?,
                            'M' => result.minutes = number.parse().map_err(|_| invalid())?,
                            _ => {
                                let (secs, nanos) = parse_seconds(&number).ok_or_else(invalid)?;
                                result.seconds = secs;
                                result.nanos = nanos;
                            }
                        }
                        number.clear();
                    }
                    _ => return Err(invalid()),
                }
            }
            if !number.is_empty() {
                return Err(invalid());
            }
        }
        Ok(result)
    }
}

fn parse_seconds(v: &str) -> Option<(u64, u32)> {
    match v.split_once('.') {
        Some((secs, fraction)) => {
            if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let secs = if secs.is_empty() { 0 } else { secs.parse().ok()? };
            let digits = fraction.chars().take(9).collect::<String>();
            let nanos = format!("{digits:0<9}").parse().ok()?;
            Some((secs, nanos))
        }
        None => Some((v.parse().ok()?, 0)),
    }
}

impl XmlText for Duration {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, InvalidValue> {
        text.parse()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn canonical_forms() {
        let d: Duration = "P1Y2M3DT4H5M6.5S".parse().unwrap();
        assert_eq!(d.years, 1);
        assert_eq!(d.months, 2);
        assert_eq!(d.days, 3);
        assert_eq!(d.hours, 4);
        assert_eq!(d.minutes, 5);
        assert_eq!(d.seconds, 6);
        assert_eq!(d.nanos, 500_000_000);
        assert_eq!(d.to_text(), "P1Y2M3DT4H5M6.5S");

        assert_eq!(Duration::default().to_text(), "PT0S");
        assert_eq!(Duration::from_text("-PT30M").unwrap().to_text(), "-PT30M");
        assert_eq!(Duration::from_text("P0D").unwrap().to_text(), "PT0S");
    }

    #[test]
    fn rejects_malformed_values() {
        for v in ["", "P", "PT", "1Y", "P1S", "PT1D", "P1M1Y", "P1.5Y", "PT1H1H"] {
            assert!(Duration::from_text(v).is_err(), "{v}");
        }
    }
}
