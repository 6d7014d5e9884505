// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Date and short-form ISO-8601 UTC timestamp rendering.

use std::io::Write;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::errors::Result;

const SECONDS_PER_DAY: i64 = 86_400;

/// Write a day count since 1970-01-01 as `YYYY-MM-DD`.
///
/// Proleptic Gregorian, astronomical year numbering, zero-padded to at
/// least four year digits; days before the epoch format correctly.
pub fn write_date<W: Write>(out: &mut W, days_since_epoch: i32) -> Result<()> {
    let date = civil(i64::from(days_since_epoch) * SECONDS_PER_DAY)?;
    write_ymd(out, &date)?;
    Ok(())
}

/// Write an epoch offset as a short ISO-8601 UTC timestamp.
///
/// `n_fraction_digits` is 3, 6 or 9 for milli-, micro- and nanosecond
/// offsets. The date part always prints; the time part prints only the
/// resolution it uses, so midnight is a bare date, `05:00:00` is
/// `T05Z`, `05:06:00` is `T05:06Z`, and a nonzero fraction keeps
/// whole three-digit groups: `T05:06:07.000008Z`.
pub fn write_timestamp<W: Write>(
    out: &mut W,
    value: i64,
    n_fraction_digits: u32,
) -> Result<()> {
    debug_assert!(matches!(n_fraction_digits, 3 | 6 | 9));
    let divisor = 10i64.pow(n_fraction_digits);
    // Euclidean split keeps the fraction non-negative for pre-epoch values
    let epoch_seconds = value.div_euclid(divisor);
    let mut subsecond = value.rem_euclid(divisor);

    let time = civil(epoch_seconds)?;
    write_ymd(out, &time)?;

    let mut digits = n_fraction_digits;
    while digits > 0 && subsecond % 1000 == 0 {
        subsecond /= 1000;
        digits -= 3;
    }

    match digits {
        0 => {
            if time.hour() != 0 || time.minute() != 0 || time.second() != 0 {
                if time.second() != 0 {
                    write!(
                        out,
                        "T{:02}:{:02}:{:02}Z",
                        time.hour(),
                        time.minute(),
                        time.second()
                    )?;
                } else if time.minute() != 0 {
                    write!(out, "T{:02}:{:02}Z", time.hour(), time.minute())?;
                } else {
                    write!(out, "T{:02}Z", time.hour())?;
                }
            }
            // 00:00:00.000000000 prints as the bare date
        }
        3 => write!(
            out,
            "T{:02}:{:02}:{:02}.{:03}Z",
            time.hour(),
            time.minute(),
            time.second(),
            subsecond
        )?,
        6 => write!(
            out,
            "T{:02}:{:02}:{:02}.{:06}Z",
            time.hour(),
            time.minute(),
            time.second(),
            subsecond
        )?,
        9 => write!(
            out,
            "T{:02}:{:02}:{:02}.{:09}Z",
            time.hour(),
            time.minute(),
            time.second(),
            subsecond
        )?,
        _ => unreachable!("fraction digits shrink in steps of three"),
    }
    Ok(())
}

fn civil(epoch_seconds: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(epoch_seconds, 0)
        .ok_or_else(|| general_err!("timestamp {}s from epoch is out of range", epoch_seconds))
}

fn write_ymd<W: Write>(out: &mut W, time: &DateTime<Utc>) -> Result<()> {
    write!(
        out,
        "{:04}-{:02}-{:02}",
        time.year(),
        time.month(),
        time.day()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date_text(days: i32) -> String {
        let mut out = Vec::new();
        write_date(&mut out, days).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn timestamp_text(value: i64, n_fraction_digits: u32) -> String {
        let mut out = Vec::new();
        write_timestamp(&mut out, value, n_fraction_digits).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_date() {
        assert_eq!(date_text(0), "1970-01-01");
        assert_eq!(date_text(-1), "1969-12-31");
        assert_eq!(date_text(18190), "2019-10-21");
        assert_eq!(date_text(18191), "2019-10-22");
    }

    #[test]
    fn test_date_pads_small_years() {
        // 0001-01-01 is 719162 days before the epoch
        assert_eq!(date_text(-719_162), "0001-01-01");
        assert_eq!(date_text(-719_163), "0000-12-31");
    }

    #[test]
    fn test_timestamp_auto_resolution() {
        // 2019-03-04 00:00:00 UTC is 1551657600s from the epoch
        let base_ms = 1_551_657_600_000;
        assert_eq!(timestamp_text(base_ms, 3), "2019-03-04");
        assert_eq!(timestamp_text(base_ms + 5 * 3_600_000, 3), "2019-03-04T05Z");
        assert_eq!(
            timestamp_text(base_ms + (5 * 3600 + 6 * 60) * 1000, 3),
            "2019-03-04T05:06Z"
        );
        assert_eq!(
            timestamp_text(base_ms + (5 * 3600 + 6 * 60 + 7) * 1000, 3),
            "2019-03-04T05:06:07Z"
        );
        assert_eq!(
            timestamp_text(base_ms + 8, 3),
            "2019-03-04T00:00:00.008Z"
        );
    }

    #[test]
    fn test_timestamp_fraction_groups() {
        let base_us = 1_551_657_600_000_000 + (5 * 3600 + 6 * 60 + 7) * 1_000_000;
        assert_eq!(timestamp_text(base_us + 8_000, 6), "2019-03-04T05:06:07.008Z");
        assert_eq!(
            timestamp_text(base_us + 8, 6),
            "2019-03-04T05:06:07.000008Z"
        );

        let base_ns = base_us * 1000;
        assert_eq!(
            timestamp_text(base_ns + 8, 9),
            "2019-03-04T05:06:07.000000008Z"
        );
        assert_eq!(
            timestamp_text(base_ns + 8_000, 9),
            "2019-03-04T05:06:07.000008Z"
        );
    }

    #[test]
    fn test_timestamp_before_epoch() {
        assert_eq!(timestamp_text(-1, 3), "1969-12-31T23:59:59.999Z");
        assert_eq!(timestamp_text(-1, 9), "1969-12-31T23:59:59.999999999Z");
        assert_eq!(timestamp_text(-86_400_000, 3), "1969-12-31");
        assert_eq!(timestamp_text(-86_400_000_000 + 1, 6), "1969-12-31T00:00:00.000001Z");
    }

    #[test]
    fn test_timestamp_out_of_range() {
        assert!(write_timestamp(&mut Vec::new(), i64::MAX, 3).is_err());
    }
}
