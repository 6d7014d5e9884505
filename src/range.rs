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

//! Half-open `[start, stop)` windows over rows and columns.

use std::num::IntErrorKind;

use crate::errors::TranscribeError;

/// A pair of positions on the unsigned-integer number line.
///
/// * Start comes before stop.
/// * Start is inclusive, and the first valid value is 0.
/// * Stop is exclusive.
/// * If start == stop, the range is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: u64,
    pub stop: u64,
}

/// Why a range string failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeParseError {
    /// The text is not of the form `123-234`.
    InvalidArgument,
    /// A bound overflows u64, or start comes after stop.
    OutOfRange,
}

impl std::fmt::Display for RangeParseError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            RangeParseError::InvalidArgument => write!(fmt, "invalid argument"),
            RangeParseError::OutOfRange => write!(fmt, "out of range"),
        }
    }
}

impl std::error::Error for RangeParseError {}

impl From<RangeParseError> for TranscribeError {
    fn from(e: RangeParseError) -> TranscribeError {
        invalid_argument_err!("range does not look like '123-234': {}", e)
    }
}

impl Range {
    pub fn new(start: u64, stop: u64) -> Self {
        debug_assert!(start <= stop);
        Range { start, stop }
    }

    /// Parse a range from text of the form `123-234`.
    ///
    /// Both bounds must be plain non-negative decimal numbers and the whole
    /// input must be consumed. Start must not come after stop.
    pub fn parse(text: &str) -> Result<Self, RangeParseError> {
        let (start_text, stop_text) = text
            .split_once('-')
            .ok_or(RangeParseError::InvalidArgument)?;
        let start = parse_bound(start_text)?;
        let stop = parse_bound(stop_text)?;
        if start > stop {
            return Err(RangeParseError::OutOfRange);
        }
        Ok(Range { start, stop })
    }

    pub fn size(&self) -> u64 {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// Clamp both endpoints to `max`. Monotone and idempotent.
    pub fn clip(&self, max: u64) -> Range {
        Range {
            start: self.start.min(max),
            stop: self.stop.min(max),
        }
    }

    pub fn contains(&self, i: u64) -> bool {
        i >= self.start && i < self.stop
    }
}

impl Default for Range {
    /// The unbounded range: everything survives a later `clip`.
    fn default() -> Self {
        Range {
            start: 0,
            stop: u64::MAX,
        }
    }
}

fn parse_bound(text: &str) -> Result<u64, RangeParseError> {
    // `u64::from_str` accepts a leading `+`, which the `123-234` syntax
    // does not
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeParseError::InvalidArgument);
    }
    text.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => RangeParseError::OutOfRange,
        _ => RangeParseError::InvalidArgument,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Range::parse("0-12"), Ok(Range::new(0, 12)));
        assert_eq!(Range::parse("3-3"), Ok(Range::new(3, 3)));
        assert_eq!(
            Range::parse("123-18446744073709551615"),
            Ok(Range::new(123, u64::MAX))
        );
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in ["", "-", "12", "12-", "-12", "1-2-3", "a-b", "1-2 ", "+1-2"] {
            assert_eq!(
                Range::parse(text),
                Err(RangeParseError::InvalidArgument),
                "input {:?}",
                text
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(Range::parse("5-2"), Err(RangeParseError::OutOfRange));
        assert_eq!(
            Range::parse("0-18446744073709551616"),
            Err(RangeParseError::OutOfRange)
        );
    }

    #[test]
    fn test_size_and_contains() {
        let range = Range::new(2, 5);
        assert_eq!(range.size(), 3);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
        assert!(Range::new(3, 3).is_empty());
    }

    #[test]
    fn test_clip() {
        assert_eq!(Range::new(2, 10).clip(5), Range::new(2, 5));
        assert_eq!(Range::new(7, 10).clip(5), Range::new(5, 5));
        assert_eq!(Range::new(2, 4).clip(5), Range::new(2, 4));
        assert_eq!(Range::default().clip(5), Range::new(0, 5));
    }

    #[test]
    fn test_clip_is_idempotent_and_monotone() {
        let range = Range::new(3, 17);
        for max in [0, 3, 10, 17, 100] {
            assert_eq!(range.clip(max).clip(max), range.clip(max));
        }
        for (m1, m2) in [(4, 9), (9, 4), (0, 20), (20, 0)] {
            assert_eq!(range.clip(m1).clip(m2), range.clip(m1.min(m2)));
        }
    }
}
