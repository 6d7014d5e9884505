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

//! JSON output: one top-level array of objects, keys in column order.

use std::io::Write;

use crate::errors::Result;
use crate::printer::{float, time, Printer};
use crate::value::PrintableValue;

/// A JSON encoder over any byte sink.
///
/// Emits `[{...},{...}]` with no whitespace. Dates and timestamps are
/// quoted strings; NaN and the infinities are `null` (JSON has no
/// spelling for them).
pub struct JsonPrinter<W: Write> {
    out: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        JsonPrinter { out }
    }

    /// Unwrap the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_string(&mut self, value: &[u8]) -> Result<()> {
        // Assume UTF-8: every escaped byte is ASCII, so a bytewise scan
        // cannot split a multi-byte sequence
        self.out.write_all(b"\"")?;
        for &b in value {
            match b {
                b'"' => self.out.write_all(b"\\\"")?,
                b'\\' => self.out.write_all(b"\\\\")?,
                0x08 => self.out.write_all(b"\\b")?,
                0x0c => self.out.write_all(b"\\f")?,
                b'\n' => self.out.write_all(b"\\n")?,
                b'\r' => self.out.write_all(b"\\r")?,
                b'\t' => self.out.write_all(b"\\t")?,
                0x00..=0x1f => write!(self.out, "\\u{:04x}", b)?,
                _ => self.out.write_all(&[b])?,
            }
        }
        self.out.write_all(b"\"")?;
        Ok(())
    }
}

impl<W: Write> Printer for JsonPrinter<W> {
    fn write_file_header(&mut self) -> Result<()> {
        self.out.write_all(b"[")?;
        Ok(())
    }

    fn write_file_footer(&mut self) -> Result<()> {
        self.out.write_all(b"]")?;
        Ok(())
    }

    fn write_record_start(&mut self, row_index: u64) -> Result<()> {
        if row_index != 0 {
            self.out.write_all(b",")?;
        }
        self.out.write_all(b"{")?;
        Ok(())
    }

    fn write_record_end(&mut self) -> Result<()> {
        self.out.write_all(b"}")?;
        Ok(())
    }

    fn write_field_start(&mut self, column_index: usize, name: &str) -> Result<()> {
        if column_index > 0 {
            self.out.write_all(b",")?;
        }
        self.write_string(name.as_bytes())?;
        self.out.write_all(b":")?;
        Ok(())
    }

    fn write_header_field(&mut self, _column_index: usize, _name: &str) -> Result<()> {
        // JSON has no header row
        Ok(())
    }

    fn write_null(&mut self) -> Result<()> {
        self.out.write_all(b"null")?;
        Ok(())
    }

    fn write_value(&mut self, value: PrintableValue<'_>) -> Result<()> {
        match value {
            PrintableValue::I32(v) => write!(self.out, "{}", v)?,
            PrintableValue::U32(v) => write!(self.out, "{}", v)?,
            PrintableValue::I64(v) => write!(self.out, "{}", v)?,
            PrintableValue::U64(v) => write!(self.out, "{}", v)?,
            PrintableValue::F32(v) => {
                if v.is_finite() {
                    float::write_f32(&mut self.out, v)?;
                } else {
                    self.write_null()?;
                }
            }
            PrintableValue::F64(v) => {
                if v.is_finite() {
                    float::write_f64(&mut self.out, v)?;
                } else {
                    self.write_null()?;
                }
            }
            PrintableValue::Str(v) => self.write_string(v)?,
            PrintableValue::Date(days) => {
                self.out.write_all(b"\"")?;
                time::write_date(&mut self.out, days)?;
                self.out.write_all(b"\"")?;
            }
            PrintableValue::TimestampMillis(v) => self.write_timestamp(v, 3)?,
            PrintableValue::TimestampMicros(v) => self.write_timestamp(v, 6)?,
            PrintableValue::TimestampNanos(v) => self.write_timestamp(v, 9)?,
        }
        Ok(())
    }
}

impl<W: Write> JsonPrinter<W> {
    fn write_timestamp(&mut self, value: i64, n_fraction_digits: u32) -> Result<()> {
        self.out.write_all(b"\"")?;
        time::write_timestamp(&mut self.out, value, n_fraction_digits)?;
        self.out.write_all(b"\"")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(value: &[u8]) -> String {
        let mut printer = JsonPrinter::new(Vec::new());
        printer.write_string(value).unwrap();
        String::from_utf8(printer.out).unwrap()
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(escaped(b"x"), "\"x\"");
        assert_eq!(escaped(b"a\"b"), "\"a\\\"b\"");
        assert_eq!(escaped(b"a\\b"), "\"a\\\\b\"");
        assert_eq!(escaped(b"a\x08\x0c\n\r\tb"), "\"a\\b\\f\\n\\r\\tb\"");
        assert_eq!(escaped(b"\x01\x1f"), "\"\\u0001\\u001f\"");
        assert_eq!(escaped("café".as_bytes()), "\"café\"");
    }

    #[test]
    fn test_record_framing() {
        let mut printer = JsonPrinter::new(Vec::new());
        printer.write_file_header().unwrap();
        printer.write_header_field(0, "a").unwrap();
        for (row, value) in [Some(1), None].iter().enumerate() {
            printer.write_record_start(row as u64).unwrap();
            printer.write_field_start(0, "a").unwrap();
            match value {
                Some(v) => printer.write_value(PrintableValue::I32(*v)).unwrap(),
                None => printer.write_null().unwrap(),
            }
            printer.write_record_end().unwrap();
        }
        printer.write_file_footer().unwrap();
        assert_eq!(
            String::from_utf8(printer.out).unwrap(),
            "[{\"a\":1},{\"a\":null}]"
        );
    }

    #[test]
    fn test_temporal_values_quoted() {
        let mut printer = JsonPrinter::new(Vec::new());
        printer.write_record_start(0).unwrap();
        printer.write_field_start(0, "t").unwrap();
        printer
            .write_value(PrintableValue::TimestampMicros(1_569_283_200_000_000))
            .unwrap();
        printer.write_field_start(1, "d").unwrap();
        printer.write_value(PrintableValue::Date(0)).unwrap();
        printer.write_record_end().unwrap();
        assert_eq!(
            String::from_utf8(printer.out).unwrap(),
            "{\"t\":\"2019-09-24\",\"d\":\"1970-01-01\"}"
        );
    }

    #[test]
    fn test_output_parses_as_json() {
        let mut printer = JsonPrinter::new(Vec::new());
        printer.write_file_header().unwrap();
        printer.write_record_start(0).unwrap();
        printer.write_field_start(0, "weird \"name\"\n").unwrap();
        printer
            .write_value(PrintableValue::Str(b"line\nbreak \x02"))
            .unwrap();
        printer.write_field_start(1, "f").unwrap();
        printer.write_value(PrintableValue::F64(0.1)).unwrap();
        printer.write_record_end().unwrap();
        printer.write_file_footer().unwrap();

        let text = String::from_utf8(printer.out).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["weird \"name\"\n"], "line\nbreak \u{2}");
        assert_eq!(parsed[0]["f"], 0.1);
    }
}
