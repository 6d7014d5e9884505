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

//! CSV output: RFC-4180 quoting, CRLF record separators, no BOM.

use std::io::Write;

use crate::errors::Result;
use crate::printer::{float, time, Printer};
use crate::value::PrintableValue;

/// A CSV encoder over any byte sink.
///
/// Records are CRLF-separated (the separator precedes each record, so
/// the header row opens the file and no trailing newline is emitted).
/// Null cells are empty. Fields are quoted only when they contain `"`,
/// `,`, `\n` or `\r`, with embedded quotes doubled.
pub struct CsvPrinter<W: Write> {
    out: W,
}

impl<W: Write> CsvPrinter<W> {
    pub fn new(out: W) -> Self {
        CsvPrinter { out }
    }

    /// Unwrap the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_string(&mut self, value: &[u8]) -> Result<()> {
        // Assume UTF-8: only ASCII bytes trigger quoting, so a bytewise
        // scan cannot split a multi-byte sequence
        let needs_quote = value
            .iter()
            .any(|b| matches!(b, b'"' | b',' | b'\n' | b'\r'));
        if !needs_quote {
            self.out.write_all(value)?;
            return Ok(());
        }

        self.out.write_all(b"\"")?;
        let mut rest = value;
        while let Some(quote_pos) = rest.iter().position(|&b| b == b'"') {
            self.out.write_all(&rest[..quote_pos])?;
            self.out.write_all(b"\"\"")?;
            rest = &rest[quote_pos + 1..];
        }
        self.out.write_all(rest)?;
        self.out.write_all(b"\"")?;
        Ok(())
    }
}

impl<W: Write> Printer for CsvPrinter<W> {
    fn write_file_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_file_footer(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_record_start(&mut self, _row_index: u64) -> Result<()> {
        self.out.write_all(b"\r\n")?;
        Ok(())
    }

    fn write_record_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_field_start(&mut self, column_index: usize, _name: &str) -> Result<()> {
        if column_index > 0 {
            self.out.write_all(b",")?;
        }
        Ok(())
    }

    fn write_header_field(&mut self, column_index: usize, name: &str) -> Result<()> {
        self.write_field_start(column_index, name)?;
        self.write_string(name.as_bytes())
    }

    fn write_null(&mut self) -> Result<()> {
        // CSV null is the empty string
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
            PrintableValue::Date(days) => time::write_date(&mut self.out, days)?,
            PrintableValue::TimestampMillis(v) => time::write_timestamp(&mut self.out, v, 3)?,
            PrintableValue::TimestampMicros(v) => time::write_timestamp(&mut self.out, v, 6)?,
            PrintableValue::TimestampNanos(v) => time::write_timestamp(&mut self.out, v, 9)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(value: &[u8]) -> String {
        let mut printer = CsvPrinter::new(Vec::new());
        printer.write_string(value).unwrap();
        String::from_utf8(printer.out).unwrap()
    }

    #[test]
    fn test_plain_strings_pass_through() {
        assert_eq!(escaped(b""), "");
        assert_eq!(escaped(b"x"), "x");
        assert_eq!(escaped("café".as_bytes()), "café");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(escaped(b"a,b"), "\"a,b\"");
        assert_eq!(escaped(b"c\nd"), "\"c\nd\"");
        assert_eq!(escaped(b"c\rd"), "\"c\rd\"");
        assert_eq!(escaped(b"a\"b\"c"), "\"a\"\"b\"\"c\"");
        assert_eq!(escaped(b"\""), "\"\"\"\"");
    }

    #[test]
    fn test_record_framing() {
        let mut printer = CsvPrinter::new(Vec::new());
        printer.write_file_header().unwrap();
        printer.write_header_field(0, "a").unwrap();
        printer.write_header_field(1, "b,c").unwrap();
        for (row, values) in [[Some(1), None], [None, Some(3)]].iter().enumerate() {
            printer.write_record_start(row as u64).unwrap();
            for (column, value) in values.iter().enumerate() {
                printer.write_field_start(column, "").unwrap();
                match value {
                    Some(v) => printer.write_value(PrintableValue::I32(*v)).unwrap(),
                    None => printer.write_null().unwrap(),
                }
            }
            printer.write_record_end().unwrap();
        }
        printer.write_file_footer().unwrap();
        assert_eq!(
            String::from_utf8(printer.out).unwrap(),
            "a,\"b,c\"\r\n1,\r\n,3"
        );
    }

    #[test]
    fn test_non_finite_floats_are_null() {
        let mut printer = CsvPrinter::new(Vec::new());
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            printer.write_value(PrintableValue::F64(v)).unwrap();
        }
        printer.write_value(PrintableValue::F64(0.1)).unwrap();
        assert_eq!(String::from_utf8(printer.out).unwrap(), "0.1");
    }

    #[test]
    fn test_temporal_values_unquoted() {
        let mut printer = CsvPrinter::new(Vec::new());
        printer.write_value(PrintableValue::Date(-1)).unwrap();
        printer.write_field_start(1, "").unwrap();
        printer
            .write_value(PrintableValue::TimestampMicros(1_569_283_200_000_000))
            .unwrap();
        assert_eq!(
            String::from_utf8(printer.out).unwrap(),
            "1969-12-31,2019-09-24"
        );
    }
}
