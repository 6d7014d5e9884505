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

//! Text encoders for the streaming driver.
//!
//! A [`Printer`] frames records and renders one [`PrintableValue`] at a
//! time. There are two implementations, [`CsvPrinter`] and
//! [`JsonPrinter`]; the driver picks one per invocation and calls it
//! through `&mut dyn Printer`.
//!
//! Numbers render identically in both formats: integers in plain
//! decimal, finite floats as the shortest decimal that round-trips
//! (ECMAScript `Number.prototype.toString` notation), and NaN and the
//! infinities as null. Dates are `YYYY-MM-DD` and timestamps short-form
//! ISO-8601 UTC; JSON wraps both in quotes.

mod csv;
pub(crate) mod float;
mod json;
pub(crate) mod time;

pub use csv::CsvPrinter;
pub use json::JsonPrinter;

use crate::errors::Result;
use crate::value::PrintableValue;

/// One output encoding.
///
/// Call order for a file: `write_file_header`, one `write_header_field`
/// per column, then per record `write_record_start`, one
/// `write_field_start` + (`write_value` | `write_null`) per column,
/// `write_record_end`; finally `write_file_footer`.
pub trait Printer {
    /// Preamble before any record (JSON `[`; nothing for CSV).
    fn write_file_header(&mut self) -> Result<()>;

    /// Postamble after the last record (JSON `]`; nothing for CSV).
    fn write_file_footer(&mut self) -> Result<()>;

    /// Open record `row_index` (0-based over the emitted window).
    fn write_record_start(&mut self, row_index: u64) -> Result<()>;

    /// Close the current record.
    fn write_record_end(&mut self) -> Result<()>;

    /// Open the field at `column_index` within the current record.
    fn write_field_start(&mut self, column_index: usize, name: &str) -> Result<()>;

    /// Emit a header-row field (CSV only; JSON has no header row).
    fn write_header_field(&mut self, column_index: usize, name: &str) -> Result<()>;

    /// A null cell (empty for CSV, `null` for JSON).
    fn write_null(&mut self) -> Result<()>;

    /// A present cell.
    fn write_value(&mut self, value: PrintableValue<'_>) -> Result<()>;
}
