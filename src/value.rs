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

//! The decoded-value set handed from column readers to printers.

/// One decoded, printable cell value.
///
/// Produced by a [`crate::reader::BufferedColumnReader`] through the
/// converter its column was dispatched with, and consumed by
/// [`crate::printer::Printer::write_value`]. `Str` borrows from the
/// reader's batch buffer, so a value must be printed before the column
/// advances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintableValue<'a> {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    /// String bytes, assumed UTF-8. Never unescaped or normalized.
    Str(&'a [u8]),
    /// Days since the 1970-01-01 epoch; may be negative.
    Date(i32),
    TimestampMillis(i64),
    TimestampMicros(i64),
    TimestampNanos(i64),
}
