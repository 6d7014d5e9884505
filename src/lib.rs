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

//! Streaming transcription of Apache Parquet files into other forms.
//!
//! This crate backs a small family of command-line tools:
//!
//! * `parquet-to-text-stream` renders a Parquet file as CSV or JSON on
//!   stdout, holding only a small bounded buffer per column regardless
//!   of file size, with optional row and column windows.
//! * `parquet-diff` checks two Parquet files for equivalence: strict on
//!   schema, loose on encoding (dictionary-encoded and plain columns
//!   holding the same values are equal).
//! * `parquet-to-arrow-slice` materializes a bounded rectangle of a
//!   Parquet file as a single-record-batch Arrow IPC file.
//!
//! Only flat columns are supported: a column with max definition level
//! above 1 or max repetition level above 0 is rejected. Timestamps are
//! always rendered as UTC; the Parquet `isAdjustedToUTC` flag is
//! deliberately ignored, since plenty of UTC data in the wild is not
//! flagged as such. Execution is single-threaded and deterministic.

#[macro_use]
pub mod errors;
pub mod diff;
pub mod printer;
pub mod range;
pub mod reader;
pub mod slice;
pub mod stream;
pub mod transcriber;
pub mod value;
