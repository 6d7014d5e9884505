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

//! Bounded-buffer column readers over Parquet files.

mod buffered;
mod file_column;

pub use buffered::{BufferedColumnReader, BATCH_SIZE};
pub use file_column::FileColumnIterator;

use parquet::data_type::DataType;

use crate::value::PrintableValue;

/// Converts one physical value to its printable form.
///
/// Selected once per column at dispatch time; `Str` conversions borrow
/// the physical value, everything else copies out of it.
pub type Convert<T> = for<'a> fn(&'a <T as DataType>::T) -> PrintableValue<'a>;
