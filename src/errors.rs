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

//! Common transcription errors and macros.

use std::{io, result};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

#[derive(Debug, PartialEq, Eq)]
pub enum TranscribeError {
    /// General transcription error.
    /// Returned when code violates normal workflow of reading a Parquet file,
    /// including errors surfaced by the underlying codec.
    General(String),
    /// Unsupported-structure error.
    /// Returned when a file uses a column shape the tools do not handle:
    /// nested columns, or physical/logical types outside the supported set.
    Unsupported(String),
    /// Invalid-argument error.
    /// Returned for malformed user input, such as a bad range string.
    InvalidArgument(String),
}

impl std::fmt::Display for TranscribeError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            TranscribeError::General(ref message) => write!(fmt, "{}", message),
            TranscribeError::Unsupported(ref message) => {
                write!(fmt, "Unsupported: {}", message)
            }
            TranscribeError::InvalidArgument(ref message) => {
                write!(fmt, "Invalid argument: {}", message)
            }
        }
    }
}

impl std::error::Error for TranscribeError {}

impl From<io::Error> for TranscribeError {
    fn from(e: io::Error) -> TranscribeError {
        TranscribeError::General(format!("underlying IO error: {}", e))
    }
}

impl From<ParquetError> for TranscribeError {
    fn from(e: ParquetError) -> TranscribeError {
        TranscribeError::General(format!("{}", e))
    }
}

impl From<ArrowError> for TranscribeError {
    fn from(e: ArrowError) -> TranscribeError {
        TranscribeError::General(format!("Arrow error: {}", e))
    }
}

/// A specialized `Result` for transcription errors.
pub type Result<T> = result::Result<T, TranscribeError>;

// ----------------------------------------------------------------------
// Convenient macros for different errors

macro_rules! general_err {
    ($fmt:expr) => (crate::errors::TranscribeError::General($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::TranscribeError::General(format!($fmt, $($args),*)));
}

macro_rules! unsupported_err {
    ($fmt:expr) => (crate::errors::TranscribeError::Unsupported($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::TranscribeError::Unsupported(format!($fmt, $($args),*)));
}

macro_rules! invalid_argument_err {
    ($fmt:expr) => (crate::errors::TranscribeError::InvalidArgument($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::TranscribeError::InvalidArgument(format!($fmt, $($args),*)));
}
