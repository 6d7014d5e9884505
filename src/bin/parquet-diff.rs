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

//! Binary file to compare two Parquet files for equivalence.
//!
//! # Usage
//! ```
//! parquet-diff <FILE1> <FILE2>
//! ```
//!
//! Schemas are compared strictly (column count, names, physical and
//! logical types, row group layout); values loosely (a dictionary-
//! encoded column equals a plain one holding the same values; strings
//! compare byte-for-byte with no Unicode normalization).
//!
//! Exits 0 when the files are equivalent, 1 when they differ (the
//! first difference prints to stdout as a `-left` / `+right` block),
//! 2 when a file uses an unsupported column shape.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use parquet::file::reader::SerializedFileReader;

use parquet_transcribe::diff::diff;

#[derive(Debug, Parser)]
#[command(about = "Compare two Parquet files for equivalence", long_about = None)]
struct Args {
    #[arg(help = "Path to the left Parquet file")]
    file1: PathBuf,
    #[arg(help = "Path to the right Parquet file")]
    file2: PathBuf,
}

fn open(path: &Path) -> Result<SerializedFileReader<File>, ExitCode> {
    let file = File::open(path).map_err(|e| {
        eprintln!("{}: {}", path.display(), e);
        ExitCode::from(1)
    })?;
    SerializedFileReader::new(file).map_err(|e| {
        eprintln!("{}", e);
        ExitCode::from(1)
    })
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // every argument problem exits 1
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    let reader1 = match open(&args.file1) {
        Ok(reader) => reader,
        Err(code) => return code,
    };
    let reader2 = match open(&args.file2) {
        Ok(reader) => reader,
        Err(code) => return code,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match diff(&reader1, &reader2, &mut out) {
        Ok(outcome) => ExitCode::from(outcome.exit_code() as u8),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}
