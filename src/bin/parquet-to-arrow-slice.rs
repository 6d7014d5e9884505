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

//! Binary file to materialize a slice of a Parquet file as Arrow IPC.
//!
//! # Usage
//! ```
//! parquet-to-arrow-slice <PATH> <COL0-COLN> <ROW0-ROWN> <OUT>
//! ```
//!
//! For instance: `parquet-to-arrow-slice table.parquet 0-16 200-400 out.arrow`
//!
//! Rows and columns are numbered like C arrays. Out-of-bounds indices
//! are ignored (the ranges are clipped to the file's extents). The
//! output holds a single record batch with dictionary columns decoded
//! to their value type; it is meant for small slices.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use parquet_transcribe::range::Range;
use parquet_transcribe::slice::slice_parquet_to_arrow;

#[derive(Debug, Parser)]
#[command(about = "Materialize a slice of a Parquet file as an Arrow IPC file", long_about = None)]
struct Args {
    #[arg(help = "Path to a Parquet file")]
    path: PathBuf,
    #[arg(value_parser = parse_range, help = "[start, stop) range of columns to include")]
    column_range: Range,
    #[arg(value_parser = parse_range, help = "[start, stop) range of rows to include")]
    row_range: Range,
    #[arg(help = "Path to the Arrow IPC file to write")]
    out: PathBuf,
}

fn parse_range(text: &str) -> Result<Range, String> {
    Range::parse(text).map_err(|e| format!("{} does not look like '123-234': {}", text, e))
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

    match slice_parquet_to_arrow(&args.path, args.column_range, args.row_range, &args.out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}
