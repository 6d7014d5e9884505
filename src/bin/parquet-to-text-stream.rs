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

//! Binary file to stream a Parquet file to stdout as CSV or JSON.
//!
//! # Usage
//! ```
//! parquet-to-text-stream [OPTIONS] <PATH> <FORMAT>
//! ```
//!
//! ## Args
//!     <PATH>      Path to a Parquet file
//!     <FORMAT>    Output format: csv or json
//!
//! ## Options
//!     --row-range=START-STOP       [start, stop) range of rows to include
//!     --column-range=START-STOP    [start, stop) range of columns to include
//!
//! Unset ranges mean "everything"; out-of-bounds ranges are clipped to
//! the file's extents. Memory use stays bounded regardless of file
//! size, so the tool is fit for streaming large files over a socket.
//! Exits 1 on usage errors and on open/decode failures, with a message
//! on stderr.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use parquet::file::reader::SerializedFileReader;

use parquet_transcribe::printer::{CsvPrinter, JsonPrinter};
use parquet_transcribe::range::Range;
use parquet_transcribe::stream::stream_parquet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(about = "Stream a Parquet file to stdout as CSV or JSON", long_about = None)]
struct Args {
    #[arg(help = "Path to a Parquet file")]
    path: PathBuf,
    #[arg(value_enum, help = "Output format")]
    format: Format,
    #[arg(
        long,
        value_name = "START-STOP",
        value_parser = parse_range,
        help = "[start, stop) range of rows to include"
    )]
    row_range: Option<Range>,
    #[arg(
        long,
        value_name = "START-STOP",
        value_parser = parse_range,
        help = "[start, stop) range of columns to include"
    )]
    column_range: Option<Range>,
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

    let file = match File::open(&args.path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("{}: {}", args.path.display(), e);
            return ExitCode::from(1);
        }
    };
    let reader = match SerializedFileReader::new(file) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let column_range = args.column_range.unwrap_or_default();
    let row_range = args.row_range.unwrap_or_default();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = match args.format {
        Format::Csv => {
            let mut printer = CsvPrinter::new(&mut out);
            stream_parquet(&reader, &mut printer, column_range, row_range)
        }
        Format::Json => {
            let mut printer = JsonPrinter::new(&mut out);
            stream_parquet(&reader, &mut printer, column_range, row_range)
        }
    };
    if let Err(e) = result {
        eprintln!("{}", e);
        return ExitCode::from(1);
    }
    if let Err(e) = out.flush() {
        eprintln!("{}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
