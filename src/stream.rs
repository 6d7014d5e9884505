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

//! The streaming driver: row-major interleaving of column readers.

use parquet::file::reader::FileReader;

use crate::errors::Result;
use crate::printer::Printer;
use crate::range::Range;
use crate::transcriber::Transcriber;

/// Stream the selected window of `file` through `printer`.
///
/// The ranges are clipped to the file's extents, so out-of-bounds
/// windows shrink rather than fail. Each selected column gets one
/// transcriber, pre-skipped to the window's first row; output is then
/// produced strictly row-major, column-ascending, one buffered batch
/// per column in memory at a time.
pub fn stream_parquet(
    file: &dyn FileReader,
    printer: &mut dyn Printer,
    column_range: Range,
    row_range: Range,
) -> Result<()> {
    let file_metadata = file.metadata().file_metadata();
    let columns = column_range.clip(file_metadata.schema_descr().num_columns() as u64);
    let rows = row_range.clip(file_metadata.num_rows().max(0) as u64);

    let mut transcribers = Vec::with_capacity(columns.size() as usize);
    for column_index in columns.start..columns.stop {
        let mut transcriber = Transcriber::new(file, column_index as usize)?;
        transcriber.skip_rows(rows.start)?;
        transcribers.push(transcriber);
    }

    printer.write_file_header()?;
    if !transcribers.is_empty() {
        for (output_column_index, transcriber) in transcribers.iter().enumerate() {
            transcriber.print_header(printer, output_column_index)?;
        }

        for row_index in rows.start..rows.stop {
            printer.write_record_start(row_index - rows.start)?;
            for (output_column_index, transcriber) in transcribers.iter_mut().enumerate() {
                transcriber.print_next(printer, output_column_index)?;
            }
            printer.write_record_end()?;
        }
    }
    printer.write_file_footer()?;
    Ok(())
}
