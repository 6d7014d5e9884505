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

//! Materialize a bounded rectangle of a Parquet file as Arrow IPC.
//!
//! The one tool in the family that holds its whole output in memory;
//! the slice is defined to be small, while the dictionaries behind it
//! may be huge, so dictionary columns are decoded to their value type
//! before writing.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{new_empty_array, Array, ArrayRef};
use arrow::compute::{cast, concat};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::ipc::writer::{FileWriter, IpcWriteOptions};
use arrow::ipc::MetadataVersion;
use arrow::record_batch::{RecordBatch, RecordBatchOptions, RecordBatchReader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;

use crate::errors::Result;
use crate::range::Range;

/// Rows read (and possibly discarded) per codec call while seeking to
/// the window's first row. Higher seeks faster and costs more RAM.
pub const SKIP_MAX_BATCH_SIZE: usize = 10_000;

/// Read the clipped `column_range` × `row_range` rectangle of the
/// Parquet file at `parquet_path` and write it to `arrow_path` as an
/// Arrow IPC file holding a single record batch.
///
/// The output schema carries no file-level metadata; each field's
/// nullability reflects the slice itself (null count > 0), and
/// dictionary columns are decoded to their value type.
pub fn slice_parquet_to_arrow(
    parquet_path: &Path,
    column_range: Range,
    row_range: Range,
    arrow_path: &Path,
) -> Result<()> {
    let file = File::open(parquet_path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let num_columns = builder.parquet_schema().num_columns() as u64;
    let num_rows = builder.metadata().file_metadata().num_rows().max(0) as u64;
    let columns = column_range.clip(num_columns);
    let rows = row_range.clip(num_rows);

    let projection = ProjectionMask::leaves(
        builder.parquet_schema(),
        (columns.start..columns.stop).map(|i| i as usize),
    );
    let reader = builder
        .with_projection(projection)
        .with_batch_size(SKIP_MAX_BATCH_SIZE)
        .build()?;
    let reader_schema = reader.schema();
    let n_selected = columns.size() as usize;

    // Walk the file in bounded batches, discarding rows before the
    // window and slicing the batches that overlap it
    let mut chunks: Vec<Vec<ArrayRef>> = vec![Vec::new(); n_selected];
    let mut rows_seen = 0u64;
    for batch in reader {
        let batch = batch?;
        let batch_start = rows_seen;
        rows_seen += batch.num_rows() as u64;

        let keep_start = rows.start.max(batch_start);
        let keep_stop = rows.stop.min(rows_seen);
        if keep_start < keep_stop {
            let kept = batch.slice(
                (keep_start - batch_start) as usize,
                (keep_stop - keep_start) as usize,
            );
            for (column_chunks, column) in chunks.iter_mut().zip(kept.columns()) {
                column_chunks.push(column.clone());
            }
        }
        if rows_seen >= rows.stop {
            break;
        }
    }

    let mut fields = Vec::with_capacity(n_selected);
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(n_selected);
    for (field, column_chunks) in reader_schema.fields().iter().zip(chunks) {
        let array = match column_chunks.len() {
            0 => new_empty_array(field.data_type()),
            1 => column_chunks.into_iter().next().expect("one chunk"),
            _ => {
                let refs: Vec<&dyn Array> =
                    column_chunks.iter().map(|chunk| chunk.as_ref()).collect();
                concat(&refs)?
            }
        };
        let array = decode_dictionary(array)?;
        fields.push(Field::new(
            field.name(),
            array.data_type().clone(),
            array.null_count() > 0,
        ));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new_with_options(
        schema.clone(),
        arrays,
        &RecordBatchOptions::new().with_row_count(Some(rows.size() as usize)),
    )?;

    let out = File::create(arrow_path)?;
    let options = IpcWriteOptions::try_new(8, false, MetadataVersion::V4)?;
    let mut writer = FileWriter::try_new_with_options(out, schema.as_ref(), options)?;
    writer.write(&batch)?;
    writer.finish()?;
    Ok(())
}

fn decode_dictionary(array: ArrayRef) -> Result<ArrayRef> {
    let value_type = match array.data_type() {
        DataType::Dictionary(_, value_type) => value_type.as_ref().clone(),
        _ => return Ok(array),
    };
    Ok(cast(array.as_ref(), &value_type)?)
}
