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

use std::cmp;

use parquet::column::reader::ColumnReaderImpl;
use parquet::data_type::DataType;

use crate::errors::Result;
use crate::reader::Convert;
use crate::value::PrintableValue;

/// Rows buffered per column between codec reads.
///
/// Lower means more I/O calls, higher means a larger resident footprint
/// per column. Streaming output values time-to-first-byte and low RAM
/// over raw throughput, so the constant sits at the low end.
pub const BATCH_SIZE: usize = 30;

/// A small-batch reader over one column chunk (one column of one row
/// group), yielding one `Option<PrintableValue>` per logical row.
///
/// Values are buffered left-packed the way the codec returns them, with
/// one definition level per logical row alongside (none when the column
/// is required). Two cursors track progress: `row_cursor` over logical
/// rows and `value_cursor` over non-null values; at any point
/// `value_cursor` equals the number of max-level entries in
/// `def_levels[..row_cursor]`.
pub struct BufferedColumnReader<T: DataType> {
    reader: ColumnReaderImpl<T>,
    convert: Convert<T>,
    max_def_level: i16,
    values: Vec<T::T>,
    def_levels: Vec<i16>,
    batch_len: usize,
    row_cursor: usize,
    value_cursor: usize,
}

impl<T: DataType> BufferedColumnReader<T> {
    pub fn new(reader: ColumnReaderImpl<T>, max_def_level: i16, convert: Convert<T>) -> Self {
        debug_assert!(max_def_level <= 1);
        BufferedColumnReader {
            reader,
            convert,
            max_def_level,
            values: Vec::with_capacity(BATCH_SIZE),
            def_levels: Vec::with_capacity(BATCH_SIZE),
            batch_len: 0,
            row_cursor: 0,
            value_cursor: 0,
        }
    }

    /// Return the next row's value, or `None` if the row is null.
    ///
    /// Reading past the last row of the column chunk is an error; the
    /// caller bounds itself by the row group's row count.
    pub fn next_value(&mut self) -> Result<Option<PrintableValue<'_>>> {
        if self.row_cursor >= self.batch_len {
            self.rebuffer()?;
            if self.batch_len == 0 {
                return Err(general_err!("read past the end of a column chunk"));
            }
        }

        let valid = self.max_def_level == 0
            || self.def_levels[self.row_cursor] == self.max_def_level;
        self.row_cursor += 1;
        if valid {
            let value = &self.values[self.value_cursor];
            self.value_cursor += 1;
            Ok(Some((self.convert)(value)))
        } else {
            Ok(None)
        }
    }

    /// Advance `to_skip` logical rows without rendering them.
    ///
    /// Rows still in the buffer advance both cursors; the remainder is
    /// forwarded to the codec's record skip, which must deliver exactly
    /// that many.
    pub fn skip_rows(&mut self, to_skip: u64) -> Result<()> {
        let in_batch = cmp::min(to_skip, (self.batch_len - self.row_cursor) as u64) as usize;
        if self.max_def_level == 0 {
            self.value_cursor += in_batch;
        } else {
            for level in &self.def_levels[self.row_cursor..self.row_cursor + in_batch] {
                if *level == self.max_def_level {
                    self.value_cursor += 1;
                }
            }
        }
        self.row_cursor += in_batch;

        let past_batch = to_skip - in_batch as u64;
        if past_batch > 0 {
            let skipped = self.reader.skip_records(past_batch as usize)? as u64;
            if skipped != past_batch {
                return Err(general_err!(
                    "asked to skip {} rows but the column chunk had only {}",
                    past_batch,
                    skipped
                ));
            }
        }
        Ok(())
    }

    fn rebuffer(&mut self) -> Result<()> {
        self.values.clear();
        self.def_levels.clear();
        // `read_records` appends: values left-packed, one definition
        // level per logical row for an optional column
        let def_levels = (self.max_def_level > 0).then_some(&mut self.def_levels);
        let (records, _values, _levels) =
            self.reader
                .read_records(BATCH_SIZE, def_levels, None, &mut self.values)?;
        self.batch_len = records;
        self.row_cursor = 0;
        self.value_cursor = 0;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn assert_cursor_invariant(&self) {
        let expected = if self.max_def_level == 0 {
            self.row_cursor
        } else {
            self.def_levels[..self.row_cursor]
                .iter()
                .filter(|&&level| level == self.max_def_level)
                .count()
        };
        assert_eq!(self.value_cursor, expected);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::Int32Array;
    use arrow::datatypes::{DataType as ArrowType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use bytes::Bytes;
    use parquet::arrow::ArrowWriter;
    use parquet::data_type::Int32Type;
    use parquet::file::reader::{FileReader, SerializedFileReader};

    use super::*;

    fn i32_value(value: &i32) -> PrintableValue<'_> {
        PrintableValue::I32(*value)
    }

    /// One-column in-memory Parquet file holding `values`.
    fn int32_file(values: &[Option<i32>], nullable: bool) -> SerializedFileReader<Bytes> {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "a",
            ArrowType::Int32,
            nullable,
        )]));
        let array = Int32Array::from(values.to_vec());
        let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(array)]).unwrap();

        let mut buffer = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        SerializedFileReader::new(Bytes::from(buffer)).unwrap()
    }

    fn reader_over(file: &SerializedFileReader<Bytes>) -> BufferedColumnReader<Int32Type> {
        let max_def_level = file
            .metadata()
            .file_metadata()
            .schema_descr()
            .column(0)
            .max_def_level();
        let row_group = file.get_row_group(0).unwrap();
        let column = row_group.get_column_reader(0).unwrap();
        let typed = Int32Type::get_column_reader(column).unwrap();
        BufferedColumnReader::new(typed, max_def_level, i32_value)
    }

    #[test]
    fn test_next_value_with_nulls() {
        let values: Vec<Option<i32>> = vec![Some(1), None, Some(3), None];
        let file = int32_file(&values, true);
        let mut reader = reader_over(&file);
        for expected in &values {
            let got = reader.next_value().unwrap();
            assert_eq!(got, expected.map(PrintableValue::I32));
            reader.assert_cursor_invariant();
        }
        assert!(reader.next_value().is_err());
    }

    #[test]
    fn test_required_column_has_no_nulls() {
        let values: Vec<Option<i32>> = (0..5).map(Some).collect();
        let file = int32_file(&values, false);
        let mut reader = reader_over(&file);
        for i in 0..5 {
            assert_eq!(
                reader.next_value().unwrap(),
                Some(PrintableValue::I32(i))
            );
            reader.assert_cursor_invariant();
        }
    }

    #[test]
    fn test_rebuffer_across_batches() {
        // Three batches worth of rows, every third row null
        let values: Vec<Option<i32>> = (0..(3 * BATCH_SIZE as i32))
            .map(|i| if i % 3 == 0 { None } else { Some(i) })
            .collect();
        let file = int32_file(&values, true);
        let mut reader = reader_over(&file);
        for expected in &values {
            assert_eq!(
                reader.next_value().unwrap(),
                expected.map(PrintableValue::I32)
            );
            reader.assert_cursor_invariant();
        }
    }

    #[test]
    fn test_skip_within_and_past_batch() {
        let values: Vec<Option<i32>> = (0..100)
            .map(|i| if i % 4 == 0 { None } else { Some(i) })
            .collect();
        let file = int32_file(&values, true);
        let mut reader = reader_over(&file);

        // Pull one value so a batch is buffered, then skip within it
        assert_eq!(reader.next_value().unwrap(), None);
        reader.skip_rows(10).unwrap();
        reader.assert_cursor_invariant();
        assert_eq!(reader.next_value().unwrap(), Some(PrintableValue::I32(11)));

        // Skip far past the buffered batch
        reader.skip_rows(80).unwrap();
        assert_eq!(reader.next_value().unwrap(), None); // row 92
        assert_eq!(reader.next_value().unwrap(), Some(PrintableValue::I32(93)));
    }

    #[test]
    fn test_skip_past_end_is_an_error() {
        let file = int32_file(&[Some(1), Some(2)], true);
        let mut reader = reader_over(&file);
        assert!(reader.skip_rows(3).is_err());
    }
}
