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

use parquet::data_type::DataType;
use parquet::file::reader::FileReader;
use parquet::schema::types::ColumnDescPtr;

use crate::errors::Result;
use crate::reader::{BufferedColumnReader, Convert};
use crate::value::PrintableValue;

/// One column of a file, read row group by row group.
///
/// Owns the current row group's [`BufferedColumnReader`], constructed
/// on demand and replaced when the group is exhausted, so `next_value`
/// and `skip_rows` cross row group boundaries transparently. Row groups
/// are loaded lazily: a file with zero row groups (or a zero-row window)
/// never touches column data.
pub struct FileColumnIterator<'a, T: DataType> {
    file: &'a dyn FileReader,
    column_index: usize,
    descr: ColumnDescPtr,
    convert: Convert<T>,
    current: Option<BufferedColumnReader<T>>,
    rows_left_in_group: u64,
    next_row_group: usize,
}

impl<'a, T: DataType> FileColumnIterator<'a, T> {
    pub fn new(file: &'a dyn FileReader, column_index: usize, convert: Convert<T>) -> Self {
        let descr = file
            .metadata()
            .file_metadata()
            .schema_descr()
            .column(column_index);
        FileColumnIterator {
            file,
            column_index,
            descr,
            convert,
            current: None,
            rows_left_in_group: 0,
            next_row_group: 0,
        }
    }

    /// The column's name, as spelled in the file schema.
    pub fn name(&self) -> &str {
        self.descr.name()
    }

    /// Return the next row's value, or `None` if the row is null.
    ///
    /// The caller bounds itself by the file's row count; asking for a
    /// row past the last row group is an error.
    pub fn next_value(&mut self) -> Result<Option<PrintableValue<'_>>> {
        while self.rows_left_in_group == 0 {
            self.load_next_row_group()?;
        }
        self.rows_left_in_group -= 1;
        let reader = self.current.as_mut().expect("a row group is loaded");
        reader.next_value()
    }

    /// Advance `to_skip` rows without rendering them, crossing row
    /// groups as needed. Fully skipped groups are never decoded.
    pub fn skip_rows(&mut self, mut to_skip: u64) -> Result<()> {
        if to_skip == 0 {
            return Ok(());
        }
        while to_skip > self.rows_left_in_group {
            to_skip -= self.rows_left_in_group;
            self.load_next_row_group()?;
        }
        let reader = self.current.as_mut().expect("a row group is loaded");
        reader.skip_rows(to_skip)?;
        self.rows_left_in_group -= to_skip;
        Ok(())
    }

    fn load_next_row_group(&mut self) -> Result<()> {
        if self.next_row_group >= self.file.metadata().num_row_groups() {
            return Err(general_err!(
                "column {} has no row group left to read from",
                self.descr.name()
            ));
        }
        let row_group = self.file.get_row_group(self.next_row_group)?;
        let column = row_group.get_column_reader(self.column_index)?;
        let typed = T::get_column_reader(column).ok_or_else(|| {
            general_err!(
                "column {} in row group {} is not of the expected physical type",
                self.descr.name(),
                self.next_row_group
            )
        })?;
        self.current = Some(BufferedColumnReader::new(
            typed,
            self.descr.max_def_level(),
            self.convert,
        ));
        self.rows_left_in_group = row_group.metadata().num_rows() as u64;
        self.next_row_group += 1;
        Ok(())
    }
}
