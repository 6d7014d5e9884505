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

//! Equivalence check over two Parquet files.
//!
//! Strict on schema (column count, names, physical and logical types,
//! row group layout), loose on encoding: values are compared after the
//! codec decodes them, so a dictionary-encoded column equals a plain
//! one holding the same values. The first difference is reported as a
//! short unified-style block and the walk stops.

use std::io::{self, Write};

use parquet::basic::Type as PhysicalType;
use parquet::column::reader::ColumnReaderImpl;
use parquet::data_type::{
    ByteArray, ByteArrayType, DataType, DoubleType, FloatType, Int32Type, Int64Type,
};
use parquet::file::reader::FileReader;
use parquet::schema::types::ColumnDescriptor;

use crate::errors::Result;
use crate::transcriber::{check_flat, effective_logical_type};

/// What the comparison found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOutcome {
    Equivalent,
    Different,
    /// At least one file uses a column shape the tools do not handle.
    Unsupported,
}

impl DiffOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            DiffOutcome::Equivalent => 0,
            DiffOutcome::Different => 1,
            DiffOutcome::Unsupported => 2,
        }
    }
}

/// Compare two open files, writing the first difference to `out`.
pub fn diff<W: Write>(
    file1: &dyn FileReader,
    file2: &dyn FileReader,
    out: &mut W,
) -> Result<DiffOutcome> {
    let metadata1 = file1.metadata();
    let metadata2 = file2.metadata();
    let schema1 = metadata1.file_metadata().schema_descr();
    let schema2 = metadata2.file_metadata().schema_descr();

    let n_columns = schema1.num_columns();
    if schema2.num_columns() != n_columns {
        writeln!(
            out,
            "Number of columns:\n-{}\n+{}",
            n_columns,
            schema2.num_columns()
        )?;
        return Ok(DiffOutcome::Different);
    }
    for i in 0..n_columns {
        let outcome = diff_column(i, &schema1.column(i), &schema2.column(i), out)?;
        if outcome != DiffOutcome::Equivalent {
            return Ok(outcome);
        }
    }

    let n_row_groups = metadata1.num_row_groups();
    if metadata2.num_row_groups() != n_row_groups {
        writeln!(
            out,
            "Number of row groups:\n-{}\n+{}",
            n_row_groups,
            metadata2.num_row_groups()
        )?;
        return Ok(DiffOutcome::Different);
    }

    for group in 0..n_row_groups {
        let n_rows1 = metadata1.row_group(group).num_rows();
        let n_rows2 = metadata2.row_group(group).num_rows();
        if n_rows1 != n_rows2 {
            writeln!(
                out,
                "RowGroup {} number of rows:\n-{}\n+{}",
                group, n_rows1, n_rows2
            )?;
            return Ok(DiffOutcome::Different);
        }

        let group1 = file1.get_row_group(group)?;
        let group2 = file2.get_row_group(group)?;
        for column in 0..n_columns {
            // A column with no nulls may be REQUIRED in one file and
            // OPTIONAL in the other; that is an encoding detail, so each
            // side decodes with its own max definition level
            let max_def_levels = (
                schema1.column(column).max_def_level(),
                schema2.column(column).max_def_level(),
            );
            let outcome = diff_column_chunk(
                group,
                column,
                schema1.column(column).physical_type(),
                max_def_levels,
                group1.as_ref(),
                group2.as_ref(),
                n_rows1 as usize,
                out,
            )?;
            if outcome != DiffOutcome::Equivalent {
                return Ok(outcome);
            }
        }
    }

    Ok(DiffOutcome::Equivalent)
}

const SUPPORTED_PHYSICAL_TYPES: [PhysicalType; 5] = [
    PhysicalType::INT32,
    PhysicalType::INT64,
    PhysicalType::FLOAT,
    PhysicalType::DOUBLE,
    PhysicalType::BYTE_ARRAY,
];

fn diff_column<W: Write>(
    column_number: usize,
    column1: &ColumnDescriptor,
    column2: &ColumnDescriptor,
    out: &mut W,
) -> Result<DiffOutcome> {
    if column1.name() != column2.name() {
        writeln!(
            out,
            "Column {} name:\n-{}\n+{}",
            column_number,
            column1.name(),
            column2.name()
        )?;
        return Ok(DiffOutcome::Different);
    }

    if column1.physical_type() != column2.physical_type() {
        writeln!(
            out,
            "Column {} ({}) physical type:\n-{}\n+{}",
            column_number,
            column1.name(),
            column1.physical_type(),
            column2.physical_type()
        )?;
        return Ok(DiffOutcome::Different);
    }

    if !logical_types_equal(column1, column2) {
        writeln!(
            out,
            "Column {} ({}) logical type:\n-{}\n+{}",
            column_number,
            column1.name(),
            format_logical_type(column1),
            format_logical_type(column2)
        )?;
        return Ok(DiffOutcome::Different);
    }

    for column in [column1, column2] {
        if let Err(e) = check_flat(column) {
            writeln!(out, "Column {}: {}", column_number, e)?;
            return Ok(DiffOutcome::Unsupported);
        }
    }

    if !SUPPORTED_PHYSICAL_TYPES.contains(&column1.physical_type()) {
        writeln!(
            out,
            "Column {} ({}) uses unsupported physical type {}",
            column_number,
            column1.name(),
            column1.physical_type()
        )?;
        return Ok(DiffOutcome::Unsupported);
    }

    Ok(DiffOutcome::Equivalent)
}

/// Structural logical-type equality.
///
/// When both files carry a logical annotation the annotations must
/// match exactly. A v1-writer file may carry only a converted type, so
/// a missing annotation compares through the collapsed form instead,
/// making a v1 and a v2 rendition of the same schema equivalent.
fn logical_types_equal(column1: &ColumnDescriptor, column2: &ColumnDescriptor) -> bool {
    match (column1.logical_type(), column2.logical_type()) {
        (Some(a), Some(b)) => a == b,
        (None, None) => column1.converted_type() == column2.converted_type(),
        _ => effective_logical_type(column1) == effective_logical_type(column2),
    }
}

fn format_logical_type(column: &ColumnDescriptor) -> String {
    match column.logical_type() {
        Some(logical) => format!("{:?}", logical),
        None => format!("{:?}", column.converted_type()),
    }
}

fn diff_column_chunk<W: Write>(
    group_number: usize,
    column_number: usize,
    physical_type: PhysicalType,
    max_def_levels: (i16, i16),
    group1: &dyn parquet::file::reader::RowGroupReader,
    group2: &dyn parquet::file::reader::RowGroupReader,
    n_rows: usize,
    out: &mut W,
) -> Result<DiffOutcome> {
    let reader1 = group1.get_column_reader(column_number)?;
    let reader2 = group2.get_column_reader(column_number)?;
    match physical_type {
        PhysicalType::INT32 => diff_column_chunk_typed::<Int32Type, W>(
            group_number,
            column_number,
            max_def_levels,
            reader1,
            reader2,
            n_rows,
            out,
        ),
        PhysicalType::INT64 => diff_column_chunk_typed::<Int64Type, W>(
            group_number,
            column_number,
            max_def_levels,
            reader1,
            reader2,
            n_rows,
            out,
        ),
        PhysicalType::FLOAT => diff_column_chunk_typed::<FloatType, W>(
            group_number,
            column_number,
            max_def_levels,
            reader1,
            reader2,
            n_rows,
            out,
        ),
        PhysicalType::DOUBLE => diff_column_chunk_typed::<DoubleType, W>(
            group_number,
            column_number,
            max_def_levels,
            reader1,
            reader2,
            n_rows,
            out,
        ),
        PhysicalType::BYTE_ARRAY => diff_column_chunk_typed::<ByteArrayType, W>(
            group_number,
            column_number,
            max_def_levels,
            reader1,
            reader2,
            n_rows,
            out,
        ),
        _ => unreachable!("unsupported physical types are rejected by the schema pass"),
    }
}

fn diff_column_chunk_typed<T, W>(
    group_number: usize,
    column_number: usize,
    (max_def_level1, max_def_level2): (i16, i16),
    reader1: parquet::column::reader::ColumnReader,
    reader2: parquet::column::reader::ColumnReader,
    n_rows: usize,
    out: &mut W,
) -> Result<DiffOutcome>
where
    T: DataType,
    T::T: DiffValue,
    W: Write,
{
    let mut chunk1 = T::get_column_reader(reader1)
        .ok_or_else(|| general_err!("could not cast column {} to its schema type", column_number))?;
    let mut chunk2 = T::get_column_reader(reader2)
        .ok_or_else(|| general_err!("could not cast column {} to its schema type", column_number))?;
    let (values1, def_levels1) = read_column_chunk(&mut chunk1, n_rows, max_def_level1)?;
    let (values2, def_levels2) = read_column_chunk(&mut chunk2, n_rows, max_def_level2)?;

    let mut value_cursor1 = 0;
    let mut value_cursor2 = 0;
    for row in 0..n_rows {
        let valid1 = max_def_level1 == 0 || def_levels1[row] == max_def_level1;
        let valid2 = max_def_level2 == 0 || def_levels2[row] == max_def_level2;
        match (valid1, valid2) {
            (true, true) => {
                let value1 = &values1[value_cursor1];
                let value2 = &values2[value_cursor2];
                if value1 != value2 {
                    write_difference_header(out, group_number, column_number, row)?;
                    out.write_all(b"-")?;
                    value1.write_diff(out)?;
                    out.write_all(b"\n+")?;
                    value2.write_diff(out)?;
                    out.write_all(b"\n")?;
                    return Ok(DiffOutcome::Different);
                }
                value_cursor1 += 1;
                value_cursor2 += 1;
            }
            (true, false) => {
                write_difference_header(out, group_number, column_number, row)?;
                out.write_all(b"-")?;
                values1[value_cursor1].write_diff(out)?;
                out.write_all(b"\n+(null)\n")?;
                return Ok(DiffOutcome::Different);
            }
            (false, true) => {
                write_difference_header(out, group_number, column_number, row)?;
                out.write_all(b"-(null)\n+")?;
                values2[value_cursor2].write_diff(out)?;
                out.write_all(b"\n")?;
                return Ok(DiffOutcome::Different);
            }
            (false, false) => {}
        }
    }

    Ok(DiffOutcome::Equivalent)
}

/// Read a whole column chunk: left-packed values plus one definition
/// level per logical row (levels stay empty for a required column).
fn read_column_chunk<T: DataType>(
    reader: &mut ColumnReaderImpl<T>,
    n_rows: usize,
    max_def_level: i16,
) -> Result<(Vec<T::T>, Vec<i16>)> {
    let mut values = Vec::with_capacity(n_rows);
    let mut def_levels = Vec::with_capacity(n_rows);
    let mut records_read = 0;
    while records_read < n_rows {
        let levels = (max_def_level > 0).then_some(&mut def_levels);
        let (records, _, _) = reader.read_records(n_rows - records_read, levels, None, &mut values)?;
        if records == 0 {
            break;
        }
        records_read += records;
    }
    if records_read != n_rows {
        return Err(general_err!(
            "column chunk holds {} rows where the row group declares {}",
            records_read,
            n_rows
        ));
    }
    Ok((values, def_levels))
}

fn write_difference_header<W: Write>(
    out: &mut W,
    group_number: usize,
    column_number: usize,
    row: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "RowGroup {}, Column {}, Row {}:",
        group_number, column_number, row
    )
}

/// Per-physical-type equality and diff-line rendering.
trait DiffValue: PartialEq {
    fn write_diff<W: Write>(&self, out: &mut W) -> io::Result<()>;
}

impl DiffValue for i32 {
    fn write_diff<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl DiffValue for i64 {
    fn write_diff<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl DiffValue for f32 {
    fn write_diff<W: Write>(&self, out: &mut W) -> io::Result<()> {
        // shortest round-trip form; non-finite values spell out as
        // NaN / Infinity / -Infinity
        let mut buffer = ryu_js::Buffer::new();
        out.write_all(buffer.format(*self).as_bytes())
    }
}

impl DiffValue for f64 {
    fn write_diff<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut buffer = ryu_js::Buffer::new();
        out.write_all(buffer.format(*self).as_bytes())
    }
}

impl DiffValue for ByteArray {
    fn write_diff<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.data())
    }
}
