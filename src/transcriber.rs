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

//! Per-column binding of a typed reader to the printer.
//!
//! At column-open time the physical and logical type select the typed
//! column reader, the physical-to-printable converter, and thereby the
//! printer path a value takes. The three choices are bound into one
//! [`Transcriber`] variant; the driver then talks to every column
//! through the same three calls.

use parquet::basic::{ConvertedType, LogicalType, Type as PhysicalType};
use parquet::data_type::{
    ByteArray, ByteArrayType, DataType, DoubleType, FloatType, Int32Type, Int64Type,
};
use parquet::file::reader::FileReader;
use parquet::schema::types::ColumnDescriptor;

use crate::errors::Result;
use crate::printer::Printer;
use crate::reader::{Convert, FileColumnIterator};
use crate::value::PrintableValue;

/// A timestamp column's resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampUnit {
    Millis,
    Micros,
    Nanos,
}

/// The logical-type shapes the tools distinguish.
///
/// Collapsed from the codec's logical type, falling back to the legacy
/// converted type for files written by Parquet-format-v1 writers, which
/// may carry no logical annotation at all. `None` on an INT32 or INT64
/// column means signed integer. Anything the tools cannot render maps
/// to `Other` and is rejected at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveLogicalType {
    None,
    Integer { bit_width: i8, is_signed: bool },
    String,
    Date,
    Timestamp(TimestampUnit),
    Other,
}

/// Collapse a column's logical annotation, reading through the legacy
/// converted type when the logical one is absent.
pub fn effective_logical_type(descr: &ColumnDescriptor) -> EffectiveLogicalType {
    if let Some(logical) = descr.logical_type() {
        return match logical {
            LogicalType::Integer {
                bit_width,
                is_signed,
            } => EffectiveLogicalType::Integer {
                bit_width,
                is_signed,
            },
            LogicalType::String => EffectiveLogicalType::String,
            LogicalType::Date => EffectiveLogicalType::Date,
            LogicalType::Timestamp { unit, .. } => {
                // `is_adjusted_to_utc` is deliberately ignored; see the
                // crate docs
                use parquet::basic::TimeUnit;
                EffectiveLogicalType::Timestamp(match unit {
                    TimeUnit::MILLIS(_) => TimestampUnit::Millis,
                    TimeUnit::MICROS(_) => TimestampUnit::Micros,
                    TimeUnit::NANOS(_) => TimestampUnit::Nanos,
                })
            }
            _ => EffectiveLogicalType::Other,
        };
    }
    match descr.converted_type() {
        ConvertedType::NONE => EffectiveLogicalType::None,
        ConvertedType::UTF8 => EffectiveLogicalType::String,
        ConvertedType::DATE => EffectiveLogicalType::Date,
        ConvertedType::TIMESTAMP_MILLIS => {
            EffectiveLogicalType::Timestamp(TimestampUnit::Millis)
        }
        ConvertedType::TIMESTAMP_MICROS => {
            EffectiveLogicalType::Timestamp(TimestampUnit::Micros)
        }
        ConvertedType::INT_8 => signed_int(8),
        ConvertedType::INT_16 => signed_int(16),
        ConvertedType::INT_32 => signed_int(32),
        ConvertedType::INT_64 => signed_int(64),
        ConvertedType::UINT_8 => unsigned_int(8),
        ConvertedType::UINT_16 => unsigned_int(16),
        ConvertedType::UINT_32 => unsigned_int(32),
        ConvertedType::UINT_64 => unsigned_int(64),
        _ => EffectiveLogicalType::Other,
    }
}

fn signed_int(bit_width: i8) -> EffectiveLogicalType {
    EffectiveLogicalType::Integer {
        bit_width,
        is_signed: true,
    }
}

fn unsigned_int(bit_width: i8) -> EffectiveLogicalType {
    EffectiveLogicalType::Integer {
        bit_width,
        is_signed: false,
    }
}

/// Reject the column shapes the tools do not handle.
pub fn check_flat(descr: &ColumnDescriptor) -> Result<()> {
    if descr.max_def_level() > 1 || descr.max_rep_level() > 0 {
        return Err(unsupported_err!(
            "column {} is nested (max definition level {}, max repetition level {})",
            descr.name(),
            descr.max_def_level(),
            descr.max_rep_level()
        ));
    }
    Ok(())
}

/// One selected column, bound to its typed reader and converter.
pub enum Transcriber<'a> {
    Int32(FileColumnIterator<'a, Int32Type>),
    Int64(FileColumnIterator<'a, Int64Type>),
    Float(FileColumnIterator<'a, FloatType>),
    Double(FileColumnIterator<'a, DoubleType>),
    ByteArray(FileColumnIterator<'a, ByteArrayType>),
}

impl<'a> Transcriber<'a> {
    /// Inspect the column's physical and logical type and bind the
    /// matching reader/converter pair.
    pub fn new(file: &'a dyn FileReader, column_index: usize) -> Result<Self> {
        let descr = file
            .metadata()
            .file_metadata()
            .schema_descr()
            .column(column_index);
        check_flat(&descr)?;

        let logical = effective_logical_type(&descr);
        match descr.physical_type() {
            PhysicalType::INT32 => Self::new_int32(file, column_index, &descr, logical),
            PhysicalType::INT64 => Self::new_int64(file, column_index, &descr, logical),
            PhysicalType::FLOAT => Ok(Transcriber::Float(FileColumnIterator::new(
                file,
                column_index,
                f32_value,
            ))),
            PhysicalType::DOUBLE => Ok(Transcriber::Double(FileColumnIterator::new(
                file,
                column_index,
                f64_value,
            ))),
            PhysicalType::BYTE_ARRAY => match logical {
                EffectiveLogicalType::String => Ok(Transcriber::ByteArray(
                    FileColumnIterator::new(file, column_index, str_value),
                )),
                other => Err(unsupported_err!(
                    "column {}: for BYTE_ARRAY only the STRING logical type is handled, got {:?}",
                    descr.name(),
                    other
                )),
            },
            other => Err(unsupported_err!(
                "column {} has unsupported physical type {}",
                descr.name(),
                other
            )),
        }
    }

    fn new_int32(
        file: &'a dyn FileReader,
        column_index: usize,
        descr: &ColumnDescriptor,
        logical: EffectiveLogicalType,
    ) -> Result<Self> {
        let convert: Convert<Int32Type> = match logical {
            // An unannotated INT32 is a signed integer
            EffectiveLogicalType::None => i32_value,
            EffectiveLogicalType::Integer {
                is_signed: true, ..
            } => i32_value,
            EffectiveLogicalType::Integer {
                is_signed: false, ..
            } => u32_value,
            EffectiveLogicalType::Date => date_value,
            other => {
                return Err(unsupported_err!(
                    "column {}: for INT32 only the INT and DATE logical types are handled, got {:?}",
                    descr.name(),
                    other
                ))
            }
        };
        Ok(Transcriber::Int32(FileColumnIterator::new(
            file,
            column_index,
            convert,
        )))
    }

    fn new_int64(
        file: &'a dyn FileReader,
        column_index: usize,
        descr: &ColumnDescriptor,
        logical: EffectiveLogicalType,
    ) -> Result<Self> {
        let convert: Convert<Int64Type> = match logical {
            // An unannotated INT64 is a signed integer
            EffectiveLogicalType::None => i64_value,
            EffectiveLogicalType::Integer {
                is_signed: true, ..
            } => i64_value,
            EffectiveLogicalType::Integer {
                is_signed: false, ..
            } => u64_value,
            EffectiveLogicalType::Timestamp(TimestampUnit::Millis) => timestamp_millis_value,
            EffectiveLogicalType::Timestamp(TimestampUnit::Micros) => timestamp_micros_value,
            EffectiveLogicalType::Timestamp(TimestampUnit::Nanos) => timestamp_nanos_value,
            other => {
                return Err(unsupported_err!(
                    "column {}: for INT64 only the INT and TIMESTAMP logical types are handled, got {:?}",
                    descr.name(),
                    other
                ))
            }
        };
        Ok(Transcriber::Int64(FileColumnIterator::new(
            file,
            column_index,
            convert,
        )))
    }

    pub fn name(&self) -> &str {
        match self {
            Transcriber::Int32(iter) => iter.name(),
            Transcriber::Int64(iter) => iter.name(),
            Transcriber::Float(iter) => iter.name(),
            Transcriber::Double(iter) => iter.name(),
            Transcriber::ByteArray(iter) => iter.name(),
        }
    }

    /// Skip `n_rows` values. There must be that many left.
    pub fn skip_rows(&mut self, n_rows: u64) -> Result<()> {
        match self {
            Transcriber::Int32(iter) => iter.skip_rows(n_rows),
            Transcriber::Int64(iter) => iter.skip_rows(n_rows),
            Transcriber::Float(iter) => iter.skip_rows(n_rows),
            Transcriber::Double(iter) => iter.skip_rows(n_rows),
            Transcriber::ByteArray(iter) => iter.skip_rows(n_rows),
        }
    }

    /// Print the next value as the field at `output_column_index`.
    pub fn print_next(
        &mut self,
        printer: &mut dyn Printer,
        output_column_index: usize,
    ) -> Result<()> {
        match self {
            Transcriber::Int32(iter) => transcribe_next(iter, printer, output_column_index),
            Transcriber::Int64(iter) => transcribe_next(iter, printer, output_column_index),
            Transcriber::Float(iter) => transcribe_next(iter, printer, output_column_index),
            Transcriber::Double(iter) => transcribe_next(iter, printer, output_column_index),
            Transcriber::ByteArray(iter) => transcribe_next(iter, printer, output_column_index),
        }
    }

    /// Print the header field (effective for CSV only).
    pub fn print_header(
        &self,
        printer: &mut dyn Printer,
        output_column_index: usize,
    ) -> Result<()> {
        printer.write_header_field(output_column_index, self.name())
    }
}

fn transcribe_next<T: DataType>(
    iter: &mut FileColumnIterator<'_, T>,
    printer: &mut dyn Printer,
    output_column_index: usize,
) -> Result<()> {
    printer.write_field_start(output_column_index, iter.name())?;
    match iter.next_value()? {
        Some(value) => printer.write_value(value),
        None => printer.write_null(),
    }
}

fn i32_value(value: &i32) -> PrintableValue<'_> {
    PrintableValue::I32(*value)
}

fn u32_value(value: &i32) -> PrintableValue<'_> {
    PrintableValue::U32(*value as u32)
}

fn date_value(value: &i32) -> PrintableValue<'_> {
    PrintableValue::Date(*value)
}

fn i64_value(value: &i64) -> PrintableValue<'_> {
    PrintableValue::I64(*value)
}

fn u64_value(value: &i64) -> PrintableValue<'_> {
    PrintableValue::U64(*value as u64)
}

fn timestamp_millis_value(value: &i64) -> PrintableValue<'_> {
    PrintableValue::TimestampMillis(*value)
}

fn timestamp_micros_value(value: &i64) -> PrintableValue<'_> {
    PrintableValue::TimestampMicros(*value)
}

fn timestamp_nanos_value(value: &i64) -> PrintableValue<'_> {
    PrintableValue::TimestampNanos(*value)
}

fn f32_value(value: &f32) -> PrintableValue<'_> {
    PrintableValue::F32(*value)
}

fn f64_value(value: &f64) -> PrintableValue<'_> {
    PrintableValue::F64(*value)
}

fn str_value(value: &ByteArray) -> PrintableValue<'_> {
    PrintableValue::Str(value.data())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parquet::basic::Repetition;
    use parquet::schema::types::{ColumnPath, Type as SchemaType};

    use super::*;

    fn descriptor(
        physical: PhysicalType,
        converted: ConvertedType,
        logical: Option<LogicalType>,
    ) -> ColumnDescriptor {
        let mut builder = SchemaType::primitive_type_builder("c", physical)
            .with_repetition(Repetition::OPTIONAL)
            .with_converted_type(converted);
        if logical.is_some() {
            builder = builder.with_logical_type(logical);
        }
        ColumnDescriptor::new(
            Arc::new(builder.build().unwrap()),
            1,
            0,
            ColumnPath::from("c"),
        )
    }

    #[test]
    fn test_logical_annotation_wins() {
        let descr = descriptor(
            PhysicalType::BYTE_ARRAY,
            ConvertedType::UTF8,
            Some(LogicalType::String),
        );
        assert_eq!(effective_logical_type(&descr), EffectiveLogicalType::String);
    }

    #[test]
    fn test_converted_type_fallback() {
        // a Parquet-format-v1 writer records only the converted type
        let cases = [
            (
                PhysicalType::BYTE_ARRAY,
                ConvertedType::UTF8,
                EffectiveLogicalType::String,
            ),
            (
                PhysicalType::INT32,
                ConvertedType::DATE,
                EffectiveLogicalType::Date,
            ),
            (
                PhysicalType::INT64,
                ConvertedType::TIMESTAMP_MILLIS,
                EffectiveLogicalType::Timestamp(TimestampUnit::Millis),
            ),
            (
                PhysicalType::INT64,
                ConvertedType::TIMESTAMP_MICROS,
                EffectiveLogicalType::Timestamp(TimestampUnit::Micros),
            ),
            (
                PhysicalType::INT32,
                ConvertedType::INT_16,
                EffectiveLogicalType::Integer {
                    bit_width: 16,
                    is_signed: true,
                },
            ),
            (
                PhysicalType::INT64,
                ConvertedType::UINT_64,
                EffectiveLogicalType::Integer {
                    bit_width: 64,
                    is_signed: false,
                },
            ),
            (
                PhysicalType::INT64,
                ConvertedType::NONE,
                EffectiveLogicalType::None,
            ),
            (
                PhysicalType::INT64,
                ConvertedType::TIME_MICROS,
                EffectiveLogicalType::Other,
            ),
        ];
        for (physical, converted, expected) in cases {
            let descr = descriptor(physical, converted, None);
            assert_eq!(
                effective_logical_type(&descr),
                expected,
                "converted type {:?}",
                converted
            );
        }
    }

    #[test]
    fn test_check_flat_rejects_nested_columns() {
        let primitive = SchemaType::primitive_type_builder("c", PhysicalType::INT32)
            .with_repetition(Repetition::OPTIONAL)
            .build()
            .unwrap();
        let nested = ColumnDescriptor::new(Arc::new(primitive), 2, 1, ColumnPath::from("c"));
        assert!(check_flat(&nested).is_err());
    }
}
