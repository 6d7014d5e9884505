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

//! On-disk Parquet fixtures shared by the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::sync::Arc;

use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use parquet::file::reader::SerializedFileReader;
use tempfile::NamedTempFile;

/// Write one record batch to a fresh Parquet tempfile.
pub fn parquet_file(batch: &RecordBatch, properties: Option<WriterProperties>) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    let mut writer =
        ArrowWriter::try_new(file.reopen().unwrap(), batch.schema(), properties).unwrap();
    writer.write(batch).unwrap();
    writer.close().unwrap();
    file
}

/// Write a Parquet tempfile holding only a schema: zero row groups.
pub fn schema_only_parquet_file(schema: Arc<Schema>) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    let writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
    writer.close().unwrap();
    file
}

pub fn open_parquet(file: &NamedTempFile) -> SerializedFileReader<File> {
    SerializedFileReader::new(file.reopen().unwrap()).unwrap()
}
