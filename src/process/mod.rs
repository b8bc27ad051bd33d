// src/process/mod.rs
//
// Normalized report tables: loading the cached CSV, cleaning it, stitching
// days together and writing the result back out.

use arrow::{
    array::{Array, ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;

use crate::error::Result;

pub mod clean;
pub mod concat;
pub mod export;
pub mod read;

pub use read::load_report_csv;

/// Column every normalized table must carry.
pub const SETTLEMENT_DATE: &str = "SettlementDate";

/// A report table: named, nullable text columns over positional rows.
#[derive(Debug, Clone)]
pub struct Table {
    batch: RecordBatch,
}

impl Table {
    pub fn empty() -> Self {
        Self {
            batch: RecordBatch::new_empty(Arc::new(Schema::empty())),
        }
    }

    /// Build a table from row-major cells. Rows shorter than `headers` are
    /// padded with nulls; longer rows are cut to the header width.
    ///
    /// `headers` are expected to be unique.
    pub fn from_rows(headers: Vec<String>, rows: &[Vec<Option<String>>]) -> Result<Self> {
        let fields: Vec<Field> = headers
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();

        let columns: Vec<ArrayRef> = (0..headers.len())
            .map(|c| {
                let arr: StringArray = rows
                    .iter()
                    .map(|row| row.get(c).and_then(|v| v.as_deref()))
                    .collect();
                Arc::new(arr) as ArrayRef
            })
            .collect();

        let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
        let batch = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)?;
        Ok(Self { batch })
    }

    pub fn from_batch(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&StringArray> {
        self.batch
            .column_by_name(name)?
            .as_any()
            .downcast_ref::<StringArray>()
    }

    /// Cell at (`row`, `column`); `None` for nulls, unknown columns and
    /// out-of-range rows.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let arr = self.column(column)?;
        if row >= arr.len() || arr.is_null(row) {
            return None;
        }
        Some(arr.value(row))
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}
