// src/process/concat.rs

use arrow::{
    array::{new_null_array, ArrayRef},
    compute::concat_batches,
    datatypes::{DataType, Field, Schema, SchemaRef},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;
use tracing::debug;

use super::Table;
use crate::error::Result;

impl Table {
    /// Stack `tables` top to bottom.
    ///
    /// The output carries the union of all columns, in order of first
    /// appearance. A table lacking a column contributes nulls for it. Row
    /// positions are renumbered from zero.
    pub fn concat(tables: &[Table]) -> Result<Table> {
        if tables.is_empty() {
            return Ok(Table::empty());
        }

        let schema = union_schema(tables);
        let batches = tables
            .iter()
            .map(|t| conform(t, &schema))
            .collect::<Result<Vec<_>>>()?;

        let combined = concat_batches(&schema, &batches)?;
        debug!(
            tables = tables.len(),
            rows = combined.num_rows(),
            columns = combined.num_columns(),
            "tables concatenated"
        );
        Ok(Table::from_batch(combined))
    }
}

fn union_schema(tables: &[Table]) -> SchemaRef {
    let mut names: Vec<String> = Vec::new();
    for table in tables {
        for name in table.column_names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    let fields: Vec<Field> = names
        .into_iter()
        .map(|n| Field::new(n, DataType::Utf8, true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Re-shape one table onto `schema`, filling absent columns with nulls.
fn conform(table: &Table, schema: &SchemaRef) -> Result<RecordBatch> {
    let rows = table.num_rows();
    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| {
            table
                .batch()
                .column_by_name(field.name())
                .cloned()
                .unwrap_or_else(|| new_null_array(&DataType::Utf8, rows))
        })
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    Ok(RecordBatch::try_new_with_options(schema.clone(), columns, &options)?)
}
