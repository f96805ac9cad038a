//! The columnar encoder: tabular dataset in, wire-container bytes out.
//!
//! Encoding is a pure transform. The input table is never mutated; temporal
//! normalization and text coercion operate on freshly built arrays. The
//! output is a self-describing columnar container (schema plus row batches)
//! whose bytes are reproducible for identical inputs, which is what makes the
//! content-addressed store downstream deduplicate correctly.

mod arrow_impl;
pub mod temporal;

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::Schema;
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use crate::config::PlumeConfig;
use crate::error::PlumeError;
use crate::table::{Column, Table};

pub use temporal::LocalOffset;

/// Encodes a table into wire-container bytes, capturing the process's
/// standard offset for temporal normalization.
pub fn encode(table: &Table, config: &PlumeConfig) -> Result<Vec<u8>, PlumeError> {
    encode_at_offset(table, config, &LocalOffset::standard())
}

/// Encodes with an explicit offset context.
///
/// The offset is captured exactly once per encode call; this entry point makes
/// the capture injectable so results are reproducible regardless of the host's
/// zone configuration.
pub fn encode_at_offset(
    table: &Table,
    config: &PlumeConfig,
    offset: &LocalOffset,
) -> Result<Vec<u8>, PlumeError> {
    let columns = table.encoding_columns();

    let batch = match build_batch(&columns, offset, false) {
        Err(PlumeError::MixedType(name)) => {
            // Single retry: rewrite declared-Generic columns to text. Typed
            // columns never take this path.
            log::debug!(
                "column '{}' failed strict construction, retrying with text coercion",
                name
            );
            build_batch(&columns, offset, true)
                .map_err(|e| PlumeError::Unencodable(format!("text-coercion retry failed: {e}")))?
        }
        other => other?,
    };

    write_container(&batch, config.chunk_size_rows)
}

/// Converts every column and assembles the record batch.
fn build_batch(
    columns: &[&Column],
    offset: &LocalOffset,
    coerce_generic: bool,
) -> Result<RecordBatch, PlumeError> {
    let num_rows = columns.first().map(|c| c.len()).unwrap_or(0);

    let mut fields = Vec::with_capacity(columns.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len());
    for column in columns {
        let (field, array) = arrow_impl::column_to_field_array(column, offset, coerce_generic)?;
        fields.push(field);
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
    RecordBatch::try_new_with_options(schema, arrays, &options).map_err(Into::into)
}

/// Serializes the batch into the container, slicing it into row batches of at
/// most `chunk_size_rows` rows.
///
/// Also the entry point for callers that already hold typed Arrow data and
/// need no table-model pass.
pub(crate) fn write_container(
    batch: &RecordBatch,
    chunk_size_rows: usize,
) -> Result<Vec<u8>, PlumeError> {
    let schema = batch.schema();
    let mut writer = FileWriter::try_new(Vec::new(), &schema)?;

    // A zero chunk size would never make progress.
    let step = chunk_size_rows.max(1);
    let rows = batch.num_rows();
    let mut start = 0;
    while start < rows {
        let len = step.min(rows - start);
        writer.write(&batch.slice(start, len))?;
        start += len;
    }

    writer.finish()?;
    writer.into_inner().map_err(Into::into)
}
