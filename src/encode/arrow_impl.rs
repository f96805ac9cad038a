//! Marshals columns from the table model into Arrow fields and arrays.
//!
//! This is the boundary between plume's own column representation and the
//! Arrow world. Strict conversion preserves each column's declared logical
//! type; the coercing variant rewrites `Generic` columns to text and is only
//! invoked for the encoder's single fallback retry.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray, TimestampMillisecondArray,
};
use arrow::datatypes::{DataType, Field, TimeUnit};

use crate::error::PlumeError;
use crate::table::{Column, ColumnValues};
use crate::types::{Scalar, ScalarKind};

use super::temporal::{self, LocalOffset};

/// Converts one column into its Arrow field and array.
///
/// `coerce_generic` selects the fallback behavior for `Generic` columns:
/// strict conversion demands a single scalar kind (numeric widening aside),
/// while coercion rewrites every cell to its canonical text rendering.
pub(crate) fn column_to_field_array(
    column: &Column,
    offset: &LocalOffset,
    coerce_generic: bool,
) -> Result<(Field, ArrayRef), PlumeError> {
    let name = column.name();
    let (data_type, array): (DataType, ArrayRef) = match column.values() {
        ColumnValues::Int64(values) => (
            DataType::Int64,
            Arc::new(Int64Array::from(values.clone())),
        ),
        ColumnValues::Float64(values) => (
            DataType::Float64,
            Arc::new(Float64Array::from(values.clone())),
        ),
        ColumnValues::Boolean(values) => (
            DataType::Boolean,
            Arc::new(BooleanArray::from(values.clone())),
        ),
        ColumnValues::Utf8(values) => (
            DataType::Utf8,
            Arc::new(StringArray::from(values.clone())),
        ),
        ColumnValues::Timestamp(values) => timestamp_to_array(values, offset),
        ColumnValues::TimestampTz(values) => {
            let tz: Arc<str> = Arc::from("UTC");
            let millis: Vec<Option<i64>> = values
                .iter()
                .map(|v| v.map(|dt| dt.timestamp_millis()))
                .collect();
            let array = TimestampMillisecondArray::from(millis).with_timezone(Arc::clone(&tz));
            (
                DataType::Timestamp(TimeUnit::Millisecond, Some(tz)),
                Arc::new(array),
            )
        }
        ColumnValues::Generic(cells) => {
            if coerce_generic {
                generic_to_text(cells)
            } else {
                generic_strict(name, cells)?
            }
        }
    };

    Ok((Field::new(name, data_type, true), array))
}

/// Resolves a zone-naive temporal column per the normalization rules: all
/// midnights become a UTC date column, anything else is localized to the
/// captured standard offset and stored as UTC instants.
fn timestamp_to_array(
    values: &[Option<chrono::NaiveDateTime>],
    offset: &LocalOffset,
) -> (DataType, ArrayRef) {
    let (tz, millis): (Arc<str>, Vec<Option<i64>>) = if temporal::all_midnight(values) {
        (
            Arc::from("UTC"),
            values.iter().map(|v| v.map(temporal::utc_millis)).collect(),
        )
    } else {
        (
            Arc::from(offset.label()),
            values
                .iter()
                .map(|v| v.map(|dt| temporal::utc_millis_at_offset(dt, offset)))
                .collect(),
        )
    };
    let array = TimestampMillisecondArray::from(millis).with_timezone(Arc::clone(&tz));
    (
        DataType::Timestamp(TimeUnit::Millisecond, Some(tz)),
        Arc::new(array),
    )
}

/// Strict conversion of a `Generic` column.
///
/// A column whose non-null cells share one kind converts to that kind's typed
/// array; an int/float mixture widens to `Float64` the way the client
/// surface's own readers do. Any other mixture is a `MixedType` failure.
fn generic_strict(
    name: &str,
    cells: &[Option<Scalar>],
) -> Result<(DataType, ArrayRef), PlumeError> {
    let mut has = [false; 4];
    for cell in cells.iter().flatten() {
        has[match cell.kind() {
            ScalarKind::Int => 0,
            ScalarKind::Float => 1,
            ScalarKind::Bool => 2,
            ScalarKind::Str => 3,
        }] = true;
    }

    let array: (DataType, ArrayRef) = match has {
        // All-null columns carry no kind evidence; store them as null text.
        [false, false, false, false] => generic_to_text(cells),
        [true, false, false, false] => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|c| match c {
                    Some(Scalar::Int(v)) => Some(*v),
                    _ => None,
                })
                .collect();
            (DataType::Int64, Arc::new(Int64Array::from(values)))
        }
        [_, true, false, false] => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|c| match c {
                    Some(Scalar::Int(v)) => Some(*v as f64),
                    Some(Scalar::Float(v)) => Some(*v),
                    _ => None,
                })
                .collect();
            (DataType::Float64, Arc::new(Float64Array::from(values)))
        }
        [false, false, true, false] => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|c| match c {
                    Some(Scalar::Bool(v)) => Some(*v),
                    _ => None,
                })
                .collect();
            (DataType::Boolean, Arc::new(BooleanArray::from(values)))
        }
        [false, false, false, true] => {
            let values: Vec<Option<&str>> = cells
                .iter()
                .map(|c| match c {
                    Some(Scalar::Str(v)) => Some(v.as_str()),
                    _ => None,
                })
                .collect();
            (DataType::Utf8, Arc::new(StringArray::from(values)))
        }
        _ => return Err(PlumeError::MixedType(name.to_string())),
    };

    Ok(array)
}

/// Coerces every cell of a `Generic` column to its canonical text rendering.
/// Nulls stay null.
fn generic_to_text(cells: &[Option<Scalar>]) -> (DataType, ArrayRef) {
    let values: Vec<Option<String>> = cells
        .iter()
        .map(|c| c.as_ref().map(Scalar::to_text))
        .collect();
    (DataType::Utf8, Arc::new(StringArray::from(values)))
}
