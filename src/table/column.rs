//! A single named column and its typed value storage.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::types::{ColumnType, Scalar};

/// Typed value storage for one column. Every variant is `Option`-valued so
/// nulls flow through to the wire format's validity bitmaps.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    Utf8(Vec<Option<String>>),
    /// Datetimes without an explicit zone. The encoder resolves their zone
    /// deterministically before serialization.
    Timestamp(Vec<Option<NaiveDateTime>>),
    /// Datetimes that already carry a zone, held as UTC instants.
    TimestampTz(Vec<Option<DateTime<Utc>>>),
    /// Heterogeneous cells.
    Generic(Vec<Option<Scalar>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Int64(v) => v.len(),
            ColumnValues::Float64(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Utf8(v) => v.len(),
            ColumnValues::Timestamp(v) => v.len(),
            ColumnValues::TimestampTz(v) => v.len(),
            ColumnValues::Generic(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves the declared logical type of this storage.
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnValues::Int64(_) | ColumnValues::Float64(_) => ColumnType::Numeric,
            ColumnValues::Boolean(_) => ColumnType::Boolean,
            ColumnValues::Utf8(_) => ColumnType::Text,
            ColumnValues::Timestamp(_) => ColumnType::Temporal,
            ColumnValues::TimestampTz(_) => ColumnType::TemporalWithZone,
            ColumnValues::Generic(_) => ColumnType::Generic,
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn column_type(&self) -> ColumnType {
        self.values.column_type()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
