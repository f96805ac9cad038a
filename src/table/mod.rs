//! The tabular dataset model consumed by the encoder.
//!
//! A `Table` is an ordered set of named columns, each with one uniform logical
//! type, plus an optional named row index. It is the source of truth for
//! encoding and is never mutated by this crate: the encoder reads it and
//! copies only what it rewrites.

mod column;

pub use column::{Column, ColumnValues};

use crate::error::PlumeError;

/// An ordered, immutable collection of equally-sized named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: Option<Column>,
    columns: Vec<Column>,
}

impl Table {
    /// Builds a table, validating that every column has the same row count.
    pub fn new(columns: Vec<Column>) -> Result<Self, PlumeError> {
        let expected = columns.first().map(Column::len).unwrap_or(0);
        for col in &columns {
            if col.len() != expected {
                return Err(PlumeError::LengthMismatch(
                    col.name().to_string(),
                    expected,
                    col.len(),
                ));
            }
        }
        Ok(Self {
            index: None,
            columns,
        })
    }

    /// Attaches a named row index. The index participates in encoding as an
    /// ordinary leading column; the wire format has no implicit row identity.
    pub fn with_index(mut self, index: Column) -> Result<Self, PlumeError> {
        if index.len() != self.num_rows() {
            return Err(PlumeError::LengthMismatch(
                index.name().to_string(),
                self.num_rows(),
                index.len(),
            ));
        }
        self.index = Some(index);
        Ok(self)
    }

    pub fn num_rows(&self) -> usize {
        self.columns
            .first()
            .map(Column::len)
            .or_else(|| self.index.as_ref().map(Column::len))
            .unwrap_or(0)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn index(&self) -> Option<&Column> {
        self.index.as_ref()
    }

    /// The columns in encoding order: the materialized index first (if any),
    /// then the data columns.
    pub(crate) fn encoding_columns(&self) -> Vec<&Column> {
        self.index.iter().chain(self.columns.iter()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scalar;

    fn gender_height() -> Table {
        Table::new(vec![
            Column::new(
                "gender",
                ColumnValues::Utf8(vec![Some("M".into()), Some("F".into())]),
            ),
            Column::new("height", ColumnValues::Float64(vec![Some(70.1), Some(63.2)])),
        ])
        .unwrap()
    }

    #[test]
    fn dimensions() {
        let table = gender_height();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.columns()[0].name(), "gender");
        assert!(table.index().is_none());
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = Table::new(vec![
            Column::new("a", ColumnValues::Int64(vec![Some(1), Some(2)])),
            Column::new("b", ColumnValues::Int64(vec![Some(1)])),
        ])
        .unwrap_err();
        assert!(matches!(err, PlumeError::LengthMismatch(name, 2, 1) if name == "b"));
    }

    #[test]
    fn index_is_materialized_first() {
        let table = gender_height()
            .with_index(Column::new("row", ColumnValues::Int64(vec![Some(0), Some(1)])))
            .unwrap();
        let names: Vec<&str> = table.encoding_columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["row", "gender", "height"]);
    }

    #[test]
    fn index_length_must_match() {
        let err = gender_height()
            .with_index(Column::new("row", ColumnValues::Int64(vec![Some(0)])))
            .unwrap_err();
        assert!(matches!(err, PlumeError::LengthMismatch(..)));
    }

    #[test]
    fn empty_table_has_zero_rows() {
        let table = Table::new(vec![]).unwrap();
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.num_columns(), 0);
    }

    #[test]
    fn generic_columns_are_allowed() {
        let table = Table::new(vec![Column::new(
            "payload",
            ColumnValues::Generic(vec![Some(Scalar::Int(1)), None]),
        )])
        .unwrap();
        assert_eq!(table.num_rows(), 2);
    }
}
