//! The cell type for heterogeneous `Generic` columns, and its canonical text
//! rendering used by the coercion fallback.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single dynamically-typed cell value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

/// The kind tag of a `Scalar`, used to decide whether a `Generic` column is
/// secretly homogeneous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Int,
    Float,
    Bool,
    Str,
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Str(_) => ScalarKind::Str,
        }
    }

    /// The canonical text rendering of a cell. This is the contract of the
    /// text-coercion fallback: after coercion, every non-null entry equals
    /// `to_text()` of its original value.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
            Scalar::Bool(v) => v.to_string(),
            Scalar::Str(v) => v.clone(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
