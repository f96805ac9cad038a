//! This module defines the canonical, type-safe representation of logical
//! column types used throughout the plume encoder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared logical type of a column, resolved once at encode time.
///
/// This enum replaces ad-hoc runtime type inspection: every column carries
/// exactly one of these variants, and the encoder dispatches on it rather than
/// re-inspecting values.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnType {
    /// Integer or floating-point values.
    Numeric,
    Boolean,
    Text,
    /// Datetimes without an explicit zone. Subject to the encoder's
    /// timezone-normalization pass.
    Temporal,
    /// Datetimes that already carry a zone; stored as UTC instants.
    TemporalWithZone,
    /// Heterogeneous cells. The only type eligible for the text-coercion
    /// fallback.
    Generic,
}

impl ColumnType {
    /// Returns `true` for the two temporal variants.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Temporal | Self::TemporalWithZone)
    }

    /// Returns `true` if columns of this type may trigger the text-coercion
    /// fallback. Deliberately restricted to `Generic`: a typed column that
    /// fails to encode is a bug, not a candidate for coercion.
    pub fn is_coercible(&self) -> bool {
        matches!(self, Self::Generic)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
