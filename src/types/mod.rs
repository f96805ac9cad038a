//! This module defines the core, strongly-typed data representations used
//! throughout the plume encoder.
//!
//! It includes the canonical `ColumnType` enum, which replaces runtime dtype
//! inspection with a tagged union resolved once at encode time, and the
//! `Scalar` cell type used by heterogeneous `Generic` columns.

pub mod column_type;
pub mod scalar;

// Re-export the main types for easier access.
pub use column_type::ColumnType;
pub use scalar::{Scalar, ScalarKind};
