// In: src/config.rs

//! The single source of truth for all plume configuration.
//!
//! This module defines the unified `PlumeConfig` struct, which is designed to be
//! created once at the application boundary (e.g., from a widget's options or a
//! Python keyword-argument set) and then passed down through the system.
//!
//! None of these values are computed by this crate. The chunk size, the store
//! root, and the verbosity flag are all supplied by the collaborator that owns
//! the client surface.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The unified configuration for encoding and publishing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct PlumeConfig {
    /// **The maximum number of rows per serialized row batch.**
    /// Large tables are sliced into batches of at most this many rows before
    /// being written to the wire container. This bounds peak memory on both
    /// ends of the wire and keeps artifacts reproducible across runs. It is a
    /// fixed constant per configuration, never data-dependent.
    #[serde(default = "default_chunk_size_rows")]
    pub chunk_size_rows: usize,

    /// Root directory of the on-disk artifact store. Published artifacts land
    /// directly under this directory; in-progress writes use its `tmp/`
    /// subdirectory.
    #[serde(default = "default_store_root")]
    pub store_root: PathBuf,

    /// If true, human-readable timing diagnostics are emitted through the `log`
    /// facade. Observability only; has no effect on behavior.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for PlumeConfig {
    fn default() -> Self {
        Self {
            chunk_size_rows: default_chunk_size_rows(),
            store_root: default_store_root(),
            verbose: false,
        }
    }
}

/// Helper for `serde` to provide a default for `chunk_size_rows`.
fn default_chunk_size_rows() -> usize {
    8192
}

/// Helper for `serde` to provide a default for `store_root`.
fn default_store_root() -> PathBuf {
    PathBuf::from("_plume_data")
}
