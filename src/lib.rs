//! This file is the root of the `plume_cache` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`bridge`, `store`,
//!     etc.) so the Rust compiler knows they exist.
//! 2.  Defining the `#[pymodule]` which acts as the main entry point when the
//!     compiled library is imported into Python.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod error;
pub mod runtime;
pub mod store;
pub mod table;
pub mod types;

mod encode;
mod ffi;

//==================================================================================
// 2. Python Module Definition
//==================================================================================
use ffi::python::{PyArtifactStore, PyRequestBridge};
use pyo3::prelude::*;

/// The `plume_cache` Python module, containing all exposed Rust functions.
#[pymodule]
fn plume_cache(py: Python, m: &PyModule) -> PyResult<()> {
    // --- Stateless encode/publish API ---
    m.add_function(wrap_pyfunction!(ffi::encode_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::encode_arrow_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::publish_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::encode_and_publish_py, m)?)?;

    // --- Add our classes module ---
    m.add_class::<PyArtifactStore>()?;
    m.add_class::<PyRequestBridge>()?;

    // --- Expose the custom error type ---
    m.add(
        "PlumeError",
        py.get_type::<pyo3::exceptions::PyValueError>(),
    )?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    // --- Turn on logging for encode/publish diagnostics ---
    m.add_function(wrap_pyfunction!(ffi::enable_verbose_logging_py, m)?)?;

    Ok(())
}
