// In: src/ffi/mod.rs

//! The FFI boundary of the crate. `python` holds the pyo3-facing surface;
//! everything here marshals values at the edge and delegates to the bridge.

pub mod python;

pub use python::{
    enable_verbose_logging_py, encode_and_publish_py, encode_arrow_py, encode_py, publish_py,
};
