// In: src/ffi/python.rs

use arrow::pyarrow::FromPyArrow;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use log::LevelFilter;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyBytes, PyDict};
use std::fs::OpenOptions;
use std::sync::Once;

use crate::bridge;
use crate::config::PlumeConfig;
use crate::error::PlumeError;
use crate::runtime::{ComputeRuntime, RequestBridge, RuntimeError};
use crate::store::ContentStore;
use crate::table::{Column, ColumnValues, Table};
use crate::types::Scalar;

//==================================================================================
// I. Marshalling (Python values -> table model)
//==================================================================================

/// One marshalled Python cell. Temporal cells are tracked separately from
/// scalars so each column resolves to the right logical type.
enum CellValue {
    Scalar(Scalar),
    Naive(NaiveDateTime),
    Instant(DateTime<Utc>),
}

fn cell_from_py(value: &PyAny) -> PyResult<Option<CellValue>> {
    if value.is_none() {
        return Ok(None);
    }
    // Python bools are a subtype of int; check them first.
    if let Ok(b) = value.downcast::<PyBool>() {
        return Ok(Some(CellValue::Scalar(Scalar::Bool(b.is_true()))));
    }
    // Zone-aware datetimes extract as fixed-offset instants; naive ones only
    // extract as NaiveDateTime. Both fail for non-datetime values.
    if let Ok(dt) = value.extract::<DateTime<FixedOffset>>() {
        return Ok(Some(CellValue::Instant(dt.with_timezone(&Utc))));
    }
    if let Ok(dt) = value.extract::<NaiveDateTime>() {
        return Ok(Some(CellValue::Naive(dt)));
    }
    if let Ok(i) = value.extract::<i64>() {
        return Ok(Some(CellValue::Scalar(Scalar::Int(i))));
    }
    if let Ok(f) = value.extract::<f64>() {
        return Ok(Some(CellValue::Scalar(Scalar::Float(f))));
    }
    if let Ok(s) = value.extract::<String>() {
        return Ok(Some(CellValue::Scalar(Scalar::Str(s))));
    }
    Err(PlumeError::UnsupportedType(format!(
        "cell value of type '{}'",
        value.get_type().name()?
    ))
    .into())
}

fn column_from_py(name: &str, values: &PyAny) -> PyResult<Column> {
    let mut cells = Vec::new();
    for item in values.iter()? {
        cells.push(cell_from_py(item?)?);
    }

    let mut saw_naive = false;
    let mut saw_instant = false;
    let mut saw_scalar = false;
    for cell in cells.iter().flatten() {
        match cell {
            CellValue::Naive(_) => saw_naive = true,
            CellValue::Instant(_) => saw_instant = true,
            CellValue::Scalar(_) => saw_scalar = true,
        }
    }

    let values = match (saw_naive, saw_instant, saw_scalar) {
        (true, false, false) => ColumnValues::Timestamp(
            cells
                .into_iter()
                .map(|c| match c {
                    Some(CellValue::Naive(dt)) => Some(dt),
                    _ => None,
                })
                .collect(),
        ),
        (false, true, false) => ColumnValues::TimestampTz(
            cells
                .into_iter()
                .map(|c| match c {
                    Some(CellValue::Instant(dt)) => Some(dt),
                    _ => None,
                })
                .collect(),
        ),
        // Scalar (and all-null) columns stay Generic; the encoder resolves
        // homogeneity itself, exactly as it does for native callers.
        (false, false, _) => ColumnValues::Generic(
            cells
                .into_iter()
                .map(|c| match c {
                    Some(CellValue::Scalar(s)) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => {
            return Err(PyValueError::new_err(format!(
                "column '{name}' mixes datetimes with other values"
            )))
        }
    };

    Ok(Column::new(name, values))
}

fn table_from_py(columns: &PyDict, index: Option<(String, &PyAny)>) -> PyResult<Table> {
    let mut cols = Vec::with_capacity(columns.len());
    for (key, values) in columns.iter() {
        let name: String = key.extract()?;
        cols.push(column_from_py(&name, values)?);
    }
    let mut table = Table::new(cols)?;
    if let Some((name, values)) = index {
        table = table.with_index(column_from_py(&name, values)?)?;
    }
    Ok(table)
}

//==================================================================================
// II. Stateless Encode/Publish API
//==================================================================================

/// Encodes a dict of columns into wire-container bytes.
#[pyfunction]
#[pyo3(name = "encode", signature = (columns, index = None, chunk_size_rows = 8192))]
pub fn encode_py<'py>(
    py: Python<'py>,
    columns: &PyDict,
    index: Option<(String, &PyAny)>,
    chunk_size_rows: usize,
) -> PyResult<&'py PyBytes> {
    let table = table_from_py(columns, index)?;
    let config = PlumeConfig {
        chunk_size_rows,
        ..Default::default()
    };
    let bytes = py.allow_threads(move || bridge::encode_table(&table, &config))?;
    Ok(PyBytes::new(py, &bytes))
}

/// Encodes an already-typed PyArrow record batch into wire-container bytes.
#[pyfunction]
#[pyo3(name = "encode_arrow", signature = (batch, chunk_size_rows = 8192))]
pub fn encode_arrow_py<'py>(
    py: Python<'py>,
    batch: &PyAny,
    chunk_size_rows: usize,
) -> PyResult<&'py PyBytes> {
    let batch = RecordBatch::from_pyarrow(batch)?;
    let config = PlumeConfig {
        chunk_size_rows,
        ..Default::default()
    };
    let bytes = py.allow_threads(move || bridge::encode_record_batch(&batch, &config))?;
    Ok(PyBytes::new(py, &bytes))
}

/// Publishes already-encoded bytes and returns the artifact path.
#[pyfunction]
#[pyo3(name = "publish")]
pub fn publish_py(py: Python, bytes: &[u8], store_root: &str) -> PyResult<String> {
    let store = ContentStore::new(store_root);
    let published = py.allow_threads(|| store.publish(bytes))?;
    Ok(published.path().display().to_string())
}

/// Encodes a dict of columns and publishes the artifact, returning the
/// locator JSON the client surface's data loader consumes.
#[pyfunction]
#[pyo3(
    name = "encode_and_publish",
    signature = (columns, store_root, index = None, chunk_size_rows = 8192, verbose = false)
)]
pub fn encode_and_publish_py(
    py: Python,
    columns: &PyDict,
    store_root: &str,
    index: Option<(String, &PyAny)>,
    chunk_size_rows: usize,
    verbose: bool,
) -> PyResult<String> {
    let table = table_from_py(columns, index)?;
    let config = PlumeConfig {
        chunk_size_rows,
        store_root: store_root.into(),
        verbose,
    };
    let published = py.allow_threads(move || bridge::encode_and_publish(&table, &config))?;
    published.locator_json().map_err(Into::into)
}

//==================================================================================
// III. Stateful Classes
//==================================================================================

#[pyclass(name = "ArtifactStore", module = "plume_cache")]
pub struct PyArtifactStore {
    inner: ContentStore,
}

#[pymethods]
impl PyArtifactStore {
    #[new]
    fn new(store_root: &str) -> Self {
        Self {
            inner: ContentStore::new(store_root),
        }
    }

    /// Publishes bytes and returns the artifact's filesystem path.
    fn publish(&self, py: Python, bytes: &[u8]) -> PyResult<String> {
        let published = py.allow_threads(|| self.inner.publish(bytes))?;
        Ok(published.path().display().to_string())
    }

    /// Publishes bytes and returns the locator JSON for the client surface.
    fn publish_locator(&self, py: Python, bytes: &[u8]) -> PyResult<String> {
        let published = py.allow_threads(|| self.inner.publish(bytes))?;
        published.locator_json().map_err(Into::into)
    }
}

/// Adapts a Python callable (request bytes -> response bytes) to the
/// `ComputeRuntime` trait. Calls re-acquire the GIL.
pub struct PythonComputeRuntime {
    pub obj: PyObject,
}

impl ComputeRuntime for PythonComputeRuntime {
    fn process_request(&mut self, request: &[u8]) -> Result<Vec<u8>, RuntimeError> {
        Python::with_gil(|py| -> Result<Vec<u8>, RuntimeError> {
            let response = self.obj.call1(py, (PyBytes::new(py, request),))?;
            let bytes: Vec<u8> = response.extract(py)?;
            Ok(bytes)
        })
    }
}

#[pyclass(name = "RequestBridge", module = "plume_cache")]
pub struct PyRequestBridge {
    inner: RequestBridge<PythonComputeRuntime>,
}

#[pymethods]
impl PyRequestBridge {
    /// Creates a bridge over a Python callable that maps one request buffer
    /// to one response buffer.
    #[new]
    #[pyo3(signature = (runtime, verbose = false))]
    fn new(runtime: PyObject, verbose: bool) -> Self {
        Self {
            inner: RequestBridge::new(PythonComputeRuntime { obj: runtime }, verbose),
        }
    }

    /// Relays one opaque request buffer and returns the response buffer.
    fn handle<'py>(&mut self, py: Python<'py>, request: &[u8]) -> PyResult<&'py PyBytes> {
        let response = py.allow_threads(|| self.inner.handle(request))?;
        Ok(PyBytes::new(py, &response))
    }
}

//==================================================================================
// IV. Module Utilities
//==================================================================================

static INIT_LOGGER: Once = Once::new();

#[pyfunction]
#[pyo3(name = "enable_verbose_logging")]
pub fn enable_verbose_logging_py(log_file: Option<String>) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(filename) = log_file {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(filename)
                .expect("Could not open log file in append mode");
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
}
