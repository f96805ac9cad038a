// In: src/bridge/stateless_api.rs

use std::path::Path;

use arrow::record_batch::RecordBatch;

use crate::config::PlumeConfig;
use crate::encode;
use crate::error::PlumeError;
use crate::store::{ArtifactRef, ContentStore};
use crate::table::Table;

/// Encodes a table into wire-container bytes.
pub fn encode_table(table: &Table, config: &PlumeConfig) -> Result<Vec<u8>, PlumeError> {
    encode::encode(table, config)
}

/// Serializes an already-typed record batch into wire-container bytes,
/// bypassing the table model. Temporal normalization is the caller's
/// responsibility on this path; the batch's types go to the wire as-is.
pub fn encode_record_batch(
    batch: &RecordBatch,
    config: &PlumeConfig,
) -> Result<Vec<u8>, PlumeError> {
    encode::write_container(batch, config.chunk_size_rows)
}

/// Publishes already-encoded bytes into the store rooted at `store_root`.
pub fn publish_bytes(bytes: &[u8], store_root: &Path) -> Result<ArtifactRef, PlumeError> {
    ContentStore::new(store_root).publish(bytes)
}

/// Encodes a table and publishes the artifact under `config.store_root`.
///
/// Nothing partial is ever published: an encoding failure aborts before the
/// store is touched.
pub fn encode_and_publish(table: &Table, config: &PlumeConfig) -> Result<ArtifactRef, PlumeError> {
    let bytes = encode::encode(table, config)?;
    let published = ContentStore::new(&config.store_root).publish(&bytes)?;
    if config.verbose {
        log::info!(
            "encoded {} rows x {} columns into artifact {}",
            table.num_rows(),
            table.num_columns(),
            published.key()
        );
    }
    Ok(published)
}
