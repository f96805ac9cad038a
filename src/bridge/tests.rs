use super::*;
use crate::config::PlumeConfig;
use crate::store::{ArtifactRef, ContentKey, ARTIFACT_EXT};
use crate::table::{Column, ColumnValues, Table};
use crate::types::Scalar;
use arrow::array::{Array, StringArray};
use arrow::ipc::reader::FileReader;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

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

fn config_for(root: &Path) -> PlumeConfig {
    PlumeConfig {
        store_root: root.to_path_buf(),
        ..Default::default()
    }
}

fn final_artifacts(root: &Path) -> Vec<PathBuf> {
    fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(ARTIFACT_EXT))
        .collect()
}

#[test]
fn end_to_end_encode_then_publish() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let table = gender_height();

    // 1. Act: encode, then publish into an empty store.
    let bytes = encode_table(&table, &config).unwrap();
    let published = publish_bytes(&bytes, &config.store_root).unwrap();

    // 2. Assert: exactly one new file, named by the digest of the bytes.
    let artifacts = final_artifacts(dir.path());
    assert_eq!(artifacts.len(), 1);
    assert_eq!(
        artifacts[0].file_name().unwrap().to_str().unwrap(),
        format!("{}.{ARTIFACT_EXT}", ContentKey::from_bytes(&bytes))
    );

    // 3. Act: publish the same dataset again.
    let again = encode_and_publish(&table, &config).unwrap();

    // 4. Assert: zero new files, identical reference.
    assert_eq!(final_artifacts(dir.path()).len(), 1);
    assert_eq!(again, published);
}

#[test]
fn distinct_datasets_publish_distinct_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    let first = encode_and_publish(&gender_height(), &config).unwrap();

    let other = Table::new(vec![Column::new(
        "weight",
        ColumnValues::Float64(vec![Some(150.0)]),
    )])
    .unwrap();
    let second = encode_and_publish(&other, &config).unwrap();

    assert_ne!(first.key(), second.key());
    assert_eq!(final_artifacts(dir.path()).len(), 2);
}

#[test]
fn mixed_type_dataset_survives_the_facade() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let table = Table::new(vec![Column::new(
        "payload",
        ColumnValues::Generic(vec![Some(Scalar::Int(7)), Some(Scalar::Str("seven".into()))]),
    )])
    .unwrap();

    let published = encode_and_publish(&table, &config).unwrap();

    // The stored artifact decodes to the coerced text column.
    let bytes = fs::read(published.path()).unwrap();
    let reader = FileReader::try_new(Cursor::new(bytes), None).unwrap();
    let batch = reader.into_iter().next().unwrap().unwrap();
    let strings = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(strings.value(0), "7");
    assert_eq!(strings.value(1), "seven");
}

#[test]
fn typed_record_batches_bypass_the_table_model() {
    use arrow::array::Int64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, false)]));
    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(Int64Array::from(vec![1i64, 2, 3, 4, 5]))],
    )
    .unwrap();

    let config = PlumeConfig {
        chunk_size_rows: 2,
        ..Default::default()
    };
    let bytes = encode_record_batch(&batch, &config).unwrap();

    let reader = FileReader::try_new(Cursor::new(bytes), None).unwrap();
    let sizes: Vec<usize> = reader.map(|b| b.unwrap().num_rows()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[test]
fn eight_concurrent_publishers_converge_on_one_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    // ~1 MB of rows so writers overlap.
    let values: Vec<Option<i64>> = (0..130_000).map(Some).collect();
    let table = Table::new(vec![Column::new("n", ColumnValues::Int64(values))]).unwrap();
    let bytes = encode_table(&table, &config).unwrap();

    let refs: Vec<ArtifactRef> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let root = config.store_root.clone();
                let bytes = bytes.as_slice();
                scope.spawn(move || publish_bytes(bytes, &root).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(final_artifacts(dir.path()).len(), 1);
    let first = &refs[0];
    assert!(refs.iter().all(|r| r == first));
}
