//! End-to-end benchmark: encode a realistic table and publish it through the
//! content-addressed store (both the first-write and dedup fast paths).

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use plume_cache::bridge::{encode_table, publish_bytes};
use plume_cache::config::PlumeConfig;
use plume_cache::table::{Column, ColumnValues, Table};

fn sample_table(rows: usize) -> Table {
    let ids: Vec<Option<i64>> = (0..rows as i64).map(Some).collect();
    let values: Vec<Option<f64>> = (0..rows).map(|i| Some(i as f64 * 0.25)).collect();
    let labels: Vec<Option<String>> = (0..rows).map(|i| Some(format!("row-{i}"))).collect();
    Table::new(vec![
        Column::new("id", ColumnValues::Int64(ids)),
        Column::new("value", ColumnValues::Float64(values)),
        Column::new("label", ColumnValues::Utf8(labels)),
    ])
    .unwrap()
}

fn bench_encode(c: &mut Criterion) {
    let config = PlumeConfig::default();
    let table = sample_table(100_000);

    c.bench_function("encode_100k_rows", |b| {
        b.iter(|| encode_table(black_box(&table), &config).unwrap())
    });
}

fn bench_publish(c: &mut Criterion) {
    let config = PlumeConfig::default();
    let table = sample_table(100_000);
    let bytes = encode_table(&table, &config).unwrap();

    let fresh_dir = tempfile::tempdir().unwrap();
    let mut serial = 0u64;
    c.bench_function("publish_first_write", |b| {
        b.iter(|| {
            // Vary one byte so every iteration takes the slow path.
            let mut unique = bytes.clone();
            unique.extend_from_slice(&serial.to_le_bytes());
            serial += 1;
            publish_bytes(black_box(&unique), fresh_dir.path()).unwrap()
        })
    });

    let dedup_dir = tempfile::tempdir().unwrap();
    publish_bytes(&bytes, dedup_dir.path()).unwrap();
    c.bench_function("publish_dedup_hit", |b| {
        b.iter(|| publish_bytes(black_box(&bytes), dedup_dir.path()).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_publish);
criterion_main!(benches);
