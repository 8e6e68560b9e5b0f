//! Database Benchmarks
//!
//! Micro-benchmarks over the key/value facade: point writes, cached point
//! reads, WAL replay on open, and full index scans.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench --bench database
//! cargo bench --bench database -- "get"
//! ```
//!
//! The working set is kept small enough to fit page 0, since the facade
//! stores every record there.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use tempfile::tempdir;
use zetadb::Database;

const KEYS: u64 = 30;
const VALUE: &[u8] = b"benchmark-value-64-bytes-loooooooooooooooooooooooooooooooooong!!";

fn populated_database() -> (tempfile::TempDir, Database) {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path().join("bench.zdb")).unwrap();
    for key in 0..KEYS {
        db.set(key, VALUE).unwrap();
    }
    (dir, db)
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    // Overwrites leak their previous page slot, so each measurement gets
    // a fresh database instead of cycling one page toward exhaustion.
    group.bench_function("delete_then_set", |b| {
        b.iter_batched_ref(
            populated_database,
            |(_dir, db)| {
                db.delete(black_box(7)).unwrap();
                db.set(black_box(7), black_box(VALUE)).unwrap();
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("cached_point_read", |b| {
        let (_dir, mut db) = populated_database();
        b.iter(|| db.get(black_box(13)).unwrap());
    });

    group.bench_function("missing_key", |b| {
        let (_dir, mut db) = populated_database();
        b.iter(|| db.get(black_box(KEYS + 1)).unwrap());
    });

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Elements(KEYS));

    group.bench_function("full_scan", |b| {
        let (_dir, mut db) = populated_database();
        b.iter(|| {
            let mut total = 0usize;
            db.scan(|_key, bytes| {
                total += bytes.len();
                Ok(())
            })
            .unwrap();
            black_box(total)
        });
    });

    group.finish();
}

fn bench_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("open");

    group.bench_function("replay_30_records", |b| {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.zdb");
        {
            let mut db = Database::open(&path).unwrap();
            for key in 0..KEYS {
                db.set(key, VALUE).unwrap();
            }
            db.close();
        }

        b.iter(|| {
            let db = Database::open(black_box(&path)).unwrap();
            black_box(db.len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_set, bench_get, bench_scan, bench_open);
criterion_main!(benches);
