use criterion::{Criterion, black_box, criterion_group, criterion_main};

use shoal_sql::{SQLStore, SqliteStore, Value};

fn seeded_store(rows: i64) -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .exec(
            "CREATE TABLE edges (
                follower_id TEXT NOT NULL,
                followee_id TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                UNIQUE (follower_id, followee_id)
            )",
            &[],
        )
        .unwrap();

    for i in 0..rows {
        store
            .exec(
                "INSERT INTO edges (follower_id, followee_id, created_at) VALUES (?1, ?2, ?3)",
                &[
                    Value::Text(format!("user-{}", i)),
                    Value::Text("target".to_string()),
                    Value::Text(format!("2026-01-01T00:00:{:02}Z", i % 60)),
                ],
            )
            .unwrap();
    }
    store
}

fn bench_constrained_insert(c: &mut Criterion) {
    let store = seeded_store(0);

    let mut i = 0i64;
    c.bench_function("sqlite_unique_insert", |b| {
        b.iter(|| {
            store
                .exec(
                    "INSERT INTO edges (follower_id, followee_id, created_at) \
                     VALUES (?1, ?2, ?3)",
                    &[
                        Value::Text(format!("user-{}", i)),
                        Value::Text("target".to_string()),
                        Value::Text("2026-01-01T00:00:00Z".to_string()),
                    ],
                )
                .unwrap();
            i += 1;
        });
    });
}

fn bench_pair_lookup(c: &mut Criterion) {
    let store = seeded_store(10000);

    let mut i = 0i64;
    c.bench_function("sqlite_pair_lookup", |b| {
        b.iter(|| {
            let rows = store
                .query(
                    "SELECT created_at FROM edges WHERE follower_id = ?1 AND followee_id = ?2",
                    &[
                        Value::Text(format!("user-{}", black_box(i % 10000))),
                        Value::Text("target".to_string()),
                    ],
                )
                .unwrap();
            assert_eq!(rows.len(), 1);
            i += 1;
        });
    });
}

fn bench_fanout_listing(c: &mut Criterion) {
    let store = seeded_store(10000);

    c.bench_function("sqlite_fanout_listing", |b| {
        b.iter(|| {
            let rows = store
                .query(
                    "SELECT follower_id FROM edges WHERE followee_id = ?1 \
                     ORDER BY created_at ASC LIMIT 100",
                    &[Value::Text(black_box("target").to_string())],
                )
                .unwrap();
            assert_eq!(rows.len(), 100);
        });
    });
}

criterion_group!(
    benches,
    bench_constrained_insert,
    bench_pair_lookup,
    bench_fanout_listing
);
criterion_main!(benches);
