use criterion::{criterion_group, criterion_main, Criterion};
use tabq_core::prelude::Table;
use tabq_operators::{aggregate, filter, sort};

fn make_table(rows: usize) -> Table {
    let records: Vec<Vec<String>> = (0..rows)
        .map(|i| {
            vec![
                format!("item-{}", i),
                format!("group-{}", i % 4),
                ((i * 7919) % 1000).to_string(),
            ]
        })
        .collect();
    Table::from_records(["name", "group", "value"], records).unwrap()
}

fn bench_pipeline(c: &mut Criterion) {
    let table = make_table(10_000);
    c.bench_function("filter_sort_aggregate", |b| {
        b.iter(|| {
            let filtered = filter(&table, "value>250").unwrap();
            let sorted = sort(&filtered, "value=desc").unwrap();
            let _ = aggregate(&sorted, "value=avg").unwrap();
        })
    });
    c.bench_function("sort_text_key", |b| {
        b.iter(|| {
            let _ = sort(&table, "name=asc").unwrap();
        })
    });
}

criterion_group!(pipeline, bench_pipeline);
criterion_main!(pipeline);
