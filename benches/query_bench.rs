use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use loadboard::conf::StatusCatalog;
use loadboard::model::LoadStatus;
use loadboard::source::{LoadSource, MemoryLoadSource};
use loadboard::table::{SortDirection, SortField, TableQuery};
use loadboard::testutil::generate_loads;

const LOAD_COUNTS: &[usize] = &[1_000, 10_000, 100_000];

fn bench_list(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut filtered = TableQuery::new(50);
    filtered.status = Some(vec![LoadStatus::InProgress, LoadStatus::Planned]);
    filtered.sort_field = Some(SortField::MilesByRoads);
    filtered.sort_direction = Some(SortDirection::Desc);

    let queries = [("plain", TableQuery::new(50)), ("filtered_sorted", filtered)];

    for &num_loads in LOAD_COUNTS {
        let source = MemoryLoadSource::new(
            generate_loads(num_loads, 42),
            Arc::new(StatusCatalog::default()),
        );
        let source = &source;

        let mut group = c.benchmark_group(format!("list/loads_{}", num_loads));
        group.throughput(Throughput::Elements(num_loads as u64));
        for (name, query) in &queries {
            group.bench_with_input(BenchmarkId::new("query", name), query, |b, query| {
                b.to_async(&rt)
                    .iter(move || async move { source.list(black_box(query)).await.unwrap() })
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_list);
criterion_main!(benches);
