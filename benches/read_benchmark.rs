// benches/read_benchmark.rs
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nex_rs::*;
use std::io::Cursor;

#[path = "../tests/common/mod.rs"]
mod common;

use common::NexFileBuilder;

fn benchmark_read_neurons(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_neurons");

    for size in [1000, 10000, 100000].iter() {
        let ticks: Vec<i32> = (0..*size as i32).map(|i| i * 40).collect();
        let bytes = NexFileBuilder::new(40_000.0)
            .neuron("sig001a", 1, 1, &ticks)
            .neuron("sig001b", 1, 2, &ticks)
            .build();

        group.throughput(Throughput::Bytes((*size * 8) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| {
                let mut reader = NexReader::from_reader(Cursor::new(bytes.as_slice())).unwrap();
                reader.read_neurons(None).unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_open_index(c: &mut Criterion) {
    let mut builder = NexFileBuilder::new(1000.0);
    for i in 0..500 {
        builder = builder.interval(&format!("epoch{}", i), &[(i, i + 10)]);
    }
    let bytes = builder.build();

    c.bench_function("open_500_variables", |b| {
        b.iter(|| {
            let reader = NexReader::from_reader(Cursor::new(bytes.as_slice())).unwrap();
            reader.list_interval_names().len()
        });
    });
}

criterion_group!(benches, benchmark_read_neurons, benchmark_open_index);
criterion_main!(benches);
