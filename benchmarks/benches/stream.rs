// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use tagbuf::{HEADER_LEN, ScopedBuffer};

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench stream
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");
    configure_group(&mut group);

    for size in [64, 4_096, 65_536] {
        group.throughput(Throughput::Bytes((HEADER_LEN + size) as u64));

        let mut buffer = ScopedBuffer::new();
        buffer.alloc(size);

        group.bench_with_input(BenchmarkId::new("advance", size), &size, |b, &s| {
            let mut stream = Cursor::new(Vec::with_capacity(HEADER_LEN + s));
            b.iter(|| {
                stream.set_position(0);
                black_box(buffer.save(&mut stream, true).is_ok());
            });
        });

        group.bench_with_input(BenchmarkId::new("restore", size), &size, |b, &s| {
            let mut stream = Cursor::new(Vec::with_capacity(HEADER_LEN + s));
            b.iter(|| black_box(buffer.save(&mut stream, false).is_ok()));
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    configure_group(&mut group);

    for size in [64, 4_096, 65_536] {
        group.throughput(Throughput::Bytes((HEADER_LEN + size) as u64));

        let mut source = ScopedBuffer::new();
        source.alloc(size);
        let mut stream = Cursor::new(Vec::new());
        if source.save(&mut stream, false).is_err() {
            continue;
        }

        group.bench_with_input(BenchmarkId::new("reuse", size), &size, |b, _| {
            let mut dest = ScopedBuffer::new();
            b.iter(|| black_box(dest.load(&mut stream, false).is_ok()));
        });
    }

    group.finish();
}

criterion_group!(stream_benches, bench_save, bench_load);

criterion_main!(stream_benches);
