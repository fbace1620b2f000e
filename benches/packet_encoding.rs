//! Benchmarks for packet encoding and pattern generation
//!
//! Measures per-frame cost of the hot path a sender runs at 20-30 Hz:
//! - Encoding frames of increasing point counts into a reused buffer
//! - Generating frames from the random stream

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use led_sensor_sim::Pattern;
use led_sensor_sim::codec::{encode_into, encoded_len};
use led_sensor_sim::config::EmulatorConfig;
use led_sensor_sim::types::{Frame, Point};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

fn bench_encode_into(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_into");

    for count in [0usize, 1, 5, 256, 4096] {
        let points: Vec<Point> =
            (0..count).map(|i| Point::new(i as u16, (count - i) as u16)).collect();
        let frame = Frame::new(0x5586, 1, points);
        let mut buffer = Vec::with_capacity(encoded_len(count));

        group.throughput(Throughput::Bytes(encoded_len(count) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &frame, |b, frame| {
            b.iter(|| {
                encode_into(black_box(frame), &mut buffer).expect("frame fits");
                black_box(buffer.len())
            })
        });
    }

    group.finish();
}

fn bench_stream_generation(c: &mut Criterion) {
    let config = EmulatorConfig::default();

    c.bench_function("stream_next_frame", |b| {
        let mut source = Pattern::Stream.source(&config, ChaCha8Rng::seed_from_u64(7));
        b.iter(|| black_box(source.next()))
    });
}

criterion_group!(benches, bench_encode_into, bench_stream_generation);
criterion_main!(benches);
