//! Performance benchmarks for SSE frame parsing
//!
//! Tests parse time for different frame counts and chunk sizes.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chatstream::sse::parse_frames;
use chatstream::stream::StreamReader;

/// Generate wire text with a mix of token, ping and tool frames
fn generate_wire(frames: usize) -> String {
    (0..frames)
        .map(|i| match i % 10 {
            0 => "event: ping\ndata: {}\n\n".to_string(),
            5 => format!(
                "event: tool_call_start\ndata: {{\"toolCallId\":\"t{}\",\"name\":\"search\",\"arguments\":{{\"q\":\"x\"}}}}\n\n",
                i
            ),
            _ => format!(
                "event: token\ndata: {{\"content\":\"word {} with ünïcode \"}}\n\n",
                i
            ),
        })
        .collect()
}

/// Benchmark parsing a whole buffer at once
fn bench_parse_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_frames");

    for count in [1, 10, 100, 1000].iter() {
        let wire = generate_wire(*count);
        group.throughput(Throughput::Bytes(wire.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_frames", count)),
            &wire,
            |b, wire| {
                b.iter(|| {
                    let parsed = parse_frames(black_box(wire));
                    black_box(parsed)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the incremental reader with network-sized chunks
fn bench_stream_reader_chunked(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_reader_chunked");
    let wire = generate_wire(500);
    group.throughput(Throughput::Bytes(wire.len() as u64));

    for chunk_size in [16, 256, 4096].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut reader = StreamReader::new();
                    let mut events = 0;
                    for chunk in wire.as_bytes().chunks(chunk_size) {
                        events += reader.feed(black_box(chunk)).len();
                    }
                    black_box(events)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse_frames, bench_stream_reader_chunked);

criterion_main!(benches);
