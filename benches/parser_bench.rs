//! Performance benchmarks for the reply tokenizer and command encoder.
//!
//! The engine is synchronous and strictly request/reply, so per-exchange
//! cost is dominated by the parse of the receive buffer. These benchmarks
//! keep an eye on that cost as the grammar evolves.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench parser_bench
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use deckhand_protocol::{parse_response, Command, PlayOptions, SlotSelectOptions};
use std::hint::black_box;

/// A bare acknowledgement, the most common reply.
const ACK: &[u8] = b"200 ok\r\n";

/// A transport info record with mixed field shapes.
const TRANSPORT_INFO: &[u8] = b"208 transport info:\r\n\
    status: stopped\r\n\
    speed: 0\r\n\
    slot id: 1\r\n\
    display timecode: 00:01:02:12\r\n\
    timecode: 00:01:02:12\r\n\
    clip id: 1\r\n\
    video format: 1080i50\r\n\
    loop: false\r\n";

/// Build a clip listing with `n` entries.
fn clip_listing(n: u32) -> Vec<u8> {
    let mut buffer = b"205 clips info:\r\n".to_vec();
    buffer.extend_from_slice(format!("clip count: {n}\r\n").as_bytes());
    for id in 1..=n {
        buffer.extend_from_slice(
            format!("{id}: capture_{id}.mov 00:00:00:00 00:01:00:00\r\n").as_bytes(),
        );
    }
    buffer
}

fn bench_parse_ack(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_ack");
    group.throughput(Throughput::Elements(1));
    group.bench_function("bare_ok", |b| {
        b.iter(|| parse_response(black_box(ACK)).unwrap());
    });
    group.finish();
}

fn bench_parse_transport_info(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_transport_info");
    group.throughput(Throughput::Bytes(TRANSPORT_INFO.len() as u64));
    group.bench_function("eight_fields", |b| {
        b.iter(|| parse_response(black_box(TRANSPORT_INFO)).unwrap());
    });
    group.finish();
}

fn bench_parse_clip_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_clip_listing");
    for count in [1u32, 10, 100] {
        let buffer = clip_listing(count);
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::from_parameter(count), &buffer, |b, buffer| {
            b.iter(|| parse_response(black_box(buffer)).unwrap());
        });
    }
    group.finish();
}

fn bench_encode_commands(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_command");
    group.throughput(Throughput::Elements(1));

    group.bench_function("stop", |b| {
        b.iter(|| black_box(Command::stop()).encode());
    });

    group.bench_function("play_with_options", |b| {
        b.iter(|| {
            Command::play(black_box(PlayOptions {
                speed: Some(150),
                r#loop: Some(true),
                single_clip: Some(false),
            }))
            .encode()
        });
    });

    group.bench_function("slot_select_with_validation", |b| {
        b.iter(|| {
            Command::slot_select(black_box(SlotSelectOptions {
                slot_id: Some(2),
                video_format: Some("1080i50".to_string()),
            }))
            .encode()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_ack,
    bench_parse_transport_info,
    bench_parse_clip_listing,
    bench_encode_commands
);
criterion_main!(benches);
