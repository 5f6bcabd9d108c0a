use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gwchannel::availability::{parse_availability, RequestedChannel};
use gwchannel::segments::{Segment, SegmentList};

/// Pseudo-random overlapping segments (xorshift, fixed seed)
fn make_segments(count: usize) -> SegmentList {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let start = (state % 10_000_000) as i64;
            let len = (state >> 40) as i64 % 5_000;
            Segment::new(start, start + len)
        })
        .collect()
}

/// Synthetic tool output with `records` records per channel
fn make_output(channels: usize, records: usize) -> (String, Vec<RequestedChannel>) {
    let mut output = String::from("Requested source list:\n");
    let mut requests = Vec::with_capacity(channels);
    for c in 0..channels {
        let name = format!("H1:SYS-CHAN_{}", c);
        output.push_str(&name);
        output.push_str(" {");
        for r in 0..records {
            let start = 1_000_000_000 + (r as i64) * 64;
            output.push_str(&format!("H-H1_R:{}-{} ", start, start + 64));
        }
        output.push_str("}\n");
        requests.push(RequestedChannel::from(name));
    }
    (output, requests)
}

/// Benchmark coalescing unsorted overlapping segments
fn bench_coalesce(c: &mut Criterion) {
    let mut group = c.benchmark_group("coalesce");

    for count in [1_000, 10_000, 100_000] {
        let segments = make_segments(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &segments, |b, segs| {
            b.iter(|| black_box(segs).coalesced())
        });
    }

    group.finish();
}

/// Benchmark parsing tool output end to end
fn bench_parse_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_availability");
    let span = Segment::new(1_000_000_000, 1_100_000_000);

    for channels in [10, 100] {
        let (output, requests) = make_output(channels, 500);
        group.throughput(Throughput::Bytes(output.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(channels),
            &output,
            |b, output| b.iter(|| parse_availability(black_box(output), &requests, span).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_coalesce, bench_parse_output);
criterion_main!(benches);
