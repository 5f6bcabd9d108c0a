use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gwchannel::channel::{AttributeFilter, Channel, ChannelList, Sieve};
use gwchannel::types::ChannelType;

const SYSTEMS: &[&str] = &["LSC", "ASC", "PSL", "SUS", "ISI", "PEM"];
const IFOS: &[&str] = &["H1", "L1", "V1"];
const RATES: &[f64] = &[16.0, 256.0, 2048.0, 16384.0];

/// Build a list of synthetic channels with varied metadata
fn make_channels(count: usize) -> ChannelList {
    (0..count)
        .map(|i| {
            let name = format!(
                "{}:{}-CHAN{}_OUT_DQ",
                IFOS[i % IFOS.len()],
                SYSTEMS[i % SYSTEMS.len()],
                i
            );
            let channel_type = if i % 5 == 0 {
                ChannelType::Online
            } else {
                ChannelType::Raw
            };
            Channel::builder(name)
                .sample_rate(RATES[i % RATES.len()])
                .channel_type(channel_type)
                .build()
                .unwrap()
        })
        .collect()
}

/// Benchmark parsing comma-separated name strings
fn bench_from_names(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_names");

    for count in [100, 1_000, 10_000] {
        let names = make_channels(count)
            .iter()
            .map(Channel::ndsname)
            .collect::<Vec<_>>()
            .join(", ");

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &names, |b, names| {
            b.iter(|| ChannelList::from_names([black_box(names.as_str())]))
        });
    }

    group.finish();
}

/// Benchmark sieving with and without a name pattern
fn bench_sieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("sieve");

    for count in [1_000, 10_000, 100_000] {
        let list = make_channels(count);
        group.throughput(Throughput::Elements(count as u64));

        let by_attribute = Sieve::new()
            .sample_range(256.0, 4096.0)
            .attribute(AttributeFilter::Ifo("H1".to_string()))
            .attribute(AttributeFilter::ChannelType(ChannelType::Raw));
        group.bench_with_input(
            BenchmarkId::new("attributes", count),
            &list,
            |b, list| b.iter(|| list.sieve(black_box(&by_attribute)).unwrap()),
        );

        let by_name = Sieve::new().name(r"^L1:(LSC|ASC)-CHAN\d+5_");
        group.bench_with_input(BenchmarkId::new("regex", count), &list, |b, list| {
            b.iter(|| list.sieve(black_box(&by_name)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_from_names, bench_sieve);
criterion_main!(benches);
