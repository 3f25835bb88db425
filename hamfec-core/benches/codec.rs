use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hamfec_core::{
    batch::{decode_batch, encode_message},
    codec::{decode_codewords, encode_bits},
    loss::lose_fixed,
    simulation::random_bits,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let mut rng = StdRng::seed_from_u64(1);

    for size in [256, 1024, 4096, 16384] {
        let bits = random_bits(size, &mut rng);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bits, |b, bits| {
            b.iter(|| encode_bits(black_box(bits)).unwrap());
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let mut rng = StdRng::seed_from_u64(2);

    for size in [256, 1024, 4096, 16384] {
        let words = encode_bits(&random_bits(size, &mut rng)).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| decode_codewords(black_box(words)));
        });
    }

    group.finish();
}

fn bench_erasure_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("erasure_batch");
    let mut rng = StdRng::seed_from_u64(3);

    for size in [256, 1024, 4096] {
        let bits = random_bits(size, &mut rng);
        let channels = encode_message(&bits).unwrap();
        let lossy = lose_fixed(channels.to_vec(), &mut rng).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &lossy.channels, |b, slots| {
            b.iter(|| decode_batch(black_box(slots)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_erasure_batch);
criterion_main!(benches);
