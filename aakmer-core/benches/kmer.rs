use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use aakmer_core::analyzer::{KmerWindower, ResidueTranslator};
use aakmer_core::parser::{KmerParser, ParserParam};
use aakmer_core::{ParseMode, Token};

fn random_protein(len: usize) -> Vec<u8> {
    let residues = b"ACDEFGHIKLMNPQRSTVWY";
    let mut seq = Vec::with_capacity(len);
    let mut state: u64 = 42;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        seq.push(residues[((state >> 33) % 20) as usize]);
    }
    seq
}

fn bench_translate(c: &mut Criterion) {
    let seq = random_protein(1 << 16);
    let t = ResidueTranslator::new();
    let mut out = vec![0u8; seq.len()];

    let mut group = c.benchmark_group("translate");
    group.throughput(Throughput::Bytes(seq.len() as u64));
    group.bench_function("64KiB", |b| {
        b.iter(|| t.translate_into(black_box(&seq), &mut out))
    });
    group.finish();
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("window");

    for len in [300usize, 3_000, 30_000] {
        let seq = random_protein(len);
        let w = KmerWindower::default();
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("for_each", len), &seq, |b, seq| {
            b.iter(|| {
                let mut n = 0usize;
                w.for_each(black_box(seq), |_, _| n += 1);
                n
            })
        });

        group.bench_with_input(BenchmarkId::new("materialize", len), &seq, |b, seq| {
            b.iter(|| w.window_and_translate(black_box(seq)))
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let seq = random_protein(3_000);
    let parser = KmerParser::default();
    let mut sink: Vec<Token> = Vec::with_capacity(seq.len());

    c.bench_function("parse_3000", |b| {
        b.iter(|| {
            sink.clear();
            parser.parse(&ParserParam::new(black_box(&seq), ParseMode::Simple), &mut sink)
        })
    });
}

criterion_group!(benches, bench_translate, bench_window, bench_parse);
criterion_main!(benches);
