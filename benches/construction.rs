use criterion::{criterion_group, criterion_main};
use criterion::{AxisScale, BatchSize, BenchmarkId, Criterion, PlotConfiguration};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strindex::{suffix_array, Alphabet, SuffixTree};

fn dna_text(n: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..n).map(|_| b"acgt"[rng.gen::<usize>() % 4]).collect()
}

pub fn bench(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    let mut group = c.benchmark_group("construction");
    group.plot_config(plot_config);

    for n in [1000usize, 10_000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::new("sais", n), n, |b, &n| {
            b.iter_batched(
                || {
                    let text = dna_text(n);
                    let alpha = Alphabet::new(&text).unwrap();
                    let ints = alpha.mapped_ints(&text).unwrap();
                    (ints, alpha)
                },
                |(ints, alpha)| suffix_array::sais(&ints, &alpha),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("skew", n), n, |b, &n| {
            b.iter_batched(
                || {
                    let text = dna_text(n);
                    let alpha = Alphabet::new(&text).unwrap();
                    let ints = alpha.mapped_ints(&text).unwrap();
                    (ints, alpha)
                },
                |(ints, alpha)| suffix_array::skew(&ints, &alpha),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("mccreight", n), n, |b, &n| {
            b.iter_batched(
                || {
                    let text = dna_text(n);
                    let alpha = Alphabet::new(&text).unwrap();
                    let coded = alpha.mapped_bytes(&text).unwrap();
                    (coded, alpha)
                },
                |(coded, alpha)| SuffixTree::mccreight(&alpha, &coded).len(),
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, bench);
criterion_main!(benches);
