use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hwrng::{ExpansionMode, HardwareRng, Overrides, SecurityPreset};

fn bench_tiered(c: &mut Criterion) {
    let rng = HardwareRng::software();
    let mut group = c.benchmark_group("tiered");

    for complexity in [1, 3, 5, 10] {
        group.bench_with_input(
            BenchmarkId::from_parameter(complexity),
            &complexity,
            |b, &complexity| b.iter(|| rng.generate_tiered(black_box(64), complexity).unwrap()),
        );
    }

    group.finish();
}

fn bench_expansion(c: &mut Criterion) {
    let rng = HardwareRng::software();
    let mut group = c.benchmark_group("expansion");

    for mode in [
        ExpansionMode::Counter,
        ExpansionMode::Hkdf,
        ExpansionMode::HmacChain,
        ExpansionMode::Xof,
    ] {
        let config = rng.create_config(
            SecurityPreset::Fast,
            Overrides {
                expansion_mode: Some(mode),
                ..Default::default()
            },
        );
        group.bench_function(format!("{:?}-1024", mode), |b| {
            b.iter(|| rng.generate_custom(black_box(1024), &config, None).unwrap())
        });
    }

    group.finish();
}

fn bench_derived(c: &mut Criterion) {
    let rng = HardwareRng::software();
    let mut group = c.benchmark_group("derived");

    group.bench_function("u64", |b| b.iter(|| rng.generate_u64().unwrap()));
    group.bench_function("range-die", |b| {
        b.iter(|| rng.generate_range(black_box(1), black_box(7)).unwrap())
    });

    let mut deck: Vec<u32> = (0..52).collect();
    group.bench_function("shuffle-52", |b| {
        b.iter(|| {
            rng.shuffle(&mut deck).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tiered, bench_expansion, bench_derived);
criterion_main!(benches);
