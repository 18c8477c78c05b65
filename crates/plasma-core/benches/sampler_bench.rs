// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Sampler Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use plasma_core::reactivity::dt_reactivity;
use plasma_core::sampler::{Sampler, SamplerConfig};
use plasma_types::codec::{decode, encode};
use plasma_types::params::{ParameterSet, PlasmaParameters};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

fn reference() -> PlasmaParameters {
    PlasmaParameters::new(ParameterSet::default()).expect("reference parameters are valid")
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    let sampler = Sampler::new(reference());
    sampler.prepare().expect("envelope table should build");
    let mut rng = StdRng::seed_from_u64(0);

    group.bench_function("single_neutron", |b| {
        b.iter(|| black_box(sampler.sample(&mut rng).expect("sample should succeed")))
    });

    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            black_box(
                sampler
                    .sample_batch(1000, &mut rng)
                    .expect("batch should succeed"),
            )
        })
    });

    group.bench_function("table_build_400_bins", |b| {
        b.iter_batched(
            || {
                Sampler::with_config(
                    reference(),
                    SamplerConfig {
                        number_of_bins: 400,
                        ..SamplerConfig::default()
                    },
                )
                .expect("config is valid")
            },
            |sampler| sampler.prepare().expect("table should build"),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernels");

    group.bench_function("bosch_hale", |b| b.iter(|| dt_reactivity(black_box(23.4))));

    let text = encode(&reference());
    group.bench_function("decode_parameters", |b| {
        b.iter(|| decode(black_box(&text)).expect("decode should succeed"))
    });

    group.finish();
}

criterion_group!(benches, bench_sample, bench_kernels);
criterion_main!(benches);
