//! Benchmarks for the MIDI 2.0 bit-scaling algorithms.

use std::hint::black_box;

use chipwave_dsp::midi::{scale_mcm, scale_zero_ext};
use criterion::Criterion;

pub fn bench_scaler(c: &mut Criterion) {
    let mut group = c.benchmark_group("midi/scaler");

    // Above-center values take the repeat-fill path; this is the worst case.
    group.bench_function("mcm_7_to_16_above_center", |b| {
        b.iter(|| {
            for value in 65..=127u32 {
                let _ = scale_mcm(black_box(value), black_box(7), black_box(16));
            }
        })
    });

    group.bench_function("mcm_7_to_32_full_sweep", |b| {
        b.iter(|| {
            for value in 0..=127u32 {
                let _ = scale_mcm(black_box(value), black_box(7), black_box(32));
            }
        })
    });

    group.bench_function("mcm_16_to_7_downscale", |b| {
        b.iter(|| {
            for value in (0..=65535u32).step_by(257) {
                let _ = scale_mcm(black_box(value), black_box(16), black_box(7));
            }
        })
    });

    group.bench_function("zero_ext_7_to_16", |b| {
        b.iter(|| {
            for value in 0..=127u32 {
                let _ = scale_zero_ext(black_box(value), black_box(7), black_box(16));
            }
        })
    });

    group.finish();
}
