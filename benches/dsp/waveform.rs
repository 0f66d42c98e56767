//! Benchmarks for waveform buffer synthesis.

use std::hint::black_box;

use chipwave_dsp::dsp::{Waveform, WaveformGenerator};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_waveform(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/waveform");

    let mut generator = WaveformGenerator::new();
    generator.initialize(44_100.0).unwrap();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - transcendental per sample
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                generator
                    .generate(
                        Waveform::Sine,
                        black_box(440.0),
                        black_box(0.5),
                        black_box(&mut buffer),
                        size,
                    )
                    .unwrap();
            })
        });

        // Sawtooth - linear ramp
        group.bench_with_input(BenchmarkId::new("sawtooth", size), &size, |b, _| {
            b.iter(|| {
                generator
                    .generate(
                        Waveform::Sawtooth,
                        black_box(440.0),
                        black_box(0.5),
                        black_box(&mut buffer),
                        size,
                    )
                    .unwrap();
            })
        });

        // Square - branch per sample
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| {
                generator
                    .generate(
                        Waveform::Square,
                        black_box(440.0),
                        black_box(0.5),
                        black_box(&mut buffer),
                        size,
                    )
                    .unwrap();
            })
        });

        // Triangle - two ramps
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| {
                generator
                    .generate(
                        Waveform::Triangle,
                        black_box(440.0),
                        black_box(0.5),
                        black_box(&mut buffer),
                        size,
                    )
                    .unwrap();
            })
        });
    }

    group.finish();
}
