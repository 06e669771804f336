//! Benchmarks for emulsion-core pipeline operations
//!
//! Run with: cargo bench -p emulsion-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use emulsion_core::models::{Adjustments, ColorGrading, FilmStock, WhiteBalance};
use emulsion_core::pipeline::{apply_texture, render};
use emulsion_core::{synthesize, ImageBuffer};

/// Generate a synthetic RGBA gradient frame
fn generate_test_frame(width: usize, height: usize) -> ImageBuffer {
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width) as u8);
            data.push((y * 255 / height) as u8);
            data.push(((x + y) * 255 / (width + height)) as u8);
            data.push(255);
        }
    }
    ImageBuffer::new(width, height, data).expect("valid synthetic frame")
}

/// Benchmark LUT synthesis across film stocks
fn bench_lut_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("lut_synthesis");
    let wb = WhiteBalance {
        temp: 10.0,
        tint: -5.0,
    };

    for film in [FilmStock::Provia, FilmStock::Velvia, FilmStock::AcrosRed] {
        group.bench_function(BenchmarkId::from_parameter(format!("{:?}", film)), |b| {
            b.iter(|| synthesize(black_box(film), &wb, &ColorGrading::default()))
        });
    }

    group.finish();
}

/// Benchmark the full render at several frame sizes
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let lut = synthesize(
        FilmStock::ClassicChrome,
        &WhiteBalance::default(),
        &ColorGrading::default(),
    );

    let mut adj = Adjustments::default();
    adj.film = FilmStock::ClassicChrome;
    adj.intensity = 1.0;
    adj.tone.contrast = 20.0;
    adj.tone.saturation = 10.0;
    adj.hsl.blue.saturation = 30.0;
    adj.texture.vignette = 40.0;

    for size in [256usize, 512, 1024, 2048] {
        let frame = generate_test_frame(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &frame, |b, frame| {
            b.iter(|| render(black_box(frame), &lut, &adj, &[]).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the texture pass alone
fn bench_texture_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("texture_pass");

    let mut adj = Adjustments::default();
    adj.texture.sharpening = 60.0;
    adj.texture.grain_amount = 40.0;
    adj.texture.grain_size = 2;

    for size in [512usize, 1024] {
        let frame = generate_test_frame(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &frame, |b, frame| {
            b.iter(|| {
                let mut working = frame.clone();
                apply_texture(&mut working, &adj.texture, black_box(0x454D_554C));
                working
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lut_synthesis, bench_render, bench_texture_pass);
criterion_main!(benches);
