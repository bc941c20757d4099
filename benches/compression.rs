#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parle::{Parle, PixelBuffer, PixelFormat};
use rand::Rng;
use std::hint::black_box;

/// Horizontally banded image: the favorable case, long runs inside each band.
fn banded_rgb(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        let band = y / 8;
        let rgb = [
            (band * 37 % 256) as u8,
            (band * 59 % 256) as u8,
            (band * 91 % 256) as u8,
        ];
        for _ in 0..width {
            data.extend_from_slice(&rgb);
        }
    }
    data
}

/// Random noise: the worst case, one run per pixel.
fn noise_rgb(width: u32, height: u32) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..width as usize * height as usize * 3)
        .map(|_| rng.random::<u8>())
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let width = 1024u32;
    let height = 1024u32;
    let banded = banded_rgb(width, height);
    let raw_size = banded.len() as u64;

    let mut group = c.benchmark_group("compress_banded");
    group.throughput(Throughput::Bytes(raw_size));
    for workers in [1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &workers,
            |b, &workers| {
                let image = PixelBuffer::new(width, height, PixelFormat::Rgb, &banded)
                    .expect("valid dimensions");
                b.iter(|| {
                    Parle::compress(black_box(&image), workers).expect("compression failed")
                });
            },
        );
    }
    group.finish();

    let noise = noise_rgb(width, height);
    let mut group = c.benchmark_group("compress_noise");
    group.throughput(Throughput::Bytes(noise.len() as u64));
    for workers in [1usize, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &workers,
            |b, &workers| {
                let image = PixelBuffer::new(width, height, PixelFormat::Rgb, &noise)
                    .expect("valid dimensions");
                b.iter(|| {
                    Parle::compress(black_box(&image), workers).expect("compression failed")
                });
            },
        );
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let width = 1024u32;
    let height = 1024u32;
    let banded = banded_rgb(width, height);
    let image =
        PixelBuffer::new(width, height, PixelFormat::Rgb, &banded).expect("valid dimensions");
    let stream = Parle::compress(&image, 4).expect("compression failed");

    let mut group = c.benchmark_group("decompress_banded");
    group.throughput(Throughput::Bytes(banded.len() as u64));
    group.bench_function("single_thread", |b| {
        b.iter(|| Parle::decompress(black_box(&stream)).expect("decode failed"));
    });
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
