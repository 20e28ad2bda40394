//! Benchmarks for block transforms, reconstruction, basis rendering and the engine
//!
//! Run with: cargo bench --bench transforms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dct_core::{Dimensions, GreyImage};
use dct_transform::{
    reconstruct, render_all, BasisMatrix, Block, BlockTransformer, CoefficientMask,
};
use dctview::{DctEngine, EngineOptions, RenderWorker};

fn bench_block_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("Block Transform");

    for &n in &[4usize, 8, 16, 32] {
        let basis = BasisMatrix::new(n).unwrap();
        let dct = BlockTransformer::new(&basis);
        let input = Block::from_fn(n, |r, col| ((r * 31 + col * 17) % 256) as f64);
        let coefficients = dct.forward(&input).unwrap();

        group.bench_with_input(BenchmarkId::new("forward", n), &n, |b, _| {
            b.iter(|| dct.forward(black_box(&input)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("inverse", n), &n, |b, _| {
            b.iter(|| dct.inverse(black_box(&coefficients)).unwrap());
        });
    }

    group.finish();
}

fn bench_basis(c: &mut Criterion) {
    let mut group = c.benchmark_group("Basis");

    for &n in &[4usize, 8, 32] {
        group.bench_with_input(BenchmarkId::new("build", n), &n, |b, &n| {
            b.iter(|| BasisMatrix::new(black_box(n)).unwrap());
        });

        let basis = BasisMatrix::new(n).unwrap();
        group.bench_with_input(BenchmarkId::new("render_all", n), &n, |b, _| {
            b.iter(|| render_all(black_box(&basis)).unwrap());
        });
    }

    group.finish();
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reconstruct");

    for &size in &[64u32, 256, 512] {
        let image = GreyImage::from_fn(Dimensions::new(size, size), |x, y| {
            ((x * 7 + y * 13) % 256) as f64 / 255.0
        })
        .unwrap();
        group.throughput(Throughput::Elements(image.pixel_count() as u64));

        for &n in &[4usize, 8, 16] {
            let basis = BasisMatrix::new(n).unwrap();
            let mask = CoefficientMask::low_pass(n, n / 2);

            group.bench_function(format!("{}x{}_n{}", size, size, n), |b| {
                b.iter(|| reconstruct(black_box(&image), &basis, &mask).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine");

    let image = GreyImage::from_fn(Dimensions::new(256, 256), |x, y| {
        ((x * 7 + y * 13) % 256) as f64 / 255.0
    })
    .unwrap();

    let mut engine = DctEngine::new(EngineOptions::default().default_size(8)).unwrap();
    engine.set_image(image).unwrap();
    group.bench_function("toggle_256x256_n8", |b| {
        b.iter(|| engine.toggle(black_box(3), black_box(5)).unwrap());
    });

    // Served from the basis cache after the first call
    group.bench_function("set_size_cached_n8", |b| {
        b.iter(|| engine.set_size(black_box(8)).unwrap());
    });

    let request = engine.request().unwrap();
    let mut worker = RenderWorker::spawn();
    group.bench_function("worker_roundtrip_256x256_n8", |b| {
        b.iter(|| {
            worker.submit(request.clone());
            worker.wait().map(|outcome| outcome.generation)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_block_transform,
    bench_basis,
    bench_reconstruct,
    bench_engine
);
criterion_main!(benches);
