//! Benchmark objective evaluation on synthetic registrations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DMatrix;

use milan_reg::{
    oriented_objective, point_objective, AffineWarp, OrientedSet, Scene,
};

const ROT_REG: [f64; 2] = [1e-4, 1e-4];

fn ring_points(n: usize, radius: f64) -> DMatrix<f64> {
    DMatrix::from_fn(n, 2, |i, j| {
        let angle = std::f64::consts::TAU * i as f64 / n as f64;
        if j == 0 {
            radius * angle.cos()
        } else {
            radius * angle.sin()
        }
    })
}

fn uniform_corr(rows: usize, cols: usize) -> DMatrix<f64> {
    DMatrix::from_element(rows, cols, 1.0 / (rows * cols) as f64)
}

fn bench_point_objective(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_objective");
    let warp = AffineWarp::translation_only(&[0.1, -0.2]);

    for n in [50, 200, 800].iter() {
        let x = ring_points(*n, 2.0);
        let y = ring_points(*n, 2.5);
        let corr = uniform_corr(*n, *n);

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| {
                let cost = point_objective(
                    black_box(&x),
                    black_box(&y),
                    &warp,
                    &corr,
                    0.01,
                    0.1,
                    &ROT_REG,
                );
                black_box(cost.total())
            })
        });
    }
    group.finish();
}

fn bench_oriented_objective(c: &mut Criterion) {
    let mut group = c.benchmark_group("oriented_objective");
    let warp = AffineWarp::translation_only(&[0.1, -0.2]);

    for n in [50, 200].iter() {
        let x = ring_points(*n, 2.0);
        let y = ring_points(*n, 2.5);
        let src = OrientedSet {
            directions: ring_points(*n, 1.0),
            sites: ring_points(*n, 2.0),
        };
        let tgt = OrientedSet {
            directions: ring_points(*n, 1.0),
            sites: ring_points(*n, 2.5),
        };
        let corr = uniform_corr(*n, *n);

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| {
                let cost = oriented_objective(
                    black_box(&x),
                    &src,
                    black_box(&y),
                    &tgt,
                    &warp,
                    &corr,
                    &corr,
                    0.01,
                    0.005,
                    0.1,
                    &ROT_REG,
                );
                black_box(cost.total())
            })
        });
    }
    group.finish();
}

fn bench_demo_scene_objective(c: &mut Criterion) {
    let mut group = c.benchmark_group("demo_scene_objective");
    let warp = AffineWarp::translation_only(&[0.05, 0.02]);

    for index in [1usize, 4].iter() {
        let scene = Scene::demo(*index);
        let corr_points = uniform_corr(scene.source.nrows(), scene.target.nrows());
        let corr_normals = uniform_corr(scene.source_normals.len(), scene.target_normals.len());

        group.bench_with_input(BenchmarkId::from_parameter(index), index, |b, _| {
            b.iter(|| {
                let cost = oriented_objective(
                    black_box(&scene.source),
                    &scene.source_normals,
                    black_box(&scene.target),
                    &scene.target_normals,
                    &warp,
                    &corr_points,
                    &corr_normals,
                    0.01,
                    0.005,
                    0.06,
                    &ROT_REG,
                );
                black_box(cost.total())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_point_objective,
    bench_oriented_objective,
    bench_demo_scene_objective
);
criterion_main!(benches);
