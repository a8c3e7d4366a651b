//! Criterion benchmarks for the Pareto kernel.
//!
//! Uses random objective vectors to measure ranking, density, hypervolume,
//! and archive overhead independent of any problem.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_moea::archive::{Archive, CrowdingDistanceArchive, HypervolumeArchive, ReferencePoint};
use u_moea::density::crowding_distance;
use u_moea::hypervolume::Hypervolume;
use u_moea::random::create_rng;
use u_moea::ranking::non_dominated_sort;
use u_moea::solution::Solution;

// ===========================================================================
// Inputs
// ===========================================================================

fn random_objectives(n: usize, m: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = create_rng(seed);
    (0..n)
        .map(|_| (0..m).map(|_| rng.random_range(0.0..1.0)).collect())
        .collect()
}

/// Points on the simplex x1 + ... + xm = 1, all mutually non-dominated.
fn linear_front(n: usize, m: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = create_rng(seed);
    (0..n)
        .map(|_| {
            let raw: Vec<f64> = (0..m).map(|_| rng.random_range(0.01..1.0)).collect();
            let sum: f64 = raw.iter().sum();
            raw.into_iter().map(|x| x / sum).collect()
        })
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_non_dominated_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("non_dominated_sort");

    for &n in &[100usize, 500, 1000] {
        let objs = random_objectives(n, 3, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &objs, |b, objs| {
            b.iter(|| black_box(non_dominated_sort(black_box(objs))))
        });
    }
    group.finish();
}

fn bench_crowding_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("crowding_distance");

    for &n in &[100usize, 1000, 10_000] {
        let objs = linear_front(n, 3, 7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &objs, |b, objs| {
            b.iter(|| black_box(crowding_distance(black_box(objs))))
        });
    }
    group.finish();
}

fn bench_hypervolume(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypervolume");
    group.sample_size(10);

    for (m, n) in [(2usize, 1000usize), (3, 100), (3, 200), (4, 50)] {
        let front = linear_front(n, m, 11);
        let hv = Hypervolume::new(vec![1.1; m]).unwrap();
        group.bench_with_input(
            BenchmarkId::new(format!("m{}", m), n),
            &(hv, front),
            |b, (hv, front)| b.iter(|| black_box(hv.compute(black_box(front)))),
        );
    }
    group.finish();
}

fn bench_archive_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_insertion");
    group.sample_size(10);

    let stream = linear_front(500, 2, 3);

    group.bench_function("crowding_100", |b| {
        b.iter(|| {
            let mut archive = CrowdingDistanceArchive::<()>::crowding(100).unwrap();
            for objs in &stream {
                archive.add(Solution::from_objectives(objs.clone()));
            }
            black_box(archive.size())
        })
    });

    group.bench_function("hypervolume_100", |b| {
        b.iter(|| {
            let mut archive =
                HypervolumeArchive::<()>::hypervolume(100, ReferencePoint::Nadir).unwrap();
            for objs in &stream {
                archive.add(Solution::from_objectives(objs.clone()));
            }
            black_box(archive.size())
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_non_dominated_sort,
    bench_crowding_distance,
    bench_hypervolume,
    bench_archive_insertion
);
criterion_main!(benches);
