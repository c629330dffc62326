// benches/nlod_perf.rs
// Criterion benchmarks for the row aligner and full-matrix NLOD, serial vs rayon.

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};

use ferrous_nlod::{NlodOpt, OdMatrix, local_distance, nlod_with, rank_row};

fn make_matrix(rng: &mut StdRng, side: usize) -> OdMatrix {
    let data = (0..side * side)
        .map(|_| rng.gen_range(0..500) as f64)
        .collect();
    OdMatrix::from_flat(data).unwrap()
}

fn bench_row_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_alignment");
    let mut rng = StdRng::seed_from_u64(0xDEADBEEFCAFEBABE);

    for len in [16usize, 64, 256, 512] {
        let x: Vec<f64> = (0..len).map(|_| rng.gen_range(0..500) as f64).collect();
        let y: Vec<f64> = (0..len).map(|_| rng.gen_range(0..500) as f64).collect();
        group.throughput(Throughput::Elements((len * len) as u64));
        group.bench_function(format!("rank_and_align_len{len}"), |b| {
            b.iter(|| {
                let rx = rank_row(black_box(&x));
                let ry = rank_row(black_box(&y));
                black_box(local_distance(&rx, &ry))
            })
        });
    }
    group.finish();
}

fn bench_matrix_nlod(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_nlod");
    group.sample_size(20);
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for side in [32usize, 128, 256] {
        let a = make_matrix(&mut rng, side);
        let b = make_matrix(&mut rng, side);
        group.throughput(Throughput::Elements((side * side * side) as u64));

        let serial = NlodOpt::serial();
        group.bench_function(format!("serial_side{side}"), |bch| {
            bch.iter_batched(
                || (a.clone(), b.clone()),
                |(a, b)| black_box(nlod_with(&a, &b, &serial).unwrap()),
                BatchSize::LargeInput,
            )
        });

        let parallel = NlodOpt {
            min_parallel_rows: 1,
            ..Default::default()
        };
        group.bench_function(format!("rayon_side{side}"), |bch| {
            bch.iter(|| black_box(nlod_with(&a, &b, &parallel).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_row_alignment, bench_matrix_nlod);
criterion_main!(benches);
