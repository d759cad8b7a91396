use ndarray::{Array2, array};

use densenl::neighbors::search;

use criterion::{Criterion, BenchmarkId, black_box, criterion_group, criterion_main};

/// Atoms on a slightly perturbed cubic lattice, with the given number of
/// atoms along each direction and 1.0 between lattice points.
fn lattice(n_per_side: usize) -> (Array2<f64>, Array2<f64>) {
    let n_atoms = n_per_side * n_per_side * n_per_side;
    let positions = Array2::from_shape_fn((n_atoms, 3), |(atom, xyz)| {
        let index = match xyz {
            0 => atom % n_per_side,
            1 => (atom / n_per_side) % n_per_side,
            _ => atom / (n_per_side * n_per_side),
        };
        // deterministic noise in [-0.05, 0.05]
        let noise = ((atom * 7 + xyz * 13) % 11) as f64 / 100.0 - 0.05;
        index as f64 + noise
    });

    let length = n_per_side as f64;
    let cell = array![
        [length, 0.0, 0.0],
        [0.0, length, 0.0],
        [0.0, 0.0, length],
    ];

    return (positions, cell);
}

fn neighbor_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense neighbor search");
    group.noise_threshold(0.05);

    for &n_per_side in black_box(&[4, 8, 12, 16]) {
        let (positions, cell) = lattice(n_per_side);
        let cutoff = f64::min(2.5, 0.49 * n_per_side as f64);

        group.bench_with_input(
            BenchmarkId::new("periodic", positions.nrows()),
            &(positions.view(), cell.view()),
            |b, (positions, cell)| b.iter(|| {
                search(*positions, *cell, true, cutoff, false).expect("failed to compute neighbors")
            })
        );

        group.bench_with_input(
            BenchmarkId::new("non-periodic, sorted", positions.nrows()),
            &(positions.view(), cell.view()),
            |b, (positions, cell)| b.iter(|| {
                search(*positions, *cell, false, cutoff, true).expect("failed to compute neighbors")
            })
        );
    }
}

criterion_group!(benches, neighbor_search);
criterion_main!(benches);
