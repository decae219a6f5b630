//! Benchmarks for matrix game analyses.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bimatrix_solver::games::classic::{BATTLE_OF_THE_SEXES, PRISONERS_DILEMMA};
use bimatrix_solver::matrix::{
    expected_payoff, nash, pareto_optimal, reduce_fully, saddlepoint, GameModel, SolverConfig,
};
use bimatrix_solver::symbolic::solve_mixed;

fn random_game(rows: usize, cols: usize, seed: u64) -> GameModel {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut matrix = || -> Vec<Vec<f64>> {
        (0..rows)
            .map(|_| (0..cols).map(|_| f64::from(rng.gen_range(-10i32..=10))).collect())
            .collect()
    };
    let (payoff1, payoff2) = (matrix(), matrix());
    GameModel::general_sum(payoff1, payoff2).unwrap()
}

fn expected_payoff_benchmark(c: &mut Criterion) {
    let game = random_game(20, 20, 42);
    c.bench_function("expected_payoff_20x20", |b| {
        b.iter(|| expected_payoff(black_box(&game)).unwrap())
    });
}

fn equilibrium_benchmark(c: &mut Criterion) {
    let game = random_game(20, 20, 7);
    let config = SolverConfig::default();

    c.bench_function("nash_20x20", |b| b.iter(|| nash(black_box(&game), &config).unwrap()));
    c.bench_function("saddlepoint_20x20", |b| {
        b.iter(|| saddlepoint(black_box(&game), &config).unwrap())
    });
    c.bench_function("pareto_20x20", |b| {
        b.iter(|| pareto_optimal(black_box(&game), &config).unwrap())
    });
}

fn reduction_benchmark(c: &mut Criterion) {
    let game = random_game(12, 12, 3);
    let pd = PRISONERS_DILEMMA.model().unwrap();
    let config = SolverConfig::default();

    c.bench_function("reduce_fully_12x12", |b| {
        b.iter(|| reduce_fully(black_box(&game), &config).unwrap())
    });
    c.bench_function("reduce_fully_prisoners_dilemma", |b| {
        b.iter(|| reduce_fully(black_box(&pd), &config).unwrap())
    });
}

fn mixed_benchmark(c: &mut Criterion) {
    let game = BATTLE_OF_THE_SEXES.model().unwrap();
    c.bench_function("solve_mixed_2x2", |b| b.iter(|| solve_mixed(black_box(&game)).unwrap()));
}

criterion_group!(
    benches,
    expected_payoff_benchmark,
    equilibrium_benchmark,
    reduction_benchmark,
    mixed_benchmark
);
criterion_main!(benches);
