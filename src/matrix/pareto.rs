//! Pareto filtering over the full outcome grid.

use crate::matrix::config::SolverConfig;
use crate::matrix::error::GameError;
use crate::matrix::model::GameModel;
use crate::matrix::outcome::{numeric_pair, Coordinate, OutcomeMap, PayoffPair};

/// Whether `a` Pareto-dominates `b`: at least as good for both players and
/// strictly better for one.
pub fn pareto_dominates(a: PayoffPair, b: PayoffPair, config: &SolverConfig) -> bool {
    let at_least = a.0 >= b.0 - config.tolerance && a.1 >= b.1 - config.tolerance;
    let strictly = a.0 > b.0 + config.tolerance || a.1 > b.1 + config.tolerance;
    at_least && strictly
}

/// Outcomes not Pareto-dominated by any other outcome.
///
/// Uses `payoff1`/`payoff2`; for zero-sum games player 2's payoff is the
/// negated `payoff`, so every outcome survives unless two cells tie.
pub fn pareto_optimal(model: &GameModel, config: &SolverConfig) -> Result<OutcomeMap, GameError> {
    let (m1, m2) = numeric_pair(model)?;
    let outcomes: Vec<(Coordinate, PayoffPair)> = (0..model.rows())
        .flat_map(|i| (0..model.cols()).map(move |j| Coordinate::new(i, j)))
        .map(|c| (c, (m1[c.row][c.col], m2[c.row][c.col])))
        .collect();

    let optimal: OutcomeMap = outcomes
        .iter()
        .filter(|(_, pair)| {
            !outcomes
                .iter()
                .any(|(_, other)| pareto_dominates(*other, *pair, config))
        })
        .copied()
        .collect();

    log::debug!(
        "pareto filter kept {} of {} outcomes",
        optimal.len(),
        outcomes.len()
    );
    Ok(optimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn config() -> SolverConfig {
        SolverConfig::default()
    }

    #[test]
    fn test_prisoners_dilemma_excludes_mutual_defection() {
        let game =
            GameModel::general_sum(vec![vec![3, 0], vec![5, 1]], vec![vec![3, 5], vec![0, 1]]).unwrap();
        let optimal = pareto_optimal(&game, &config()).unwrap();
        let keys: Vec<String> = optimal.keys().map(Coordinate::key).collect();
        assert_eq!(keys, vec!["0,0", "0,1", "1,0"]);
        assert_eq!(optimal[&Coordinate::new(0, 0)], (3.0, 3.0));
    }

    #[test]
    fn test_weak_dominance_removes_outcome() {
        let game = GameModel::general_sum(vec![vec![2, 2]], vec![vec![1, 2]]).unwrap();
        let optimal = pareto_optimal(&game, &config()).unwrap();
        assert_eq!(optimal.len(), 1);
        assert!(optimal.contains_key(&Coordinate::new(0, 1)));
    }

    #[test]
    fn test_identical_outcomes_both_survive() {
        let game = GameModel::general_sum(vec![vec![1, 1]], vec![vec![1, 1]]).unwrap();
        assert_eq!(pareto_optimal(&game, &config()).unwrap().len(), 2);
    }

    #[test]
    fn test_zero_sum_keeps_everything() {
        let game = GameModel::zero_sum(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(pareto_optimal(&game, &config()).unwrap().len(), 4);
    }

    #[test]
    fn test_no_survivor_is_strictly_dominated() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let gen = |rng: &mut StdRng| -> Vec<Vec<f64>> {
                (0..3)
                    .map(|_| (0..4).map(|_| rng.gen_range(0..6) as f64).collect())
                    .collect()
            };
            let (a, b) = (gen(&mut rng), gen(&mut rng));
            let game = GameModel::general_sum(a.clone(), b.clone()).unwrap();
            let optimal = pareto_optimal(&game, &config()).unwrap();
            assert!(!optimal.is_empty());
            for pair in optimal.values() {
                for i in 0..3 {
                    for j in 0..4 {
                        assert!(!(a[i][j] > pair.0 && b[i][j] > pair.1));
                    }
                }
            }
        }
    }
}
