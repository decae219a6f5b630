//! Expected payoff evaluation, numeric and symbolic, plus single-round play.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::matrix::config::SolverConfig;
use crate::matrix::error::GameError;
use crate::matrix::model::{GameModel, Player};
use crate::matrix::outcome::{numeric_pair, Coordinate, PayoffPair};

/// Expected payoff to the row player under both players' mixed strategies.
///
/// Accumulates `p1[i] * p2[j] * payoff[i-1][j-1]` over every pair of strategy
/// indices, using `payoff` (zero-sum) or `payoff1` (general-sum).
///
/// # Errors
/// `SymbolicValue` if a probability or payoff is an expression.
pub fn expected_payoff(model: &GameModel) -> Result<f64, GameError> {
    bilinear(model, &model.numeric_primary()?)
}

/// Expected payoffs to both players, `(u1, u2)`.
pub fn expected_payoffs(model: &GameModel) -> Result<PayoffPair, GameError> {
    let (m1, m2) = numeric_pair(model)?;
    Ok((bilinear(model, &m1)?, bilinear(model, &m2)?))
}

fn bilinear(model: &GameModel, matrix: &[Vec<f64>]) -> Result<f64, GameError> {
    let mut total = 0.0;
    for (&i, p) in model.strategy(Player::Row) {
        let p = p.as_f64()?;
        for (&j, q) in model.strategy(Player::Column) {
            total += p * q.as_f64()? * matrix[i - 1][j - 1];
        }
    }
    Ok(total)
}

/// Unevaluated expected payoff expression for the row player.
///
/// Each term is `"{p1[i]} * {p2[j]} * {payoff[i-1][j-1]}"`, terms joined by
/// `" + "` in ascending strategy order. No simplification is performed.
pub fn s_expected_payoff(model: &GameModel) -> String {
    terms(model, Player::Row).join(" + ")
}

/// Unevaluated expected payoff expression for either player.
///
/// For zero-sum games the column player's cells appear negated, as `-(x)`
/// for expressions and as negative numbers otherwise.
pub fn s_expected_payoff_for(model: &GameModel, player: Player) -> String {
    terms(model, player).join(" + ")
}

fn terms(model: &GameModel, player: Player) -> Vec<String> {
    let matrix = match player {
        Player::Row => model.primary_matrix().clone(),
        Player::Column => model.payoff_matrix(Player::Column),
    };
    let mut out = Vec::with_capacity(model.rows() * model.cols());
    for (&i, p) in model.strategy(Player::Row) {
        for (&j, q) in model.strategy(Player::Column) {
            out.push(format!("{} * {} * {}", p, q, matrix[i - 1][j - 1]));
        }
    }
    out
}

/// Payoff of each pure reply against the opponent's current strategy.
///
/// Enumerates the one-hot vectors for `player` (strategy 1 first), and for
/// each returns the expected payoff, using the player's own matrix, of
/// committing to that pure strategy while the opponent keeps its mix.
pub fn counter_strategy(model: &GameModel, player: Player) -> Result<Vec<f64>, GameError> {
    let matrix = model.numeric_matrix(player)?;
    let opponent = model.numeric_strategy(player.opponent())?;

    let values = (0..model.strategy_count(player))
        .map(|k| match player {
            Player::Row => opponent.iter().zip(&matrix[k]).map(|(q, v)| q * v).sum(),
            Player::Column => opponent
                .iter()
                .zip(&matrix)
                .map(|(p, row)| p * row[k])
                .sum(),
        })
        .collect();
    Ok(values)
}

/// Result of sampling one round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Play {
    /// The sampled pure-strategy profile.
    pub coordinate: Coordinate,
    /// Payoffs `(u1, u2)` at that profile.
    pub payoffs: PayoffPair,
}

/// Sample one pure-strategy outcome from both players' mixed strategies.
///
/// Deterministic for a given `rng` state, so a seeded generator reproduces
/// the same sequence of plays.
///
/// # Errors
/// `InvalidProbability` when `config.check_probabilities` is set and either
/// distribution is malformed; `SymbolicValue` for symbolic cells.
pub fn play<R: Rng>(model: &GameModel, config: &SolverConfig, rng: &mut R) -> Result<Play, GameError> {
    if config.check_probabilities {
        for player in Player::both() {
            model.validate_distribution(player, config.tolerance)?;
        }
    }
    let (m1, m2) = numeric_pair(model)?;
    let row = sample_index(&model.numeric_strategy(Player::Row)?, rng);
    let col = sample_index(&model.numeric_strategy(Player::Column)?, rng);
    Ok(Play {
        coordinate: Coordinate::new(row, col),
        payoffs: (m1[row][col], m2[row][col]),
    })
}

/// Sample one round with a generator seeded from `config.seed`.
pub fn play_seeded(model: &GameModel, config: &SolverConfig) -> Result<Play, GameError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    play(model, config, &mut rng)
}

/// Sample an index according to a probability distribution.
fn sample_index<R: Rng>(probabilities: &[f64], rng: &mut R) -> usize {
    let r: f64 = rng.gen();
    let mut cumsum = 0.0;

    for (i, &prob) in probabilities.iter().enumerate() {
        cumsum += prob;
        if r < cumsum {
            return i;
        }
    }

    // Floating point shortfall: fall back to the last strategy with mass
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(probabilities.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::value::Cell;
    use approx::assert_abs_diff_eq;

    fn game(payoff: Vec<Vec<i32>>, p1: Vec<f64>, p2: Vec<f64>) -> GameModel {
        GameModel::zero_sum(payoff)
            .unwrap()
            .with_strategy(Player::Row, p1)
            .unwrap()
            .with_strategy(Player::Column, p2)
            .unwrap()
    }

    #[test]
    fn test_expected_payoff_2x2() {
        let g = game(vec![vec![5, 0], vec![-1, 2]], vec![0.2, 0.8], vec![0.3, 0.7]);
        assert_abs_diff_eq!(expected_payoff(&g).unwrap(), 1.18, epsilon = 1e-12);
    }

    #[test]
    fn test_expected_payoff_3x4() {
        let g = game(
            vec![vec![2, -1, -5, 3], vec![0, -2, 3, -3], vec![1, 0, 1, -2]],
            vec![0.3, 0.0, 0.7],
            vec![0.1, 0.2, 0.3, 0.4],
        );
        assert_abs_diff_eq!(expected_payoff(&g).unwrap(), -0.37, epsilon = 1e-12);
    }

    #[test]
    fn test_expected_payoff_matches_direct_bilinear_sum() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let m: Vec<Vec<f64>> = (0..2)
                .map(|_| (0..2).map(|_| rng.gen_range(-10.0..10.0)).collect())
                .collect();
            let p: f64 = rng.gen();
            let q: f64 = rng.gen();
            let g = GameModel::zero_sum(m.clone())
                .unwrap()
                .with_strategy(Player::Row, vec![p, 1.0 - p])
                .unwrap()
                .with_strategy(Player::Column, vec![q, 1.0 - q])
                .unwrap();
            let direct = p * q * m[0][0]
                + p * (1.0 - q) * m[0][1]
                + (1.0 - p) * q * m[1][0]
                + (1.0 - p) * (1.0 - q) * m[1][1];
            assert_abs_diff_eq!(expected_payoff(&g).unwrap(), direct, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_expected_payoffs_general_sum() {
        let g = GameModel::general_sum(vec![vec![3, 0], vec![5, 1]], vec![vec![3, 5], vec![0, 1]])
            .unwrap();
        let (u1, u2) = expected_payoffs(&g).unwrap();
        assert_abs_diff_eq!(u1, 2.25, epsilon = 1e-12);
        assert_abs_diff_eq!(u2, 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_expected_payoff_rejects_symbolic() {
        let g = GameModel::default()
            .with_strategy(Player::Row, vec![Cell::from("p"), Cell::from("1 - p")])
            .unwrap();
        assert!(matches!(expected_payoff(&g), Err(GameError::SymbolicValue { .. })));
    }

    #[test]
    fn test_s_expected_payoff_string() {
        let g = GameModel::default()
            .with_strategy(Player::Row, vec![Cell::from("p"), Cell::from("1 - p")])
            .unwrap();
        assert_eq!(
            s_expected_payoff(&g),
            "p * 0.5 * 1 + p * 0.5 * -1 + 1 - p * 0.5 * -1 + 1 - p * 0.5 * 1"
        );
    }

    #[test]
    fn test_s_expected_payoff_for_column_negates() {
        let g = GameModel::zero_sum(vec![vec![Cell::from("a")]]).unwrap();
        assert_eq!(s_expected_payoff_for(&g, Player::Column), "1 * 1 * -(a)");
    }

    #[test]
    fn test_counter_strategy() {
        let g = game(vec![vec![5, 0], vec![-1, 2]], vec![0.2, 0.8], vec![0.3, 0.7]);
        let rows = counter_strategy(&g, Player::Row).unwrap();
        assert_abs_diff_eq!(rows[0], 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(rows[1], 1.1, epsilon = 1e-12);

        // Column player's own payoff is the negated matrix
        let cols = counter_strategy(&g, Player::Column).unwrap();
        assert_abs_diff_eq!(cols[0], -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(cols[1], -1.6, epsilon = 1e-12);
    }

    #[test]
    fn test_play_is_reproducible_with_seed() {
        let g = game(
            vec![vec![2, -1, -5, 3], vec![0, -2, 3, -3], vec![1, 0, 1, -2]],
            vec![0.3, 0.0, 0.7],
            vec![0.1, 0.2, 0.3, 0.4],
        );
        let config = SolverConfig::default().with_seed(42);
        let first = play_seeded(&g, &config).unwrap();
        let second = play_seeded(&g, &config).unwrap();
        assert_eq!(first, second);
        assert_ne!(first.coordinate.row, 1, "zero-probability row must never be drawn");
    }

    #[test]
    fn test_play_frequencies_follow_distribution() {
        let g = game(vec![vec![1, 2], vec![3, 4]], vec![0.25, 0.75], vec![1.0, 0.0]);
        let config = SolverConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut bottom = 0;
        for _ in 0..10_000 {
            let round = play(&g, &config, &mut rng).unwrap();
            assert_eq!(round.coordinate.col, 0);
            if round.coordinate.row == 1 {
                bottom += 1;
                assert_eq!(round.payoffs, (3.0, -3.0));
            }
        }
        assert!((7000..8000).contains(&bottom), "bottom row drawn {} times", bottom);
    }

    #[test]
    fn test_play_rejects_bad_distribution() {
        let g = game(vec![vec![1, 2], vec![3, 4]], vec![0.5, 0.6], vec![0.5, 0.5]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            play(&g, &SolverConfig::default(), &mut rng),
            Err(GameError::InvalidProbability { player: Player::Row, .. })
        ));
        assert!(play(&g, &SolverConfig::default().with_probability_checks(false), &mut rng).is_ok());
    }
}
