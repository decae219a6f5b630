//! Payoff equations in each player's free mixing variable.
//!
//! For player 1 the expected payoff is built as the bilinear sum
//! `Σ p_i * q_j * payoff1[i][j]`, then every `p_k`/`q_k` with `k > 1` is
//! replaced by the complement `(1 - x_1 - ... - x_{k-1})`, highest index
//! first, and `p_1`/`q_1` are renamed to `p`/`q`. Differentiating with
//! respect to the player's own variable gives the first-order condition that
//! pins down the opponent's equilibrium mix.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::matrix::error::GameError;
use crate::matrix::model::{GameModel, Player};
use crate::symbolic::parser::parse_cell;
use crate::symbolic::polynomial::Polynomial;

/// One player's payoff equation and its first-order condition.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedEquation {
    /// Player the equation belongs to.
    pub player: Player,
    /// The player's free variable (`p` or `q`).
    pub variable: &'static str,
    /// Expected payoff in `p` and `q`.
    pub payoff: Polynomial,
    /// Derivative of `payoff` with respect to `variable`.
    pub derivative: Polynomial,
}

/// Interior mixed equilibrium of a two-strategy game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixedSolution {
    /// Probability player 1 puts on strategy 1.
    pub p: f64,
    /// Probability player 2 puts on strategy 1.
    pub q: f64,
    /// Expected payoffs `(u1, u2)` at the equilibrium.
    pub payoffs: (f64, f64),
}

fn indexed(prefix: &str, k: usize) -> String {
    format!("{}_{}", prefix, k)
}

/// Replace `x_n .. x_2` by complements of the lower-indexed variables, then
/// rename `x_1` to the bare prefix.
fn reduce_variables(mut expr: Polynomial, prefix: &str, count: usize) -> Polynomial {
    for k in (2..=count).rev() {
        let complement = (1..k).fold(Polynomial::constant(1.0), |acc, l| {
            acc - Polynomial::var(&indexed(prefix, l))
        });
        expr = expr.substitute(&indexed(prefix, k), &complement);
    }
    expr.rename(&indexed(prefix, 1), prefix)
}

fn equation(model: &GameModel, player: Player) -> Result<MixedEquation, GameError> {
    let matrix = model.payoff_matrix(player);
    let (p, q) = (Player::Row.variable(), Player::Column.variable());

    let mut payoff = Polynomial::zero();
    for (i, row) in matrix.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            let term = Polynomial::var(&indexed(p, i + 1)) * Polynomial::var(&indexed(q, j + 1));
            payoff = payoff + term * parse_cell(cell)?;
        }
    }
    let payoff = reduce_variables(payoff, p, model.rows());
    let payoff = reduce_variables(payoff, q, model.cols());

    let variable = player.variable();
    let derivative = payoff.derivative(variable);
    log::debug!("{} payoff {} has d/d{} = {}", player, payoff, variable, derivative);

    Ok(MixedEquation {
        player,
        variable,
        payoff,
        derivative,
    })
}

/// Build both players' payoff equations and their derivatives.
///
/// Payoff cells may be numbers or expressions; zero-sum games use the
/// negated payoff for player 2.
///
/// # Errors
/// `Parse` if a symbolic cell cannot be read as a polynomial.
pub fn mixed(model: &GameModel) -> Result<[MixedEquation; 2], GameError> {
    Ok([equation(model, Player::Row)?, equation(model, Player::Column)?])
}

/// Set both first-order conditions to zero and solve.
///
/// Player 1's condition is linear in `q` and player 2's in `p`; the roots
/// are substituted back into both payoff equations.
///
/// # Errors
/// `Degenerate` when a condition does not determine the opponent's variable
/// (for example a dominant strategy or symbolic coefficients);
/// `NoEquilibrium` when a root lies outside `[0, 1]`.
pub fn solve(equations: &[MixedEquation; 2]) -> Result<MixedSolution, GameError> {
    let [row, column] = equations;
    let root = |eq: &MixedEquation, expect: &str| -> Result<f64, GameError> {
        match eq.derivative.solve_linear() {
            Some((name, value)) if name == expect => Ok(value),
            _ => Err(GameError::Degenerate(
                "first-order condition is not linear in the opponent's variable",
            )),
        }
    };
    let q = root(row, Player::Column.variable())?;
    let p = root(column, Player::Row.variable())?;
    if !(0.0..=1.0).contains(&p) || !(0.0..=1.0).contains(&q) {
        return Err(GameError::NoEquilibrium);
    }

    let mut bindings = FxHashMap::default();
    bindings.insert(Player::Row.variable().to_string(), p);
    bindings.insert(Player::Column.variable().to_string(), q);
    Ok(MixedSolution {
        p,
        q,
        payoffs: (row.payoff.evaluate(&bindings)?, column.payoff.evaluate(&bindings)?),
    })
}

/// Build and solve the mixed equilibrium in one step.
pub fn solve_mixed(model: &GameModel) -> Result<MixedSolution, GameError> {
    solve(&mixed(model)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::value::Cell;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_sum_2x2_equations() {
        let game = GameModel::zero_sum(vec![vec![5, -2], vec![1, 4]]).unwrap();
        let [row, column] = mixed(&game).unwrap();
        assert_eq!(row.variable, "p");
        assert_eq!(row.payoff.to_string(), "10*p*q - 6*p - 3*q + 4");
        assert_eq!(row.derivative.to_string(), "10*q - 6");
        assert_eq!(column.derivative.to_string(), "-10*p + 3");
    }

    #[test]
    fn test_solution_agrees_with_oddments() {
        let game = GameModel::zero_sum(vec![vec![5, -2], vec![1, 4]]).unwrap();
        let solution = solve_mixed(&game).unwrap();
        assert_abs_diff_eq!(solution.p, 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(solution.q, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(solution.payoffs.0, 2.2, epsilon = 1e-12);
        assert_abs_diff_eq!(solution.payoffs.1, -2.2, epsilon = 1e-12);
    }

    #[test]
    fn test_battle_of_the_sexes() {
        let game =
            GameModel::general_sum(vec![vec![3, 0], vec![0, 2]], vec![vec![2, 0], vec![0, 3]]).unwrap();
        let solution = solve_mixed(&game).unwrap();
        assert_abs_diff_eq!(solution.p, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(solution.q, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(solution.payoffs.0, 1.2, epsilon = 1e-12);
        assert_abs_diff_eq!(solution.payoffs.1, 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_symbolic_payoffs() {
        let game = GameModel::zero_sum(vec![
            vec![Cell::from("a"), Cell::from("b")],
            vec![Cell::from("c"), Cell::from("d")],
        ])
        .unwrap();
        let [row, _] = mixed(&game).unwrap();
        // d/dp of p*q*a + p*(1-q)*b + (1-p)*q*c + (1-p)*(1-q)*d
        assert_eq!(row.derivative.to_string(), "a*q - b*q - c*q + d*q + b - d");
        assert!(matches!(solve(&mixed(&game).unwrap()), Err(GameError::Degenerate(_))));
    }

    #[test]
    fn test_dominant_strategy_is_degenerate() {
        // Row 1 beats row 2 by exactly 1 whatever the column player does.
        let game = GameModel::zero_sum(vec![vec![2, 1], vec![1, 0]]).unwrap();
        let [row, _] = mixed(&game).unwrap();
        assert_eq!(row.derivative.to_string(), "1");
        assert!(matches!(solve_mixed(&game), Err(GameError::Degenerate(_))));
    }

    #[test]
    fn test_three_strategies_substitute_highest_first() {
        let game = GameModel::zero_sum(vec![vec![1, 0], vec![0, 1], vec![2, 2]]).unwrap();
        let [row, _] = mixed(&game).unwrap();
        // p_3 -> 1 - p_1 - p_2, then p_2 -> 1 - p_1, leaving p_3's weight at zero.
        assert!(!row.payoff.variables().contains("p_2"));
        assert!(!row.payoff.variables().contains("p_3"));
        assert_eq!(row.payoff.to_string(), "2*p*q - p - q + 1");
    }

    #[test]
    fn test_root_outside_unit_interval() {
        // Prisoner's dilemma: each condition has its root at -1.
        let game =
            GameModel::general_sum(vec![vec![3, 0], vec![5, 1]], vec![vec![3, 5], vec![0, 1]]).unwrap();
        let [row, column] = mixed(&game).unwrap();
        assert_eq!(row.derivative.to_string(), "-q - 1");
        assert_eq!(column.derivative.to_string(), "-p - 1");
        assert_eq!(solve_mixed(&game), Err(GameError::NoEquilibrium));
    }
}
