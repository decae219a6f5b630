//! Dominated-strategy elimination.
//!
//! Two related procedures live here:
//!
//! - [`reduce`]: pairwise strict dominance over a player's own utility
//!   vectors. Removes at most one strategy per call.
//! - [`row_reduce`] / [`col_reduce`]: ordering-based elimination directly on
//!   the payoff matrix. A row that is pointwise less than or equal to another
//!   surviving row is removed; a column the column player never prefers is
//!   removed. Several rows or columns may go in one call.
//!
//! Every procedure returns a new, smaller [`GameModel`]; callers loop until
//! [`Reduction::removed`] comes back empty.

use crate::matrix::config::SolverConfig;
use crate::matrix::error::GameError;
use crate::matrix::model::{GameModel, Player};

/// Outcome of one reduction step.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// The reduced game (identical to the input when nothing was removed).
    pub model: GameModel,
    /// Player whose strategies were examined.
    pub player: Player,
    /// 0-based indices, in the input game, of the removed strategies.
    pub removed: Vec<usize>,
}

impl Reduction {
    /// Whether this step removed anything.
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }

    fn build(model: &GameModel, player: Player, removed: Vec<usize>) -> Self {
        let reduced = match player {
            Player::Row => model.without(&removed, &[]),
            Player::Column => model.without(&[], &removed),
        };
        Self {
            model: reduced,
            player,
            removed,
        }
    }
}

/// Per-entry comparison of two utility vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Dominant,
    Dominated,
    Tied,
}

fn compare(a: f64, b: f64, tolerance: f64) -> Comparison {
    if (a - b).abs() <= tolerance {
        Comparison::Tied
    } else if a > b {
        Comparison::Dominant
    } else {
        Comparison::Dominated
    }
}

/// Each strategy's utility vector against every opponent strategy.
fn utility_vectors(model: &GameModel, player: Player) -> Result<Vec<Vec<f64>>, GameError> {
    let matrix = model.numeric_matrix(player)?;
    Ok(match player {
        Player::Row => matrix,
        Player::Column => (0..model.cols())
            .map(|j| matrix.iter().map(|row| row[j]).collect())
            .collect(),
    })
}

fn strictly_dominated_by(a: &[f64], b: &[f64], tolerance: f64) -> bool {
    a.iter()
        .zip(b)
        .all(|(&x, &y)| compare(x, y, tolerance) == Comparison::Dominated)
}

/// Every strategy of `player` strictly dominated by some other strategy.
///
/// Returns 0-based indices in ascending order. Empty once the game has been
/// fully reduced.
pub fn dominated_strategies(
    model: &GameModel,
    player: Player,
    config: &SolverConfig,
) -> Result<Vec<usize>, GameError> {
    let utilities = utility_vectors(model, player)?;
    Ok((0..utilities.len())
        .filter(|&a| {
            (0..utilities.len())
                .any(|b| b != a && strictly_dominated_by(&utilities[a], &utilities[b], config.tolerance))
        })
        .collect())
}

/// Remove the first strictly dominated strategy of `player`.
///
/// Ordered pairs `(a, b)` are scanned in index order; the first `a` that is
/// beaten by `b` against every opponent strategy is deleted, together with
/// the matching row or column of every payoff matrix and its strategy entry.
pub fn reduce(model: &GameModel, player: Player, config: &SolverConfig) -> Result<Reduction, GameError> {
    let utilities = utility_vectors(model, player)?;
    let n = utilities.len();

    for a in 0..n {
        for b in 0..n {
            if a == b {
                continue;
            }
            log::trace!("{} compares strategy {} against {}", player, a + 1, b + 1);
            if strictly_dominated_by(&utilities[a], &utilities[b], config.tolerance) {
                log::debug!(
                    "{} strategy {} is strictly dominated by strategy {}",
                    player,
                    a + 1,
                    b + 1
                );
                return Ok(Reduction::build(model, player, vec![a]));
            }
        }
    }
    Ok(Reduction::build(model, player, Vec::new()))
}

/// Apply [`reduce`] for both players until no strategy is dominated.
pub fn reduce_fully(model: &GameModel, config: &SolverConfig) -> Result<GameModel, GameError> {
    let mut current = model.clone();
    loop {
        let mut changed = false;
        for player in Player::both() {
            let step = reduce(&current, player, config)?;
            if step.changed() {
                current = step.model;
                changed = true;
            }
        }
        if !changed {
            return Ok(current);
        }
    }
}

/// Remove every row that is pointwise `<=` another surviving row.
///
/// Operates on `payoff` (zero-sum) or `payoff1` (general-sum). Rows are
/// visited in order, and a row only counts as a dominator while it is still
/// alive, so of two identical rows the first is removed and the second kept.
pub fn row_reduce(model: &GameModel, config: &SolverConfig) -> Result<Reduction, GameError> {
    let utilities = utility_vectors(model, Player::Row)?;
    let removed = order_reduce(&utilities, config.tolerance);
    if !removed.is_empty() {
        log::debug!("row_reduce removed rows {:?}", removed);
    }
    Ok(Reduction::build(model, Player::Row, removed))
}

/// Remove every column the column player never prefers.
///
/// For zero-sum games a column is removed when it is pointwise `>=` another
/// surviving column of `payoff` (the column player pays out less elsewhere).
/// For general-sum games a column is removed when it is pointwise `<=`
/// another surviving column of `payoff2`.
pub fn col_reduce(model: &GameModel, config: &SolverConfig) -> Result<Reduction, GameError> {
    // The column player's own matrix is the negated payoff in zero-sum games,
    // which turns ">= in payoff" into "<= in own utility".
    let utilities = utility_vectors(model, Player::Column)?;
    let removed = order_reduce(&utilities, config.tolerance);
    if !removed.is_empty() {
        log::debug!("col_reduce removed columns {:?}", removed);
    }
    Ok(Reduction::build(model, Player::Column, removed))
}

fn order_reduce(vectors: &[Vec<f64>], tolerance: f64) -> Vec<usize> {
    let mut alive = vec![true; vectors.len()];
    let mut removed = Vec::new();

    for r in 0..vectors.len() {
        if alive.iter().filter(|&&a| a).count() <= 1 {
            break;
        }
        let dominated = (0..vectors.len()).any(|other| {
            other != r
                && alive[other]
                && vectors[r]
                    .iter()
                    .zip(&vectors[other])
                    .all(|(&x, &y)| x <= y + tolerance)
        });
        if dominated {
            alive[r] = false;
            removed.push(r);
        }
    }
    removed
}
