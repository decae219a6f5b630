//! Equilibrium search over pure and 2x2 mixed strategies.
//!
//! - [`saddlepoint`]: every entry that is both its row minimum and its
//!   column maximum (zero-sum convention on `payoff`/`payoff1`).
//! - [`nash`]: every pure profile where each player is best-responding.
//! - [`oddments`]: closed-form mixed equilibrium of a 2x2 game.
//! - [`mm_tally`]: each player's security strategy and guaranteed value.
//!
//! Searches enumerate all qualifying coordinates; ties are common and the
//! pure equilibrium is not unique in general. "Nothing found" is `Ok(None)`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::matrix::config::SolverConfig;
use crate::matrix::error::GameError;
use crate::matrix::model::{GameModel, Player};
use crate::matrix::outcome::{numeric_pair, Coordinate, OutcomeMap};

/// Saddlepoint coordinates mapped to their payoff value.
pub type Saddlepoints = BTreeMap<Coordinate, f64>;

/// Find every saddlepoint of the row player's matrix.
///
/// A coordinate qualifies when its value equals its row's minimum and also
/// its column's maximum.
pub fn saddlepoint(model: &GameModel, config: &SolverConfig) -> Result<Option<Saddlepoints>, GameError> {
    let m = model.numeric_primary()?;
    let col_max: Vec<f64> = (0..model.cols())
        .map(|j| m.iter().map(|row| row[j]).fold(f64::NEG_INFINITY, f64::max))
        .collect();

    let mut found = Saddlepoints::new();
    for (i, row) in m.iter().enumerate() {
        let row_min = row.iter().copied().fold(f64::INFINITY, f64::min);
        for (j, &value) in row.iter().enumerate() {
            if config.tied(value, row_min) && config.tied(value, col_max[j]) {
                found.insert(Coordinate::new(i, j), value);
            }
        }
    }

    log::debug!("saddlepoint search found {} coordinate(s)", found.len());
    Ok(if found.is_empty() { None } else { Some(found) })
}

/// Indices whose value ties the maximum of `values`.
fn argmax_set(values: impl Iterator<Item = f64> + Clone, config: &SolverConfig) -> Vec<usize> {
    let best = values.clone().fold(f64::NEG_INFINITY, f64::max);
    values
        .enumerate()
        .filter(|&(_, v)| config.tied(v, best))
        .map(|(i, _)| i)
        .collect()
}

/// Find every pure-strategy Nash equilibrium.
///
/// Player 1's best responses to column `j` are the rows maximizing
/// `payoff1[.][j]`; player 2's best responses to row `i` are the columns
/// maximizing `payoff2[i][.]`. A coordinate `(i, j)` is an equilibrium when
/// each strategy is a best response to the other. Zero-sum games use the
/// negated payoff for player 2.
///
/// Returns `Ok(None)` when the game has no pure equilibrium.
pub fn nash(model: &GameModel, config: &SolverConfig) -> Result<Option<OutcomeMap>, GameError> {
    let (m1, m2) = numeric_pair(model)?;
    let (rows, cols) = (model.rows(), model.cols());

    let row_best: Vec<Vec<usize>> = (0..cols)
        .map(|j| argmax_set(m1.iter().map(move |row| row[j]), config))
        .collect();
    let col_best: Vec<Vec<usize>> = (0..rows)
        .map(|i| argmax_set(m2[i].iter().copied(), config))
        .collect();

    let mut found = OutcomeMap::new();
    for i in 0..rows {
        for &j in &col_best[i] {
            if row_best[j].contains(&i) {
                found.insert(Coordinate::new(i, j), (m1[i][j], m2[i][j]));
            }
        }
    }

    log::debug!("nash search found {} pure equilibrium(s)", found.len());
    Ok(if found.is_empty() { None } else { Some(found) })
}

/// Mixing weights from the four entries of a 2x2 matrix.
fn oddments_of(a: f64, b: f64, c: f64, d: f64) -> Result<[f64; 2], GameError> {
    let (mut x, mut y) = (d - c, a - b);
    if x < 0.0 || y < 0.0 {
        x = c - d;
        y = b - a;
    }
    let total = x + y;
    if total == 0.0 {
        return Err(GameError::Degenerate("oddments differences sum to zero"));
    }
    Ok([x / total, y / total])
}

/// Closed-form mixed equilibrium of a 2x2 game without a saddlepoint.
///
/// With entries `A B` / `C D`, player 1 plays `x/(x+y)`, `y/(x+y)` where
/// `x = D - C` and `y = A - B` (swapped to `C - D`, `B - A` if either is
/// negative); player 2's weights use the transposed entries. Zero-sum games
/// read both players' weights from `payoff`. General-sum games take player
/// 1's weights from `payoff2` and player 2's from `payoff1`, since each
/// player mixes to make the other indifferent.
///
/// # Errors
/// `UnsupportedShape` unless the matrix is exactly 2x2; `Degenerate` if the
/// differences cancel.
pub fn oddments(model: &GameModel) -> Result<[[f64; 2]; 2], GameError> {
    if model.rows() != 2 || model.cols() != 2 {
        return Err(GameError::UnsupportedShape {
            operation: "oddments",
            rows: model.rows(),
            cols: model.cols(),
        });
    }
    let (m1, m2) = if model.is_zero_sum() {
        let m = model.numeric_primary()?;
        (m.clone(), m)
    } else {
        numeric_pair(model)?
    };

    let p1 = oddments_of(m2[0][0], m2[0][1], m2[1][0], m2[1][1])?;
    let p2 = oddments_of(m1[0][0], m1[1][0], m1[0][1], m1[1][1])?;
    Ok([p1, p2])
}

/// A player's security (maximin or minimax) choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Security {
    /// One-hot probability vector selecting the pure strategy.
    pub strategy: Vec<f64>,
    /// 0-based index of the chosen strategy.
    pub index: usize,
    /// Value the strategy guarantees.
    pub value: f64,
}

impl Security {
    fn new(index: usize, len: usize, value: f64) -> Self {
        let mut strategy = vec![0.0; len];
        strategy[index] = 1.0;
        Self {
            strategy,
            index,
            value,
        }
    }
}

/// Security strategies for both players.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tally {
    /// Player 1's maximin choice.
    pub row: Security,
    /// Player 2's minimax (zero-sum) or maximin (general-sum) choice.
    pub column: Security,
}

impl Tally {
    /// The entry for a player.
    pub fn get(&self, player: Player) -> &Security {
        match player {
            Player::Row => &self.row,
            Player::Column => &self.column,
        }
    }
}

/// First index with the best score; later indices must beat it strictly.
fn pick(scores: &[f64], better: impl Fn(f64, f64) -> bool, config: &SolverConfig) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if better(s, scores[best]) && !config.tied(s, scores[best]) {
            best = i;
        }
    }
    best
}

/// Maximin for the row player, minimax for the column player.
///
/// Zero-sum: the row player picks the row with the largest minimum, the
/// column player the column with the smallest maximum of `payoff`.
/// General-sum: each player picks the strategy with the largest minimum of
/// their own matrix. Ties go to the lowest index.
pub fn mm_tally(model: &GameModel, config: &SolverConfig) -> Result<Tally, GameError> {
    let (rows, cols) = (model.rows(), model.cols());
    let m1 = model.numeric_matrix(Player::Row)?;

    let row_mins: Vec<f64> = m1
        .iter()
        .map(|row| row.iter().copied().fold(f64::INFINITY, f64::min))
        .collect();
    let r = pick(&row_mins, |a, b| a > b, config);
    let row = Security::new(r, rows, row_mins[r]);

    let column = if model.is_zero_sum() {
        let col_maxes: Vec<f64> = (0..cols)
            .map(|j| m1.iter().map(|row| row[j]).fold(f64::NEG_INFINITY, f64::max))
            .collect();
        let c = pick(&col_maxes, |a, b| a < b, config);
        Security::new(c, cols, col_maxes[c])
    } else {
        let m2 = model.numeric_matrix(Player::Column)?;
        let col_mins: Vec<f64> = (0..cols)
            .map(|j| m2.iter().map(|row| row[j]).fold(f64::INFINITY, f64::min))
            .collect();
        let c = pick(&col_mins, |a, b| a > b, config);
        Security::new(c, cols, col_mins[c])
    };

    log::debug!(
        "mm_tally: row strategy {} value {}, column strategy {} value {}",
        row.index + 1,
        row.value,
        column.index + 1,
        column.value
    );
    Ok(Tally { row, column })
}
