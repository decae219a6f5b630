//! Pure-strategy outcomes and the maps keyed by them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::matrix::error::GameError;
use crate::matrix::model::{GameModel, Player};

/// A pure-strategy profile: 0-based row and column.
///
/// Displays and serializes as `"row,col"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Row player's strategy (0-based).
    pub row: usize,
    /// Column player's strategy (0-based).
    pub col: usize,
}

impl Coordinate {
    /// Create a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The `"row,col"` key.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Payoff pair `(u1, u2)` at a coordinate.
pub type PayoffPair = (f64, f64);

/// Coordinates mapped to their payoff pairs, ordered by coordinate.
pub type OutcomeMap = BTreeMap<Coordinate, PayoffPair>;

/// Both players' numeric payoff matrices, `(player 1, player 2)`.
pub(crate) fn numeric_pair(model: &GameModel) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>), GameError> {
    Ok((
        model.numeric_matrix(Player::Row)?,
        model.numeric_matrix(Player::Column)?,
    ))
}
