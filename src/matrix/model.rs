//! Game model: payoff matrices plus each player's strategy probabilities.
//!
//! A [`GameModel`] is an immutable snapshot. The dominance reducer is the only
//! component that produces a smaller model, and it does so by returning a new
//! value rather than mutating the original.
//!
//! Two payoff conventions are supported:
//!
//! - **Zero-sum**: a single matrix; the row player's gain is the column
//!   player's loss, so player 2's matrix is the negation of `payoff`.
//! - **General-sum**: one matrix per player, both with identical dimensions.
//!
//! Strategy maps are keyed by 1-based strategy index, so `strategy[1]` is the
//! probability of row 0 (for player 1) or column 0 (for player 2).

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::matrix::config::SolverConfig;
use crate::matrix::error::GameError;
use crate::matrix::value::Cell;

/// A payoff grid, row-major.
pub type Matrix = Vec<Vec<Cell>>;

/// Strategy probabilities keyed by 1-based strategy index.
pub type StrategyMap = BTreeMap<usize, Cell>;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Player 1, choosing rows.
    Row,
    /// Player 2, choosing columns.
    Column,
}

impl Player {
    /// Both players in order.
    pub fn both() -> [Player; 2] {
        [Player::Row, Player::Column]
    }

    /// 0-based player index.
    pub fn index(self) -> usize {
        match self {
            Player::Row => 0,
            Player::Column => 1,
        }
    }

    /// The other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::Row => Player::Column,
            Player::Column => Player::Row,
        }
    }

    /// Name of the free probability variable used in symbolic payoffs.
    pub fn variable(self) -> &'static str {
        match self {
            Player::Row => "p",
            Player::Column => "q",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Row => write!(f, "player 1"),
            Player::Column => write!(f, "player 2"),
        }
    }
}

/// Payoff data under one of the two conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payoffs {
    /// Single matrix, row player's gain equals column player's loss.
    ZeroSum(Matrix),
    /// One matrix per player.
    GeneralSum {
        /// Row player's payoffs.
        payoff1: Matrix,
        /// Column player's payoffs.
        payoff2: Matrix,
    },
}

impl Payoffs {
    fn dims(&self) -> (usize, usize) {
        let m = match self {
            Payoffs::ZeroSum(m) => m,
            Payoffs::GeneralSum { payoff1, .. } => payoff1,
        };
        (m.len(), m.first().map_or(0, |r| r.len()))
    }
}

/// A finite two-player matrix game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameModel {
    payoffs: Payoffs,
    strategies: [StrategyMap; 2],
}

impl Default for GameModel {
    /// Matching pennies with both players mixing 50/50.
    fn default() -> Self {
        let payoff = vec![
            vec![Cell::Numeric(1.0), Cell::Numeric(-1.0)],
            vec![Cell::Numeric(-1.0), Cell::Numeric(1.0)],
        ];
        Self {
            payoffs: Payoffs::ZeroSum(payoff),
            strategies: [uniform(2), uniform(2)],
        }
    }
}

impl GameModel {
    /// Create a zero-sum game. Both players start with uniform strategies.
    pub fn zero_sum<T: Into<Cell>>(payoff: Vec<Vec<T>>) -> Result<Self, GameError> {
        Self::from_payoffs(Payoffs::ZeroSum(into_matrix(payoff)))
    }

    /// Create a general-sum game from one matrix per player.
    ///
    /// # Errors
    /// `DimensionMismatch` if the matrices are ragged or differ in shape.
    pub fn general_sum<T: Into<Cell>, U: Into<Cell>>(
        payoff1: Vec<Vec<T>>,
        payoff2: Vec<Vec<U>>,
    ) -> Result<Self, GameError> {
        Self::from_payoffs(Payoffs::GeneralSum {
            payoff1: into_matrix(payoff1),
            payoff2: into_matrix(payoff2),
        })
    }

    /// Create a game from payoff data with uniform strategies.
    pub fn from_payoffs(payoffs: Payoffs) -> Result<Self, GameError> {
        match &payoffs {
            Payoffs::ZeroSum(m) => {
                check_rectangular(m, "payoff")?;
            }
            Payoffs::GeneralSum { payoff1, payoff2 } => {
                check_rectangular(payoff1, "payoff1")?;
                check_rectangular(payoff2, "payoff2")?;
                if payoff1.len() != payoff2.len() {
                    return Err(GameError::DimensionMismatch {
                        context: "payoff2 rows",
                        expected: payoff1.len(),
                        actual: payoff2.len(),
                    });
                }
                if payoff1[0].len() != payoff2[0].len() {
                    return Err(GameError::DimensionMismatch {
                        context: "payoff2 columns",
                        expected: payoff1[0].len(),
                        actual: payoff2[0].len(),
                    });
                }
            }
        }
        let (rows, cols) = payoffs.dims();
        Ok(Self {
            payoffs,
            strategies: [uniform(rows), uniform(cols)],
        })
    }

    /// Replace a player's strategy with the given probabilities (strategy 1 first).
    ///
    /// # Errors
    /// `DimensionMismatch` if the length differs from the player's strategy count.
    pub fn with_strategy<T: Into<Cell>>(
        self,
        player: Player,
        probabilities: Vec<T>,
    ) -> Result<Self, GameError> {
        let map = probabilities
            .into_iter()
            .enumerate()
            .map(|(i, p)| (i + 1, p.into()))
            .collect();
        self.with_strategy_map(player, map)
    }

    /// Replace a player's strategy map. Keys must be exactly `1..=n`.
    pub fn with_strategy_map(mut self, player: Player, map: StrategyMap) -> Result<Self, GameError> {
        let expected = self.strategy_count(player);
        if map.len() != expected {
            return Err(GameError::DimensionMismatch {
                context: match player {
                    Player::Row => "player 1 strategies vs payoff rows",
                    Player::Column => "player 2 strategies vs payoff columns",
                },
                expected,
                actual: map.len(),
            });
        }
        if let Some(&bad) = map.keys().find(|&&k| k == 0 || k > expected) {
            return Err(GameError::DimensionMismatch {
                context: "strategy index",
                expected,
                actual: bad,
            });
        }
        let map = map.into_iter().map(|(k, v)| (k, v.normalize())).collect();
        self.strategies[player.index()] = map;
        Ok(self)
    }

    /// Payoff data.
    pub fn payoffs(&self) -> &Payoffs {
        &self.payoffs
    }

    /// Whether the game uses the single-matrix zero-sum convention.
    pub fn is_zero_sum(&self) -> bool {
        matches!(self.payoffs, Payoffs::ZeroSum(_))
    }

    /// Number of rows (player 1's strategies).
    pub fn rows(&self) -> usize {
        self.payoffs.dims().0
    }

    /// Number of columns (player 2's strategies).
    pub fn cols(&self) -> usize {
        self.payoffs.dims().1
    }

    /// Number of pure strategies available to a player.
    pub fn strategy_count(&self, player: Player) -> usize {
        match player {
            Player::Row => self.rows(),
            Player::Column => self.cols(),
        }
    }

    /// A player's strategy map.
    pub fn strategy(&self, player: Player) -> &StrategyMap {
        &self.strategies[player.index()]
    }

    /// The row player's matrix (`payoff` or `payoff1`).
    pub fn primary_matrix(&self) -> &Matrix {
        match &self.payoffs {
            Payoffs::ZeroSum(m) => m,
            Payoffs::GeneralSum { payoff1, .. } => payoff1,
        }
    }

    /// A player's own payoff matrix, as cells.
    ///
    /// For zero-sum games the column player's matrix is the negated payoff;
    /// symbolic cells are wrapped as `-(expr)`.
    pub fn payoff_matrix(&self, player: Player) -> Matrix {
        match (&self.payoffs, player) {
            (Payoffs::ZeroSum(m), Player::Row) => m.clone(),
            (Payoffs::ZeroSum(m), Player::Column) => m
                .iter()
                .map(|row| row.iter().map(negate).collect())
                .collect(),
            (Payoffs::GeneralSum { payoff1, .. }, Player::Row) => payoff1.clone(),
            (Payoffs::GeneralSum { payoff2, .. }, Player::Column) => payoff2.clone(),
        }
    }

    /// A player's own payoff matrix as numbers.
    ///
    /// # Errors
    /// `SymbolicValue` if any cell is an expression.
    pub fn numeric_matrix(&self, player: Player) -> Result<Vec<Vec<f64>>, GameError> {
        to_numeric(&self.payoff_matrix(player))
    }

    /// The row player's matrix as numbers (`payoff` or `payoff1`).
    pub fn numeric_primary(&self) -> Result<Vec<Vec<f64>>, GameError> {
        to_numeric(self.primary_matrix())
    }

    /// A player's probabilities in strategy order.
    pub fn numeric_strategy(&self, player: Player) -> Result<Vec<f64>, GameError> {
        self.strategy(player).values().map(Cell::as_f64).collect()
    }

    /// Check that a player's probabilities form a distribution.
    ///
    /// Every entry must lie in `[0, 1]` and the entries must sum to 1 within
    /// `tolerance`.
    pub fn validate_distribution(&self, player: Player, tolerance: f64) -> Result<(), GameError> {
        let probs = self.numeric_strategy(player)?;
        for (i, &p) in probs.iter().enumerate() {
            if !(-tolerance..=1.0 + tolerance).contains(&p) {
                return Err(GameError::InvalidProbability {
                    player,
                    detail: format!("strategy {} has probability {}", i + 1, p),
                });
            }
        }
        let sum: f64 = probs.iter().sum();
        if (sum - 1.0).abs() > tolerance {
            return Err(GameError::InvalidProbability {
                player,
                detail: format!("probabilities sum to {}", sum),
            });
        }
        Ok(())
    }

    /// Copy of this game with the given rows and columns deleted (0-based).
    ///
    /// Strategy maps lose the matching entries and are renumbered so that
    /// keys stay contiguous from 1.
    pub(crate) fn without(&self, rows: &[usize], cols: &[usize]) -> Self {
        let strip = |m: &Matrix| -> Matrix {
            m.iter()
                .enumerate()
                .filter(|(i, _)| !rows.contains(i))
                .map(|(_, row)| {
                    row.iter()
                        .enumerate()
                        .filter(|(j, _)| !cols.contains(j))
                        .map(|(_, c)| c.clone())
                        .collect()
                })
                .collect()
        };
        let payoffs = match &self.payoffs {
            Payoffs::ZeroSum(m) => Payoffs::ZeroSum(strip(m)),
            Payoffs::GeneralSum { payoff1, payoff2 } => Payoffs::GeneralSum {
                payoff1: strip(payoff1),
                payoff2: strip(payoff2),
            },
        };
        let renumber = |map: &StrategyMap, removed: &[usize]| -> StrategyMap {
            map.iter()
                .filter(|(k, _)| !removed.contains(&(**k - 1)))
                .enumerate()
                .map(|(i, (_, v))| (i + 1, v.clone()))
                .collect()
        };
        Self {
            payoffs,
            strategies: [
                renumber(&self.strategies[0], rows),
                renumber(&self.strategies[1], cols),
            ],
        }
    }
}

/// A game as stored in a JSON file.
///
/// ```json
/// {
///   "name": "prisoner's dilemma",
///   "payoff1": [[3, 0], [5, 1]],
///   "payoff2": [[3, 5], [0, 1]],
///   "strategy": [{"1": 0.5, "2": 0.5}, {"1": "q", "2": "1 - q"}]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameFile {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Zero-sum payoff matrix.
    #[serde(default)]
    pub payoff: Option<Matrix>,
    /// Row player's general-sum matrix.
    #[serde(default)]
    pub payoff1: Option<Matrix>,
    /// Column player's general-sum matrix.
    #[serde(default)]
    pub payoff2: Option<Matrix>,
    /// Strategy maps for player 1 and player 2.
    #[serde(default)]
    pub strategy: Option<Vec<StrategyMap>>,
    /// Analysis settings.
    #[serde(default)]
    pub config: SolverConfig,
}

impl GameFile {
    /// Load a game from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GameError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse a game from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(|e| GameError::Json(e.to_string()))
    }

    /// Build the validated game model.
    ///
    /// Missing payoffs default to matching pennies; missing strategies
    /// default to uniform.
    pub fn to_model(&self) -> Result<GameModel, GameError> {
        let mut model = match (&self.payoff, &self.payoff1, &self.payoff2) {
            (Some(m), _, _) => GameModel::from_payoffs(Payoffs::ZeroSum(normalized(m)))?,
            (None, Some(p1), Some(p2)) => GameModel::from_payoffs(Payoffs::GeneralSum {
                payoff1: normalized(p1),
                payoff2: normalized(p2),
            })?,
            (None, None, None) => GameModel::default(),
            _ => {
                return Err(GameError::Json(
                    "payoff1 and payoff2 must be given together".to_string(),
                ))
            }
        };
        if let Some(strategies) = &self.strategy {
            if strategies.len() != 2 {
                return Err(GameError::DimensionMismatch {
                    context: "strategy maps",
                    expected: 2,
                    actual: strategies.len(),
                });
            }
            for player in Player::both() {
                model = model.with_strategy_map(player, strategies[player.index()].clone())?;
            }
        }
        self.config.validate().map_err(|e| GameError::Json(e.to_string()))?;
        Ok(model)
    }
}

fn uniform(n: usize) -> StrategyMap {
    (1..=n).map(|k| (k, Cell::Numeric(1.0 / n as f64))).collect()
}

fn into_matrix<T: Into<Cell>>(m: Vec<Vec<T>>) -> Matrix {
    m.into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}

fn normalized(m: &Matrix) -> Matrix {
    m.iter()
        .map(|row| row.iter().cloned().map(Cell::normalize).collect())
        .collect()
}

fn negate(cell: &Cell) -> Cell {
    match cell {
        Cell::Numeric(v) => Cell::Numeric(-v),
        Cell::Symbolic(expr) => Cell::Symbolic(format!("-({})", expr)),
    }
}

fn to_numeric(m: &Matrix) -> Result<Vec<Vec<f64>>, GameError> {
    m.iter()
        .map(|row| row.iter().map(Cell::as_f64).collect())
        .collect()
}

fn check_rectangular(m: &Matrix, context: &'static str) -> Result<(), GameError> {
    let cols = match m.first() {
        Some(row) if !row.is_empty() => row.len(),
        _ => {
            return Err(GameError::UnsupportedShape {
                operation: "game construction",
                rows: m.len(),
                cols: 0,
            })
        }
    };
    for row in m {
        if row.len() != cols {
            return Err(GameError::DimensionMismatch {
                context,
                expected: cols,
                actual: row.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_matching_pennies() {
        let game = GameModel::default();
        assert!(game.is_zero_sum());
        assert_eq!(game.numeric_primary().unwrap(), vec![vec![1.0, -1.0], vec![-1.0, 1.0]]);
        assert_eq!(game.numeric_strategy(Player::Row).unwrap(), vec![0.5, 0.5]);
        assert_eq!(game.numeric_strategy(Player::Column).unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_uniform_default_follows_dimensions() {
        let game = GameModel::zero_sum(vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]]).unwrap();
        assert_eq!(game.strategy(Player::Row).len(), 2);
        assert_eq!(game.numeric_strategy(Player::Column).unwrap(), vec![0.25; 4]);
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let err = GameModel::zero_sum(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, GameError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_general_sum_shapes_must_match() {
        let err = GameModel::general_sum(vec![vec![1, 2]], vec![vec![1], vec![2]]).unwrap_err();
        assert!(matches!(err, GameError::DimensionMismatch { context: "payoff2 rows", .. }));
    }

    #[test]
    fn test_strategy_count_must_match() {
        let err = GameModel::default()
            .with_strategy(Player::Row, vec![0.2, 0.3, 0.5])
            .unwrap_err();
        assert_eq!(
            err,
            GameError::DimensionMismatch {
                context: "player 1 strategies vs payoff rows",
                expected: 2,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_zero_sum_column_matrix_is_negated() {
        let game = GameModel::zero_sum(vec![vec![Cell::from(2), Cell::from("a")]]).unwrap();
        let column = game.payoff_matrix(Player::Column);
        assert_eq!(column[0][0], Cell::Numeric(-2.0));
        assert_eq!(column[0][1], Cell::Symbolic("-(a)".to_string()));
    }

    #[test]
    fn test_validate_distribution() {
        let game = GameModel::default()
            .with_strategy(Player::Row, vec![0.7, 0.4])
            .unwrap()
            .with_strategy(Player::Column, vec![1.2, -0.2])
            .unwrap();
        assert!(matches!(
            game.validate_distribution(Player::Row, 1e-9),
            Err(GameError::InvalidProbability { player: Player::Row, .. })
        ));
        assert!(matches!(
            game.validate_distribution(Player::Column, 1e-9),
            Err(GameError::InvalidProbability { player: Player::Column, .. })
        ));
        assert!(GameModel::default().validate_distribution(Player::Row, 1e-9).is_ok());
    }

    #[test]
    fn test_without_renumbers_strategies() {
        let game = GameModel::zero_sum(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])
            .unwrap()
            .with_strategy(Player::Row, vec![0.1, 0.2, 0.7])
            .unwrap();
        let smaller = game.without(&[0], &[1]);
        assert_eq!(smaller.numeric_primary().unwrap(), vec![vec![4.0, 6.0], vec![7.0, 9.0]]);
        let keys: Vec<usize> = smaller.strategy(Player::Row).keys().copied().collect();
        assert_eq!(keys, vec![1, 2]);
        assert_eq!(smaller.numeric_strategy(Player::Row).unwrap(), vec![0.2, 0.7]);
        assert_eq!(smaller.strategy(Player::Column).len(), 2);
    }

    #[test]
    fn test_game_file_general_sum() {
        let json = r#"{
            "name": "pd",
            "payoff1": [[3, 0], [5, 1]],
            "payoff2": [[3, 5], [0, 1]],
            "strategy": [{"1": 0.5, "2": 0.5}, {"1": "q", "2": "1 - q"}]
        }"#;
        let file = GameFile::from_json_str(json).unwrap();
        let game = file.to_model().unwrap();
        assert!(!game.is_zero_sum());
        assert_eq!(game.strategy(Player::Column)[&2], Cell::Symbolic("1 - q".to_string()));
    }

    #[test]
    fn test_game_file_defaults_and_half_pairs() {
        let game = GameFile::from_json_str("{}").unwrap().to_model().unwrap();
        assert_eq!(game, GameModel::default());

        let half = GameFile::from_json_str(r#"{"payoff1": [[1]]}"#).unwrap();
        assert!(matches!(half.to_model(), Err(GameError::Json(_))));
    }
}
