//! Error type shared by every matrix-game operation.

use std::fmt;

use crate::matrix::model::Player;

/// Errors surfaced by game construction and analysis.
///
/// All variants are local and recoverable: they describe malformed input or
/// an operation applied to a game it does not support.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Matrix or strategy dimensions disagree.
    DimensionMismatch {
        /// What was being compared.
        context: &'static str,
        /// Expected size.
        expected: usize,
        /// Size actually found.
        actual: usize,
    },
    /// A probability lies outside `[0, 1]` or a distribution does not sum to 1.
    InvalidProbability {
        /// Player owning the distribution.
        player: Player,
        /// Description of the offending value.
        detail: String,
    },
    /// The operation requires a particular matrix shape.
    UnsupportedShape {
        /// Operation name.
        operation: &'static str,
        /// Rows found.
        rows: usize,
        /// Columns found.
        cols: usize,
    },
    /// An equilibrium was required but none exists.
    NoEquilibrium,
    /// A numeric operation met a symbolic cell.
    SymbolicValue {
        /// The expression text of the cell.
        expression: String,
    },
    /// Expression text could not be parsed.
    Parse {
        /// The input being parsed.
        input: String,
        /// Why parsing failed.
        reason: String,
    },
    /// A closed-form computation would divide by zero.
    Degenerate(&'static str),
    /// Reading a game file failed.
    Io(String),
    /// A game file was not valid JSON for the expected schema.
    Json(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::DimensionMismatch {
                context,
                expected,
                actual,
            } => write!(
                f,
                "Dimension mismatch in {}: expected {}, got {}",
                context, expected, actual
            ),
            GameError::InvalidProbability { player, detail } => {
                write!(f, "Invalid probability for {}: {}", player, detail)
            }
            GameError::UnsupportedShape {
                operation,
                rows,
                cols,
            } => write!(
                f,
                "{} does not support a {}x{} payoff matrix",
                operation, rows, cols
            ),
            GameError::NoEquilibrium => write!(f, "No pure strategy equilibrium"),
            GameError::SymbolicValue { expression } => {
                write!(f, "Expected a number, found expression '{}'", expression)
            }
            GameError::Parse { input, reason } => {
                write!(f, "Cannot parse '{}': {}", input, reason)
            }
            GameError::Degenerate(what) => write!(f, "Degenerate game: {}", what),
            GameError::Io(e) => write!(f, "IO error: {}", e),
            GameError::Json(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for GameError {}
