//! Payoff and probability cells.
//!
//! A cell is either a plain number or an algebraic expression kept as text
//! (for example `"1 - p"`). Numeric operations reject symbolic cells with
//! [`GameError::SymbolicValue`]; the symbolic evaluator accepts both.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matrix::error::GameError;

/// A payoff entry or a strategy probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A concrete number.
    Numeric(f64),
    /// An unevaluated algebraic expression.
    Symbolic(String),
}

impl Cell {
    /// Numeric value of the cell, or an error for symbolic cells.
    pub fn as_f64(&self) -> Result<f64, GameError> {
        match self {
            Cell::Numeric(v) => Ok(*v),
            Cell::Symbolic(expr) => Err(GameError::SymbolicValue {
                expression: expr.clone(),
            }),
        }
    }

    /// Whether the cell holds a number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Numeric(_))
    }

    /// Collapse symbolic cells whose text is just a number into numeric ones.
    pub fn normalize(self) -> Self {
        match self {
            Cell::Symbolic(expr) => match expr.trim().parse::<f64>() {
                Ok(v) => Cell::Numeric(v),
                Err(_) => Cell::Symbolic(expr),
            },
            numeric => numeric,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Numeric(0.0)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Numeric(v) => write!(f, "{}", v),
            Cell::Symbolic(expr) => write!(f, "{}", expr),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Numeric(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Numeric(v as f64)
    }
}

impl From<&str> for Cell {
    fn from(expr: &str) -> Self {
        Cell::Symbolic(expr.to_string()).normalize()
    }
}

impl From<String> for Cell {
    fn from(expr: String) -> Self {
        Cell::Symbolic(expr).normalize()
    }
}
