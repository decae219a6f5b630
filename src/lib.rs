//! # Bimatrix Solver
//!
//! Analysis of finite two-player games in normal form.
//!
//! ## Features
//!
//! - **Zero-sum and general-sum games**: one payoff matrix or a pair
//! - **Symbolic payoffs**: cells may hold expressions such as `"a + 1"`
//! - **Dominance elimination**: strict and ordering-based reductions
//! - **Equilibria**: saddlepoints, pure Nash, 2x2 oddments, maximin tally
//! - **Mixed strategies**: first-order conditions built and solved symbolically
//!
//! ## Quick Start
//!
//! ```
//! use bimatrix_solver::matrix::{saddlepoint, GameModel, SolverConfig};
//!
//! let game = GameModel::zero_sum(vec![vec![0, -1], vec![2, 3]]).unwrap();
//! let points = saddlepoint(&game, &SolverConfig::default()).unwrap().unwrap();
//! assert_eq!(points.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: Game model and numeric analyses
//! - [`symbolic`]: Polynomial algebra and the mixed-strategy builder
//! - [`games`]: Catalogue of classic games
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          GameModel                              │
//! │  - payoff matrices (numeric or symbolic)                        │
//! │  - per-player strategy probabilities                            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ read-only
//!                               ▼
//!    ┌──────────┬───────────┬───────────────┬──────────┬──────────┐
//!    │          │           │               │          │          │
//!    ▼          ▼           ▼               ▼          ▼          ▼
//! ┌───────┐ ┌─────────┐ ┌─────────────┐ ┌────────┐ ┌───────┐ ┌────────┐
//! │Payoff │ │Dominance│ │ Equilibrium │ │ Pareto │ │ Mixed │ │  Play  │
//! └───────┘ └─────────┘ └─────────────┘ └────────┘ └───────┘ └────────┘
//!                               │
//!                               ▼
//!                        ┌────────────┐
//!                        │  Analysis  │  JSON report / summary
//!                        └────────────┘
//! ```

#![warn(missing_docs)]

/// Game model and numeric analyses.
///
/// Everything that needs concrete payoff values lives here.
pub mod matrix;

/// Symbolic polynomial algebra.
///
/// Used to build expected-payoff equations in the players' mixing variables.
pub mod symbolic;

/// Classic game implementations.
///
/// Known equilibria make these useful for validation and benchmarks.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use matrix::{Analysis, Cell, Coordinate, GameError, GameFile, GameModel, Player, SolverConfig};
pub use symbolic::{MixedSolution, Polynomial};
