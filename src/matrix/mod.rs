//! Finite two-player matrix games.
//!
//! This module holds the game model and every numeric analysis over it:
//! expected payoffs, dominated-strategy elimination, equilibrium search and
//! Pareto filtering.
//!
//! # Overview
//!
//! A [`GameModel`] is built once from payoff data and optional strategy
//! probabilities. Every other component is a function over a model:
//!
//! - [`payoff`]: expected payoff (numeric and as an unevaluated expression),
//!   pure-reply audit, and single-round sampling.
//! - [`dominance`]: strict-dominance `reduce` and ordering-based
//!   `row_reduce`/`col_reduce`, each returning a smaller model.
//! - [`equilibrium`]: saddlepoints, pure Nash equilibria, 2x2 oddments and
//!   the maximin/minimax tally.
//! - [`pareto`]: non-dominated outcomes.
//!
//! # Example
//!
//! ```
//! use bimatrix_solver::matrix::{nash, Coordinate, GameModel, SolverConfig};
//!
//! // Prisoner's dilemma
//! let game = GameModel::general_sum(
//!     vec![vec![3, 0], vec![5, 1]],
//!     vec![vec![3, 5], vec![0, 1]],
//! ).unwrap();
//!
//! let equilibria = nash(&game, &SolverConfig::default()).unwrap().unwrap();
//! assert_eq!(equilibria[&Coordinate::new(1, 1)], (1.0, 1.0));
//! ```
//!
//! # Conventions
//!
//! - Result maps are keyed by 0-based [`Coordinate`]s, displayed `"row,col"`.
//! - Strategy maps are keyed by 1-based strategy index.
//! - In zero-sum games player 2's payoff is the negated `payoff`.

pub mod config;
pub mod dominance;
pub mod equilibrium;
pub mod error;
pub mod model;
pub mod outcome;
pub mod pareto;
pub mod payoff;
pub mod report;
pub mod value;

pub use config::{ConfigError, SolverConfig};
pub use dominance::{col_reduce, dominated_strategies, reduce, reduce_fully, row_reduce, Reduction};
pub use equilibrium::{mm_tally, nash, oddments, saddlepoint, Saddlepoints, Security, Tally};
pub use error::GameError;
pub use model::{GameFile, GameModel, Matrix, Payoffs, Player, StrategyMap};
pub use outcome::{Coordinate, OutcomeMap, PayoffPair};
pub use pareto::{pareto_dominates, pareto_optimal};
pub use payoff::{
    counter_strategy, expected_payoff, expected_payoffs, play, play_seeded, s_expected_payoff,
    s_expected_payoff_for, Play,
};
pub use report::Analysis;
pub use value::Cell;
