//! Native symbolic algebra for mixed-strategy payoff equations.
//!
//! Expressions are held as polynomials in sum-of-products normal form, which
//! is all the bilinear payoff sums of a matrix game need: substitution,
//! like-term collection and first derivatives.
//!
//! # Example
//!
//! ```
//! use bimatrix_solver::matrix::GameModel;
//! use bimatrix_solver::symbolic::{mixed, solve};
//!
//! let game = GameModel::zero_sum(vec![vec![5, -2], vec![1, 4]]).unwrap();
//! let equations = mixed(&game).unwrap();
//! assert_eq!(equations[0].derivative.to_string(), "10*q - 6");
//!
//! let solution = solve(&equations).unwrap();
//! assert!((solution.p - 0.3).abs() < 1e-12);
//! ```

pub mod mixed;
pub mod parser;
pub mod polynomial;

pub use mixed::{mixed, solve, solve_mixed, MixedEquation, MixedSolution};
pub use parser::{parse, parse_cell};
pub use polynomial::{Monomial, Polynomial};
