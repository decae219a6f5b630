//! Classic matrix games with known solutions.
//!
//! These serve as:
//!
//! 1. **Validation**: games whose equilibria are textbook results check the
//!    analysis routines end to end.
//!
//! 2. **Examples**: ready-made inputs for the `analyze` binary
//!    (`analyze --game stag-hunt`).
//!
//! 3. **Benchmarks**: fixed inputs for the criterion benches.
//!
//! See [`classic`] for the catalogue.

pub mod classic;

pub use classic::{catalogue, find, ClassicGame};
