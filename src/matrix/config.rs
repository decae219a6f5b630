//! Configuration options for matrix-game analysis.
//!
//! The engine's algorithms are exact apart from floating-point comparisons,
//! so the settings here control tie detection, probability validation and
//! the random source used when sampling a single round of play.

use serde::{Deserialize, Serialize};

/// Configuration for the analysis routines.
///
/// # Example
/// ```
/// use bimatrix_solver::matrix::SolverConfig;
///
/// let config = SolverConfig::default().with_seed(7);
/// assert!(config.check_probabilities);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Absolute tolerance for treating two payoffs as tied.
    ///
    /// Applies to best-response sets, saddlepoint detection, maximin ties
    /// and the "probabilities sum to 1" check.
    pub tolerance: f64,

    /// Validate both players' distributions before sampling play.
    pub check_probabilities: bool,

    /// Random seed for reproducible play.
    ///
    /// If `None`, the sampler is seeded from entropy.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            check_probabilities: true,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Create a new SolverConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration requiring exact equality for ties.
    pub fn exact() -> Self {
        Self {
            tolerance: 0.0,
            ..Default::default()
        }
    }

    /// Builder method: set tie tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method: set whether distributions are validated before play.
    pub fn with_probability_checks(mut self, enable: bool) -> Self {
        self.check_probabilities = enable;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }

    /// Whether `a` and `b` are equal within tolerance.
    pub fn tied(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.tolerance
    }
}

/// Errors that can occur when validating the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Tolerance is negative or not finite.
    InvalidTolerance(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidTolerance(val) => {
                write!(f, "Tolerance {} must be finite and non-negative", val)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
