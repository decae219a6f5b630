//! Polynomials in sum-of-products normal form.
//!
//! A [`Polynomial`] maps each [`Monomial`] (a product of variables raised to
//! positive integer powers) to its coefficient. Like terms are collected on
//! every operation, so two equal polynomials always have the same
//! representation and the same printed form.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use rustc_hash::FxHashMap;

use crate::matrix::error::GameError;

/// Coefficients smaller than this are treated as zero and dropped.
const COEFFICIENT_EPSILON: f64 = 1e-12;

/// Product of variables with positive integer exponents.
///
/// The empty monomial is the constant term.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(BTreeMap<String, u32>);

impl Monomial {
    /// The constant monomial `1`.
    pub fn one() -> Self {
        Self::default()
    }

    /// A single variable to the first power.
    pub fn var(name: &str) -> Self {
        let mut powers = BTreeMap::new();
        powers.insert(name.to_string(), 1);
        Self(powers)
    }

    /// Sum of exponents.
    pub fn degree(&self) -> u32 {
        self.0.values().sum()
    }

    /// Exponent of `name` (0 if absent).
    pub fn power_of(&self, name: &str) -> u32 {
        self.0.get(name).copied().unwrap_or(0)
    }

    /// This monomial with `name` removed entirely.
    fn without(&self, name: &str) -> Self {
        let mut powers = self.0.clone();
        powers.remove(name);
        Self(powers)
    }

    fn times(&self, other: &Monomial) -> Monomial {
        let mut powers = self.0.clone();
        for (name, p) in &other.0 {
            *powers.entry(name.clone()).or_insert(0) += p;
        }
        Monomial(powers)
    }

    fn with_power(&self, name: &str, power: u32) -> Monomial {
        let mut powers = self.0.clone();
        if power == 0 {
            powers.remove(name);
        } else {
            powers.insert(name.to_string(), power);
        }
        Monomial(powers)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factors: Vec<String> = self
            .0
            .iter()
            .map(|(name, &p)| {
                if p == 1 {
                    name.clone()
                } else {
                    format!("{}^{}", name, p)
                }
            })
            .collect();
        write!(f, "{}", factors.join("*"))
    }
}

/// A polynomial with real coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, f64>,
}

impl Polynomial {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A constant.
    pub fn constant(value: f64) -> Self {
        let mut p = Self::zero();
        p.add_term(Monomial::one(), value);
        p
    }

    /// A single variable.
    pub fn var(name: &str) -> Self {
        let mut p = Self::zero();
        p.add_term(Monomial::var(name), 1.0);
        p
    }

    fn add_term(&mut self, monomial: Monomial, coefficient: f64) {
        let entry = self.terms.entry(monomial).or_insert(0.0);
        *entry += coefficient;
        if entry.abs() < COEFFICIENT_EPSILON {
            self.terms.retain(|_, c| c.abs() >= COEFFICIENT_EPSILON);
        }
    }

    /// Whether this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The value if the polynomial has no variables.
    pub fn as_constant(&self) -> Option<f64> {
        match self.terms.len() {
            0 => Some(0.0),
            1 => self.terms.get(&Monomial::one()).copied(),
            _ => None,
        }
    }

    /// Highest total degree of any term (0 for constants).
    pub fn degree(&self) -> u32 {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    /// Every variable that appears.
    pub fn variables(&self) -> BTreeSet<String> {
        self.terms
            .keys()
            .flat_map(|m| m.0.keys().cloned())
            .collect()
    }

    /// Coefficient of a monomial (0 if absent).
    pub fn coefficient(&self, monomial: &Monomial) -> f64 {
        self.terms.get(monomial).copied().unwrap_or(0.0)
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        let mut out = Self::zero();
        for (m, &c) in &self.terms {
            out.add_term(m.clone(), c * factor);
        }
        out
    }

    /// Raise to a non-negative integer power.
    pub fn pow(&self, exponent: u32) -> Self {
        let mut out = Self::constant(1.0);
        for _ in 0..exponent {
            out = &out * self;
        }
        out
    }

    /// Replace every occurrence of `name` with `replacement`.
    pub fn substitute(&self, name: &str, replacement: &Polynomial) -> Self {
        let mut out = Self::zero();
        for (m, &c) in &self.terms {
            let power = m.power_of(name);
            if power == 0 {
                out.add_term(m.clone(), c);
                continue;
            }
            let rest = Polynomial {
                terms: BTreeMap::from([(m.without(name), c)]),
            };
            out = out + &rest * &replacement.pow(power);
        }
        out
    }

    /// Replace `name` with a number.
    pub fn substitute_value(&self, name: &str, value: f64) -> Self {
        self.substitute(name, &Polynomial::constant(value))
    }

    /// Rename a variable.
    pub fn rename(&self, from: &str, to: &str) -> Self {
        self.substitute(from, &Polynomial::var(to))
    }

    /// First derivative with respect to `name`.
    pub fn derivative(&self, name: &str) -> Self {
        let mut out = Self::zero();
        for (m, &c) in &self.terms {
            let power = m.power_of(name);
            if power > 0 {
                out.add_term(m.with_power(name, power - 1), c * power as f64);
            }
        }
        out
    }

    /// Evaluate with every variable bound.
    ///
    /// # Errors
    /// `SymbolicValue` naming the first unbound variable.
    pub fn evaluate(&self, bindings: &FxHashMap<String, f64>) -> Result<f64, GameError> {
        let mut total = 0.0;
        for (m, &c) in &self.terms {
            let mut product = c;
            for (name, &p) in &m.0 {
                let value = bindings.get(name).ok_or_else(|| GameError::SymbolicValue {
                    expression: name.clone(),
                })?;
                product *= value.powi(p as i32);
            }
            total += product;
        }
        Ok(total)
    }

    /// Solve `self = 0` when it is linear in exactly one variable.
    ///
    /// Returns the variable and its root, or `None` for constants, several
    /// variables, or higher degree.
    pub fn solve_linear(&self) -> Option<(String, f64)> {
        let vars = self.variables();
        if vars.len() != 1 || self.degree() != 1 {
            return None;
        }
        let name = vars.into_iter().next()?;
        let slope = self.coefficient(&Monomial::var(&name));
        let intercept = self.coefficient(&Monomial::one());
        Some((name, -intercept / slope))
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let mut ordered: Vec<(&Monomial, f64)> = self.terms.iter().map(|(m, &c)| (m, c)).collect();
        ordered.sort_by(|a, b| b.0.degree().cmp(&a.0.degree()).then_with(|| a.0.cmp(b.0)));

        for (i, (m, c)) in ordered.into_iter().enumerate() {
            let magnitude = c.abs();
            match (i, c < 0.0) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            if m.degree() == 0 {
                write!(f, "{}", magnitude)?;
            } else if magnitude == 1.0 {
                write!(f, "{}", m)?;
            } else {
                write!(f, "{}*{}", magnitude, m)?;
            }
        }
        Ok(())
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: Polynomial) -> Polynomial {
        for (m, c) in rhs.terms {
            self.add_term(m, c);
        }
        self
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        self + (-rhs)
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut out = Polynomial::zero();
        for (a, &ca) in &self.terms {
            for (b, &cb) in &rhs.terms {
                out.add_term(a.times(b), ca * cb);
            }
        }
        out
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Polynomial {
        Polynomial::var("p")
    }

    fn q() -> Polynomial {
        Polynomial::var("q")
    }

    fn c(v: f64) -> Polynomial {
        Polynomial::constant(v)
    }

    #[test]
    fn test_like_terms_collect() {
        let expr = p() * q() * c(3.0) + p() * q() * c(2.0) - q() + c(1.0) - c(1.0);
        assert_eq!(expr.to_string(), "5*p*q - q");
        assert_eq!(expr.coefficient(&Monomial::var("q")), -1.0);
    }

    #[test]
    fn test_cancellation_gives_zero() {
        let expr = p() - p();
        assert!(expr.is_zero());
        assert_eq!(expr.to_string(), "0");
        assert_eq!(expr.as_constant(), Some(0.0));
    }

    #[test]
    fn test_substitute_complement() {
        // p * (1 - q) with q := 1 - p
        let expr = p() * (c(1.0) - q());
        let substituted = expr.substitute("q", &(c(1.0) - p()));
        assert_eq!(substituted.to_string(), "p^2");
    }

    #[test]
    fn test_derivative_rules() {
        // d/dp (3p^2 q + 2p - 7) = 6pq + 2
        let expr = p().pow(2) * q() * c(3.0) + p() * c(2.0) - c(7.0);
        assert_eq!(expr.derivative("p").to_string(), "6*p*q + 2");
        assert!(expr.derivative("r").is_zero());
    }

    #[test]
    fn test_evaluate_and_unbound() {
        let expr = p() * q() * c(2.0) + c(1.0);
        let mut bindings = FxHashMap::default();
        bindings.insert("p".to_string(), 0.5);
        assert_eq!(
            expr.evaluate(&bindings),
            Err(GameError::SymbolicValue {
                expression: "q".to_string()
            })
        );
        bindings.insert("q".to_string(), 3.0);
        assert_eq!(expr.evaluate(&bindings).unwrap(), 4.0);
    }

    #[test]
    fn test_solve_linear() {
        let expr = q() * c(10.0) - c(6.0);
        let (name, root) = expr.solve_linear().unwrap();
        assert_eq!(name, "q");
        assert!((root - 0.6).abs() < 1e-12);

        assert!(c(4.0).solve_linear().is_none());
        assert!((p() + q()).solve_linear().is_none());
        assert!(p().pow(2).solve_linear().is_none());
    }

    #[test]
    fn test_display_ordering() {
        let expr = c(2.0) - p() + p() * q() * c(-4.0) + q() * c(0.5);
        assert_eq!(expr.to_string(), "-4*p*q - p + 0.5*q + 2");
    }
}
