//! Catalogue of classic two-player games.
//!
//! | Game                  | Pure Nash        | Mixed (p, q)   |
//! |-----------------------|------------------|----------------|
//! | Prisoner's dilemma    | (defect, defect) | none           |
//! | Matching pennies      | none             | (1/2, 1/2)     |
//! | Battle of the sexes   | both coordinated | (3/5, 2/5)     |
//! | Stag hunt             | both coordinated | (1/2, 1/2)     |
//! | Chicken               | both asymmetric  | (9/10, 9/10)   |
//! | Rock-paper-scissors   | none             | uniform        |
//!
//! Payoffs are `[row][col]`; strategy 1 is listed first in each name.

use crate::matrix::error::GameError;
use crate::matrix::model::GameModel;

/// A named game with fixed payoffs.
#[derive(Debug, Clone, Copy)]
pub struct ClassicGame {
    /// Identifier accepted by [`find`].
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    payoff1: &'static [&'static [f64]],
    /// `None` for zero-sum games.
    payoff2: Option<&'static [&'static [f64]]>,
}

fn owned(m: &[&[f64]]) -> Vec<Vec<f64>> {
    m.iter().map(|row| row.to_vec()).collect()
}

impl ClassicGame {
    /// Build the game model with uniform strategies.
    pub fn model(&self) -> Result<GameModel, GameError> {
        match self.payoff2 {
            Some(p2) => GameModel::general_sum(owned(self.payoff1), owned(p2)),
            None => GameModel::zero_sum(owned(self.payoff1)),
        }
    }

    /// Whether the game is zero-sum.
    pub fn is_zero_sum(&self) -> bool {
        self.payoff2.is_none()
    }
}

/// Cooperate / defect.
pub const PRISONERS_DILEMMA: ClassicGame = ClassicGame {
    name: "prisoners-dilemma",
    description: "Cooperate or defect; defection dominates but both lose",
    payoff1: &[&[3.0, 0.0], &[5.0, 1.0]],
    payoff2: Some(&[&[3.0, 5.0], &[0.0, 1.0]]),
};

/// Heads / tails, row player wins on a match.
pub const MATCHING_PENNIES: ClassicGame = ClassicGame {
    name: "matching-pennies",
    description: "Zero-sum coin matching with no pure equilibrium",
    payoff1: &[&[1.0, -1.0], &[-1.0, 1.0]],
    payoff2: None,
};

/// Opera / football.
pub const BATTLE_OF_THE_SEXES: ClassicGame = ClassicGame {
    name: "battle-of-the-sexes",
    description: "Coordination with conflicting preferences over the meeting point",
    payoff1: &[&[3.0, 0.0], &[0.0, 2.0]],
    payoff2: Some(&[&[2.0, 0.0], &[0.0, 3.0]]),
};

/// Stag / hare.
pub const STAG_HUNT: ClassicGame = ClassicGame {
    name: "stag-hunt",
    description: "Risky cooperation versus a safe solo payoff",
    payoff1: &[&[4.0, 0.0], &[2.0, 2.0]],
    payoff2: Some(&[&[4.0, 2.0], &[0.0, 2.0]]),
};

/// Swerve / straight.
pub const CHICKEN: ClassicGame = ClassicGame {
    name: "chicken",
    description: "Anti-coordination; whoever swerves alone loses face",
    payoff1: &[&[0.0, -1.0], &[1.0, -10.0]],
    payoff2: Some(&[&[0.0, 1.0], &[-1.0, -10.0]]),
};

/// Rock / paper / scissors.
pub const ROCK_PAPER_SCISSORS: ClassicGame = ClassicGame {
    name: "rock-paper-scissors",
    description: "Zero-sum cyclic dominance over three strategies",
    payoff1: &[&[0.0, -1.0, 1.0], &[1.0, 0.0, -1.0], &[-1.0, 1.0, 0.0]],
    payoff2: None,
};

/// Every game in the catalogue.
pub fn catalogue() -> Vec<ClassicGame> {
    vec![
        PRISONERS_DILEMMA,
        MATCHING_PENNIES,
        BATTLE_OF_THE_SEXES,
        STAG_HUNT,
        CHICKEN,
        ROCK_PAPER_SCISSORS,
    ]
}

/// Look up a game by name.
pub fn find(name: &str) -> Option<ClassicGame> {
    catalogue().into_iter().find(|g| g.name == name)
}
