//! Full analysis of a game collected into one serializable report.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use crate::matrix::config::SolverConfig;
use crate::matrix::dominance::reduce_fully;
use crate::matrix::equilibrium::{mm_tally, nash, oddments, saddlepoint, Saddlepoints, Tally};
use crate::matrix::error::GameError;
use crate::matrix::model::{GameModel, Player};
use crate::matrix::outcome::{OutcomeMap, PayoffPair};
use crate::matrix::pareto::pareto_optimal;
use crate::matrix::payoff::{counter_strategy, expected_payoffs, s_expected_payoff};
use crate::symbolic::mixed::{mixed, solve, MixedSolution};

/// Shape and payoffs of the game left after iterated strict dominance.
#[derive(Debug, Clone, Serialize)]
pub struct ReducedGame {
    /// Remaining rows.
    pub rows: usize,
    /// Remaining columns.
    pub cols: usize,
    /// Row player's remaining payoffs.
    pub payoff1: Vec<Vec<f64>>,
    /// Column player's remaining payoffs.
    pub payoff2: Vec<Vec<f64>>,
}

/// Symbolic payoff equations for both players.
#[derive(Debug, Clone, Serialize)]
pub struct MixedReport {
    /// Player 1's payoff in `p` and `q`.
    pub payoff1: String,
    /// Player 2's payoff in `p` and `q`.
    pub payoff2: String,
    /// Player 1's payoff differentiated by `p`.
    pub derivative1: String,
    /// Player 2's payoff differentiated by `q`.
    pub derivative2: String,
    /// Solved interior equilibrium, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<MixedSolution>,
}

/// Everything the engine can say about one game.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Display name.
    pub name: String,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Whether the single-matrix convention is used.
    pub zero_sum: bool,
    /// Unevaluated row-player payoff expression.
    pub expression: String,
    /// Expected payoffs under the given strategies (absent for symbolic strategies).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_payoffs: Option<PayoffPair>,
    /// Pure-reply payoffs for player 1 then player 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_strategies: Option<[Vec<f64>; 2]>,
    /// Saddlepoints of the row player's matrix.
    pub saddlepoints: Option<Saddlepoints>,
    /// Pure Nash equilibria.
    pub nash: Option<OutcomeMap>,
    /// Pareto-optimal outcomes.
    pub pareto: OutcomeMap,
    /// Security strategies.
    pub tally: Tally,
    /// Closed-form 2x2 mixed equilibrium (2x2 games without a saddlepoint).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oddments: Option<[[f64; 2]; 2]>,
    /// Symbolic first-order conditions (2x2 games).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixed: Option<MixedReport>,
    /// Game after iterated strict dominance.
    pub reduced: ReducedGame,
}

impl Analysis {
    /// Run every analysis on a game with numeric payoffs.
    ///
    /// Strategies may be symbolic; the numeric evaluations that need them are
    /// then left out of the report.
    pub fn run(name: &str, model: &GameModel, config: &SolverConfig) -> Result<Self, GameError> {
        let numeric_strategies = Player::both()
            .iter()
            .all(|&p| model.strategy(p).values().all(|c| c.is_numeric()));

        let (expected, counters) = if numeric_strategies {
            (
                Some(expected_payoffs(model)?),
                Some([
                    counter_strategy(model, Player::Row)?,
                    counter_strategy(model, Player::Column)?,
                ]),
            )
        } else {
            (None, None)
        };

        let saddlepoints = saddlepoint(model, config)?;
        let is_2x2 = model.rows() == 2 && model.cols() == 2;

        let odds = match (is_2x2, &saddlepoints) {
            (true, None) => match oddments(model) {
                Ok(p) => Some(p),
                Err(GameError::Degenerate(_)) => None,
                Err(e) => return Err(e),
            },
            _ => None,
        };

        let mixed_report = if is_2x2 {
            let equations = mixed(model)?;
            let solution = match solve(&equations) {
                Ok(s) => Some(s),
                Err(GameError::Degenerate(_)) | Err(GameError::NoEquilibrium) => None,
                Err(e) => return Err(e),
            };
            let [row, column] = &equations;
            Some(MixedReport {
                payoff1: row.payoff.to_string(),
                payoff2: column.payoff.to_string(),
                derivative1: row.derivative.to_string(),
                derivative2: column.derivative.to_string(),
                solution,
            })
        } else {
            None
        };

        let reduced = reduce_fully(model, config)?;

        Ok(Self {
            name: name.to_string(),
            rows: model.rows(),
            cols: model.cols(),
            zero_sum: model.is_zero_sum(),
            expression: s_expected_payoff(model),
            expected_payoffs: expected,
            counter_strategies: counters,
            saddlepoints,
            nash: nash(model, config)?,
            pareto: pareto_optimal(model, config)?,
            tally: mm_tally(model, config)?,
            oddments: odds,
            mixed: mixed_report,
            reduced: ReducedGame {
                rows: reduced.rows(),
                cols: reduced.cols(),
                payoff1: reduced.numeric_matrix(Player::Row)?,
                payoff2: reduced.numeric_matrix(Player::Column)?,
            },
        })
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::Json(e.to_string()))
    }

    /// Write the report as JSON.
    pub fn save_json(&self, path: &str) -> Result<(), GameError> {
        let json = self.to_json()?;
        let mut file = File::create(path).map_err(|e| GameError::Io(e.to_string()))?;
        file.write_all(json.as_bytes())
            .map_err(|e| GameError::Io(e.to_string()))
    }

    /// Print a human-readable summary.
    pub fn print_summary(&self) {
        println!("=== {} ({}x{}, {}) ===", self.name, self.rows, self.cols,
            if self.zero_sum { "zero-sum" } else { "general-sum" });

        if let Some((u1, u2)) = self.expected_payoffs {
            println!("Expected payoffs: {:.4} / {:.4}", u1, u2);
        }

        match &self.saddlepoints {
            Some(points) => {
                for (coord, value) in points {
                    println!("Saddlepoint {} = {}", coord, value);
                }
            }
            None => println!("No saddlepoint"),
        }

        match &self.nash {
            Some(eqs) => {
                for (coord, (u1, u2)) in eqs {
                    println!("Nash {} -> ({}, {})", coord, u1, u2);
                }
            }
            None => println!("No pure Nash equilibrium"),
        }

        let pareto: Vec<String> = self.pareto.keys().map(|c| c.key()).collect();
        println!("Pareto optimal: {}", pareto.join(" "));

        println!(
            "Maximin: row {} (value {}), column {} (value {})",
            self.tally.row.index + 1,
            self.tally.row.value,
            self.tally.column.index + 1,
            self.tally.column.value
        );

        if let Some([p1, p2]) = self.oddments {
            println!(
                "Oddments: p1 = [{:.4}, {:.4}], p2 = [{:.4}, {:.4}]",
                p1[0], p1[1], p2[0], p2[1]
            );
        }

        if let Some(m) = &self.mixed {
            println!("d/dp {} = 0", m.derivative1);
            println!("d/dq {} = 0", m.derivative2);
            if let Some(s) = &m.solution {
                println!("Mixed equilibrium: p = {:.4}, q = {:.4}", s.p, s.q);
            }
        }

        println!("Reduced game: {}x{}", self.reduced.rows, self.reduced.cols);
    }
}
