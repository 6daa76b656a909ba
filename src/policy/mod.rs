//! Per-board betting decisions.
//!
//! The agent walks the three boards in order and, for each live board,
//! hands a [`Spot`] to [`Policy::preflop`] or [`Policy::postflop`] together
//! with the board's equity. A [`ChipBudget`] threads through the three
//! calls so no decision spends chips an earlier board already claimed.

pub mod budget;
pub mod checkfold;
pub mod postflop;
pub mod preflop;

pub use budget::{check_or_fold, ChipBudget};

use crate::cards::Street;
use crate::config::StrategyConfig;
use crate::engine::{BoardView, LegalActions, Seat, NUM_BOARDS};
use crate::opponent::OpponentModel;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("board {board}: no rule for legal actions {legal}")]
    UnhandledLegality { board: usize, legal: LegalActions },
}

/// One board waiting for our action.
#[derive(Debug, Clone, Copy)]
pub struct Spot<'a> {
    pub board: usize,
    pub view: &'a BoardView,
    pub street: Street,
    pub seat: Seat,
    pub round_num: u32,
}

/// The read-only inputs every decision shares.
#[derive(Debug, Clone, Copy)]
pub struct Policy<'a> {
    pub config: &'a StrategyConfig,
    pub model: &'a OpponentModel,
}

impl<'a> Policy<'a> {
    pub fn new(config: &'a StrategyConfig, model: &'a OpponentModel) -> Self {
        Self { config, model }
    }
}

/// Equity per board and street, computed at most once each per round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquitySnapshot {
    values: [[Option<f64>; 4]; NUM_BOARDS],
}

impl EquitySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a round with the preflop row already known.
    pub fn seeded(preflop: [f64; NUM_BOARDS]) -> Self {
        let mut snapshot = Self::default();
        for (board, equity) in preflop.into_iter().enumerate() {
            snapshot.values[board][Street::Preflop.index()] = Some(equity);
        }
        snapshot
    }

    pub fn get(&self, board: usize, street: Street) -> Option<f64> {
        self.values[board][street.index()]
    }

    /// The cached value, or `compute()` stored for the rest of the round.
    pub fn get_or_compute(&mut self, board: usize, street: Street, compute: impl FnOnce() -> f64) -> f64 {
        *self.values[board][street.index()].get_or_insert_with(compute)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
