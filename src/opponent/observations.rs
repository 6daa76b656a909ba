//! What the agent saw during one round.
//!
//! Decisions record sightings here instead of touching the opponent model,
//! which only changes at round end. The policy also reads the buffer: the
//! number of bets already faced on a board this round feeds the
//! repeated-aggression penalty.

use crate::cards::Card;
use crate::engine::NUM_BOARDS;

/// The opponent's most recent observable action on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentAction {
    Raise,
    Call,
    Check,
}

/// An opponent bet we faced post-flop.
#[derive(Debug, Clone, PartialEq)]
pub struct BetObservation {
    /// Continuation cost divided by the pot before it.
    pub relative_size: f64,
    /// Community cards when the bet was made.
    pub board: Vec<Card>,
}

#[derive(Debug, Clone, Default)]
pub struct RoundObservations {
    bets: [Vec<BetObservation>; NUM_BOARDS],
    folded: [bool; NUM_BOARDS],
    /// Opponent raised from the big blind preflop.
    pub bb_raises: u32,
    /// Opponent raised from the small blind preflop.
    pub sb_raises: u32,
    /// Opponent limped from the small blind.
    pub sb_calls: u32,
    pub postflop_raises: u32,
    pub postflop_no_raises: u32,
    pub postflop_calls: u32,
    pub our_postflop_raises: u32,
}

impl RoundObservations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_bet(&mut self, board: usize, relative_size: f64, community: &[Card]) {
        self.bets[board].push(BetObservation {
            relative_size,
            board: community.to_vec(),
        });
    }

    pub fn bets_on(&self, board: usize) -> &[BetObservation] {
        &self.bets[board]
    }

    pub fn mark_folded(&mut self, board: usize) {
        self.folded[board] = true;
    }

    pub fn folded(&self, board: usize) -> bool {
        self.folded[board]
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
