//! Monte Carlo showdown equity.
//!
//! `EquityEstimator::estimate` answers "how often does this holding win at
//! showdown against a random hand, given what is already known". When the
//! opponent's cards have been revealed it compares the two hands exactly
//! instead of sampling.

use crate::cards::{hand_eval, Card, Deck, HoleCards, Street};
use rand::Rng;
use std::cmp::Ordering;
use tracing::trace;

/// Win and draw frequencies from a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinDraw {
    pub win: f64,
    pub draw: f64,
}

/// Stateless showdown simulator. Sample counts are chosen per call so each
/// caller can trade accuracy for clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquityEstimator;

impl EquityEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Equity of `hole` in `[0, 1]`, ties counting half.
    ///
    /// * `board` - community cards dealt so far (0, 3, 4 or 5)
    /// * `dead` - other known cards that cannot appear
    /// * `opponent` - the opponent's revealed hand, if there was a showdown
    /// * `iters` - number of trials when sampling
    ///
    /// # Panics
    /// On a board of impossible length, a card known twice, a known opponent
    /// with an incomplete board, or `iters == 0` when sampling.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        hole: &HoleCards,
        board: &[Card],
        dead: &[Card],
        opponent: Option<&HoleCards>,
        iters: usize,
        rng: &mut R,
    ) -> f64 {
        let street = Street::from_board_len(board.len())
            .unwrap_or_else(|| panic!("board of {} cards is not a street", board.len()));
        let ours = hole.cards();
        let opp_cards = opponent.map(|o| o.cards());

        let mut deck = Deck::without(
            ours.iter()
                .chain(board)
                .chain(dead)
                .chain(opp_cards.iter().flatten()),
        );

        if let Some(theirs) = opp_cards {
            assert!(
                board.len() + 2 >= 5,
                "showdown comparison needs at least a flop, got {}",
                street
            );
            return match hand_eval::compare(&ours, &theirs, board) {
                Ordering::Greater => 1.0,
                Ordering::Less => 0.0,
                Ordering::Equal => 0.5,
            };
        }

        assert!(iters > 0, "equity estimate needs at least one trial");
        let outcome = simulate(&ours, board, &mut deck, iters, rng);
        let equity = (2 * outcome.wins + outcome.ties) as f64 / (2 * iters) as f64;
        trace!(%hole, %street, iters, equity, "equity estimate");
        equity
    }

    /// Separate win and draw frequencies of `hole` against a random hand
    /// before any community card is dealt.
    pub fn win_draw<R: Rng + ?Sized>(&self, hole: &HoleCards, iters: usize, rng: &mut R) -> WinDraw {
        assert!(iters > 0, "equity estimate needs at least one trial");
        let ours = hole.cards();
        let mut deck = Deck::without(&ours);
        let outcome = simulate(&ours, &[], &mut deck, iters, rng);
        WinDraw {
            win: outcome.wins as f64 / iters as f64,
            draw: outcome.ties as f64 / iters as f64,
        }
    }
}

struct Outcome {
    wins: u64,
    ties: u64,
}

fn simulate<R: Rng + ?Sized>(
    ours: &[Card; 2],
    board: &[Card],
    deck: &mut Deck,
    iters: usize,
    rng: &mut R,
) -> Outcome {
    let missing = 5 - board.len();
    let mut full_board = [Card::from_id(0); 5];
    full_board[..board.len()].copy_from_slice(board);

    let mut outcome = Outcome { wins: 0, ties: 0 };
    for _ in 0..iters {
        let draw = deck.sample(2 + missing, rng);
        let theirs = [draw[0], draw[1]];
        full_board[board.len()..].copy_from_slice(&draw[2..]);

        match hand_eval::compare(ours, &theirs, &full_board) {
            Ordering::Greater => outcome.wins += 1,
            Ordering::Equal => outcome.ties += 1,
            Ordering::Less => {}
        }
    }
    outcome
}
