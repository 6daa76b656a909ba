//! Types exchanged with the external game engine.
//!
//! The engine owns the rules: it deals, enforces legality, settles pots and
//! calls into a [`Bot`] at round start, for every decision, and at round
//! end. Everything here is a plain snapshot of what the engine reports.

use crate::cards::{Card, HoleCards, Street};
use crate::policy::PolicyError;
use std::fmt;

/// Boards played simultaneously each round.
pub const NUM_BOARDS: usize = 3;

/// Hole cards dealt per round (two per board).
pub const NUM_HOLE_CARDS: usize = 2 * NUM_BOARDS;

/// One action on one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Call,
    Check,
    /// Raise so that our pip on the board totals this amount.
    Raise(u32),
    /// Place these two hole cards on the board.
    Assign(HoleCards),
}

impl Action {
    pub fn kind(&self) -> LegalActions {
        match self {
            Action::Fold => LegalActions::FOLD,
            Action::Call => LegalActions::CALL,
            Action::Check => LegalActions::CHECK,
            Action::Raise(_) => LegalActions::RAISE,
            Action::Assign(_) => LegalActions::ASSIGN,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "Fold"),
            Action::Call => write!(f, "Call"),
            Action::Check => write!(f, "Check"),
            Action::Raise(amount) => write!(f, "Raise to {}", amount),
            Action::Assign(hole) => write!(f, "Assign {}", hole),
        }
    }
}

/// Set of action kinds the engine allows on a board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LegalActions(u8);

impl LegalActions {
    pub const FOLD: Self = Self(1 << 0);
    pub const CALL: Self = Self(1 << 1);
    pub const CHECK: Self = Self(1 << 2);
    pub const RAISE: Self = Self(1 << 3);
    pub const ASSIGN: Self = Self(1 << 4);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The engine offers exactly one of these combinations per board.
    pub fn is_recognized(self) -> bool {
        [
            Self::ASSIGN,
            Self::CHECK,
            Self::CHECK.union(Self::RAISE),
            Self::FOLD.union(Self::CALL),
            Self::FOLD.union(Self::CALL).union(Self::RAISE),
        ]
        .contains(&self)
    }
}

impl std::ops::BitOr for LegalActions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for LegalActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::FOLD, "Fold"),
            (Self::CALL, "Call"),
            (Self::CHECK, "Check"),
            (Self::RAISE, "Raise"),
            (Self::ASSIGN, "Assign"),
        ];
        f.debug_set()
            .entries(names.iter().filter(|(k, _)| self.contains(*k)).map(|(_, n)| n))
            .finish()
    }
}

impl fmt::Display for LegalActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Our seat this round. Seats alternate between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    SmallBlind,
    BigBlind,
}

impl Seat {
    /// The engine numbers the small blind 0 and the big blind 1.
    pub fn from_engine(active: usize) -> Self {
        if active == 0 {
            Seat::SmallBlind
        } else {
            Seat::BigBlind
        }
    }
}

/// Match-level figures, reported with every callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameInfo {
    /// Our chips won or lost since the match started.
    pub bankroll: i64,
    pub opp_bankroll: i64,
    /// Seconds left on our match clock.
    pub game_clock: f64,
    /// 1-based round number.
    pub round_num: u32,
}

impl GameInfo {
    pub fn bankroll_lead(&self) -> i64 {
        self.bankroll - self.opp_bankroll
    }
}

/// What we are dealt at round start.
#[derive(Debug, Clone)]
pub struct RoundStart {
    pub seat: Seat,
    pub cards: [Card; NUM_HOLE_CARDS],
}

/// One board as the engine presents it at a decision.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub legal: LegalActions,
    /// Community cards dealt so far.
    pub community: Vec<Card>,
    /// Chips put in this betting round: `[ours, opponent's]`.
    pub pips: [u32; 2],
    /// Pot from earlier betting rounds.
    pub pot: u32,
    /// Smallest and largest legal raise-to amounts.
    pub raise_bounds: (u32, u32),
    /// Both players have acted and matched on this betting round.
    pub settled: bool,
    /// The board has finished for this round.
    pub terminal: bool,
}

impl BoardView {
    pub fn my_pip(&self) -> u32 {
        self.pips[0]
    }

    pub fn opp_pip(&self) -> u32 {
        self.pips[1]
    }

    /// Chips needed to match the opponent.
    pub fn continue_cost(&self) -> u32 {
        self.opp_pip().saturating_sub(self.my_pip())
    }

    /// Everything in the middle right now.
    pub fn pot_total(&self) -> u32 {
        self.pot + self.my_pip() + self.opp_pip()
    }

    /// Pot odds of calling: cost / (pot + cost).
    pub fn pot_odds(&self) -> f64 {
        let cost = self.continue_cost() as f64;
        let denom = self.pot_total() as f64 + cost;
        if denom > 0.0 { cost / denom } else { 0.0 }
    }

    pub fn can(&self, kind: LegalActions) -> bool {
        self.legal.contains(kind)
    }

    /// Clamp a raise-to amount into the legal bounds.
    pub fn clip_raise(&self, amount: u32) -> u32 {
        let (min_raise, max_raise) = self.raise_bounds;
        amount.max(min_raise).min(max_raise)
    }
}

/// Everything the engine reports when it needs three actions.
#[derive(Debug, Clone)]
pub struct DecisionRequest {
    pub street: Street,
    pub seat: Seat,
    /// Our six round-start cards.
    pub my_cards: [Card; NUM_HOLE_CARDS],
    pub boards: [BoardView; NUM_BOARDS],
    /// Chips we can still commit this round, shared by all boards.
    pub my_stack: u32,
    pub opp_stack: u32,
}

/// How one board ended.
#[derive(Debug, Clone)]
pub struct BoardResult {
    /// The pair we assigned to this board.
    pub hole: HoleCards,
    /// The opponent's pair if it was shown.
    pub opp_hole: Option<HoleCards>,
    /// Community cards dealt by the end of the round.
    pub community: Vec<Card>,
}

/// How the round ended.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// Street the round ended on.
    pub street: Street,
    /// Our bankroll change this round.
    pub delta: i64,
    pub boards: [BoardResult; NUM_BOARDS],
}

/// The callbacks an engine runner drives.
pub trait Bot {
    /// Called once at the start of each round.
    fn handle_new_round(&mut self, game: &GameInfo, round: &RoundStart);

    /// Called once at the end of each round.
    fn handle_round_over(&mut self, game: &GameInfo, outcome: &RoundOutcome);

    /// Called whenever the engine needs one action per board.
    fn get_actions(
        &mut self,
        game: &GameInfo,
        request: &DecisionRequest,
    ) -> Result<[Action; NUM_BOARDS], PolicyError>;
}
