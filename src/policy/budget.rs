//! Chip accounting across the boards of one decision.
//!
//! All three boards draw on one stack. Boards are decided in order and each
//! decision that puts chips in commits them here, so a later board only
//! sees what is left.

use crate::engine::{Action, BoardView, LegalActions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipBudget {
    stack: u32,
    committed: u32,
}

impl ChipBudget {
    pub fn new(stack: u32) -> Self {
        Self { stack, committed: 0 }
    }

    pub fn remaining(&self) -> u32 {
        self.stack - self.committed
    }

    pub fn committed(&self) -> u32 {
        self.committed
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.remaining()
    }

    fn commit(&mut self, cost: u32) {
        debug_assert!(self.can_afford(cost));
        self.committed += cost;
    }

    /// Raise to `amount` (clipped to the legal bounds) if the engine allows
    /// it and we can pay for it, otherwise the cheapest continuing action.
    pub fn raise_or_fallback(&mut self, view: &BoardView, amount: u32) -> Action {
        let amount = view.clip_raise(amount);
        let cost = amount.saturating_sub(view.my_pip());
        if view.can(LegalActions::RAISE) && self.can_afford(cost) {
            self.commit(cost);
            return Action::Raise(amount);
        }
        self.call_or_fallback(view)
    }

    /// Call if legal and affordable. Falls back to Check, then Fold.
    pub fn call_or_fallback(&mut self, view: &BoardView) -> Action {
        let cost = view.continue_cost();
        if view.can(LegalActions::CALL) && self.can_afford(cost) {
            self.commit(cost);
            return Action::Call;
        }
        check_or_fold(view)
    }
}

/// Check when legal, otherwise give the board up.
pub fn check_or_fold(view: &BoardView) -> Action {
    if view.can(LegalActions::CHECK) {
        Action::Check
    } else {
        Action::Fold
    }
}
