//! Preflop decisions, driven by the table baseline of each assigned pair.

use super::budget::{check_or_fold, ChipBudget};
use super::{Policy, Spot};
use crate::config::SbRaiseDiscount;
use crate::engine::{Action, Seat};
use crate::opponent::RoundObservations;
use rand::Rng;

impl Policy<'_> {
    /// Preflop action for a board where we hold a pair of baseline
    /// `equity`.
    pub fn preflop<R: Rng + ?Sized>(
        &self,
        spot: &Spot<'_>,
        equity: f64,
        observations: &mut RoundObservations,
        budget: &mut ChipBudget,
        rng: &mut R,
    ) -> Action {
        match spot.seat {
            Seat::SmallBlind => self.small_blind(spot, equity, observations, budget),
            Seat::BigBlind => self.big_blind(spot, equity, observations, budget, rng),
        }
    }

    fn small_blind(
        &self,
        spot: &Spot<'_>,
        equity: f64,
        observations: &mut RoundObservations,
        budget: &mut ChipBudget,
    ) -> Action {
        let p = &self.config.preflop;
        let rules = &self.config.rules;
        let view = spot.view;
        let cost = view.continue_cost();

        if cost == rules.big_blind - rules.small_blind {
            return if equity < p.sb_fold_below {
                Action::Fold
            } else if equity < p.sb_limp_below {
                budget.call_or_fallback(view)
            } else {
                budget.raise_or_fallback(view, p.sb_open_size)
            };
        }

        // The big blind raised.
        if cost > 0 {
            observations.bb_raises += 1;
        }
        let rate = self.model.bb_raise_rate().unwrap_or(p.prior_raise_rate);
        let adjusted = equity - p.raise_discount_scale * rate * rate;
        if adjusted >= view.pot_odds() {
            if equity > p.reraise_above {
                budget.raise_or_fallback(view, self.reraise_size(spot))
            } else {
                budget.call_or_fallback(view)
            }
        } else {
            check_or_fold(view)
        }
    }

    fn big_blind<R: Rng + ?Sized>(
        &self,
        spot: &Spot<'_>,
        equity: f64,
        observations: &mut RoundObservations,
        budget: &mut ChipBudget,
        rng: &mut R,
    ) -> Action {
        let p = &self.config.preflop;
        let view = spot.view;

        if view.continue_cost() == 0 {
            // The small blind limped.
            observations.sb_calls += 1;
            return if equity > p.iso_raise_above || rng.gen::<f64>() < equity {
                budget.raise_or_fallback(view, p.iso_raise_size)
            } else {
                Action::Check
            };
        }

        observations.sb_raises += 1;
        let q = match p.sb_raise_discount {
            SbRaiseDiscount::RawCount => (self.model.sb_raise_count() + observations.sb_raises) as f64,
            SbRaiseDiscount::Rate => self.model.sb_raise_rate().unwrap_or(p.prior_raise_rate),
        };
        let adjusted = equity - p.raise_discount_scale * q * q;
        if adjusted < view.pot_odds() {
            return Action::Fold;
        }
        if equity > p.reraise_above {
            budget.raise_or_fallback(view, self.reraise_size(spot))
        } else {
            budget.call_or_fallback(view)
        }
    }

    /// Re-raise to a multiple of the pot after our call.
    fn reraise_size(&self, spot: &Spot<'_>) -> u32 {
        let view = spot.view;
        let pot_after_call = (view.pot_total() + view.continue_cost()) as f64;
        (self.config.preflop.reraise_pot_multiple * pot_after_call) as u32
    }
}
