//! Post-flop decisions.
//!
//! Facing a bet, our Monte Carlo equity is discounted for what the bet says
//! about the opponent's hand and compared with the pot odds. Early in the
//! match the discount is a fixed intimidation penalty; once revealed hands
//! have been collected it comes from how strong the opponent actually was
//! when betting a similar size.

use super::budget::ChipBudget;
use super::{Policy, Spot};
use crate::engine::{Action, BoardView};
use crate::opponent::{OpponentAction, RoundObservations};
use rand::Rng;

impl Policy<'_> {
    /// Post-flop action for a board where our hand has `equity`.
    pub fn postflop<R: Rng + ?Sized>(
        &self,
        spot: &Spot<'_>,
        equity: f64,
        observations: &mut RoundObservations,
        budget: &mut ChipBudget,
        rng: &mut R,
    ) -> Action {
        let q = &self.config.postflop;
        let view = spot.view;
        let cost = view.continue_cost();

        let last = last_action(view);
        if last != OpponentAction::Raise {
            observations.postflop_no_raises += 1;
        }
        if last == OpponentAction::Call && spot.round_num >= self.config.model.call_tracking_from_round {
            observations.postflop_calls += 1;
        }

        let raise_to = (view.pot_total() as f64 * (1.0 + equity)) as u32;

        if cost == 0 {
            let fold_rate = self.model.fold_rate();
            let adjusted = if fold_rate > 0.0 {
                equity + q.fold_rate_bonus * fold_rate
            } else {
                equity
            };
            return if rng.gen::<f64>() < adjusted {
                self.commit(raise_to, view, observations, budget)
            } else {
                Action::Check
            };
        }

        let bet_size = cost as f64 / view.pot_total().max(1) as f64;
        observations.record_bet(spot.board, bet_size, &view.community);
        observations.postflop_raises += 1;

        let adjusted = self.discounted_equity(spot, equity, last, bet_size, observations);
        if adjusted < view.pot_odds() {
            return Action::Fold;
        }
        if adjusted > q.raise_over_call_above && rng.gen::<f64>() < adjusted {
            self.commit(raise_to, view, observations, budget)
        } else {
            budget.call_or_fallback(view)
        }
    }

    /// Our equity after accounting for the bet we face.
    fn discounted_equity(
        &self,
        spot: &Spot<'_>,
        equity: f64,
        last: OpponentAction,
        bet_size: f64,
        observations: &RoundObservations,
    ) -> f64 {
        let q = &self.config.postflop;
        let raise_rate = self.model.raise_rate();
        let earlier_bets = observations.bets_on(spot.board).len().saturating_sub(1) as f64;
        let repeat = earlier_bets * q.repeat_bet_penalty * (-q.repeat_bet_decay * raise_rate).exp();

        let near = if spot.round_num >= q.sample_model_from_round {
            self.model.strength_near_bet_size(bet_size, q.nearest_samples)
        } else {
            None
        };
        match near {
            Some(near) => {
                let exponent = (q.sample_exponent_base + raise_rate - q.sample_raise_rate_pivot)
                    * (1.0 - (near.mean + repeat));
                1.0 - (1.0 - equity).powf(exponent)
            }
            None => {
                let intimidation = match last {
                    OpponentAction::Raise => q.intimidation_raise,
                    OpponentAction::Call => q.intimidation_call,
                    OpponentAction::Check => q.intimidation_check,
                };
                (equity - intimidation - repeat).max(0.0)
            }
        }
    }

    /// Put chips in: the sized raise when possible, else the cheapest way
    /// to stay in. Counts as one of our raises either way.
    fn commit(
        &self,
        raise_to: u32,
        view: &BoardView,
        observations: &mut RoundObservations,
        budget: &mut ChipBudget,
    ) -> Action {
        observations.our_postflop_raises += 1;
        budget.raise_or_fallback(view, raise_to)
    }
}

/// What the opponent last did on the board, as far as we can tell.
fn last_action(view: &BoardView) -> OpponentAction {
    if view.continue_cost() > 0 {
        OpponentAction::Raise
    } else if view.settled {
        OpponentAction::Call
    } else {
        OpponentAction::Check
    }
}
