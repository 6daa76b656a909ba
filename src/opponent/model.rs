//! Cross-round statistics about the opponent.
//!
//! The model is updated once per round from the round's outcome and the
//! sightings buffered in [`RoundObservations`]. Derived rates are not
//! recomputed every round: they refresh at the start of rounds on a fixed
//! cadence, after that round's cards have been allocated.

use crate::cards::{Card, HoleCards, Street};
use crate::config::{ModelConfig, SamplingConfig};
use crate::engine::{RoundOutcome, NUM_BOARDS};
use crate::equity::{EquityEstimator, EquityTable};
use crate::opponent::observations::RoundObservations;
use crate::opponent::samples::{BetStrengthSamples, NeighborStrength};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

const NUM_STREETS: usize = 4;

/// Snapshot of the model for logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub rounds: u32,
    pub raise_rate: f64,
    pub fold_rate: f64,
    pub our_fold_rate: f64,
    pub postflop_calls: u32,
    pub opp_folds_by_street: [u32; NUM_STREETS],
    pub our_folds_by_street: [u32; NUM_STREETS],
    pub showdown_wins: f64,
    pub showdown_losses: f64,
    pub bet_samples: usize,
    pub board_strength: [Option<f64>; NUM_BOARDS],
    pub ranking: Option<[usize; NUM_BOARDS]>,
}

#[derive(Debug, Clone)]
pub struct OpponentModel {
    config: ModelConfig,
    backfill_iters: usize,
    showdown_iters: usize,
    rounds: u32,

    opp_folds: [u32; NUM_STREETS],
    our_folds: [u32; NUM_STREETS],
    postflop_raises: u32,
    postflop_no_raises: u32,
    postflop_calls: u32,
    our_postflop_raises: u32,
    bb_raises: u32,
    sb_raises: u32,
    sb_calls: u32,

    board_strengths: [Vec<f64>; NUM_BOARDS],
    samples: BetStrengthSamples,
    showdown_wins: f64,
    showdown_losses: f64,

    raise_rate: f64,
    fold_rate: f64,
    our_fold_rate: f64,
    bb_raise_rate: Option<f64>,
    sb_raise_rate: Option<f64>,
    sb_call_rate: Option<f64>,
    ranking: Option<[usize; NUM_BOARDS]>,
}

impl OpponentModel {
    pub fn new(config: ModelConfig, sampling: &SamplingConfig) -> Self {
        Self {
            config,
            backfill_iters: sampling.backfill_iters,
            showdown_iters: sampling.showdown_iters,
            rounds: 0,
            opp_folds: [0; NUM_STREETS],
            our_folds: [0; NUM_STREETS],
            postflop_raises: 0,
            postflop_no_raises: 0,
            postflop_calls: 0,
            our_postflop_raises: 0,
            bb_raises: 0,
            sb_raises: 0,
            sb_calls: 0,
            board_strengths: Default::default(),
            samples: BetStrengthSamples::new(),
            showdown_wins: 0.0,
            showdown_losses: 0.0,
            raise_rate: 0.0,
            fold_rate: 0.0,
            our_fold_rate: 0.0,
            bb_raise_rate: None,
            sb_raise_rate: None,
            sb_call_rate: None,
            ranking: None,
        }
    }

    /// Fold in everything learned during round `round_num`.
    ///
    /// # Arguments
    /// * `round_num` - the round that just ended (1-based)
    /// * `outcome` - the engine's report, with any revealed opponent hands
    /// * `observations` - sightings recorded while deciding this round
    /// * `table` - baseline strengths for revealed hands
    /// * `estimator` - used to value revealed hands at each bet they made
    pub fn record_round<R: Rng + ?Sized>(
        &mut self,
        round_num: u32,
        outcome: &RoundOutcome,
        observations: &RoundObservations,
        table: &EquityTable,
        estimator: &EquityEstimator,
        rng: &mut R,
    ) {
        self.rounds += 1;
        let street = outcome.street.index();

        for (i, result) in outcome.boards.iter().enumerate() {
            let we_folded = observations.folded(i);
            match (&result.opp_hole, we_folded) {
                (None, false) => self.opp_folds[street] += 1,
                (_, true) => self.our_folds[street] += 1,
                (Some(_), false) => {}
            }

            let Some(opp_hole) = result.opp_hole.as_ref() else {
                continue;
            };
            let strength = table.baseline_of(opp_hole) + i as f64 * self.config.board_strength_offset;
            self.board_strengths[i].push(strength);

            if result.community.len() >= Street::Flop.num_board_cards() {
                let won = estimator.estimate(
                    &result.hole,
                    &result.community,
                    &[],
                    Some(opp_hole),
                    self.showdown_iters,
                    rng,
                );
                self.showdown_wins += won;
                self.showdown_losses += 1.0 - won;
            }

            for bet in observations.bets_on(i) {
                let realized = self.strength_at(opp_hole, &bet.board, estimator, rng);
                self.samples.insert(bet.relative_size, realized);
            }
        }

        self.postflop_raises += observations.postflop_raises;
        self.postflop_no_raises += observations.postflop_no_raises;
        self.postflop_calls += observations.postflop_calls;
        self.our_postflop_raises += observations.our_postflop_raises;
        self.bb_raises += observations.bb_raises;
        self.sb_raises += observations.sb_raises;
        self.sb_calls += observations.sb_calls;

        debug!(
            round = round_num,
            bet_samples = self.samples.len(),
            "round recorded"
        );
    }

    fn strength_at<R: Rng + ?Sized>(
        &self,
        opp_hole: &HoleCards,
        board: &[Card],
        estimator: &EquityEstimator,
        rng: &mut R,
    ) -> f64 {
        estimator.estimate(opp_hole, board, &[], None, self.backfill_iters, rng)
    }

    /// Recompute derived rates at the start of round `round_num`.
    ///
    /// Only acts on rounds that are a multiple of the refresh cadence. The
    /// counters change only in [`record_round`](Self::record_round), so a
    /// repeated call within a round is harmless.
    pub fn refresh_rates(&mut self, round_num: u32) {
        let c = &self.config;
        if round_num % c.refresh_every != 0 {
            return;
        }

        if round_num >= c.rates_from_round {
            let seen = self.postflop_raises + self.postflop_no_raises;
            if seen > 0 {
                self.raise_rate = self.postflop_raises as f64 / seen as f64;
            }
            let boards_played = (NUM_BOARDS as u32 * (round_num + 1)) as f64;
            if self.postflop_raises > 0 {
                self.our_fold_rate = self.our_folds.iter().sum::<u32>() as f64 / boards_played;
            }
            if self.our_postflop_raises > 0 {
                self.fold_rate = self.opp_folds.iter().sum::<u32>() as f64 / boards_played;
            }
        }

        if round_num >= c.ranking_from_round {
            let mut means: Vec<(usize, f64)> = self
                .board_strengths
                .iter()
                .enumerate()
                .map(|(i, s)| (i, mean(s).unwrap_or(c.default_board_strength)))
                .collect();
            means.sort_by(|a, b| a.1.total_cmp(&b.1));
            self.ranking = Some([means[0].0, means[1].0, means[2].0]);

            let per_seat = 1.5 * round_num as f64;
            self.bb_raise_rate = Some(self.bb_raises as f64 / per_seat);
            self.sb_raise_rate = Some(self.sb_raises as f64 / per_seat);
            self.sb_call_rate = Some(self.sb_calls as f64 / per_seat);
        }

        debug!(
            round = round_num,
            raise_rate = self.raise_rate,
            fold_rate = self.fold_rate,
            our_fold_rate = self.our_fold_rate,
            ranking = ?self.ranking,
            "opponent rates refreshed"
        );
    }

    /// Share of boards the opponent gave up, once we have raised post-flop.
    pub fn fold_rate(&self) -> f64 {
        self.fold_rate
    }

    /// Share of boards we gave up, once the opponent has raised post-flop.
    pub fn our_fold_rate(&self) -> f64 {
        self.our_fold_rate
    }

    /// Share of the opponent's post-flop actions that were raises.
    pub fn raise_rate(&self) -> f64 {
        self.raise_rate
    }

    /// Realized strength behind the `k` revealed bets closest in size to
    /// `bet_size`, or `None` before any reveal.
    pub fn strength_near_bet_size(&self, bet_size: f64, k: usize) -> Option<NeighborStrength> {
        self.samples.strength_near(bet_size, k)
    }

    pub fn num_bet_samples(&self) -> usize {
        self.samples.len()
    }

    /// Boards ordered from the opponent's weakest revealed hands to their
    /// strongest.
    pub fn board_strength_ranking(&self) -> Option<&[usize; NUM_BOARDS]> {
        self.ranking.as_ref()
    }

    pub fn bb_raise_rate(&self) -> Option<f64> {
        self.bb_raise_rate
    }

    pub fn sb_raise_rate(&self) -> Option<f64> {
        self.sb_raise_rate
    }

    pub fn sb_call_rate(&self) -> Option<f64> {
        self.sb_call_rate
    }

    /// Small-blind raises seen in completed rounds.
    pub fn sb_raise_count(&self) -> u32 {
        self.sb_raises
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            rounds: self.rounds,
            raise_rate: self.raise_rate,
            fold_rate: self.fold_rate,
            our_fold_rate: self.our_fold_rate,
            postflop_calls: self.postflop_calls,
            opp_folds_by_street: self.opp_folds,
            our_folds_by_street: self.our_folds,
            showdown_wins: self.showdown_wins,
            showdown_losses: self.showdown_losses,
            bet_samples: self.samples.len(),
            board_strength: [
                mean(&self.board_strengths[0]),
                mean(&self.board_strengths[1]),
                mean(&self.board_strengths[2]),
            ],
            ranking: self.ranking,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, PairKey};
    use crate::engine::BoardResult;
    use crate::equity::PairEquity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hole(s: &str) -> HoleCards {
        s.parse().unwrap()
    }

    fn flat_table() -> EquityTable {
        EquityTable::from_fn(|key| match key {
            PairKey::Pair(_) => PairEquity { win_prob: 0.7, draw_prob: 0.0 },
            _ => PairEquity { win_prob: 0.4, draw_prob: 0.2 },
        })
    }

    fn model() -> OpponentModel {
        OpponentModel::new(ModelConfig::default(), &SamplingConfig::default())
    }

    fn board(ours: &str, theirs: Option<&str>, community: &str) -> BoardResult {
        BoardResult {
            hole: hole(ours),
            opp_hole: theirs.map(hole),
            community: parse_cards(community).unwrap(),
        }
    }

    /// Opponent folds every board preflop.
    fn all_folded() -> RoundOutcome {
        RoundOutcome {
            street: Street::Preflop,
            delta: 3,
            boards: [
                board("AhKh", None, ""),
                board("QdJd", None, ""),
                board("9c8c", None, ""),
            ],
        }
    }

    fn showdown_on_board_one() -> RoundOutcome {
        RoundOutcome {
            street: Street::River,
            delta: 20,
            boards: [
                board("AhKh", None, "2c 7d Ts"),
                board("AsAd", Some("KcKd"), "2s 3h 8d Jc 4c"),
                board("9c8c", None, "5h 6h Qs 3c"),
            ],
        }
    }

    fn record(m: &mut OpponentModel, round: u32, outcome: &RoundOutcome, obs: &RoundObservations) {
        let mut rng = StdRng::seed_from_u64(round as u64);
        m.record_round(round, outcome, obs, &flat_table(), &EquityEstimator::new(), &mut rng);
        m.refresh_rates(round + 1);
    }

    #[test]
    fn test_folds_bucketed_by_street() {
        let mut m = model();
        let mut obs = RoundObservations::new();
        obs.mark_folded(2);
        record(&mut m, 1, &all_folded(), &obs);

        let s = m.summary();
        assert_eq!(s.opp_folds_by_street, [2, 0, 0, 0]);
        assert_eq!(s.our_folds_by_street, [1, 0, 0, 0]);
    }

    #[test]
    fn test_reveal_updates_strengths_and_samples() {
        let mut m = model();
        let mut obs = RoundObservations::new();
        let flop: Vec<Card> = parse_cards("2s 3h 8d").unwrap();
        obs.record_bet(1, 0.75, &flop);
        obs.record_bet(0, 0.5, &flop);
        record(&mut m, 1, &showdown_on_board_one(), &obs);

        let s = m.summary();
        // Board 1 showed down, the others were abandoned by the opponent.
        assert_eq!(s.opp_folds_by_street, [0, 0, 0, 2]);
        assert_eq!(s.showdown_wins, 1.0);
        assert_eq!(s.showdown_losses, 0.0);
        assert_eq!(s.board_strength[0], None);
        assert!((s.board_strength[1].unwrap() - 0.715).abs() < 1e-12);

        // Only the bet on the revealed board becomes a sample.
        assert_eq!(m.num_bet_samples(), 1);
        let near = m.strength_near_bet_size(0.75, 55).unwrap();
        assert_eq!(near.count, 1);
        assert!(near.mean > 0.5);
    }

    #[test]
    fn test_rates_wait_for_cadence() {
        let mut m = model();
        let mut obs = RoundObservations::new();
        obs.postflop_raises = 1;
        obs.postflop_no_raises = 3;
        obs.our_postflop_raises = 1;
        obs.bb_raises = 3;

        for round in 1..=28 {
            record(&mut m, round, &all_folded(), &obs);
        }
        // Ranking and seat rates refreshed going into round 20.
        assert!(m.board_strength_ranking().is_some());
        assert_eq!(m.bb_raise_rate(), Some(57.0 / 30.0));
        assert_eq!(m.raise_rate(), 0.0);

        record(&mut m, 29, &all_folded(), &obs);
        assert!((m.raise_rate() - 0.25).abs() < 1e-12);
        // 3 boards a round, opponent folded all of them.
        assert!((m.fold_rate() - 87.0 / 93.0).abs() < 1e-12);
        assert_eq!(m.our_fold_rate(), 0.0);
        assert_eq!(m.bb_raise_rate(), Some(87.0 / 45.0));
    }

    #[test]
    fn test_refreshed_rate_values() {
        let mut m = model();
        let mut obs = RoundObservations::new();
        obs.postflop_raises = 2;
        obs.sb_raises = 1;
        obs.sb_calls = 2;
        obs.mark_folded(0);

        for round in 1..=19 {
            record(&mut m, round, &all_folded(), &obs);
        }
        // 1.5 small-blind rounds per round, 30 by round 20.
        assert_eq!(m.sb_raise_rate(), Some(19.0 / 30.0));
        assert_eq!(m.sb_call_rate(), Some(38.0 / 30.0));
        assert_eq!(m.bb_raise_rate(), Some(0.0));
        assert_eq!(m.our_fold_rate(), 0.0);

        for round in 20..=29 {
            record(&mut m, round, &all_folded(), &obs);
        }
        // One of our folds a round over 3 * 31 boards.
        assert!((m.our_fold_rate() - 29.0 / 93.0).abs() < 1e-12);
        // We never raised, so the opponent's fold rate is not learned.
        assert_eq!(m.fold_rate(), 0.0);
        assert_eq!(m.raise_rate(), 1.0);
        assert_eq!(m.sb_raise_rate(), Some(29.0 / 45.0));
        assert_eq!(m.sb_call_rate(), Some(58.0 / 45.0));
    }

    #[test]
    fn test_refresh_is_repeatable_within_a_round() {
        let mut m = model();
        let mut obs = RoundObservations::new();
        obs.sb_raises = 1;
        for round in 1..=19 {
            record(&mut m, round, &all_folded(), &obs);
        }
        m.refresh_rates(20);
        assert_eq!(m.sb_raise_rate(), Some(19.0 / 30.0));
        // Off-cadence rounds leave the rates alone.
        record(&mut m, 20, &all_folded(), &obs);
        assert_eq!(m.sb_raise_rate(), Some(19.0 / 30.0));
    }

    #[test]
    fn test_nothing_before_first_refresh() {
        let mut m = model();
        let obs = RoundObservations::new();
        for round in 1..=8 {
            record(&mut m, round, &all_folded(), &obs);
        }
        assert_eq!(m.board_strength_ranking(), None);
        assert_eq!(m.sb_raise_rate(), None);
        assert_eq!(m.sb_call_rate(), None);
        assert_eq!(m.strength_near_bet_size(0.5, 55), None);
    }

    #[test]
    fn test_ranking_orders_weak_to_strong() {
        let mut m = model();
        let obs = RoundObservations::new();
        let outcome = RoundOutcome {
            street: Street::River,
            delta: 0,
            boards: [
                board("AhKh", Some("KcKd"), "2s 3h 8d Jc 4c"),
                board("QsQd", None, "2d 7d Ts 9h 5s"),
                board("9c8c", Some("7h6s"), "Ad 3s Tc 2h Js"),
            ],
        };
        for round in 1..=19 {
            record(&mut m, round, &outcome, &obs);
        }
        // Board 1 has no reveals and takes the default strength.
        assert_eq!(m.board_strength_ranking(), Some(&[2, 1, 0]));
    }

    #[test]
    fn test_seat_counts_accumulate() {
        let mut m = model();
        let mut obs = RoundObservations::new();
        obs.sb_raises = 1;
        obs.sb_calls = 2;
        record(&mut m, 1, &all_folded(), &obs);
        record(&mut m, 2, &all_folded(), &obs);
        assert_eq!(m.sb_raise_count(), 2);
        assert_eq!(m.summary().rounds, 2);
    }
}
