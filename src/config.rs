//! Strategy configuration.
//!
//! Every threshold the agent uses lives here with its tuned default, so the
//! decision logic can be exercised with other values in tests and tuned
//! from a JSON file without recompiling. All sections are optional in the
//! file; missing ones fall back to [`Default`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Complete agent configuration.
///
/// # Example
/// ```
/// use triboard_agent::config::StrategyConfig;
///
/// let config = StrategyConfig::default();
/// assert_eq!(config.rules.num_rounds, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub rules: MatchRules,
    pub checkfold: CheckfoldConfig,
    pub sampling: SamplingConfig,
    pub preflop: PreflopConfig,
    pub postflop: PostflopConfig,
    pub model: ModelConfig,
}

/// Facts about the match the engine runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    pub num_rounds: u32,
    pub small_blind: u32,
    pub big_blind: u32,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            num_rounds: 500,
            small_blind: 1,
            big_blind: 2,
        }
    }
}

/// When to stop playing and give away blinds to protect a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckfoldConfig {
    /// Chips lost per remaining round when folding everything.
    pub cost_per_round: i64,
    /// Extra loss for an odd number of remaining rounds when we start in
    /// the big blind.
    pub big_blind_offset: i64,
    /// Same, starting in the small blind.
    pub small_blind_offset: i64,
    /// The lead must exceed the projected loss by more than this.
    pub margin: i64,
}

impl Default for CheckfoldConfig {
    fn default() -> Self {
        Self {
            cost_per_round: 21,
            big_blind_offset: 24,
            small_blind_offset: 18,
            margin: 1,
        }
    }
}

/// Monte Carlo sample counts per call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// In-round estimate before a post-flop decision.
    pub decision_iters: usize,
    /// Realized opponent strength at each bet after a reveal.
    pub backfill_iters: usize,
    /// Showdown re-derivation with both hands known.
    pub showdown_iters: usize,
    /// Below this many seconds of game clock, decisions sample less.
    pub low_clock_secs: f64,
    pub low_clock_iters: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            decision_iters: 100,
            backfill_iters: 200,
            showdown_iters: 1,
            low_clock_secs: 5.0,
            low_clock_iters: 25,
        }
    }
}

impl SamplingConfig {
    /// Sample count for an in-round decision with `clock_secs` left.
    pub fn decision_iters_for(&self, clock_secs: f64) -> usize {
        if clock_secs < self.low_clock_secs {
            self.low_clock_iters
        } else {
            self.decision_iters
        }
    }
}

/// Which quantity discounts our hand when the small blind raised into us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SbRaiseDiscount {
    /// Number of small-blind raises seen in the match. Any sighting
    /// discounts by at least 2, so the big blind folds to every raise once
    /// one has been seen. Kept as the default to match the tuned agent.
    RawCount,
    /// Learned small-blind raise rate, falling back to the prior.
    Rate,
}

/// Preflop thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreflopConfig {
    /// Small blind folds below this baseline equity.
    pub sb_fold_below: f64,
    /// Small blind limps below this, opens otherwise.
    pub sb_limp_below: f64,
    pub sb_open_size: u32,
    /// Raise rate assumed before the model has one.
    pub prior_raise_rate: f64,
    /// Hand strength loses `scale * rate^2` when facing a raise.
    pub raise_discount_scale: f64,
    /// Re-raise a raise above this raw equity.
    pub reraise_above: f64,
    /// Re-raise to this multiple of the pot after calling.
    pub reraise_pot_multiple: f64,
    /// Big blind raises a limp above this equity, and with probability
    /// equal to equity below it.
    pub iso_raise_above: f64,
    pub iso_raise_size: u32,
    pub sb_raise_discount: SbRaiseDiscount,
}

impl Default for PreflopConfig {
    fn default() -> Self {
        Self {
            sb_fold_below: 0.39,
            sb_limp_below: 0.50,
            sb_open_size: 6,
            prior_raise_rate: 0.2,
            raise_discount_scale: 2.0,
            reraise_above: 0.7,
            reraise_pot_multiple: 2.5,
            iso_raise_above: 0.7,
            iso_raise_size: 12,
            sb_raise_discount: SbRaiseDiscount::RawCount,
        }
    }
}

/// Post-flop thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostflopConfig {
    /// Subtracted from equity when the opponent's last action was a raise.
    pub intimidation_raise: f64,
    pub intimidation_call: f64,
    pub intimidation_check: f64,
    /// Penalty per earlier bet on the board this round, before decay.
    pub repeat_bet_penalty: f64,
    /// Decay of the repeat-bet penalty with the opponent's raise rate.
    pub repeat_bet_decay: f64,
    /// From this round on, use revealed bet strengths instead of the
    /// intimidation heuristic.
    pub sample_model_from_round: u32,
    /// Neighbours consulted in the bet-size regression.
    pub nearest_samples: usize,
    pub sample_exponent_base: f64,
    pub sample_raise_rate_pivot: f64,
    /// Raise instead of calling only above this adjusted equity.
    pub raise_over_call_above: f64,
    /// Share of the opponent's fold rate added to equity when we act first.
    pub fold_rate_bonus: f64,
}

impl Default for PostflopConfig {
    fn default() -> Self {
        Self {
            intimidation_raise: 0.2,
            intimidation_call: 0.07,
            intimidation_check: 0.0,
            repeat_bet_penalty: 0.5,
            repeat_bet_decay: 10.0,
            sample_model_from_round: 30,
            nearest_samples: 55,
            sample_exponent_base: 2.0,
            sample_raise_rate_pivot: 0.25,
            raise_over_call_above: 0.5,
            fold_rate_bonus: 0.5,
        }
    }
}

/// Opponent model cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Rates are recomputed every this many rounds.
    pub refresh_every: u32,
    /// Raise and fold rates are first computed at this round.
    pub rates_from_round: u32,
    /// Board ranking and seat rates are first computed at this round.
    pub ranking_from_round: u32,
    /// Board strength assumed for a board with no reveal yet.
    pub default_board_strength: f64,
    /// Added per board index to revealed strengths to break ranking ties.
    pub board_strength_offset: f64,
    /// Call sightings only count from this round on.
    pub call_tracking_from_round: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            refresh_every: 10,
            rates_from_round: 29,
            ranking_from_round: 14,
            default_board_strength: 0.6,
            board_strength_offset: 0.015,
            call_tracking_from_round: 3,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{name} = {value} is out of range [0, 1]")]
    OutOfUnitRange { name: &'static str, value: f64 },
    #[error("{0} must be positive")]
    NotPositive(&'static str),
    #[error("blinds must satisfy 0 < small ({small}) < big ({big})")]
    InvalidBlinds { small: u32, big: u32 },
}

impl StrategyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method: set the match length.
    pub fn with_num_rounds(mut self, rounds: u32) -> Self {
        self.rules.num_rounds = rounds;
        self
    }

    /// Builder method: set the in-round sample count.
    pub fn with_decision_iters(mut self, iters: usize) -> Self {
        self.sampling.decision_iters = iters;
        self
    }

    /// Builder method: choose the small-blind raise discount.
    pub fn with_sb_raise_discount(mut self, discount: SbRaiseDiscount) -> Self {
        self.preflop.sb_raise_discount = discount;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;
        if rules.small_blind == 0 || rules.small_blind >= rules.big_blind {
            return Err(ConfigError::InvalidBlinds {
                small: rules.small_blind,
                big: rules.big_blind,
            });
        }
        if rules.num_rounds == 0 {
            return Err(ConfigError::NotPositive("rules.num_rounds"));
        }

        let s = &self.sampling;
        for (name, iters) in [
            ("sampling.decision_iters", s.decision_iters),
            ("sampling.backfill_iters", s.backfill_iters),
            ("sampling.showdown_iters", s.showdown_iters),
            ("sampling.low_clock_iters", s.low_clock_iters),
        ] {
            if iters == 0 {
                return Err(ConfigError::NotPositive(name));
            }
        }
        if self.model.refresh_every == 0 {
            return Err(ConfigError::NotPositive("model.refresh_every"));
        }
        if self.postflop.nearest_samples == 0 {
            return Err(ConfigError::NotPositive("postflop.nearest_samples"));
        }

        let p = &self.preflop;
        let q = &self.postflop;
        for (name, value) in [
            ("preflop.sb_fold_below", p.sb_fold_below),
            ("preflop.sb_limp_below", p.sb_limp_below),
            ("preflop.prior_raise_rate", p.prior_raise_rate),
            ("preflop.reraise_above", p.reraise_above),
            ("preflop.iso_raise_above", p.iso_raise_above),
            ("postflop.raise_over_call_above", q.raise_over_call_above),
            ("model.default_board_strength", self.model.default_board_strength),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }
        Ok(())
    }
}
