//! The agent: owns the match-long state and answers the engine callbacks.
//!
//! Per round the agent allocates its six cards once, caches one equity per
//! board and street, and buffers what it sees. Only the opponent model and
//! the checkfold flag survive from one round to the next.

use crate::allocation::{allocate, Allocation};
use crate::cards::Street;
use crate::config::{ConfigError, StrategyConfig};
use crate::engine::{
    Action, Bot, DecisionRequest, GameInfo, LegalActions, RoundOutcome, RoundStart, NUM_BOARDS,
};
use crate::equity::{EquityEstimator, EquityTable};
use crate::opponent::{OpponentModel, RoundObservations};
use crate::policy::{checkfold, ChipBudget, EquitySnapshot, Policy, PolicyError, Spot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Three-board agent.
///
/// Generic over its random source so tests can drive the random branches.
///
/// # Example
/// ```
/// use triboard_agent::{Agent, EquityTable, StrategyConfig};
///
/// let table = EquityTable::from_json_file(concat!(
///     env!("CARGO_MANIFEST_DIR"),
///     "/data/preflop_equity.json"
/// ))
/// .unwrap();
/// let agent = Agent::with_seed(StrategyConfig::default(), table, 42).unwrap();
/// assert!(!agent.is_checkfolding());
/// ```
pub struct Agent<R: Rng = StdRng> {
    config: StrategyConfig,
    table: EquityTable,
    estimator: EquityEstimator,
    model: OpponentModel,
    rng: R,

    allocation: Option<Allocation>,
    equity: EquitySnapshot,
    observations: RoundObservations,

    /// Once set, every remaining board is folded.
    checkfold: bool,
}

impl Agent<StdRng> {
    pub fn new(config: StrategyConfig, table: EquityTable) -> Result<Self, ConfigError> {
        Self::with_rng(config, table, StdRng::from_entropy())
    }

    pub fn with_seed(config: StrategyConfig, table: EquityTable, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, table, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Agent<R> {
    /// Build an agent, rejecting configs that fail [`StrategyConfig::validate`].
    pub fn with_rng(config: StrategyConfig, table: EquityTable, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let model = OpponentModel::new(config.model.clone(), &config.sampling);
        Ok(Self {
            config,
            table,
            estimator: EquityEstimator::new(),
            model,
            rng,
            allocation: None,
            equity: EquitySnapshot::new(),
            observations: RoundObservations::new(),
            checkfold: false,
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn model(&self) -> &OpponentModel {
        &self.model
    }

    /// This round's allocation, once the cards are known.
    pub fn allocation(&self) -> Option<&Allocation> {
        self.allocation.as_ref()
    }

    pub fn observations(&self) -> &RoundObservations {
        &self.observations
    }

    pub fn is_checkfolding(&self) -> bool {
        self.checkfold
    }

    fn start_round(&mut self, allocation: Allocation) {
        self.equity = EquitySnapshot::seeded(allocation.baseline);
        self.allocation = Some(allocation);
    }

    fn decide_board(
        &mut self,
        game: &GameInfo,
        request: &DecisionRequest,
        board: usize,
        budget: &mut ChipBudget,
    ) -> Action {
        let view = &request.boards[board];
        let Some(allocation) = self.allocation.as_ref() else {
            return Action::Check;
        };
        if view.can(LegalActions::ASSIGN) {
            return Action::Assign(allocation.pairs[board]);
        }
        if view.terminal {
            return Action::Check;
        }
        if self.checkfold {
            return if view.can(LegalActions::FOLD) {
                Action::Fold
            } else {
                Action::Check
            };
        }

        let spot = Spot {
            board,
            view,
            street: request.street,
            seat: request.seat,
            round_num: game.round_num,
        };
        let policy = Policy::new(&self.config, &self.model);

        match request.street {
            Street::Preflop => {
                let equity = self
                    .equity
                    .get_or_compute(board, Street::Preflop, || allocation.baseline[board]);
                policy.preflop(&spot, equity, &mut self.observations, budget, &mut self.rng)
            }
            street => {
                let hole = allocation.pairs[board];
                let dead = allocation.dead_cards(board);
                let iters = self.config.sampling.decision_iters_for(game.game_clock);
                let estimator = &self.estimator;
                let rng = &mut self.rng;
                let equity = self.equity.get_or_compute(board, street, || {
                    estimator.estimate(&hole, &view.community, &dead, None, iters, rng)
                });
                policy.postflop(&spot, equity, &mut self.observations, budget, &mut self.rng)
            }
        }
    }
}

impl<R: Rng> Bot for Agent<R> {
    fn handle_new_round(&mut self, game: &GameInfo, round: &RoundStart) {
        self.observations.clear();

        if !self.checkfold
            && checkfold::lead_is_safe(
                &self.config.rules,
                &self.config.checkfold,
                game.round_num,
                round.seat,
                game.bankroll_lead(),
            )
        {
            self.checkfold = true;
            let summary = serde_json::to_string(&self.model.summary()).unwrap_or_default();
            info!(
                round = game.round_num,
                lead = game.bankroll_lead(),
                %summary,
                "lead is safe, folding out the match"
            );
        }

        let allocation = allocate(&round.cards, &self.table, self.model.board_strength_ranking());
        debug!(round = game.round_num, pairs = ?allocation.pairs, "cards allocated");
        self.start_round(allocation);
        self.model.refresh_rates(game.round_num);
    }

    fn handle_round_over(&mut self, game: &GameInfo, outcome: &RoundOutcome) {
        self.model.record_round(
            game.round_num,
            outcome,
            &self.observations,
            &self.table,
            &self.estimator,
            &mut self.rng,
        );
        debug!(
            round = game.round_num,
            delta = outcome.delta,
            street = %outcome.street,
            "round over"
        );

        if game.round_num == self.config.rules.num_rounds {
            let summary = serde_json::to_string(&self.model.summary()).unwrap_or_default();
            info!(
                bankroll = game.bankroll,
                clock = game.game_clock,
                checkfold = self.checkfold,
                %summary,
                "match finished"
            );
        }

        self.allocation = None;
        self.equity.clear();
        self.observations.clear();
    }

    fn get_actions(
        &mut self,
        game: &GameInfo,
        request: &DecisionRequest,
    ) -> Result<[Action; NUM_BOARDS], PolicyError> {
        // Nothing is recorded for the round unless every board is playable.
        if let Some((board, view)) = request
            .boards
            .iter()
            .enumerate()
            .find(|(_, view)| !view.legal.is_recognized())
        {
            return Err(PolicyError::UnhandledLegality {
                board,
                legal: view.legal,
            });
        }

        if self.allocation.is_none() {
            let allocation = allocate(&request.my_cards, &self.table, self.model.board_strength_ranking());
            self.start_round(allocation);
            self.model.refresh_rates(game.round_num);
        }

        let mut budget = ChipBudget::new(request.my_stack);
        let mut actions = [Action::Check; NUM_BOARDS];
        for (board, slot) in actions.iter_mut().enumerate() {
            let action = self.decide_board(game, request, board, &mut budget);
            if action == Action::Fold {
                self.observations.mark_folded(board);
            }
            *slot = action;
        }

        debug!(
            round = game.round_num,
            street = %request.street,
            committed = budget.committed(),
            actions = ?actions,
            "decision"
        );
        Ok(actions)
    }
}
