//! # Triboard Agent
//!
//! Decision core of a bot for three-board heads-up Hold'em: six hole cards
//! are dealt each round, split into three pairs and played on three
//! simultaneous boards that share one chip stack and one match clock.
//!
//! ## Features
//!
//! - **Card Allocation**: Scores all 15 ways to pair six cards with a
//!   precomputed preflop equity table
//! - **Monte Carlo Equity**: Fast 7-card evaluation against random hands
//! - **Opponent Modelling**: Fold, raise and bet-size statistics learned
//!   across rounds, including the strength revealed behind each bet size
//! - **Bounded Betting Policy**: Pot-odds decisions that never commit more
//!   chips across the boards than the stack holds
//! - **Checkfold**: Folds out the match once the lead cannot be caught
//!
//! ## Quick Start
//!
//! ```ignore
//! use triboard_agent::{Agent, Bot, EquityTable, StrategyConfig};
//!
//! let table = EquityTable::from_json_file("data/preflop_equity.json")?;
//! let mut agent = Agent::new(StrategyConfig::default(), table)?;
//!
//! // The engine runner drives the callbacks.
//! agent.handle_new_round(&game, &round_start);
//! let actions = agent.get_actions(&game, &request)?;
//! agent.handle_round_over(&game, &outcome);
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Cards, hole pairs, hand ranking and canonical pair keys
//! - [`equity`]: Preflop equity table and the Monte Carlo estimator
//! - [`allocation`]: Splitting six cards over the three boards
//! - [`opponent`]: Round observations and the long-lived opponent model
//! - [`policy`]: Preflop and post-flop betting rules
//! - [`agent`]: The [`Bot`] implementation tying it together
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Game engine (external)                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ Bot callbacks
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             Agent                               │
//! │  - checkfold switch        - per-round equity cache             │
//! │  - allocation              - round observations                 │
//! └─────────────────────────────────────────────────────────────────┘
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌──────────┐        ┌────────────┐        ┌───────────┐
//!    │Allocator │        │   Policy   │        │ Opponent  │
//!    │ + table  │        │ + estimator│        │   Model   │
//!    └──────────┘        └────────────┘        └───────────┘
//! ```

/// The [`Bot`] implementation.
pub mod agent;

/// Splitting the six round-start cards into three pairs.
pub mod allocation;

/// Cards, hands and hand ranking.
pub mod cards;

/// Tunable thresholds and sample counts.
pub mod config;

/// Types exchanged with the game engine.
pub mod engine;

/// Preflop table and Monte Carlo equity.
pub mod equity;

/// Opponent statistics.
pub mod opponent;

/// Betting decisions.
pub mod policy;

// Re-export commonly used types at crate root for convenience
pub use agent::Agent;
pub use allocation::{allocate, Allocation};
pub use cards::{Card, HoleCards, PairKey, Street};
pub use config::{ConfigError, SbRaiseDiscount, StrategyConfig};
pub use engine::{Action, Bot, DecisionRequest, GameInfo, LegalActions, RoundOutcome, RoundStart, Seat};
pub use equity::{EquityEstimator, EquityTable, TableError};
pub use opponent::OpponentModel;
pub use policy::PolicyError;
