//! What we learn about the opponent.
//!
//! [`RoundObservations`] collects sightings during a round; at round end
//! they are merged into the long-lived [`OpponentModel`].

pub mod model;
pub mod observations;
pub mod samples;

pub use model::{ModelSummary, OpponentModel};
pub use observations::{BetObservation, OpponentAction, RoundObservations};
pub use samples::{BetStrengthSamples, NeighborStrength};
