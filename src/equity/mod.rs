//! Hand strength: the static preflop table and the Monte Carlo estimator.

pub mod estimator;
pub mod table;

pub use estimator::{EquityEstimator, WinDraw};
pub use table::{EquityTable, PairEquity, TableEntry, TableError, TableFile};
