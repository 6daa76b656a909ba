//! Cards, showdown ranking and canonical preflop keys.

pub mod card;
pub mod hand_eval;
pub mod pair_key;

pub use card::{parse_cards, Card, CardParseError, Deck, HoleCards, Street};
pub use hand_eval::{compare, evaluate, HandCategory, HandRank};
pub use pair_key::{PairKey, NUM_PAIR_KEYS};
