//! Canonical preflop pair keys.
//!
//! There are 169 strategically distinct two-card holdings:
//! - 13 pairs (22-AA)
//! - 78 suited hands (32s-AKs)
//! - 78 offsuit hands (32o-AKo)
//!
//! `PairKey` collapses a concrete `HoleCards` onto one of them; the key is
//! independent of the order the two cards were dealt in.

use super::card::{Card, CardParseError, HoleCards, RANK_CHARS};
use std::fmt;
use std::str::FromStr;

/// Number of canonical preflop holdings.
pub const NUM_PAIR_KEYS: usize = 169;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PairKey {
    Pair(u8),
    Suited { high: u8, low: u8 },
    Offsuit { high: u8, low: u8 },
}

impl PairKey {
    pub fn of(a: Card, b: Card) -> Self {
        let (high, low) = if a.rank() >= b.rank() {
            (a.rank(), b.rank())
        } else {
            (b.rank(), a.rank())
        };
        if high == low {
            PairKey::Pair(high)
        } else if a.suit() == b.suit() {
            PairKey::Suited { high, low }
        } else {
            PairKey::Offsuit { high, low }
        }
    }

    pub fn from_hole(hole: &HoleCards) -> Self {
        Self::of(hole.card1, hole.card2)
    }

    /// Dense index 0-168: pairs first, then suited, then offsuit; unpaired
    /// hands ordered by (high, low).
    pub fn index(&self) -> usize {
        match *self {
            PairKey::Pair(rank) => rank as usize,
            PairKey::Suited { high, low } => 13 + triangle(high, low),
            PairKey::Offsuit { high, low } => 91 + triangle(high, low),
        }
    }

    /// Inverse of [`PairKey::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0..=12 => Some(PairKey::Pair(index as u8)),
            13..=90 => {
                let (high, low) = untriangle(index - 13);
                Some(PairKey::Suited { high, low })
            }
            91..=168 => {
                let (high, low) = untriangle(index - 91);
                Some(PairKey::Offsuit { high, low })
            }
            _ => None,
        }
    }

    /// All 169 keys in index order.
    pub fn all() -> impl Iterator<Item = PairKey> {
        (0..NUM_PAIR_KEYS).filter_map(Self::from_index)
    }

    /// A concrete holding with this key, for simulations that need cards.
    pub fn representative(&self) -> HoleCards {
        match *self {
            PairKey::Pair(rank) => HoleCards::new(Card::new(rank, 3), Card::new(rank, 2)),
            PairKey::Suited { high, low } => {
                HoleCards::new(Card::new(high, 3), Card::new(low, 3))
            }
            PairKey::Offsuit { high, low } => {
                HoleCards::new(Card::new(high, 3), Card::new(low, 2))
            }
        }
    }

    /// Number of concrete holdings collapsing onto this key.
    pub fn num_combos(&self) -> u8 {
        match self {
            PairKey::Pair(_) => 6,
            PairKey::Suited { .. } => 4,
            PairKey::Offsuit { .. } => 12,
        }
    }
}

impl From<&HoleCards> for PairKey {
    fn from(hole: &HoleCards) -> Self {
        Self::from_hole(hole)
    }
}

fn triangle(high: u8, low: u8) -> usize {
    debug_assert!(low < high);
    high as usize * (high as usize - 1) / 2 + low as usize
}

fn untriangle(offset: usize) -> (u8, u8) {
    let mut high = 1usize;
    while (high + 1) * high / 2 <= offset {
        high += 1;
    }
    let low = offset - high * (high - 1) / 2;
    (high as u8, low as u8)
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = |r: u8| RANK_CHARS[r as usize];
        match *self {
            PairKey::Pair(r) => write!(f, "{}{}", c(r), c(r)),
            PairKey::Suited { high, low } => write!(f, "{}{}s", c(high), c(low)),
            PairKey::Offsuit { high, low } => write!(f, "{}{}o", c(high), c(low)),
        }
    }
}

impl FromStr for PairKey {
    type Err = CardParseError;

    /// Parse shorthand like "AA", "AKs", "T9o" (either rank order).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        let rank = |ch: char| {
            RANK_CHARS
                .iter()
                .position(|&r| r == ch.to_ascii_uppercase())
                .map(|p| p as u8)
                .ok_or(CardParseError::Rank(ch))
        };
        match chars.as_slice() {
            [a, b] => {
                let (a, b) = (rank(*a)?, rank(*b)?);
                if a == b {
                    Ok(PairKey::Pair(a))
                } else {
                    Err(CardParseError::Length(s.to_string()))
                }
            }
            [a, b, kind] => {
                let (a, b) = (rank(*a)?, rank(*b)?);
                if a == b {
                    return Err(CardParseError::Length(s.to_string()));
                }
                let (high, low) = (a.max(b), a.min(b));
                match kind.to_ascii_lowercase() {
                    's' => Ok(PairKey::Suited { high, low }),
                    'o' => Ok(PairKey::Offsuit { high, low }),
                    other => Err(CardParseError::Suit(other)),
                }
            }
            _ => Err(CardParseError::Length(s.to_string())),
        }
    }
}
