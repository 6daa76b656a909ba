//! Static preflop equity table.
//!
//! Maps each of the 169 canonical holdings to its win and draw probability
//! against a random hand. The table is loaded once at startup and never
//! written afterwards. Loading rejects tables that miss a holding, so
//! lookups during play cannot fail.

use crate::cards::{HoleCards, PairKey, NUM_PAIR_KEYS};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Win and draw probability of one holding against a random hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairEquity {
    pub win_prob: f64,
    pub draw_prob: f64,
}

impl PairEquity {
    /// Equity with ties counted as half a win.
    #[inline]
    pub fn baseline(&self) -> f64 {
        self.win_prob + 0.5 * self.draw_prob
    }
}

/// One row of the on-disk table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    /// Shorthand such as "AA", "AKs", "72o".
    pub hand: String,
    pub win_prob: f64,
    pub draw_prob: f64,
}

/// On-disk layout of the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFile {
    pub version: String,
    #[serde(default)]
    pub samples_per_hand: Option<u64>,
    pub entries: Vec<TableEntry>,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read equity table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse equity table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown holding {0:?}")]
    UnknownHand(String),
    #[error("holding {0} appears twice")]
    DuplicateKey(PairKey),
    #[error("holding {0} is missing")]
    MissingKey(PairKey),
    #[error("holding {key} has invalid probabilities win={win} draw={draw}")]
    InvalidProbability { key: PairKey, win: f64, draw: f64 },
}

/// Exhaustive canonical-holding → equity table.
#[derive(Debug, Clone)]
pub struct EquityTable {
    entries: [PairEquity; NUM_PAIR_KEYS],
}

impl EquityTable {
    /// Load from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let file: TableFile = serde_json::from_str(json)?;
        Self::from_entries(&file.entries)
    }

    /// Build from rows, checking that every holding appears exactly once.
    pub fn from_entries(rows: &[TableEntry]) -> Result<Self, TableError> {
        let mut seen: FxHashMap<PairKey, PairEquity> =
            FxHashMap::with_capacity_and_hasher(NUM_PAIR_KEYS, Default::default());

        for row in rows {
            let key: PairKey = row
                .hand
                .parse()
                .map_err(|_| TableError::UnknownHand(row.hand.clone()))?;
            let equity = PairEquity {
                win_prob: row.win_prob,
                draw_prob: row.draw_prob,
            };
            validate(key, &equity)?;
            if seen.insert(key, equity).is_some() {
                return Err(TableError::DuplicateKey(key));
            }
        }

        let mut entries = [PairEquity { win_prob: 0.0, draw_prob: 0.0 }; NUM_PAIR_KEYS];
        for key in PairKey::all() {
            entries[key.index()] = *seen.get(&key).ok_or(TableError::MissingKey(key))?;
        }
        Ok(Self { entries })
    }

    /// Build by evaluating `f` for every holding.
    pub fn from_fn(mut f: impl FnMut(PairKey) -> PairEquity) -> Self {
        let mut entries = [PairEquity { win_prob: 0.0, draw_prob: 0.0 }; NUM_PAIR_KEYS];
        for key in PairKey::all() {
            entries[key.index()] = f(key);
        }
        Self { entries }
    }

    #[inline]
    pub fn get(&self, key: PairKey) -> PairEquity {
        self.entries[key.index()]
    }

    /// `win + 0.5 * draw` for a holding.
    #[inline]
    pub fn baseline(&self, key: PairKey) -> f64 {
        self.get(key).baseline()
    }

    #[inline]
    pub fn baseline_of(&self, hole: &HoleCards) -> f64 {
        self.baseline(PairKey::from_hole(hole))
    }

    /// Serializable rows in index order.
    pub fn to_file(&self, samples_per_hand: Option<u64>) -> TableFile {
        TableFile {
            version: "1.0".to_string(),
            samples_per_hand,
            entries: PairKey::all()
                .map(|key| {
                    let eq = self.get(key);
                    TableEntry {
                        hand: key.to_string(),
                        win_prob: eq.win_prob,
                        draw_prob: eq.draw_prob,
                    }
                })
                .collect(),
        }
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P, samples_per_hand: Option<u64>) -> Result<(), TableError> {
        let json = serde_json::to_string_pretty(&self.to_file(samples_per_hand))?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn validate(key: PairKey, eq: &PairEquity) -> Result<(), TableError> {
    let in_unit = |p: f64| (0.0..=1.0).contains(&p);
    if !in_unit(eq.win_prob) || !in_unit(eq.draw_prob) || eq.win_prob + eq.draw_prob > 1.0 + 1e-9 {
        return Err(TableError::InvalidProbability {
            key,
            win: eq.win_prob,
            draw: eq.draw_prob,
        });
    }
    Ok(())
}
