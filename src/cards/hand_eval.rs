//! Showdown hand ranking.
//!
//! Ranks the best five-card hand that can be made from 5 to 7 cards. The
//! evaluator works directly on rank counts and per-suit rank masks, so a
//! seven-card hand costs one pass over the cards instead of 21 five-card
//! evaluations; the Monte Carlo estimator calls it twice per trial.

use super::card::Card;
use std::cmp::Ordering;

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// A comparable hand strength. Higher values are better hands.
/// Format: category (4 bits) | kicker1 (4 bits) | ... | kicker5 (4 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandRank(u32);

impl HandRank {
    fn new(category: HandCategory, kickers: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &k) in kickers.iter().take(5).enumerate() {
            value |= (k as u32) << (16 - i * 4);
        }
        Self(value)
    }

    pub fn category(&self) -> HandCategory {
        match self.0 >> 20 {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            _ => HandCategory::StraightFlush,
        }
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// Rank the best five-card hand among `cards`.
///
/// # Panics
/// If `cards` holds fewer than 5 or more than 7 cards.
pub fn evaluate(cards: &[Card]) -> HandRank {
    assert!(
        (5..=7).contains(&cards.len()),
        "cannot rank a hand of {} cards",
        cards.len()
    );

    let mut rank_counts = [0u8; 13];
    let mut suit_masks = [0u16; 4];
    let mut rank_bits = 0u16;
    for card in cards {
        rank_counts[card.rank() as usize] += 1;
        suit_masks[card.suit() as usize] |= 1 << card.rank();
        rank_bits |= 1 << card.rank();
    }

    // With at most 7 cards only one suit can reach five.
    let flush_mask = suit_masks.iter().copied().find(|m| m.count_ones() >= 5);

    if let Some(mask) = flush_mask {
        if let Some(high) = straight_high(mask) {
            return HandRank::new(HandCategory::StraightFlush, &[high]);
        }
    }

    let mut quads = None;
    let mut trips = [0u8; 2];
    let mut num_trips = 0;
    let mut pairs = [0u8; 3];
    let mut num_pairs = 0;
    for rank in (0..13u8).rev() {
        match rank_counts[rank as usize] {
            4 => quads = Some(rank),
            3 => {
                trips[num_trips] = rank;
                num_trips += 1;
            }
            2 => {
                pairs[num_pairs] = rank;
                num_pairs += 1;
            }
            _ => {}
        }
    }

    if let Some(quad) = quads {
        let kicker = top_ranks(rank_bits & !(1 << quad), 1);
        return HandRank::new(HandCategory::FourOfAKind, &[quad, kicker[0]]);
    }

    if num_trips > 0 && (num_trips > 1 || num_pairs > 0) {
        let pair = if num_trips > 1 { trips[1].max(pairs[0]) } else { pairs[0] };
        return HandRank::new(HandCategory::FullHouse, &[trips[0], pair]);
    }

    if let Some(mask) = flush_mask {
        return HandRank::new(HandCategory::Flush, &top_ranks(mask, 5));
    }

    if let Some(high) = straight_high(rank_bits) {
        return HandRank::new(HandCategory::Straight, &[high]);
    }

    if num_trips == 1 {
        let kickers = top_ranks(rank_bits & !(1 << trips[0]), 2);
        return HandRank::new(HandCategory::ThreeOfAKind, &[trips[0], kickers[0], kickers[1]]);
    }

    if num_pairs >= 2 {
        let kicker = top_ranks(rank_bits & !(1 << pairs[0]) & !(1 << pairs[1]), 1);
        return HandRank::new(HandCategory::TwoPair, &[pairs[0], pairs[1], kicker[0]]);
    }

    if num_pairs == 1 {
        let k = top_ranks(rank_bits & !(1 << pairs[0]), 3);
        return HandRank::new(HandCategory::OnePair, &[pairs[0], k[0], k[1], k[2]]);
    }

    HandRank::new(HandCategory::HighCard, &top_ranks(rank_bits, 5))
}

/// Compare two holdings sharing a board. `Greater` means `ours` wins.
pub fn compare(ours: &[Card; 2], theirs: &[Card; 2], board: &[Card]) -> Ordering {
    let mut a = [ours[0]; 7];
    let mut b = [theirs[0]; 7];
    a[1] = ours[1];
    b[1] = theirs[1];
    a[2..2 + board.len()].copy_from_slice(board);
    b[2..2 + board.len()].copy_from_slice(board);
    let n = 2 + board.len();
    evaluate(&a[..n]).cmp(&evaluate(&b[..n]))
}

/// The `n` highest ranks set in `mask`, padded with zeros.
fn top_ranks(mask: u16, n: usize) -> [u8; 5] {
    let mut out = [0u8; 5];
    let mut found = 0;
    for rank in (0..13u8).rev() {
        if found == n {
            break;
        }
        if mask & (1 << rank) != 0 {
            out[found] = rank;
            found += 1;
        }
    }
    out
}

/// High card of the best straight in a rank mask. The wheel (A-2-3-4-5)
/// reports the five as its high card.
fn straight_high(rank_bits: u16) -> Option<u8> {
    for high in (4..13u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if rank_bits & window == window {
            return Some(high);
        }
    }
    let wheel = 0b1_0000_0000_1111u16;
    if rank_bits & wheel == wheel {
        return Some(3);
    }
    None
}
