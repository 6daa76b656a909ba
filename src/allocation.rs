//! Round-start card allocation.
//!
//! Six hole cards are split into three pairs, one per board. Every one of
//! the 15 ways to pair up six cards is scored with the preflop table and the
//! strongest split wins; the pairs are then spread over the boards either by
//! a fixed pattern or, once the opponent model has a ranking, against the
//! boards where the opponent has shown the weakest hands.

use crate::cards::{Card, HoleCards};
use crate::engine::{NUM_BOARDS, NUM_HOLE_CARDS};
use crate::equity::EquityTable;

/// The 15 partitions of six card slots into three pairs, in the order they
/// are tried. Ties keep the earliest partition.
pub const PARTITIONS: [[(usize, usize); 3]; 15] = [
    [(0, 1), (2, 3), (4, 5)],
    [(0, 1), (2, 4), (3, 5)],
    [(0, 1), (2, 5), (3, 4)],
    [(0, 2), (1, 3), (4, 5)],
    [(0, 2), (1, 4), (3, 5)],
    [(0, 2), (1, 5), (3, 4)],
    [(0, 3), (1, 2), (4, 5)],
    [(0, 3), (1, 4), (2, 5)],
    [(0, 3), (1, 5), (2, 4)],
    [(0, 4), (1, 2), (3, 5)],
    [(0, 4), (1, 3), (2, 5)],
    [(0, 4), (1, 5), (2, 3)],
    [(0, 5), (1, 2), (3, 4)],
    [(0, 5), (1, 3), (2, 4)],
    [(0, 5), (1, 4), (2, 3)],
];

/// Board index receiving each pair when no opponent ranking exists,
/// indexed weakest to strongest.
const DEFAULT_BOARD_FOR_RANK: [usize; NUM_BOARDS] = [2, 0, 1];

/// Pairs placed on each board, with the baseline equity of each.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub pairs: [HoleCards; NUM_BOARDS],
    pub baseline: [f64; NUM_BOARDS],
}

impl Allocation {
    /// Every round-start card except the ones on `board`.
    pub fn dead_cards(&self, board: usize) -> Vec<Card> {
        self.pairs
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != board)
            .flat_map(|(_, hole)| hole.cards())
            .collect()
    }
}

/// Split `cards` into three pairs and place them on the boards.
///
/// `opponent_ranking` lists board indices from the opponent's weakest
/// observed board to its strongest. The board at ranking position `n`
/// receives our pair at strength position `(n + 1) % 3`.
///
/// # Panics
/// If the six cards are not distinct.
pub fn allocate(
    cards: &[Card; NUM_HOLE_CARDS],
    table: &EquityTable,
    opponent_ranking: Option<&[usize; NUM_BOARDS]>,
) -> Allocation {
    let mut seen = 0u64;
    for card in cards {
        assert!(seen & card.bit() == 0, "card {} dealt twice", card);
        seen |= card.bit();
    }

    let score_partition = |partition: [(usize, usize); 3]| {
        let mut scored = partition.map(|(a, b)| {
            let hole = HoleCards::new(cards[a], cards[b]);
            (hole, table.baseline_of(&hole))
        });
        scored.sort_by(|x, y| x.1.total_cmp(&y.1));
        let score: f64 = scored.iter().map(|(_, eq)| eq).sum();
        (scored, score)
    };

    let (mut sorted, mut best) = score_partition(PARTITIONS[0]);
    for partition in &PARTITIONS[1..] {
        let (scored, score) = score_partition(*partition);
        if score > best {
            sorted = scored;
            best = score;
        }
    }

    let mut pairs = [sorted[0].0; NUM_BOARDS];
    let mut baseline = [0.0; NUM_BOARDS];
    match opponent_ranking {
        Some(ranking) => {
            for (position, &board) in ranking.iter().enumerate() {
                let (hole, eq) = sorted[(position + 1) % NUM_BOARDS];
                pairs[board] = hole;
                baseline[board] = eq;
            }
        }
        None => {
            for (strength, &board) in DEFAULT_BOARD_FOR_RANK.iter().enumerate() {
                pairs[board] = sorted[strength].0;
                baseline[board] = sorted[strength].1;
            }
        }
    }
    Allocation { pairs, baseline }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, PairKey};
    use crate::equity::PairEquity;
    use proptest::prelude::*;

    fn six(s: &str) -> [Card; 6] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1], v[2], v[3], v[4], v[5]]
    }

    fn shipped_table() -> EquityTable {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/preflop_equity.json");
        EquityTable::from_json_file(path).unwrap()
    }

    fn sorted_ids(cards: impl IntoIterator<Item = Card>) -> Vec<u8> {
        let mut ids: Vec<u8> = cards.into_iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_partitions_are_distinct_and_complete() {
        let mut keys: Vec<Vec<(usize, usize)>> = PARTITIONS.iter().map(|p| p.to_vec()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 15);
        for p in &PARTITIONS {
            let mut slots: Vec<usize> = p.iter().flat_map(|&(a, b)| [a, b]).collect();
            slots.sort_unstable();
            assert_eq!(slots, vec![0, 1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_pairs_up_matching_ranks() {
        let table = shipped_table();
        let alloc = allocate(&six("As Ad 7c 2h Kh Kc"), &table, None);
        let keys: Vec<String> = alloc.pairs.iter().map(|h| PairKey::from_hole(h).to_string()).collect();
        assert!(keys.contains(&"AA".to_string()), "{:?}", keys);
        assert!(keys.contains(&"KK".to_string()), "{:?}", keys);
        assert!(keys.contains(&"72o".to_string()), "{:?}", keys);
    }

    #[test]
    fn test_default_placement() {
        let table = shipped_table();
        let alloc = allocate(&six("As Ad 7c 2h Kh Kc"), &table, None);
        // Middle on board 0, strongest on board 1, weakest on board 2.
        assert_eq!(PairKey::from_hole(&alloc.pairs[0]).to_string(), "KK");
        assert_eq!(PairKey::from_hole(&alloc.pairs[1]).to_string(), "AA");
        assert_eq!(PairKey::from_hole(&alloc.pairs[2]).to_string(), "72o");
        for (hole, eq) in alloc.pairs.iter().zip(alloc.baseline) {
            assert_eq!(eq, table.baseline_of(hole));
        }
    }

    #[test]
    fn test_ranked_placement_rotates() {
        let table = shipped_table();
        // Opponent weakest on board 1, then board 2, strongest on board 0.
        let alloc = allocate(&six("As Ad 7c 2h Kh Kc"), &table, Some(&[1, 2, 0]));
        assert_eq!(PairKey::from_hole(&alloc.pairs[1]).to_string(), "KK");
        assert_eq!(PairKey::from_hole(&alloc.pairs[2]).to_string(), "AA");
        assert_eq!(PairKey::from_hole(&alloc.pairs[0]).to_string(), "72o");
    }

    #[test]
    fn test_ties_keep_first_partition() {
        let flat = EquityTable::from_fn(|_| PairEquity { win_prob: 0.5, draw_prob: 0.0 });
        let cards = six("As Kd 9c 7h 5s 3d");
        let alloc = allocate(&cards, &flat, None);
        // First partition is {01, 23, 45}; with equal scores the sort is
        // stable so slot order is kept: 01 weakest, 23 middle, 45 strongest.
        assert_eq!(alloc.pairs[2], HoleCards::new(cards[0], cards[1]));
        assert_eq!(alloc.pairs[0], HoleCards::new(cards[2], cards[3]));
        assert_eq!(alloc.pairs[1], HoleCards::new(cards[4], cards[5]));
    }

    #[test]
    fn test_dead_cards_exclude_board() {
        let table = shipped_table();
        let cards = six("As Ad 7c 2h Kh Kc");
        let alloc = allocate(&cards, &table, None);
        let dead = alloc.dead_cards(1);
        assert_eq!(dead.len(), 4);
        assert!(!dead.iter().any(|c| alloc.pairs[1].contains(*c)));
    }

    #[test]
    #[should_panic(expected = "dealt twice")]
    fn test_duplicate_cards_rejected() {
        let table = shipped_table();
        let _ = allocate(&six("As As 7c 2h Kh Kc"), &table, None);
    }

    proptest! {
        #[test]
        fn allocation_partitions_input(
            ids in proptest::sample::subsequence((0u8..52).collect::<Vec<_>>(), 6).prop_shuffle(),
            ranked in any::<bool>(),
        ) {
            let table = EquityTable::from_fn(|key| PairEquity {
                win_prob: 0.3 + key.index() as f64 / 400.0,
                draw_prob: 0.01,
            });
            let cards: [Card; 6] = std::array::from_fn(|i| Card::from_id(ids[i]));
            let ranking = [2, 0, 1];
            let alloc = allocate(&cards, &table, ranked.then_some(&ranking));
            let used = sorted_ids(alloc.pairs.iter().flat_map(|h| h.cards()));
            prop_assert_eq!(used, sorted_ids(cards));
            for (hole, eq) in alloc.pairs.iter().zip(alloc.baseline) {
                prop_assert_eq!(eq, table.baseline_of(hole));
            }
        }
    }
}
