//! Card primitives shared by every other module.
//!
//! - `Card`: a single playing card packed into a `u8`
//! - `HoleCards`: an unordered two-card holding
//! - `Street`: betting round, with the engine's street numbering
//! - `Deck`: the unseen cards left after removing everything known

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
pub const RANK_3: u8 = 1;
pub const RANK_4: u8 = 2;
pub const RANK_5: u8 = 3;
pub const RANK_6: u8 = 4;
pub const RANK_7: u8 = 5;
pub const RANK_8: u8 = 6;
pub const RANK_9: u8 = 7;
pub const RANK_T: u8 = 8;
pub const RANK_J: u8 = 9;
pub const RANK_Q: u8 = 10;
pub const RANK_K: u8 = 11;
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_CLUBS: u8 = 0;
pub const SUIT_DIAMONDS: u8 = 1;
pub const SUIT_HEARTS: u8 = 2;
pub const SUIT_SPADES: u8 = 3;

/// Rank symbols in ascending order.
pub const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Errors produced when reading card text from the engine or a data file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("card text must be two characters, got {0:?}")]
    Length(String),
    #[error("unknown rank {0:?}")]
    Rank(char),
    #[error("unknown suit {0:?}")]
    Suit(char),
}

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    /// Card index 0-51: rank * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Rank 0-12 (2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    #[inline]
    pub(crate) fn bit(&self) -> u64 {
        1u64 << self.id
    }

    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parse engine notation like "As", "Kh", "2c".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CardParseError::Length(s.to_string()));
        };
        let rank = RANK_CHARS
            .iter()
            .position(|&c| c == r.to_ascii_uppercase())
            .ok_or(CardParseError::Rank(r))?;
        let suit = SUIT_CHARS
            .iter()
            .position(|&c| c == su.to_ascii_lowercase())
            .ok_or(CardParseError::Suit(su))?;
        Ok(Self::new(rank as u8, suit as u8))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Parse a whitespace-optional run of cards like "AhKs Qd".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardParseError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() % 2 != 0 {
        return Err(CardParseError::Length(s.to_string()));
    }
    compact
        .as_bytes()
        .chunks(2)
        .map(|chunk| String::from_utf8_lossy(chunk).parse())
        .collect()
}

/// Two private cards. Stored with the higher rank first so that two
/// holdings with the same cards compare equal regardless of deal order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards {
    pub card1: Card,
    pub card2: Card,
}

impl HoleCards {
    pub fn new(a: Card, b: Card) -> Self {
        debug_assert!(a != b, "hole cards must be distinct");
        if (a.rank(), a.suit()) >= (b.rank(), b.suit()) {
            Self { card1: a, card2: b }
        } else {
            Self { card1: b, card2: a }
        }
    }

    pub fn is_suited(&self) -> bool {
        self.card1.suit() == self.card2.suit()
    }

    pub fn is_pair(&self) -> bool {
        self.card1.rank() == self.card2.rank()
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.card1, self.card2]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.card1 == card || self.card2 == card
    }
}

impl FromStr for HoleCards {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_cards(s)?.as_slice() {
            [a, b] => Ok(Self::new(*a, *b)),
            _ => Err(CardParseError::Length(s.to_string())),
        }
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Betting round of a single board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Dense index 0-3.
    pub fn index(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 1,
            Street::Turn => 2,
            Street::River => 3,
        }
    }

    /// Number of community cards showing on this street.
    pub fn num_board_cards(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    /// The engine numbers streets by their community card count (0, 3, 4, 5).
    pub fn from_engine(street: u8) -> Option<Self> {
        match street {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }

    pub fn from_board_len(len: usize) -> Option<Self> {
        u8::try_from(len).ok().and_then(Self::from_engine)
    }

    pub fn is_postflop(&self) -> bool {
        !matches!(self, Street::Preflop)
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
        }
    }
}

/// The cards nobody has seen yet.
#[derive(Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A full 52-card deck.
    pub fn new() -> Self {
        Self {
            cards: (0..52).map(Card::from_id).collect(),
        }
    }

    /// A deck with every known card taken out.
    ///
    /// # Panics
    /// If the same card is known twice; a collision means the caller
    /// handed in an impossible deal.
    pub fn without<'a>(known: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut removed = 0u64;
        for card in known {
            assert!(removed & card.bit() == 0, "card {} is known twice", card);
            removed |= card.bit();
        }
        let cards = (0..52)
            .map(Card::from_id)
            .filter(|c| removed & c.bit() == 0)
            .collect();
        Self { cards }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Draw `n` distinct cards uniformly at random without consuming them,
    /// so the same deck can be resampled for the next trial.
    ///
    /// # Panics
    /// If fewer than `n` cards remain.
    pub fn sample<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> &[Card] {
        assert!(
            n <= self.cards.len(),
            "asked for {} cards with only {} left in the deck",
            n,
            self.cards.len()
        );
        self.cards.partial_shuffle(rng, n).0
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_card_creation() {
        let ace_spades = Card::new(RANK_A, SUIT_SPADES);
        assert_eq!(ace_spades.rank(), RANK_A);
        assert_eq!(ace_spades.suit(), SUIT_SPADES);
        assert_eq!(ace_spades.to_string(), "As");

        let two_clubs = Card::new(RANK_2, SUIT_CLUBS);
        assert_eq!(two_clubs.to_string(), "2c");
    }

    #[test]
    fn test_card_parsing() {
        assert_eq!("Td".parse::<Card>().unwrap().to_string(), "Td");
        assert_eq!("kh".parse::<Card>().unwrap().to_string(), "Kh");
        assert_eq!("XX".parse::<Card>(), Err(CardParseError::Rank('X')));
        assert_eq!("Ax".parse::<Card>(), Err(CardParseError::Suit('x')));
        assert!(matches!("A".parse::<Card>(), Err(CardParseError::Length(_))));
        assert!(matches!("Asd".parse::<Card>(), Err(CardParseError::Length(_))));
    }

    #[test]
    fn test_parse_cards() {
        let cards = parse_cards("Ah Ks 2c").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2], Card::new(RANK_2, SUIT_CLUBS));
        assert!(parse_cards("AhK").is_err());
        assert!(parse_cards("").unwrap().is_empty());
    }

    #[test]
    fn test_hole_cards_order_independent() {
        let a: HoleCards = "2hAs".parse().unwrap();
        let b: HoleCards = "As2h".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.card1.rank(), RANK_A);
        assert!(!a.is_suited());
        assert!("AhAs".parse::<HoleCards>().unwrap().is_pair());
    }

    #[test]
    fn test_street_numbering() {
        assert_eq!(Street::from_engine(0), Some(Street::Preflop));
        assert_eq!(Street::from_engine(5), Some(Street::River));
        assert_eq!(Street::from_engine(2), None);
        assert_eq!(Street::from_board_len(4), Some(Street::Turn));
        assert!(!Street::Preflop.is_postflop());
        assert!(Street::Flop.is_postflop());
    }

    #[test]
    fn test_deck_without() {
        let dead = parse_cards("AsAh").unwrap();
        let deck = Deck::without(&dead);
        assert_eq!(deck.remaining(), 50);
        let mut deck = deck;
        let mut rng = StdRng::seed_from_u64(1);
        let drawn = deck.sample(50, &mut rng);
        assert!(!drawn.contains(&dead[0]));
        assert!(!drawn.contains(&dead[1]));
    }

    #[test]
    #[should_panic(expected = "known twice")]
    fn test_deck_rejects_collision() {
        let dead = parse_cards("AsAs").unwrap();
        let _ = Deck::without(&dead);
    }

    #[test]
    fn test_deck_sample_is_distinct_and_unseen() {
        let dead = parse_cards("AsAhKd").unwrap();
        let mut deck = Deck::without(&dead);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let drawn = deck.sample(7, &mut rng).to_vec();
            let mut ids: Vec<u8> = drawn.iter().map(|c| c.id()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), 7);
            assert!(drawn.iter().all(|c| !dead.contains(c)));
        }
        assert_eq!(deck.remaining(), 49);
    }

    #[test]
    #[should_panic(expected = "left in the deck")]
    fn test_deck_exhaustion_panics() {
        let mut deck = Deck::new();
        let mut rng = StdRng::seed_from_u64(1);
        let _ = deck.sample(53, &mut rng);
    }
}
