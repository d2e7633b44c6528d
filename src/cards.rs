use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    #[inline]
    pub fn all() -> [Suit; 4] {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

impl Rank {
    /// The thirteen suited ranks, in deck order.
    #[inline]
    pub fn suited() -> [Rank; 13] {
        use Rank::*;
        [
            Ace, Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King,
        ]
    }

    #[inline]
    pub fn is_royal(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Joker => "Joker",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    /// None for jokers.
    pub suit: Option<Suit>,
}

impl Card {
    #[inline]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    #[inline]
    pub const fn joker() -> Self {
        Self {
            rank: Rank::Joker,
            suit: None,
        }
    }

    #[inline]
    pub fn rule(&self) -> CardRule {
        rules_for(self.rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{} of {:?}", self.rank, suit),
            None => write!(f, "{}", self.rank),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRule {
    pub rank: Rank,
    pub movement: u8,
    pub direction: Direction,
    pub enters_from_holding: bool,
    /// Steps taken when entering from Holding; Some(0) lands on Home.
    pub entry_movement: Option<u8>,
    pub exits_bullseye: bool,
    pub extra_turn: bool,
    pub can_split: bool,
}

impl CardRule {
    #[inline]
    const fn plain(rank: Rank, movement: u8) -> Self {
        Self {
            rank,
            movement,
            direction: Direction::Forward,
            enters_from_holding: false,
            entry_movement: None,
            exits_bullseye: false,
            extra_turn: false,
            can_split: false,
        }
    }

    #[inline]
    const fn entry(rank: Rank, movement: u8) -> Self {
        Self {
            enters_from_holding: true,
            entry_movement: Some(0),
            extra_turn: true,
            ..Self::plain(rank, movement)
        }
    }

    #[inline]
    const fn royal(rank: Rank) -> Self {
        Self {
            exits_bullseye: true,
            extra_turn: true,
            ..Self::plain(rank, 1)
        }
    }
}

/// Movement semantics for a rank.
pub const fn rules_for(rank: Rank) -> CardRule {
    match rank {
        Rank::Ace => CardRule::entry(rank, 1),
        Rank::Two => CardRule::plain(rank, 2),
        Rank::Three => CardRule::plain(rank, 3),
        Rank::Four => CardRule {
            direction: Direction::Backward,
            ..CardRule::plain(rank, 4)
        },
        Rank::Five => CardRule::plain(rank, 5),
        Rank::Six => CardRule::entry(rank, 6),
        Rank::Seven => CardRule {
            can_split: true,
            ..CardRule::plain(rank, 7)
        },
        Rank::Eight => CardRule::plain(rank, 8),
        Rank::Nine => CardRule::plain(rank, 9),
        Rank::Ten => CardRule::plain(rank, 10),
        Rank::Jack | Rank::Queen | Rank::King => CardRule::royal(rank),
        Rank::Joker => CardRule::entry(rank, 1),
    }
}

/// A fresh, unshuffled 54-card deck: four suits of thirteen plus two jokers.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(54);
    for suit in Suit::all() {
        for rank in Rank::suited() {
            cards.push(Card::new(rank, suit));
        }
    }
    cards.push(Card::joker());
    cards.push(Card::joker());
    cards
}
