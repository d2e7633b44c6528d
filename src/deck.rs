use log::debug;
use rand::seq::SliceRandom;
use rand_pcg::Pcg64;

use crate::cards::{standard_deck, Card};

/// A player's private card source: draw pile, discard pile and its own RNG.
#[derive(Debug, Clone)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    rng: Pcg64,
}

impl Deck {
    /// A freshly shuffled standard deck.
    pub fn new(rng: Pcg64) -> Self {
        let mut deck = Self {
            draw_pile: standard_deck(),
            discard_pile: Vec::new(),
            rng,
        };
        deck.draw_pile.shuffle(&mut deck.rng);
        deck
    }

    /// Draw the top card. An empty draw pile is refilled from the discards,
    /// or from a brand new deck when there are none.
    pub fn draw(&mut self) -> Card {
        if let Some(card) = self.draw_pile.pop() {
            return card;
        }
        self.refill();
        self.draw_pile.pop().unwrap_or_else(Card::joker)
    }

    fn refill(&mut self) {
        if self.discard_pile.is_empty() {
            debug!("deck exhausted with no discards, rebuilding");
            self.draw_pile = standard_deck();
        } else {
            debug!("reshuffling {} discarded cards", self.discard_pile.len());
            std::mem::swap(&mut self.draw_pile, &mut self.discard_pile);
        }
        self.draw_pile.shuffle(&mut self.rng);
    }

    #[inline]
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Put a known card on top so the next draw returns it.
    #[inline]
    pub fn stack(&mut self, card: Card) {
        self.draw_pile.push(card);
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    #[inline]
    pub fn discarded(&self) -> usize {
        self.discard_pile.len()
    }
}
