use std::collections::HashMap;

use rand::Rng;
use fasttrack::cards::standard_deck;
use fasttrack::{rng_for_game, rng_for_seat, rules_for, Card, Deck, Direction, Rank, Suit};

#[test]
fn rule_table_matches_card_faces() {
    for rank in [Rank::Ace, Rank::Six, Rank::Joker] {
        let r = rules_for(rank);
        assert!(r.enters_from_holding, "{rank} enters");
        assert_eq!(r.entry_movement, Some(0));
        assert!(r.extra_turn, "{rank} grants an extra turn");
        assert!(!r.can_split);
    }
    assert_eq!(rules_for(Rank::Ace).movement, 1);
    assert_eq!(rules_for(Rank::Six).movement, 6);

    let four = rules_for(Rank::Four);
    assert_eq!(four.direction, Direction::Backward);
    assert_eq!(four.movement, 4);
    assert!(!four.extra_turn);

    let seven = rules_for(Rank::Seven);
    assert!(seven.can_split);
    assert_eq!(seven.movement, 7);

    for rank in [Rank::Jack, Rank::Queen, Rank::King] {
        let r = rules_for(rank);
        assert!(rank.is_royal());
        assert!(r.exits_bullseye && r.extra_turn);
        assert_eq!(r.movement, 1);
        assert!(!r.enters_from_holding);
    }

    for (rank, n) in [
        (Rank::Two, 2),
        (Rank::Three, 3),
        (Rank::Five, 5),
        (Rank::Eight, 8),
        (Rank::Nine, 9),
        (Rank::Ten, 10),
    ] {
        let r = rules_for(rank);
        assert_eq!(r.movement, n);
        assert_eq!(r.direction, Direction::Forward);
        assert!(!r.extra_turn && !r.enters_from_holding && !r.exits_bullseye && !r.can_split);
    }
}

#[test]
fn standard_deck_has_54_cards() {
    let deck = standard_deck();
    assert_eq!(deck.len(), 54);
    let jokers = deck.iter().filter(|c| c.rank == Rank::Joker).count();
    assert_eq!(jokers, 2);
    let mut per_rank: HashMap<Rank, usize> = HashMap::new();
    for c in &deck {
        *per_rank.entry(c.rank).or_default() += 1;
    }
    for rank in Rank::suited() {
        assert_eq!(per_rank[&rank], 4, "{rank}");
    }
}

#[test]
fn card_display_and_json() {
    assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "A of Spades");
    assert_eq!(Card::joker().to_string(), "Joker");
    let v = serde_json::to_value(Card::new(Rank::Ten, Suit::Hearts)).expect("serialize");
    assert_eq!(v["rank"], "Ten");
    assert_eq!(v["suit"], "Hearts");
}

#[test]
fn seat_decks_are_reproducible() {
    let mut a = Deck::new(rng_for_seat(0xDEAD_BEEF, 2));
    let mut b = Deck::new(rng_for_seat(0xDEAD_BEEF, 2));
    let mut c = Deck::new(rng_for_seat(0xDEAD_BEEF, 3));
    let sa: Vec<Card> = (0..20).map(|_| a.draw()).collect();
    let sb: Vec<Card> = (0..20).map(|_| b.draw()).collect();
    let sc: Vec<Card> = (0..20).map(|_| c.draw()).collect();
    assert_eq!(sa, sb, "same seed and seat must shuffle identically");
    assert_ne!(sa, sc, "different seats must shuffle independently");
}

#[test]
fn game_rng_differs_per_game() {
    let x: Vec<u64> = {
        let mut r = rng_for_game(7, 1);
        (0..8).map(|_| r.gen()).collect()
    };
    let y: Vec<u64> = {
        let mut r = rng_for_game(7, 2);
        (0..8).map(|_| r.gen()).collect()
    };
    assert_ne!(x, y);
}

#[test]
fn deck_reshuffles_discards_when_exhausted() {
    let mut deck = Deck::new(rng_for_seat(1, 0));
    let mut drawn = Vec::new();
    for _ in 0..54 {
        let c = deck.draw();
        deck.discard(c);
        drawn.push(c);
    }
    assert_eq!(deck.remaining(), 0);
    assert_eq!(deck.discarded(), 54);

    let next = deck.draw();
    assert!(drawn.contains(&next));
    assert_eq!(deck.remaining(), 53);
    assert_eq!(deck.discarded(), 0);
}

#[test]
fn deck_rebuilds_when_nothing_is_discarded() {
    let mut deck = Deck::new(rng_for_seat(1, 0));
    for _ in 0..54 {
        deck.draw();
    }
    deck.draw();
    assert_eq!(deck.remaining(), 53);
}

#[test]
fn stacked_card_is_drawn_next() {
    let mut deck = Deck::new(rng_for_seat(9, 1));
    deck.stack(Card::new(Rank::Seven, Suit::Clubs));
    assert_eq!(deck.draw(), Card::new(Rank::Seven, Suit::Clubs));
}
