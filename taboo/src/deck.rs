use rand::Rng;

use crate::{Card, DeckExhausted};

/// The pool of cards for one game.
///
/// Cards are drawn uniformly at random among those not drawn yet, and a
/// drawn card is discarded for good.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    discarded: Vec<bool>,
    /// Indices into `cards` that can still be drawn, in no particular order.
    undrawn: Vec<usize>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            discarded: vec![false; cards.len()],
            undrawn: (0..cards.len()).collect(),
            cards,
        }
    }

    /// Draws a random card and marks it as discarded in the same step.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, DeckExhausted> {
        if self.undrawn.is_empty() {
            return Err(DeckExhausted);
        }
        let pick = rng.gen_range(0..self.undrawn.len());
        let card_idx = self.undrawn.swap_remove(pick);
        self.discarded[card_idx] = true;
        Ok(self.cards[card_idx].clone())
    }

    /// Total number of cards, drawn or not.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards that can still be drawn.
    pub fn remaining(&self) -> usize {
        self.undrawn.len()
    }

    /// Returns `None` if no card has this ID.
    pub fn is_discarded(&self, id: u32) -> Option<bool> {
        self.cards
            .iter()
            .position(|card| card.id == id)
            .map(|idx| self.discarded[idx])
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::arbitrary::numbered_cards;

    #[test]
    fn draws_every_card_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::new(numbered_cards(10));
        let mut seen = BTreeSet::new();
        for drawn in 1..=10 {
            let card = deck.draw(&mut rng).unwrap();
            assert!(seen.insert(card.id), "card {} drawn twice", card.id);
            assert_eq!(deck.is_discarded(card.id), Some(true));
            assert_eq!(deck.remaining(), 10 - drawn);
        }
        assert_eq!(deck.len(), 10);
        assert_eq!(deck.draw(&mut rng), Err(DeckExhausted));
    }

    #[test]
    fn undrawn_cards_are_not_discarded() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut deck = Deck::new(numbered_cards(3));
        let card = deck.draw(&mut rng).unwrap();
        let others: Vec<u32> = (0..3).filter(|&id| id != card.id).collect();
        for id in others {
            assert_eq!(deck.is_discarded(id), Some(false));
        }
        assert_eq!(deck.is_discarded(99), None);
    }

    #[test]
    fn empty_deck() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut deck = Deck::new(Vec::new());
        assert!(deck.is_empty());
        assert_eq!(deck.draw(&mut rng), Err(DeckExhausted));
    }

    #[test]
    fn draws_are_spread_over_the_deck() {
        let mut first_draws = BTreeSet::new();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut deck = Deck::new(numbered_cards(5));
            first_draws.insert(deck.draw(&mut rng).unwrap().id);
        }
        assert_eq!(first_draws.len(), 5);
    }
}
