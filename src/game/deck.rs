use crate::game::card::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::Rng;

/// One full 52-card set, randomly permuted at construction and then
/// only consumed into a shoe.
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds the 52 distinct (rank, suit) pairs and shuffles them with
    /// the caller's random source.
    pub fn new<R: Rng>(rng: &mut R) -> Deck {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.shuffle(rng);
        Deck { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn deck_holds_52_distinct_cards() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::new(&mut rng);
        assert_eq!(deck.cards().len(), 52);
        let distinct: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(distinct.len(), 52);
    }

    #[test]
    fn decks_from_different_seeds_differ() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        assert_ne!(Deck::new(&mut a).cards(), Deck::new(&mut b).cards());
    }
}
