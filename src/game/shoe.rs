use crate::game::card::Card;
use crate::game::deck::Deck;
use crate::game::hand::Hand;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Multi-deck card source for a table. Deals from the front, keeps the
/// Hi-Lo running count over every card taken, collects cleared hands
/// into a discard pile, and folds the discards back in with a shuffle
/// when the live cards run out.
///
/// Each shoe owns its random source, so independent tables never share
/// or correlate shuffles.
pub struct Shoe {
    cards: VecDeque<Card>,
    discard_pile: Vec<Card>,
    running_count: i32,
    rng: StdRng,
}

impl Shoe {
    pub fn new(num_decks: usize) -> Shoe {
        Shoe::with_rng(num_decks, StdRng::from_entropy())
    }

    /// Deterministic shoe for reproducible runs and tests.
    pub fn from_seed(num_decks: usize, seed: u64) -> Shoe {
        Shoe::with_rng(num_decks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(num_decks: usize, mut rng: StdRng) -> Shoe {
        let mut cards = Vec::with_capacity(num_decks * 52);
        for _ in 0..num_decks {
            cards.extend(Deck::new(&mut rng).into_cards());
        }
        Shoe {
            cards: VecDeque::from(cards),
            discard_pile: Vec::new(),
            running_count: 0,
            rng,
        }
    }

    /// Deals the next card. When the live cards are exhausted the
    /// discard pile is folded back, shuffled, and the count reset, so
    /// the call never fails. Every card taken adjusts the Hi-Lo count:
    /// values six and under +1, ten and up -1.
    pub fn take_next_card(&mut self) -> Card {
        if self.cards.is_empty() {
            self.reshuffle();
        }
        let card = self
            .cards
            .pop_front()
            .expect("a reshuffled shoe holds at least one card");
        match card.value() {
            v if v <= 6 => self.running_count += 1,
            v if v >= 10 => self.running_count -= 1,
            _ => {}
        }
        card
    }

    /// Moves a cleared hand's cards onto the discard pile. The hand
    /// itself is untouched.
    pub fn dispose_hand(&mut self, hand: &Hand) {
        self.discard_pile.extend_from_slice(hand.cards());
    }

    fn reshuffle(&mut self) {
        debug!(discarded = self.discard_pile.len(), "reshuffling shoe");
        let mut cards: Vec<Card> = self.cards.drain(..).collect();
        cards.append(&mut self.discard_pile);
        cards.shuffle(&mut self.rng);
        self.cards = VecDeque::from(cards);
        self.running_count = 0;
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn discard_count(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Estimated decks remaining, to the nearest half deck (rounding
    /// half away from zero) and never below one.
    pub fn deck_count(&self) -> f32 {
        if self.cards.len() < 52 {
            1.0
        } else {
            (self.cards.len() as f32 / 52.0 * 2.0).round() / 2.0
        }
    }

    /// Running count normalized by the remaining-deck estimate, used
    /// to size bets. Zero stays zero; otherwise the quotient takes the
    /// ceiling toward positive infinity, so negative counts round
    /// toward zero rather than away from it.
    pub fn true_count(&self) -> i32 {
        if self.running_count == 0 {
            0
        } else {
            (self.running_count as f32 / self.deck_count()).ceil() as i32
        }
    }

    #[cfg(test)]
    pub(crate) fn set_running_count(&mut self, running_count: i32) {
        self.running_count = running_count;
    }

    pub fn stats(&self) -> ShoeStats {
        ShoeStats {
            card_count: self.cards.len(),
            deck_count: self.deck_count(),
            running_count: self.running_count,
            true_count: self.true_count(),
        }
    }
}

/// Read-only shoe figures for rendering collaborators.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShoeStats {
    pub card_count: usize,
    pub deck_count: f32,
    pub running_count: i32,
    pub true_count: i32,
}
