use crate::game::card::{Card, Rank};
use crate::GameError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Settlement outcome of one player hand against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Blackjack,
    Win,
    Loss,
    Push,
}

/// An ordered run of cards with the bet riding on it. Created when a
/// bet is placed (or by a split), appended to during play, settled
/// once, and discarded into the shoe when the table clears for the
/// next round.
#[derive(Debug, Clone)]
pub struct Hand {
    cards: Vec<Card>,
    bet: u32,
    has_doubled_bet: bool,
    was_split: bool,
    result: Option<Outcome>,
    winnings: f32,
}

impl Hand {
    pub fn new(bet: u32) -> Hand {
        Hand {
            cards: Vec::new(),
            bet,
            has_doubled_bet: false,
            was_split: false,
            result: None,
            winnings: 0.0,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn has_bet(&self) -> bool {
        self.bet > 0
    }

    pub fn has_doubled_bet(&self) -> bool {
        self.has_doubled_bet
    }

    pub fn was_split(&self) -> bool {
        self.was_split
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    /// Signed payout recorded at settlement: +1.5x the bet for a
    /// blackjack, +1x for a win, 0 for a push, -1x for a loss.
    pub fn winnings(&self) -> f32 {
        self.winnings
    }

    /// Best total and the number of aces still counted as eleven in
    /// reaching it. Each ace demotes from eleven to one at most once,
    /// until the total fits under 21 or no demotions remain.
    fn best_total(&self) -> (u8, usize) {
        let mut total: u32 = self.cards.iter().map(|c| u32::from(c.value())).sum();
        let mut elevens = self.cards.iter().filter(|c| c.rank == Rank::Ace).count();
        while total > 21 && elevens > 0 {
            total -= 10;
            elevens -= 1;
        }
        (total as u8, elevens)
    }

    /// Highest achievable total not exceeding 21; the minimal total
    /// (all aces as one) when every choice busts.
    pub fn value(&self) -> u8 {
        self.best_total().0
    }

    /// True when the total is under 21 with at least one ace still
    /// counted as eleven.
    pub fn is_soft(&self) -> bool {
        let (total, elevens) = self.best_total();
        total < 21 && elevens > 0
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Whether the hand is still live for another card: it must carry
    /// a bet, not be doubled past two cards, not be bust or blackjack,
    /// and a one-card split-ace hand takes only its mandatory second
    /// card.
    pub fn can_take_another_card(&self) -> bool {
        self.has_bet()
            && (!self.has_doubled_bet || self.cards.len() == 2)
            && !self.is_bust()
            && !self.is_blackjack()
            && (!self.was_split
                || self.is_pair()
                || self.cards[0].rank != Rank::Ace
                || self.cards.len() == 1)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Doubles the bet. Allowed once per hand, only while the hand has
    /// a bet and at most two cards.
    pub fn double_bet(&mut self) -> Result<(), GameError> {
        if !self.has_bet() {
            return Err(GameError::InvalidHandOperation(
                "cannot double a hand with no bet".to_string(),
            ));
        }
        if self.has_doubled_bet {
            return Err(GameError::InvalidHandOperation(
                "hand has already doubled its bet".to_string(),
            ));
        }
        if self.cards.len() > 2 {
            return Err(GameError::InvalidHandOperation(
                "cannot double after taking a third card".to_string(),
            ));
        }
        self.has_doubled_bet = true;
        self.bet *= 2;
        Ok(())
    }

    /// Splits a pair into two one-card hands, each carrying the
    /// original bet. The caller replaces this hand with the children.
    pub fn split(&self) -> Result<(Hand, Hand), GameError> {
        if !self.is_pair() {
            return Err(GameError::InvalidHandOperation(
                "only a two-card pair can be split".to_string(),
            ));
        }
        let mut first = Hand::new(self.bet);
        first.was_split = true;
        first.add_card(self.cards[0]);

        let mut second = Hand::new(self.bet);
        second.was_split = true;
        second.add_card(self.cards[1]);

        Ok((first, second))
    }

    /// Stores the settlement outcome and the winnings it pays.
    pub fn record_result(&mut self, outcome: Outcome) {
        self.result = Some(outcome);
        self.winnings = match outcome {
            Outcome::Blackjack => self.bet as f32 * 1.5,
            Outcome::Win => self.bet as f32,
            Outcome::Push => 0.0,
            Outcome::Loss => -(self.bet as f32),
        };
    }

    /// Settlement ordering: totals compare first; at equal totals a
    /// blackjack outranks a non-blackjack, since it pays differently.
    pub fn compare(&self, other: &Hand) -> Ordering {
        match self.value().cmp(&other.value()) {
            Ordering::Equal => match (self.is_blackjack(), other.is_blackjack()) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => Ordering::Equal,
            },
            ordering => ordering,
        }
    }

    pub fn snapshot(&self) -> HandSnapshot {
        HandSnapshot {
            bet: self.bet,
            value: self.value(),
            is_soft: self.is_soft(),
            cards: self.cards.iter().map(Card::to_string).collect(),
            result: self.result,
            winnings: self.winnings,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bet = if self.has_bet() {
            format!("${}", self.bet)
        } else {
            "-".to_string()
        };
        let cards: Vec<String> = self.cards.iter().map(Card::to_string).collect();
        write!(f, "{}\t{}\t{}", bet, self.value(), cards.join(" "))
    }
}

/// Read-only view of a hand for rendering collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct HandSnapshot {
    pub bet: u32,
    pub value: u8,
    pub is_soft: bool,
    pub cards: Vec<String>,
    pub result: Option<Outcome>,
    pub winnings: f32,
}
