use crate::game::hand::{Hand, HandSnapshot, Outcome};
use crate::game::shoe::Shoe;
use crate::GameError;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// One seat at the table: a bankroll with running min/max watermarks,
/// the hands in play this round, and the append-only history of
/// settled outcomes. Whether the player counts cards is fixed at
/// creation; counting players carry a `*` after their name.
pub struct Player {
    name: String,
    money: f32,
    minimum_money: f32,
    maximum_money: f32,
    is_card_counting: bool,
    hands: Vec<Hand>,
    results: Vec<Outcome>,
}

impl Player {
    pub fn new(name: &str, money: f32, is_card_counting: bool) -> Player {
        let name = if is_card_counting {
            format!("{name}*")
        } else {
            name.to_string()
        };
        Player {
            name,
            money,
            minimum_money: money,
            maximum_money: money,
            is_card_counting,
            hands: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn money(&self) -> f32 {
        self.money
    }

    pub fn minimum_money(&self) -> f32 {
        self.minimum_money
    }

    pub fn maximum_money(&self) -> f32 {
        self.maximum_money
    }

    pub fn is_card_counting(&self) -> bool {
        self.is_card_counting
    }

    pub fn num_hands(&self) -> usize {
        self.hands.len()
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn hand(&self, index: usize) -> &Hand {
        &self.hands[index]
    }

    pub fn hand_mut(&mut self, index: usize) -> &mut Hand {
        &mut self.hands[index]
    }

    pub fn results(&self) -> &[Outcome] {
        &self.results
    }

    /// Every bankroll change funnels through here so the watermarks
    /// stay current.
    fn set_money(&mut self, value: f32) {
        if value < self.minimum_money {
            self.minimum_money = value;
        } else if value > self.maximum_money {
            self.maximum_money = value;
        }
        self.money = value;
    }

    /// Places the bet for the coming round, creating the round's first
    /// hand. Fails when the bankroll cannot cover the table minimum.
    ///
    /// Counting players size by the shoe's true count: below -3 they
    /// sit the round out entirely (no hand is created), above +1 they
    /// bet `minimum_bet * 5 * (true_count - 1)`. The scaled bet is a
    /// fixed heuristic and is not clamped to the bankroll.
    pub fn place_bet(&mut self, shoe: &Shoe, minimum_bet: u32) -> Result<(), GameError> {
        if self.money < minimum_bet as f32 {
            return Err(GameError::InsufficientFunds {
                required: minimum_bet as f32,
                balance: self.money,
            });
        }

        let mut bet = minimum_bet;
        if self.is_card_counting {
            let true_count = shoe.true_count();
            if true_count < -3 {
                debug!(player = %self.name, true_count, "sitting out a cold shoe");
                return Ok(());
            }
            if true_count > 1 {
                bet = minimum_bet * 5 * (true_count - 1) as u32;
            }
        }

        self.set_money(self.money - bet as f32);
        self.hands.push(Hand::new(bet));
        Ok(())
    }

    /// Doubles the bet on the hand at `index`, paying the second bet
    /// out of the bankroll.
    pub fn double_down(&mut self, index: usize) -> Result<(), GameError> {
        let bet = self.hands[index].bet();
        if self.money < bet as f32 {
            return Err(GameError::InsufficientFunds {
                required: bet as f32,
                balance: self.money,
            });
        }
        self.hands[index].double_bet()?;
        self.set_money(self.money - bet as f32);
        Ok(())
    }

    /// Splits the pair at `index` into its two children, which take
    /// the parent's place in order. The table minimum funds the new
    /// hand.
    pub fn split_hand(&mut self, index: usize, minimum_bet: u32) -> Result<(), GameError> {
        if self.money < minimum_bet as f32 {
            return Err(GameError::InsufficientFunds {
                required: minimum_bet as f32,
                balance: self.money,
            });
        }
        let (first, second) = self.hands[index].split()?;
        self.set_money(self.money - minimum_bet as f32);
        self.hands[index] = first;
        self.hands.insert(index + 1, second);
        Ok(())
    }

    /// Applies a settlement outcome to the hand at `index` and credits
    /// the bankroll. The original stake plus winnings come back on
    /// anything but a loss; a lost bet was already deducted when
    /// placed.
    pub fn record_result(&mut self, index: usize, outcome: Outcome) {
        self.hands[index].record_result(outcome);
        self.results.push(outcome);
        if outcome != Outcome::Loss {
            let credit = self.hands[index].bet() as f32 + self.hands[index].winnings();
            self.set_money(self.money + credit);
        }
    }

    /// Discards every hand into the shoe ahead of the next round.
    pub fn clear_hands(&mut self, shoe: &mut Shoe) {
        for hand in &self.hands {
            shoe.dispose_hand(hand);
        }
        self.hands.clear();
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.name.clone(),
            money: self.money,
            minimum_money: self.minimum_money,
            maximum_money: self.maximum_money,
            hands: self.hands.iter().map(Hand::snapshot).collect(),
            wins: self.results.iter().filter(|r| **r != Outcome::Loss).count(),
            losses: self.results.iter().filter(|r| **r == Outcome::Loss).count(),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wins = self.results.iter().filter(|r| **r != Outcome::Loss).count();
        let losses = self.results.iter().filter(|r| **r == Outcome::Loss).count();
        write!(
            f,
            "{}\tMoney = {:.2} Max: {:.2} Min: {:.2} Win/Loss: {}/{}",
            self.name, self.money, self.maximum_money, self.minimum_money, wins, losses
        )
    }
}

/// Read-only view of a player for rendering collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub money: f32,
    pub minimum_money: f32,
    pub maximum_money: f32,
    pub hands: Vec<HandSnapshot>,
    pub wins: usize,
    pub losses: usize,
}
