use crate::game::dealer::Dealer;
use crate::game::hand::HandSnapshot;
use crate::game::player::{Player, PlayerSnapshot};
use crate::game::shoe::{Shoe, ShoeStats};
use crate::game::strategy::{self, Move};
use crate::{GameError, TableConfig};
use serde::Serialize;
use tracing::{debug, trace};

/// One blackjack table: a shoe, a dealer, and a fixed roster of
/// players, driven one complete round at a time. Settled hands stay
/// visible until the next round begins, so collaborators can render
/// the finished round from a snapshot.
pub struct Table {
    shoe: Shoe,
    dealer: Dealer,
    players: Vec<Player>,
    minimum_bet: u32,
    round_number: u32,
}

impl Table {
    pub fn new(config: TableConfig) -> Table {
        let shoe = match config.shoe_seed {
            Some(seed) => Shoe::from_seed(config.num_decks, seed),
            None => Shoe::new(config.num_decks),
        };
        let players = config
            .players
            .iter()
            .map(|p| Player::new(&p.name, p.bankroll, p.is_card_counting))
            .collect();
        Table {
            shoe,
            dealer: Dealer::new(),
            players,
            minimum_bet: config.minimum_bet,
            round_number: 0,
        }
    }

    pub fn minimum_bet(&self) -> u32 {
        self.minimum_bet
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn shoe_stats(&self) -> ShoeStats {
        self.shoe.stats()
    }

    #[cfg(test)]
    pub(crate) fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Plays one complete round: clear the previous round's hands,
    /// collect bets, deal, run every player hand through the strategy
    /// loop, play out the dealer, and settle.
    ///
    /// A player who cannot cover the minimum bet sits the round out;
    /// a Double or Split the bankroll cannot fund degrades to Hit. An
    /// error out of the strategy tables is a logic defect and aborts
    /// the round.
    pub fn play_round(&mut self) -> Result<(), GameError> {
        self.dealer.clear_hands(&mut self.shoe, &mut self.players);
        self.round_number += 1;

        let stats = self.shoe.stats();
        debug!(
            round = self.round_number,
            cards = stats.card_count,
            running_count = stats.running_count,
            true_count = stats.true_count,
            "starting round"
        );

        // Bets. Sitting out, whether by choice on a cold count or from
        // a thin bankroll, leaves the player with no hand this round.
        for player in &mut self.players {
            match player.place_bet(&self.shoe, self.minimum_bet) {
                Ok(()) => {}
                Err(GameError::InsufficientFunds { .. }) => {
                    debug!(player = %player.name(), "cannot cover the minimum bet, sitting out");
                }
                Err(e) => return Err(e),
            }
        }

        self.dealer.deal(&mut self.shoe, &mut self.players);

        // Player turns. The hand list can grow mid-iteration as splits
        // land, so the loop re-reads its bound every pass.
        let dealer_up = self.dealer.up_card_value();
        for player in &mut self.players {
            let mut index = 0;
            while index < player.num_hands() {
                while player.hand(index).can_take_another_card() {
                    let mut mv = strategy::next_move(player.hand(index), dealer_up)?;

                    // Downgrade what the bankroll cannot fund.
                    if mv == Move::Double && player.money() < player.hand(index).bet() as f32 {
                        mv = Move::Hit;
                    }
                    if mv == Move::Split && player.money() < self.minimum_bet as f32 {
                        mv = Move::Hit;
                    }
                    trace!(player = %player.name(), hand = index, ?mv, "move");

                    match mv {
                        Move::Stand => break,
                        Move::Hit => {
                            Dealer::deal_to_player(&mut self.shoe, player.hand_mut(index));
                        }
                        Move::Double => {
                            player.double_down(index)?;
                            Dealer::deal_to_player(&mut self.shoe, player.hand_mut(index));
                        }
                        Move::Split => {
                            player.split_hand(index, self.minimum_bet)?;
                            Dealer::deal_to_player(&mut self.shoe, player.hand_mut(index));
                            Dealer::deal_to_player(&mut self.shoe, player.hand_mut(index + 1));
                        }
                    }
                }
                index += 1;
            }
        }

        self.dealer.play_out(&mut self.shoe);

        // Settlement.
        for player in &mut self.players {
            for index in 0..player.num_hands() {
                if player.hand(index).has_bet() {
                    let outcome = self.dealer.calculate_result(player.hand(index));
                    player.record_result(index, outcome);
                    trace!(player = %player.name(), hand = index, ?outcome, "settled");
                }
            }
        }

        Ok(())
    }

    /// Read-only view of the finished round for rendering.
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            round_number: self.round_number,
            minimum_bet: self.minimum_bet,
            shoe: self.shoe.stats(),
            dealer_hand: self.dealer.hand().snapshot(),
            players: self.players.iter().map(Player::snapshot).collect(),
        }
    }
}

/// Full per-round state exposed at the engine boundary.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub round_number: u32,
    pub minimum_bet: u32,
    pub shoe: ShoeStats,
    pub dealer_hand: HandSnapshot,
    pub players: Vec<PlayerSnapshot>,
}
