use crate::game::hand::{Hand, Outcome};
use crate::game::player::Player;
use crate::game::shoe::Shoe;
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// The house side of the table: a single zero-bet hand played under
/// fixed rules (hit anything below 17, soft or hard) and the judge of
/// every player hand at settlement.
pub struct Dealer {
    hand: Hand,
}

impl Dealer {
    pub fn new() -> Dealer {
        Dealer { hand: Hand::new(0) }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Value of the dealer's up-card. During the players' turns the
    /// dealer holds exactly one card, so the hand value is the up-card
    /// value.
    pub fn up_card_value(&self) -> u8 {
        self.hand.value()
    }

    pub fn can_take_another_card(&self) -> bool {
        !self.hand.is_bust() && self.hand.value() < 17
    }

    /// Opening deal, in real table order: one card to every betting
    /// hand in player order, one to the dealer, then a second card to
    /// every betting hand.
    pub fn deal(&mut self, shoe: &mut Shoe, players: &mut [Player]) {
        for player in players.iter_mut() {
            for index in 0..player.num_hands() {
                if player.hand(index).has_bet() {
                    player.hand_mut(index).add_card(shoe.take_next_card());
                }
            }
        }

        self.hand.add_card(shoe.take_next_card());

        for player in players.iter_mut() {
            for index in 0..player.num_hands() {
                if player.hand(index).has_bet() {
                    player.hand_mut(index).add_card(shoe.take_next_card());
                }
            }
        }
    }

    /// Deals one card to a player hand, if the hand can still take one.
    pub fn deal_to_player(shoe: &mut Shoe, hand: &mut Hand) {
        if !hand.can_take_another_card() {
            return;
        }
        hand.add_card(shoe.take_next_card());
    }

    pub fn deal_to_self(&mut self, shoe: &mut Shoe) {
        if !self.can_take_another_card() {
            return;
        }
        self.hand.add_card(shoe.take_next_card());
    }

    /// Plays the dealer hand out to its terminal state.
    pub fn play_out(&mut self, shoe: &mut Shoe) {
        while self.can_take_another_card() {
            self.deal_to_self(shoe);
        }
        trace!(value = self.hand.value(), bust = self.hand.is_bust(), "dealer stands");
    }

    /// Judges a player hand against the dealer's. Player blackjack
    /// dominates: it wins its bonus whenever the dealer lacks one,
    /// before any bust check. Then player bust loses, dealer bust
    /// wins, equal hands push, and the higher total takes the rest.
    pub fn calculate_result(&self, hand: &Hand) -> Outcome {
        if hand.is_blackjack() && !self.hand.is_blackjack() {
            return Outcome::Blackjack;
        }
        if hand.is_bust() {
            return Outcome::Loss;
        }
        if self.hand.is_bust() {
            return Outcome::Win;
        }
        match hand.compare(&self.hand) {
            Ordering::Greater => Outcome::Win,
            Ordering::Less => Outcome::Loss,
            Ordering::Equal => Outcome::Push,
        }
    }

    /// Ends the round: the dealer's hand and every player hand move to
    /// the shoe's discard pile, leaving all seats empty for the next
    /// round.
    pub fn clear_hands(&mut self, shoe: &mut Shoe, players: &mut [Player]) {
        shoe.dispose_hand(&self.hand);
        self.hand = Hand::new(0);
        for player in players.iter_mut() {
            player.clear_hands(shoe);
        }
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Dealer::new()
    }
}

impl fmt::Display for Dealer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D\t{}", self.hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::{Card, Rank, Suit};

    fn dealer_with(ranks: &[Rank]) -> Dealer {
        let mut dealer = Dealer::new();
        for &rank in ranks {
            dealer.hand.add_card(Card::new(rank, Suit::Clubs));
        }
        dealer
    }

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new(10);
        for &rank in ranks {
            hand.add_card(Card::new(rank, Suit::Hearts));
        }
        hand
    }

    #[test]
    fn dealer_hits_below_seventeen() {
        assert!(dealer_with(&[Rank::Ten, Rank::Six]).can_take_another_card());
        // Ace-six reads as 17, so the dealer stands on a soft seventeen.
        assert!(!dealer_with(&[Rank::Ace, Rank::Six]).can_take_another_card());
        assert!(dealer_with(&[Rank::Ace, Rank::Five]).can_take_another_card());
        assert!(!dealer_with(&[Rank::Ten, Rank::Seven]).can_take_another_card());
        assert!(!dealer_with(&[Rank::Ten, Rank::Nine, Rank::Five]).can_take_another_card());
    }

    #[test]
    fn dealer_plays_out_to_seventeen_or_bust() {
        let mut shoe = Shoe::from_seed(6, 21);
        let mut dealer = Dealer::new();
        dealer.deal_to_self(&mut shoe);
        dealer.play_out(&mut shoe);
        assert!(dealer.hand().value() >= 17);
    }

    #[test]
    fn player_blackjack_beats_a_seventeen() {
        let dealer = dealer_with(&[Rank::King, Rank::Seven]);
        let hand = hand_of(&[Rank::Ace, Rank::King]);
        assert_eq!(dealer.calculate_result(&hand), Outcome::Blackjack);
    }

    #[test]
    fn player_blackjack_beats_even_a_dealer_bust() {
        let dealer = dealer_with(&[Rank::King, Rank::Seven, Rank::Eight]);
        let hand = hand_of(&[Rank::Ace, Rank::King]);
        assert_eq!(dealer.calculate_result(&hand), Outcome::Blackjack);
    }

    #[test]
    fn matching_blackjacks_push() {
        let dealer = dealer_with(&[Rank::Ace, Rank::Queen]);
        let hand = hand_of(&[Rank::Ace, Rank::King]);
        assert_eq!(dealer.calculate_result(&hand), Outcome::Push);
    }

    #[test]
    fn player_bust_loses_before_dealer_bust_wins() {
        let dealer = dealer_with(&[Rank::King, Rank::Seven, Rank::Eight]);
        let hand = hand_of(&[Rank::Ten, Rank::Six, Rank::Nine]);
        assert_eq!(dealer.calculate_result(&hand), Outcome::Loss);
    }

    #[test]
    fn dealer_bust_pays_standing_hands() {
        let dealer = dealer_with(&[Rank::King, Rank::Six, Rank::Eight]);
        assert!(dealer.hand().is_bust());
        let hand = hand_of(&[Rank::Ten, Rank::Eight]);
        assert_eq!(dealer.calculate_result(&hand), Outcome::Win);
    }

    #[test]
    fn higher_total_wins_equal_totals_push() {
        let dealer = dealer_with(&[Rank::King, Rank::Seven]);
        assert_eq!(dealer.calculate_result(&hand_of(&[Rank::Ten, Rank::Eight])), Outcome::Win);
        assert_eq!(dealer.calculate_result(&hand_of(&[Rank::Ten, Rank::Seven])), Outcome::Push);
        assert_eq!(dealer.calculate_result(&hand_of(&[Rank::Ten, Rank::Six])), Outcome::Loss);
    }

    #[test]
    fn dealer_blackjack_beats_a_three_card_twenty_one() {
        let dealer = dealer_with(&[Rank::Ace, Rank::Queen]);
        let hand = hand_of(&[Rank::Seven, Rank::Seven, Rank::Seven]);
        assert_eq!(dealer.calculate_result(&hand), Outcome::Loss);
    }

    #[test]
    fn opening_deal_follows_table_order() {
        let mut shoe = Shoe::from_seed(6, 33);
        let mut dealer = Dealer::new();
        let mut players = vec![
            Player::new("P1", 100.0, false),
            Player::new("P2", 100.0, false),
        ];
        for player in players.iter_mut() {
            player.place_bet(&shoe, 10).unwrap();
        }
        dealer.deal(&mut shoe, &mut players);

        assert_eq!(dealer.hand().cards().len(), 1);
        for player in &players {
            assert_eq!(player.hand(0).cards().len(), 2);
        }
        assert_eq!(shoe.card_count(), 312 - 5);
    }

    #[test]
    fn hands_without_bets_are_not_dealt() {
        let mut shoe = Shoe::from_seed(6, 34);
        let mut dealer = Dealer::new();
        // Sitting out: no hand placed at all.
        let mut players = vec![Player::new("P1", 100.0, false)];
        dealer.deal(&mut shoe, &mut players);
        assert_eq!(players[0].num_hands(), 0);
        assert_eq!(dealer.hand().cards().len(), 1);
    }

    #[test]
    fn clear_hands_empties_every_seat() {
        let mut shoe = Shoe::from_seed(6, 35);
        let mut dealer = Dealer::new();
        let mut players = vec![Player::new("P1", 100.0, false)];
        players[0].place_bet(&shoe, 10).unwrap();
        dealer.deal(&mut shoe, &mut players);
        dealer.clear_hands(&mut shoe, &mut players);

        assert_eq!(dealer.hand().cards().len(), 0);
        assert_eq!(players[0].num_hands(), 0);
        assert_eq!(shoe.card_count() + shoe.discard_count(), 312);
        assert_eq!(shoe.discard_count(), 3);
    }
}
