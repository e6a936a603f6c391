use crate::game::card::Rank;
use crate::game::hand::Hand;
use crate::GameError;
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

/// A recommended play for one hand against a given dealer up-card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Move {
    Hit,
    Stand,
    Double,
    Split,
}

use Move::{Double as D, Hit as H, Split as P, Stand as S};

// The two basic-strategy tables, one column per dealer up-card value
// (2 through 11, ace high). This is fixed domain knowledge; every cell
// is a hard-coded constant, not something to derive at runtime.

/// Hard totals 4 through 21.
const HARD_ROWS: [(u8, [Move; 18]); 10] = [
    (2, [H, H, H, H, H, H, D, D, H, S, S, S, S, S, S, S, S, S]),
    (3, [H, H, H, H, H, D, D, D, H, S, S, S, S, S, S, S, S, S]),
    (4, [H, H, H, H, H, D, D, D, S, S, S, S, S, S, S, S, S, S]),
    (5, [H, H, H, H, H, D, D, D, S, S, S, S, S, S, S, S, S, S]),
    (6, [H, H, H, H, H, D, D, D, S, S, S, S, S, S, S, S, S, S]),
    (7, [H, H, H, H, H, H, D, D, H, H, H, H, H, S, S, S, S, S]),
    (8, [H, H, H, H, H, H, D, D, H, H, H, H, H, S, S, S, S, S]),
    (9, [H, H, H, H, H, H, D, D, H, H, H, H, H, S, S, S, S, S]),
    (10, [H, H, H, H, H, H, H, D, H, H, H, H, H, S, S, S, S, S]),
    (11, [H, H, H, H, H, H, H, D, H, H, H, H, H, S, S, S, S, S]),
];

/// Soft totals 13 through 21.
const SOFT_ROWS: [(u8, [Move; 9]); 10] = [
    (2, [H, H, H, H, H, D, S, S, S]),
    (3, [H, H, H, H, D, D, S, S, S]),
    (4, [H, H, D, D, D, D, S, S, S]),
    (5, [D, D, D, D, D, D, S, S, S]),
    (6, [D, D, D, D, D, D, D, S, S]),
    (7, [H, H, H, H, H, S, S, S, S]),
    (8, [H, H, H, H, H, S, S, S, S]),
    (9, [H, H, H, H, H, H, S, S, S]),
    (10, [H, H, H, H, H, H, S, S, S]),
    (11, [H, H, H, H, H, H, S, S, S]),
];

/// Pairs by rank, two through ace.
const PAIR_ROWS: [(u8, [Move; 13]); 10] = [
    (2, [P, P, H, D, P, P, P, P, S, S, S, S, P]),
    (3, [P, P, H, D, P, P, P, P, S, S, S, S, P]),
    (4, [P, P, H, D, P, P, P, P, S, S, S, S, P]),
    (5, [P, P, P, D, P, P, P, P, S, S, S, S, P]),
    (6, [P, P, P, D, P, P, P, P, S, S, S, S, P]),
    (7, [P, P, H, D, H, P, P, S, S, S, S, S, P]),
    (8, [H, H, H, D, H, H, P, P, H, H, H, H, P]),
    (9, [H, H, H, D, H, H, P, P, H, H, H, H, P]),
    (10, [H, H, H, H, H, H, P, S, S, S, S, S, P]),
    (11, [H, H, H, H, H, H, P, S, S, S, S, S, P]),
];

lazy_static! {
    /// Hard and soft moves keyed by (total, is soft, dealer up-card value).
    static ref HARD_SOFT_MOVES: HashMap<(u8, bool, u8), Move> = {
        let mut map = HashMap::new();
        for (dealer_up, column) in HARD_ROWS {
            for (total, mv) in (4u8..=21).zip(column) {
                map.insert((total, false, dealer_up), mv);
            }
        }
        for (dealer_up, column) in SOFT_ROWS {
            for (total, mv) in (13u8..=21).zip(column) {
                map.insert((total, true, dealer_up), mv);
            }
        }
        map
    };

    /// Pair moves keyed by (pair rank, dealer up-card value).
    static ref SPLIT_MOVES: HashMap<(Rank, u8), Move> = {
        let mut map = HashMap::new();
        for (dealer_up, column) in PAIR_ROWS {
            for (rank, mv) in Rank::ALL.into_iter().zip(column) {
                map.insert((rank, dealer_up), mv);
            }
        }
        map
    };
}

/// Basic-strategy recommendation for `hand` against `dealer_up`, the
/// value of the dealer's up-card (2 through 11, ace high).
///
/// A one-card hand (fresh from a split) always hits for its mandatory
/// second card. Pairs consult the split table; everything else the
/// hard/soft table, with Double downgraded to Hit once a third card
/// has been taken. A combination absent from the tables is a logic
/// defect and surfaces as an error rather than a silent fallback.
pub fn next_move(hand: &Hand, dealer_up: u8) -> Result<Move, GameError> {
    if hand.cards().len() == 1 {
        return Ok(Move::Hit);
    }

    if hand.is_pair() {
        let rank = hand.cards()[0].rank;
        return SPLIT_MOVES
            .get(&(rank, dealer_up))
            .copied()
            .ok_or(GameError::MissingStrategyEntry {
                total: hand.value(),
                soft: false,
                dealer_up,
            });
    }

    let mv = HARD_SOFT_MOVES
        .get(&(hand.value(), hand.is_soft(), dealer_up))
        .copied()
        .ok_or(GameError::MissingStrategyEntry {
            total: hand.value(),
            soft: hand.is_soft(),
            dealer_up,
        })?;

    // Doubling is only offered on the first two cards.
    if mv == Move::Double && hand.cards().len() > 2 {
        return Ok(Move::Hit);
    }

    Ok(mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::{Card, Suit};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new(10);
        for &rank in ranks {
            hand.add_card(Card::new(rank, Suit::Spades));
        }
        hand
    }

    #[test]
    fn tables_cover_every_reachable_shape() {
        assert_eq!(HARD_SOFT_MOVES.len(), 18 * 10 + 9 * 10);
        assert_eq!(SPLIT_MOVES.len(), 13 * 10);
    }

    #[test]
    fn one_card_hand_always_hits() {
        let hand = hand_of(&[Rank::Ace]);
        assert_eq!(next_move(&hand, 10).unwrap(), Move::Hit);
    }

    #[test]
    fn aces_split_against_a_six() {
        let hand = hand_of(&[Rank::Ace, Rank::Ace]);
        assert_eq!(next_move(&hand, 6).unwrap(), Move::Split);
    }

    #[test]
    fn hard_sixteen_hits_a_ten() {
        let hand = hand_of(&[Rank::Ten, Rank::Six]);
        assert_eq!(next_move(&hand, 10).unwrap(), Move::Hit);
    }

    #[test]
    fn hard_eleven_doubles_a_five_unless_late() {
        let fresh = hand_of(&[Rank::Five, Rank::Six]);
        assert_eq!(next_move(&fresh, 5).unwrap(), Move::Double);

        let late = hand_of(&[Rank::Two, Rank::Three, Rank::Six]);
        assert_eq!(late.value(), 11);
        assert_eq!(next_move(&late, 5).unwrap(), Move::Hit);
    }

    #[test]
    fn soft_eighteen_depends_on_dealer_strength() {
        let hand = hand_of(&[Rank::Ace, Rank::Seven]);
        assert_eq!(next_move(&hand, 6).unwrap(), Move::Double);
        assert_eq!(next_move(&hand, 7).unwrap(), Move::Stand);
        assert_eq!(next_move(&hand, 9).unwrap(), Move::Hit);
    }

    #[test]
    fn paired_fives_play_like_a_hard_ten() {
        let hand = hand_of(&[Rank::Five, Rank::Five]);
        assert_eq!(next_move(&hand, 6).unwrap(), Move::Double);
        assert_eq!(next_move(&hand, 10).unwrap(), Move::Hit);
    }

    #[test]
    fn only_matching_ranks_consult_the_pair_table() {
        let jacks = hand_of(&[Rank::Jack, Rank::Jack]);
        assert_eq!(next_move(&jacks, 6).unwrap(), Move::Stand);

        // Ten and king total twenty but are not a pair.
        let twenty = hand_of(&[Rank::Ten, Rank::King]);
        assert_eq!(next_move(&twenty, 6).unwrap(), Move::Stand);
    }

    #[test]
    fn eights_split_against_every_up_card() {
        let hand = hand_of(&[Rank::Eight, Rank::Eight]);
        for dealer_up in 2..=11 {
            assert_eq!(next_move(&hand, dealer_up).unwrap(), Move::Split);
        }
    }

    #[test]
    fn next_move_is_deterministic() {
        let hand = hand_of(&[Rank::Nine, Rank::Four]);
        assert_eq!(next_move(&hand, 8).unwrap(), next_move(&hand, 8).unwrap());
    }

    #[test]
    fn out_of_table_lookup_is_a_hard_error() {
        let hand = hand_of(&[Rank::Ten, Rank::Six]);
        // There is no dealer up-card value of 12.
        assert!(matches!(
            next_move(&hand, 12),
            Err(GameError::MissingStrategyEntry { .. })
        ));
    }
}
