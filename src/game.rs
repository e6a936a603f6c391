//! The round-resolution engine: cards, shoe, hands, dealer, basic
//! strategy, players, and the table orchestrator that drives one
//! complete round at a time.

pub mod card;
pub mod dealer;
pub mod deck;
pub mod hand;
pub mod player;
pub mod shoe;
pub mod strategy;
pub mod table;

pub mod prelude {
    pub use super::card::{Card, Rank, Suit};
    pub use super::dealer::Dealer;
    pub use super::deck::Deck;
    pub use super::hand::{Hand, HandSnapshot, Outcome};
    pub use super::player::{Player, PlayerSnapshot};
    pub use super::shoe::{Shoe, ShoeStats};
    pub use super::strategy::{next_move, Move};
    pub use super::table::{Table, TableSnapshot};
}

pub use prelude::*;
