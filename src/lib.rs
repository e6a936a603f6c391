//! Simulation of repeated rounds of casino blackjack: multiple
//! automated players against one dealer, playing fixed basic strategy
//! and sizing bets off a Hi-Lo running count.
//!
//! The engine lives in [`game`]; this root adds the error taxonomy,
//! table configuration, and a multi-round [`Simulation`] driver that
//! accumulates per-player statistics.

pub mod game;

pub use game::prelude::*;

use serde::Serialize;
use std::fmt::{self, Display};
use thiserror::Error;
use tracing::info;

pub mod prelude {
    pub use crate::game::prelude::*;
    pub use crate::{
        GameError, PlayerConfig, PlayerSummary, Simulation, SimulationSummary, TableConfig,
        TableConfigBuilder,
    };
}

/// The recoverable failure conditions of the engine.
///
/// `InsufficientFunds` and `InvalidHandOperation` are local conditions
/// the orchestrator anticipates and degrades from (a player sits out,
/// a Double falls back to Hit). `MissingStrategyEntry` means a hand
/// shape reached the tables that they do not cover, which is a logic
/// defect and is never swallowed.
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("insufficient funds: balance {balance:.2} cannot cover {required:.2}")]
    InsufficientFunds { required: f32, balance: f32 },
    #[error("invalid hand operation: {0}")]
    InvalidHandOperation(String),
    #[error("no strategy entry for total {total} (soft: {soft}) against dealer up-card {dealer_up}")]
    MissingStrategyEntry { total: u8, soft: bool, dealer_up: u8 },
}

/// One seat in the table configuration.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub name: String,
    pub bankroll: f32,
    pub is_card_counting: bool,
}

impl PlayerConfig {
    pub fn new(name: &str, bankroll: f32, is_card_counting: bool) -> PlayerConfig {
        PlayerConfig {
            name: name.to_string(),
            bankroll,
            is_card_counting,
        }
    }
}

/// Everything the engine consumes at construction: shoe size, table
/// minimum, the roster, and optionally a shoe seed for reproducible
/// runs.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub num_decks: usize,
    pub minimum_bet: u32,
    pub players: Vec<PlayerConfig>,
    pub shoe_seed: Option<u64>,
}

impl TableConfig {
    /// Returns a builder preloaded with the standard table: six decks,
    /// a ten-unit minimum, and four players with 10 000 apiece, two of
    /// them counting.
    pub fn new() -> TableConfigBuilder {
        TableConfigBuilder {
            num_decks: None,
            minimum_bet: None,
            players: Vec::new(),
            shoe_seed: None,
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig::new().build()
    }
}

/// Builder for a [`TableConfig`].
#[derive(Debug, Clone)]
pub struct TableConfigBuilder {
    num_decks: Option<usize>,
    minimum_bet: Option<u32>,
    players: Vec<PlayerConfig>,
    shoe_seed: Option<u64>,
}

impl TableConfigBuilder {
    /// Number of decks in the shoe.
    pub fn num_decks(&mut self, decks: usize) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Table minimum bet.
    pub fn minimum_bet(&mut self, bet: u32) -> &mut Self {
        self.minimum_bet = Some(bet);
        self
    }

    /// Adds one player to the roster.
    pub fn player(&mut self, name: &str, bankroll: f32, is_card_counting: bool) -> &mut Self {
        self.players.push(PlayerConfig::new(name, bankroll, is_card_counting));
        self
    }

    /// Seeds the shoe's random source for a reproducible run.
    pub fn shoe_seed(&mut self, seed: u64) -> &mut Self {
        self.shoe_seed = Some(seed);
        self
    }

    /// Builds the configuration, falling back to the standard table
    /// wherever nothing was chosen. An empty roster gets the default
    /// four seats.
    pub fn build(&mut self) -> TableConfig {
        let players = if self.players.is_empty() {
            vec![
                PlayerConfig::new("P1", 10_000.0, true),
                PlayerConfig::new("P2", 10_000.0, true),
                PlayerConfig::new("P3", 10_000.0, false),
                PlayerConfig::new("P4", 10_000.0, false),
            ]
        } else {
            self.players.clone()
        };
        TableConfig {
            num_decks: self.num_decks.unwrap_or(6),
            minimum_bet: self.minimum_bet.unwrap_or(10),
            players,
            shoe_seed: self.shoe_seed,
        }
    }
}

/// Runs a table through batches of rounds and summarizes what the
/// roster did: wins, pushes, losses, blackjacks, and where every
/// bankroll ended up against its watermarks.
pub struct Simulation {
    table: Table,
    starting_bankrolls: Vec<f32>,
    rounds_played: u32,
}

impl Simulation {
    pub fn new(config: TableConfig) -> Simulation {
        let starting_bankrolls = config.players.iter().map(|p| p.bankroll).collect();
        Simulation {
            table: Table::new(config),
            starting_bankrolls,
            rounds_played: 0,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Plays `rounds` complete rounds, stopping early only on a logic
    /// defect surfaced by the engine.
    pub fn run(&mut self, rounds: u32) -> Result<(), GameError> {
        for _ in 0..rounds {
            self.table.play_round()?;
            self.rounds_played += 1;
        }
        info!(rounds = self.rounds_played, "simulation batch complete");
        Ok(())
    }

    /// Snapshot of the accumulated results so far.
    pub fn summary(&self) -> SimulationSummary {
        let players = self
            .table
            .players()
            .iter()
            .zip(&self.starting_bankrolls)
            .map(|(player, &starting)| {
                let count = |wanted: Outcome| {
                    player.results().iter().filter(|r| **r == wanted).count()
                };
                PlayerSummary {
                    name: player.name().to_string(),
                    blackjacks: count(Outcome::Blackjack),
                    wins: count(Outcome::Win),
                    pushes: count(Outcome::Push),
                    losses: count(Outcome::Loss),
                    final_balance: player.money(),
                    minimum_balance: player.minimum_money(),
                    maximum_balance: player.maximum_money(),
                    net_winnings: player.money() - starting,
                }
            })
            .collect();
        SimulationSummary {
            rounds_played: self.rounds_played,
            players,
        }
    }
}

/// Accumulated results for one player across a simulation.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub blackjacks: usize,
    pub wins: usize,
    pub pushes: usize,
    pub losses: usize,
    pub final_balance: f32,
    pub minimum_balance: f32,
    pub maximum_balance: f32,
    pub net_winnings: f32,
}

/// Accumulated results for a whole simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub rounds_played: u32,
    pub players: Vec<PlayerSummary>,
}

impl Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const WIDTH: usize = 88;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        writeln!(f, "{:-^WIDTH$}", format!(" {} rounds ", self.rounds_played))?;
        writeln!(
            f,
            "{:<8}{:>6}{:>8}{:>8}{:>8}{:>12}{:>12}{:>12}{:>14}",
            "player", "bj", "wins", "pushes", "losses", "final", "min", "max", "net"
        )?;
        for player in &self.players {
            writeln!(
                f,
                "{:<8}{:>6}{:>8}{:>8}{:>8}{:>12.2}{:>12.2}{:>12.2}{:>14.2}",
                player.name,
                player.blackjacks,
                player.wins,
                player.pushes,
                player.losses,
                player.final_balance,
                player.minimum_balance,
                player.maximum_balance,
                player.net_winnings
            )?;
        }
        write!(f, "{}", "-".repeat(WIDTH))
    }
}
