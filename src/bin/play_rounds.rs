use blackjack_engine::{Simulation, TableConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Play a number of blackjack rounds and print the roster's results.
#[derive(Parser, Debug)]
#[command(name = "play_rounds", version, about)]
struct Args {
    /// Number of rounds to play.
    #[arg(short, long, default_value_t = 1000)]
    rounds: u32,

    /// Number of decks in the shoe.
    #[arg(short, long, default_value_t = 6)]
    decks: usize,

    /// Table minimum bet.
    #[arg(short, long, default_value_t = 10)]
    minimum_bet: u32,

    /// Number of card-counting players at the table.
    #[arg(long, default_value_t = 2)]
    counters: usize,

    /// Number of flat-betting players at the table.
    #[arg(long, default_value_t = 2)]
    flats: usize,

    /// Starting bankroll for every player.
    #[arg(long, default_value_t = 10_000.0)]
    bankroll: f32,

    /// Shoe seed for a reproducible run.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Emit the summary and final table snapshot as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut builder = TableConfig::new();
    builder.num_decks(args.decks).minimum_bet(args.minimum_bet);
    for n in 0..args.counters {
        builder.player(&format!("P{}", n + 1), args.bankroll, true);
    }
    for n in 0..args.flats {
        builder.player(&format!("P{}", args.counters + n + 1), args.bankroll, false);
    }
    if let Some(seed) = args.seed {
        builder.shoe_seed(seed);
    }

    let mut simulation = Simulation::new(builder.build());
    if let Err(e) = simulation.run(args.rounds) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    if args.json {
        let summary = serde_json::json!({
            "summary": simulation.summary(),
            "table": simulation.table().snapshot(),
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", simulation.summary());
    }
}
