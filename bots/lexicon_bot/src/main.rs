use std::path::PathBuf;

use clap::Parser;
use lexicon_bot::LexiconBot;
use rand::rngs::StdRng;
use rand::SeedableRng;
use taboo::load_cards;
use taboo_bot_utils::Bot;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the cards CSV file whose targets make up the lexicon
    #[arg(long, default_value = "data/cards.csv")]
    cards: PathBuf,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);
    let cards = load_cards(&args.cards)?;
    info!(seed, words = cards.len(), "Loaded lexicon");

    LexiconBot::new(cards, rng).run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout carries the protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
