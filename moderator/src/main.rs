use std::path::PathBuf;

use anyhow::ensure;
use clap::Parser;
use moderator::{AnnotatorChoice, Oracle, OracleConfig, OracleProcess, Recorder, Table, Terminal};
use rand::rngs::StdRng;
use rand::SeedableRng;
use taboo::{load_cards, Deck, Game, GameSettings, TurnOrder};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the config JSON file of the oracle
    oracle_config: PathBuf,

    /// Path to the cards CSV file
    #[arg(short = 'p', long, default_value = "data/cards.csv")]
    cards_path: PathBuf,

    /// Model the oracle should use
    #[arg(short, long, default_value = "gpt-4o-mini")]
    model: String,

    /// Number of rounds (each round is 4 turns, 2 for the player and 2 for the CPU)
    #[arg(short, long, default_value_t = 2)]
    rounds: usize,

    /// Number of cards per turn
    #[arg(short, long, default_value_t = 5)]
    cards_per_turn: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Who extracts the main words of a hint before checking it
    #[arg(long, value_enum, default_value_t = AnnotatorChoice::Builtin)]
    annotator: AnnotatorChoice,

    /// Record the game as a JSON file into this directory
    #[arg(long)]
    record_to: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    ensure!(args.rounds >= 1, "At least one round must be played");
    ensure!(args.cards_per_turn >= 1, "At least one card per turn must be played");

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let deck = Deck::new(load_cards(&args.cards_path)?);
    let settings = GameSettings {
        rounds: args.rounds,
        cards_per_turn: args.cards_per_turn,
    };
    settings.check_deck(&deck)?;
    info!(cards = deck.len(), needed = settings.cards_needed(), "Loaded cards");

    let mut recorder = args.record_to.map(Recorder::new).transpose()?;

    let oracle_config = OracleConfig::load(&args.oracle_config)?;
    let mut oracle = OracleProcess::spawn(&oracle_config)?;
    oracle.new_game(&args.model)?;
    info!(oracle = %oracle_config.nick, model = %args.model, "Oracle ready");

    let turn_order = TurnOrder::roll(&mut rng);
    info!(order = ?turn_order.order(), "Rolled turn order");
    let mut game = Game::new(settings, deck, turn_order);

    let mut console = Terminal::new();
    let played = Table::new(&mut oracle, &mut console, args.annotator, &mut recorder)
        .play_game(&mut game, &mut rng);

    // Cards played before a failure are recorded too
    if let Some(rec) = &mut recorder {
        let path = rec.write_game_recording(seed, &args.model, &game.summary())?;
        info!(path = %path.display(), "Wrote game recording");
    }

    println!("{}", played?);
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout belongs to the game itself
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
