use anyhow::{Context, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use wordle_deck::cli::{CliInterface, parse_cli};
use wordle_deck::logging::init_logging;
use wordle_deck::tui::TuiInterface;
use wordle_deck::{load_deck, play_session};

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    init_logging(cli.log_level(), cli.log_file.as_deref()).context("failed to open log file")?;

    let deck = load_deck(cli.deck_path.as_deref()).context("failed to load deck")?;
    let playable = deck.validate_for_game(cli.min_length, cli.max_length);
    if !playable.is_valid {
        bail!(
            "deck '{}' cannot be played:\n  {}",
            deck.name(),
            playable.errors.join("\n  ")
        );
    }
    log::info!("Loaded deck '{}' with {} words", deck.name(), deck.len());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let options = cli.session_options();

    let stats = if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock());
        play_session(&deck, &options, &mut interface, &mut rng)?
    } else {
        let mut interface = TuiInterface::new().context("failed to set up the terminal")?;
        play_session(&deck, &options, &mut interface, &mut rng)?
    };

    log::info!(
        "Session over: won {}, lost {}, abandoned {}",
        stats.won,
        stats.lost,
        stats.abandoned
    );
    Ok(())
}
