use crate::constraints::{DEFAULT_MAX_WORD_LENGTH, DEFAULT_MIN_WORD_LENGTH};
use crate::debug_log;
use crate::deck::Deck;
use crate::game::{
    DEFAULT_MAX_GUESSES, GameState, GameStatus, Guess, LetterState, is_game_complete,
};
use crate::logging::level_for_verbosity;
use crate::session::{GameInterface, SessionOptions, SessionStats, UserAction};
use clap::Parser;
use log::LevelFilter;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::PathBuf;

/// On-screen keyboard rows, shared with the terminal UI.
pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Play word-guessing puzzles drawn from a deck of words
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a deck file (words separated by commas or newlines)
    #[arg(short = 'd', long = "deck")]
    pub deck_path: Option<PathBuf>,

    /// Number of guesses allowed per game
    #[arg(
        short = 'g',
        long = "max-guesses",
        default_value_t = DEFAULT_MAX_GUESSES,
        value_parser = parse_max_guesses
    )]
    pub max_guesses: usize,

    /// Accept any word as a guess, not only words from the deck
    #[arg(long = "allow-any-word")]
    pub allow_any_word: bool,

    /// Shortest word length the deck may contain
    #[arg(long = "min-length", default_value_t = DEFAULT_MIN_WORD_LENGTH)]
    pub min_length: usize,

    /// Longest word length the deck may contain
    #[arg(long = "max-length", default_value_t = DEFAULT_MAX_WORD_LENGTH)]
    pub max_length: usize,

    /// Seed for picking target words
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Append log output to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            max_guesses: self.max_guesses,
            restrict_guesses: !self.allow_any_word,
        }
    }

    /// Logging stays off for the full-screen UI unless it goes to a file.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if !self.plain && self.log_file.is_none() {
            LevelFilter::Off
        } else {
            level_for_verbosity(self.verbose)
        }
    }
}

fn parse_max_guesses(value: &str) -> Result<usize, String> {
    let guesses: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if guesses == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(guesses)
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

#[derive(Debug, PartialEq, Eq)]
pub enum GuessInput {
    Valid(String),
    Invalid,
    Exit,
    NewGame,
}

fn is_valid_word(word: &str, length: usize) -> bool {
    word.len() == length && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Render a submitted row: `[A]` correct, `(A)` present, ` a ` absent.
#[must_use]
pub fn format_guess(guess: &Guess) -> String {
    guess
        .letters()
        .iter()
        .map(|letter| {
            let upper = letter.ch.to_ascii_uppercase();
            match letter.state {
                LetterState::Correct => format!("[{upper}]"),
                LetterState::Present => format!("({upper})"),
                LetterState::Absent => format!(" {} ", letter.ch.to_ascii_lowercase()),
                LetterState::Empty => " _ ".to_string(),
            }
        })
        .collect()
}

/// Render the keyboard in QWERTY rows using the same markers as [`format_guess`].
///
/// Keys not tried yet are shown plain, absent keys as `·`.
#[must_use]
pub fn format_keyboard(keyboard: &BTreeMap<char, LetterState>) -> String {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(row, keys)| {
            let cells: String = keys
                .chars()
                .map(|key| match keyboard.get(&key) {
                    Some(LetterState::Correct) => format!("[{key}]"),
                    Some(LetterState::Present) => format!("({key})"),
                    Some(LetterState::Absent) => " · ".to_string(),
                    Some(LetterState::Empty) | None => format!(" {key} "),
                })
                .collect();
            format!("{}{cells}", " ".repeat(row))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// All submitted rows, then blank rows for the guesses left.
#[must_use]
pub fn format_board(state: &GameState) -> String {
    let blank = " _ ".repeat(state.word_length());
    state
        .guesses()
        .iter()
        .map(format_guess)
        .chain(std::iter::repeat_n(blank, state.remaining_guesses()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn read_guess<R: BufRead>(reader: &mut R, length: usize) -> GuessInput {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => return GuessInput::Exit,
        Ok(_) => {}
        Err(e) => {
            debug_log!("read_guess() - read error: {}", e);
            return GuessInput::Exit;
        }
    }
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "exit" | "quit" => GuessInput::Exit,
        "next" | "new" => GuessInput::NewGame,
        _ if is_valid_word(&input, length) => GuessInput::Valid(input),
        _ => {
            println!("Invalid guess. Please enter {length} letters.");
            GuessInput::Invalid
        }
    }
}

pub fn display_state(state: &GameState) {
    println!("{}", format_board(state));
    if let Some(message) = state.error_message() {
        println!("! {message}");
    }
    println!();
    println!("{}", format_keyboard(state.keyboard_state()));
}

pub fn display_stats(stats: &SessionStats) {
    println!(
        "Played {} | Won {} | Lost {} | Win rate {:.0}%",
        stats.played(),
        stats.won,
        stats.lost,
        stats.win_rate() * 100.0
    );
}

/// CLI implementation of the `GameInterface` trait.
/// Each input line is a whole guess, `next` or `exit`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_new_game(&mut self, deck: &Deck, state: &GameState) {
        println!(
            "\nNew game from deck '{}' ({} words): {} letters, {} guesses.",
            deck.name(),
            deck.len(),
            state.word_length(),
            state.max_guesses()
        );
        if state.valid_words().is_some() {
            println!("Guesses must be words from the deck.");
        }
    }

    fn read_action(&mut self, state: &GameState) -> Option<UserAction> {
        if is_game_complete(state) {
            println!("\nEnter 'next' for a new word or 'exit' to quit:");
        } else {
            println!(
                "\nEnter a {}-letter guess ({} left), 'next' for a new word, or 'exit' to quit:",
                state.word_length(),
                state.remaining_guesses()
            );
        }

        match read_guess(&mut self.reader, state.word_length()) {
            GuessInput::Valid(word) => Some(UserAction::Word(word)),
            GuessInput::Exit => Some(UserAction::Exit),
            GuessInput::NewGame => Some(UserAction::NewGame),
            GuessInput::Invalid => None,
        }
    }

    fn display_state(&mut self, state: &GameState) {
        display_state(state);
    }

    fn display_result(&mut self, state: &GameState, stats: &SessionStats) {
        match state.status() {
            GameStatus::Won => println!(
                "Solved in {}/{}!",
                state.guesses().len(),
                state.max_guesses()
            ),
            GameStatus::Lost => println!(
                "Out of guesses. The word was {}.",
                state.target_word().to_uppercase()
            ),
            GameStatus::Playing => {}
        }
        display_stats(stats);
    }

    fn display_exit_message(&mut self, stats: &SessionStats) {
        display_stats(stats);
        println!("Exiting.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{add_letter, evaluate_guess, initialize, submit_guess};
    use std::io::Cursor;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("wordle-deck").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.deck_path, None);
        assert_eq!(cli.max_guesses, DEFAULT_MAX_GUESSES);
        assert!(!cli.allow_any_word);
        assert_eq!(cli.min_length, DEFAULT_MIN_WORD_LENGTH);
        assert_eq!(cli.max_length, DEFAULT_MAX_WORD_LENGTH);
        assert_eq!(cli.seed, None);
        assert!(!cli.plain);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.session_options(), SessionOptions::default());
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = parse(&[
            "-d",
            "animals.txt",
            "-g",
            "4",
            "--allow-any-word",
            "--seed",
            "42",
            "--plain",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.deck_path, Some(PathBuf::from("animals.txt")));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.session_options(),
            SessionOptions {
                max_guesses: 4,
                restrict_guesses: false
            }
        );
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_parse_cli_rejects_zero_guesses() {
        assert!(parse(&["--max-guesses", "0"]).is_err());
        assert!(parse(&["--max-guesses", "many"]).is_err());
    }

    #[test]
    fn test_log_level_off_for_full_screen() {
        let cli = parse(&["-v"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::Off);

        let cli = parse(&["-v", "--log-file", "game.log"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::Info);

        let cli = parse(&["--plain"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("crane", 5));
        assert!(is_valid_word("cat", 3));
        assert!(!is_valid_word("cran", 5));
        assert!(!is_valid_word("cranes", 5));
        assert!(!is_valid_word("cran3", 5));
        assert!(!is_valid_word("", 5));
    }

    #[test]
    fn test_read_guess_valid_word() {
        let mut reader = Cursor::new("CRANE\n");
        assert_eq!(read_guess(&mut reader, 5), GuessInput::Valid("crane".to_string()));
    }

    #[test]
    fn test_read_guess_trims_whitespace() {
        let mut reader = Cursor::new("   slate  \n");
        assert_eq!(read_guess(&mut reader, 5), GuessInput::Valid("slate".to_string()));
    }

    #[test]
    fn test_read_guess_commands() {
        assert_eq!(read_guess(&mut Cursor::new("exit\n"), 5), GuessInput::Exit);
        assert_eq!(read_guess(&mut Cursor::new("QUIT\n"), 5), GuessInput::Exit);
        assert_eq!(read_guess(&mut Cursor::new("next\n"), 5), GuessInput::NewGame);
    }

    #[test]
    fn test_read_guess_wrong_length() {
        assert_eq!(read_guess(&mut Cursor::new("cran\n"), 5), GuessInput::Invalid);
        assert_eq!(read_guess(&mut Cursor::new("cranes\n"), 5), GuessInput::Invalid);
        assert_eq!(read_guess(&mut Cursor::new("cr4ne\n"), 5), GuessInput::Invalid);
    }

    #[test]
    fn test_read_guess_end_of_input_exits() {
        assert_eq!(read_guess(&mut Cursor::new(""), 5), GuessInput::Exit);
    }

    #[test]
    fn test_format_guess() {
        let guess = evaluate_guess("trace", "crate");
        assert_eq!(format_guess(&guess), "(T)[R][A](C)[E]");

        let guess = evaluate_guess("buddy", "crane");
        assert_eq!(format_guess(&guess), " b  u  d  d  y ");
    }

    #[test]
    fn test_format_keyboard() {
        let mut keyboard = BTreeMap::new();
        keyboard.insert('Q', LetterState::Correct);
        keyboard.insert('A', LetterState::Present);
        keyboard.insert('Z', LetterState::Absent);

        let rendered = format_keyboard(&keyboard);
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("[Q] W "));
        assert!(rows[1].starts_with(" (A) S "));
        assert!(rows[2].starts_with("   ·  X "));
    }

    #[test]
    fn test_format_board_shows_remaining_rows() {
        let state = initialize("cat", 3, None::<&[&str]>).unwrap();
        let state = "dog".chars().fold(state, |s, c| add_letter(&s, c));
        let state = submit_guess(&state);

        let board = format_board(&state);
        let rows: Vec<&str> = board.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], " d  o  g ");
        assert_eq!(rows[1], " _  _  _ ");
    }

    #[test]
    fn test_cli_interface_maps_input() {
        let state = initialize("crane", 6, None::<&[&str]>).unwrap();
        let mut interface = CliInterface::new(Cursor::new("crane\nabc\nnext\n"));
        assert_eq!(
            interface.read_action(&state),
            Some(UserAction::Word("crane".to_string()))
        );
        assert_eq!(interface.read_action(&state), None);
        assert_eq!(interface.read_action(&state), Some(UserAction::NewGame));
        assert_eq!(interface.read_action(&state), Some(UserAction::Exit));
    }
}
