// Library interface for wordle-deck
// The binary and the integration tests both go through these modules

pub mod cli;
pub mod constraints;
pub mod deck;
pub mod error;
pub mod game;
pub mod logging;
pub mod selection;
pub mod session;
pub mod tui;

// Re-export commonly used items for easier testing
pub use constraints::{
    ParsedWords, WordStats, WordValidationResult, normalize_word, normalize_words,
    parse_words_string, process_words, validate_word, validate_word_for_game, validate_words,
    validate_words_for_game, word_stats,
};
pub use deck::{Deck, load_deck};
pub use error::{DeckError, GameError};
pub use game::{
    GameState, GameStatus, Guess, Letter, LetterState, add_letter, evaluate_guess, initialize,
    is_game_complete, remove_letter, submit_guess,
};
pub use selection::{select_random_word, select_random_word_with_rng};
pub use session::{GameInterface, SessionOptions, SessionStats, UserAction, play_session};
