//! Error types for the game engine and deck loading.

use std::io;
use std::path::PathBuf;

/// Precondition failures when building a game or picking a word.
///
/// Per-keystroke operations never produce these; they return the state unchanged instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("word list is empty")]
    EmptyInput,
}

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("failed to read deck file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("deck '{name}' has invalid words: {}", errors.join("; "))]
    InvalidWords { name: String, errors: Vec<String> },
}
