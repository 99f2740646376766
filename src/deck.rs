//! Decks: named lists of candidate target words.

use crate::constraints::{
    WordValidationResult, parse_words_string, process_words, validate_words_for_game,
};
use crate::error::DeckError;
use crate::info_log;
use std::fs;
use std::path::{Path, PathBuf};

pub const EMBEDDED_DECK: &str = include_str!("resources/deck.txt");
pub const EMBEDDED_DECK_ID: &str = "default";
pub const APP_DIR: &str = "wordle-deck";
pub const DEFAULT_DECK_FILE: &str = "deck.txt";

/// A validated deck. Words are trimmed, lowercased and unique, in authoring order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    id: String,
    name: String,
    words: Vec<String>,
}

impl Deck {
    /// Build a deck from a word list.
    ///
    /// # Errors
    /// [`DeckError::InvalidWords`] listing every problem in `words`.
    pub fn new<S: AsRef<str>>(id: &str, name: &str, words: &[S]) -> Result<Self, DeckError> {
        let parsed = process_words(words);
        Self::from_validated(id, name, parsed.normalized_words, parsed.validation)
    }

    /// Parse deck text: words separated by commas and/or newlines.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    /// [`DeckError::InvalidWords`] when the text holds no words or any word is invalid.
    pub fn parse(id: &str, name: &str, data: &str) -> Result<Self, DeckError> {
        let csv = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join(",");
        let parsed = parse_words_string(&csv);
        Self::from_validated(id, name, parsed.normalized_words, parsed.validation)
    }

    /// Load a deck file. The file stem becomes both id and name.
    ///
    /// # Errors
    /// [`DeckError::Io`] if the file cannot be read, otherwise as [`Deck::parse`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stem = path
            .file_stem()
            .map_or_else(|| "deck".to_string(), |s| s.to_string_lossy().into_owned());
        Self::parse(&stem, &stem, &data)
    }

    /// The deck bundled with the binary.
    ///
    /// # Errors
    /// Only if the bundled text is malformed.
    pub fn embedded() -> Result<Self, DeckError> {
        Self::parse(EMBEDDED_DECK_ID, "Default", EMBEDDED_DECK)
    }

    fn from_validated(
        id: &str,
        name: &str,
        words: Vec<String>,
        validation: WordValidationResult,
    ) -> Result<Self, DeckError> {
        if !validation.is_valid {
            return Err(DeckError::InvalidWords {
                name: name.to_string(),
                errors: validation.errors,
            });
        }
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            words,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check every word against a game length window.
    #[must_use]
    pub fn validate_for_game(&self, min_length: usize, max_length: usize) -> WordValidationResult {
        validate_words_for_game(&self.words, min_length, max_length)
    }
}

/// `<config_dir>/wordle-deck/deck.txt`, if the platform has a config directory.
#[must_use]
pub fn default_deck_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(DEFAULT_DECK_FILE))
}

/// Resolve the deck to play.
///
/// An explicit path wins, then the deck file in the config directory if it exists, then the
/// embedded deck.
///
/// # Errors
/// Whatever loading the chosen deck fails with.
pub fn load_deck(path: Option<&Path>) -> Result<Deck, DeckError> {
    if let Some(path) = path {
        info_log!("Loading deck from '{}'", path.display());
        return Deck::from_file(path);
    }

    if let Some(path) = default_deck_path()
        && path.is_file()
    {
        info_log!("Loading deck from config directory '{}'", path.display());
        return Deck::from_file(&path);
    }

    info_log!("Using embedded deck");
    Deck::embedded()
}
