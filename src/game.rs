//! Word-guessing game engine.
//!
//! A [`GameState`] is a plain value. Every operation takes a snapshot and returns the next
//! one; the caller keeps whichever value it wants to be current. Nothing here does I/O or
//! keeps shared state, so independent games never interfere.
//!
//! # State Machine
//! - `Playing` → `Won` when a submitted guess equals the target word
//! - `Playing` → `Lost` when the last allowed guess misses
//! - `Won` and `Lost` are terminal: every operation returns the state unchanged

use crate::constraints::normalize_word;
use crate::error::GameError;
use crate::{debug_log, info_log};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const DEFAULT_MAX_GUESSES: usize = 6;
pub const INVALID_WORD_MESSAGE: &str = "Not in word list";

/// Feedback for a single tile.
///
/// Variants are declared in priority order, so `max` picks the most informative one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LetterState {
    /// Unfilled tile
    #[default]
    Empty,
    /// Gray
    Absent,
    /// Yellow
    Present,
    /// Green
    Correct,
}

impl LetterState {
    /// Single-character code: G (correct), Y (present), X (absent), `_` (empty).
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
            Self::Empty => '_',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Letter {
    pub ch: char,
    pub state: LetterState,
}

/// One submitted, evaluated row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Guess {
    letters: Vec<Letter>,
}

impl Guess {
    #[must_use]
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    #[must_use]
    pub fn word(&self) -> String {
        self.letters.iter().map(|letter| letter.ch).collect()
    }

    /// Feedback as a G/Y/X string, e.g. `"GYXXG"`.
    #[must_use]
    pub fn pattern(&self) -> String {
        self.letters.iter().map(|letter| letter.state.as_char()).collect()
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        !self.letters.is_empty()
            && self
                .letters
                .iter()
                .all(|letter| letter.state == LetterState::Correct)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(label)
    }
}

/// Snapshot of one game.
///
/// Built by [`initialize`] and advanced by [`add_letter`], [`remove_letter`] and
/// [`submit_guess`]. Fields are read through accessors so the invariants below hold for every
/// value a caller can observe:
/// - `target_word` is non-empty lowercase ASCII
/// - `current_guess` is lowercase ASCII and never longer than the target
/// - `guesses.len() <= max_guesses`
/// - keyboard keys are uppercase and never map to [`LetterState::Empty`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    target_word: String,
    guesses: Vec<Guess>,
    current_guess: String,
    status: GameStatus,
    max_guesses: usize,
    keyboard_state: BTreeMap<char, LetterState>,
    valid_words: Option<BTreeSet<String>>,
    error_message: Option<String>,
}

impl GameState {
    #[must_use]
    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    #[must_use]
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    #[must_use]
    pub fn current_guess(&self) -> &str {
        &self.current_guess
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    /// Best feedback seen so far for each uppercase key.
    #[must_use]
    pub fn keyboard_state(&self) -> &BTreeMap<char, LetterState> {
        &self.keyboard_state
    }

    #[must_use]
    pub fn key_state(&self, key: char) -> Option<LetterState> {
        self.keyboard_state.get(&key.to_ascii_uppercase()).copied()
    }

    #[must_use]
    pub fn valid_words(&self) -> Option<&BTreeSet<String>> {
        self.valid_words.as_ref()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.target_word.len()
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> usize {
        self.max_guesses.saturating_sub(self.guesses.len())
    }

    fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    fn accepts(&self, word: &str) -> bool {
        match &self.valid_words {
            Some(valid) if !valid.is_empty() => valid.contains(word),
            _ => true,
        }
    }
}

/// Start a game.
///
/// The target is stored lowercased. `valid_words`, when given, are normalized and become the
/// only guesses [`submit_guess`] accepts (an empty list accepts everything).
///
/// # Errors
/// [`GameError::InvalidInput`] when the target is empty or holds anything but ASCII letters,
/// or when `max_guesses` is zero.
pub fn initialize<S: AsRef<str>>(
    target_word: &str,
    max_guesses: usize,
    valid_words: Option<&[S]>,
) -> Result<GameState, GameError> {
    if target_word.is_empty() {
        return Err(GameError::InvalidInput(
            "target word must not be empty".to_string(),
        ));
    }
    if !target_word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GameError::InvalidInput(format!(
            "target word '{target_word}' must contain letters only"
        )));
    }
    if max_guesses == 0 {
        return Err(GameError::InvalidInput(
            "max guesses must be at least 1".to_string(),
        ));
    }

    let valid_words = valid_words.map(|words| {
        words
            .iter()
            .map(|word| normalize_word(word.as_ref()))
            .filter(|word| !word.is_empty())
            .collect()
    });

    debug_log!(
        "initialize() - target '{}', {} guesses",
        target_word,
        max_guesses
    );

    Ok(GameState {
        target_word: target_word.to_ascii_lowercase(),
        guesses: Vec::new(),
        current_guess: String::new(),
        status: GameStatus::Playing,
        max_guesses,
        keyboard_state: BTreeMap::new(),
        valid_words,
        error_message: None,
    })
}

/// Append a letter to the in-progress row.
///
/// Unchanged when the game is over, the row is full, or `letter` is not an ASCII letter.
#[must_use]
pub fn add_letter(state: &GameState, letter: char) -> GameState {
    if !state.is_playing()
        || state.current_guess.len() >= state.word_length()
        || !letter.is_ascii_alphabetic()
    {
        return state.clone();
    }

    let mut next = state.clone();
    next.current_guess.push(letter.to_ascii_lowercase());
    next.error_message = None;
    next
}

/// Drop the last letter of the in-progress row.
#[must_use]
pub fn remove_letter(state: &GameState) -> GameState {
    if !state.is_playing() || state.current_guess.is_empty() {
        return state.clone();
    }

    let mut next = state.clone();
    next.current_guess.pop();
    next.error_message = None;
    next
}

/// Evaluate the in-progress row.
///
/// Unchanged unless the game is running and the row is full. A word outside the valid-words
/// list only sets [`GameState::error_message`]; the row stays put for correction.
#[must_use]
pub fn submit_guess(state: &GameState) -> GameState {
    if !state.is_playing() || state.current_guess.len() != state.word_length() {
        return state.clone();
    }

    let word = state.current_guess.to_ascii_lowercase();
    if !state.accepts(&word) {
        debug_log!("submit_guess() - '{}' is not in the word list", word);
        let mut next = state.clone();
        next.error_message = Some(INVALID_WORD_MESSAGE.to_string());
        return next;
    }

    let guess = evaluate_guess(&word, &state.target_word);
    let mut next = state.clone();
    merge_keyboard_state(&mut next.keyboard_state, &guess);
    next.guesses.push(guess);
    next.current_guess.clear();
    next.error_message = None;

    next.status = if word == state.target_word {
        GameStatus::Won
    } else if next.guesses.len() >= next.max_guesses {
        GameStatus::Lost
    } else {
        GameStatus::Playing
    };

    if next.status.is_terminal() {
        info_log!(
            "Game {} after {}/{} guesses",
            next.status,
            next.guesses.len(),
            next.max_guesses
        );
    }
    next
}

#[must_use]
pub fn is_game_complete(state: &GameState) -> bool {
    state.status.is_terminal()
}

/// Score `guess` against `target`, case-insensitively.
///
/// Exact matches are claimed first, then misplaced letters left to right, each consuming one
/// unclaimed occurrence from the target. A letter is never reported correct or present more
/// times than the target contains it.
#[must_use]
pub fn evaluate_guess(guess: &str, target: &str) -> Guess {
    let guess_chars: Vec<char> = guess.chars().map(|c| c.to_ascii_lowercase()).collect();
    let mut remaining: Vec<Option<char>> = target
        .chars()
        .map(|c| Some(c.to_ascii_lowercase()))
        .collect();
    let mut states = vec![LetterState::Empty; guess_chars.len()];

    // First pass: exact positions
    for (i, &ch) in guess_chars.iter().enumerate() {
        if let Some(slot) = remaining.get_mut(i)
            && *slot == Some(ch)
        {
            *slot = None;
            states[i] = LetterState::Correct;
        }
    }

    // Second pass: misplaced letters
    for (i, &ch) in guess_chars.iter().enumerate() {
        if states[i] != LetterState::Empty {
            continue;
        }
        if let Some(slot) = remaining.iter_mut().find(|slot| **slot == Some(ch)) {
            *slot = None;
            states[i] = LetterState::Present;
        }
    }

    // Third pass: everything left is absent
    for state in &mut states {
        if *state == LetterState::Empty {
            *state = LetterState::Absent;
        }
    }

    Guess {
        letters: guess_chars
            .into_iter()
            .zip(states)
            .map(|(ch, state)| Letter { ch, state })
            .collect(),
    }
}

fn merge_keyboard_state(keyboard: &mut BTreeMap<char, LetterState>, guess: &Guess) {
    for letter in guess.letters() {
        if letter.state == LetterState::Empty {
            continue;
        }
        keyboard
            .entry(letter.ch.to_ascii_uppercase())
            .and_modify(|best| *best = (*best).max(letter.state))
            .or_insert(letter.state);
    }
}
