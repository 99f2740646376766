//! Drives games from a deck through a [`GameInterface`].
//!
//! The session owns the current [`GameState`] and replaces it with whatever the engine
//! returns for each action, so a single interface is the only writer.

use crate::deck::Deck;
use crate::error::GameError;
use crate::game::{
    DEFAULT_MAX_GUESSES, GameState, GameStatus, add_letter, initialize, is_game_complete,
    remove_letter, submit_guess,
};
use crate::selection::select_random_word_with_rng;
use crate::{debug_log, info_log};
use rand::Rng;

/// Input events a front end can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Letter(char),
    Backspace,
    Submit,
    /// Replace the current row with a whole word and submit it.
    Word(String),
    NewGame,
    Exit,
}

/// Front end contract for [`play_session`].
pub trait GameInterface {
    fn display_new_game(&mut self, deck: &Deck, state: &GameState);
    /// `None` means the input was unusable and nothing should happen.
    fn read_action(&mut self, state: &GameState) -> Option<UserAction>;
    fn display_state(&mut self, state: &GameState);
    fn display_result(&mut self, state: &GameState, stats: &SessionStats);
    fn display_exit_message(&mut self, stats: &SessionStats);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub max_guesses: usize,
    /// Only accept guesses that are words of the deck.
    pub restrict_guesses: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_guesses: DEFAULT_MAX_GUESSES,
            restrict_guesses: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub won: usize,
    pub lost: usize,
    /// Games left for a new word or exit after at least one guess.
    pub abandoned: usize,
}

impl SessionStats {
    #[must_use]
    pub fn played(&self) -> usize {
        self.won + self.lost
    }

    /// Fraction of finished games that were won, 0.0 when none finished.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self) -> f64 {
        if self.played() == 0 {
            0.0
        } else {
            self.won as f64 / self.played() as f64
        }
    }

    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won => self.won += 1,
            GameStatus::Lost => self.lost += 1,
            GameStatus::Playing => {}
        }
    }

    fn record_left(&mut self, state: &GameState) {
        if !is_game_complete(state) && !state.guesses().is_empty() {
            self.abandoned += 1;
        }
    }
}

/// Start a game on a random word from `deck`.
///
/// # Errors
/// [`GameError::EmptyInput`] for an empty deck, or whatever [`initialize`] rejects.
pub fn new_game<R: Rng + ?Sized>(
    deck: &Deck,
    options: &SessionOptions,
    rng: &mut R,
) -> Result<GameState, GameError> {
    let target = select_random_word_with_rng(deck.words(), rng)?;
    let valid_words = options.restrict_guesses.then_some(deck.words());
    info_log!(
        "New {}-letter game from deck '{}'",
        target.len(),
        deck.name()
    );
    initialize(target, options.max_guesses, valid_words)
}

/// Apply one action to `state` and return the next state.
///
/// `NewGame` and `Exit` are handled by the session and leave the state as it is.
#[must_use]
pub fn apply_action(state: &GameState, action: &UserAction) -> GameState {
    match action {
        UserAction::Letter(c) => add_letter(state, *c),
        UserAction::Backspace => remove_letter(state),
        UserAction::Submit => submit_guess(state),
        UserAction::Word(word) => enter_word(state, word),
        UserAction::NewGame | UserAction::Exit => state.clone(),
    }
}

fn enter_word(state: &GameState, word: &str) -> GameState {
    if word.chars().count() != state.word_length()
        || !word.chars().all(|c| c.is_ascii_alphabetic())
    {
        return state.clone();
    }

    let mut next = state.clone();
    while !next.current_guess().is_empty() {
        next = remove_letter(&next);
    }
    for c in word.chars() {
        next = add_letter(&next, c);
    }
    submit_guess(&next)
}

/// Play games from `deck` until the interface asks to exit.
///
/// # Errors
/// Fails only if a game cannot be started, e.g. for an empty deck.
pub fn play_session<I, R>(
    deck: &Deck,
    options: &SessionOptions,
    interface: &mut I,
    rng: &mut R,
) -> Result<SessionStats, GameError>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut stats = SessionStats::default();
    let mut state = new_game(deck, options, rng)?;
    interface.display_new_game(deck, &state);

    loop {
        let Some(action) = interface.read_action(&state) else {
            continue;
        };
        debug_log!("play_session() - action {:?}", action);

        match action {
            UserAction::Exit => {
                stats.record_left(&state);
                interface.display_exit_message(&stats);
                break;
            }
            UserAction::NewGame => {
                stats.record_left(&state);
                state = new_game(deck, options, rng)?;
                interface.display_new_game(deck, &state);
            }
            action => {
                let next = apply_action(&state, &action);
                if next == state {
                    continue;
                }

                let finished = !is_game_complete(&state) && is_game_complete(&next);
                state = next;
                interface.display_state(&state);

                if finished {
                    stats.record(state.status());
                    interface.display_result(&state, &stats);
                }
            }
        }
    }

    Ok(stats)
}
