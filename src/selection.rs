//! Target word selection.

use crate::error::GameError;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick a word uniformly at random using the thread-local RNG.
///
/// # Errors
/// [`GameError::EmptyInput`] when `words` is empty.
pub fn select_random_word<S: AsRef<str>>(words: &[S]) -> Result<&str, GameError> {
    select_random_word_with_rng(words, &mut rand::rng())
}

/// Pick a word using a specific RNG (for testing/seeding).
///
/// # Errors
/// [`GameError::EmptyInput`] when `words` is empty.
pub fn select_random_word_with_rng<'a, S, R>(
    words: &'a [S],
    rng: &mut R,
) -> Result<&'a str, GameError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    words
        .choose(rng)
        .map(AsRef::as_ref)
        .ok_or(GameError::EmptyInput)
}
