//! Word list validation and normalization.
//!
//! Used when authoring a deck and when building the list of words a game accepts as
//! guesses. None of these functions fail: every problem found is reported in
//! [`WordValidationResult::errors`], in input order.

use std::collections::HashSet;

pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;
pub const DEFAULT_MAX_WORD_LENGTH: usize = 10;

/// Outcome of validating one word or a list of words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl WordValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    fn invalid(message: &str) -> Self {
        Self::from_errors(vec![message.to_string()])
    }
}

/// Normalized words together with the validation of the raw input they came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedWords {
    pub normalized_words: Vec<String>,
    pub validation: WordValidationResult,
}

/// Counts shown while a word list is being typed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordStats {
    pub total: usize,
    pub unique: usize,
    pub duplicates: usize,
}

#[must_use]
pub fn validate_word(word: &str) -> WordValidationResult {
    if word.is_empty() {
        return WordValidationResult::invalid("Word must be at least 1 character long");
    }

    let mut errors = Vec::new();
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        errors.push("Word must contain letters only (a-z, A-Z)".to_string());
    }
    WordValidationResult::from_errors(errors)
}

#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Trim and lowercase every word, dropping empty entries and repeats.
///
/// The first occurrence of a word wins and input order is preserved.
#[must_use]
pub fn normalize_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .iter()
        .map(|word| normalize_word(word.as_ref()))
        .filter(|word| !word.is_empty())
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// Validate a raw word list.
///
/// Reports empty entries, case-insensitive repeats (from the second occurrence on) and words
/// that fail [`validate_word`]. Positions in messages are 1-based indexes into `words`.
#[must_use]
pub fn validate_words<S: AsRef<str>>(words: &[S]) -> WordValidationResult {
    if words.is_empty() {
        return WordValidationResult::invalid("At least one word is required");
    }

    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, word) in words.iter().enumerate() {
        let position = index + 1;
        let trimmed = word.as_ref().trim();

        if trimmed.is_empty() {
            errors.push(format!("Word {position} is empty"));
            continue;
        }

        if !seen.insert(trimmed.to_lowercase()) {
            errors.push(format!("Word {position} \"{trimmed}\" is a duplicate"));
            continue;
        }

        let validation = validate_word(trimmed);
        if !validation.is_valid {
            errors.push(format!(
                "Word {position} \"{trimmed}\": {}",
                validation.errors.join(", ")
            ));
        }
    }

    WordValidationResult::from_errors(errors)
}

/// Normalize `words` and validate them as they were given.
///
/// Validation runs on the raw list so repeats are still reported even though the
/// normalized list no longer contains them.
#[must_use]
pub fn process_words<S: AsRef<str>>(words: &[S]) -> ParsedWords {
    ParsedWords {
        normalized_words: normalize_words(words),
        validation: validate_words(words),
    }
}

fn split_words(csv: &str) -> Vec<&str> {
    csv.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Parse a comma separated word list.
#[must_use]
pub fn parse_words_string(csv: &str) -> ParsedWords {
    if csv.trim().is_empty() {
        return ParsedWords {
            normalized_words: Vec::new(),
            validation: WordValidationResult::invalid("Please enter words"),
        };
    }

    process_words(&split_words(csv))
}

#[must_use]
pub fn word_stats(csv: &str) -> WordStats {
    let pieces = split_words(csv);
    let total = pieces.len();
    let unique = normalize_words(&pieces).len();
    WordStats {
        total,
        unique,
        duplicates: total - unique,
    }
}

/// [`validate_word`] plus a length window, both ends inclusive.
#[must_use]
pub fn validate_word_for_game(
    word: &str,
    min_length: usize,
    max_length: usize,
) -> WordValidationResult {
    let basic = validate_word(word);
    if !basic.is_valid {
        return basic;
    }

    let mut errors = Vec::new();
    let length = word.chars().count();
    if length < min_length {
        errors.push(format!("Word must be at least {min_length} letters long"));
    }
    if length > max_length {
        errors.push(format!("Word must be at most {max_length} letters long"));
    }
    WordValidationResult::from_errors(errors)
}

/// [`validate_words`] plus [`validate_word_for_game`] on every entry.
///
/// Length problems are only checked once the list passes basic validation.
#[must_use]
pub fn validate_words_for_game<S: AsRef<str>>(
    words: &[S],
    min_length: usize,
    max_length: usize,
) -> WordValidationResult {
    let basic = validate_words(words);
    if !basic.is_valid {
        return basic;
    }

    let errors = words
        .iter()
        .enumerate()
        .filter_map(|(index, word)| {
            let word = word.as_ref().trim();
            let validation = validate_word_for_game(word, min_length, max_length);
            (!validation.is_valid).then(|| {
                format!(
                    "Word {} \"{word}\": {}",
                    index + 1,
                    validation.errors.join(", ")
                )
            })
        })
        .collect();

    WordValidationResult::from_errors(errors)
}
