// Integration tests for the wordle-deck library
// These tests verify that all modules work together correctly

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;
use wordle_deck::cli::CliInterface;
use wordle_deck::game::INVALID_WORD_MESSAGE;
use wordle_deck::*;

fn type_word(state: &GameState, word: &str) -> GameState {
    word.chars().fold(state.clone(), |s, c| add_letter(&s, c))
}

fn play(state: &GameState, word: &str) -> GameState {
    submit_guess(&type_word(state, word))
}

#[test]
fn test_end_to_end_cli_session() {
    // Single-word deck so the target is known
    let deck = Deck::parse("fruit", "Fruit", "mango").unwrap();
    let input = "apple\nmang\nmango\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut rng = StdRng::seed_from_u64(9);
    let options = SessionOptions {
        restrict_guesses: false,
        ..SessionOptions::default()
    };

    let stats = play_session(&deck, &options, &mut interface, &mut rng).unwrap();
    assert_eq!(stats.won, 1);
    assert_eq!(stats.lost, 0);
}

#[test]
fn test_cli_session_ends_on_end_of_input() {
    // One guess, then the input runs dry mid-game
    let deck = Deck::parse("d", "Deck", "crane").unwrap();
    let options = SessionOptions {
        restrict_guesses: false,
        ..SessionOptions::default()
    };
    let mut interface = CliInterface::new(Cursor::new("slate\n"));
    let mut rng = StdRng::seed_from_u64(1);

    let stats = play_session(&deck, &options, &mut interface, &mut rng).unwrap();
    assert_eq!(
        stats,
        SessionStats {
            won: 0,
            lost: 0,
            abandoned: 1,
        }
    );
}

#[test]
fn test_cli_session_multiple_games() {
    let deck = Deck::parse("d", "Deck", "crane").unwrap();
    let input = "crane\nnext\ncrane\nnext\nslate\nexit\n";
    let options = SessionOptions {
        restrict_guesses: false,
        ..SessionOptions::default()
    };
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut rng = StdRng::seed_from_u64(1);

    let stats = play_session(&deck, &options, &mut interface, &mut rng).unwrap();
    assert_eq!(stats.won, 2);
    assert_eq!(stats.abandoned, 1);
}

#[test]
fn test_seeded_sessions_pick_the_same_words() {
    let deck = Deck::embedded().unwrap();
    let options = SessionOptions::default();
    let mut rng1 = StdRng::seed_from_u64(2024);
    let mut rng2 = StdRng::seed_from_u64(2024);

    for _ in 0..5 {
        let a = session::new_game(&deck, &options, &mut rng1).unwrap();
        let b = session::new_game(&deck, &options, &mut rng2).unwrap();
        assert_eq!(a.target_word(), b.target_word());
        assert!(deck.words().iter().any(|w| w == a.target_word()));
    }
}

#[test]
fn test_deck_words_restrict_guesses() {
    // validWords gating: unknown word leaves the board alone
    let deck = Deck::new("d", "Deck", &["apple", "mango"]).unwrap();
    let state = initialize("apple", 6, Some(deck.words())).unwrap();

    let typed = type_word(&state, "zzzzz");
    let rejected = submit_guess(&typed);
    assert_eq!(rejected.guesses().len(), 0);
    assert_eq!(rejected.current_guess(), "zzzzz");
    assert_eq!(rejected.error_message(), Some(INVALID_WORD_MESSAGE));

    // Clear the row and try a real word
    let cleared = (0..5).fold(rejected, |s, _| remove_letter(&s));
    let state = play(&cleared, "mango");
    assert_eq!(state.guesses().len(), 1);
    assert!(state.error_message().is_none());
    assert_eq!(state.status(), GameStatus::Playing);
}

#[test]
fn test_full_game_win() {
    let state = initialize("Crane", 6, None::<&[&str]>).unwrap();
    assert_eq!(state.target_word(), "crane");

    let state = play(&state, "slate");
    assert_eq!(state.guesses()[0].pattern(), "XXGXG");

    let state = play(&state, "trace");
    assert_eq!(state.guesses()[1].pattern(), "XGGYG");
    assert_eq!(state.status(), GameStatus::Playing);

    let state = play(&state, "crane");
    assert_eq!(state.guesses()[2].pattern(), "GGGGG");
    assert_eq!(state.status(), GameStatus::Won);
    assert!(is_game_complete(&state));

    // Nothing moves after the game is won
    assert_eq!(add_letter(&state, 'a'), state);
    assert_eq!(remove_letter(&state), state);
    assert_eq!(submit_guess(&state), state);
}

#[test]
fn test_full_game_loss() {
    let mut state = initialize("zebra", 3, None::<&[&str]>).unwrap();
    for word in ["crane", "slate", "pious"] {
        assert_eq!(state.status(), GameStatus::Playing);
        state = play(&state, word);
    }
    assert_eq!(state.status(), GameStatus::Lost);
    assert_eq!(state.guesses().len(), 3);
    assert_eq!(state.remaining_guesses(), 0);
}

#[test]
fn test_keyboard_state_is_monotonic_across_game() {
    let mut state = initialize("apple", 6, None::<&[&str]>).unwrap();
    let mut previous = state.keyboard_state().clone();

    for word in ["pleap", "paper", "appel", "apple"] {
        state = play(&state, word);
        for (key, before) in &previous {
            let now = state.key_state(*key).unwrap();
            assert!(now >= *before, "{key} regressed from {before:?} to {now:?}");
        }
        previous = state.keyboard_state().clone();
    }
    assert_eq!(state.status(), GameStatus::Won);
    assert_eq!(state.key_state('P'), Some(LetterState::Correct));
}

#[test]
fn test_deck_authoring_pipeline() {
    let input = "cat, dog, cat, , fish";
    let parsed = parse_words_string(input);
    assert_eq!(parsed.normalized_words, vec!["cat", "dog", "fish"]);
    assert!(!parsed.validation.is_valid);

    let stats = word_stats(input);
    assert_eq!(stats.duplicates, 1);

    // The same text cannot become a deck until the duplicate is removed
    assert!(matches!(
        Deck::parse("pets", "Pets", input),
        Err(DeckError::InvalidWords { .. })
    ));
    let deck = Deck::parse("pets", "Pets", "cat, dog, fish").unwrap();
    assert!(deck.validate_for_game(3, 10).is_valid);
    assert!(!deck.validate_for_game(4, 10).is_valid);
}

#[test]
fn test_custom_deck_file_to_game() {
    use std::fs::File;
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fruit.txt");
    {
        let mut file = File::create(&path).unwrap();
        writeln!(file, "# my fruit deck").unwrap();
        writeln!(file, "Apple, Grape").unwrap();
        writeln!(file, "lemon").unwrap();
    }

    let deck = load_deck(Some(&path)).unwrap();
    assert_eq!(deck.name(), "fruit");
    assert_eq!(deck.words(), ["apple", "grape", "lemon"]);

    let target = select_random_word(deck.words()).unwrap();
    let state = initialize(target, 6, Some(deck.words())).unwrap();
    let state = play(&state, target);
    assert_eq!(state.status(), GameStatus::Won);
}

#[test]
fn test_round_trip_target_word() {
    for word in ["A", "crane", "ZEBRA", "MiXeDcAsE"] {
        let state = initialize(word, 6, None::<&[&str]>).unwrap();
        assert_eq!(state.target_word(), word.to_lowercase());
    }
}

#[test]
fn test_empty_inputs_fail_loudly() {
    let words: Vec<String> = Vec::new();
    assert_eq!(select_random_word(&words), Err(GameError::EmptyInput));
    assert!(matches!(
        initialize("", 6, None::<&[&str]>),
        Err(GameError::InvalidInput(_))
    ));
}

#[test]
fn test_invalid_word_message_survives_until_next_edit() {
    let state = initialize("mango", 6, Some(&["mango", "apple"][..])).unwrap();
    let rejected = play(&state, "zzzzz");
    assert!(rejected.error_message().is_some());

    // A full row ignores more letters, so the message stays
    let still = add_letter(&rejected, 'a');
    assert_eq!(still, rejected);

    let edited = remove_letter(&rejected);
    assert!(edited.error_message().is_none());
}
