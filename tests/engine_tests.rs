//! Engine command tests.
//!
//! These tests verify the flip/match rules and terminal behavior:
//! - Start resets everything
//! - Matches score synchronously
//! - Ignored flips change nothing
//! - Winning ends the game and freezes state

use std::time::Duration;

use memory_match::{
    Difficulty, EngineConfig, EngineError, FlipOutcome, Game, GameEvent, IgnoreReason,
    ManualClock, Priority, SessionState,
};
use proptest::prelude::*;

fn new_game(config: EngineConfig, difficulty: Difficulty) -> Game<ManualClock> {
    let mut game = Game::with_clock(config, ManualClock::new()).unwrap();
    game.start_game(difficulty);
    game
}

/// Pairs of indices that match, filler excluded.
fn matching_pairs(game: &Game<ManualClock>) -> Vec<(usize, usize)> {
    let cards = game.cards();
    let mut open: Vec<usize> = Vec::new();
    let mut pairs = Vec::new();

    for i in 0..cards.len() {
        if cards[i].is_filler() {
            continue;
        }
        match open.iter().position(|&j| cards[j].matches(&cards[i])) {
            Some(pos) => pairs.push((open.remove(pos), i)),
            None => open.push(i),
        }
    }
    pairs
}

fn mismatching_pair(game: &Game<ManualClock>) -> (usize, usize) {
    let cards = game.cards();
    for i in 0..cards.len() {
        for j in i + 1..cards.len() {
            if !cards[i].matches(&cards[j]) {
                return (i, j);
            }
        }
    }
    panic!("deck has no mismatching pair");
}

fn win(game: &mut Game<ManualClock>) {
    for (a, b) in matching_pairs(game) {
        game.flip_card(a).unwrap();
        game.flip_card(b).unwrap();
    }
}

// =============================================================================
// Start
// =============================================================================

/// Easy start: 9 cards, 60 seconds, nothing showing.
#[test]
fn test_start_easy() {
    let game = new_game(EngineConfig::new().with_seed(1), Difficulty::Easy);

    assert_eq!(game.cards().len(), 9);
    assert_eq!(game.time_remaining(), 60);
    assert_eq!(game.score(), 0);
    assert!(!game.game_over());
    assert!(!game.game_won());
    assert_eq!(game.first_selected(), None);
    assert!(game.cards().iter().all(|c| !c.face_up && !c.matched));
}

/// Restart after a win resets score and flags.
#[test]
fn test_restart_after_win() {
    let mut game = new_game(EngineConfig::new().with_seed(2), Difficulty::Easy);
    win(&mut game);
    assert!(game.game_won());

    game.start_game(Difficulty::Medium);
    assert_eq!(game.state(), SessionState::Active);
    assert_eq!(game.score(), 0);
    assert!(!game.game_over());
    assert!(!game.game_won());
    assert_eq!(game.cards().len(), 25);
    assert_eq!(game.time_remaining(), 120);
    assert_eq!(game.session(), 2);
    assert!(game.countdown_running());
}

/// Restart after a timeout resets score and flags.
#[test]
fn test_restart_after_timeout() {
    let mut game = new_game(EngineConfig::new().with_seed(2), Difficulty::Easy);
    game.advance(Duration::from_secs(60));
    assert!(game.game_over());

    game.start_game(Difficulty::Easy);
    assert!(!game.game_over());
    assert!(!game.game_won());
    assert_eq!(game.time_remaining(), 60);
}

/// Start announces the difficulty.
#[test]
fn test_start_event() {
    let mut game = new_game(EngineConfig::new().with_seed(3), Difficulty::Hard);
    let events = game.drain_events();

    assert_eq!(
        events,
        vec![GameEvent::GameStarted {
            difficulty: Difficulty::Hard
        }]
    );
    assert_eq!(
        events[0].message(),
        "Game started. Hard level. 7 by 7 grid with 24 pairs to match in 180 seconds"
    );
}

// =============================================================================
// Flips and matches
// =============================================================================

/// Two equal colors match synchronously and score exactly one.
#[test]
fn test_match_scores_once() {
    let mut game = new_game(EngineConfig::new().with_seed(4), Difficulty::Easy);
    let (a, b) = matching_pairs(&game)[0];
    game.drain_events();

    assert_eq!(game.flip_card(a).unwrap(), FlipOutcome::Selected);
    assert_eq!(game.flip_card(b).unwrap(), FlipOutcome::Matched { score: 1 });

    assert_eq!(game.score(), 1);
    assert!(game.cards()[a].matched);
    assert!(game.cards()[b].matched);
    assert_eq!(game.first_selected(), None);

    let events = game.drain_events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], GameEvent::CardRevealed { index, .. } if index == a));
    assert!(matches!(events[1], GameEvent::CardRevealed { index, .. } if index == b));
    assert!(matches!(events[2], GameEvent::MatchFound { score: 1, .. }));
}

/// Score always equals matched cards over two.
#[test]
fn test_score_tracks_matched_cards() {
    let mut game = new_game(EngineConfig::new().with_seed(5), Difficulty::Medium);

    for (a, b) in matching_pairs(&game).into_iter().take(5) {
        game.flip_card(a).unwrap();
        game.flip_card(b).unwrap();
        let matched = game.cards().iter().filter(|c| c.matched).count();
        assert_eq!(game.score(), matched / 2);
    }
    assert_eq!(game.score(), 5);
}

/// Matched cards are always face-up.
#[test]
fn test_matched_cards_face_up() {
    let mut game = new_game(EngineConfig::new().with_seed(6), Difficulty::Easy);
    win(&mut game);
    assert!(game.cards().iter().filter(|c| c.matched).all(|c| c.face_up));
}

/// Cards that pair by color also show the same pattern, on every preset.
#[test]
fn test_color_and_pattern_agree() {
    for (seed, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        let mut game = new_game(EngineConfig::new().with_seed(seed as u64), difficulty);
        let pairs = matching_pairs(&game);
        assert_eq!(pairs.len(), difficulty.number_of_pairs());

        for &(a, b) in &pairs {
            let (first, second) = (game.cards()[a].clone(), game.cards()[b].clone());
            assert_eq!(first.pattern, second.pattern);

            game.flip_card(a).unwrap();
            game.flip_card(b).unwrap();
            assert!(game.cards()[a].matched && game.cards()[b].matched);

            let announced = game
                .drain_events()
                .into_iter()
                .find_map(|e| match e {
                    GameEvent::MatchFound { pattern, .. } => Some(pattern),
                    _ => None,
                })
                .unwrap();
            assert_eq!(announced, second.pattern);
        }
        assert!(game.game_won());
    }
}

/// Two cards of the same pattern but different colors never pair.
#[test]
fn test_same_pattern_different_color_mismatches() {
    // Pairs 0, 10 and 20 all carry a circle on Hard
    let mut game = new_game(EngineConfig::new().with_seed(1), Difficulty::Hard);
    let cards = game.cards().clone();
    let (a, b) = (0..cards.len())
        .flat_map(|i| (i + 1..cards.len()).map(move |j| (i, j)))
        .find(|&(i, j)| cards[i].pattern == cards[j].pattern && cards[i].color != cards[j].color)
        .unwrap();

    game.flip_card(a).unwrap();
    assert_eq!(game.flip_card(b).unwrap(), FlipOutcome::Mismatched);
    assert_eq!(game.score(), 0);
}

/// Out-of-range indices are rejected, not ignored.
#[test]
fn test_out_of_range() {
    let mut game = new_game(EngineConfig::new().with_seed(9), Difficulty::Easy);
    assert_eq!(
        game.flip_card(9),
        Err(EngineError::IndexOutOfRange { index: 9, len: 9 })
    );
    assert!(game.cards().iter().all(|c| !c.face_up));
}

/// Flipping a card that is already showing does nothing.
#[test]
fn test_flip_face_up_ignored() {
    let mut game = new_game(EngineConfig::new().with_seed(10), Difficulty::Easy);
    game.flip_card(0).unwrap();
    game.drain_events();
    let before = game.snapshot();

    assert_eq!(
        game.flip_card(0).unwrap(),
        FlipOutcome::Ignored(IgnoreReason::AlreadyFaceUp)
    );
    assert_eq!(game.snapshot(), before);
    assert!(game.drain_events().is_empty());
}

/// Flipping a matched card does nothing.
#[test]
fn test_flip_matched_ignored() {
    let mut game = new_game(EngineConfig::new().with_seed(11), Difficulty::Medium);
    let (a, b) = matching_pairs(&game)[0];
    game.flip_card(a).unwrap();
    game.flip_card(b).unwrap();
    let before = game.snapshot();

    assert_eq!(
        game.flip_card(a).unwrap(),
        FlipOutcome::Ignored(IgnoreReason::AlreadyMatched)
    );
    assert_eq!(game.snapshot(), before);
}

/// The filler card can be revealed but never matches.
#[test]
fn test_filler_never_scores() {
    let mut game = new_game(EngineConfig::new().with_seed(12), Difficulty::Easy);
    let filler = game.cards().iter().position(|c| c.is_filler()).unwrap();
    let other = (0..9).find(|&i| i != filler).unwrap();

    assert_eq!(game.flip_card(filler).unwrap(), FlipOutcome::Selected);
    assert_eq!(game.flip_card(other).unwrap(), FlipOutcome::Mismatched);
    assert_eq!(game.score(), 0);
}

// =============================================================================
// Winning
// =============================================================================

/// Matching every pair wins immediately.
#[test]
fn test_win_easy() {
    let mut game = new_game(EngineConfig::new().with_seed(13), Difficulty::Easy);
    let pairs = matching_pairs(&game);
    assert_eq!(pairs.len(), 4);

    for (n, &(a, b)) in pairs.iter().enumerate() {
        game.flip_card(a).unwrap();
        let outcome = game.flip_card(b).unwrap();
        if n + 1 < pairs.len() {
            assert_eq!(outcome, FlipOutcome::Matched { score: n + 1 });
        } else {
            assert_eq!(outcome, FlipOutcome::Won);
        }
    }

    assert_eq!(game.score(), 4);
    assert!(game.game_over());
    assert!(game.game_won());
    assert_eq!(game.state(), SessionState::Won);
    assert!(!game.countdown_running());
}

/// Winning on hard pairs all 24 colors.
#[test]
fn test_win_hard() {
    let mut game = new_game(EngineConfig::new().with_seed(14), Difficulty::Hard);
    win(&mut game);
    assert_eq!(game.score(), 24);
    assert!(game.game_won());
}

/// The win announcement reports the time left.
#[test]
fn test_win_event() {
    let mut game = new_game(EngineConfig::new().with_seed(15), Difficulty::Easy);
    game.advance(Duration::from_secs(12));
    win(&mut game);

    let events = game.drain_events();
    let last = events.last().unwrap();
    assert_eq!(
        *last,
        GameEvent::Won {
            score: 4,
            time_remaining: 48
        }
    );
    assert_eq!(last.priority(), Priority::High);
}

/// After a win the clock stops.
#[test]
fn test_win_freezes_clock() {
    let mut game = new_game(EngineConfig::new().with_seed(16), Difficulty::Easy);
    game.advance(Duration::from_secs(3));
    win(&mut game);

    game.advance(Duration::from_secs(120));
    assert_eq!(game.time_remaining(), 57);
    assert_eq!(game.state(), SessionState::Won);
}

/// After the game ends, flips never change cards, score, or time.
#[test]
fn test_flips_after_game_over_ignored() {
    let mut game = new_game(EngineConfig::new().with_seed(17), Difficulty::Easy);
    game.advance(Duration::from_secs(60));
    assert!(game.game_over());
    let before = game.snapshot();

    for i in 0..9 {
        let outcome = game.flip_card(i).unwrap();
        assert!(outcome.is_ignored());
    }
    assert_eq!(game.snapshot(), before);
}

// =============================================================================
// Status
// =============================================================================

/// The summary splits time into minutes and seconds.
#[test]
fn test_status_summary() {
    let mut game = new_game(EngineConfig::new().with_seed(18), Difficulty::Hard);
    let (a, b) = matching_pairs(&game)[0];
    game.flip_card(a).unwrap();
    game.flip_card(b).unwrap();
    game.advance(Duration::from_secs(45));

    let summary = game.status_summary();
    assert_eq!(summary.score, 1);
    assert_eq!(summary.total_pairs, 24);
    assert_eq!(summary.remaining_pairs, 23);
    assert_eq!((summary.minutes, summary.seconds), (2, 15));
    assert_eq!(
        summary.to_string(),
        "Score: 1 out of 24 pairs matched. 23 pairs remaining. Time: 2 minutes and 15 seconds"
    );
}

/// Snapshots serialize for external observers.
#[test]
fn test_snapshot_serde() {
    let mut game = new_game(EngineConfig::new().with_seed(19), Difficulty::Easy);
    game.flip_card(2).unwrap();

    let snap = game.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let back: memory_match::GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snap, back);
}

proptest! {
    /// Arbitrary flips after a timeout leave the state untouched.
    #[test]
    fn prop_terminal_state_is_frozen(seed in any::<u64>(), flips in proptest::collection::vec(0usize..9, 0..40)) {
        let mut game = new_game(EngineConfig::new().with_seed(seed), Difficulty::Easy);
        game.advance(Duration::from_secs(60));
        prop_assert!(game.game_over());
        let before = game.snapshot();

        for index in flips {
            let outcome = game.flip_card(index).unwrap();
            prop_assert!(outcome.is_ignored());
            game.advance(Duration::from_millis(700));
        }
        prop_assert_eq!(game.snapshot(), before);
    }

    /// Random play keeps the score and selection invariants.
    #[test]
    fn prop_invariants_hold(seed in any::<u64>(), flips in proptest::collection::vec(0usize..25, 0..80)) {
        let mut game = new_game(EngineConfig::new().with_seed(seed), Difficulty::Medium);

        for index in flips {
            game.flip_card(index).unwrap();
            let matched = game.cards().iter().filter(|c| c.matched).count();
            prop_assert_eq!(game.score(), matched / 2);
            prop_assert!(game.cards().iter().filter(|c| c.matched).all(|c| c.face_up));

            if let Some(first) = game.first_selected() {
                prop_assert!(game.cards()[first].face_up && !game.cards()[first].matched);
                prop_assert_eq!(game.face_up_unmatched().len(), 1);
            }
            if game.pending_mismatch().is_none() {
                prop_assert!(game.face_up_unmatched().len() <= 1);
            }
            game.advance(Duration::from_millis(400));
        }
    }
}
