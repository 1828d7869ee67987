// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use gamenight_domain::{Match, MatchId, ProfileId};

use super::{
    TestMatch, create_test_end, create_test_match, create_test_profile, create_test_start,
};
use crate::{PersistenceError, SqlitePersistence};

#[test]
fn test_created_match_round_trips() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let test_match: TestMatch = create_test_match(&mut persistence);

    let loaded: Match = persistence.get_match(test_match.match_id).unwrap();

    assert_eq!(loaded.match_id, test_match.match_id);
    assert_eq!(loaded.game_id, test_match.game_id);
    assert_eq!(loaded.place_id, test_match.place_id);
    assert_eq!(loaded.start_at, create_test_start());
    assert_eq!(loaded.end_at, create_test_end());
    assert!(loaded.winner_profile_id.is_none());
    assert!(loaded.participants.is_empty());
}

#[test]
fn test_get_missing_match_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let result = persistence.get_match(MatchId::new(77));
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_match_requires_existing_game_and_place() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let result = persistence.create_match(1, 1, create_test_start(), create_test_end());
    assert!(result.is_err());
}

#[test]
fn test_participants_keep_insertion_order() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let test_match = create_test_match(&mut persistence);
    let carol = create_test_profile(&mut persistence, "Carol");
    let alice = create_test_profile(&mut persistence, "Alice");
    let bob = create_test_profile(&mut persistence, "Bob");

    persistence
        .add_participant(test_match.match_id, carol, 12.5, true)
        .unwrap();
    persistence
        .add_participant(test_match.match_id, alice, 30.0, false)
        .unwrap();
    persistence
        .add_participant(test_match.match_id, bob, 0.0, false)
        .unwrap();

    let loaded = persistence.get_match(test_match.match_id).unwrap();
    let order: Vec<ProfileId> = loaded.participants.iter().map(|p| p.profile_id).collect();

    assert_eq!(order, vec![carol, alice, bob]);
    assert!((loaded.participants[0].points - 12.5).abs() < f64::EPSILON);
    assert!(loaded.participants[0].confirmed);
    assert!(!loaded.participants[1].confirmed);
}

#[test]
fn test_duplicate_participant_is_rejected() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let test_match = create_test_match(&mut persistence);
    let alice = create_test_profile(&mut persistence, "Alice");

    persistence
        .add_participant(test_match.match_id, alice, 0.0, false)
        .unwrap();
    let result = persistence.add_participant(test_match.match_id, alice, 0.0, true);

    assert!(result.is_err());
}

#[test]
fn test_set_winner_overwrites_previous_winner() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let test_match = create_test_match(&mut persistence);
    let alice = create_test_profile(&mut persistence, "Alice");
    let bob = create_test_profile(&mut persistence, "Bob");

    persistence
        .set_match_winner(test_match.match_id, alice)
        .unwrap();
    persistence.set_match_winner(test_match.match_id, bob).unwrap();

    let loaded = persistence.get_match(test_match.match_id).unwrap();
    assert_eq!(loaded.winner_profile_id, Some(bob));
}

#[test]
fn test_set_winner_on_missing_match_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let alice = create_test_profile(&mut persistence, "Alice");

    let result = persistence.set_match_winner(MatchId::new(5), alice);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_set_winner_to_unknown_profile_fails() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let test_match = create_test_match(&mut persistence);

    let result = persistence.set_match_winner(test_match.match_id, ProfileId::new(404));

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}

#[test]
fn test_confirm_participant() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let test_match = create_test_match(&mut persistence);
    let alice = create_test_profile(&mut persistence, "Alice");
    persistence
        .add_participant(test_match.match_id, alice, 0.0, false)
        .unwrap();

    persistence
        .confirm_participant(test_match.match_id, alice)
        .unwrap();

    let loaded = persistence.get_match(test_match.match_id).unwrap();
    assert!(loaded.is_confirmed_participant(alice));
}

#[test]
fn test_confirm_or_remove_non_participant_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let test_match = create_test_match(&mut persistence);
    let alice = create_test_profile(&mut persistence, "Alice");

    let confirm = persistence.confirm_participant(test_match.match_id, alice);
    let remove = persistence.remove_participant(test_match.match_id, alice);

    assert!(matches!(confirm, Err(PersistenceError::NotFound(_))));
    assert!(matches!(remove, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_remove_participant() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let test_match = create_test_match(&mut persistence);
    let alice = create_test_profile(&mut persistence, "Alice");
    let bob = create_test_profile(&mut persistence, "Bob");
    persistence
        .add_participant(test_match.match_id, alice, 0.0, true)
        .unwrap();
    persistence
        .add_participant(test_match.match_id, bob, 0.0, true)
        .unwrap();

    persistence
        .remove_participant(test_match.match_id, alice)
        .unwrap();

    let loaded = persistence.get_match(test_match.match_id).unwrap();
    assert!(!loaded.has_participant(alice));
    assert!(loaded.has_participant(bob));
}
