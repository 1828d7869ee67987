// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant confirm/remove and subscribe/unsubscribe tests.

use gamenight_domain::{ProfileId, ScopeKind};

use super::helpers::{RecordingCache, UnavailableStore, setup_fixture};
use crate::{
    ApiError, NoopCache, PARTICIPANT_CONFIRMED, PARTICIPANT_REMOVED, Role, SUBSCRIBED,
    UNSUBSCRIBED, confirm_participant, remove_participant, subscribe_to_match,
    unsubscribe_from_match,
};

// ============================================================================
// Confirm
// ============================================================================

#[test]
fn test_admin_confirms_participant() {
    let mut fixture = setup_fixture();
    let admin = fixture.create_actor("Admin", Role::Admin);
    let alice = fixture.create_player("Alice");
    fixture.join(alice, false);
    let game_match = fixture.load_match();
    let cache = RecordingCache::default();

    let outcome = confirm_participant(
        &mut fixture.persistence,
        &cache,
        &admin,
        &game_match,
        alice,
    )
    .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.message, PARTICIPANT_CONFIRMED);
    assert!(fixture.load_match().is_confirmed_participant(alice));
    assert_eq!(cache.count(), 1);
}

#[test]
fn test_place_manager_with_grant_confirms_participant() {
    let mut fixture = setup_fixture();
    let place_id = fixture.place_id;
    let manager = fixture.create_manager("Manager", ScopeKind::Place, place_id);
    let alice = fixture.create_player("Alice");
    fixture.join(alice, false);
    let game_match = fixture.load_match();

    let outcome = confirm_participant(
        &mut fixture.persistence,
        &NoopCache,
        &manager,
        &game_match,
        alice,
    )
    .unwrap();

    assert!(outcome.success);
}

#[test]
fn test_plain_user_cannot_confirm_and_nothing_changes() {
    let mut fixture = setup_fixture();
    let outsider = fixture.create_actor("Outsider", Role::User);
    let alice = fixture.create_player("Alice");
    fixture.join(alice, false);
    let game_match = fixture.load_match();
    let cache = RecordingCache::default();

    let outcome = confirm_participant(
        &mut fixture.persistence,
        &cache,
        &outsider,
        &game_match,
        alice,
    )
    .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.message, "insufficient permissions");
    assert!(!fixture.load_match().is_confirmed_participant(alice));
    assert_eq!(cache.count(), 0);
}

#[test]
fn test_unconfirmed_participant_cannot_confirm_self() {
    let mut fixture = setup_fixture();
    let alice = fixture.create_actor("Alice", Role::User);
    fixture.join(alice.profile_id, false);
    let game_match = fixture.load_match();

    let outcome = confirm_participant(
        &mut fixture.persistence,
        &NoopCache,
        &alice,
        &game_match,
        alice.profile_id,
    )
    .unwrap();

    assert!(!outcome.success);
}

#[test]
fn test_confirmed_participant_confirms_another() {
    let mut fixture = setup_fixture();
    let alice = fixture.create_actor("Alice", Role::User);
    let bob = fixture.create_player("Bob");
    fixture.join(alice.profile_id, true);
    fixture.join(bob, false);
    let game_match = fixture.load_match();

    let outcome = confirm_participant(
        &mut fixture.persistence,
        &NoopCache,
        &alice,
        &game_match,
        bob,
    )
    .unwrap();

    assert!(outcome.success);
    assert!(fixture.load_match().is_confirmed_participant(bob));
}

#[test]
fn test_confirm_non_participant_is_not_found() {
    let mut fixture = setup_fixture();
    let admin = fixture.create_actor("Admin", Role::Admin);
    let alice = fixture.create_player("Alice");
    let game_match = fixture.load_match();

    let result = confirm_participant(
        &mut fixture.persistence,
        &NoopCache,
        &admin,
        &game_match,
        alice,
    );

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

// ============================================================================
// Remove
// ============================================================================

#[test]
fn test_admin_removes_participant() {
    let mut fixture = setup_fixture();
    let admin = fixture.create_actor("Admin", Role::Admin);
    let alice = fixture.create_player("Alice");
    let bob = fixture.create_player("Bob");
    fixture.join(alice, true);
    fixture.join(bob, false);
    let game_match = fixture.load_match();
    let cache = RecordingCache::default();

    let outcome = remove_participant(
        &mut fixture.persistence,
        &cache,
        &admin,
        &game_match,
        alice,
    )
    .unwrap();

    assert_eq!(outcome.message, PARTICIPANT_REMOVED);
    let reloaded = fixture.load_match();
    assert!(!reloaded.has_participant(alice));
    assert!(reloaded.has_participant(bob));
    assert_eq!(cache.count(), 1);
}

#[test]
fn test_place_manager_for_other_place_cannot_remove() {
    let mut fixture = setup_fixture();
    let other_place = fixture.persistence.create_place("Elsewhere").unwrap();
    let manager = fixture.create_manager("Manager", ScopeKind::Place, other_place);
    let alice = fixture.create_player("Alice");
    fixture.join(alice, true);
    let game_match = fixture.load_match();

    let outcome = remove_participant(
        &mut fixture.persistence,
        &NoopCache,
        &manager,
        &game_match,
        alice,
    )
    .unwrap();

    assert!(!outcome.success);
    assert!(fixture.load_match().has_participant(alice));
}

#[test]
fn test_remove_non_participant_is_not_found() {
    let mut fixture = setup_fixture();
    let admin = fixture.create_actor("Admin", Role::Admin);
    let game_match = fixture.load_match();

    let result = remove_participant(
        &mut fixture.persistence,
        &NoopCache,
        &admin,
        &game_match,
        ProfileId::new(12),
    );

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_remove_on_unavailable_store_is_a_store_failure() {
    let mut fixture = setup_fixture();
    let admin = fixture.create_actor("Admin", Role::Admin);
    let game_match = fixture.load_match();

    let result = remove_participant(
        &mut UnavailableStore,
        &NoopCache,
        &admin,
        &game_match,
        admin.profile_id,
    );

    assert!(matches!(result, Err(ApiError::StoreFailure { .. })));
}

// ============================================================================
// Subscribe / Unsubscribe
// ============================================================================

#[test]
fn test_subscribe_adds_self_unconfirmed() {
    let mut fixture = setup_fixture();
    let alice = fixture.create_actor("Alice", Role::User);
    let game_match = fixture.load_match();
    let cache = RecordingCache::default();

    let outcome =
        subscribe_to_match(&mut fixture.persistence, &cache, &alice, &game_match).unwrap();

    assert_eq!(outcome.message, SUBSCRIBED);
    let reloaded = fixture.load_match();
    assert!(reloaded.has_participant(alice.profile_id));
    assert!(!reloaded.is_confirmed_participant(alice.profile_id));
    assert_eq!(cache.count(), 1);
}

#[test]
fn test_subscribe_twice_is_a_no_op() {
    let mut fixture = setup_fixture();
    let alice = fixture.create_actor("Alice", Role::User);
    fixture.join(alice.profile_id, true);
    let game_match = fixture.load_match();
    let cache = RecordingCache::default();

    let outcome =
        subscribe_to_match(&mut fixture.persistence, &cache, &alice, &game_match).unwrap();

    assert!(outcome.success);
    assert_eq!(fixture.load_match().participants.len(), 1);
    assert!(
        fixture
            .load_match()
            .is_confirmed_participant(alice.profile_id),
        "Subscribing again must not reset confirmation"
    );
    assert_eq!(cache.count(), 0);
}

#[test]
fn test_unsubscribe_removes_self_even_when_confirmed() {
    let mut fixture = setup_fixture();
    let alice = fixture.create_actor("Alice", Role::User);
    fixture.join(alice.profile_id, true);
    let game_match = fixture.load_match();

    let outcome =
        unsubscribe_from_match(&mut fixture.persistence, &NoopCache, &alice, &game_match)
            .unwrap();

    assert_eq!(outcome.message, UNSUBSCRIBED);
    assert!(!fixture.load_match().has_participant(alice.profile_id));
}

#[test]
fn test_unsubscribe_when_not_participant_is_not_found() {
    let mut fixture = setup_fixture();
    let alice = fixture.create_actor("Alice", Role::User);
    let game_match = fixture.load_match();

    let result =
        unsubscribe_from_match(&mut fixture.persistence, &NoopCache, &alice, &game_match);

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}
