// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::cell::RefCell;

use gamenight_domain::{Match, MatchId, ProfileId, RatingScope, ScopeKind, Standing};
use gamenight_persistence::{PersistenceError, SqlitePersistence};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    Action, AuthenticatedActor, CacheError, CacheInvalidator, MatchStore, RatingStore, Role,
    resolve_actor,
};

pub const MATCH_START: OffsetDateTime = datetime!(2026-03-14 18:00 UTC);
pub const MATCH_END: OffsetDateTime = datetime!(2026-03-14 21:00 UTC);

/// A database holding one scheduled match with no participants.
pub struct Fixture {
    pub persistence: SqlitePersistence,
    pub match_id: MatchId,
    pub game_id: i64,
    pub place_id: i64,
}

impl Fixture {
    pub fn load_match(&mut self) -> Match {
        self.persistence
            .get_match(self.match_id)
            .expect("Failed to load match")
    }

    pub fn game_scope(&self) -> RatingScope {
        RatingScope::game(self.game_id)
    }

    pub fn place_scope(&self) -> RatingScope {
        RatingScope::place(self.place_id)
    }

    /// Creates a profile and resolves it through the persistence layer.
    pub fn create_actor(&mut self, name: &str, role: Role) -> AuthenticatedActor {
        let profile_id = self
            .persistence
            .create_profile(name, role.as_str())
            .expect("Failed to create profile");
        resolve_actor(&mut self.persistence, ProfileId::new(profile_id))
            .expect("Failed to resolve actor")
    }

    /// Creates a manager holding `update_match_stats` on one place or game.
    pub fn create_manager(
        &mut self,
        name: &str,
        scope_kind: ScopeKind,
        scope_id: i64,
    ) -> AuthenticatedActor {
        let role = match scope_kind {
            ScopeKind::Place => Role::PlaceManager,
            ScopeKind::Game => Role::GameManager,
        };
        let profile_id = self
            .persistence
            .create_profile(name, role.as_str())
            .expect("Failed to create profile");
        self.persistence
            .grant_permission(
                profile_id,
                Action::UpdateMatchStats.as_str(),
                scope_kind,
                scope_id,
            )
            .expect("Failed to grant permission");
        resolve_actor(&mut self.persistence, ProfileId::new(profile_id))
            .expect("Failed to resolve actor")
    }

    pub fn create_player(&mut self, name: &str) -> ProfileId {
        self.create_actor(name, Role::User).profile_id
    }

    pub fn join(&mut self, profile_id: ProfileId, confirmed: bool) {
        self.persistence
            .add_participant(self.match_id, profile_id, 0.0, confirmed)
            .expect("Failed to add participant");
    }

    pub fn rating(&mut self, scope: RatingScope, profile_id: ProfileId) -> i32 {
        self.persistence
            .get_rating(scope, profile_id)
            .expect("Failed to read rating")
    }
}

pub fn setup_fixture() -> Fixture {
    let mut persistence = SqlitePersistence::new_in_memory().expect("Failed to open database");
    let game_id = persistence
        .create_game("Azul")
        .expect("Failed to create game");
    let place_id = persistence
        .create_place("Corner Table Cafe")
        .expect("Failed to create place");
    let match_id = persistence
        .create_match(game_id, place_id, MATCH_START, MATCH_END)
        .expect("Failed to create match");

    Fixture {
        persistence,
        match_id,
        game_id,
        place_id,
    }
}

pub const fn standing(profile_id: ProfileId, points: f64) -> Standing {
    Standing { profile_id, points }
}

/// Records every invalidation it receives.
#[derive(Default)]
pub struct RecordingCache {
    pub invalidated: RefCell<Vec<MatchId>>,
}

impl RecordingCache {
    pub fn count(&self) -> usize {
        self.invalidated.borrow().len()
    }
}

impl CacheInvalidator for RecordingCache {
    fn invalidate_match(&self, match_id: MatchId) -> Result<(), CacheError> {
        self.invalidated.borrow_mut().push(match_id);
        Ok(())
    }
}

/// A cache that is always unreachable.
pub struct FailingCache;

impl CacheInvalidator for FailingCache {
    fn invalidate_match(&self, _match_id: MatchId) -> Result<(), CacheError> {
        Err(CacheError(String::from("connection refused")))
    }
}

fn disk_error() -> PersistenceError {
    PersistenceError::DatabaseError(String::from("disk I/O error"))
}

/// Delegates to a real database but fails every rating write.
pub struct RatingWriteFailingStore<'a> {
    pub inner: &'a mut SqlitePersistence,
}

impl RatingStore for RatingWriteFailingStore<'_> {
    fn get_rating(
        &mut self,
        scope: RatingScope,
        profile_id: ProfileId,
    ) -> Result<i32, PersistenceError> {
        self.inner.get_rating(scope, profile_id)
    }

    fn upsert_rating(
        &mut self,
        _scope: RatingScope,
        _profile_id: ProfileId,
        _rating: i32,
    ) -> Result<(), PersistenceError> {
        Err(disk_error())
    }
}

impl MatchStore for RatingWriteFailingStore<'_> {
    fn get_match(&mut self, match_id: MatchId) -> Result<Match, PersistenceError> {
        self.inner.get_match(match_id)
    }

    fn set_match_winner(
        &mut self,
        match_id: MatchId,
        winner: ProfileId,
    ) -> Result<(), PersistenceError> {
        self.inner.set_match_winner(match_id, winner)
    }

    fn add_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
        confirmed: bool,
    ) -> Result<(), PersistenceError> {
        self.inner
            .add_participant(match_id, profile_id, 0.0, confirmed)
    }

    fn confirm_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
    ) -> Result<(), PersistenceError> {
        self.inner.confirm_participant(match_id, profile_id)
    }

    fn remove_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
    ) -> Result<(), PersistenceError> {
        self.inner.remove_participant(match_id, profile_id)
    }
}

/// A store whose every call fails.
pub struct UnavailableStore;

impl RatingStore for UnavailableStore {
    fn get_rating(&mut self, _: RatingScope, _: ProfileId) -> Result<i32, PersistenceError> {
        Err(disk_error())
    }

    fn upsert_rating(
        &mut self,
        _: RatingScope,
        _: ProfileId,
        _: i32,
    ) -> Result<(), PersistenceError> {
        Err(disk_error())
    }
}

impl MatchStore for UnavailableStore {
    fn get_match(&mut self, _: MatchId) -> Result<Match, PersistenceError> {
        Err(disk_error())
    }

    fn set_match_winner(&mut self, _: MatchId, _: ProfileId) -> Result<(), PersistenceError> {
        Err(disk_error())
    }

    fn add_participant(
        &mut self,
        _: MatchId,
        _: ProfileId,
        _: bool,
    ) -> Result<(), PersistenceError> {
        Err(disk_error())
    }

    fn confirm_participant(&mut self, _: MatchId, _: ProfileId) -> Result<(), PersistenceError> {
        Err(disk_error())
    }

    fn remove_participant(&mut self, _: MatchId, _: ProfileId) -> Result<(), PersistenceError> {
        Err(disk_error())
    }
}
