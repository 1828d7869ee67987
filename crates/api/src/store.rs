// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator seams used by the workflows.
//!
//! The workflows are generic over these traits so they can run against the
//! `SQLite` persistence layer in production and against a failing store in
//! tests. Errors stay in `PersistenceError` form and are converted to
//! [`crate::ApiError`] by the workflows.

use gamenight_domain::{Match, MatchId, ProfileId, RatingScope};
use gamenight_persistence::{PersistenceError, SqlitePersistence};

/// Reads and writes ratings in one scope.
pub trait RatingStore {
    /// Returns the current rating, or zero if the profile has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_rating(
        &mut self,
        scope: RatingScope,
        profile_id: ProfileId,
    ) -> Result<i32, PersistenceError>;

    /// Sets a rating, creating the record if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn upsert_rating(
        &mut self,
        scope: RatingScope,
        profile_id: ProfileId,
        rating: i32,
    ) -> Result<(), PersistenceError>;
}

/// Reads matches and mutates their winner and participants.
pub trait MatchStore {
    /// Loads a match with its participants.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the match does not exist.
    fn get_match(&mut self, match_id: MatchId) -> Result<Match, PersistenceError>;

    /// Records the winner of a match.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set_match_winner(
        &mut self,
        match_id: MatchId,
        winner: ProfileId,
    ) -> Result<(), PersistenceError>;

    /// Adds a participant row.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn add_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
        confirmed: bool,
    ) -> Result<(), PersistenceError>;

    /// Marks a participant as confirmed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the profile is not a participant.
    fn confirm_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
    ) -> Result<(), PersistenceError>;

    /// Deletes a participant row.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the profile is not a participant.
    fn remove_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
    ) -> Result<(), PersistenceError>;
}

/// Failure to notify a cache. Logged by the workflows, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cache invalidation failed: {0}")]
pub struct CacheError(pub String);

/// Notified after a successful mutation so cached match views refresh.
pub trait CacheInvalidator {
    /// Drops any cached view of a match.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache could not be reached.
    fn invalidate_match(&self, match_id: MatchId) -> Result<(), CacheError>;
}

/// A cache invalidator for callers without a cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl CacheInvalidator for NoopCache {
    fn invalidate_match(&self, _match_id: MatchId) -> Result<(), CacheError> {
        Ok(())
    }
}

impl RatingStore for SqlitePersistence {
    fn get_rating(
        &mut self,
        scope: RatingScope,
        profile_id: ProfileId,
    ) -> Result<i32, PersistenceError> {
        Self::get_rating(self, scope, profile_id)
    }

    fn upsert_rating(
        &mut self,
        scope: RatingScope,
        profile_id: ProfileId,
        rating: i32,
    ) -> Result<(), PersistenceError> {
        Self::upsert_rating(self, scope, profile_id, rating)
    }
}

impl MatchStore for SqlitePersistence {
    fn get_match(&mut self, match_id: MatchId) -> Result<Match, PersistenceError> {
        Self::get_match(self, match_id)
    }

    fn set_match_winner(
        &mut self,
        match_id: MatchId,
        winner: ProfileId,
    ) -> Result<(), PersistenceError> {
        Self::set_match_winner(self, match_id, winner)
    }

    fn add_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
        confirmed: bool,
    ) -> Result<(), PersistenceError> {
        Self::add_participant(self, match_id, profile_id, 0.0, confirmed)
    }

    fn confirm_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
    ) -> Result<(), PersistenceError> {
        Self::confirm_participant(self, match_id, profile_id)
    }

    fn remove_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
    ) -> Result<(), PersistenceError> {
        Self::remove_participant(self, match_id, profile_id)
    }
}
