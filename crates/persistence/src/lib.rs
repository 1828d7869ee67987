// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Gamenight.
//!
//! Stores profiles, permission grants, places, games, matches with their
//! participants, and per-scope ratings in `SQLite` through Diesel.
//!
//! ## Storage
//!
//! - In-memory databases (`new_in_memory`) back unit and integration tests.
//! - File databases (`new_with_file`) run in WAL mode.
//!
//! Every connection enables foreign key enforcement and applies the embedded
//! migrations before it is handed out.
//!
//! ## Timestamps
//!
//! Match windows are stored as RFC 3339 text and parsed back into
//! `time::OffsetDateTime` on read.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use gamenight_domain::{Match, MatchId, ProfileId, RatingRecord, RatingScope, ScopeKind};
use std::path::Path;
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{GrantData, ProfileData};
pub use error::PersistenceError;

/// Type alias used by the api and server crates.
pub type SqlitePersistence = Persistence;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with a private in-memory database.
    ///
    /// Each call opens its own connection, so instances never share data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(":memory:")?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Profiles & Grants
    // ========================================================================

    /// Creates a profile and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the role string is not accepted or the insert fails.
    pub fn create_profile(
        &mut self,
        display_name: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_profile(&mut self.conn, display_name, role)
    }

    /// Grants `action` on one place or game to a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or the grant is a duplicate.
    pub fn grant_permission(
        &mut self,
        profile_id: i64,
        action: &str,
        scope_kind: ScopeKind,
        scope_id: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::grant_permission(&mut self.conn, profile_id, action, scope_kind, scope_id)
    }

    /// Retrieves a profile by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if not found.
    pub fn get_profile(
        &mut self,
        profile_id: i64,
    ) -> Result<Option<ProfileData>, PersistenceError> {
        queries::get_profile(&mut self.conn, profile_id)
    }

    /// Lists the permission grants held by a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_grants(&mut self, profile_id: i64) -> Result<Vec<GrantData>, PersistenceError> {
        queries::list_grants(&mut self.conn, profile_id)
    }

    // ========================================================================
    // Places, Games & Matches
    // ========================================================================

    /// Creates a place and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_place(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::create_place(&mut self.conn, name)
    }

    /// Creates a game and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_game(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::create_game(&mut self.conn, name)
    }

    /// Schedules a match.
    ///
    /// # Errors
    ///
    /// Returns an error if the game or place does not exist.
    pub fn create_match(
        &mut self,
        game_id: i64,
        place_id: i64,
        start_at: OffsetDateTime,
        end_at: OffsetDateTime,
    ) -> Result<MatchId, PersistenceError> {
        mutations::create_match(&mut self.conn, game_id, place_id, start_at, end_at)
    }

    /// Loads a match with its participants in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the match does not exist.
    pub fn get_match(&mut self, match_id: MatchId) -> Result<Match, PersistenceError> {
        queries::get_match(&mut self.conn, match_id)
    }

    /// Records the winner of a match.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the match does not exist.
    pub fn set_match_winner(
        &mut self,
        match_id: MatchId,
        winner: ProfileId,
    ) -> Result<(), PersistenceError> {
        mutations::set_match_winner(&mut self.conn, match_id, winner)
    }

    /// Adds a participant to a match.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile already participates or does not exist.
    pub fn add_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
        points: f64,
        confirmed: bool,
    ) -> Result<(), PersistenceError> {
        mutations::add_participant(&mut self.conn, match_id, profile_id, points, confirmed)
    }

    /// Marks a participant as confirmed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the profile is not a participant.
    pub fn confirm_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
    ) -> Result<(), PersistenceError> {
        mutations::confirm_participant(&mut self.conn, match_id, profile_id)
    }

    /// Removes a participant from a match.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the profile is not a participant.
    pub fn remove_participant(
        &mut self,
        match_id: MatchId,
        profile_id: ProfileId,
    ) -> Result<(), PersistenceError> {
        mutations::remove_participant(&mut self.conn, match_id, profile_id)
    }

    // ========================================================================
    // Ratings
    // ========================================================================

    /// Returns a profile's rating in a scope, or zero if it has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_rating(
        &mut self,
        scope: RatingScope,
        profile_id: ProfileId,
    ) -> Result<i32, PersistenceError> {
        queries::get_rating(&mut self.conn, scope, profile_id)
    }

    /// Sets a profile's rating in a scope, creating the record if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_rating(
        &mut self,
        scope: RatingScope,
        profile_id: ProfileId,
        rating: i32,
    ) -> Result<(), PersistenceError> {
        mutations::upsert_rating(&mut self.conn, scope, profile_id, rating)
    }

    /// Lists every rating record in a scope, best first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_ratings(
        &mut self,
        scope: RatingScope,
    ) -> Result<Vec<RatingRecord>, PersistenceError> {
        queries::list_ratings(&mut self.conn, scope)
    }
}
