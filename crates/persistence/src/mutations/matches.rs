// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gamenight_domain::{MatchId, ProfileId};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{games, match_participants, matches, places};
use crate::error::PersistenceError;

/// Creates a place.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_place(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(places::table)
        .values(places::name.eq(name))
        .execute(conn)?;

    let place_id: i64 = get_last_insert_rowid(conn)?;
    info!(place_id, name, "Created place");
    Ok(place_id)
}

/// Creates a game.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_game(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(games::table)
        .values(games::name.eq(name))
        .execute(conn)?;

    let game_id: i64 = get_last_insert_rowid(conn)?;
    info!(game_id, name, "Created game");
    Ok(game_id)
}

/// Schedules a match with no winner and no participants.
///
/// The window is stored as given; `start_at > end_at` is not rejected.
///
/// # Errors
///
/// Returns an error if the game or place does not exist or a timestamp
/// cannot be formatted.
pub fn create_match(
    conn: &mut SqliteConnection,
    game_id: i64,
    place_id: i64,
    start_at: OffsetDateTime,
    end_at: OffsetDateTime,
) -> Result<MatchId, PersistenceError> {
    let start_text: String = start_at.format(&Rfc3339)?;
    let end_text: String = end_at.format(&Rfc3339)?;

    diesel::insert_into(matches::table)
        .values((
            matches::game_id.eq(game_id),
            matches::place_id.eq(place_id),
            matches::start_at.eq(&start_text),
            matches::end_at.eq(&end_text),
        ))
        .execute(conn)?;

    let match_id: i64 = get_last_insert_rowid(conn)?;
    info!(match_id, game_id, place_id, "Created match");
    Ok(MatchId::new(match_id))
}

/// Records the winner of a match, overwriting any previous winner.
///
/// # Errors
///
/// Returns `NotFound` if the match does not exist, or a database error if
/// the winner is not a known profile.
pub fn set_match_winner(
    conn: &mut SqliteConnection,
    match_id: MatchId,
    winner: ProfileId,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(matches::table)
        .filter(matches::match_id.eq(match_id.value()))
        .set(matches::winner_profile_id.eq(Some(winner.value())))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Match {match_id} not found"
        )));
    }

    info!(
        match_id = match_id.value(),
        winner_profile_id = winner.value(),
        "Recorded match winner"
    );
    Ok(())
}

/// Adds a participant row to a match.
///
/// # Errors
///
/// Returns an error if the match or profile does not exist, or the profile
/// already participates in the match.
pub fn add_participant(
    conn: &mut SqliteConnection,
    match_id: MatchId,
    profile_id: ProfileId,
    points: f64,
    confirmed: bool,
) -> Result<(), PersistenceError> {
    diesel::insert_into(match_participants::table)
        .values((
            match_participants::match_id.eq(match_id.value()),
            match_participants::profile_id.eq(profile_id.value()),
            match_participants::points.eq(points),
            match_participants::confirmed.eq(i32::from(confirmed)),
        ))
        .execute(conn)?;

    info!(
        match_id = match_id.value(),
        profile_id = profile_id.value(),
        confirmed,
        "Added match participant"
    );
    Ok(())
}

/// Marks a participant as confirmed.
///
/// # Errors
///
/// Returns `NotFound` if the profile is not a participant of the match.
pub fn confirm_participant(
    conn: &mut SqliteConnection,
    match_id: MatchId,
    profile_id: ProfileId,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(match_participants::table)
        .filter(match_participants::match_id.eq(match_id.value()))
        .filter(match_participants::profile_id.eq(profile_id.value()))
        .set(match_participants::confirmed.eq(1))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Profile {profile_id} is not a participant of match {match_id}"
        )));
    }

    debug!(
        match_id = match_id.value(),
        profile_id = profile_id.value(),
        "Confirmed participant"
    );
    Ok(())
}

/// Deletes a participant row.
///
/// # Errors
///
/// Returns `NotFound` if the profile is not a participant of the match.
pub fn remove_participant(
    conn: &mut SqliteConnection,
    match_id: MatchId,
    profile_id: ProfileId,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        match_participants::table
            .filter(match_participants::match_id.eq(match_id.value()))
            .filter(match_participants::profile_id.eq(profile_id.value())),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Profile {profile_id} is not a participant of match {match_id}"
        )));
    }

    info!(
        match_id = match_id.value(),
        profile_id = profile_id.value(),
        "Removed participant"
    );
    Ok(())
}
