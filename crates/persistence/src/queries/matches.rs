// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gamenight_domain::{Match, MatchId, MatchParticipant, ProfileId};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::diesel_schema::{match_participants, matches};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = matches)]
struct MatchRow {
    match_id: i64,
    game_id: i64,
    place_id: i64,
    start_at: String,
    end_at: String,
    winner_profile_id: Option<i64>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = match_participants)]
struct ParticipantRow {
    profile_id: i64,
    points: f64,
    confirmed: i32,
}

/// Loads a match and its participants in insertion order.
///
/// # Errors
///
/// Returns `NotFound` if the match does not exist, or an error if a stored
/// timestamp cannot be parsed.
pub fn get_match(
    conn: &mut SqliteConnection,
    match_id: MatchId,
) -> Result<Match, PersistenceError> {
    debug!(match_id = match_id.value(), "Loading match");

    let row: MatchRow = matches::table
        .filter(matches::match_id.eq(match_id.value()))
        .select(MatchRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Match {match_id} not found")))?;

    let participant_rows: Vec<ParticipantRow> = match_participants::table
        .filter(match_participants::match_id.eq(match_id.value()))
        .order(match_participants::participant_id.asc())
        .select(ParticipantRow::as_select())
        .load(conn)?;

    Ok(Match {
        match_id: MatchId::new(row.match_id),
        game_id: row.game_id,
        place_id: row.place_id,
        start_at: OffsetDateTime::parse(&row.start_at, &Rfc3339)?,
        end_at: OffsetDateTime::parse(&row.end_at, &Rfc3339)?,
        winner_profile_id: row.winner_profile_id.map(ProfileId::new),
        participants: participant_rows
            .into_iter()
            .map(|p| MatchParticipant {
                profile_id: ProfileId::new(p.profile_id),
                points: p.points,
                confirmed: p.confirmed != 0,
            })
            .collect(),
    })
}
