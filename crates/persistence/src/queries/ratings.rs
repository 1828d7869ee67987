// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gamenight_domain::{INITIAL_RATING, ProfileId, RatingRecord, RatingScope};
use tracing::debug;

use crate::diesel_schema::ratings;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = ratings)]
struct RatingRow {
    profile_id: i64,
    rating: i32,
    wins: i32,
    losses: i32,
    draws: i32,
    minutes_played: i32,
}

/// Returns a profile's rating in a scope, or [`INITIAL_RATING`] if it has none.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_rating(
    conn: &mut SqliteConnection,
    scope: RatingScope,
    profile_id: ProfileId,
) -> Result<i32, PersistenceError> {
    let rating: Option<i32> = ratings::table
        .filter(ratings::scope_kind.eq(scope.kind.as_str()))
        .filter(ratings::scope_id.eq(scope.id))
        .filter(ratings::profile_id.eq(profile_id.value()))
        .select(ratings::rating)
        .first(conn)
        .optional()?;

    debug!(%scope, profile_id = profile_id.value(), ?rating, "Rating lookup");

    Ok(rating.unwrap_or(INITIAL_RATING))
}

/// Lists every rating record in a scope, best first.
///
/// Ties on rating are ordered by profile ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_ratings(
    conn: &mut SqliteConnection,
    scope: RatingScope,
) -> Result<Vec<RatingRecord>, PersistenceError> {
    let rows: Vec<RatingRow> = ratings::table
        .filter(ratings::scope_kind.eq(scope.kind.as_str()))
        .filter(ratings::scope_id.eq(scope.id))
        .order((ratings::rating.desc(), ratings::profile_id.asc()))
        .select(RatingRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| RatingRecord {
            profile_id: ProfileId::new(row.profile_id),
            scope,
            rating: row.rating,
            wins: row.wins,
            losses: row.losses,
            draws: row.draws,
            minutes_played: row.minutes_played,
        })
        .collect())
}
