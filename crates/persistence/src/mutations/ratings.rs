// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gamenight_domain::{ProfileId, RatingScope};
use tracing::debug;

use crate::diesel_schema::ratings;
use crate::error::PersistenceError;

/// Sets a profile's rating in a scope, creating the record if needed.
///
/// The update and the fallback insert run in one transaction. Aggregate
/// counters are left untouched on update and start at zero on insert.
///
/// # Errors
///
/// Returns an error if the profile does not exist or the write fails.
pub fn upsert_rating(
    conn: &mut SqliteConnection,
    scope: RatingScope,
    profile_id: ProfileId,
    rating: i32,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(ratings::table)
            .filter(ratings::scope_kind.eq(scope.kind.as_str()))
            .filter(ratings::scope_id.eq(scope.id))
            .filter(ratings::profile_id.eq(profile_id.value()))
            .set(ratings::rating.eq(rating))
            .execute(conn)?;

        if updated == 0 {
            diesel::insert_into(ratings::table)
                .values((
                    ratings::scope_kind.eq(scope.kind.as_str()),
                    ratings::scope_id.eq(scope.id),
                    ratings::profile_id.eq(profile_id.value()),
                    ratings::rating.eq(rating),
                ))
                .execute(conn)?;
        }

        debug!(
            %scope,
            profile_id = profile_id.value(),
            rating,
            created = updated == 0,
            "Upserted rating"
        );
        Ok(())
    })
}
