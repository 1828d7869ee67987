// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{GrantData, ProfileData};
use crate::diesel_schema::{permission_grants, profiles};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = profiles)]
struct ProfileRow {
    profile_id: i64,
    display_name: String,
    role: String,
    created_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = permission_grants)]
struct GrantRow {
    grant_id: i64,
    profile_id: i64,
    action: String,
    scope_kind: String,
    scope_id: i64,
}

/// Retrieves a profile by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the profile does not exist.
pub fn get_profile(
    conn: &mut SqliteConnection,
    profile_id: i64,
) -> Result<Option<ProfileData>, PersistenceError> {
    debug!("Looking up profile by ID: {}", profile_id);

    let row: Option<ProfileRow> = profiles::table
        .filter(profiles::profile_id.eq(profile_id))
        .select(ProfileRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|row| ProfileData {
        profile_id: row.profile_id,
        display_name: row.display_name,
        role: row.role,
        created_at: row.created_at,
    }))
}

/// Lists every permission grant held by a profile, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_grants(
    conn: &mut SqliteConnection,
    profile_id: i64,
) -> Result<Vec<GrantData>, PersistenceError> {
    debug!("Listing grants for profile ID: {}", profile_id);

    let rows: Vec<GrantRow> = permission_grants::table
        .filter(permission_grants::profile_id.eq(profile_id))
        .order(permission_grants::grant_id.asc())
        .select(GrantRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| GrantData {
            grant_id: row.grant_id,
            profile_id: row.profile_id,
            action: row.action,
            scope_kind: row.scope_kind,
            scope_id: row.scope_id,
        })
        .collect())
}
