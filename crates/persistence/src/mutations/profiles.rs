// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use gamenight_domain::ScopeKind;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{permission_grants, profiles};
use crate::error::PersistenceError;

/// Creates a profile.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `display_name` - The name shown to other players
/// * `role` - Stored role string (`admin`, `user`, `place_manager`, `game_manager`)
///
/// # Errors
///
/// Returns an error if the insert fails, including when `role` is not one of
/// the accepted strings.
pub fn create_profile(
    conn: &mut SqliteConnection,
    display_name: &str,
    role: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(profiles::table)
        .values((
            profiles::display_name.eq(display_name),
            profiles::role.eq(role),
        ))
        .execute(conn)?;

    let profile_id: i64 = get_last_insert_rowid(conn)?;

    info!(profile_id, display_name, role, "Created profile");

    Ok(profile_id)
}

/// Grants a profile permission to perform `action` on one place or game.
///
/// # Errors
///
/// Returns an error if the profile does not exist or the grant already exists.
pub fn grant_permission(
    conn: &mut SqliteConnection,
    profile_id: i64,
    action: &str,
    scope_kind: ScopeKind,
    scope_id: i64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(permission_grants::table)
        .values((
            permission_grants::profile_id.eq(profile_id),
            permission_grants::action.eq(action),
            permission_grants::scope_kind.eq(scope_kind.as_str()),
            permission_grants::scope_id.eq(scope_id),
        ))
        .execute(conn)?;

    let grant_id: i64 = get_last_insert_rowid(conn)?;

    info!(
        grant_id,
        profile_id,
        action,
        scope_kind = scope_kind.as_str(),
        scope_id,
        "Granted permission"
    );

    Ok(grant_id)
}
