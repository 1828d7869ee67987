// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `profiles`: Profiles and permission grants
//! - `matches`: Places, games, matches and participants
//! - `ratings`: Rating upserts
//!
//! Inserted IDs are read back with `last_insert_rowid()` from the `backend`
//! module. Everything else is Diesel DSL.

pub mod matches;
pub mod profiles;
pub mod ratings;

pub use matches::{
    add_participant, confirm_participant, create_game, create_match, create_place,
    remove_participant, set_match_winner,
};
pub use profiles::{create_profile, grant_permission};
pub use ratings::upsert_rating;
