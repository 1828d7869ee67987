// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `profiles`: Profiles and their permission grants
//! - `matches`: Matches with their ordered participants
//! - `ratings`: Per-scope ratings and leaderboards

pub mod matches;
pub mod profiles;
pub mod ratings;

pub use matches::get_match;
pub use profiles::{get_profile, list_grants};
pub use ratings::{get_rating, list_ratings};
