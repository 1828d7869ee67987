// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod match_status;
mod rating;
mod types;

#[cfg(test)]
mod tests;

pub use match_status::{MatchStatus, resolve_status};
pub use rating::{
    INITIAL_RATING, K_FACTOR, RATING_FLOOR, apply_change, compute_ratings, expected_score,
};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Match, MatchId, MatchParticipant, ProfileId, RatingRecord, RatingScope, ScopeKind, Standing,
};
