// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multiplayer Elo rating computation.
//!
//! Ratings are computed per scope by exhaustive pairwise comparison of the
//! submitted standings. The standings order is authoritative: every
//! participant is treated as having beaten every participant listed after
//! them. Points are carried along but never consulted, so two participants
//! with equal points still produce a full win and loss.
//!
//! ## Floor Rules
//!
//! - A rating at or below [`RATING_FLOOR`] never decreases.
//! - A rating above [`RATING_FLOOR`] may decrease, but never below it.
//! - Ratings never go below zero.

use std::collections::BTreeMap;

use crate::types::{ProfileId, Standing};

/// Elo sensitivity constant applied to every pairwise outcome.
pub const K_FACTOR: f64 = 32.0;

/// Rating below which losses are no longer applied.
pub const RATING_FLOOR: i32 = 100;

/// Implicit rating of a profile with no record in a scope.
pub const INITIAL_RATING: i32 = 0;

/// Expected score of a player rated `rating_a` against one rated `rating_b`.
#[must_use]
pub fn expected_score(rating_a: i32, rating_b: i32) -> f64 {
    let exponent: f64 = (f64::from(rating_b) - f64::from(rating_a)) / 400.0;
    1.0 / (1.0 + 10.0_f64.powf(exponent))
}

/// Computes new ratings for one scope.
///
/// # Arguments
///
/// * `standings` - Participants ordered best to worst
/// * `current` - Current ratings in the scope; absent profiles rate [`INITIAL_RATING`]
///
/// # Returns
///
/// The new rating of every profile appearing in `standings`. An empty
/// list yields an empty map and a single participant is returned unchanged.
#[must_use]
pub fn compute_ratings(
    standings: &[Standing],
    current: &BTreeMap<ProfileId, i32>,
) -> BTreeMap<ProfileId, i32> {
    let rating_of = |profile_id: ProfileId| -> i32 {
        current.get(&profile_id).copied().unwrap_or(INITIAL_RATING)
    };

    let mut deltas: BTreeMap<ProfileId, f64> =
        standings.iter().map(|s| (s.profile_id, 0.0)).collect();

    for (index, winner) in standings.iter().enumerate() {
        for loser in &standings[index + 1..] {
            let expected_winner: f64 =
                expected_score(rating_of(winner.profile_id), rating_of(loser.profile_id));
            let expected_loser: f64 = 1.0 - expected_winner;

            if let Some(delta) = deltas.get_mut(&winner.profile_id) {
                *delta += K_FACTOR * (1.0 - expected_winner);
            }
            if let Some(delta) = deltas.get_mut(&loser.profile_id) {
                *delta += K_FACTOR * (0.0 - expected_loser);
            }
        }
    }

    deltas
        .into_iter()
        .map(|(profile_id, delta)| {
            let rating: i32 = apply_change(rating_of(profile_id), round_delta(delta));
            (profile_id, rating)
        })
        .collect()
}

/// Rounds an accumulated delta to whole rating points.
///
/// The delta is bounded by `K_FACTOR` times the number of opponents, so the
/// conversion cannot truncate.
#[allow(clippy::cast_possible_truncation)]
fn round_delta(delta: f64) -> i32 {
    delta.round() as i32
}

/// Applies a rounded change to a rating under the floor rules.
#[must_use]
pub fn apply_change(rating: i32, change: i32) -> i32 {
    if rating <= RATING_FLOOR {
        rating.saturating_add(change.max(0)).max(0)
    } else {
        rating.saturating_add(change).max(RATING_FLOOR)
    }
}
