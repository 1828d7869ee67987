// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod match_tests;

use gamenight_domain::{MatchId, ProfileId};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::SqlitePersistence;

/// A scheduled match together with the IDs it was created from.
pub struct TestMatch {
    pub match_id: MatchId,
    pub game_id: i64,
    pub place_id: i64,
}

pub const fn create_test_start() -> OffsetDateTime {
    datetime!(2026-03-14 18:00 UTC)
}

pub const fn create_test_end() -> OffsetDateTime {
    datetime!(2026-03-14 21:00 UTC)
}

pub fn create_test_profile(persistence: &mut SqlitePersistence, name: &str) -> ProfileId {
    ProfileId::new(
        persistence
            .create_profile(name, "user")
            .expect("Failed to create profile"),
    )
}

pub fn create_test_match(persistence: &mut SqlitePersistence) -> TestMatch {
    let game_id: i64 = persistence
        .create_game("Carcassonne")
        .expect("Failed to create game");
    let place_id: i64 = persistence
        .create_place("The Meeple Pub")
        .expect("Failed to create place");
    let match_id: MatchId = persistence
        .create_match(game_id, place_id, create_test_start(), create_test_end())
        .expect("Failed to create match");

    TestMatch {
        match_id,
        game_id,
        place_id,
    }
}
