// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Opaque identifier of an authenticated person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(i64);

impl ProfileId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a scheduled match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(i64);

impl MatchId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of resource a leaderboard or a permission grant is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// A board game title.
    Game,
    /// A venue where matches are played.
    Place,
}

impl ScopeKind {
    /// Returns the string representation used for persistence and URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Place => "place",
        }
    }
}

impl FromStr for ScopeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "game" => Ok(Self::Game),
            "place" => Ok(Self::Place),
            _ => Err(DomainError::InvalidScopeKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A leaderboard namespace.
///
/// Each scope keeps one independent rating per profile. The same match
/// feeds both its game scope and its place scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingScope {
    pub kind: ScopeKind,
    pub id: i64,
}

impl RatingScope {
    #[must_use]
    pub const fn game(game_id: i64) -> Self {
        Self {
            kind: ScopeKind::Game,
            id: game_id,
        }
    }

    #[must_use]
    pub const fn place(place_id: i64) -> Self {
        Self {
            kind: ScopeKind::Place,
            id: place_id,
        }
    }
}

impl std::fmt::Display for RatingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// One profile's standing in a single scope.
///
/// The aggregate counters are maintained outside the rating engine and
/// are never read by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub profile_id: ProfileId,
    pub scope: RatingScope,
    pub rating: i32,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub minutes_played: i32,
}

/// A profile taking part in a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchParticipant {
    pub profile_id: ProfileId,
    pub points: f64,
    /// False when added by a manager, true once confirmed or self-registered.
    pub confirmed: bool,
}

/// A participant entry in a submitted result, ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub profile_id: ProfileId,
    pub points: f64,
}

/// A scheduled board-game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: MatchId,
    pub game_id: i64,
    pub place_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub start_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_at: OffsetDateTime,
    pub winner_profile_id: Option<ProfileId>,
    /// Participants in insertion order.
    pub participants: Vec<MatchParticipant>,
}

impl Match {
    #[must_use]
    pub const fn game_scope(&self) -> RatingScope {
        RatingScope::game(self.game_id)
    }

    #[must_use]
    pub const fn place_scope(&self) -> RatingScope {
        RatingScope::place(self.place_id)
    }

    /// Finds the participant row for a profile, if any.
    #[must_use]
    pub fn participant(&self, profile_id: ProfileId) -> Option<&MatchParticipant> {
        self.participants
            .iter()
            .find(|p| p.profile_id == profile_id)
    }

    /// Returns true if the profile is a participant, confirmed or not.
    #[must_use]
    pub fn has_participant(&self, profile_id: ProfileId) -> bool {
        self.participant(profile_id).is_some()
    }

    /// Returns true if the profile is a confirmed participant.
    ///
    /// This is the basis of the self-service override: a confirmed
    /// participant may record outcomes on their own match.
    #[must_use]
    pub fn is_confirmed_participant(&self, profile_id: ProfileId) -> bool {
        self.participants
            .iter()
            .any(|p| p.confirmed && p.profile_id == profile_id)
    }
}
