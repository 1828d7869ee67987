// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API layer.

use gamenight_domain::{
    MatchId, MatchParticipant, MatchStatus, ProfileId, RatingRecord, ScopeKind, Standing,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ApiError;

// ========================================================================
// Workflows
// ========================================================================

/// A winner declaration for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclareWinnerRequest {
    /// Participants ordered best to worst. Order is the ranking.
    pub standings: Vec<Standing>,
    /// Overrides the first standing as the recorded winner.
    #[serde(default)]
    pub winner_profile_id: Option<ProfileId>,
}

/// The result of a gated workflow.
///
/// A refused authorization is a normal outcome with `success == false`,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowOutcome {
    pub success: bool,
    pub message: String,
}

impl WorkflowOutcome {
    pub const INSUFFICIENT_PERMISSIONS: &'static str = "insufficient permissions";

    #[must_use]
    pub fn succeeded(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn refused() -> Self {
        Self {
            success: false,
            message: Self::INSUFFICIENT_PERMISSIONS.to_string(),
        }
    }

    /// Converts a refusal into `ApiError::PermissionDenied`.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` carrying the outcome message when
    /// `success` is false.
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::PermissionDenied {
                message: self.message,
            })
        }
    }
}

// ========================================================================
// Match view
// ========================================================================

/// A match as displayed, with its status resolved at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub match_id: MatchId,
    pub game_id: i64,
    pub place_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub start_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_at: OffsetDateTime,
    pub status: MatchStatus,
    pub winner_profile_id: Option<ProfileId>,
    pub participants: Vec<MatchParticipant>,
}

// ========================================================================
// Capability Model
// ========================================================================

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// What the acting profile may do on one match.
///
/// Advisory only. Every workflow repeats its own check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCapabilities {
    pub can_declare_winner: Capability,
    pub can_confirm_participants: Capability,
    pub can_remove_participants: Capability,
    /// Not yet a participant.
    pub can_subscribe: Capability,
    /// Already a participant, confirmed or not.
    pub can_unsubscribe: Capability,
}

// ========================================================================
// Leaderboards
// ========================================================================

/// One row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position. Equal ratings get distinct ranks ordered by profile ID.
    pub rank: usize,
    pub profile_id: ProfileId,
    pub rating: i32,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub minutes_played: i32,
}

impl LeaderboardEntry {
    #[must_use]
    pub const fn from_record(rank: usize, record: &RatingRecord) -> Self {
        Self {
            rank,
            profile_id: record.profile_id,
            rating: record.rating,
            wins: record.wins,
            losses: record.losses,
            draws: record.draws,
            minutes_played: record.minutes_played,
        }
    }
}

/// A scope's leaderboard, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub scope_kind: ScopeKind,
    pub scope_id: i64,
    pub entries: Vec<LeaderboardEntry>,
}
