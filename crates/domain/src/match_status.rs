// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match lifecycle status derivation.
//!
//! Status is never stored. It is derived on every read from the match's
//! scheduled window, its winner field and the current instant, so it always
//! agrees with the data it is computed from.

use crate::error::DomainError;
use crate::types::Match;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle state of a match as seen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// The match has not started yet.
    Scheduled,
    /// The current instant falls inside the scheduled window (inclusive).
    Ongoing,
    /// A winner has been declared. Terminal.
    Completed,
    /// The window has closed and no winner has been declared.
    WaitingForResults,
    /// Fallback branch of the derivation. No input currently reaches it.
    Canceled,
}

impl MatchStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::WaitingForResults => "waiting_for_results",
            Self::Canceled => "canceled",
        }
    }

    /// Returns true if no further status can be derived from this one.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }
}

impl FromStr for MatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "waiting_for_results" => Ok(Self::WaitingForResults),
            "canceled" => Ok(Self::Canceled),
            _ => Err(DomainError::InvalidMatchStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derives the status of a match at `now`.
///
/// A declared winner takes priority over every time comparison. Otherwise
/// the window `[start_at, end_at]` is inclusive on both ends. Windows with
/// `start_at > end_at` are not rejected; they produce whatever status the
/// comparisons yield.
#[must_use]
pub fn resolve_status(game_match: &Match, now: OffsetDateTime) -> MatchStatus {
    if game_match.winner_profile_id.is_some() {
        MatchStatus::Completed
    } else if now < game_match.start_at {
        MatchStatus::Scheduled
    } else if game_match.start_at <= now && now <= game_match.end_at {
        MatchStatus::Ongoing
    } else if now > game_match.end_at {
        MatchStatus::WaitingForResults
    } else {
        MatchStatus::Canceled
    }
}
