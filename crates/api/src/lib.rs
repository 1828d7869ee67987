// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for Gamenight match outcomes.
//!
//! Holds the authorization decision, the winner and participant workflows,
//! capability computation and read views. Transport lives in the server
//! crate; storage lives behind the traits in [`store`].

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod request_response;
pub mod store;

#[cfg(test)]
mod tests;

pub use auth::{
    Action, AuthenticatedActor, AuthorizationContext, AuthorizationService, PermissionGrant, Role,
    resolve_actor,
};
pub use capabilities::compute_match_capabilities;
pub use error::{ApiError, translate_domain_error};
pub use handlers::{
    PARTICIPANT_CONFIRMED, PARTICIPANT_REMOVED, SUBSCRIBED, UNSUBSCRIBED, WINNER_UPDATED,
    build_match_view, confirm_participant, declare_winner, get_leaderboard, get_match_view,
    remove_participant, subscribe_to_match, unsubscribe_from_match,
};
pub use request_response::{
    Capability, DeclareWinnerRequest, LeaderboardEntry, LeaderboardResponse, MatchCapabilities,
    MatchView, WorkflowOutcome,
};
pub use store::{CacheError, CacheInvalidator, MatchStore, NoopCache, RatingStore};
