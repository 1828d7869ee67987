// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities say which match controls to render for the acting profile.
//! They are advisory only and do not replace the checks the workflows make.

use gamenight_domain::Match;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::request_response::{Capability, MatchCapabilities};

/// Computes what an actor may do on a match.
///
/// Winner declaration and participant management share one check, so they
/// are always granted together.
#[must_use]
pub fn compute_match_capabilities(
    actor: &AuthenticatedActor,
    game_match: &Match,
) -> MatchCapabilities {
    let can_update_stats: Capability =
        Capability::from_bool(AuthorizationService::can_update_match_stats(actor, game_match));
    let is_participant: bool = game_match.has_participant(actor.profile_id);

    MatchCapabilities {
        can_declare_winner: can_update_stats,
        can_confirm_participants: can_update_stats,
        can_remove_participants: can_update_stats,
        can_subscribe: Capability::from_bool(!is_participant),
        can_unsubscribe: Capability::from_bool(is_participant),
    }
}
