// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roles, permission grants and the authorization decision.

use std::str::FromStr;

use gamenight_domain::{Match, ProfileId, ScopeKind};
use gamenight_persistence::{GrantData, ProfileData, SqlitePersistence};
use tracing::{debug, warn};

use crate::error::ApiError;

/// The single role an identity holds at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Unrestricted. Needs no grants.
    Admin,
    /// A regular player.
    User,
    /// Acts on places it holds grants for.
    PlaceManager,
    /// Acts on games it holds grants for.
    GameManager,
}

impl Role {
    /// Returns the stored string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::PlaceManager => "place_manager",
            Self::GameManager => "game_manager",
        }
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "place_manager" => Ok(Self::PlaceManager),
            "game_manager" => Ok(Self::GameManager),
            _ => Err(ApiError::AuthenticationFailed {
                reason: format!("Unknown role '{s}'"),
            }),
        }
    }
}

/// An action that can be granted on a place or game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Record outcomes and manage participants of a match.
    UpdateMatchStats,
}

impl Action {
    /// Returns the stored string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UpdateMatchStats => "update_match_stats",
        }
    }
}

impl FromStr for Action {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "update_match_stats" => Ok(Self::UpdateMatchStats),
            _ => Err(ApiError::InvalidInput {
                field: String::from("action"),
                message: format!("Unknown action '{s}'"),
            }),
        }
    }
}

/// A capability bound to one place or game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionGrant {
    pub action: Action,
    pub scope_kind: ScopeKind,
    pub scope_id: i64,
}

/// The resource an action targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorizationContext {
    pub place_id: Option<i64>,
    pub game_id: Option<i64>,
}

impl AuthorizationContext {
    /// Context for an action on a match's place.
    #[must_use]
    pub const fn for_place(place_id: i64) -> Self {
        Self {
            place_id: Some(place_id),
            game_id: None,
        }
    }
}

/// A resolved identity with its role and grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The profile performing the request.
    pub profile_id: ProfileId,
    /// The role assigned to this profile.
    pub role: Role,
    /// Grants held by this profile. Empty for admins and users.
    pub grants: Vec<PermissionGrant>,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(profile_id: ProfileId, role: Role, grants: Vec<PermissionGrant>) -> Self {
        Self {
            profile_id,
            role,
            grants,
        }
    }
}

/// Authorization decisions.
///
/// Every check is a pure function of its arguments. Nothing is read from
/// ambient state, so checks may be made speculatively.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Decides whether an action is allowed. The first matching rule wins:
    ///
    /// 1. `Admin` is always allowed.
    /// 2. A set `self_service_override` is allowed.
    /// 3. `PlaceManager` needs a place grant for `action` on `context.place_id`.
    /// 4. `GameManager` needs a game grant for `action` on `context.game_id`.
    /// 5. Everything else is refused.
    ///
    /// A missing context or missing grants refuse rather than error.
    #[must_use]
    pub fn can_perform(
        action: Action,
        role: Role,
        grants: &[PermissionGrant],
        context: Option<&AuthorizationContext>,
        self_service_override: bool,
    ) -> bool {
        if role == Role::Admin {
            return true;
        }
        if self_service_override {
            return true;
        }

        let holds_grant = |kind: ScopeKind, scope_id: Option<i64>| -> bool {
            scope_id.is_some_and(|id| {
                grants
                    .iter()
                    .any(|g| g.action == action && g.scope_kind == kind && g.scope_id == id)
            })
        };

        match role {
            Role::PlaceManager => holds_grant(ScopeKind::Place, context.and_then(|c| c.place_id)),
            Role::GameManager => holds_grant(ScopeKind::Game, context.and_then(|c| c.game_id)),
            Role::Admin | Role::User => false,
        }
    }

    /// Checks whether an actor may update stats on a match.
    ///
    /// Confirmed participants of the match get the self-service override.
    /// The context carries only the match's place.
    #[must_use]
    pub fn can_update_match_stats(actor: &AuthenticatedActor, game_match: &Match) -> bool {
        let self_service_override: bool = game_match.is_confirmed_participant(actor.profile_id);
        let context = AuthorizationContext::for_place(game_match.place_id);

        Self::can_perform(
            Action::UpdateMatchStats,
            actor.role,
            &actor.grants,
            Some(&context),
            self_service_override,
        )
    }
}

/// Resolves a profile ID into an authenticated actor.
///
/// Grants with an unrecognized action or scope kind are skipped with a
/// warning.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the profile does not exist or its role
/// cannot be parsed, and `StoreFailure` if the lookup fails.
pub fn resolve_actor(
    persistence: &mut SqlitePersistence,
    profile_id: ProfileId,
) -> Result<AuthenticatedActor, ApiError> {
    let profile: ProfileData = persistence
        .get_profile(profile_id.value())?
        .ok_or_else(|| ApiError::AuthenticationFailed {
            reason: format!("Unknown profile {profile_id}"),
        })?;

    let role: Role = profile.role.parse()?;
    let grant_rows: Vec<GrantData> = persistence.list_grants(profile_id.value())?;

    let grants: Vec<PermissionGrant> = grant_rows
        .iter()
        .filter_map(|row| match parse_grant(row) {
            Ok(grant) => Some(grant),
            Err(e) => {
                warn!(grant_id = row.grant_id, error = %e, "Skipping unreadable grant");
                None
            }
        })
        .collect();

    debug!(
        profile_id = profile_id.value(),
        role = role.as_str(),
        grants = grants.len(),
        "Resolved actor"
    );

    Ok(AuthenticatedActor::new(profile_id, role, grants))
}

fn parse_grant(row: &GrantData) -> Result<PermissionGrant, ApiError> {
    Ok(PermissionGrant {
        action: row.action.parse()?,
        scope_kind: row
            .scope_kind
            .parse()
            .map_err(crate::error::translate_domain_error)?,
        scope_id: row.scope_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            Role::Admin,
            Role::User,
            Role::PlaceManager,
            Role::GameManager,
        ] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_unknown_role_fails_authentication() {
        let result = "Admin".parse::<Role>();
        assert!(matches!(
            result,
            Err(ApiError::AuthenticationFailed { .. })
        ));
    }

    #[test]
    fn test_action_round_trip() {
        assert_eq!(
            Action::UpdateMatchStats.as_str().parse::<Action>(),
            Ok(Action::UpdateMatchStats)
        );
        assert!("delete_match".parse::<Action>().is_err());
    }
}
