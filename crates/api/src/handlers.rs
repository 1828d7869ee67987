// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match workflows and read views.
//!
//! Gated workflows (`declare_winner`, `confirm_participant`,
//! `remove_participant`) check [`AuthorizationService::can_update_match_stats`]
//! and report a refusal as an unsuccessful [`WorkflowOutcome`]. Store
//! failures propagate as [`ApiError`] and are never retried.
//!
//! Reads and writes are not version-checked. Two concurrent winner
//! declarations on one match can each read stale ratings; callers that need
//! stronger guarantees must serialize calls themselves.

use std::collections::{BTreeMap, HashSet};

use gamenight_domain::{
    Match, MatchId, ProfileId, RatingRecord, RatingScope, Standing, compute_ratings,
    resolve_status,
};
use gamenight_persistence::SqlitePersistence;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::ApiError;
use crate::request_response::{
    DeclareWinnerRequest, LeaderboardEntry, LeaderboardResponse, MatchView, WorkflowOutcome,
};
use crate::store::{CacheInvalidator, MatchStore, RatingStore};

pub const WINNER_UPDATED: &str = "winner updated";
pub const PARTICIPANT_CONFIRMED: &str = "participant confirmed";
pub const PARTICIPANT_REMOVED: &str = "participant removed";
pub const SUBSCRIBED: &str = "subscribed";
pub const UNSUBSCRIBED: &str = "unsubscribed";

/// Declares the winner of a match and recomputes ratings.
///
/// Steps, in order:
///
/// 1. The winner is `winner_profile_id` if given, else the first standing.
///    The winner and every standing must be participants of the match.
/// 2. The winner is written to the match.
/// 3. Authorization is checked. A confirmed participant gets the
///    self-service override.
/// 4. If refused, an unsuccessful outcome is returned. The winner written
///    in step 2 stays.
/// 5. Ratings are recomputed for the game scope, then the place scope, each
///    from that scope's current ratings and the same standings order.
/// 6. The cached match view is invalidated.
///
/// # Arguments
///
/// * `store` - Match and rating storage
/// * `cache` - Notified after a successful declaration
/// * `actor` - The acting profile
/// * `game_match` - The match, as loaded before this call
/// * `request` - Standings ordered best to worst and an optional winner
///
/// # Errors
///
/// Returns `InvalidInput` before any write if no winner can be determined,
/// a profile appears twice in the standings, or the winner or a standing is
/// not a participant of the match. Store failures return `NotFound` or
/// `StoreFailure`.
pub fn declare_winner<S, C>(
    store: &mut S,
    cache: &C,
    actor: &AuthenticatedActor,
    game_match: &Match,
    request: &DeclareWinnerRequest,
) -> Result<WorkflowOutcome, ApiError>
where
    S: MatchStore + RatingStore,
    C: CacheInvalidator,
{
    let winner: ProfileId = request
        .winner_profile_id
        .or_else(|| request.standings.first().map(|s| s.profile_id))
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("standings"),
            message: String::from("No standings and no explicit winner"),
        })?;
    if !game_match.has_participant(winner) {
        return Err(ApiError::InvalidInput {
            field: String::from("winner_profile_id"),
            message: format!("Profile {winner} is not a participant of this match"),
        });
    }
    validate_standings(game_match, &request.standings)?;

    store.set_match_winner(game_match.match_id, winner)?;

    let authorized: bool = AuthorizationService::can_update_match_stats(actor, game_match);

    info!(
        match_id = game_match.match_id.value(),
        actor = actor.profile_id.value(),
        winner = winner.value(),
        authorized,
        "Winner declared"
    );

    if !authorized {
        return Ok(WorkflowOutcome::refused());
    }

    for scope in [game_match.game_scope(), game_match.place_scope()] {
        recompute_scope_ratings(store, scope, &request.standings)?;
    }

    notify_cache(cache, game_match.match_id);

    Ok(WorkflowOutcome::succeeded(WINNER_UPDATED))
}

fn validate_standings(game_match: &Match, standings: &[Standing]) -> Result<(), ApiError> {
    let mut seen: HashSet<ProfileId> = HashSet::with_capacity(standings.len());
    for standing in standings {
        if !game_match.has_participant(standing.profile_id) {
            return Err(ApiError::InvalidInput {
                field: String::from("standings"),
                message: format!(
                    "Profile {} is not a participant of this match",
                    standing.profile_id
                ),
            });
        }
        if !seen.insert(standing.profile_id) {
            return Err(ApiError::InvalidInput {
                field: String::from("standings"),
                message: format!("Profile {} is listed more than once", standing.profile_id),
            });
        }
    }
    Ok(())
}

/// Reads current ratings for every standing, computes and writes new ones.
fn recompute_scope_ratings<S: RatingStore>(
    store: &mut S,
    scope: RatingScope,
    standings: &[Standing],
) -> Result<(), ApiError> {
    let mut current: BTreeMap<ProfileId, i32> = BTreeMap::new();
    for standing in standings {
        let rating: i32 = store.get_rating(scope, standing.profile_id)?;
        current.insert(standing.profile_id, rating);
    }

    let updated: BTreeMap<ProfileId, i32> = compute_ratings(standings, &current);

    for (profile_id, rating) in updated {
        debug!(
            %scope,
            profile_id = profile_id.value(),
            from = current.get(&profile_id).copied(),
            to = rating,
            "Rating updated"
        );
        store.upsert_rating(scope, profile_id, rating)?;
    }

    Ok(())
}

/// Confirms a participant of a match.
///
/// Gated like [`declare_winner`]. Nothing is written when refused.
///
/// # Errors
///
/// Returns `NotFound` if the target is not a participant, or `StoreFailure`.
pub fn confirm_participant<S, C>(
    store: &mut S,
    cache: &C,
    actor: &AuthenticatedActor,
    game_match: &Match,
    target: ProfileId,
) -> Result<WorkflowOutcome, ApiError>
where
    S: MatchStore,
    C: CacheInvalidator,
{
    if !authorize_participant_change(actor, game_match, target, "confirm") {
        return Ok(WorkflowOutcome::refused());
    }

    store.confirm_participant(game_match.match_id, target)?;
    notify_cache(cache, game_match.match_id);

    Ok(WorkflowOutcome::succeeded(PARTICIPANT_CONFIRMED))
}

/// Removes a participant from a match.
///
/// Gated like [`declare_winner`]. Nothing is written when refused.
///
/// # Errors
///
/// Returns `NotFound` if the target is not a participant, or `StoreFailure`.
pub fn remove_participant<S, C>(
    store: &mut S,
    cache: &C,
    actor: &AuthenticatedActor,
    game_match: &Match,
    target: ProfileId,
) -> Result<WorkflowOutcome, ApiError>
where
    S: MatchStore,
    C: CacheInvalidator,
{
    if !authorize_participant_change(actor, game_match, target, "remove") {
        return Ok(WorkflowOutcome::refused());
    }

    store.remove_participant(game_match.match_id, target)?;
    notify_cache(cache, game_match.match_id);

    Ok(WorkflowOutcome::succeeded(PARTICIPANT_REMOVED))
}

fn authorize_participant_change(
    actor: &AuthenticatedActor,
    game_match: &Match,
    target: ProfileId,
    change: &str,
) -> bool {
    let authorized: bool = AuthorizationService::can_update_match_stats(actor, game_match);

    info!(
        match_id = game_match.match_id.value(),
        actor = actor.profile_id.value(),
        target = target.value(),
        change,
        authorized,
        "Participant change requested"
    );

    authorized
}

/// Adds the acting profile to a match as an unconfirmed participant.
///
/// Not gated. Succeeds without writing if the actor already participates.
///
/// # Errors
///
/// Returns `StoreFailure` if the write fails.
pub fn subscribe_to_match<S, C>(
    store: &mut S,
    cache: &C,
    actor: &AuthenticatedActor,
    game_match: &Match,
) -> Result<WorkflowOutcome, ApiError>
where
    S: MatchStore,
    C: CacheInvalidator,
{
    if game_match.has_participant(actor.profile_id) {
        debug!(
            match_id = game_match.match_id.value(),
            actor = actor.profile_id.value(),
            "Already subscribed"
        );
        return Ok(WorkflowOutcome::succeeded(SUBSCRIBED));
    }

    store.add_participant(game_match.match_id, actor.profile_id, false)?;
    notify_cache(cache, game_match.match_id);

    info!(
        match_id = game_match.match_id.value(),
        actor = actor.profile_id.value(),
        "Subscribed to match"
    );
    Ok(WorkflowOutcome::succeeded(SUBSCRIBED))
}

/// Removes the acting profile from a match, confirmed or not.
///
/// Not gated.
///
/// # Errors
///
/// Returns `NotFound` if the actor does not participate, or `StoreFailure`.
pub fn unsubscribe_from_match<S, C>(
    store: &mut S,
    cache: &C,
    actor: &AuthenticatedActor,
    game_match: &Match,
) -> Result<WorkflowOutcome, ApiError>
where
    S: MatchStore,
    C: CacheInvalidator,
{
    store.remove_participant(game_match.match_id, actor.profile_id)?;
    notify_cache(cache, game_match.match_id);

    info!(
        match_id = game_match.match_id.value(),
        actor = actor.profile_id.value(),
        "Unsubscribed from match"
    );
    Ok(WorkflowOutcome::succeeded(UNSUBSCRIBED))
}

fn notify_cache<C: CacheInvalidator>(cache: &C, match_id: MatchId) {
    if let Err(e) = cache.invalidate_match(match_id) {
        warn!(match_id = match_id.value(), error = %e, "Failed to invalidate match view");
    }
}

/// Loads a match and resolves its status at `now`.
///
/// # Errors
///
/// Returns `NotFound` if the match does not exist, or `StoreFailure`.
pub fn get_match_view<S: MatchStore>(
    store: &mut S,
    match_id: MatchId,
    now: OffsetDateTime,
) -> Result<MatchView, ApiError> {
    let game_match: Match = store.get_match(match_id)?;
    Ok(build_match_view(game_match, now))
}

/// Resolves the status of an already loaded match.
#[must_use]
pub fn build_match_view(game_match: Match, now: OffsetDateTime) -> MatchView {
    let status = resolve_status(&game_match, now);
    MatchView {
        match_id: game_match.match_id,
        game_id: game_match.game_id,
        place_id: game_match.place_id,
        start_at: game_match.start_at,
        end_at: game_match.end_at,
        status,
        winner_profile_id: game_match.winner_profile_id,
        participants: game_match.participants,
    }
}

/// Lists a scope's leaderboard, best first.
///
/// # Errors
///
/// Returns `StoreFailure` if the query fails.
pub fn get_leaderboard(
    persistence: &mut SqlitePersistence,
    scope: RatingScope,
) -> Result<LeaderboardResponse, ApiError> {
    let records: Vec<RatingRecord> = persistence.list_ratings(scope)?;

    Ok(LeaderboardResponse {
        scope_kind: scope.kind,
        scope_id: scope.id,
        entries: records
            .iter()
            .enumerate()
            .map(|(index, record)| LeaderboardEntry::from_record(index + 1, record))
            .collect(),
    })
}
