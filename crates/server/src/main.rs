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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod cache;
mod identity;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use gamenight_api::{
    ApiError, AuthenticatedActor, CacheInvalidator, DeclareWinnerRequest, LeaderboardResponse,
    MatchCapabilities, MatchStore, MatchView, RatingStore, WorkflowOutcome, build_match_view,
    compute_match_capabilities, confirm_participant, declare_winner, get_leaderboard,
    remove_participant, subscribe_to_match, translate_domain_error, unsubscribe_from_match,
};
use gamenight_domain::{Match, MatchId, ProfileId, RatingScope, ScopeKind};
use gamenight_persistence::SqlitePersistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::cache::MatchViewCache;
use crate::identity::CurrentActor;

/// Gamenight Server - HTTP server for match outcomes and leaderboards
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// Every request that touches the database holds the persistence mutex for
/// its whole read-compute-write sequence, so workflows never interleave.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<SqlitePersistence>>,
    cache: Arc<MatchViewCache>,
}

impl AppState {
    fn new(persistence: SqlitePersistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            cache: Arc::new(MatchViewCache::default()),
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::StoreFailure { .. } => {
                error!(error = %err, "Store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Loads a match fresh from the database.
fn load_match(
    persistence: &mut SqlitePersistence,
    match_id: MatchId,
) -> Result<Match, HttpError> {
    persistence
        .get_match(match_id)
        .map_err(|e| HttpError::from(ApiError::from(e)))
}

/// Loads a match through the view cache.
fn load_cached_match(
    app_state: &AppState,
    persistence: &mut SqlitePersistence,
    match_id: MatchId,
) -> Result<Match, HttpError> {
    if let Some(game_match) = app_state.cache.get(match_id) {
        return Ok(game_match);
    }

    let game_match: Match = load_match(persistence, match_id)?;
    app_state.cache.insert(game_match.clone());
    Ok(game_match)
}

/// Handler for GET `/matches/{match_id}` endpoint.
///
/// Status is resolved against the current time on every request, cached or not.
async fn handle_get_match(
    AxumState(app_state): AxumState<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<MatchView>, HttpError> {
    let match_id = MatchId::new(match_id);

    let mut persistence = app_state.persistence.lock().await;
    let game_match: Match = load_cached_match(&app_state, &mut persistence, match_id)?;
    drop(persistence);

    Ok(Json(build_match_view(game_match, OffsetDateTime::now_utc())))
}

/// Handler for GET `/matches/{match_id}/capabilities` endpoint.
async fn handle_get_capabilities(
    AxumState(app_state): AxumState<AppState>,
    Path(match_id): Path<i64>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<MatchCapabilities>, HttpError> {
    let match_id = MatchId::new(match_id);

    let mut persistence = app_state.persistence.lock().await;
    let game_match: Match = load_cached_match(&app_state, &mut persistence, match_id)?;
    drop(persistence);

    Ok(Json(compute_match_capabilities(&actor, &game_match)))
}

/// Handler for POST `/matches/{match_id}/winner` endpoint.
///
/// Declares the winner and recomputes game and place ratings.
async fn handle_declare_winner(
    AxumState(app_state): AxumState<AppState>,
    Path(match_id): Path<i64>,
    CurrentActor(actor): CurrentActor,
    Json(req): Json<DeclareWinnerRequest>,
) -> Result<Json<WorkflowOutcome>, HttpError> {
    let match_id = MatchId::new(match_id);
    info!(
        match_id = match_id.value(),
        actor = actor.profile_id.value(),
        standings = req.standings.len(),
        "Handling declare_winner request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let game_match: Match = load_match(&mut persistence, match_id)?;
    let outcome: WorkflowOutcome =
        declare_and_invalidate(&mut *persistence, &app_state.cache, &actor, &game_match, &req)?;
    drop(persistence);

    Ok(Json(outcome.into_result()?))
}

/// Runs the winner workflow, then drops the cached view whatever the result.
///
/// The winner is written before authorization and rating writes, so a
/// refusal or a later store failure still leaves the match changed.
fn declare_and_invalidate<S>(
    store: &mut S,
    cache: &MatchViewCache,
    actor: &AuthenticatedActor,
    game_match: &Match,
    request: &DeclareWinnerRequest,
) -> Result<WorkflowOutcome, ApiError>
where
    S: MatchStore + RatingStore,
{
    let result = declare_winner(store, cache, actor, game_match, request);
    if let Err(e) = cache.invalidate_match(game_match.match_id) {
        warn!(
            match_id = game_match.match_id.value(),
            error = %e,
            "Failed to invalidate match view"
        );
    }
    result
}

/// Handler for POST `/matches/{match_id}/participants/{profile_id}/confirm` endpoint.
async fn handle_confirm_participant(
    AxumState(app_state): AxumState<AppState>,
    Path((match_id, profile_id)): Path<(i64, i64)>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<WorkflowOutcome>, HttpError> {
    let match_id = MatchId::new(match_id);
    info!(
        match_id = match_id.value(),
        actor = actor.profile_id.value(),
        target = profile_id,
        "Handling confirm_participant request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let game_match: Match = load_match(&mut persistence, match_id)?;
    let outcome: WorkflowOutcome = confirm_participant(
        &mut *persistence,
        app_state.cache.as_ref(),
        &actor,
        &game_match,
        ProfileId::new(profile_id),
    )?;
    drop(persistence);

    Ok(Json(outcome.into_result()?))
}

/// Handler for DELETE `/matches/{match_id}/participants/{profile_id}` endpoint.
async fn handle_remove_participant(
    AxumState(app_state): AxumState<AppState>,
    Path((match_id, profile_id)): Path<(i64, i64)>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<WorkflowOutcome>, HttpError> {
    let match_id = MatchId::new(match_id);
    info!(
        match_id = match_id.value(),
        actor = actor.profile_id.value(),
        target = profile_id,
        "Handling remove_participant request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let game_match: Match = load_match(&mut persistence, match_id)?;
    let outcome: WorkflowOutcome = remove_participant(
        &mut *persistence,
        app_state.cache.as_ref(),
        &actor,
        &game_match,
        ProfileId::new(profile_id),
    )?;
    drop(persistence);

    Ok(Json(outcome.into_result()?))
}

/// Handler for POST `/matches/{match_id}/subscription` endpoint.
async fn handle_subscribe(
    AxumState(app_state): AxumState<AppState>,
    Path(match_id): Path<i64>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<WorkflowOutcome>, HttpError> {
    let match_id = MatchId::new(match_id);

    let mut persistence = app_state.persistence.lock().await;
    let game_match: Match = load_match(&mut persistence, match_id)?;
    let outcome: WorkflowOutcome = subscribe_to_match(
        &mut *persistence,
        app_state.cache.as_ref(),
        &actor,
        &game_match,
    )?;
    drop(persistence);

    Ok(Json(outcome))
}

/// Handler for DELETE `/matches/{match_id}/subscription` endpoint.
async fn handle_unsubscribe(
    AxumState(app_state): AxumState<AppState>,
    Path(match_id): Path<i64>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<WorkflowOutcome>, HttpError> {
    let match_id = MatchId::new(match_id);

    let mut persistence = app_state.persistence.lock().await;
    let game_match: Match = load_match(&mut persistence, match_id)?;
    let outcome: WorkflowOutcome = unsubscribe_from_match(
        &mut *persistence,
        app_state.cache.as_ref(),
        &actor,
        &game_match,
    )?;
    drop(persistence);

    Ok(Json(outcome))
}

/// Handler for GET `/leaderboards/{scope_kind}/{scope_id}` endpoint.
async fn handle_get_leaderboard(
    AxumState(app_state): AxumState<AppState>,
    Path((scope_kind, scope_id)): Path<(String, i64)>,
) -> Result<Json<LeaderboardResponse>, HttpError> {
    let kind: ScopeKind = scope_kind
        .parse()
        .map_err(|e| HttpError::from(translate_domain_error(e)))?;
    let scope = RatingScope { kind, id: scope_id };

    let mut persistence = app_state.persistence.lock().await;
    let leaderboard: LeaderboardResponse = get_leaderboard(&mut persistence, scope)?;
    drop(persistence);

    Ok(Json(leaderboard))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/matches/{match_id}", get(handle_get_match))
        .route(
            "/matches/{match_id}/capabilities",
            get(handle_get_capabilities),
        )
        .route("/matches/{match_id}/winner", post(handle_declare_winner))
        .route(
            "/matches/{match_id}/participants/{profile_id}/confirm",
            post(handle_confirm_participant),
        )
        .route(
            "/matches/{match_id}/participants/{profile_id}",
            delete(handle_remove_participant),
        )
        .route(
            "/matches/{match_id}/subscription",
            post(handle_subscribe).delete(handle_unsubscribe),
        )
        .route(
            "/leaderboards/{scope_kind}/{scope_id}",
            get(handle_get_leaderboard),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Gamenight Server");

    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app: Router = build_router(AppState::new(persistence));

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
