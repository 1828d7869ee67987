// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Acting-profile extraction for the server.
//!
//! Authentication happens upstream. Requests arrive with the authenticated
//! profile in the `X-Profile-Id` header, and this extractor resolves it to
//! an [`AuthenticatedActor`] with its role and grants.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use gamenight_api::{ApiError, AuthenticatedActor, resolve_actor};
use gamenight_domain::ProfileId;
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Header carrying the pre-authenticated profile ID.
pub const PROFILE_HEADER: &str = "X-Profile-Id";

/// Extractor for the acting profile.
///
/// # Errors
///
/// Rejects with 401 if the header is missing, is not an integer, or names
/// an unknown profile. A store failure while resolving rejects with 500.
pub struct CurrentActor(pub AuthenticatedActor);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = IdentityError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(PROFILE_HEADER)
            .ok_or_else(|| {
                debug!("Missing {PROFILE_HEADER} header");
                IdentityError::MissingHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid {PROFILE_HEADER} header encoding");
                IdentityError::InvalidHeader
            })?;

        let profile_id: i64 = raw.trim().parse().map_err(|_| {
            warn!(value = raw, "{PROFILE_HEADER} header is not an integer");
            IdentityError::InvalidHeader
        })?;

        let mut persistence = state.persistence.lock().await;
        let actor = resolve_actor(&mut persistence, ProfileId::new(profile_id)).map_err(|e| {
            warn!(profile_id, error = %e, "Actor resolution failed");
            IdentityError::Resolution(e)
        })?;
        drop(persistence);

        debug!(
            profile_id,
            role = actor.role.as_str(),
            "Actor resolved"
        );

        Ok(Self(actor))
    }
}

/// Identity extraction errors.
#[derive(Debug)]
pub enum IdentityError {
    /// The profile header is missing.
    MissingHeader,
    /// The profile header is not a valid integer.
    InvalidHeader,
    /// The profile could not be resolved.
    Resolution(ApiError),
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let error: HttpError = match self {
            Self::MissingHeader => HttpError {
                status: StatusCode::UNAUTHORIZED,
                message: format!("Missing {PROFILE_HEADER} header"),
            },
            Self::InvalidHeader => HttpError {
                status: StatusCode::UNAUTHORIZED,
                message: format!("Invalid {PROFILE_HEADER} header. Expected a profile ID"),
            },
            Self::Resolution(err) => HttpError::from(err),
        };

        error.into_response()
    }
}
