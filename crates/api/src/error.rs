// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use gamenight_domain::DomainError;
use gamenight_persistence::PersistenceError;

/// API-level errors.
///
/// Authorization refusals inside the workflows are reported as a
/// [`crate::WorkflowOutcome`], not as `PermissionDenied`. Callers that want
/// the error form convert with [`crate::WorkflowOutcome::into_result`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The acting identity could not be resolved.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor is not permitted to perform the action.
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// A human-readable description of the refusal.
        message: String,
    },
    /// A requested resource was not found.
    #[error("Not found: {message}")]
    NotFound {
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The backing store failed. Not retried.
    #[error("Store failure: {message}")]
    StoreFailure {
        /// A description of the underlying failure.
        message: String,
    },
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(message) => Self::NotFound { message },
            other => Self::StoreFailure {
                message: other.to_string(),
            },
        }
    }
}

/// Translates a domain parse error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidScopeKind(value) => ApiError::InvalidInput {
            field: String::from("scope_kind"),
            message: format!("'{value}' is not 'game' or 'place'"),
        },
        DomainError::InvalidMatchStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("'{value}' is not a match status"),
        },
    }
}
