// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised when parsing or validating domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Scope kind string is not `game` or `place`.
    #[error("Invalid scope kind: '{0}'. Must be 'game' or 'place'")]
    InvalidScopeKind(String),
    /// Match status string is not recognized.
    #[error("Invalid match status: '{0}'")]
    InvalidMatchStatus(String),
}
