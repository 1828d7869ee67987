// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Stored representation of a profile.
///
/// The role is kept as its stored string; the api layer parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileData {
    pub profile_id: i64,
    pub display_name: String,
    pub role: String,
    pub created_at: String,
}

/// Stored representation of a permission grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantData {
    pub grant_id: i64,
    pub profile_id: i64,
    pub action: String,
    pub scope_kind: String,
    pub scope_id: i64,
}
