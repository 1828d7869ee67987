// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process cache of loaded matches.
//!
//! Entries hold the stored match only. Status is resolved on every read, so
//! a cached entry never carries a stale status, only stale rows until the
//! workflows invalidate it.
//!
//! The cache holds at most [`DEFAULT_CAPACITY`] matches. Inserting a new
//! match into a full cache evicts an arbitrary entry; a later read of the
//! evicted match reloads it from the database.

use std::collections::HashMap;
use std::sync::Mutex;

use gamenight_api::{CacheError, CacheInvalidator};
use gamenight_domain::{Match, MatchId};
use tracing::{debug, warn};

/// Maximum number of cached matches.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Matches served by `GET /matches/{match_id}`, keyed by ID.
#[derive(Debug)]
pub struct MatchViewCache {
    entries: Mutex<HashMap<MatchId, Match>>,
    capacity: usize,
}

impl Default for MatchViewCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MatchViewCache {
    /// Creates a cache bounded to `capacity` matches. Zero disables caching.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    /// Returns a cached match, or `None` on a miss or a poisoned lock.
    pub fn get(&self, match_id: MatchId) -> Option<Match> {
        match self.entries.lock() {
            Ok(entries) => entries.get(&match_id).cloned(),
            Err(_) => {
                warn!(
                    match_id = match_id.value(),
                    "Match view cache lock poisoned"
                );
                None
            }
        }
    }

    /// Stores a freshly loaded match, evicting another one if full.
    pub fn insert(&self, game_match: Match) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() >= self.capacity && !entries.contains_key(&game_match.match_id) {
                let evicted: Option<MatchId> = entries.keys().next().copied();
                if let Some(evicted) = evicted {
                    entries.remove(&evicted);
                    debug!(match_id = evicted.value(), "Evicted cached match");
                }
            }
            debug!(match_id = game_match.match_id.value(), "Caching match");
            entries.insert(game_match.match_id, game_match);
        }
    }
}

impl CacheInvalidator for MatchViewCache {
    fn invalidate_match(&self, match_id: MatchId) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CacheError(String::from("match view cache lock poisoned")))?;

        if entries.remove(&match_id).is_some() {
            debug!(match_id = match_id.value(), "Invalidated cached match");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use time::macros::datetime;

    fn create_test_match(id: i64) -> Match {
        Match {
            match_id: MatchId::new(id),
            game_id: 1,
            place_id: 1,
            start_at: datetime!(2026-05-02 19:00 UTC),
            end_at: datetime!(2026-05-02 22:00 UTC),
            winner_profile_id: None,
            participants: Vec::new(),
        }
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = MatchViewCache::default();
        assert!(cache.get(MatchId::new(1)).is_none());

        cache.insert(create_test_match(1));

        assert_eq!(cache.get(MatchId::new(1)), Some(create_test_match(1)));
    }

    #[test]
    fn test_invalidate_removes_only_that_match() {
        let cache = MatchViewCache::default();
        cache.insert(create_test_match(1));
        cache.insert(create_test_match(2));

        cache.invalidate_match(MatchId::new(1)).unwrap();

        assert!(cache.get(MatchId::new(1)).is_none());
        assert!(cache.get(MatchId::new(2)).is_some());
    }

    #[test]
    fn test_invalidate_missing_entry_is_ok() {
        let cache = MatchViewCache::default();
        assert!(cache.invalidate_match(MatchId::new(9)).is_ok());
    }

    #[test]
    fn test_full_cache_evicts_to_stay_within_capacity() {
        let cache = MatchViewCache::with_capacity(2);
        for id in 1..=5 {
            cache.insert(create_test_match(id));
        }

        let cached = (1..=5)
            .filter(|id| cache.get(MatchId::new(*id)).is_some())
            .count();
        assert_eq!(cached, 2);
        assert!(cache.get(MatchId::new(5)).is_some());
    }

    #[test]
    fn test_refreshing_cached_match_when_full_keeps_others() {
        let cache = MatchViewCache::with_capacity(2);
        cache.insert(create_test_match(1));
        cache.insert(create_test_match(2));

        let mut refreshed = create_test_match(2);
        refreshed.winner_profile_id = Some(gamenight_domain::ProfileId::new(7));
        cache.insert(refreshed.clone());

        assert!(cache.get(MatchId::new(1)).is_some());
        assert_eq!(cache.get(MatchId::new(2)), Some(refreshed));
    }

    #[test]
    fn test_zero_capacity_caches_nothing() {
        let cache = MatchViewCache::with_capacity(0);
        cache.insert(create_test_match(1));
        assert!(cache.get(MatchId::new(1)).is_none());
    }
}
