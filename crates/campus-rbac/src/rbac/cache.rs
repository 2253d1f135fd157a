// Campus RBAC
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Per-role memoization of derived permission sets

use crate::rbac::permissions::{PermissionSet, permissions_for};
use crate::rbac::roles::Role;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

/// Cache statistics for monitoring
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Total cache hits
    pub hits: u64,

    /// Total cache misses
    pub misses: u64,

    /// Current cache size
    pub current_size: usize,
}

impl CacheStats {
    /// Calculate hit ratio
    pub fn hit_ratio(&self) -> f64 {
        if self.hits + self.misses == 0 { 0.0 } else { self.hits as f64 / (self.hits + self.misses) as f64 }
    }
}

/// Memoizes [`permissions_for`] per role.
///
/// Entries never go stale: a permission set is a pure function of its role.
#[derive(Debug, Default)]
pub struct PermissionCache {
    entries: DashMap<Role, PermissionSet>,
    stats: RwLock<CacheStats>,
}

impl PermissionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the permission set for `role`, deriving it on first use
    pub fn get_or_derive(&self, role: Role) -> PermissionSet {
        // Copy out before touching stats so no shard guard is held across locks.
        let cached = self.entries.get(&role).map(|entry| *entry);
        if let Some(permissions) = cached {
            self.stats.write().hits += 1;
            return permissions;
        }

        let permissions = *self.entries.entry(role).or_insert_with(|| permissions_for(role));
        let size = self.entries.len();

        let mut stats = self.stats.write();
        stats.misses += 1;
        stats.current_size = size;
        debug!(role = %role, "Permission set derived and cached");

        permissions
    }

    /// Drop all entries and reset statistics
    pub fn clear(&self) {
        self.entries.clear();
        *self.stats.write() = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_cache_hit_and_miss() {
        let cache = PermissionCache::new();

        let first = cache.get_or_derive(Role::Teacher);
        let second = cache.get_or_derive(Role::Teacher);
        assert_eq!(first, second);
        assert_eq!(first, permissions_for(Role::Teacher));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.current_size, 1);
        assert!((stats.hit_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cache_clear() {
        let cache = PermissionCache::new();
        for role in Role::ALL {
            cache.get_or_derive(role);
        }
        assert_eq!(cache.len(), 6);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.stats().hit_ratio(), 0.0);
    }

    #[test]
    fn test_concurrent_readers_agree() {
        let cache = Arc::new(PermissionCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    let role = Role::ALL[i % Role::ALL.len()];
                    (role, cache.get_or_derive(role))
                })
            })
            .collect();

        for handle in handles {
            let (role, permissions) = handle.join().unwrap();
            assert_eq!(permissions, permissions_for(role));
        }
        assert!(cache.len() <= Role::ALL.len());
    }
}
