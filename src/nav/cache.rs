//! Navigation cache.
//!
//! Holds at most one built view per context key. A lookup only ever matches
//! the exact key it was stored under.

use super::hierarchy::View;
use super::view_state::ContextKey;
use chrono::{DateTime, Utc};
use log::*;
use std::collections::HashMap;
use std::sync::Arc;

/// A built view and the moment it was stored.
///
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub view: Arc<View>,
    pub built_at: DateTime<Utc>,
}

/// Memoizes built views per context key.
///
#[derive(Debug, Default)]
pub struct NavigationCache {
    entries: HashMap<ContextKey, CacheEntry>,
}

impl NavigationCache {
    pub fn new() -> Self {
        NavigationCache::default()
    }

    /// Returns the view stored under exactly this key.
    ///
    pub fn lookup(&self, key: &ContextKey) -> Option<Arc<View>> {
        self.entries.get(key).map(|e| Arc::clone(&e.view))
    }

    /// Returns the entry stored under exactly this key.
    ///
    pub fn entry(&self, key: &ContextKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Store a view, replacing any previous entry for the key.
    ///
    pub fn store(&mut self, key: ContextKey, view: Arc<View>) {
        debug!("Caching view for {}", key);
        self.entries.insert(
            key,
            CacheEntry {
                view,
                built_at: Utc::now(),
            },
        );
    }

    /// Drop the entry for the key. Returns true if one existed.
    ///
    pub fn evict(&mut self, key: &ContextKey) -> bool {
        let evicted = self.entries.remove(key).is_some();
        if evicted {
            debug!("Evicted cached view for {}", key);
        }
        evicted
    }

    /// Iterate over the cached keys and views.
    ///
    pub fn iter(&self) -> impl Iterator<Item = (&ContextKey, &Arc<View>)> {
        self.entries.iter().map(|(k, e)| (k, &e.view))
    }

    /// Replace the view under the key with a modified copy. Does nothing if
    /// the key is not cached.
    ///
    pub fn update(&mut self, key: &ContextKey, modify: impl FnOnce(&mut View)) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                let mut view = (*entry.view).clone();
                modify(&mut view);
                entry.view = Arc::new(view);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
