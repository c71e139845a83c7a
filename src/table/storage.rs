//! State table implementation.

use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::types::{StateKey, StateStats, Timestamp, Ttl, UiState};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A stored state with its expiry bookkeeping.
///
/// The entry owns its own copy of the state; callers only ever see clones.
#[derive(Clone, Debug)]
pub struct StoredEntry {
    state: UiState,
    inserted_at: Timestamp,
    ttl: Ttl,
    /// Key length plus canonical state length.
    size_bytes: usize,
}

impl StoredEntry {
    fn new(key: &StateKey, state: &UiState, inserted_at: Timestamp, ttl: Ttl) -> Self {
        let size_bytes = key.as_str().len() + codec::canonicalize(state).len();
        Self {
            state: state.clone(),
            inserted_at,
            ttl,
            size_bytes,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn inserted_at(&self) -> Timestamp {
        self.inserted_at
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// An entry is live while `now - inserted_at <= ttl`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.millis_since(self.inserted_at) > self.ttl.as_millis()
    }
}

/// Key to state mapping guarded by a single mutex.
///
/// Every public method holds the lock for its whole duration, so each one is
/// atomic with respect to the others. Nothing here blocks on I/O.
pub struct StateTable {
    entries: Mutex<HashMap<StateKey, StoredEntry>>,
    clock: Arc<dyn Clock>,
}

impl StateTable {
    /// Create an empty table on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty table on the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Insert or replace the entry at `key`, stamped with the current time.
    pub fn put(&self, key: StateKey, state: &UiState, ttl: Ttl) {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        sweep_locked(&mut entries, now);

        let entry = StoredEntry::new(&key, state, now, ttl);
        if entries.insert(key.clone(), entry).is_some() {
            trace!(key = %key, ttl_ms = ttl.as_millis(), "replaced state entry");
        } else {
            trace!(key = %key, ttl_ms = ttl.as_millis(), "inserted state entry");
        }
    }

    /// Look up a live entry, returning a copy of its state.
    pub fn get(&self, key: &StateKey) -> Option<UiState> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        sweep_locked(&mut entries, now);

        let state = entries.get(key).map(|entry| entry.state.clone());
        trace!(key = %key, hit = state.is_some(), "state lookup");
        state
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        sweep_locked(&mut self.entries.lock(), now)
    }

    /// Drop every entry, expired or not.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        let removed = entries.len();
        entries.clear();
        debug!(removed, "cleared state table");
    }

    /// Live entry count and approximate size, after a sweep.
    pub fn stats(&self) -> StateStats {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        sweep_locked(&mut entries, now);

        StateStats {
            count: entries.len(),
            approximate_size_bytes: entries.values().map(|entry| entry.size_bytes).sum(),
        }
    }

    /// Physical entry count, including expired entries not yet swept.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Current time according to the table's clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

impl Default for StateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTable")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

fn sweep_locked(entries: &mut HashMap<StateKey, StoredEntry>, now: Timestamp) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired(now));
    let removed = before - entries.len();
    if removed > 0 {
        debug!(removed, remaining = entries.len(), "swept expired state entries");
    }
    removed
}
