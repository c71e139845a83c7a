//! Public facade over codec, guard and table.

use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::guard;
use crate::table::StateTable;
use crate::types::{StateKey, StateStats, Ttl, UiState};
use std::sync::Arc;
use tracing::{debug, trace};

/// Service configuration.
#[derive(Clone, Debug)]
pub struct StateServiceConfig {
    /// TTL applied when a store call does not give one.
    pub default_ttl: Ttl,
}

impl Default for StateServiceConfig {
    fn default() -> Self {
        Self {
            default_ttl: Ttl::DEFAULT,
        }
    }
}

/// The state store.
///
/// Hands out content-derived keys for UI states and resolves them back. The
/// default state is never stored; it maps to the sentinel (empty) key.
///
/// Construct one per process and share it by `Arc`; every method takes
/// `&self`.
#[derive(Debug)]
pub struct StateService {
    config: StateServiceConfig,
    table: StateTable,
}

impl StateService {
    /// Create a service on the system clock.
    pub fn new(config: StateServiceConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a service on the given clock.
    pub fn with_clock(config: StateServiceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            table: StateTable::with_clock(clock),
        }
    }

    /// Store a state and return its key.
    ///
    /// The default state returns the sentinel key without touching the table.
    /// Storing a state that is already present re-stamps its entry.
    pub fn store(&self, state: &UiState, ttl: Option<Ttl>) -> StateKey {
        self.table.sweep();

        if guard::is_default(state) {
            trace!("default state, returning sentinel key");
            return StateKey::sentinel();
        }

        let key = codec::key(state);
        let ttl = ttl.unwrap_or(self.config.default_ttl);
        self.table.put(key.clone(), state, ttl);
        debug!(key = %key, ttl_ms = ttl.as_millis(), "stored state");
        key
    }

    /// Resolve a key to its state.
    ///
    /// The sentinel always resolves to a fresh default state. Unknown and
    /// expired keys are `None`.
    pub fn retrieve(&self, key: &StateKey) -> Option<UiState> {
        if key.is_sentinel() {
            return Some(UiState::default());
        }
        self.table.get(key)
    }

    /// Resolve raw key text, e.g. a query parameter.
    ///
    /// Text that is not a well-formed key is a miss.
    pub fn resolve(&self, raw: &str) -> Option<UiState> {
        match raw.parse::<StateKey>() {
            Ok(key) => self.retrieve(&key),
            Err(e) => {
                debug!(error = %e, "unparseable state key");
                None
            }
        }
    }

    /// Replace the state behind `key` and return the key of the new state.
    ///
    /// Keys are content-derived, so the returned key generally differs from
    /// `key`. The old entry is left to expire on its own. Updating a key that
    /// no longer resolves is a miss and stores nothing; the sentinel key is
    /// always updatable.
    pub fn update(&self, key: &StateKey, new_state: &UiState, ttl: Option<Ttl>) -> Option<StateKey> {
        if !key.is_sentinel() && self.retrieve(key).is_none() {
            debug!(key = %key, "update of unknown or expired state");
            return None;
        }
        Some(self.store(new_state, ttl))
    }

    /// Live entry count and approximate size.
    pub fn stats(&self) -> StateStats {
        self.table.stats()
    }

    /// Drop every stored state.
    pub fn clear(&self) {
        self.table.clear();
    }

    pub fn default_ttl(&self) -> Ttl {
        self.config.default_ttl
    }
}

impl Default for StateService {
    fn default() -> Self {
        Self::new(StateServiceConfig::default())
    }
}
