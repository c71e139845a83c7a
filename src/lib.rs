//! # State Stash
//!
//! An in-memory, content-addressed store for UI list state: view mode,
//! filters, sorting, pagination. Callers hand over a state and get back a
//! short opaque key suitable for a URL; resolving the key later returns the
//! state, until its TTL runs out.
//!
//! ## Core Concepts
//!
//! - **Keys**: SHA-256 of the canonical state, truncated to 16 hex characters
//! - **Default state**: never stored, always resolves via the empty key
//! - **Expiry**: per-entry TTL, swept lazily before each operation
//! - **Update**: re-keys by content; the old key is left to expire
//!
//! ## Example
//!
//! ```
//! use statestash::{StateService, StateServiceConfig, UiState};
//!
//! let service = StateService::new(StateServiceConfig::default());
//!
//! let state = UiState::default().with_filter("status", "active");
//! let key = service.store(&state, None);
//! assert_eq!(service.retrieve(&key), Some(state));
//!
//! // The default state needs no storage
//! assert!(service.store(&UiState::default(), None).is_sentinel());
//! ```

pub mod clock;
pub mod codec;
pub mod error;
pub mod guard;
pub mod service;
pub mod table;
pub mod types;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, StateError};
pub use service::{StateService, StateServiceConfig};
pub use table::{StateTable, StoredEntry};
pub use types::*;
