//! Content-derived keys for UI states.
//!
//! A state is rendered to a canonical JSON string with every object's keys
//! sorted, hashed with SHA-256, and the hex digest truncated to
//! [`KEY_LEN`](crate::types::KEY_LEN) characters. Equal states always yield
//! equal keys, regardless of the order their filters were inserted in.

mod canonical;
mod digest;

pub use canonical::canonicalize;
pub use digest::digest;

use crate::types::{StateKey, UiState};

/// Derive the key of a state.
pub fn key(state: &UiState) -> StateKey {
    StateKey::from_digest(digest(&canonicalize(state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FormMode, SortDirection, Sorting};

    #[test]
    fn test_key_is_deterministic() {
        let state = UiState::default()
            .with_filter("status", "active")
            .with_sorting(Sorting::by("name", SortDirection::Descending));

        assert_eq!(key(&state), key(&state.clone()));
    }

    #[test]
    fn test_key_shape() {
        let state = UiState::default().with_form(FormMode::Create);
        let key = key(&state);

        assert_eq!(key.as_str().len(), 16);
        assert!(key.as_str().bytes().all(|b| b.is_ascii_hexdigit()));
        assert!(!key.is_sentinel());
    }

    #[test]
    fn test_distinct_states_get_distinct_keys() {
        let a = UiState::default().with_page(2, 50);
        let b = UiState::default().with_page(3, 50);
        assert_ne!(key(&a), key(&b));
    }
}
