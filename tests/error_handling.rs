//! Error handling and edge case tests.

use statestash::{StateError, StateKey, StateService, StateServiceConfig, Ttl, UiState};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// --- Input Errors ---

#[test]
fn test_zero_ttl_is_rejected() {
    assert!(matches!(Ttl::from_millis(0), Err(StateError::InvalidTtl(0))));
    assert!(matches!(Ttl::from_secs(0), Err(StateError::InvalidTtl(0))));
    assert!(matches!(
        Ttl::try_from(Duration::ZERO),
        Err(StateError::InvalidTtl(0))
    ));
}

#[test]
fn test_huge_ttl_saturates() {
    let ttl = Ttl::from_secs(u64::MAX).unwrap();
    assert_eq!(ttl.as_millis(), u64::MAX);

    let service = StateService::default();
    let key = service.store(&UiState::default().with_page(2, 50), Some(ttl));
    assert!(service.retrieve(&key).is_some());
}

#[test]
fn test_malformed_keys() {
    for raw in ["abc", "zzzzzzzzzzzzzzzz", "0123456789abcdef00", " 0123456789abcdef"] {
        let err = raw.parse::<StateKey>().unwrap_err();
        assert_eq!(err, StateError::InvalidKey(raw.to_string()));
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        StateError::InvalidTtl(0).to_string(),
        "Invalid TTL: 0ms (must be at least 1ms)"
    );
    assert_eq!(
        StateError::InvalidKey("x".into()).to_string(),
        "Invalid state key: \"x\""
    );
}

// --- Misses Are Not Errors ---

#[test]
fn test_unknown_well_formed_key_misses() {
    let service = StateService::default();
    let key: StateKey = "ffffffffffffffff".parse().unwrap();

    assert!(service.retrieve(&key).is_none());
    assert!(service.update(&key, &UiState::default(), None).is_none());
}

#[test]
fn test_resolve_garbage_misses() {
    let service = StateService::default();
    assert!(service.resolve("%%%").is_none());
    assert!(service.resolve("../../etc/passwd").is_none());
}

#[test]
fn test_uppercase_key_resolves() {
    let service = StateService::default();
    let state = UiState::default().with_page(7, 50);
    let key = service.store(&state, None);

    assert_eq!(service.resolve(&key.as_str().to_uppercase()), Some(state));
}

#[test]
fn test_clear_on_empty_service() {
    let service = StateService::default();
    service.clear();
    assert_eq!(service.stats().count, 0);
}

// --- Concurrency ---

#[test]
fn test_concurrent_store_and_retrieve() {
    let service = Arc::new(StateService::new(StateServiceConfig::default()));

    let handles: Vec<_> = (0..8u32)
        .map(|worker| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for page in 0..50u32 {
                    let state = UiState::default().with_page(worker * 100 + page + 2, 25);
                    let key = service.store(&state, None);
                    assert_eq!(service.retrieve(&key), Some(state));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.stats().count, 8 * 50);
}

#[test]
fn test_concurrent_same_state_dedupes() {
    let service = Arc::new(StateService::default());
    let state = UiState::default().with_filter("genre", "fantasy");

    let keys: Vec<StateKey> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            let state = state.clone();
            thread::spawn(move || service.store(&state, None))
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert!(keys.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(service.stats().count, 1);
}
