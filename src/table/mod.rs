//! In-memory state table with lazy expiry.
//!
//! Entries carry their own TTL and are swept opportunistically at the start
//! of each operation. There is no background timer.

mod storage;

pub use storage::{StateTable, StoredEntry};
