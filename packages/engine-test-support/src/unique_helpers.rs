//! Test helpers for generating unique test data
//!
//! This module provides utilities to help generate unique test data, ensuring
//! test isolation and avoiding conflicts between concurrently running tests.

use std::sync::atomic::{AtomicI64, Ordering};

use ulid::Ulid;

static NEXT_CHAT_ID: AtomicI64 = AtomicI64::new(7_000_000);

/// Generate a chat id no other test in this process has used.
///
/// Sessions are registered per chat, so every test that touches the shared
/// registry needs its own id.
pub fn unique_chat_id() -> i64 {
    NEXT_CHAT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use fabula_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("player");
/// let id2 = unique_str("player");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
