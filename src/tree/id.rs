//! Node identifier generation

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-wide sequence so ids minted within the same millisecond differ
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Length of the random suffix
const SUFFIX_LEN: usize = 6;

/// Mint a fresh node id: `<millis>-<sequence>-<random>`.
///
/// Leaves and groups share this namespace.
pub fn fresh_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();

    format!("{}-{:x}-{}", millis, seq, suffix.to_ascii_lowercase())
}
