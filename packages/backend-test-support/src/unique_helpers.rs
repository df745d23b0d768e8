//! Test helpers for generating unique test data

use rand::Rng;

/// Generate a random positive Telegram user id.
///
/// Ids are drawn from a range far above anything the tests hardcode, so a
/// generated id never collides with a fixture id.
pub fn unique_telegram_id() -> i64 {
    rand::rng().random_range(10_000_000_000..90_000_000_000)
}

/// Generate a unique string with the given prefix, e.g. `user-1a2b3c4d`.
pub fn unique_str(prefix: &str) -> String {
    let suffix: u32 = rand::rng().random();
    format!("{prefix}-{suffix:08x}")
}
