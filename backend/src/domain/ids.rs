//! Item id and timestamp generation.
//!
//! Uses chrono rather than `SystemTime`, which is unavailable on wasm32.

use chrono::Utc;
use shared::ExpenseItem;
use uuid::Uuid;

const SUFFIX_LEN: usize = 9;

/// Milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Current time as an RFC 3339 string
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Short random suffix that keeps ids unique within the same millisecond
pub fn random_suffix() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(SUFFIX_LEN);
    suffix
}

/// Fresh item id, e.g. "fix_1760781234567_3f9a0c21b"
pub fn new_item_id(prefix: &str) -> String {
    ExpenseItem::generate_id(prefix, now_millis(), &random_suffix())
}
