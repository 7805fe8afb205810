//! Object key conventions.
//!
//! Pure string functions with no storage SDK dependency. These define the
//! canonical layout of documents in the Amparo bucket.

use uuid::Uuid;

/// Whether `segment` is safe as one path component of a key: non-empty,
/// at most 128 bytes, and only ASCII letters, digits, `-`, `_`, `.` or `@`.
pub fn is_key_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment.len() <= 128
        && segment != "."
        && segment != ".."
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'@'))
}

pub const SESSIONS_PREFIX: &str = "sessions/";

pub fn session(id: Uuid) -> String {
    format!("sessions/{id}.json")
}

pub fn interactions_prefix(session_id: Uuid) -> String {
    format!("interactions/{session_id}/")
}

/// Interactions are keyed by creation time so a prefix listing returns them
/// in order.
pub fn interaction(session_id: Uuid, created_at: jiff::Timestamp, id: Uuid) -> String {
    format!(
        "interactions/{session_id}/{:020}-{id}.json",
        created_at.as_millisecond()
    )
}

pub fn assessments_prefix(user_id: &str) -> String {
    format!("assessments/{user_id}/")
}

/// Assessments are keyed by a countdown from the end of time, so a prefix
/// listing returns the newest first and a history page needs only `limit`
/// keys.
pub fn assessment(user_id: &str, created_at: jiff::Timestamp, id: Uuid) -> String {
    let countdown = i64::MAX - created_at.as_millisecond().max(0);
    format!("assessments/{user_id}/{countdown:019}-{id}.json")
}

pub fn eea_entry(session_id: Uuid, id: Uuid) -> String {
    format!("eea/{session_id}/{id}.json")
}

pub const THERAPISTS_PREFIX: &str = "therapists/";

pub fn therapist(id: Uuid) -> String {
    format!("therapists/{id}.json")
}
