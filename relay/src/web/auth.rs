//! Shared-secret token verification.
//!
//! The webhook token is a static secret carried as a path segment.
//! The comparison is exact equality, done in constant time.

/// Compare a provided token against the configured secret.
///
/// Returns `true` only on an exact match. The comparison does not
/// short-circuit on the first differing byte.
pub fn token_matches(provided: &str, expected: &str) -> bool {
    if provided.len() != expected.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in provided.bytes().zip(expected.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
