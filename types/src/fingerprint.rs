//! Content fingerprinting for change detection.
//!
//! Not a cryptographic digest: the only consumer is the
//! compare-then-write discipline that skips redundant system-context
//! injections and UI-snapshot writes. Collisions merely cost one redundant
//! rebuild.

/// Deterministic 32-bit rolling hash of `s`, rendered as a decimal string.
///
/// Runs over UTF-16 code units with wrapping `h = h * 31 + unit`
/// arithmetic, so identical input always yields an identical fingerprint
/// across runs and platforms.
#[must_use]
pub fn fingerprint(s: &str) -> String {
    let mut h: i32 = 0;
    for unit in s.encode_utf16() {
        h = h
            .wrapping_shl(5)
            .wrapping_sub(h)
            .wrapping_add(i32::from(unit));
    }
    h.to_string()
}
