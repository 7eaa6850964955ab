//! Answer normalization.

/// Reduce an answer to its canonical form: lowercase ASCII letters and digits
/// only, every separator and symbol removed.
///
/// Total and idempotent. Non-ASCII letters are dropped after lowercasing, so
/// `"Café"` and `"caf"` share a form.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
