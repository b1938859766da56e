//! Utility functions used across the library.

/// Strip `suffix` from the end of `name`, comparing ASCII case-insensitively.
///
/// Returns `None` when `name` does not end with `suffix`. Never splits a
/// multi-byte character.
#[inline]
#[must_use]
pub fn strip_suffix_ignore_ascii_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let tail = name.get(split..)?;
    if tail.eq_ignore_ascii_case(suffix) {
        name.get(..split)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_suffix_cases() {
        assert_eq!(strip_suffix_ignore_ascii_case("a.ENC", ".enc"), Some("a"));
        assert_eq!(strip_suffix_ignore_ascii_case(".enc", ".enc"), Some(""));
        assert_eq!(strip_suffix_ignore_ascii_case("enc", ".enc"), None);
        assert_eq!(strip_suffix_ignore_ascii_case("a.mp4", ".enc"), None);
        // 'é' is two bytes, the split would land inside it.
        assert_eq!(strip_suffix_ignore_ascii_case("é", "x"), None);
    }
}
