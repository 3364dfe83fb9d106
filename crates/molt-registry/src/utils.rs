//! String and decimal helpers.
//!
//! Used for function-name handling and for parsing numeric property values.
//! Only ASCII decimal digits are accepted when parsing: no sign, no whitespace,
//! no separators.

/// Returns true if both strings have the same content.
#[must_use]
pub fn compare_strings(a: &str, b: &str) -> bool {
    a == b
}

/// Concatenates two strings into a new one.
#[must_use]
pub fn concat(a: &str, b: &str) -> String {
    let mut out = String::with_capacity(a.len() + b.len());
    out.push_str(a);
    out.push_str(b);
    out
}

/// Canonical decimal representation of `n` (no leading zeros, `0` is `"0"`).
#[must_use]
pub fn uint_to_string(n: u64) -> String {
    n.to_string()
}

/// Parses a string made only of decimal digits.
///
/// Returns `None` for empty input, any non-digit character, or a value that
/// does not fit in a `u64`.
///
/// # Examples
/// ```
/// use molt_registry::utils::string_to_uint;
///
/// assert_eq!(string_to_uint("25"), Some(25));
/// assert_eq!(string_to_uint("007"), Some(7));
/// assert_eq!(string_to_uint("-5"), None);
/// assert_eq!(string_to_uint(""), None);
/// ```
#[must_use]
pub fn string_to_uint(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }

    s.bytes().try_fold(0u64, |acc, b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
    })
}

/// Pair form of [`string_to_uint`]: `(success, value)`.
///
/// `value` is `0` when `success` is false.
#[must_use]
pub fn string_to_uint_pair(s: &str) -> (bool, u64) {
    string_to_uint(s).map_or((false, 0), |v| (true, v))
}
