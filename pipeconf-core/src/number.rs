//! Scalar text to unsigned integer conversion.
//!
//! Counts in a pipeline document (`workers`, `size`, `events`) are plain
//! decimal. Anything else is either coerced to zero or rejected, depending
//! on the [`NumberPolicy`].

/// What to do with count text that is not a non-negative decimal integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberPolicy {
    /// Store `0` for the field and keep going.
    #[default]
    Permissive,
    /// Fail the parse with `ParseError::InvalidNumber`.
    Strict,
}

/// Parse decimal text into an unsigned integer of width `T`.
///
/// Surrounding ASCII whitespace and a single leading `+` are accepted.
/// Returns `None` for empty text, any non-digit, a sign other than `+`,
/// or a value that does not fit in `T`.
pub fn parse_unsigned<T: TryFrom<u64>>(text: &str) -> Option<T> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() {
        return None;
    }

    let mut result: u64 = 0;
    for b in digits.bytes() {
        match b {
            b'0'..=b'9' => {
                result = result.checked_mul(10)?.checked_add((b - b'0') as u64)?;
            }
            _ => return None,
        }
    }

    T::try_from(result).ok()
}
