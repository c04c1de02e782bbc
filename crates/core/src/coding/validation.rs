//! Code segment validation rules.
//!
//! Group and class codes are single digits in 1-9; subclass and detail
//! codes are two digits in 01-99. A segment must have exactly the
//! level's width, so "1" is not a valid subclass code and "00" fails
//! the range check even though it has the right length.

use super::error::CodingError;
use super::types::CodingLevel;

/// Validates a proposed code segment for a level.
///
/// # Errors
///
/// Returns `CodingError::InvalidSegment` when the segment has the wrong
/// length, contains non-digit characters, or is outside the level's
/// numeric range.
pub fn validate_segment(level: CodingLevel, code: &str) -> Result<(), CodingError> {
    let invalid = || CodingError::InvalidSegment {
        level,
        code: code.to_string(),
    };

    if code.len() != level.segment_width() {
        return Err(invalid());
    }
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let value: u32 = code.parse().map_err(|_| invalid())?;
    if value < 1 || value > level.max_value() {
        return Err(invalid());
    }

    Ok(())
}

/// Parses a validated segment into its numeric value.
///
/// Returns `None` for segments that do not parse as numbers; callers
/// computing suggestions skip such siblings.
#[must_use]
pub fn segment_value(code: &str) -> Option<u32> {
    code.parse().ok()
}

/// Suggests the next code for a level given the sibling codes already in
/// use: `max(siblings) + 1`, clamped to the level cap and zero-padded.
///
/// The suggestion is a pre-fill only. When the maximum sibling already
/// sits at the cap the suggestion collides and the add still fails
/// sibling-uniqueness validation.
#[must_use]
pub fn next_segment<'a, I>(level: CodingLevel, siblings: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = siblings
        .into_iter()
        .filter_map(segment_value)
        .max()
        .unwrap_or(0);

    level.format_segment((max + 1).min(level.max_value()))
}
