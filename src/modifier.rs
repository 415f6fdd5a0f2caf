//! Relative-modifier validation.
//!
//! Before a modifier phrase ("+1 day", "next monday", "+30 minutes") is
//! forwarded to the engine, it is checked against the keyword table of the
//! *opposite* dimension: a date value must not be nudged by clock keywords,
//! a time value must not be nudged by calendar keywords. Matching is
//! whole-word over the lowercased phrase, so "monday" inside "mondays" does
//! not trigger.
//!
//! This is a heuristic filter, not a grammar check: the keyword tables are
//! necessarily incomplete against everything the engine can parse. Phrases
//! that slip through are still harmless, since the normalizer pins the
//! foreign dimension back to its reference after every mutation.

use crate::consts::{DATE_KEYWORDS, TIME_KEYWORDS};
use crate::dimension::Dimension;
use crate::error::{Error, StructuralViolation};

/// Checks that `phrase` does not name a relative-adjustment keyword of the
/// dimension `dimension` does not carry.
///
/// Runs before the engine is invoked; a rejected phrase never reaches it.
///
/// # Errors
/// Returns [`StructuralViolation::Modifier`] naming the phrase and the first
/// matched keyword.
pub fn validate_modifier(phrase: &str, dimension: Dimension) -> Result<(), Error> {
    let blocked: &[&str] = match dimension {
        Dimension::Date => TIME_KEYWORDS,
        Dimension::Time => DATE_KEYWORDS,
    };
    let lowered = phrase.to_lowercase();
    // Words are maximal alphanumeric runs; "+1 day" yields "1" and "day",
    // while "mondays" stays a single non-matching word.
    for word in lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        if let Some(&keyword) = blocked.iter().find(|&&kw| kw == word) {
            return Err(StructuralViolation::Modifier {
                phrase: phrase.to_string(),
                keyword,
                dimension,
            }
            .into());
        }
    }
    Ok(())
}
