//! Format-string validation.
//!
//! Format strings use single-letter output specifiers. Before a string is
//! handed to the engine's renderer it is scanned here, left to right, against
//! the allow/deny tables in [`crate::consts`]: a date value must not name a
//! time, timezone, or composite specifier, and a time value must not name a
//! date, timezone, or composite specifier. A backslash escapes the following
//! character, which is emitted literally and never checked. Characters in no
//! table at all pass through untouched.

use crate::consts::{
    COMPOSITE_SPECIFIERS, DATE_SPECIFIERS, FORMAT_ESCAPE, TIMEZONE_SPECIFIERS, TIME_ALLOWED_LIST,
    TIME_SPECIFIERS,
};
use crate::dimension::Dimension;
use crate::error::{Error, StructuralViolation};

/// Checks that `spec` only names specifiers the given dimension may render.
///
/// Runs before the engine's formatter; a rejected string never reaches it.
///
/// # Errors
/// Returns [`StructuralViolation::Specifier`] naming the first offending
/// character. For time values the error also carries the allowed list.
pub fn validate_format(spec: &str, dimension: Dimension) -> Result<(), Error> {
    let mut chars = spec.chars();
    while let Some(ch) = chars.next() {
        if ch == FORMAT_ESCAPE {
            // Escaped character: consumed, emitted literally, not checked.
            chars.next();
            continue;
        }
        let blocked = TIMEZONE_SPECIFIERS.contains(&ch)
            || COMPOSITE_SPECIFIERS.contains(&ch)
            || match dimension {
                Dimension::Date => TIME_SPECIFIERS.contains(&ch),
                Dimension::Time => DATE_SPECIFIERS.contains(&ch),
            };
        if blocked {
            return Err(StructuralViolation::Specifier {
                specifier: ch,
                dimension,
                allowed: match dimension {
                    Dimension::Date => None,
                    Dimension::Time => Some(TIME_ALLOWED_LIST),
                },
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_char(spec: &str, dimension: Dimension) -> char {
        match validate_format(spec, dimension) {
            Err(Error::Structural(StructuralViolation::Specifier { specifier, .. })) => specifier,
            other => panic!("expected specifier rejection for {spec:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_date_accepts_every_date_specifier() {
        for &ch in DATE_SPECIFIERS {
            assert!(
                validate_format(&ch.to_string(), Dimension::Date).is_ok(),
                "date specifier {ch:?} should be accepted on dates"
            );
        }
    }

    #[test]
    fn test_time_accepts_every_time_specifier() {
        for &ch in TIME_SPECIFIERS {
            assert!(
                validate_format(&ch.to_string(), Dimension::Time).is_ok(),
                "time specifier {ch:?} should be accepted on times"
            );
        }
    }

    #[test]
    fn test_date_rejects_full_forbidden_set() {
        // Time + timezone + composite specifiers, all forbidden on a date.
        let forbidden = [
            'H', 'h', 'G', 'g', 'i', 's', 'u', 'v', 'a', 'A', 'B', 'e', 'I', 'O', 'P', 'p', 'T',
            'Z', 'c', 'r', 'U',
        ];
        for ch in forbidden {
            assert_eq!(rejected_char(&ch.to_string(), Dimension::Date), ch);
        }
    }

    #[test]
    fn test_time_rejects_full_forbidden_set() {
        // Date + timezone + composite specifiers, all forbidden on a time.
        let forbidden = [
            'Y', 'y', 'm', 'n', 'd', 'j', 'D', 'l', 'N', 'S', 'w', 'z', 'W', 'F', 'M', 't', 'L',
            'o', 'e', 'I', 'O', 'P', 'p', 'T', 'Z', 'c', 'r', 'U',
        ];
        for ch in forbidden {
            assert_eq!(rejected_char(&ch.to_string(), Dimension::Time), ch);
        }
    }

    #[test]
    fn test_rejection_names_first_offending_character() {
        assert_eq!(rejected_char("Y-m-d H:i", Dimension::Date), 'H');
        assert_eq!(rejected_char("H:i:s d", Dimension::Time), 'd');
    }

    #[test]
    fn test_time_rejection_carries_allowed_list() {
        match validate_format("Y", Dimension::Time) {
            Err(Error::Structural(StructuralViolation::Specifier { allowed, .. })) => {
                assert_eq!(allowed, Some(TIME_ALLOWED_LIST));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_date_rejection_carries_no_allowed_list() {
        match validate_format("H", Dimension::Date) {
            Err(Error::Structural(StructuralViolation::Specifier { allowed, .. })) => {
                assert_eq!(allowed, None);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_escaped_forbidden_characters_are_accepted() {
        for &ch in TIME_SPECIFIERS {
            let spec = format!("\\{ch}");
            assert!(
                validate_format(&spec, Dimension::Date).is_ok(),
                "escaped {ch:?} should be accepted on dates"
            );
        }
        for &ch in DATE_SPECIFIERS {
            let spec = format!("\\{ch}");
            assert!(
                validate_format(&spec, Dimension::Time).is_ok(),
                "escaped {ch:?} should be accepted on times"
            );
        }
        assert!(validate_format("\\U\\c\\r Y-m-d", Dimension::Date).is_ok());
    }

    #[test]
    fn test_escape_only_covers_the_next_character() {
        // First H is escaped, the second is not.
        assert_eq!(rejected_char("\\HH", Dimension::Date), 'H');
    }

    #[test]
    fn test_trailing_escape_is_harmless() {
        assert!(validate_format("Y-m-d\\", Dimension::Date).is_ok());
    }

    #[test]
    fn test_unrecognized_characters_pass_through() {
        assert!(validate_format("Y-m-d (jS of F)", Dimension::Date).is_ok());
        assert!(validate_format("[H:i:s] ~ !", Dimension::Time).is_ok());
        assert!(validate_format("", Dimension::Date).is_ok());
    }
}
