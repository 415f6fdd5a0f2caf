use crate::dimension::Dimension;
use thiserror::Error;

/// Error type shared by every fallible operation in the crate.
///
/// All three kinds propagate to the caller unchanged; nothing is retried or
/// substituted internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A numeric component is outside its valid bound.
    #[error("{field} must be between {min} and {max}, got {value}")]
    Range {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    /// Input text could not be understood by the temporal engine.
    #[error("cannot parse {input:?} as a {expected}")]
    Parse {
        input: String,
        expected: &'static str,
    },

    /// An operation tried to observe or mutate the dimension this value type
    /// does not represent. Always a programming error, never transient.
    #[error(transparent)]
    Structural(#[from] StructuralViolation),
}

impl Error {
    pub(crate) const fn range(field: &'static str, min: i64, max: i64, value: i64) -> Self {
        Self::Range {
            field,
            min,
            max,
            value,
        }
    }

    pub(crate) fn parse(input: &str, dimension: Dimension) -> Self {
        Self::Parse {
            input: input.trim().to_string(),
            expected: dimension.noun(),
        }
    }
}

/// The ways a caller can cross the dimension boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralViolation {
    /// A format string named a specifier outside the dimension's allow-list.
    #[error(
        "format specifier {specifier:?} cannot be used on a {dimension} value{}",
        allowed_hint(.allowed)
    )]
    Specifier {
        specifier: char,
        dimension: Dimension,
        /// For time values, the full list of accepted specifiers.
        allowed: Option<&'static str>,
    },

    /// A modifier phrase named a keyword belonging to the other dimension.
    #[error(
        "modifier {phrase:?} adjusts the {} dimension, which a {dimension} value does not carry (keyword {keyword:?})",
        foreign(.dimension)
    )]
    Modifier {
        phrase: String,
        keyword: &'static str,
        dimension: Dimension,
    },

    /// A structural mutator belonging to the other dimension was called.
    #[error("{method} is never permitted on a {dimension} value")]
    Mutator {
        method: &'static str,
        dimension: Dimension,
    },
}

fn allowed_hint(allowed: &Option<&'static str>) -> String {
    match allowed {
        Some(list) => format!(" (allowed: {list})"),
        None => String::new(),
    }
}

fn foreign(dimension: &Dimension) -> Dimension {
    dimension.other()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_message_names_field_bound_and_value() {
        let err = Error::range("hour", 0, 23, 25);
        assert_eq!(err.to_string(), "hour must be between 0 and 23, got 25");
    }

    #[test]
    fn test_parse_message_names_input_and_dimension() {
        let err = Error::parse("  garbage  ", Dimension::Date);
        assert_eq!(err.to_string(), "cannot parse \"garbage\" as a calendar date");
    }

    #[test]
    fn test_specifier_message_includes_allowed_list_for_time() {
        let err = StructuralViolation::Specifier {
            specifier: 'Y',
            dimension: Dimension::Time,
            allowed: Some(crate::consts::TIME_ALLOWED_LIST),
        };
        let msg = err.to_string();
        assert!(msg.contains("'Y'"));
        assert!(msg.contains("time value"));
        assert!(msg.contains("allowed: a A B g G h H i s u v"));
    }

    #[test]
    fn test_specifier_message_has_no_hint_for_date() {
        let err = StructuralViolation::Specifier {
            specifier: 'H',
            dimension: Dimension::Date,
            allowed: None,
        };
        assert!(!err.to_string().contains("allowed"));
    }

    #[test]
    fn test_modifier_message_names_foreign_dimension() {
        let err = StructuralViolation::Modifier {
            phrase: "+1 day".to_string(),
            keyword: "day",
            dimension: Dimension::Time,
        };
        let msg = err.to_string();
        assert!(msg.contains("+1 day"));
        assert!(msg.contains("adjusts the date dimension"));
        assert!(msg.contains("\"day\""));
    }

    #[test]
    fn test_structural_wraps_transparently() {
        let inner = StructuralViolation::Mutator {
            method: "set_time",
            dimension: Dimension::Date,
        };
        let err: Error = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
    }
}
