//! The generic canonical-value core.
//!
//! One implementation of parsing, normalization, formatting, modification,
//! arithmetic, and comparison, instantiated once per axis. The public types
//! in [`crate::date`] and [`crate::time`] are thin wrappers over this core:
//! the immutable ones hand out new cores, the mutable ones overwrite their
//! own. Every constructor and every mutation funnels through
//! [`Canonical::new`], so the dimension invariant (pinned foreign fields,
//! bounded year) holds by construction.

use crate::consts::{MAX_YEAR, MIN_YEAR};
use crate::dimension::Axis;
use crate::engine;
use crate::error::Error;
use crate::format::validate_format;
use crate::modifier::validate_modifier;
use chrono::{Datelike, FixedOffset, NaiveDateTime, TimeDelta};
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Canonical<A: Axis> {
    moment: NaiveDateTime,
    _axis: PhantomData<A>,
}

/// Duration negation without the panic `-TimeDelta::MIN` would cause.
pub(crate) fn negated(delta: TimeDelta) -> TimeDelta {
    TimeDelta::zero()
        .checked_sub(&delta)
        .unwrap_or(TimeDelta::MAX)
}

impl<A: Axis> Canonical<A> {
    /// Pin an arbitrary full moment onto this axis and check the year bound.
    ///
    /// # Errors
    /// Returns [`Error::Range`] if the pinned year leaves `MIN_YEAR..=MAX_YEAR`
    /// (only reachable on the date axis; the time axis pins the epoch day).
    pub(crate) fn new(moment: NaiveDateTime) -> Result<Self, Error> {
        let pinned = A::normalize(moment);
        let year = pinned.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::range(
                "year",
                i64::from(MIN_YEAR),
                i64::from(MAX_YEAR),
                i64::from(year),
            ));
        }
        Ok(Self {
            moment: pinned,
            _axis: PhantomData,
        })
    }

    /// Free-form construction through the engine adapter. The offset only
    /// anchors relative terms like "tomorrow".
    pub(crate) fn parse(text: &str, offset: FixedOffset) -> Result<Self, Error> {
        engine::parse(text, A::DIMENSION, offset)
            .and_then(Self::new)
            .map_err(|err| match err {
                // A parsed moment outside the year bound still reads, to the
                // caller, as unparseable input.
                Error::Range { .. } => Error::parse(text, A::DIMENSION),
                other => other,
            })
    }

    /// Current-moment factory. The wall clock always yields an in-bound year,
    /// so this is total.
    pub(crate) fn now(offset: FixedOffset) -> Self {
        Self {
            moment: A::normalize(engine::now_in(offset)),
            _axis: PhantomData,
        }
    }

    pub(crate) const fn moment(&self) -> NaiveDateTime {
        self.moment
    }

    /// Fixed-width canonical string; the sole comparison and persistence form.
    pub(crate) fn canonical(&self) -> String {
        A::canonical(&self.moment)
    }

    pub(crate) fn display(&self) -> String {
        A::display(&self.moment)
    }

    /// Validate the format string for this axis, then render.
    pub(crate) fn format(&self, spec: &str) -> Result<String, Error> {
        validate_format(spec, A::DIMENSION)?;
        Ok(engine::render(&self.moment, spec))
    }

    /// Validate the modifier phrase for this axis, apply it through the
    /// engine, and re-pin the result.
    pub(crate) fn modify(&self, phrase: &str) -> Result<Self, Error> {
        validate_modifier(phrase, A::DIMENSION)?;
        engine::apply_modifier(self.moment, phrase).and_then(Self::new)
    }

    /// Apply a duration. The delta may carry magnitudes of both dimensions;
    /// re-pinning discards the foreign part. On the time axis this wraps
    /// modulo one day, on the date axis it can run out of the year bound.
    pub(crate) fn shift(&self, delta: TimeDelta) -> Result<Self, Error> {
        let moved = match self.moment.checked_add_signed(delta) {
            Some(moved) => moved,
            // Saturate past the engine's own span; the year bound check
            // below turns it into the same range error either way.
            None if delta > TimeDelta::zero() => NaiveDateTime::MAX,
            None => NaiveDateTime::MIN,
        };
        Self::new(moved)
    }

    /// Total variant of [`Canonical::shift`] for axes whose normalization
    /// pins the year (the time axis): the result wraps instead of failing.
    pub(crate) fn wrapping_shift(&self, delta: TimeDelta) -> Self {
        let moved = match self.moment.checked_add_signed(delta) {
            Some(moved) => moved,
            None if delta > TimeDelta::zero() => NaiveDateTime::MAX,
            None => NaiveDateTime::MIN,
        };
        Self {
            moment: A::normalize(moved),
            _axis: PhantomData,
        }
    }

    // Canonical strings are fixed-width and zero-padded, so lexicographic
    // order coincides with calendar/clock order.

    pub(crate) fn is_before(&self, other: &Self) -> bool {
        self.canonical() < other.canonical()
    }

    pub(crate) fn is_after(&self, other: &Self) -> bool {
        self.canonical() > other.canonical()
    }

    pub(crate) fn is_same_as(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::{DateAxis, TimeAxis};
    use crate::error::StructuralViolation;
    use chrono::{NaiveDate, Offset, Utc};

    fn moment(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[test]
    fn test_new_pins_the_foreign_dimension() {
        let date = Canonical::<DateAxis>::new(moment("2025-01-15 14:30:45")).unwrap();
        assert_eq!(date.canonical(), "2025-01-15");
        assert_eq!(date.moment().time(), chrono::NaiveTime::default());

        let time = Canonical::<TimeAxis>::new(moment("2025-01-15 14:30:45.000007")).unwrap();
        assert_eq!(time.canonical(), "14:30:45.000007");
        assert_eq!(time.moment().date(), NaiveDate::default());
    }

    #[test]
    fn test_new_rejects_out_of_bound_years() {
        let far = NaiveDate::from_ymd_opt(10_000, 1, 1)
            .unwrap()
            .and_time(chrono::NaiveTime::default());
        let err = Canonical::<DateAxis>::new(far).unwrap_err();
        assert!(matches!(err, Error::Range { field: "year", .. }));
        // The time axis pins the year, so the same moment is fine there.
        assert!(Canonical::<TimeAxis>::new(far).is_ok());
    }

    #[test]
    fn test_shift_discards_foreign_magnitude() {
        let date = Canonical::<DateAxis>::new(moment("2025-01-15 00:00:00")).unwrap();
        let delta = TimeDelta::days(1) + TimeDelta::hours(5);
        assert_eq!(date.shift(delta).unwrap().canonical(), "2025-01-16");

        let time = Canonical::<TimeAxis>::new(moment("1970-01-01 23:00:00")).unwrap();
        assert_eq!(
            time.shift(TimeDelta::hours(2)).unwrap().canonical(),
            "01:00:00.000000"
        );
    }

    #[test]
    fn test_shift_past_year_bound_is_a_range_error() {
        let date = Canonical::<DateAxis>::new(moment("9999-12-31 00:00:00")).unwrap();
        assert!(matches!(
            date.shift(TimeDelta::days(1)),
            Err(Error::Range { field: "year", .. })
        ));
        let date = Canonical::<DateAxis>::new(moment("0001-01-01 00:00:00")).unwrap();
        assert!(matches!(
            date.shift(TimeDelta::days(-1)),
            Err(Error::Range { field: "year", .. })
        ));
        // Deltas beyond the engine's own span saturate into the same error.
        assert!(matches!(
            date.shift(TimeDelta::days(200_000_000)),
            Err(Error::Range { field: "year", .. })
        ));
    }

    #[test]
    fn test_modify_runs_the_validator_first() {
        let date = Canonical::<DateAxis>::new(moment("2025-01-15 00:00:00")).unwrap();
        assert!(matches!(
            date.modify("+1 hour"),
            Err(Error::Structural(StructuralViolation::Modifier { .. }))
        ));
        assert_eq!(date.modify("+1 day").unwrap().canonical(), "2025-01-16");
    }

    #[test]
    fn test_format_runs_the_validator_first() {
        let date = Canonical::<DateAxis>::new(moment("2025-01-15 00:00:00")).unwrap();
        assert!(matches!(
            date.format("H:i"),
            Err(Error::Structural(StructuralViolation::Specifier { .. }))
        ));
        assert_eq!(date.format("Y-m-d").unwrap(), "2025-01-15");
    }

    #[test]
    fn test_parse_rewraps_out_of_bound_years() {
        let err = Canonical::<DateAxis>::parse("10000-01-01", Utc.fix()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_comparisons_follow_canonical_order() {
        let a = Canonical::<DateAxis>::new(moment("2025-01-15 00:00:00")).unwrap();
        let b = Canonical::<DateAxis>::new(moment("2025-01-16 00:00:00")).unwrap();
        assert!(a.is_before(&b));
        assert!(b.is_after(&a));
        assert!(a.is_same_as(&a));
        assert!(!a.is_same_as(&b));
    }
}
