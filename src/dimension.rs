use crate::prelude::*;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::hash::Hash;

/// The two mutually exclusive axes this crate separates: calendar dates and
/// wall-clock times. Used as a runtime tag by the format and modifier
/// validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Dimension {
    /// The calendar axis (year, month, day).
    #[display(fmt = "date")]
    Date,
    /// The wall-clock axis (hour, minute, second, microsecond).
    #[display(fmt = "time")]
    Time,
}

impl Dimension {
    /// The opposite axis.
    pub const fn other(self) -> Self {
        match self {
            Self::Date => Self::Time,
            Self::Time => Self::Date,
        }
    }

    /// Noun used in parse failure messages ("cannot parse X as a ...").
    pub(crate) const fn noun(self) -> &'static str {
        match self {
            Self::Date => "calendar date",
            Self::Time => "clock time",
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::DateAxis {}
    impl Sealed for super::TimeAxis {}
}

/// Dimension descriptor for the generic canonical core: how to pin a full
/// moment onto one axis and how to render the canonical string forms.
///
/// Implemented exactly twice, by [`DateAxis`] and [`TimeAxis`]. Sealed; the
/// whole design rests on there being no third axis.
pub trait Axis: sealed::Sealed + Copy + Eq + Hash + fmt::Debug + 'static {
    /// Runtime tag for this axis, handed to the validators.
    const DIMENSION: Dimension;

    /// Pin `moment` onto this axis: keep the retained fields, overwrite the
    /// discarded ones with their fixed reference. Total; never fails.
    fn normalize(moment: NaiveDateTime) -> NaiveDateTime;

    /// Fixed-width canonical string, the sole form used for comparison and
    /// persistence. `YYYY-MM-DD` for dates, `HH:MM:SS.ffffff` for times.
    fn canonical(moment: &NaiveDateTime) -> String;

    /// Interchange/display string. Same as canonical for dates; times drop
    /// the microsecond tail (`HH:MM:SS`).
    fn display(moment: &NaiveDateTime) -> String;
}

/// The calendar axis: time-of-day is pinned to midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateAxis;

/// The wall-clock axis: the date is pinned to the epoch reference day
/// (1970-01-01). The reference day itself is never observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeAxis;

impl Axis for DateAxis {
    const DIMENSION: Dimension = Dimension::Date;

    fn normalize(moment: NaiveDateTime) -> NaiveDateTime {
        NaiveDateTime::new(moment.date(), NaiveTime::default())
    }

    fn canonical(moment: &NaiveDateTime) -> String {
        moment.format("%Y-%m-%d").to_string()
    }

    fn display(moment: &NaiveDateTime) -> String {
        Self::canonical(moment)
    }
}

impl Axis for TimeAxis {
    const DIMENSION: Dimension = Dimension::Time;

    fn normalize(moment: NaiveDateTime) -> NaiveDateTime {
        // Truncate below microseconds so that field equality and canonical
        // string equality always agree. The engine encodes a leap second as
        // second 59 with a nanosecond overflow past 1_000_000_000; cap it so
        // the microsecond field stays within its six digits.
        let time = moment.time();
        let nano = (time.nanosecond().min(999_999_999) / 1_000) * 1_000;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(
            time.num_seconds_from_midnight(),
            nano,
        )
        .unwrap_or(time);
        // NaiveDate::default() is the epoch day, 1970-01-01.
        NaiveDateTime::new(NaiveDate::default(), time)
    }

    fn canonical(moment: &NaiveDateTime) -> String {
        format!(
            "{:02}:{:02}:{:02}.{:06}",
            moment.time().hour(),
            moment.time().minute(),
            moment.time().second(),
            moment.time().nanosecond() / 1_000
        )
    }

    fn display(moment: &NaiveDateTime) -> String {
        moment.format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moment(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[test]
    fn test_date_axis_pins_midnight() {
        let pinned = DateAxis::normalize(moment("2025-01-15 14:30:45.123456"));
        assert_eq!(pinned, moment("2025-01-15 00:00:00"));
    }

    #[test]
    fn test_time_axis_pins_epoch_day() {
        let pinned = TimeAxis::normalize(moment("2025-01-15 14:30:45.123456"));
        assert_eq!(pinned, moment("1970-01-01 14:30:45.123456"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let m = moment("2025-01-15 14:30:45.123456");
        assert_eq!(
            DateAxis::normalize(DateAxis::normalize(m)),
            DateAxis::normalize(m)
        );
        assert_eq!(
            TimeAxis::normalize(TimeAxis::normalize(m)),
            TimeAxis::normalize(m)
        );
    }

    #[test]
    fn test_canonical_forms_are_fixed_width() {
        let pinned = DateAxis::normalize(moment("0042-03-07 00:00:00"));
        assert_eq!(DateAxis::canonical(&pinned), "0042-03-07");

        let pinned = TimeAxis::normalize(moment("1970-01-01 09:05:03.000120"));
        assert_eq!(TimeAxis::canonical(&pinned), "09:05:03.000120");
    }

    #[test]
    fn test_time_axis_clamps_leap_second_overflow() {
        // Second 60 comes out of the engine as second 59 plus a full extra
        // second of nanoseconds.
        let pinned = TimeAxis::normalize(moment("2025-06-30 23:59:60"));
        assert_eq!(TimeAxis::canonical(&pinned), "23:59:59.999999");
        assert_eq!(pinned.time().nanosecond(), 999_999_000);
    }

    #[test]
    fn test_time_display_drops_microseconds() {
        let pinned = TimeAxis::normalize(moment("1970-01-01 09:05:03.000120"));
        assert_eq!(TimeAxis::display(&pinned), "09:05:03");
    }

    #[test]
    fn test_dimension_other_and_display() {
        assert_eq!(Dimension::Date.other(), Dimension::Time);
        assert_eq!(Dimension::Time.other(), Dimension::Date);
        assert_eq!(Dimension::Date.to_string(), "date");
        assert_eq!(Dimension::Time.to_string(), "time");
    }
}
