//! Timezone-free calendar dates and wall-clock times.
//!
//! A [`Date`] can never carry a time of day and a [`Time`] can never carry a
//! calendar date or a timezone. The calendar math itself is delegated to
//! [`chrono`]; this crate is the invariant-preservation layer around it: a
//! canonical pinned representation, validators that reject any format
//! specifier or relative-modifier keyword touching the forbidden dimension,
//! and a mutable/immutable variant of each type with identical behavior.
//!
//! ```
//! use plain_time::{Date, Time};
//!
//! let date = Date::parse("1990-05-15")?;
//! assert!(date.is_before(&Date::today()));
//! assert_eq!(date.format("l, jS F Y")?, "Tuesday, 15th May 1990");
//!
//! let time = Time::from_hms(23, 0, 0)?;
//! assert_eq!(time.modify("+2 hours")?.format("H:i:s")?, "01:00:00");
//!
//! // The other dimension is unreachable, not merely unused.
//! assert!(date.modify("+2 hours").is_err());
//! assert!(time.format("Y-m-d").is_err());
//! # Ok::<(), plain_time::Error>(())
//! ```
//!
//! Values compare through [`is_before`](Date::is_before) /
//! [`is_after`](Date::is_after) / [`is_same_as`](Date::is_same_as) over their
//! fixed-width canonical strings (`YYYY-MM-DD` and `HH:MM:SS.ffffff`), which
//! is also the sole serde representation.

mod canonical;
mod consts;
mod date;
mod dimension;
mod engine;
mod error;
mod format;
mod modifier;
mod prelude;
mod time;

pub use consts::*;
pub use date::{Date, DateMut};
pub use dimension::Dimension;
pub use error::{Error, StructuralViolation};
pub use format::validate_format;
pub use modifier::validate_modifier;
pub use time::{Time, TimeMut};

// Durations and offsets in the public API are chrono's types.
pub use chrono::{FixedOffset, TimeDelta};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_date_flow() {
        let birthday = Date::parse("1990-05-15").unwrap();
        assert!(birthday.is_before(&Date::today()));

        let payload = serde_json::json!({ "date": birthday });
        assert_eq!(payload.to_string(), r#"{"date":"1990-05-15"}"#);

        let next = birthday.modify("+1 day").unwrap();
        assert_eq!(next.format("Y-m-d").unwrap(), "1990-05-16");
        assert!(birthday.is_before(&next));
    }

    #[test]
    fn test_end_to_end_time_flow() {
        let time = Time::from_hms(23, 0, 0).unwrap();
        let wrapped = time.modify("+2 hours").unwrap();
        assert_eq!(wrapped.format("H:i:s").unwrap(), "01:00:00");

        let payload = serde_json::json!({ "time": time });
        assert_eq!(payload.to_string(), r#"{"time":"23:00:00.000000"}"#);
    }

    #[test]
    fn test_validators_are_usable_standalone() {
        assert!(validate_format("Y-m-d", Dimension::Date).is_ok());
        assert!(validate_format("Y-m-d", Dimension::Time).is_err());
        assert!(validate_modifier("+1 day", Dimension::Date).is_ok());
        assert!(validate_modifier("+1 day", Dimension::Time).is_err());
    }

    #[test]
    fn test_variants_stay_behaviorally_consistent() {
        let phrase = "first day of next month";
        let immutable = Date::from_ymd(2025, 1, 15).unwrap().modify(phrase).unwrap();
        let mut mutable = DateMut::from_ymd(2025, 1, 15).unwrap();
        mutable.modify(phrase).unwrap();
        assert!(mutable.to_immutable().is_same_as(&immutable));
    }
}
