//! Wall-clock times with no calendar date and no timezone.

use crate::canonical::{negated, Canonical};
use crate::dimension::{Dimension, TimeAxis};
use crate::error::{Error, StructuralViolation};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Timelike, Utc};
use std::fmt;
use std::str::FromStr;

/// A time of day, tracked to microsecond precision. Immutable: every
/// operation that would change the value returns a new instance.
///
/// Internally anchored to a fixed reference day in a fixed zero offset; the
/// reference day is pinned by every construction path and is not observable.
/// Use [`TimeMut`] for the in-place variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time(Canonical<TimeAxis>);

/// A time of day. Mutable: every operation that would change the value
/// overwrites the receiver in place and returns it for chaining.
///
/// Conversion to and from [`Time`] copies the value; the two never share
/// storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeMut(Canonical<TimeAxis>);

fn forbidden(method: &'static str) -> Error {
    StructuralViolation::Mutator {
        method,
        dimension: Dimension::Time,
    }
    .into()
}

fn from_hms_micro_core(
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
) -> Result<Canonical<TimeAxis>, Error> {
    if hour > 23 {
        return Err(Error::range("hour", 0, 23, i64::from(hour)));
    }
    if minute > 59 {
        return Err(Error::range("minute", 0, 59, i64::from(minute)));
    }
    if second > 59 {
        return Err(Error::range("second", 0, 59, i64::from(second)));
    }
    if microsecond > 999_999 {
        return Err(Error::range("microsecond", 0, 999_999, i64::from(microsecond)));
    }
    let time = NaiveTime::from_hms_micro_opt(hour, minute, second, microsecond)
        .ok_or_else(|| Error::range("second", 0, 59, i64::from(second)))?;
    Canonical::new(NaiveDate::default().and_time(time))
}

impl Time {
    /// Parses free-form input: `HH:MM`, `HH:MM:SS`, `HH:MM:SS.ffffff`, full
    /// ISO/RFC 3339 stamps (the date and offset parts are discarded), or a
    /// relative phrase such as `"noon"` or `"+2 hours"` anchored at the
    /// current moment in UTC.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the engine cannot make a clock time of
    /// the input.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_in(text, Utc.fix())
    }

    /// Like [`Time::parse`], with relative phrases anchored at the current
    /// moment in the given offset.
    pub fn parse_in(text: &str, offset: FixedOffset) -> Result<Self, Error> {
        Canonical::parse(text, offset).map(Self)
    }

    /// Creates a time from components, at microsecond zero.
    ///
    /// # Errors
    /// Returns [`Error::Range`] naming the offending field.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, Error> {
        Self::from_hms_micro(hour, minute, second, 0)
    }

    /// Creates a time from components.
    ///
    /// # Errors
    /// Returns [`Error::Range`] naming the offending field, its bound, and
    /// the offending value.
    pub fn from_hms_micro(
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> Result<Self, Error> {
        from_hms_micro_core(hour, minute, second, microsecond).map(Self)
    }

    /// The current wall-clock time in UTC.
    pub fn now() -> Self {
        Self::now_in(Utc.fix())
    }

    /// The current wall-clock time as seen by an observer at the given
    /// offset.
    pub fn now_in(offset: FixedOffset) -> Self {
        Self(Canonical::now(offset))
    }

    /// Projects any full moment onto the clock dimension, keeping its
    /// wall-clock time and discarding everything else.
    ///
    /// # Errors
    /// Kept fallible for symmetry with the date axis; the clock projection
    /// itself always succeeds.
    pub fn from_datetime<Tz: TimeZone>(moment: &DateTime<Tz>) -> Result<Self, Error> {
        Canonical::new(moment.naive_local()).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.moment().hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.moment().minute()
    }

    pub fn second(&self) -> u32 {
        self.0.moment().second()
    }

    pub fn microsecond(&self) -> u32 {
        self.0.moment().nanosecond() / 1_000
    }

    /// Renders the time through a format string of single-letter specifiers
    /// (`H:i:s`, `g:i a`, ...). Backslash escapes the next character.
    ///
    /// # Errors
    /// Returns [`StructuralViolation::Specifier`] if the string names a
    /// date, timezone, or composite specifier; the error carries the list of
    /// allowed specifiers.
    pub fn format(&self, spec: &str) -> Result<String, Error> {
        self.0.format(spec)
    }

    /// Applies a relative-adjustment phrase (`"+2 hours"`, `"-30 minutes"`,
    /// `"noon"`) and returns the adjusted time, wrapping across midnight.
    ///
    /// # Errors
    /// Returns [`StructuralViolation::Modifier`] if the phrase names a
    /// calendar keyword, or [`Error::Parse`] if the engine cannot resolve it.
    pub fn modify(&self, phrase: &str) -> Result<Self, Error> {
        self.0.modify(phrase).map(Self)
    }

    /// Adds a duration, wrapping modulo one day. Whole-day magnitudes in the
    /// delta are discarded by normalization.
    pub fn wrapping_add(&self, delta: TimeDelta) -> Self {
        Self(self.0.wrapping_shift(delta))
    }

    /// Subtracts a duration, wrapping modulo one day.
    pub fn wrapping_sub(&self, delta: TimeDelta) -> Self {
        Self(self.0.wrapping_shift(negated(delta)))
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self.0.is_before(&other.0)
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self.0.is_after(&other.0)
    }

    pub fn is_same_as(&self, other: &Self) -> bool {
        self.0.is_same_as(&other.0)
    }

    /// The canonical `HH:MM:SS.ffffff` form; the sole persistence and
    /// comparison representation. [`Time::to_string`] renders the shorter
    /// interchange form without microseconds.
    pub fn canonical(&self) -> String {
        self.0.canonical()
    }

    /// A time has no calendar date to set. Fails for any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_date(&self, _year: i32, _month: u32, _day: u32) -> Result<Self, Error> {
        Err(forbidden("set_date"))
    }

    /// A time has no ISO week date to set. Fails for any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_iso_date(&self, _year: i32, _week: u32, _weekday: u32) -> Result<Self, Error> {
        Err(forbidden("set_iso_date"))
    }

    /// A time has no timezone to set. Fails for any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_timezone(&self, _timezone: &str) -> Result<Self, Error> {
        Err(forbidden("set_timezone"))
    }

    /// A time denotes no instant, so it has no timestamp to set. Fails for
    /// any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_timestamp(&self, _timestamp: i64) -> Result<Self, Error> {
        Err(forbidden("set_timestamp"))
    }

    /// An equal, independently owned mutable copy.
    pub fn to_mutable(&self) -> TimeMut {
        TimeMut(self.0)
    }
}

impl TimeMut {
    /// See [`Time::parse`].
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the engine cannot make a clock time of
    /// the input.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_in(text, Utc.fix())
    }

    /// See [`Time::parse_in`].
    pub fn parse_in(text: &str, offset: FixedOffset) -> Result<Self, Error> {
        Canonical::parse(text, offset).map(Self)
    }

    /// See [`Time::from_hms`].
    ///
    /// # Errors
    /// Returns [`Error::Range`] naming the offending field.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, Error> {
        Self::from_hms_micro(hour, minute, second, 0)
    }

    /// See [`Time::from_hms_micro`].
    ///
    /// # Errors
    /// Returns [`Error::Range`] naming the offending field.
    pub fn from_hms_micro(
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> Result<Self, Error> {
        from_hms_micro_core(hour, minute, second, microsecond).map(Self)
    }

    /// The current wall-clock time in UTC.
    pub fn now() -> Self {
        Self::now_in(Utc.fix())
    }

    /// The current wall-clock time as seen by an observer at the given
    /// offset.
    pub fn now_in(offset: FixedOffset) -> Self {
        Self(Canonical::now(offset))
    }

    /// See [`Time::from_datetime`].
    ///
    /// # Errors
    /// Kept fallible for symmetry with the date axis.
    pub fn from_datetime<Tz: TimeZone>(moment: &DateTime<Tz>) -> Result<Self, Error> {
        Canonical::new(moment.naive_local()).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.moment().hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.moment().minute()
    }

    pub fn second(&self) -> u32 {
        self.0.moment().second()
    }

    pub fn microsecond(&self) -> u32 {
        self.0.moment().nanosecond() / 1_000
    }

    /// See [`Time::format`].
    ///
    /// # Errors
    /// Returns [`StructuralViolation::Specifier`] for forbidden specifiers.
    pub fn format(&self, spec: &str) -> Result<String, Error> {
        self.0.format(spec)
    }

    /// Applies a relative-adjustment phrase in place; the receiver is
    /// returned for chaining. On error the receiver is left unchanged.
    ///
    /// # Errors
    /// Same conditions as [`Time::modify`].
    pub fn modify(&mut self, phrase: &str) -> Result<&mut Self, Error> {
        self.0 = self.0.modify(phrase)?;
        Ok(self)
    }

    /// Adds a duration in place, wrapping modulo one day.
    pub fn wrapping_add(&mut self, delta: TimeDelta) -> &mut Self {
        self.0 = self.0.wrapping_shift(delta);
        self
    }

    /// Subtracts a duration in place, wrapping modulo one day.
    pub fn wrapping_sub(&mut self, delta: TimeDelta) -> &mut Self {
        self.0 = self.0.wrapping_shift(negated(delta));
        self
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self.0.is_before(&other.0)
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self.0.is_after(&other.0)
    }

    pub fn is_same_as(&self, other: &Self) -> bool {
        self.0.is_same_as(&other.0)
    }

    /// The canonical `HH:MM:SS.ffffff` form.
    pub fn canonical(&self) -> String {
        self.0.canonical()
    }

    /// A time has no calendar date to set. Fails for any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_date(&mut self, _year: i32, _month: u32, _day: u32) -> Result<&mut Self, Error> {
        Err(forbidden("set_date"))
    }

    /// A time has no ISO week date to set. Fails for any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_iso_date(
        &mut self,
        _year: i32,
        _week: u32,
        _weekday: u32,
    ) -> Result<&mut Self, Error> {
        Err(forbidden("set_iso_date"))
    }

    /// A time has no timezone to set. Fails for any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_timezone(&mut self, _timezone: &str) -> Result<&mut Self, Error> {
        Err(forbidden("set_timezone"))
    }

    /// A time denotes no instant, so it has no timestamp to set. Fails for
    /// any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_timestamp(&mut self, _timestamp: i64) -> Result<&mut Self, Error> {
        Err(forbidden("set_timestamp"))
    }

    /// An equal, independently owned immutable copy. Mutating the receiver
    /// afterwards never affects the copy.
    pub fn to_immutable(&self) -> Time {
        Time(self.0)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.display())
    }
}

impl fmt::Display for TimeMut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.display())
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for TimeMut {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<TimeMut> for Time {
    fn from(time: TimeMut) -> Self {
        time.to_immutable()
    }
}

impl From<Time> for TimeMut {
    fn from(time: Time) -> Self {
        time.to_mutable()
    }
}

impl serde::Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> serde::Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for TimeMut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> serde::Deserialize<'de> for TimeMut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
