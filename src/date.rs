//! Calendar dates with no time-of-day and no timezone.

use crate::canonical::{negated, Canonical};
use crate::consts::{MAX_YEAR, MIN_YEAR};
use crate::dimension::{DateAxis, Dimension};
use crate::engine;
use crate::error::{Error, StructuralViolation};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// A calendar date. Immutable: every operation that would change the value
/// returns a new instance.
///
/// Internally anchored to the first instant of the day in a fixed zero
/// offset; the time-of-day is pinned to midnight by every construction path
/// and is not observable. Use [`DateMut`] for the in-place variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date(Canonical<DateAxis>);

/// A calendar date. Mutable: every operation that would change the value
/// overwrites the receiver in place and returns it for chaining.
///
/// Conversion to and from [`Date`] copies the value; the two never share
/// storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateMut(Canonical<DateAxis>);

fn forbidden(method: &'static str) -> Error {
    StructuralViolation::Mutator {
        method,
        dimension: Dimension::Date,
    }
    .into()
}

fn from_ymd_core(year: i32, month: u32, day: u32) -> Result<Canonical<DateAxis>, Error> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::range(
            "year",
            i64::from(MIN_YEAR),
            i64::from(MAX_YEAR),
            i64::from(year),
        ));
    }
    if !(1..=12).contains(&month) {
        return Err(Error::range("month", 1, 12, i64::from(month)));
    }
    let last = engine::days_in_month(year, month);
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::range("day", 1, i64::from(last), i64::from(day)))?;
    Canonical::new(date.and_time(NaiveTime::default()))
}

impl Date {
    /// Parses free-form input: `YYYY-MM-DD`, full ISO/RFC 3339 stamps (the
    /// time and offset parts are discarded), or a relative phrase such as
    /// `"tomorrow"` or `"next monday"` anchored at the current moment in UTC.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the engine cannot make a calendar date of
    /// the input.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_in(text, Utc.fix())
    }

    /// Like [`Date::parse`], with relative phrases anchored at the current
    /// moment in the given offset. The offset only decides which day "today"
    /// is; the result carries no offset.
    pub fn parse_in(text: &str, offset: FixedOffset) -> Result<Self, Error> {
        Canonical::parse(text, offset).map(Self)
    }

    /// Creates a date from components.
    ///
    /// # Errors
    /// Returns [`Error::Range`] naming the offending field; the day bound is
    /// reported against the actual length of the month.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, Error> {
        from_ymd_core(year, month, day).map(Self)
    }

    /// Today's date in UTC.
    pub fn today() -> Self {
        Self::today_in(Utc.fix())
    }

    /// Today's date as seen by an observer at the given offset.
    pub fn today_in(offset: FixedOffset) -> Self {
        Self(Canonical::now(offset))
    }

    /// Projects any full moment onto the calendar dimension, keeping its
    /// wall-clock date and discarding everything else.
    ///
    /// # Errors
    /// Returns [`Error::Range`] if the year leaves the supported span.
    pub fn from_datetime<Tz: TimeZone>(moment: &DateTime<Tz>) -> Result<Self, Error> {
        Canonical::new(moment.naive_local()).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.moment().year()
    }

    pub fn month(&self) -> u32 {
        self.0.moment().month()
    }

    pub fn day(&self) -> u32 {
        self.0.moment().day()
    }

    /// Renders the date through a format string of single-letter specifiers
    /// (`Y-m-d`, `jS F Y`, ...). Backslash escapes the next character.
    ///
    /// # Errors
    /// Returns [`StructuralViolation::Specifier`] if the string names a
    /// time, timezone, or composite specifier.
    pub fn format(&self, spec: &str) -> Result<String, Error> {
        self.0.format(spec)
    }

    /// Applies a relative-adjustment phrase (`"+1 day"`, `"next monday"`,
    /// `"first day of next month"`) and returns the adjusted date.
    ///
    /// # Errors
    /// Returns [`StructuralViolation::Modifier`] if the phrase names a clock
    /// keyword, or [`Error::Parse`] if the engine cannot resolve it.
    pub fn modify(&self, phrase: &str) -> Result<Self, Error> {
        self.0.modify(phrase).map(Self)
    }

    /// Adds a duration. Sub-day magnitudes are discarded by normalization.
    ///
    /// # Errors
    /// Returns [`Error::Range`] if the result leaves year `1..=9999`.
    pub fn checked_add(&self, delta: TimeDelta) -> Result<Self, Error> {
        self.0.shift(delta).map(Self)
    }

    /// Subtracts a duration. Sub-day magnitudes are discarded by
    /// normalization.
    ///
    /// # Errors
    /// Returns [`Error::Range`] if the result leaves year `1..=9999`.
    pub fn checked_sub(&self, delta: TimeDelta) -> Result<Self, Error> {
        self.0.shift(negated(delta)).map(Self)
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

    /// The canonical `YYYY-MM-DD` form; the sole persistence representation.
    pub fn canonical(&self) -> String {
        self.0.canonical()
    }

    /// A date has no time-of-day to set. Fails for any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_time(
        &self,
        _hour: u32,
        _minute: u32,
        _second: u32,
        _microsecond: u32,
    ) -> Result<Self, Error> {
        Err(forbidden("set_time"))
    }

    /// A date has no timezone to set. Fails for any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_timezone(&self, _timezone: &str) -> Result<Self, Error> {
        Err(forbidden("set_timezone"))
    }

    /// An equal, independently owned mutable copy.
    pub fn to_mutable(&self) -> DateMut {
        DateMut(self.0)
    }
}

impl DateMut {
    /// See [`Date::parse`].
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the engine cannot make a calendar date of
    /// the input.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_in(text, Utc.fix())
    }

    /// See [`Date::parse_in`].
    pub fn parse_in(text: &str, offset: FixedOffset) -> Result<Self, Error> {
        Canonical::parse(text, offset).map(Self)
    }

    /// See [`Date::from_ymd`].
    ///
    /// # Errors
    /// Returns [`Error::Range`] naming the offending field.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, Error> {
        from_ymd_core(year, month, day).map(Self)
    }

    /// Today's date in UTC.
    pub fn today() -> Self {
        Self::today_in(Utc.fix())
    }

    /// Today's date as seen by an observer at the given offset.
    pub fn today_in(offset: FixedOffset) -> Self {
        Self(Canonical::now(offset))
    }

    /// See [`Date::from_datetime`].
    ///
    /// # Errors
    /// Returns [`Error::Range`] if the year leaves the supported span.
    pub fn from_datetime<Tz: TimeZone>(moment: &DateTime<Tz>) -> Result<Self, Error> {
        Canonical::new(moment.naive_local()).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.moment().year()
    }

    pub fn month(&self) -> u32 {
        self.0.moment().month()
    }

    pub fn day(&self) -> u32 {
        self.0.moment().day()
    }

    /// See [`Date::format`].
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
    /// Same conditions as [`Date::modify`].
    pub fn modify(&mut self, phrase: &str) -> Result<&mut Self, Error> {
        self.0 = self.0.modify(phrase)?;
        Ok(self)
    }

    /// Adds a duration in place. On error the receiver is left unchanged.
    ///
    /// # Errors
    /// Returns [`Error::Range`] if the result leaves year `1..=9999`.
    pub fn checked_add(&mut self, delta: TimeDelta) -> Result<&mut Self, Error> {
        self.0 = self.0.shift(delta)?;
        Ok(self)
    }

    /// Subtracts a duration in place. On error the receiver is left
    /// unchanged.
    ///
    /// # Errors
    /// Returns [`Error::Range`] if the result leaves year `1..=9999`.
    pub fn checked_sub(&mut self, delta: TimeDelta) -> Result<&mut Self, Error> {
        self.0 = self.0.shift(negated(delta))?;
        Ok(self)
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

    /// The canonical `YYYY-MM-DD` form.
    pub fn canonical(&self) -> String {
        self.0.canonical()
    }

    /// A date has no time-of-day to set. Fails for any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_time(
        &mut self,
        _hour: u32,
        _minute: u32,
        _second: u32,
        _microsecond: u32,
    ) -> Result<&mut Self, Error> {
        Err(forbidden("set_time"))
    }

    /// A date has no timezone to set. Fails for any arguments.
    ///
    /// # Errors
    /// Always returns [`StructuralViolation::Mutator`].
    pub fn set_timezone(&mut self, _timezone: &str) -> Result<&mut Self, Error> {
        Err(forbidden("set_timezone"))
    }

    /// An equal, independently owned immutable copy. Mutating the receiver
    /// afterwards never affects the copy.
    pub fn to_immutable(&self) -> Date {
        Date(self.0)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.display())
    }
}

impl fmt::Display for DateMut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.display())
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for DateMut {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DateMut> for Date {
    fn from(date: DateMut) -> Self {
        date.to_immutable()
    }
}

impl From<Date> for DateMut {
    fn from(date: Date) -> Self {
        date.to_mutable()
    }
}

impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for DateMut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> serde::Deserialize<'de> for DateMut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
