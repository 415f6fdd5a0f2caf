//! Temporal engine adapter.
//!
//! Everything that needs real calendar math lives behind this module. chrono
//! is the engine, and the rest of the crate only sees three operations:
//! [`parse`] free-form text into a full moment, [`apply_modifier`] a relative
//! phrase to a moment, and [`render`] a moment through a format string. The
//! validators in [`crate::format`] and [`crate::modifier`] always run before
//! anything here is invoked.
//!
//! Relative phrases are resolved by an ordered chain of `try_*` parsers, most
//! specific first. If nothing matches we return an error rather than guess.

use crate::consts::{
    FORMAT_ESCAPE, MONTH_ABBREVS, MONTH_NAMES, WEEKDAY_ABBREVS, WEEKDAY_NAMES,
};
use crate::dimension::Dimension;
use crate::error::Error;
use chrono::{
    DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta,
    Timelike, Utc, Weekday,
};

/// Parse free-form input into a full moment.
///
/// Fixed textual forms (RFC 3339, ISO date-times, bare dates, bare times) are
/// tried first; anything else is treated as a relative phrase anchored at
/// "now" in the caller-supplied offset. The offset only decides which instant
/// "now" denotes; the result is a naive moment for the normalizer to pin.
///
/// # Errors
/// Returns [`Error::Parse`] naming the input and the dimension it was meant
/// to become.
pub(crate) fn parse(
    text: &str,
    dimension: Dimension,
    offset: FixedOffset,
) -> Result<NaiveDateTime, Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::parse(text, dimension));
    }
    if let Some(moment) = try_fixed_formats(trimmed) {
        return Ok(moment);
    }
    apply_modifier(now_in(offset), trimmed).map_err(|_| Error::parse(text, dimension))
}

/// The current moment, read once from the wall clock, as the wall-clock
/// fields an observer at `offset` would see. Never cached.
pub(crate) fn now_in(offset: FixedOffset) -> NaiveDateTime {
    Utc::now().with_timezone(&offset).naive_local()
}

/// Apply a relative-adjustment phrase to a moment.
///
/// Grammar: signed `±N unit` clauses with an optional trailing `ago`
/// (units: microsecond/usec, millisecond/msec/ms, second/sec, minute/min,
/// hour/hr, day, week, fortnight, month, year, plural forms included),
/// `next/last/this <weekday>`, `today`, `tomorrow`, `yesterday`, `noon`,
/// `midnight`, and `first/last day of this/next/last month`.
///
/// # Errors
/// Returns [`Error::Parse`] if the phrase matches none of the above.
pub(crate) fn apply_modifier(moment: NaiveDateTime, phrase: &str) -> Result<NaiveDateTime, Error> {
    let normalized = phrase.trim().to_lowercase();
    try_named(&normalized, moment)
        .or_else(|| try_weekday_relative(&normalized, moment))
        .or_else(|| try_month_boundary(&normalized, moment))
        .or_else(|| try_offset_clauses(&normalized, moment))
        .ok_or_else(|| Error::Parse {
            input: phrase.trim().to_string(),
            expected: "relative modifier",
        })
}

/// Named single-word anchors.
fn try_named(s: &str, moment: NaiveDateTime) -> Option<NaiveDateTime> {
    match s {
        "noon" => moment.date().and_hms_opt(12, 0, 0),
        "midnight" | "today" => Some(moment.date().and_time(NaiveTime::default())),
        "tomorrow" => Some(moment.date().succ_opt()?.and_time(NaiveTime::default())),
        "yesterday" => Some(moment.date().pred_opt()?.and_time(NaiveTime::default())),
        _ => None,
    }
}

/// `next monday`, `this friday`, `last wednesday`. Resolves to midnight of
/// the target day.
fn try_weekday_relative(s: &str, moment: NaiveDateTime) -> Option<NaiveDateTime> {
    let (position, rest) = s.split_once(' ')?;
    let target = parse_weekday(rest)?;
    let current = moment.weekday();
    let target_days = i64::from(target.num_days_from_monday());
    let current_days = i64::from(current.num_days_from_monday());

    let diff = match position {
        "next" => {
            // Always strictly in the future.
            let ahead = (target_days - current_days).rem_euclid(7);
            if ahead == 0 { 7 } else { ahead }
        }
        "this" => target_days - current_days,
        "last" | "previous" => {
            // Always strictly in the past.
            let back = (current_days - target_days).rem_euclid(7);
            -(if back == 0 { 7 } else { back })
        }
        _ => return None,
    };

    let date = moment.date().checked_add_signed(TimeDelta::days(diff))?;
    Some(date.and_time(NaiveTime::default()))
}

/// `first day of next month`, `last day of this month`, and friends.
fn try_month_boundary(s: &str, moment: NaiveDateTime) -> Option<NaiveDateTime> {
    let (want_last, rest) = if let Some(rest) = s.strip_prefix("first day of ") {
        (false, rest)
    } else if let Some(rest) = s.strip_prefix("last day of ") {
        (true, rest)
    } else {
        return None;
    };
    let shift: i64 = match rest.trim() {
        "this month" => 0,
        "next month" => 1,
        "last month" | "previous month" => -1,
        _ => return None,
    };
    let shifted = shift_months(moment, shift)?;
    let first = shifted.date().with_day(1)?;
    let date = if want_last {
        first.checked_add_months(Months::new(1))?.pred_opt()?
    } else {
        first
    };
    Some(date.and_time(moment.time()))
}

/// One or more `±N unit` clauses, optionally closed by `ago` ("+1 day",
/// "-1 hour 30 minutes", "2 weeks ago"). An unsigned leading number counts
/// as positive.
fn try_offset_clauses(s: &str, moment: NaiveDateTime) -> Option<NaiveDateTime> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    let negate = tokens.last() == Some(&"ago");
    if negate {
        tokens.pop();
    }
    if tokens.is_empty() || tokens.len() % 2 != 0 {
        return None;
    }

    let mut result = moment;
    for pair in tokens.chunks(2) {
        let (sign, digits) = match *pair[0].as_bytes().first()? {
            b'+' => (1i64, &pair[0][1..]),
            b'-' => (-1i64, &pair[0][1..]),
            _ => (1i64, pair[0]),
        };
        let n: i64 = digits.parse().ok()?;
        let amount = if negate { -sign * n } else { sign * n };
        result = apply_unit(result, pair[1], amount)?;
    }
    Some(result)
}

fn apply_unit(moment: NaiveDateTime, unit: &str, amount: i64) -> Option<NaiveDateTime> {
    let delta = match unit {
        "microsecond" | "microseconds" | "usec" | "usecs" => TimeDelta::microseconds(amount),
        "millisecond" | "milliseconds" | "msec" | "msecs" | "ms" => {
            TimeDelta::try_milliseconds(amount)?
        }
        "second" | "seconds" | "sec" | "secs" => TimeDelta::try_seconds(amount)?,
        "minute" | "minutes" | "min" | "mins" => TimeDelta::try_minutes(amount)?,
        "hour" | "hours" | "hr" | "hrs" => TimeDelta::try_hours(amount)?,
        "day" | "days" => TimeDelta::try_days(amount)?,
        "week" | "weeks" => TimeDelta::try_days(amount.checked_mul(7)?)?,
        "fortnight" | "fortnights" => TimeDelta::try_days(amount.checked_mul(14)?)?,
        "month" | "months" => return shift_months(moment, amount),
        "year" | "years" => return shift_months(moment, amount.checked_mul(12)?),
        _ => return None,
    };
    moment.checked_add_signed(delta)
}

/// Month arithmetic with end-of-month clamping, delegated to chrono.
fn shift_months(moment: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        moment.checked_add_months(Months::new(magnitude))
    } else {
        moment.checked_sub_months(Months::new(magnitude))
    }
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn try_fixed_formats(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        // Keep the wall-clock fields as written; the offset is discarded by
        // dimension projection anyway.
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::default()));
    }
    for fmt in ["%H:%M:%S%.f", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(s, fmt) {
            return Some(NaiveDate::default().and_time(time));
        }
    }
    None
}

/// Render a moment through a format string of single-letter specifiers.
///
/// Assumes the string already passed [`crate::format::validate_format`];
/// specifiers of both dimensions are rendered here so each axis only has to
/// gate, not re-implement, the other's output.
pub(crate) fn render(moment: &NaiveDateTime, spec: &str) -> String {
    let date = moment.date();
    let time = moment.time();
    let mut out = String::with_capacity(spec.len() * 2);
    let mut chars = spec.chars();
    while let Some(ch) = chars.next() {
        if ch == FORMAT_ESCAPE {
            if let Some(next) = chars.next() {
                out.push(next);
            }
            continue;
        }
        match ch {
            // Calendar specifiers.
            'd' => out.push_str(&format!("{:02}", date.day())),
            'D' => out.push_str(WEEKDAY_ABBREVS[date.weekday().num_days_from_monday() as usize]),
            'j' => out.push_str(&date.day().to_string()),
            'l' => out.push_str(WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize]),
            'N' => out.push_str(&date.weekday().number_from_monday().to_string()),
            'S' => out.push_str(ordinal_suffix(date.day())),
            'w' => out.push_str(&date.weekday().num_days_from_sunday().to_string()),
            'z' => out.push_str(&date.ordinal0().to_string()),
            'W' => out.push_str(&format!("{:02}", date.iso_week().week())),
            'F' => out.push_str(MONTH_NAMES[date.month0() as usize]),
            'm' => out.push_str(&format!("{:02}", date.month())),
            'M' => out.push_str(MONTH_ABBREVS[date.month0() as usize]),
            'n' => out.push_str(&date.month().to_string()),
            't' => out.push_str(&days_in_month(date.year(), date.month()).to_string()),
            'L' => out.push(if is_leap_year(date.year()) { '1' } else { '0' }),
            'o' => out.push_str(&format!("{:04}", date.iso_week().year())),
            'X' => out.push_str(&format!("{:+05}", date.year())),
            'x' => out.push_str(&format!("{:04}", date.year())),
            'Y' => out.push_str(&format!("{:04}", date.year())),
            'y' => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
            // Clock specifiers.
            'a' => out.push_str(if time.hour12().0 { "pm" } else { "am" }),
            'A' => out.push_str(if time.hour12().0 { "PM" } else { "AM" }),
            'B' => out.push_str(&format!("{:03}", swatch_beats(&time))),
            'g' => out.push_str(&time.hour12().1.to_string()),
            'G' => out.push_str(&time.hour().to_string()),
            'h' => out.push_str(&format!("{:02}", time.hour12().1)),
            'H' => out.push_str(&format!("{:02}", time.hour())),
            'i' => out.push_str(&format!("{:02}", time.minute())),
            's' => out.push_str(&format!("{:02}", time.second())),
            'u' => out.push_str(&format!("{:06}", time.nanosecond() / 1_000)),
            'v' => out.push_str(&format!("{:03}", time.nanosecond() / 1_000_000)),
            other => out.push(other),
        }
    }
    out
}

/// Swatch Internet Time beats: thousandths of the day, measured from
/// midnight at a fixed +01:00 reference.
fn swatch_beats(time: &NaiveTime) -> u32 {
    let seconds = (time.num_seconds_from_midnight() + 3_600) % 86_400;
    seconds * 1_000 / 86_400
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in the given month, delegated to chrono's calendar.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map_or(0, |last| last.day())
}
