/// Smallest year the canonical `YYYY-MM-DD` form can carry (inclusive).
pub const MIN_YEAR: i32 = 1;

/// Largest year the canonical `YYYY-MM-DD` form can carry (inclusive).
/// Years outside `MIN_YEAR..=MAX_YEAR` would change the width of the
/// canonical string and break lexicographic ordering.
pub const MAX_YEAR: i32 = 9999;

/// Escape marker inside format strings. The character following it is
/// emitted literally and is never checked against the specifier tables.
pub const FORMAT_ESCAPE: char = '\\';

/// Output specifiers that render time-of-day components.
/// Allowed on time values, blocked on date values.
pub const TIME_SPECIFIERS: &[char] = &['a', 'A', 'B', 'g', 'G', 'h', 'H', 'i', 's', 'u', 'v'];

/// Output specifiers that render calendar components.
/// Allowed on date values, blocked on time values.
pub const DATE_SPECIFIERS: &[char] = &[
    'd', 'D', 'j', 'l', 'N', 'S', 'w', 'z', 'W', 'F', 'm', 'M', 'n', 't', 'L', 'o', 'X', 'x', 'Y',
    'y',
];

/// Output specifiers that render timezone information. Blocked on both
/// dimensions; neither value type carries an observable offset.
pub const TIMEZONE_SPECIFIERS: &[char] = &['e', 'I', 'O', 'P', 'p', 'T', 'Z'];

/// Output specifiers whose output spans more than one dimension
/// (full ISO stamps, RFC 2822 stamps, epoch seconds). Blocked on both.
pub const COMPOSITE_SPECIFIERS: &[char] = &['c', 'r', 'U'];

/// Human-readable list of the specifiers a time value accepts, quoted in
/// rejection messages so callers can see what *is* allowed.
pub const TIME_ALLOWED_LIST: &str = "a A B g G h H i s u v";

/// Relative-modifier keywords that adjust the calendar dimension.
/// A phrase containing any of these (whole-word) is rejected on time values.
pub const DATE_KEYWORDS: &[&str] = &[
    "day",
    "days",
    "week",
    "weeks",
    "month",
    "months",
    "year",
    "years",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
    "first",
    "last",
    "next",
    "previous",
    "this",
];

/// Relative-modifier keywords that adjust the clock dimension.
/// A phrase containing any of these (whole-word) is rejected on date values.
pub const TIME_KEYWORDS: &[&str] = &[
    "hour",
    "hours",
    "hr",
    "hrs",
    "minute",
    "minutes",
    "min",
    "mins",
    "second",
    "seconds",
    "sec",
    "secs",
    "microsecond",
    "microseconds",
    "usec",
    "usecs",
    "millisecond",
    "milliseconds",
    "msec",
    "msecs",
    "ms",
    "noon",
];

/// Full weekday names, Monday-first (matches ISO weekday numbering).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Three-letter weekday abbreviations, Monday-first.
pub const WEEKDAY_ABBREVS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Full month names, January at index 0.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Three-letter month abbreviations, January at index 0.
pub const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
