/// Value coercion and record comparison.
/// Comparison is allocation-free except for case folding of non-ASCII text.
use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::key::{Direction, SortParam, SortType};
use super::value::{Fields, Value};

/// Strip leading whitespace.
#[inline]
fn skip_leading_blanks(s: &str) -> &str {
    s.trim_start()
}

/// Text form of a value as seen by the numeric parsers.
fn numeric_text(v: &Value) -> Option<Cow<'_, str>> {
    match v {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null => Some(Cow::Borrowed("null")),
        _ => None,
    }
}

/// Integer prefix parser: optional blanks, sign, then base-10 digits.
/// Returns NaN when no digit is found.
pub fn parse_int_prefix(s: &str) -> f64 {
    let s = skip_leading_blanks(s).as_bytes();
    let mut i = 0;
    let negative = match s.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let start = i;
    let mut value = 0f64;
    while i < s.len() && s[i].is_ascii_digit() {
        value = value * 10.0 + (s[i] - b'0') as f64;
        i += 1;
    }
    if i == start {
        return f64::NAN;
    }
    if negative { -value } else { value }
}

/// Longest decimal float prefix: sign, digits, fraction, exponent, or `Infinity`.
/// Returns NaN when no number is found.
pub fn parse_float_prefix(s: &str) -> f64 {
    let s = skip_leading_blanks(s);
    let b = s.as_bytes();
    if b.is_empty() {
        return f64::NAN;
    }

    let mut i = 0;
    if b[0] == b'+' || b[0] == b'-' {
        i += 1;
    }

    if s[i..].starts_with("Infinity") {
        return if b[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    // Digits before decimal
    let mut has_digits = false;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
        has_digits = true;
    }
    // Decimal point
    if i < b.len() && b[i] == b'.' {
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
            has_digits = true;
        }
    }
    if !has_digits {
        return f64::NAN;
    }
    // Exponent, only if followed by at least one digit
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let save = i;
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        if i < b.len() && b[i].is_ascii_digit() {
            while i < b.len() && b[i].is_ascii_digit() {
                i += 1;
            }
        } else {
            i = save;
        }
    }

    s[..i].parse::<f64>().unwrap_or(f64::NAN)
}

/// `YYYY` or `YYYY-MM`, standing for the first day of that year or month.
fn parse_partial_date(s: &str) -> Option<NaiveDate> {
    let all_digits = |t: &str, len: usize| t.len() == len && t.bytes().all(|b| b.is_ascii_digit());
    let (year, month) = match s.split_once('-') {
        Some((y, m)) if all_digits(y, 4) && all_digits(m, 2) => (y, m.parse().ok()?),
        None if all_digits(s, 4) => (s, 1),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Parse an ISO-8601 date string. Forms without an offset are read as UTC.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, and a date followed by `T` (or a
/// space) and `HH:MM[:SS[.f]]`, optionally ending in `Z` or `±HH:MM`.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_partial_date(s))
    {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    // A trailing `Z` is the zero offset.
    let zoned = match s.strip_suffix(['Z', 'z']) {
        Some(local) => Cow::Owned(format!("{}+00:00", local)),
        None => Cow::Borrowed(s),
    };
    FORMATS
        .iter()
        .find_map(|fmt| {
            DateTime::parse_from_str(&zoned, &format!("{}%:z", fmt))
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
        .or_else(|| {
            FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.and_utc())
        })
}

fn date_from_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

/// Integer part of a number as read back from its shortest text form.
///
/// Magnitudes of at least 1e21, or below 1e-6, print in exponent form, so
/// only the leading mantissa digits survive: `1e21` and `1.5e-7` both give 1.
fn int_of_number(n: f64) -> f64 {
    if !n.is_finite() {
        return f64::NAN;
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        parse_int_prefix(&format!("{:e}", n))
    } else {
        n.trunc()
    }
}

/// Apply a parameter's type coercion to a raw field value.
///
/// `Natural` returns the value unchanged. Numeric coercions never fail; text
/// without a leading number becomes NaN. Date coercion yields `Date(None)`
/// for input that is not a date.
pub fn coerce(value: &Value, kind: SortType) -> Cow<'_, Value> {
    match kind {
        SortType::Natural => Cow::Borrowed(value),
        SortType::Int => Cow::Owned(Value::Number(match value {
            Value::Number(n) => int_of_number(*n),
            Value::Undefined | Value::Date(_) => f64::NAN,
            other => numeric_text(other).map_or(f64::NAN, |t| parse_int_prefix(&t)),
        })),
        SortType::Float => Cow::Owned(Value::Number(match value {
            Value::Number(n) => *n,
            Value::Undefined | Value::Date(_) => f64::NAN,
            other => numeric_text(other).map_or(f64::NAN, |t| parse_float_prefix(&t)),
        })),
        SortType::Date => match value {
            Value::Date(_) => Cow::Borrowed(value),
            other => Cow::Owned(Value::Date(match other {
                Value::Number(n) => date_from_millis(*n),
                Value::Null => date_from_millis(0.0),
                Value::Bool(b) => date_from_millis(if *b { 1.0 } else { 0.0 }),
                Value::String(s) => parse_date(s),
                _ => None,
            })),
        },
    }
}

/// Case-folded, trimmed text used for string ordering.
#[inline]
fn fold(s: &str) -> Cow<'_, str> {
    let t = s.trim();
    if t.bytes().any(|b| b.is_ascii_uppercase() || !b.is_ascii()) {
        Cow::Owned(t.to_lowercase())
    } else {
        Cow::Borrowed(t)
    }
}

/// Compare two strings case-insensitively, ignoring surrounding whitespace.
pub fn compare_folded(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b))
}

/// Numbers compare numerically; NaN sorts after every other number.
pub fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Valid dates compare chronologically; invalid dates sort after valid ones.
fn compare_dates(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Type class for mixed-type comparisons: numbers, then dates, then text.
fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Number(_) => 0,
        Value::Date(_) => 1,
        _ => 2,
    }
}

fn text_form(v: &Value) -> &str {
    match v {
        Value::String(s) => s.as_str(),
        Value::Bool(true) => "true",
        Value::Bool(false) => "false",
        _ => "",
    }
}

/// True when two coerced values are the same value.
fn identical(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        _ => a == b,
    }
}

/// Compare two coerced values in ascending terms, without direction.
///
/// Empty values are handled by the caller.
fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => compare_folded(x, y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(*x, *y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Date(x), Value::Date(y)) => compare_dates(x, y),
        // Mixed types: group by type class, text-like values by folded text.
        _ => type_rank(a)
            .cmp(&type_rank(b))
            .then_with(|| compare_folded(text_form(a), text_form(b))),
    }
}

/// Compare two already-coerced values for a sort in `direction`.
///
/// Empty values always sort after non-empty ones, whatever the direction.
///
/// Values of different types are not stringified against each other. They
/// are grouped by class instead: numbers first, then dates, then text
/// (strings and booleans, compared as trimmed lower-case text). So `10`
/// sorts before `"-5"` in ascending order even though `"-5" < "10"` as text.
pub fn compare_values(a: &Value, b: &Value, direction: Direction) -> Ordering {
    if identical(a, b) {
        return Ordering::Equal;
    }
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, false) => direction.apply(compare_present(a, b)),
    }
}

impl SortParam {
    /// The coerced sort key of `record`, borrowed from it when no conversion is needed.
    pub fn key<'a, T: Fields + ?Sized>(&self, record: &'a T) -> Cow<'a, Value> {
        match record.field(&self.field) {
            Cow::Borrowed(v) => coerce(v, self.kind),
            Cow::Owned(v) => Cow::Owned(coerce(&v, self.kind).into_owned()),
        }
    }

    /// Compare two records by this parameter's field, type and direction.
    pub fn compare<T: Fields + ?Sized>(&self, a: &T, b: &T) -> Ordering {
        compare_values(&self.key(a), &self.key(b), self.direction)
    }
}

/// Build a comparator from a raw sort parameter.
///
/// The parameter is parsed once; the returned closure owns the result.
///
/// Mixed-type fields follow a fixed class order (numbers, dates, text), see
/// [`compare_values`]. The order is total, so any collection sorts without
/// panicking, but it does not match comparing the values as strings.
pub fn make_comparator<T: Fields + ?Sized>(raw: &str) -> impl Fn(&T, &T) -> Ordering + use<T> {
    let param = SortParam::parse(raw);
    move |a: &T, b: &T| param.compare(a, b)
}
