/// Sort parameter parsing.
///
/// PARAM format: [\|/]FIELD[<TYPE>]
/// A leading backslash sorts descending. A leading forward slash is accepted
/// and stripped but keeps the default ascending order.
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

// Dot-all so that field names spanning lines still parse the same way.
static FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([\\/])?([^<]+)<?.*$").expect("valid field pattern"));
static TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^.+<(.+)>$").expect("valid type pattern"));
static DIRECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\\.+").expect("valid direction pattern"));

/// Tag reported when a parameter has no `<type>` suffix.
pub const NATURAL_TAG: &str = "natural";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// `1` for ascending, `-1` for descending.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }

    /// Scale an ascending ordering by this direction.
    #[inline]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

/// Coercion applied to field values before comparing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortType {
    /// No coercion: values compare by their own type.
    #[default]
    Natural,
    Int,
    /// `float`, `double` and `long` all parse as floating point.
    Float,
    Date,
}

impl SortType {
    /// Map a type tag to a coercion. Unknown tags fall back to `Natural`.
    pub fn from_tag(tag: &str) -> SortType {
        match tag {
            "int" => SortType::Int,
            "float" | "double" | "long" => SortType::Float,
            "date" => SortType::Date,
            _ => SortType::Natural,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortType::Natural => NATURAL_TAG,
            SortType::Int => "int",
            SortType::Float => "float",
            SortType::Date => "date",
        }
    }
}

/// A parsed sort parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortParam {
    pub field: String,
    pub direction: Direction,
    pub kind: SortType,
}

impl SortParam {
    /// Parse a raw parameter like `"color"`, `"\\weight<float>"` or `"/name"`.
    ///
    /// Never fails: a token that does not match the syntax is taken verbatim
    /// as an ascending field name with natural type.
    pub fn parse(raw: &str) -> SortParam {
        SortParam {
            field: parse_field(raw).to_string(),
            direction: parse_direction(raw),
            kind: SortType::from_tag(parse_type(raw)),
        }
    }
}

impl FromStr for SortParam {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortParam::parse(s))
    }
}

impl fmt::Display for SortParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == Direction::Descending {
            f.write_str("\\")?;
        }
        f.write_str(&self.field)?;
        if self.kind != SortType::Natural {
            write!(f, "<{}>", self.kind.as_str())?;
        }
        Ok(())
    }
}

/// Extract the field name, without the direction marker or type suffix.
pub fn parse_field(raw: &str) -> &str {
    FIELD_RE
        .captures(raw)
        .and_then(|caps| caps.get(2))
        .map_or(raw, |m| m.as_str())
}

/// Extract the text between a trailing `<` and `>`, or `"natural"`.
pub fn parse_type(raw: &str) -> &str {
    TYPE_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map_or(NATURAL_TAG, |m| m.as_str())
}

/// Descending if the token starts with a backslash followed by anything.
pub fn parse_direction(raw: &str) -> Direction {
    if DIRECTION_RE.is_match(raw) {
        Direction::Descending
    } else {
        Direction::Ascending
    }
}
