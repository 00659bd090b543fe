//! Sort collections of key-value records with a compact parameter syntax.
//!
//! A parameter names a field, optionally prefixed with `\` for descending
//! order and suffixed with a `<type>` coercion:
//!
//! ```
//! use kvsort::{record, sort};
//!
//! let mut fruit = vec![
//!     record! { "color" => "red", "weight" => 0.025 },
//!     record! { "color" => "red", "weight" => 1500 },
//!     record! { "color" => "blue", "weight" => 0.9 },
//! ];
//! sort(&mut fruit, ["color", "\\weight<float>"]);
//! assert_eq!(fruit[0].get("color").as_str(), Some("blue"));
//! assert_eq!(fruit[1].get("weight").as_f64(), Some(1500.0));
//! ```

pub mod sort;

pub use sort::{
    Criteria, CriteriaError, Direction, Fields, Record, SortParam, SortType, Value, coerce,
    is_empty, make_comparator, sort, sort_by_param, sort_by_params, sort_json, sort_with,
};

/// Parse a raw sort parameter into field, direction and type.
#[inline]
pub fn parse(raw: &str) -> SortParam {
    SortParam::parse(raw)
}
