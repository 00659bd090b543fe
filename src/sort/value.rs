/// Record model: dynamically typed field values and the `Fields` lookup trait.
///
/// Records carry no schema. Any record may hold any subset of fields, and a
/// field that is not present reads as `Value::Undefined`.
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

/// A single field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The value of a field the record does not carry.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A point in time. `None` is the invalid-date sentinel produced by a
    /// failed `<date>` coercion.
    Date(Option<DateTime<Utc>>),
}

impl Value {
    /// Returns true for `Undefined`, `Null`, or a string that is empty after trimming.
    ///
    /// Zero, `false`, `NaN` and dates (valid or not) are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Free-function form of [`Value::is_empty`].
#[inline]
pub fn is_empty(value: &Value) -> bool {
    value.is_empty()
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::Date(Some(dt))
    }
}

/// `None` maps to `Null`, mirroring an explicitly empty field.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// JSON has no dates or undefined. Arrays and objects are kept as their
/// compact JSON text so they still take part in ordering as text.
impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        }
    }
}

/// Field lookup for anything that can be sorted.
pub trait Fields {
    /// Return the value stored under `name`, or `Value::Undefined` if absent.
    fn field(&self, name: &str) -> Cow<'_, Value>;
}

static UNDEFINED: Value = Value::Undefined;

/// An ordered map of field names to values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field. Absent fields read as `Value::Undefined`.
    pub fn get(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&UNDEFINED)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Record { fields }
    }
}

impl Fields for Record {
    fn field(&self, name: &str) -> Cow<'_, Value> {
        Cow::Borrowed(self.get(name))
    }
}

impl Fields for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Cow<'_, Value> {
        Cow::Borrowed(self.get(name).unwrap_or(&UNDEFINED))
    }
}

impl Fields for HashMap<String, Value> {
    fn field(&self, name: &str) -> Cow<'_, Value> {
        Cow::Borrowed(self.get(name).unwrap_or(&UNDEFINED))
    }
}

impl Fields for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Cow<'_, Value> {
        match self.get(name) {
            Some(v) => Cow::Owned(Value::from(v)),
            None => Cow::Borrowed(&UNDEFINED),
        }
    }
}

/// Non-object JSON values have no fields.
impl Fields for serde_json::Value {
    fn field(&self, name: &str) -> Cow<'_, Value> {
        match self {
            serde_json::Value::Object(map) => map.field(name),
            _ => Cow::Borrowed(&UNDEFINED),
        }
    }
}

impl<T: Fields + ?Sized> Fields for &T {
    fn field(&self, name: &str) -> Cow<'_, Value> {
        (**self).field(name)
    }
}

/// Build a [`Record`] from `field => value` pairs.
///
/// ```
/// use kvsort::record;
/// let r = record! { "color" => "red", "weight" => 1500 };
/// assert_eq!(r.get("color").as_str(), Some("red"));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::sort::Record::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut r = $crate::sort::Record::new();
        $( r.insert($name, $value); )+
        r
    }};
}
