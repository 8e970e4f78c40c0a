//! Literal values carried by source stub rows.
//!
//! The value domain is closed: every cell of a stub is one of the variants of
//! [`Value`], and dialects render each variant to a SQL literal.

use chrono::{NaiveDate, NaiveDateTime};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integers past `i64::MAX`.
    UInt(u64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Parse a `YYYY-MM-DD` string into a date value.
    pub fn parse_date(s: &str) -> Option<Value> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .ok()
            .map(Value::Date)
    }

    /// Parse a `YYYY-MM-DD HH:MM:SS` string (a `T` separator and fractional
    /// seconds are also accepted) into a date-time value.
    pub fn parse_datetime(s: &str) -> Option<Value> {
        let s = s.trim();
        DATETIME_INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(Value::DateTime)
    }

    /// Convert a fixture cell. Scalars map directly; a single-key mapping
    /// `{date: ...}` or `{timestamp: ...}` yields a date or date-time.
    pub(crate) fn from_fixture(raw: serde_json::Value) -> std::result::Result<Value, String> {
        match raw {
            serde_json::Value::Object(map) => {
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((tag, serde_json::Value::String(text))), None) => match tag.as_str() {
                        "date" => Value::parse_date(&text)
                            .ok_or_else(|| format!("invalid date literal {text:?}")),
                        "timestamp" | "datetime" => Value::parse_datetime(&text)
                            .ok_or_else(|| format!("invalid timestamp literal {text:?}")),
                        other => Err(format!("unknown value tag {other}")),
                    },
                    _ => Err(
                        "mapping values must be a single date or timestamp tag".to_string(),
                    ),
                }
            }
            serde_json::Value::Array(_) => Err("nested arrays are not valid cell values".to_string()),
            scalar => Ok(Value::from(scalar)),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Value::UInt(v), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(u)) => Value::UInt(u),
                _ => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Text(other.to_string()),
        }
    }
}
