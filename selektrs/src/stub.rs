//! Source stubs: literal rows rendered as a `SELECT ... UNION ALL ...` query.
//!
//! A [`SourceStub`] stands in for a table. Rows are normalized to the stub's
//! width when they are added, so rendering never has to deal with ragged
//! input.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use crate::dialect::{Dialect, PostgresDialect};
use crate::error::{Result, StubError};
use crate::value::Value;

const UNION_ALL: &str = "\nUNION ALL\n";

/// Row input accepted by [`SourceStub::add_row`].
#[derive(Debug, Clone, PartialEq)]
pub enum RowSpec {
    /// Values in column order. May be shorter than the stub, never longer.
    Positional(Vec<Value>),
    /// Values addressed by column name. Unmapped columns become NULL.
    Keyed(Vec<(String, Value)>),
}

impl RowSpec {
    pub fn keyed<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        RowSpec::Keyed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Build a positional [`RowSpec`] from heterogeneous values; `()` is NULL.
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::stub::RowSpec::Positional(vec![$($crate::value::Value::from($value)),*])
    };
}

impl<V: Into<Value>> From<Vec<V>> for RowSpec {
    fn from(values: Vec<V>) -> Self {
        RowSpec::Positional(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for RowSpec {
    fn from(values: [V; N]) -> Self {
        RowSpec::Positional(values.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for RowSpec {
    fn from(map: HashMap<K, V>) -> Self {
        RowSpec::keyed(map)
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for RowSpec {
    fn from(map: BTreeMap<K, V>) -> Self {
        RowSpec::keyed(map)
    }
}

impl TryFrom<serde_json::Value> for RowSpec {
    type Error = StubError;

    fn try_from(value: serde_json::Value) -> std::result::Result<Self, Self::Error> {
        match value {
            serde_json::Value::Array(items) => Ok(items.into()),
            serde_json::Value::Object(map) => Ok(RowSpec::keyed(map)),
            other => Err(StubError::InvalidRow(format!(
                "expected an array or object, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceStub {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl SourceStub {
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(StubError::NoColumns.into());
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(StubError::DuplicateColumn(column.clone()).into());
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Stored rows, each exactly as wide as [`columns`](Self::columns).
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn add_row(&mut self, row: impl Into<RowSpec>) -> Result<()> {
        let normalized = self.normalize(row.into())?;
        self.rows.push(normalized);
        tracing::trace!(rows = self.rows.len(), "appended stub row");
        Ok(())
    }

    /// Chaining form of [`add_row`](Self::add_row).
    pub fn push(&mut self, row: impl Into<RowSpec>) -> Result<&mut Self> {
        self.add_row(row)?;
        Ok(self)
    }

    /// Append a batch of rows. The batch is all-or-nothing: if any row is
    /// rejected, none are appended.
    pub fn add_rows<I, R>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<RowSpec>,
    {
        let normalized = rows
            .into_iter()
            .map(|row| self.normalize(row.into()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::debug!(added = normalized.len(), "appending stub rows");
        self.rows.extend(normalized);
        Ok(())
    }

    /// Render with the default (PostgreSQL) dialect.
    pub fn sql(&self) -> String {
        self.sql_with(&PostgresDialect)
    }

    /// Render every row as a `SELECT`, aliasing columns on the first one only.
    /// A stub without rows renders a single all-NULL row so the result keeps
    /// its column names.
    pub fn sql_with(&self, dialect: &dyn Dialect) -> String {
        if self.rows.is_empty() {
            let nulls = vec![Value::Null; self.columns.len()];
            return self.render_select(dialect, &nulls, true);
        }
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.render_select(dialect, row, idx == 0))
            .collect::<Vec<_>>()
            .join(UNION_ALL)
    }

    fn render_select(&self, dialect: &dyn Dialect, row: &[Value], with_aliases: bool) -> String {
        let items: Vec<String> = row
            .iter()
            .zip(&self.columns)
            .map(|(value, column)| {
                let literal = dialect.render_literal(value);
                if with_aliases {
                    format!("{literal} AS {}", dialect.render_alias(column))
                } else {
                    literal
                }
            })
            .collect();
        format!("SELECT {}", items.join(", "))
    }

    fn normalize(&self, row: RowSpec) -> std::result::Result<Vec<Value>, StubError> {
        let width = self.columns.len();
        match row {
            RowSpec::Positional(mut values) => {
                if values.len() > width {
                    return Err(StubError::RowTooLong {
                        columns: width,
                        values: values.len(),
                    });
                }
                values.resize(width, Value::Null);
                Ok(values)
            }
            RowSpec::Keyed(pairs) => {
                let mut values = vec![Value::Null; width];
                for (key, value) in pairs {
                    match self.columns.iter().position(|c| *c == key) {
                        Some(idx) => values[idx] = value,
                        None => tracing::debug!(column = %key, "ignoring value for unknown column"),
                    }
                }
                Ok(values)
            }
        }
    }
}

impl fmt::Display for SourceStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelektError;

    fn ab() -> SourceStub {
        SourceStub::new(["a", "b"]).unwrap()
    }

    #[test]
    fn pads_short_rows() {
        let mut stub = SourceStub::new(["a", "b", "c"]).unwrap();
        stub.add_row([1]).unwrap();
        assert_eq!(stub.rows()[0], vec![Value::Int(1), Value::Null, Value::Null]);
    }

    #[test]
    fn rejects_wide_row_without_appending() {
        let mut stub = ab();
        let err = stub.add_row([1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            SelektError::Stub(StubError::RowTooLong {
                columns: 2,
                values: 3
            })
        ));
        assert_eq!(stub.len(), 0);
    }

    #[test]
    fn keyed_rows_ignore_unknown_columns() {
        let mut stub = ab();
        stub.add_row(RowSpec::keyed([("b", 1), ("zzz", 9)])).unwrap();
        assert_eq!(stub.rows()[0], vec![Value::Null, Value::Int(1)]);
    }

    #[test]
    fn rejects_duplicate_and_missing_columns() {
        assert!(matches!(
            SourceStub::new(["a", "a"]),
            Err(SelektError::Stub(StubError::DuplicateColumn(c))) if c == "a"
        ));
        assert!(matches!(
            SourceStub::new(Vec::<String>::new()),
            Err(SelektError::Stub(StubError::NoColumns))
        ));
    }

    #[test]
    fn json_rows_convert() {
        let positional = RowSpec::try_from(serde_json::json!([1, "x"])).unwrap();
        assert_eq!(positional, row![1, "x"]);
        assert!(RowSpec::try_from(serde_json::json!(5)).is_err());
    }

    #[test]
    fn empty_stub_renders_null_row() {
        assert_eq!(ab().sql(), "SELECT NULL AS a, NULL AS b");
    }

    #[test]
    fn rendering_is_repeatable() {
        let mut stub = ab();
        stub.add_row(row![(), 2]).unwrap();
        assert_eq!(stub.sql(), stub.sql());
        assert_eq!(stub.to_string(), stub.sql());
    }
}
