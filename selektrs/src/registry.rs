use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glob::glob;
use serde::Deserialize;

use crate::dialect::Dialect;
use crate::error::{Result, SelektError, StubError};
use crate::stub::{RowSpec, SourceStub};
use crate::value::Value;

/// On-disk form of a stub: a column list plus positional or keyed rows.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StubFixture {
    name: Option<String>,
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<serde_json::Value>,
}

/// Convert one fixture row, keeping the cell-level reason on failure.
fn fixture_row(idx: usize, raw: serde_json::Value) -> std::result::Result<RowSpec, StubError> {
    let cell = |key: String, raw: serde_json::Value| -> std::result::Result<Value, StubError> {
        Value::from_fixture(raw)
            .map_err(|e| StubError::InvalidRow(format!("row {idx}, {key}: {e}")))
    };
    match raw {
        serde_json::Value::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for (pos, raw) in items.into_iter().enumerate() {
                values.push(cell(format!("cell {pos}"), raw)?);
            }
            Ok(RowSpec::Positional(values))
        }
        serde_json::Value::Object(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (column, raw) in map {
                let value = cell(format!("column {column}"), raw)?;
                pairs.push((column, value));
            }
            Ok(RowSpec::Keyed(pairs))
        }
        other => Err(StubError::InvalidRow(format!(
            "row {idx}: expected a sequence or mapping, got {other}"
        ))),
    }
}

/// Named source stubs, typically loaded from a fixture directory.
#[derive(Debug, Default, Clone)]
pub struct StubRegistry {
    pub stubs: HashMap<String, SourceStub>,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts<I, S>(stubs: I) -> Self
    where
        I: IntoIterator<Item = (S, SourceStub)>,
        S: Into<String>,
    {
        let mut registry = StubRegistry::new();
        for (name, stub) in stubs {
            registry.insert(name, stub);
        }
        registry
    }

    /// Load every `*.yml`, `*.yaml` and `*.json` fixture in `root`.
    pub fn load_from_dir<P: AsRef<Path>>(root: P) -> Result<Self> {
        let dir = root.as_ref();
        if !dir.is_dir() {
            return Err(SelektError::Validation(format!(
                "fixture directory not found: {}",
                dir.display()
            )));
        }
        let mut registry = StubRegistry::new();
        for ext in ["yml", "yaml", "json"] {
            for entry in glob(&format!("{}/*.{ext}", dir.display()))
                .map_err(|e| SelektError::Other(e.into()))?
                .flatten()
            {
                registry.load_fixture_file(&entry)?;
            }
        }
        tracing::info!(dir = %dir.display(), stubs = registry.stubs.len(), "loaded stub fixtures");
        Ok(registry)
    }

    fn load_fixture_file(&mut self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)?;
        let fixture: StubFixture = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)?,
            _ => serde_yaml::from_str(&contents)?,
        };
        let name = match fixture.name {
            Some(name) => name,
            None => path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    SelektError::Validation(format!("cannot name fixture {}", path.display()))
                })?,
        };
        if self.stubs.contains_key(&name) {
            return Err(SelektError::Validation(format!(
                "duplicate stub {name} in {}",
                path.display()
            )));
        }
        let rows = fixture
            .rows
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| fixture_row(idx, raw))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut stub = SourceStub::new(fixture.columns)?;
        stub.add_rows(rows)?;
        tracing::debug!(stub = %name, rows = stub.len(), path = %path.display(), "loaded fixture");
        self.insert(name, stub);
        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, stub: SourceStub) {
        self.stubs.insert(name.into(), stub);
    }

    pub fn get(&self, name: &str) -> Option<&SourceStub> {
        self.stubs.get(name)
    }

    pub fn sql(&self, name: &str, dialect: &dyn Dialect) -> Result<String> {
        self.get(name)
            .map(|stub| stub.sql_with(dialect))
            .ok_or_else(|| SelektError::Validation(format!("unknown stub {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::BigQueryDialect;

    #[test]
    fn from_parts_registers_by_name() {
        let mut users = SourceStub::new(["id", "name"]).unwrap();
        users.add_row(crate::row![1, "o'neil"]).unwrap();
        let registry = StubRegistry::from_parts([("users", users)]);

        assert!(registry.get("users").is_some());
        assert_eq!(
            registry.sql("users", &BigQueryDialect).unwrap(),
            "SELECT 1 AS id, 'o\\'neil' AS name"
        );
    }

    #[test]
    fn keyed_fixture_rows_map_by_column() {
        let raw: serde_json::Value =
            serde_yaml::from_str("{b: 2, a: {date: \"2012-01-01\"}}").unwrap();
        let row = fixture_row(0, raw).unwrap();
        let mut stub = SourceStub::new(["a", "b"]).unwrap();
        stub.add_row(row).unwrap();
        assert_eq!(stub.sql(), "SELECT '2012-01-01'::date AS a, 2 AS b");
    }

    #[test]
    fn bad_cell_reports_its_reason() {
        let raw = serde_json::json!([1, {"date": "2012-13-45"}]);
        let err = fixture_row(3, raw).unwrap_err();
        assert_eq!(
            err,
            StubError::InvalidRow(
                "row 3, cell 1: invalid date literal \"2012-13-45\"".to_string()
            )
        );
        assert!(fixture_row(0, serde_json::json!("x")).is_err());
    }
}
