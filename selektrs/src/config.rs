//! Configuration system for selekt.
//!
//! TOML-based; every field has a default so an empty file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dialect::{dialect_for_name, Dialect};
use crate::error::{Result, SelektError};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SelektConfig {
    pub render: RenderConfig,
    pub fixtures: FixtureConfig,
}

/// SQL rendering settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Dialect name: `postgres` (default) or `bigquery`.
    pub dialect: String,
}

/// Where stub fixtures live.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dialect: "postgres".to_string(),
        }
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("fixtures"),
        }
    }
}

impl SelektConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SelektError::Config(format!("failed to read config file: {e}")))?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| SelektError::Config(format!("failed to parse config: {e}")))
    }

    /// Load from default locations (env var, cwd, user config dir, or defaults).
    ///
    /// Search order:
    /// 1. `SELEKT_CONFIG` environment variable
    /// 2. `./selekt.toml` (current directory)
    /// 3. `~/.config/selekt/config.toml` (user config dir)
    /// 4. Built-in defaults
    pub fn load_default() -> Self {
        if let Ok(path) = std::env::var("SELEKT_CONFIG") {
            match Self::from_file(&path) {
                Ok(cfg) => {
                    tracing::info!(path = %path, "loaded config from SELEKT_CONFIG");
                    return cfg;
                }
                Err(e) => tracing::warn!(path = %path, error = %e, "ignoring SELEKT_CONFIG"),
            }
        }

        if let Ok(cfg) = Self::from_file("selekt.toml") {
            tracing::info!("loaded config from ./selekt.toml");
            return cfg;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("selekt").join("config.toml");
            if let Ok(cfg) = Self::from_file(&user_config) {
                tracing::info!(path = %user_config.display(), "loaded config from user config dir");
                return cfg;
            }
        }

        tracing::debug!("no config file found, using defaults");
        Self::default()
    }

    /// The configured dialect.
    pub fn dialect(&self) -> Result<Box<dyn Dialect + Send + Sync>> {
        dialect_for_name(&self.render.dialect).ok_or_else(|| {
            SelektError::Config(format!("unknown dialect {}", self.render.dialect))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_default_config() {
        let cfg = SelektConfig::default();
        assert_eq!(cfg.render.dialect, "postgres");
        assert_eq!(cfg.fixtures.dir, PathBuf::from("fixtures"));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[render]
dialect = "bigquery"

[fixtures]
dir = "tests/stubs"
"#;
        let cfg = SelektConfig::from_toml(toml).unwrap();
        assert_eq!(cfg.fixtures.dir, PathBuf::from("tests/stubs"));
        let dialect = cfg.dialect().unwrap();
        let date = Value::parse_date("2012-01-01").unwrap();
        assert_eq!(dialect.render_literal(&date), "DATE '2012-01-01'");
    }

    #[test]
    fn test_unknown_dialect() {
        let cfg = SelektConfig::from_toml("[render]\ndialect = \"oracle\"\n").unwrap();
        assert!(matches!(cfg.dialect(), Err(SelektError::Config(_))));
        assert!(matches!(
            SelektConfig::from_toml("render = 3"),
            Err(SelektError::Config(_))
        ));
    }
}
