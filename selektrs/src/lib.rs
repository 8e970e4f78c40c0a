pub mod config;
pub mod dialect;
pub mod error;
pub mod registry;
pub mod stub;
pub mod value;

use std::path::Path;

use crate::error::Result;
use crate::registry::StubRegistry;

/// Load the fixture directory named by `config` and render every stub with
/// the configured dialect, sorted by stub name.
pub fn render_fixtures<P: AsRef<Path>>(
    base_dir: P,
    config: &SelektConfig,
) -> Result<Vec<(String, String)>> {
    let dialect = config.dialect()?;
    let registry = StubRegistry::load_from_dir(base_dir.as_ref().join(&config.fixtures.dir))?;
    let mut rendered: Vec<(String, String)> = registry
        .stubs
        .iter()
        .map(|(name, stub)| (name.clone(), stub.sql_with(dialect.as_ref())))
        .collect();
    rendered.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(rendered)
}

pub use config::SelektConfig;
pub use dialect::{BigQueryDialect, Dialect, PostgresDialect};
pub use error::{SelektError, StubError};
pub use stub::{RowSpec, SourceStub};
pub use value::Value;
