use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelektError>;

#[derive(Debug, Error)]
pub enum SelektError {
    #[error("stub error: {0}")]
    Stub(#[from] StubError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Rejections raised while shaping rows into a source stub.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StubError {
    #[error("row has {values} values but the stub only has {columns} columns")]
    RowTooLong { columns: usize, values: usize },
    #[error("duplicate column {0}")]
    DuplicateColumn(String),
    #[error("a source stub needs at least one column")]
    NoColumns,
    #[error("invalid row: {0}")]
    InvalidRow(String),
}
