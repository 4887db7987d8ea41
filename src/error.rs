use thiserror::Error;

pub type WidgetResult<T> = Result<T, WidgetError>;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("type mismatch for `{field}`: expected {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("unknown widget field `{0}`")]
    UnknownField(String),

    #[error("widget field `{0}` is read-only")]
    ReadOnlyField(String),

    #[error("invalid table: {0}")]
    InvalidTable(String),

    #[error("invalid comm message: {0}")]
    InvalidMessage(String),

    #[error("invalid version: {0}")]
    InvalidVersion(String),

    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("invalid observer: {0}")]
    InvalidObserver(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "polars")]
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}
