use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulegenError {
    /// Caller asked for something structurally impossible, e.g. a column
    /// without naming its table. Raised before any schema access.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A column type that cannot be looked up at all (empty name). Distinct
    /// from an unmapped type, which is tolerated and skipped.
    #[error("invalid column type: {0}")]
    InvalidType(String),

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("unknown column {table}.{column}")]
    UnknownColumn { table: String, column: String },

    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// Reader-side failure from a `SchemaReader` implementation, e.g. a
    /// live introspector losing its connection.
    #[error("schema access failed: {0}")]
    Schema(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RulegenError>;
