use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, RulegenError};

/// Closed set of column type families the rule deriver knows about.
///
/// An unrecognized database type lands in `Other` rather than failing the
/// lookup; the deriver treats `Other` as unmapped and skips the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    BigInt,
    Integer,
    SmallInt,
    TinyInt,
    Decimal,
    Float,
    String,
    Text,
    Boolean,
    Date,
    DateTime,
    Time,
    Json,
    /// Enumerated column with its allowed values.
    Enum(Vec<String>),
    /// Fallback for type names with no implemented mapping.
    Other(String),
}

impl ColumnType {
    /// Resolve a database type name into a type family.
    ///
    /// Unknown names resolve to `ColumnType::Other`; an empty name is a
    /// structural error surfaced to the caller.
    pub fn parse(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RulegenError::InvalidType("empty type name".to_string()));
        }
        Ok(match trimmed.to_lowercase().as_str() {
            "bigint" | "bigserial" => ColumnType::BigInt,
            "int" | "integer" | "mediumint" | "serial" => ColumnType::Integer,
            "smallint" => ColumnType::SmallInt,
            "tinyint" => ColumnType::TinyInt,
            "decimal" | "numeric" => ColumnType::Decimal,
            "float" | "double" | "real" => ColumnType::Float,
            "varchar" | "char" | "string" => ColumnType::String,
            "text" | "mediumtext" | "longtext" => ColumnType::Text,
            "boolean" | "bool" => ColumnType::Boolean,
            "date" => ColumnType::Date,
            "datetime" | "timestamp" => ColumnType::DateTime,
            "time" => ColumnType::Time,
            "json" | "jsonb" => ColumnType::Json,
            "enum" => ColumnType::Enum(Vec::new()),
            other => ColumnType::Other(other.to_string()),
        })
    }

    /// Returns true for the integral families (`integer` rule token).
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            ColumnType::BigInt | ColumnType::Integer | ColumnType::SmallInt | ColumnType::TinyInt
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::BigInt => "bigint",
            ColumnType::Integer => "integer",
            ColumnType::SmallInt => "smallint",
            ColumnType::TinyInt => "tinyint",
            ColumnType::Decimal => "decimal",
            ColumnType::Float => "float",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Time => "time",
            ColumnType::Json => "json",
            ColumnType::Enum(_) => "enum",
            ColumnType::Other(name) => name,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One column as reported by the schema reader. Read-only, supplied per
/// query; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub unsigned: bool,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            unsigned: false,
            length: None,
            precision: None,
            scale: None,
        }
    }

    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub fn unsigned(mut self, unsigned: bool) -> Self {
        self.unsigned = unsigned;
        self
    }

    #[must_use]
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

/// A table index. Only single-column unique indexes contribute rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    pub columns: Vec<String>,
    pub unique: bool,
    #[serde(default)]
    pub name: Option<String>,
}

impl IndexDescriptor {
    /// True when this index enforces uniqueness on exactly the given column.
    pub fn is_single_column_unique(&self, column: &str) -> bool {
        self.unique && self.columns.len() == 1 && self.columns[0] == column
    }
}

/// A foreign key constraint as reported by the schema reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyDescriptor {
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
}

impl ForeignKeyDescriptor {
    pub fn covers_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}
