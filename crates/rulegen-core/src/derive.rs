//! Per-column rule derivation.
//!
//! Each column type family has one handler selected by a static match; an
//! unmapped family is reported as `TypeDerivation::Unmapped` and never
//! aborts generation for the rest of the table.

use rulegen_model::{
    ColumnDescriptor, ColumnType, ForeignKeyDescriptor, IndexDescriptor, Result, RuleMap,
    RuleParam, RulegenError,
};

/// Outcome of the type lookup for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDerivation {
    Mapped(RuleMap),
    /// No handler for this type family; carries the type name for
    /// diagnostics only.
    Unmapped(String),
}

/// Map a column descriptor to its base rule set.
///
/// A nullable column gets a leading `nullable` token; absence of that token
/// implies required downstream. An empty type name is the one structural
/// error here; anything merely unknown is `Unmapped`.
pub fn derive_column_rules(column: &ColumnDescriptor) -> Result<TypeDerivation> {
    let mut rules = RuleMap::new();
    if column.nullable {
        rules.insert("nullable", RuleParam::None);
    }
    match &column.column_type {
        ColumnType::BigInt | ColumnType::Integer | ColumnType::SmallInt | ColumnType::TinyInt => {
            rules.insert("integer", RuleParam::None);
            if column.unsigned {
                rules.insert("min", RuleParam::Int(0));
            }
        }
        ColumnType::Decimal | ColumnType::Float => {
            rules.insert("numeric", RuleParam::None);
            if column.unsigned {
                rules.insert("min", RuleParam::Int(0));
            }
        }
        ColumnType::String | ColumnType::Text => {
            rules.insert("string", RuleParam::None);
            if let Some(length) = column.length {
                rules.insert("max", RuleParam::Int(i64::from(length)));
            }
        }
        ColumnType::Boolean => {
            rules.insert("boolean", RuleParam::None);
        }
        ColumnType::Date | ColumnType::DateTime => {
            rules.insert("date", RuleParam::None);
        }
        ColumnType::Json => {
            rules.insert("json", RuleParam::None);
        }
        ColumnType::Enum(values) => {
            rules.insert("in", RuleParam::text(values.join(",")));
        }
        ColumnType::Time => {
            return Ok(TypeDerivation::Unmapped("time".to_string()));
        }
        ColumnType::Other(name) => {
            if name.trim().is_empty() {
                return Err(RulegenError::InvalidType("empty type name".to_string()));
            }
            return Ok(TypeDerivation::Unmapped(name.clone()));
        }
    }
    Ok(TypeDerivation::Mapped(rules))
}

/// Emit `unique:table,column` when the column is the sole member of a
/// unique index. Multi-column unique indexes are skipped; deriving a rule
/// for them is out of scope.
pub fn index_rules(table: &str, column: &str, indexes: &[IndexDescriptor]) -> RuleMap {
    let mut rules = RuleMap::new();
    for index in indexes {
        if index.is_single_column_unique(column) {
            rules.insert("unique", RuleParam::text(format!("{table},{column}")));
        }
    }
    rules
}

/// Emit `exists:referenced_table,referenced_column` for any column that is a
/// local column of a foreign key, regardless of how many columns the key
/// spans. The first referenced column is the existence target.
pub fn foreign_key_rules(column: &str, foreign_keys: &[ForeignKeyDescriptor]) -> RuleMap {
    let mut rules = RuleMap::new();
    for key in foreign_keys {
        if !key.covers_column(column) {
            continue;
        }
        if let Some(target) = key.referenced_columns.first() {
            rules.insert(
                "exists",
                RuleParam::text(format!("{},{target}", key.referenced_table)),
            );
        }
    }
    rules
}
