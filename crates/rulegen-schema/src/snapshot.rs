//! JSON schema snapshot: the shipped `SchemaReader` implementation.
//!
//! A snapshot is a dump of a database's metadata catalog (tables, columns,
//! indexes, foreign keys) plus optional model declarations (base rules and
//! belongs-to-many relations), produced by whatever introspection step sits
//! in front of this repo.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use rulegen_model::{
    ColumnDescriptor, ColumnType, ForeignKeyDescriptor, IndexDescriptor, ManyToMany,
    ModelDefinition, Result, RulegenError,
};
use tracing::debug;

use crate::error::SnapshotError;
use crate::reader::SchemaReader;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    #[serde(default)]
    pub tables: Vec<TableRecord>,
    #[serde(default)]
    pub models: Vec<ModelRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRecord {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnRecord>,
    #[serde(default)]
    pub indexes: Vec<IndexDescriptor>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
}

/// Raw column entry as it appears in the snapshot file. The type is kept as
/// the database's own name and resolved into a family on access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub unsigned: bool,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub enum_values: Vec<String>,
}

impl ColumnRecord {
    fn to_descriptor(&self) -> Result<ColumnDescriptor> {
        let column_type = match ColumnType::parse(&self.type_name)? {
            ColumnType::Enum(_) => ColumnType::Enum(self.enum_values.clone()),
            other => other,
        };
        Ok(ColumnDescriptor {
            name: self.name.clone(),
            column_type,
            nullable: self.nullable,
            unsigned: self.unsigned,
            length: self.length,
            precision: self.precision,
            scale: self.scale,
        })
    }
}

/// Model declaration carried in the snapshot. Implements `ModelDefinition`
/// so the CLI's model mode works without constructing anything from strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    pub name: String,
    pub table: String,
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
    #[serde(default)]
    pub belongs_to_many: Vec<ManyToMany>,
}

impl ModelDefinition for ModelRecord {
    fn table(&self) -> &str {
        &self.table
    }

    fn base_rules(&self) -> BTreeMap<String, String> {
        self.rules.clone()
    }

    fn many_to_many(&self) -> Vec<ManyToMany> {
        self.belongs_to_many.clone()
    }
}

impl SchemaSnapshot {
    /// Load and validate a snapshot from a JSON file.
    pub fn load(path: &Path) -> std::result::Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::io(path, source))?;
        let snapshot: SchemaSnapshot =
            serde_json::from_str(&raw).map_err(|source| SnapshotError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        snapshot.validate()?;
        debug!(
            path = %path.display(),
            tables = snapshot.tables.len(),
            models = snapshot.models.len(),
            "loaded schema snapshot"
        );
        Ok(snapshot)
    }

    fn validate(&self) -> std::result::Result<(), SnapshotError> {
        let mut seen = BTreeSet::new();
        for table in &self.tables {
            if table.name.trim().is_empty() {
                return Err(SnapshotError::Invalid {
                    message: "table with empty name".to_string(),
                });
            }
            if !seen.insert(table.name.as_str()) {
                return Err(SnapshotError::Invalid {
                    message: format!("duplicate table: {}", table.name),
                });
            }
        }
        let mut models = BTreeSet::new();
        for model in &self.models {
            if !models.insert(model.name.as_str()) {
                return Err(SnapshotError::Invalid {
                    message: format!("duplicate model: {}", model.name),
                });
            }
        }
        Ok(())
    }

    pub fn model(&self, name: &str) -> Option<&ModelRecord> {
        self.models.iter().find(|model| model.name == name)
    }

    fn table(&self, name: &str) -> Result<&TableRecord> {
        self.tables
            .iter()
            .find(|table| table.name == name)
            .ok_or_else(|| RulegenError::UnknownTable(name.to_string()))
    }
}

impl SchemaReader for SchemaSnapshot {
    fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.tables.iter().map(|table| table.name.clone()).collect())
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.table(table)?
            .columns
            .iter()
            .map(ColumnRecord::to_descriptor)
            .collect()
    }

    fn column(&self, table: &str, column: &str) -> Result<ColumnDescriptor> {
        self.table(table)?
            .columns
            .iter()
            .find(|record| record.name == column)
            .ok_or_else(|| RulegenError::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            })?
            .to_descriptor()
    }

    fn indexes(&self, table: &str) -> Result<Vec<IndexDescriptor>> {
        Ok(self.table(table)?.indexes.clone())
    }

    fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyDescriptor>> {
        Ok(self.table(table)?.foreign_keys.clone())
    }
}
