use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use rulegen_model::{ForeignKeyDescriptor, IndexDescriptor, Result};
use tracing::debug;

use crate::reader::SchemaReader;

/// Memoizes index and foreign-key lookups for one generation session.
///
/// Owned by a single `Generator`; never shared across sessions, so
/// concurrent generations cannot interfere through it.
#[derive(Debug, Default)]
pub struct SchemaCache {
    indexes: BTreeMap<String, Vec<IndexDescriptor>>,
    foreign_keys: BTreeMap<String, Vec<ForeignKeyDescriptor>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indexes<R: SchemaReader + ?Sized>(
        &mut self,
        reader: &R,
        table: &str,
    ) -> Result<&[IndexDescriptor]> {
        match self.indexes.entry(table.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!(table, "index lookup");
                Ok(entry.insert(reader.indexes(table)?))
            }
        }
    }

    pub fn foreign_keys<R: SchemaReader + ?Sized>(
        &mut self,
        reader: &R,
        table: &str,
    ) -> Result<&[ForeignKeyDescriptor]> {
        match self.foreign_keys.entry(table.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!(table, "foreign key lookup");
                Ok(entry.insert(reader.foreign_keys(table)?))
            }
        }
    }
}
