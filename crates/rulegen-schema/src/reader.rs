use rulegen_model::{ColumnDescriptor, ForeignKeyDescriptor, IndexDescriptor, Result};

/// Read access to a relational schema's metadata catalog.
///
/// This is the seam between rule generation and whatever actually holds the
/// schema: the in-repo implementation is a JSON snapshot, but a live
/// database introspector fits behind the same trait. All methods are
/// synchronous; failures propagate to the caller unmodified.
pub trait SchemaReader {
    /// Names of every table in the schema.
    fn table_names(&self) -> Result<Vec<String>>;

    /// Ordered column descriptors for a table.
    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// A single column's descriptor.
    fn column(&self, table: &str, column: &str) -> Result<ColumnDescriptor>;

    /// Index descriptors for a table.
    fn indexes(&self, table: &str) -> Result<Vec<IndexDescriptor>>;

    /// Foreign key descriptors for a table.
    fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyDescriptor>>;
}
