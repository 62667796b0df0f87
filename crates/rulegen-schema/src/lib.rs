pub mod cache;
pub mod error;
pub mod reader;
pub mod snapshot;

pub use cache::SchemaCache;
pub use error::SnapshotError;
pub use reader::SchemaReader;
pub use snapshot::{ColumnRecord, ModelRecord, SchemaSnapshot, TableRecord};
