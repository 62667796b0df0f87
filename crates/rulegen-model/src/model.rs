use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A belongs-to-many relation declared on a model: the payload key under
/// which related ids are submitted and the table those ids must exist in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManyToMany {
    pub relation: String,
    pub related_table: String,
    /// Join table materializing the relation. Informational only; rules are
    /// derived against the related table, not the pivot.
    #[serde(default)]
    pub join_table: Option<String>,
}

/// Capability interface a caller supplies to generate model-scoped rules.
/// The caller hands over exactly what rule generation needs and nothing else.
pub trait ModelDefinition {
    /// Table backing the model.
    fn table(&self) -> &str;

    /// Rules declared on the model itself, column name to pipe-delimited
    /// rule string. These override derived rules and are in turn overridden
    /// by per-call rules.
    fn base_rules(&self) -> BTreeMap<String, String>;

    /// Declared belongs-to-many relations.
    fn many_to_many(&self) -> Vec<ManyToMany>;
}
