//! Rules for belongs-to-many relation payloads.

use rulegen_model::{ModelDefinition, RuleMap, RuleParam};

/// Synthesize rule entries for a model's many-to-many relations.
///
/// The relation key itself is an optional list (`nullable|array`); the
/// wildcard child key validates each submitted id as a positive integer
/// that exists in the related table's id column.
pub fn many_to_many_rules(model: &dyn ModelDefinition) -> Vec<(String, RuleMap)> {
    let mut entries = Vec::new();
    for relation in model.many_to_many() {
        let mut list_rules = RuleMap::new();
        list_rules.insert("nullable", RuleParam::None);
        list_rules.insert("array", RuleParam::None);
        entries.push((relation.relation.clone(), list_rules));

        let mut element_rules = RuleMap::new();
        element_rules.insert("numeric", RuleParam::None);
        element_rules.insert("min", RuleParam::Int(1));
        element_rules.insert(
            "exists",
            RuleParam::text(format!("{},id", relation.related_table)),
        );
        entries.push((format!("{}.*", relation.relation), element_rules));
    }
    entries
}
