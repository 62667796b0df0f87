//! Merging derived rules with caller-supplied overrides.
//!
//! Overrides always win for identical rule keys; keys present in only one
//! source are preserved. The table shape recurses exactly one level.

use std::collections::BTreeMap;

use rulegen_model::{RuleMap, TableRules};

/// Merge one column's derived rules with its override rules.
pub fn combine_column(derived: &RuleMap, overrides: Option<&RuleMap>) -> RuleMap {
    let mut combined = derived.clone();
    if let Some(overrides) = overrides {
        for (key, param) in overrides.iter() {
            combined.insert(key, param.clone());
        }
    }
    combined
}

/// Merge a whole table's derived rules with table-shaped overrides.
pub fn combine_table(
    derived: BTreeMap<String, RuleMap>,
    overrides: Option<&BTreeMap<String, RuleMap>>,
) -> BTreeMap<String, RuleMap> {
    let Some(overrides) = overrides else {
        return derived;
    };
    let mut combined = derived;
    for (column, override_map) in overrides {
        let merged = match combined.get(column) {
            Some(existing) => combine_column(existing, Some(override_map)),
            None => override_map.clone(),
        };
        combined.insert(column.clone(), merged);
    }
    combined
}

/// Parse string-form overrides (column name to pipe-delimited rules) into
/// rule maps for merging.
pub fn parse_overrides(overrides: &TableRules) -> BTreeMap<String, RuleMap> {
    overrides
        .iter()
        .map(|(column, rules)| (column.clone(), RuleMap::parse(rules)))
        .collect()
}
