//! Post-derivation correction pass.
//!
//! Runs after per-column derivation and before caller overrides merge in.
//! Idempotent: applying it twice is the same as applying it once.

use std::collections::BTreeMap;

use rulegen_model::{RuleMap, RuleParam};

/// Raise `min` from 0 to 1 on foreign-key id columns.
///
/// An unsigned id column derives `min:0` from its type alone, but an id of 0
/// never references a real row; any `_id` column that also carries an
/// `exists` rule gets the tighter bound.
pub fn correct_table_rules(rules: &mut BTreeMap<String, RuleMap>) {
    for (column, map) in rules.iter_mut() {
        correct_column_rules(column, map);
    }
}

pub fn correct_column_rules(column: &str, rules: &mut RuleMap) {
    if column.contains("_id")
        && rules.contains("exists")
        && rules.get("min") == Some(&RuleParam::Int(0))
    {
        rules.insert("min", RuleParam::Int(1));
    }
}
