//! Generation session tying the derivers, correction pass, and combiner
//! together over a `SchemaReader`.

use std::collections::BTreeMap;

use rulegen_model::{
    DatabaseRules, ModelDefinition, Result, RuleMap, RulegenError, Rules, TableRules,
};
use rulegen_schema::{SchemaCache, SchemaReader};
use tracing::{debug, info};

use crate::combine;
use crate::correct::{correct_column_rules, correct_table_rules};
use crate::derive::{TypeDerivation, derive_column_rules, foreign_key_rules, index_rules};
use crate::relations::many_to_many_rules;
use crate::unique::{ExcludeId, inject_exclude_id};

/// A column whose type had no derivation handler. Diagnostic only; the
/// column simply contributes no rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedColumn {
    pub table: String,
    pub column: String,
    pub type_name: String,
}

/// One rule-generation session.
///
/// Owns the per-session index/foreign-key cache, so a `Generator` must not
/// be shared across concurrent invocations; use one per in-flight request.
/// Everything else is recomputed from the schema on each call.
pub struct Generator<R: SchemaReader> {
    reader: R,
    cache: SchemaCache,
    unmapped: Vec<UnmappedColumn>,
}

impl<R: SchemaReader> Generator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            cache: SchemaCache::new(),
            unmapped: Vec::new(),
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Columns skipped because their type has no derivation handler,
    /// accumulated across this session's calls.
    pub fn unmapped_columns(&self) -> &[UnmappedColumn] {
        &self.unmapped
    }

    /// Rules for the requested slice of the schema.
    ///
    /// No table and no column is the all-tables pass; a column without a
    /// table is invalid and rejected before any schema access. An exclude
    /// id rewrites every `unique` rule in the returned subset.
    pub fn rules_for(
        &mut self,
        table: Option<&str>,
        column: Option<&str>,
        overrides: Option<&TableRules>,
        exclude: Option<&ExcludeId>,
    ) -> Result<Rules> {
        let rules = match (table, column) {
            (None, Some(_)) => {
                return Err(RulegenError::InvalidInput(
                    "a column was requested without a table".to_string(),
                ));
            }
            (None, None) => Rules::Database(self.all_table_rules()?),
            (Some(table), None) => Rules::Table(self.table_rules(table, overrides)?),
            (Some(table), Some(column)) => {
                let override_rules =
                    overrides.and_then(|rules| rules.get(column).map(String::as_str));
                Rules::Column(self.column_rules(table, column, override_rules)?)
            }
        };
        Ok(apply_exclude(rules, exclude))
    }

    /// Serialized rules for every column of a table, with overrides merged
    /// in on top of the derived rules.
    pub fn table_rules(&mut self, table: &str, overrides: Option<&TableRules>) -> Result<TableRules> {
        self.build_table_rules(table, overrides, None)
    }

    /// Serialized rules for a single column.
    pub fn column_rules(
        &mut self,
        table: &str,
        column: &str,
        overrides: Option<&str>,
    ) -> Result<String> {
        require_table_name(table)?;
        let descriptor = self.reader.column(table, column)?;
        let mut rules = match derive_column_rules(&descriptor)? {
            TypeDerivation::Mapped(rules) => rules,
            TypeDerivation::Unmapped(type_name) => {
                self.record_unmapped(table, column, type_name);
                RuleMap::new()
            }
        };
        merge_into(
            &mut rules,
            &index_rules(table, column, self.cache.indexes(&self.reader, table)?),
        );
        merge_into(
            &mut rules,
            &foreign_key_rules(column, self.cache.foreign_keys(&self.reader, table)?),
        );
        correct_column_rules(column, &mut rules);
        let overrides = overrides.map(RuleMap::parse);
        Ok(combine::combine_column(&rules, overrides.as_ref()).to_rule_string())
    }

    /// Rules scoped to a model: the model's declared base rules override the
    /// derived rules and are themselves overridden by per-call rules, and the
    /// model's belongs-to-many relations contribute payload entries.
    pub fn model_rules(
        &mut self,
        model: &dyn ModelDefinition,
        overrides: Option<&TableRules>,
        column: Option<&str>,
        exclude: Option<&ExcludeId>,
    ) -> Result<Rules> {
        let base = combine::parse_overrides(&model.base_rules());
        let caller = overrides.map(combine::parse_overrides);
        let merged: TableRules = combine::combine_table(base, caller.as_ref())
            .into_iter()
            .map(|(name, rules)| (name, rules.to_rule_string()))
            .collect();
        let rules = match column {
            Some(column) => {
                let override_rules = merged.get(column).map(String::as_str);
                Rules::Column(self.column_rules(model.table(), column, override_rules)?)
            }
            None => Rules::Table(self.build_table_rules(
                model.table(),
                Some(&merged),
                Some(model),
            )?),
        };
        Ok(apply_exclude(rules, exclude))
    }

    /// Derived rules for every table in the schema. A single table's schema
    /// failure aborts the whole pass; nothing partial is returned.
    pub fn all_table_rules(&mut self) -> Result<DatabaseRules> {
        let mut database = DatabaseRules::new();
        for table in self.reader.table_names()? {
            info!(table = %table, "deriving table rules");
            let rules = self.build_table_rules(&table, None, None)?;
            database.insert(table, rules);
        }
        Ok(database)
    }

    fn build_table_rules(
        &mut self,
        table: &str,
        overrides: Option<&TableRules>,
        model: Option<&dyn ModelDefinition>,
    ) -> Result<TableRules> {
        require_table_name(table)?;
        let derived = self.table_rule_maps(table, model)?;
        let overrides = overrides.map(combine::parse_overrides);
        let combined = combine::combine_table(derived, overrides.as_ref());
        Ok(combined
            .into_iter()
            .map(|(column, rules)| (column, rules.to_rule_string()))
            .collect())
    }

    fn table_rule_maps(
        &mut self,
        table: &str,
        model: Option<&dyn ModelDefinition>,
    ) -> Result<BTreeMap<String, RuleMap>> {
        let columns = self.reader.columns(table)?;
        let mut rules: BTreeMap<String, RuleMap> = BTreeMap::new();
        for column in columns {
            let mut map = match derive_column_rules(&column)? {
                TypeDerivation::Mapped(map) => map,
                TypeDerivation::Unmapped(type_name) => {
                    self.record_unmapped(table, &column.name, type_name);
                    continue;
                }
            };
            merge_into(
                &mut map,
                &index_rules(table, &column.name, self.cache.indexes(&self.reader, table)?),
            );
            merge_into(
                &mut map,
                &foreign_key_rules(&column.name, self.cache.foreign_keys(&self.reader, table)?),
            );
            rules.insert(column.name, map);
        }
        if let Some(model) = model {
            for (key, map) in many_to_many_rules(model) {
                rules.insert(key, map);
            }
        }
        correct_table_rules(&mut rules);
        Ok(rules)
    }

    fn record_unmapped(&mut self, table: &str, column: &str, type_name: String) {
        debug!(table, column, type_name = %type_name, "no rule mapping for column type");
        self.unmapped.push(UnmappedColumn {
            table: table.to_string(),
            column: column.to_string(),
            type_name,
        });
    }
}

fn apply_exclude(rules: Rules, exclude: Option<&ExcludeId>) -> Rules {
    match exclude {
        Some(exclude) => rules.map_strings(|value| inject_exclude_id(value, exclude)),
        None => rules,
    }
}

fn merge_into(target: &mut RuleMap, source: &RuleMap) {
    for (key, param) in source.iter() {
        target.insert(key, param.clone());
    }
}

fn require_table_name(table: &str) -> Result<()> {
    if table.trim().is_empty() {
        return Err(RulegenError::InvalidInput("empty table name".to_string()));
    }
    Ok(())
}
