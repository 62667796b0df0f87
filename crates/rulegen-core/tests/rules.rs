//! Unit tests for the derivation, correction, and combination building blocks.

use std::collections::BTreeMap;

use rulegen_core::{
    TypeDerivation, combine_column, correct_table_rules, derive_column_rules, foreign_key_rules,
    index_rules, many_to_many_rules,
};
use rulegen_model::{
    ColumnDescriptor, ColumnType, ForeignKeyDescriptor, IndexDescriptor, ManyToMany,
    ModelDefinition, RuleMap, RuleParam, RulegenError,
};

fn mapped(column: &ColumnDescriptor) -> RuleMap {
    match derive_column_rules(column).unwrap() {
        TypeDerivation::Mapped(rules) => rules,
        TypeDerivation::Unmapped(name) => panic!("unexpectedly unmapped: {name}"),
    }
}

#[test]
fn integral_families_emit_integer() {
    for column_type in [
        ColumnType::BigInt,
        ColumnType::Integer,
        ColumnType::SmallInt,
        ColumnType::TinyInt,
    ] {
        let column = ColumnDescriptor::new("count", column_type).unsigned(true);
        assert_eq!(mapped(&column).to_rule_string(), "integer|min:0");
    }
}

#[test]
fn decimal_and_float_emit_numeric() {
    let column = ColumnDescriptor::new("price", ColumnType::Decimal);
    assert_eq!(mapped(&column).to_rule_string(), "numeric");

    let column = ColumnDescriptor::new("weight", ColumnType::Float).nullable(true);
    assert_eq!(mapped(&column).to_rule_string(), "nullable|numeric");
}

#[test]
fn string_families_bound_by_length() {
    let column = ColumnDescriptor::new("email", ColumnType::String).length(255);
    assert_eq!(mapped(&column).to_rule_string(), "string|max:255");

    // no declared length, no max
    let column = ColumnDescriptor::new("bio", ColumnType::Text).nullable(true);
    assert_eq!(mapped(&column).to_rule_string(), "nullable|string");
}

#[test]
fn remaining_families() {
    let column = ColumnDescriptor::new("active", ColumnType::Boolean);
    assert_eq!(mapped(&column).to_rule_string(), "boolean");

    let column = ColumnDescriptor::new("born_on", ColumnType::Date).nullable(true);
    assert_eq!(mapped(&column).to_rule_string(), "nullable|date");

    let column = ColumnDescriptor::new("meta", ColumnType::Json);
    assert_eq!(mapped(&column).to_rule_string(), "json");

    let values = vec!["draft".to_string(), "live".to_string()];
    let column = ColumnDescriptor::new("status", ColumnType::Enum(values));
    assert_eq!(mapped(&column).to_rule_string(), "in:draft,live");
}

#[test]
fn unmapped_types_are_not_errors() {
    let column = ColumnDescriptor::new("pos", ColumnType::Other("geometry".to_string()));
    assert_eq!(
        derive_column_rules(&column).unwrap(),
        TypeDerivation::Unmapped("geometry".to_string())
    );

    let column = ColumnDescriptor::new("opens_at", ColumnType::Time);
    assert!(matches!(
        derive_column_rules(&column).unwrap(),
        TypeDerivation::Unmapped(_)
    ));
}

#[test]
fn empty_type_name_is_an_error() {
    let column = ColumnDescriptor::new("broken", ColumnType::Other(String::new()));
    assert!(matches!(
        derive_column_rules(&column),
        Err(RulegenError::InvalidType(_))
    ));
}

#[test]
fn index_rules_only_fire_for_single_column_unique() {
    let indexes = vec![
        IndexDescriptor {
            columns: vec!["email".to_string()],
            unique: true,
            name: None,
        },
        IndexDescriptor {
            columns: vec!["a".to_string(), "b".to_string()],
            unique: true,
            name: None,
        },
        IndexDescriptor {
            columns: vec!["name".to_string()],
            unique: false,
            name: None,
        },
    ];
    assert_eq!(
        index_rules("users", "email", &indexes).to_rule_string(),
        "unique:users,email"
    );
    assert!(index_rules("users", "a", &indexes).is_empty());
    assert!(index_rules("users", "name", &indexes).is_empty());
}

#[test]
fn foreign_key_rules_target_first_referenced_column() {
    let keys = vec![ForeignKeyDescriptor {
        columns: vec!["team_id".to_string(), "org_id".to_string()],
        referenced_table: "teams".to_string(),
        referenced_columns: vec!["id".to_string(), "org".to_string()],
    }];
    assert_eq!(
        foreign_key_rules("team_id", &keys).to_rule_string(),
        "exists:teams,id"
    );
    assert_eq!(
        foreign_key_rules("org_id", &keys).to_rule_string(),
        "exists:teams,id"
    );
    assert!(foreign_key_rules("other", &keys).is_empty());
}

fn fk_id_map() -> RuleMap {
    let mut map = RuleMap::new();
    map.insert("integer", RuleParam::None);
    map.insert("min", RuleParam::Int(0));
    map.insert("exists", RuleParam::text("users,id"));
    map
}

#[test]
fn correction_raises_min_for_foreign_key_ids() {
    let mut rules = BTreeMap::new();
    rules.insert("user_id".to_string(), fk_id_map());
    correct_table_rules(&mut rules);
    assert_eq!(rules["user_id"].get("min"), Some(&RuleParam::Int(1)));
}

#[test]
fn correction_leaves_other_columns_alone() {
    let mut no_exists = RuleMap::new();
    no_exists.insert("integer", RuleParam::None);
    no_exists.insert("min", RuleParam::Int(0));

    let mut rules = BTreeMap::new();
    // _id in the name but no exists rule
    rules.insert("external_id".to_string(), no_exists.clone());
    // exists and min 0 but no _id in the name
    rules.insert("owner".to_string(), fk_id_map());

    correct_table_rules(&mut rules);
    assert_eq!(rules["external_id"].get("min"), Some(&RuleParam::Int(0)));
    assert_eq!(rules["owner"].get("min"), Some(&RuleParam::Int(0)));
}

#[test]
fn correction_is_idempotent() {
    let mut rules = BTreeMap::new();
    rules.insert("user_id".to_string(), fk_id_map());
    correct_table_rules(&mut rules);
    let once = rules.clone();
    correct_table_rules(&mut rules);
    assert_eq!(rules, once);
}

#[test]
fn combiner_precedence_is_override_wins() {
    let mut derived = RuleMap::new();
    derived.insert("numeric", RuleParam::None);

    let mut overrides = RuleMap::new();
    overrides.insert("numeric", RuleParam::None);
    overrides.insert("required", RuleParam::None);

    let combined = combine_column(&derived, Some(&overrides));
    assert_eq!(combined.to_rule_string(), "numeric|required");

    // keys present in only one source are preserved
    let mut derived = RuleMap::new();
    derived.insert("integer", RuleParam::None);
    derived.insert("min", RuleParam::Int(0));
    let mut overrides = RuleMap::new();
    overrides.insert("min", RuleParam::Int(5));
    let combined = combine_column(&derived, Some(&overrides));
    assert_eq!(combined.to_rule_string(), "integer|min:5");
}

struct TaggedModel;

impl ModelDefinition for TaggedModel {
    fn table(&self) -> &str {
        "articles"
    }

    fn base_rules(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn many_to_many(&self) -> Vec<ManyToMany> {
        vec![ManyToMany {
            relation: "tags".to_string(),
            related_table: "tags".to_string(),
            join_table: Some("article_tag".to_string()),
        }]
    }
}

#[test]
fn many_to_many_entries_per_relation() {
    let entries = many_to_many_rules(&TaggedModel);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, "tags");
    assert_eq!(entries[0].1.to_rule_string(), "nullable|array");
    assert_eq!(entries[1].0, "tags.*");
    assert_eq!(entries[1].1.to_rule_string(), "numeric|min:1|exists:tags,id");
}
