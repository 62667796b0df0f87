pub mod column;
pub mod error;
pub mod model;
pub mod rules;

pub use column::{ColumnDescriptor, ColumnType, ForeignKeyDescriptor, IndexDescriptor};
pub use error::{Result, RulegenError};
pub use model::{ManyToMany, ModelDefinition};
pub use rules::{DatabaseRules, RuleMap, RuleParam, Rules, TableRules};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_map_preserves_insertion_order() {
        let mut map = RuleMap::new();
        map.insert("nullable", RuleParam::None);
        map.insert("integer", RuleParam::None);
        map.insert("min", RuleParam::Int(0));
        assert_eq!(map.to_rule_string(), "nullable|integer|min:0");
    }

    #[test]
    fn rule_map_insert_overwrites_in_place() {
        let mut map = RuleMap::new();
        map.insert("integer", RuleParam::None);
        map.insert("min", RuleParam::Int(0));
        map.insert("unique", RuleParam::text("users,id"));
        map.insert("min", RuleParam::Int(1));
        assert_eq!(map.to_rule_string(), "integer|min:1|unique:users,id");
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn rule_map_parse_round_trips() {
        let map = RuleMap::parse("required|max:50|exists:teams,id");
        assert_eq!(map.get("max"), Some(&RuleParam::Int(50)));
        assert_eq!(map.get("exists"), Some(&RuleParam::text("teams,id")));
        assert_eq!(map.to_rule_string(), "required|max:50|exists:teams,id");
    }

    #[test]
    fn column_type_parse_maps_families() {
        assert_eq!(ColumnType::parse("BIGINT").unwrap(), ColumnType::BigInt);
        assert!(ColumnType::BigInt.is_integral());
        assert!(!ColumnType::Decimal.is_integral());
        assert_eq!(ColumnType::parse("varchar").unwrap(), ColumnType::String);
        assert_eq!(
            ColumnType::parse("geometry").unwrap(),
            ColumnType::Other("geometry".to_string())
        );
        assert!(ColumnType::parse("  ").is_err());
    }

    #[test]
    fn single_column_unique_detection() {
        let index = IndexDescriptor {
            columns: vec!["email".to_string()],
            unique: true,
            name: None,
        };
        assert!(index.is_single_column_unique("email"));
        assert!(!index.is_single_column_unique("name"));

        let composite = IndexDescriptor {
            columns: vec!["a".to_string(), "b".to_string()],
            unique: true,
            name: None,
        };
        assert!(!composite.is_single_column_unique("a"));
    }

    #[test]
    fn rules_serialize_by_shape() {
        let column = Rules::Column("nullable|string".to_string());
        assert_eq!(
            serde_json::to_string(&column).unwrap(),
            "\"nullable|string\""
        );

        let mut table = TableRules::new();
        table.insert("name".to_string(), "string|max:255".to_string());
        let json = serde_json::to_string(&Rules::Table(table)).unwrap();
        assert_eq!(json, "{\"name\":\"string|max:255\"}");
    }
}
