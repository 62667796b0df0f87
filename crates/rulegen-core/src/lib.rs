pub mod combine;
pub mod correct;
pub mod derive;
pub mod generator;
pub mod relations;
pub mod report;
pub mod unique;

pub use combine::{combine_column, combine_table, parse_overrides};
pub use correct::{correct_column_rules, correct_table_rules};
pub use derive::{TypeDerivation, derive_column_rules, foreign_key_rules, index_rules};
pub use generator::{Generator, UnmappedColumn};
pub use relations::many_to_many_rules;
pub use report::{RulesReportPayload, write_rules_report_json};
pub use unique::{ExcludeId, inject_exclude_id};
