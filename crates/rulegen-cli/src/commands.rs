use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::warn;

use rulegen_core::{ExcludeId, Generator, write_rules_report_json};
use rulegen_model::{Rules, RulegenError, TableRules};
use rulegen_schema::SchemaSnapshot;

use crate::cli::{AllArgs, ModelArgs, TableArgs};
use crate::render::{apply_table_style, print_rules};

pub fn run_table(schema: &Path, args: &TableArgs) -> Result<()> {
    let snapshot = load_snapshot(schema)?;
    let overrides = load_overrides(args.overrides.as_deref())?;
    let exclude = build_exclude(args.exclude_id.as_deref(), &args.id_column);
    let mut generator = Generator::new(snapshot);
    let rules = generator.rules_for(
        Some(&args.table),
        args.column.as_deref(),
        overrides.as_ref(),
        exclude.as_ref(),
    )?;
    warn_unmapped(&generator);
    print_rules(&rules, args.format)?;
    Ok(())
}

pub fn run_model(schema: &Path, args: &ModelArgs) -> Result<()> {
    let snapshot = load_snapshot(schema)?;
    let model = snapshot
        .model(&args.model)
        .cloned()
        .ok_or_else(|| RulegenError::UnknownModel(args.model.clone()))?;
    let overrides = load_overrides(args.overrides.as_deref())?;
    let exclude = build_exclude(args.exclude_id.as_deref(), &args.id_column);
    let mut generator = Generator::new(snapshot);
    let rules = generator.model_rules(
        &model,
        overrides.as_ref(),
        args.column.as_deref(),
        exclude.as_ref(),
    )?;
    warn_unmapped(&generator);
    print_rules(&rules, args.format)?;
    Ok(())
}

pub fn run_all(schema: &Path, args: &AllArgs) -> Result<()> {
    let snapshot = load_snapshot(schema)?;
    let mut generator = Generator::new(snapshot);
    let database = generator.all_table_rules()?;
    warn_unmapped(&generator);
    if let Some(output) = &args.output {
        let path = write_rules_report_json(output, &database)
            .with_context(|| format!("write rules report {}", output.display()))?;
        println!("Rules report: {}", path.display());
    }
    print_rules(&Rules::Database(database), args.format)?;
    Ok(())
}

pub fn run_tables(schema: &Path) -> Result<()> {
    let snapshot = load_snapshot(schema)?;
    let mut table = Table::new();
    table.set_header(vec!["Table", "Columns", "Indexes", "Foreign keys"]);
    apply_table_style(&mut table);
    for record in &snapshot.tables {
        table.add_row(vec![
            record.name.clone(),
            record.columns.len().to_string(),
            record.indexes.len().to_string(),
            record.foreign_keys.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn load_snapshot(schema: &Path) -> Result<SchemaSnapshot> {
    SchemaSnapshot::load(schema)
        .with_context(|| format!("load schema snapshot {}", schema.display()))
}

fn load_overrides(path: Option<&Path>) -> Result<Option<TableRules>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read overrides {}", path.display()))?;
    let overrides: TableRules = serde_json::from_str(&raw)
        .with_context(|| format!("parse overrides {}", path.display()))?;
    Ok(Some(overrides))
}

fn build_exclude(id: Option<&str>, id_column: &str) -> Option<ExcludeId> {
    id.map(|id| ExcludeId::new(id).with_id_column(id_column))
}

fn warn_unmapped<R: rulegen_schema::SchemaReader>(generator: &Generator<R>) {
    for unmapped in generator.unmapped_columns() {
        warn!(
            table = %unmapped.table,
            column = %unmapped.column,
            type_name = %unmapped.type_name,
            "column skipped: no rule mapping for its type"
        );
    }
}
