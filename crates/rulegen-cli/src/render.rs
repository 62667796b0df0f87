use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use rulegen_model::{Rules, TableRules};

use crate::cli::RenderFormatArg;

pub fn print_rules(rules: &Rules, format: RenderFormatArg) -> Result<()> {
    match format {
        RenderFormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(rules)?);
        }
        RenderFormatArg::Table => match rules {
            Rules::Column(value) => println!("{value}"),
            Rules::Table(table) => print_table_rules(table),
            Rules::Database(database) => {
                for (name, table) in database {
                    println!("{name}");
                    print_table_rules(table);
                }
            }
        },
    }
    Ok(())
}

fn print_table_rules(rules: &TableRules) {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Rules"]);
    apply_table_style(&mut table);
    for (column, value) in rules {
        table.add_row(vec![column.clone(), value.clone()]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
