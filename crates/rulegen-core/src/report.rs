//! Versioned JSON payload for generated rules.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use rulegen_model::DatabaseRules;

const REPORT_SCHEMA: &str = "rulegen.validation-rules";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct RulesReportPayload<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub tables: &'a DatabaseRules,
}

impl<'a> RulesReportPayload<'a> {
    pub fn new(tables: &'a DatabaseRules) -> Self {
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            tables,
        }
    }
}

/// Write the all-tables rule set as a versioned JSON report.
pub fn write_rules_report_json(output_path: &Path, rules: &DatabaseRules) -> Result<PathBuf> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let payload = RulesReportPayload::new(rules);
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(output_path, format!("{json}\n"))?;
    Ok(output_path.to_path_buf())
}
