#![deny(missing_docs)]

//! # Plan Command
//!
//! Renders the built-in client-upgrade plan so the rule sequence can be
//! inspected without touching any file.

use std::fs;
use std::path::PathBuf;

use acpatch_core::client_upgrade_plan;
use clap::ValueEnum;

use crate::error::{CliError, CliResult};

/// Serialization formats for the rendered plan.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    /// YAML document.
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the plan command.
#[derive(clap::Args, Debug, Clone)]
pub struct PlanArgs {
    /// Output path for the rendered plan.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints YAML to stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Serialization format. Overrides the output extension.
    #[clap(long, value_enum)]
    pub format: Option<PlanFormat>,
}

/// Executes the plan command.
pub fn execute(args: &PlanArgs) -> CliResult<()> {
    let plan = client_upgrade_plan();

    // 1. Pick the format: explicit flag first, then the output extension.
    let format = args.format.unwrap_or_else(|| match &args.output {
        Some(path) if path.extension().and_then(|e| e.to_str()) == Some("json") => PlanFormat::Json,
        _ => PlanFormat::Yaml,
    });

    // 2. Render
    let rendered = match format {
        PlanFormat::Yaml => serde_yaml::to_string(&plan)
            .map_err(|e| CliError::General(format!("YAML serialization failed: {}", e)))?,
        PlanFormat::Json => serde_json::to_string_pretty(&plan)
            .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?,
    };

    // 3. Write result
    if let Some(out_path) = &args.output {
        if let Some(parent) = out_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(out_path, rendered)?;
        println!("Patch plan written to {:?}", out_path);
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_plan_defaults_to_yaml() {
        let dir = tempdir().unwrap();
        let out_path = dir.path().join("plan.yaml");

        let args = PlanArgs {
            output: Some(out_path.clone()),
            format: None,
        };
        execute(&args).unwrap();

        let rendered = fs::read_to_string(&out_path).unwrap();
        assert!(rendered.contains("target: src/lib/activecampaign.ts"));
        assert!(rendered.contains("custom-field-env"));
        assert!(rendered.contains("replace_first:"));
        assert!(rendered.contains("insert_before:"));
    }

    #[test]
    fn test_plan_json_by_extension() {
        let dir = tempdir().unwrap();
        let out_path = dir.path().join("nested").join("plan.json");

        let args = PlanArgs {
            output: Some(out_path.clone()),
            format: None,
        };
        execute(&args).unwrap();

        let rendered = fs::read_to_string(&out_path).unwrap();
        assert!(rendered.trim_start().starts_with('{'));
        assert!(rendered.contains("\"insert_before\""));
    }

    #[test]
    fn test_plan_format_flag_wins_over_extension() {
        let dir = tempdir().unwrap();
        let out_path = dir.path().join("plan.yaml");

        let args = PlanArgs {
            output: Some(out_path.clone()),
            format: Some(PlanFormat::Json),
        };
        execute(&args).unwrap();

        let rendered = fs::read_to_string(&out_path).unwrap();
        assert!(rendered.trim_start().starts_with('{'));
    }
}
