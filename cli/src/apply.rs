#![deny(missing_docs)]

//! # Apply Command
//!
//! Runs the client-upgrade plan against the target file.

use std::fs;
use std::path::PathBuf;

use acpatch_core::{apply_rules, client_upgrade_plan, patch_file, PatchReport, DEFAULT_TARGET};

use crate::error::CliResult;

/// Arguments for the apply command.
#[derive(clap::Args, Debug, Clone)]
pub struct ApplyArgs {
    /// Path to the API client file to patch.
    #[clap(long, env = "ACPATCH_TARGET", default_value = DEFAULT_TARGET)]
    pub target: PathBuf,

    /// Applies the rules in memory and prints the report without writing.
    #[clap(long)]
    pub check: bool,
}

impl Default for ApplyArgs {
    // the bare `acpatch` invocation resolves its target the same way the
    // parsed flags would
    fn default() -> Self {
        let target = std::env::var_os("ACPATCH_TARGET")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET));
        Self {
            target,
            check: false,
        }
    }
}

/// Executes the apply command.
///
/// An unreadable target fails before anything is written. Rules that match
/// nothing are warnings, never failures.
pub fn execute(args: &ApplyArgs) -> CliResult<()> {
    let plan = client_upgrade_plan();

    if args.check {
        let source = fs::read_to_string(&args.target)?;
        let (_, report) = apply_rules(&source, &plan.rules);
        warn_skipped(&report);
        println!("{}", report);
        return Ok(());
    }

    let report = patch_file(&args.target, &plan.rules)?;
    warn_skipped(&report);
    println!("Client upgrade applied successfully.");

    Ok(())
}

fn warn_skipped(report: &PatchReport) {
    for name in report.skipped() {
        eprintln!("warning: rule '{}' matched nothing", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acpatch_core::EXPORT_MARKER;
    use crate::error::CliError;
    use tempfile::tempdir;

    fn minimal_client() -> String {
        format!(
            "export class ActiveCampaignClient {{\n  isConfigured(): boolean {{\n    return false\n  }}\n\n{}\n",
            EXPORT_MARKER
        )
    }

    #[test]
    fn test_apply_patches_target_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("activecampaign.ts");
        fs::write(&path, minimal_client()).unwrap();

        let args = ApplyArgs {
            target: path.clone(),
            check: false,
        };
        execute(&args).unwrap();

        let patched = fs::read_to_string(&path).unwrap();
        assert!(patched.contains("async getContactsByTagAndCustomDate("));
        assert!(patched.contains(EXPORT_MARKER));
    }

    #[test]
    fn test_apply_check_leaves_target_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("activecampaign.ts");
        let original = minimal_client();
        fs::write(&path, &original).unwrap();

        let args = ApplyArgs {
            target: path.clone(),
            check: true,
        };
        execute(&args).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_apply_missing_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.ts");

        let args = ApplyArgs {
            target: path.clone(),
            check: false,
        };
        let err = execute(&args).unwrap_err();

        assert!(matches!(err, CliError::Io(_)));
        assert!(!path.exists());
    }
}
