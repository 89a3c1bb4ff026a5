#![deny(missing_docs)]

//! # File Patching
//!
//! One scoped read, the rule fold, one scoped write.

use std::fs;
use std::path::Path;

use crate::error::AppResult;
use crate::patcher::rules::{apply_rules, PatchRule};
use crate::report::PatchReport;

/// Patches a file in place.
///
/// Reads the target in full, applies the rules in order and overwrites the
/// file with the result. The write is skipped when no rule changed the
/// buffer. IO failures propagate as [`crate::AppError::Io`]; an unmatched
/// rule does not fail the run and only shows up in the report.
///
/// There is no backup and no atomic rename; a crash mid-write can leave a
/// truncated destination.
pub fn patch_file(path: &Path, rules: &[PatchRule]) -> AppResult<PatchReport> {
    let source = fs::read_to_string(path)?;

    let (patched, report) = apply_rules(&source, rules);

    if patched != source {
        fs::write(path, patched)?;
    }

    Ok(report)
}
