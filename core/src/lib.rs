#![deny(missing_docs)]

//! # Acpatch Core
//!
//! Core library for the ActiveCampaign client patching tool.

/// Shared error types.
pub mod error;

/// Literal string patching engine.
pub mod patcher;

/// Per-rule outcome reporting.
pub mod report;

pub use error::{AppError, AppResult};
pub use patcher::{
    apply_patches, apply_rule, apply_rules, client_upgrade_plan, patch_file, Edit, PatchPlan,
    PatchRule, DEFAULT_TARGET, EXPORT_MARKER,
};
pub use report::{PatchReport, RuleOutcome};
