#![deny(missing_docs)]

//! # Literal Patching
//!
//! The patching engine: ordered, exact-match string edits over a text buffer.
//!
//! - **rules**: Rule types and the replacement fold.
//! - **files**: Reading and overwriting the target file.
//! - **recipes**: The built-in client-upgrade plan.

/// File-level patching (read, apply, overwrite).
pub mod files;

/// Built-in patch plans.
pub mod recipes;

/// Rule types and the replacement fold.
pub mod rules;

// Re-export the public API at the module root.
pub use files::patch_file;
pub use recipes::{client_upgrade_plan, DEFAULT_TARGET, EXPORT_MARKER};
pub use rules::{apply_patches, apply_rule, apply_rules, Edit, PatchPlan, PatchRule};
