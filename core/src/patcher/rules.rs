#![deny(missing_docs)]

//! # Replacement Rules
//!
//! Ordered, exact-match string edits over a text buffer. Needles are plain
//! substrings; there are no regex semantics anywhere in the engine. An
//! unmatched rule never fails the run: the buffer passes through unchanged
//! and the outcome records the skip.

use serde::{Deserialize, Serialize};

use crate::report::{PatchReport, RuleOutcome};

/// A single literal edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edit {
    /// Replaces the first occurrence of `needle` with `replacement`.
    ReplaceFirst {
        /// Exact substring searched for.
        needle: String,
        /// Text substituted for the needle.
        replacement: String,
    },
    /// Inserts `block` immediately before the first occurrence of `marker`.
    InsertBefore {
        /// Anchor the block lands in front of. The marker itself is kept.
        marker: String,
        /// Text inserted before the marker. May span multiple lines.
        block: String,
    },
}

/// A named edit, applied as one step of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRule {
    /// Name the rule is reported under.
    pub name: String,
    /// The edit this rule performs.
    #[serde(flatten)]
    pub edit: Edit,
}

impl PatchRule {
    /// Builds a first-occurrence replacement rule.
    pub fn replace_first(name: &str, needle: &str, replacement: &str) -> Self {
        Self {
            name: name.to_string(),
            edit: Edit::ReplaceFirst {
                needle: needle.to_string(),
                replacement: replacement.to_string(),
            },
        }
    }

    /// Builds an insert-before-marker rule.
    pub fn insert_before(name: &str, marker: &str, block: &str) -> Self {
        Self {
            name: name.to_string(),
            edit: Edit::InsertBefore {
                marker: marker.to_string(),
                block: block.to_string(),
            },
        }
    }
}

/// An ordered rule sequence plus the path it is meant to run against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchPlan {
    /// Path of the file the rules apply to.
    pub target: String,
    /// Rules in application order.
    pub rules: Vec<PatchRule>,
}

/// Applies one rule to the buffer.
///
/// Returns the resulting buffer and whether the rule matched. An absent
/// needle or marker leaves the buffer byte-for-byte unchanged.
pub fn apply_rule(source: &str, rule: &PatchRule) -> (String, RuleOutcome) {
    let (needle, inserted) = match &rule.edit {
        Edit::ReplaceFirst {
            needle,
            replacement,
        } => (needle.as_str(), replacement.clone()),
        Edit::InsertBefore { marker, block } => (marker.as_str(), format!("{}{}", block, marker)),
    };

    if !source.contains(needle) {
        return (source.to_string(), RuleOutcome::Skipped);
    }

    (source.replacen(needle, &inserted, 1), RuleOutcome::Applied)
}

/// Folds the rule sequence over the buffer, collecting per-rule outcomes.
///
/// Each rule operates on the output of the previous one, so a rule's
/// replacement text may be the context a later rule's needle depends on.
pub fn apply_rules(source: &str, rules: &[PatchRule]) -> (String, PatchReport) {
    let mut buffer = source.to_string();
    let mut report = PatchReport::new();

    for rule in rules {
        let (next, outcome) = apply_rule(&buffer, rule);
        report.record(&rule.name, outcome);
        buffer = next;
    }

    (buffer, report)
}

/// Applies the rule sequence and discards the report.
pub fn apply_patches(source: &str, rules: &[PatchRule]) -> String {
    apply_rules(source, rules).0
}
