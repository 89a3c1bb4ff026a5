#![deny(missing_docs)]

//! # Outcome Reporting
//!
//! Records what each rule did during a run. The engine tolerates a missing
//! needle without failing; the report is where a silently skipped step stays
//! visible to the caller.

use indexmap::IndexMap;
use std::fmt::{self, Display};

/// Result of applying one rule to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The needle or marker was found and the edit was made.
    Applied,
    /// The needle or marker was absent; the buffer passed through unchanged.
    Skipped,
}

impl Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleOutcome::Applied => write!(f, "applied"),
            RuleOutcome::Skipped => write!(f, "skipped (no match)"),
        }
    }
}

/// Ordered record of rule outcomes, keyed by rule name.
#[derive(Debug, Default)]
pub struct PatchReport {
    outcomes: IndexMap<String, RuleOutcome>,
}

impl PatchReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a rule. A later record under the same name
    /// replaces the earlier one.
    pub fn record(&mut self, name: &str, outcome: RuleOutcome) {
        self.outcomes.insert(name.to_string(), outcome);
    }

    /// Looks up the outcome of a rule by name.
    pub fn outcome(&self, name: &str) -> Option<RuleOutcome> {
        self.outcomes.get(name).copied()
    }

    /// True when every recorded rule was applied.
    pub fn is_clean(&self) -> bool {
        self.outcomes.values().all(|o| *o == RuleOutcome::Applied)
    }

    /// Names of the rules that matched nothing, in application order.
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| **o == RuleOutcome::Skipped)
            .map(|(name, _)| name.as_str())
    }

    /// Number of rules recorded.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when no rule has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, outcome) in &self.outcomes {
            writeln!(f, "  {}: {}", name, outcome)?;
        }
        let applied = self
            .outcomes
            .values()
            .filter(|o| **o == RuleOutcome::Applied)
            .count();
        write!(f, "{} of {} rules applied", applied, self.outcomes.len())
    }
}
