//! Wizard steps and lease lifecycle status

use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Template,
    Property,
    Tenant,
    Terms,
    AdditionalTerms,
    CustomClauses,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        WizardStep::Template,
        WizardStep::Property,
        WizardStep::Tenant,
        WizardStep::Terms,
        WizardStep::AdditionalTerms,
        WizardStep::CustomClauses,
        WizardStep::Review,
    ];

    pub const FIRST: WizardStep = WizardStep::Template;
    pub const LAST: WizardStep = WizardStep::Review;

    /// Zero-based step index in `[0, 6]`
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The following step, saturating at Review
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(Self::LAST)
    }

    /// The preceding step, saturating at Template
    pub fn prev(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(Self::FIRST)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Template => "Select Template",
            WizardStep::Property => "Property & Unit",
            WizardStep::Tenant => "Tenant Information",
            WizardStep::Terms => "Lease Terms",
            WizardStep::AdditionalTerms => "Additional Terms",
            WizardStep::CustomClauses => "Custom Clauses",
            WizardStep::Review => "Review & Finalize",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Lifecycle of a lease under construction
///
/// ```text
/// Building(step) --save_draft--> Draft --edit--> Building(step)
///        \                          |
///         \-------finalize----------+--> Finalized
/// ```
///
/// `Finalized` only appears on assembled documents; the store resets to
/// `Building` at step 0 once a lease is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LeaseStatus {
    Building { step: WizardStep },
    Draft,
    Finalized,
}

impl LeaseStatus {
    pub fn is_editable(&self) -> bool {
        !matches!(self, LeaseStatus::Finalized)
    }
}

impl Default for LeaseStatus {
    fn default() -> Self {
        LeaseStatus::Building {
            step: WizardStep::FIRST,
        }
    }
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaseStatus::Building { step } => write!(f, "building ({})", step),
            LeaseStatus::Draft => f.write_str("draft"),
            LeaseStatus::Finalized => f.write_str("finalized"),
        }
    }
}
