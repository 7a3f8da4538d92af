//! Domain events for the lease builder
//!
//! The store records an event for every transition. `DraftSaved` and
//! `LeaseFinalized` are the terminal notifications a host application
//! listens for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{LeaseId, TemplateId};

use crate::status::WizardStep;

/// Events emitted by the lease draft store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeaseEvent {
    /// A template was chosen and its required clauses seeded
    TemplateSelected {
        lease_id: LeaseId,
        template_id: TemplateId,
        timestamp: DateTime<Utc>,
    },

    /// The wizard moved forward
    StepAdvanced {
        lease_id: LeaseId,
        from: WizardStep,
        to: WizardStep,
        timestamp: DateTime<Utc>,
    },

    /// The wizard moved back
    StepReverted {
        lease_id: LeaseId,
        from: WizardStep,
        to: WizardStep,
        timestamp: DateTime<Utc>,
    },

    /// The draft was persisted
    DraftSaved {
        lease_id: LeaseId,
        step: WizardStep,
        timestamp: DateTime<Utc>,
    },

    /// The lease was assembled and stored as a final document
    LeaseFinalized {
        lease_id: LeaseId,
        template_id: TemplateId,
        timestamp: DateTime<Utc>,
    },

    /// The builder was cleared
    BuilderReset {
        lease_id: LeaseId,
        timestamp: DateTime<Utc>,
    },
}

impl LeaseEvent {
    /// Returns the lease the event belongs to
    pub fn lease_id(&self) -> LeaseId {
        match self {
            LeaseEvent::TemplateSelected { lease_id, .. } => *lease_id,
            LeaseEvent::StepAdvanced { lease_id, .. } => *lease_id,
            LeaseEvent::StepReverted { lease_id, .. } => *lease_id,
            LeaseEvent::DraftSaved { lease_id, .. } => *lease_id,
            LeaseEvent::LeaseFinalized { lease_id, .. } => *lease_id,
            LeaseEvent::BuilderReset { lease_id, .. } => *lease_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LeaseEvent::TemplateSelected { timestamp, .. } => *timestamp,
            LeaseEvent::StepAdvanced { timestamp, .. } => *timestamp,
            LeaseEvent::StepReverted { timestamp, .. } => *timestamp,
            LeaseEvent::DraftSaved { timestamp, .. } => *timestamp,
            LeaseEvent::LeaseFinalized { timestamp, .. } => *timestamp,
            LeaseEvent::BuilderReset { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            LeaseEvent::TemplateSelected { .. } => "TemplateSelected",
            LeaseEvent::StepAdvanced { .. } => "StepAdvanced",
            LeaseEvent::StepReverted { .. } => "StepReverted",
            LeaseEvent::DraftSaved { .. } => "DraftSaved",
            LeaseEvent::LeaseFinalized { .. } => "LeaseFinalized",
            LeaseEvent::BuilderReset { .. } => "BuilderReset",
        }
    }

    /// True for the events a host application treats as terminal
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LeaseEvent::DraftSaved { .. } | LeaseEvent::LeaseFinalized { .. }
        )
    }
}
