//! Persisted records and the finalized lease document

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClauseId, LeaseId, Money, TemplateId};
use domain_catalog::{LeaseTemplate, LeaseType};

use crate::draft::{AdditionalTerms, LeaseDraft, Parties, PropertySelection};
use crate::error::LeaseError;
use crate::status::{LeaseStatus, WizardStep};
use crate::terms::{LeaseTerms, PaymentSchedule};
use crate::validation::{validate_draft, FieldError};

/// A saved, still editable draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseRecord {
    pub id: LeaseId,
    pub status: LeaseStatus,
    pub current_step: WizardStep,
    pub draft: LeaseDraft,
    pub saved_at: DateTime<Utc>,
}

/// A clause as it appears in the final document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentClause {
    pub id: ClauseId,
    pub title: String,
    pub required: bool,
}

/// The assembled lease
///
/// Unlike [`LeaseDraft`], every section the wizard requires is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseDocument {
    pub id: LeaseId,
    pub status: LeaseStatus,
    pub template_id: TemplateId,
    pub template_name: String,
    pub lease_type: LeaseType,
    pub property: PropertySelection,
    pub parties: Parties,
    pub terms: LeaseTerms,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_terms: Option<AdditionalTerms>,
    /// Selected clauses in the order the template lists them
    pub clauses: Vec<DocumentClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_clauses: Option<String>,
    pub move_in_total: Money,
    pub finalized_at: DateTime<Utc>,
}

impl LeaseDocument {
    /// Assembles a document from a draft, re-checking every required section
    ///
    /// # Errors
    ///
    /// - `LeaseError::Incomplete` if any required section is missing or
    ///   invalid, listing every failing field
    /// - `LeaseError::TemplateNotFound` if `template` is not the one the draft
    ///   was built from
    /// - `LeaseError::Calculation` if the move-in total cannot be computed
    pub fn assemble(
        id: LeaseId,
        draft: &LeaseDraft,
        template: &LeaseTemplate,
        finalized_at: DateTime<Utc>,
    ) -> Result<Self, LeaseError> {
        let result = validate_draft(draft);
        if !result.is_valid() {
            return Err(LeaseError::Incomplete {
                errors: result.into_errors(),
            });
        }

        let (template_id, property, parties, terms) = match (
            &draft.template_id,
            &draft.property,
            &draft.parties,
            &draft.terms,
        ) {
            (Some(t), Some(p), Some(pa), Some(te)) => (t, p, pa, te),
            _ => {
                return Err(LeaseError::Incomplete {
                    errors: vec![FieldError::new("lease", "Required sections are missing")],
                })
            }
        };

        if *template_id != template.id {
            return Err(LeaseError::TemplateNotFound(template_id.to_string()));
        }

        let clauses = template
            .clauses
            .iter()
            .filter(|c| c.required || draft.selected_clauses.contains(&c.id))
            .map(|c| DocumentClause {
                id: c.id.clone(),
                title: c.title.clone(),
                required: c.required,
            })
            .collect();

        Ok(Self {
            id,
            status: LeaseStatus::Finalized,
            template_id: template_id.clone(),
            template_name: template.name.clone(),
            lease_type: draft.lease_type.unwrap_or(template.lease_type),
            property: property.clone(),
            parties: parties.clone(),
            terms: terms.clone(),
            additional_terms: draft.additional_terms.clone(),
            clauses,
            custom_clauses: draft.custom_clauses.clone(),
            move_in_total: terms.move_in_total()?,
            finalized_at,
        })
    }
}

/// Read-only digest shown on the review step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub template_name: Option<String>,
    pub lease_type: Option<LeaseType>,
    pub property_line: Option<String>,
    pub landlord_name: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_email: Option<String>,
    pub tenant_phone: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_months: Option<u32>,
    pub rent_amount: Option<Money>,
    pub security_deposit: Option<Money>,
    pub payment_schedule: Option<PaymentSchedule>,
    pub move_in_total: Option<Money>,
    pub clause_titles: Vec<String>,
    pub extras: Vec<String>,
    pub custom_clauses: Option<String>,
    /// Fields that would block finalize
    pub missing: Vec<FieldError>,
}

impl ReviewSummary {
    pub fn from_draft(draft: &LeaseDraft, template: Option<&LeaseTemplate>) -> Self {
        let terms = draft.terms.as_ref();
        let parties = draft.parties.as_ref();

        let clause_titles = match template {
            Some(t) => t
                .clauses
                .iter()
                .filter(|c| draft.selected_clauses.contains(&c.id))
                .map(|c| c.title.clone())
                .collect(),
            None => draft
                .selected_clauses
                .iter()
                .map(|id| id.to_string())
                .collect(),
        };

        Self {
            template_name: template.map(|t| t.name.clone()),
            lease_type: draft.lease_type,
            property_line: draft
                .property
                .as_ref()
                .map(|p| format!("{}, Unit {}", p.address, p.unit_number)),
            landlord_name: parties.map(|p| p.landlord_name.clone()),
            tenant_name: parties.map(|p| p.tenant_name.clone()),
            tenant_email: parties.map(|p| p.tenant_email.clone()),
            tenant_phone: parties.map(|p| p.tenant_phone.clone()),
            start_date: terms.map(|t| t.start_date()),
            end_date: terms.map(|t| t.end_date()),
            duration_months: terms.map(|t| t.duration_months()),
            rent_amount: terms.map(|t| t.rent_amount),
            security_deposit: terms.map(|t| t.security_deposit),
            payment_schedule: terms.map(|t| t.payment_schedule),
            move_in_total: terms.and_then(|t| t.move_in_total().ok()),
            clause_titles,
            extras: draft
                .additional_terms
                .as_ref()
                .map(describe_extras)
                .unwrap_or_default(),
            custom_clauses: draft.custom_clauses.clone(),
            missing: validate_draft(draft).into_errors(),
        }
    }

    /// True when finalize would succeed
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }
}

fn describe_extras(extras: &AdditionalTerms) -> Vec<String> {
    let mut lines = Vec::new();
    match (extras.pets_allowed, &extras.pet_deposit) {
        (true, Some(deposit)) => lines.push(format!("Pets allowed ({} deposit)", deposit)),
        (true, None) => lines.push("Pets allowed".to_string()),
        (false, _) => lines.push("No pets".to_string()),
    }
    lines.push(if extras.smoking_allowed {
        "Smoking allowed".to_string()
    } else {
        "No smoking".to_string()
    });
    if extras.parking_spots > 0 {
        match &extras.parking_fee {
            Some(fee) => lines.push(format!("{} parking spot(s) at {}", extras.parking_spots, fee)),
            None => lines.push(format!("{} parking spot(s)", extras.parking_spots)),
        }
    }
    if !extras.utilities_included.is_empty() {
        let names: Vec<String> = extras
            .utilities_included
            .iter()
            .map(|u| format!("{:?}", u).to_lowercase())
            .collect();
        lines.push(format!("Utilities included: {}", names.join(", ")));
    }
    lines.push(format!(
        "Maintenance: {}",
        extras.maintenance_responsibility
    ));
    lines
}
