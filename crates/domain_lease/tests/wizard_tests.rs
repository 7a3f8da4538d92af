//! Lease builder wizard tests
//!
//! Drive the controller through the seven steps the way a host application
//! would: take the seeded form, fill it in, confirm it.

mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;

use common::*;
use core_kernel::{ClauseId, PropertyId, TemplateId, UnitId};
use domain_catalog::{InMemoryTemplateCatalog, LeaseType, TemplateCatalog};
use domain_lease::{
    compute_end_date, InMemoryLeaseRepository, LeaseDraft, LeaseDraftStore, LeaseError,
    LeaseEvent, LeaseRepository, LeaseStatus, StepForm, StepView, Utility, WizardStep,
};

fn residential_required() -> std::collections::BTreeSet<ClauseId> {
    InMemoryTemplateCatalog::standard()
        .lookup_template(&TemplateId::from("residential-standard"))
        .unwrap()
        .required_clause_ids()
}

// ============= STEP GATING =============
mod step_gating {
    use super::*;

    #[test]
    fn test_template_required() {
        let mut h = harness();
        let StepView::Template(form) = h.wizard.active_form() else {
            panic!("expected template step");
        };
        assert!(!form.can_continue());

        let err = h.wizard.confirm(form).unwrap_err();
        assert!(matches!(err, LeaseError::ValidationFailed { step: WizardStep::Template, .. }));
        assert_eq!(h.wizard.current_step(), WizardStep::Template);
    }

    #[test]
    fn test_occupied_unit_blocks_property_step() {
        let mut h = harness();
        complete_template(&mut h.wizard, "residential-standard");

        let StepView::Property(mut form) = h.wizard.active_form() else {
            panic!("expected property step");
        };
        form.select_property(&PropertyId::from("P1"));
        form.select_unit(&UnitId::from("U2"));
        assert!(!form.can_continue());
        assert!(h.wizard.confirm(form).is_err());
        assert_eq!(h.wizard.current_step(), WizardStep::Property);
    }

    #[test]
    fn test_available_units_excludes_occupied() {
        let h = harness();
        let units = h.wizard.available_units(&PropertyId::from("P1"));
        let ids: Vec<&str> = units.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["U1"]);
        assert!(h.wizard.available_units(&PropertyId::from("P9")).is_empty());
    }

    #[test]
    fn test_blank_tenant_phone_blocks() {
        let mut h = harness();
        complete_template(&mut h.wizard, "residential-standard");
        complete_property(&mut h.wizard, "P1", "U1");

        let StepView::Tenant(mut form) = h.wizard.active_form() else {
            panic!("expected tenant step");
        };
        form.tenant_name = "Jane Doe".to_string();
        form.tenant_email = "jane@example.com".to_string();
        form.tenant_phone = "   ".to_string();

        let err = h.wizard.confirm(form).unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["tenant_phone"]);
    }

    #[test]
    fn test_terms_need_positive_rent() {
        let mut h = harness();
        complete_template(&mut h.wizard, "residential-standard");
        complete_property(&mut h.wizard, "P1", "U1");
        complete_tenant(&mut h.wizard, "Jane Doe", "jane@example.com", "555-0100");

        let StepView::Terms(mut form) = h.wizard.active_form() else {
            panic!("expected terms step");
        };
        form.set_start_date(Some(date(2026, 3, 1)));
        form.set_rent_amount(usd(dec!(0)));
        assert!(!form.can_continue());

        form.set_rent_amount(usd(dec!(1500)));
        assert!(form.can_continue());
    }

    #[test]
    fn test_form_for_other_step_rejected() {
        let mut h = harness();
        let mut tenant_form = domain_lease::TenantForm::new(landlord(h.owner_id), None);
        tenant_form.tenant_name = "Jane Doe".to_string();
        tenant_form.tenant_email = "jane@example.com".to_string();
        tenant_form.tenant_phone = "555-0100".to_string();

        let err = h.wizard.confirm(tenant_form).unwrap_err();
        assert!(matches!(
            err,
            LeaseError::StepMismatch {
                expected: WizardStep::Template,
                actual: WizardStep::Tenant
            }
        ));
    }
}

// ============= TEMPLATE SEEDING =============
mod template_seeding {
    use super::*;

    fn store() -> LeaseDraftStore {
        LeaseDraftStore::new(
            Arc::new(InMemoryTemplateCatalog::standard()),
            Arc::new(InMemoryLeaseRepository::new()),
        )
    }

    #[test]
    fn test_seeds_type_and_required_clauses() {
        let mut store = store();
        let template = store.set_template(&TemplateId::from("residential-standard")).unwrap();

        assert_eq!(template.name, "Residential Standard");
        assert_eq!(store.lease().lease_type, Some(LeaseType::Residential));
        assert_eq!(store.lease().selected_clauses, residential_required());
    }

    #[test]
    fn test_selecting_twice_is_idempotent() {
        let mut store = store();
        let id = TemplateId::from("residential-standard");
        store.set_template(&id);
        let once = store.lease().clone();
        store.set_template(&id);
        assert_eq!(store.lease(), &once);
    }

    #[test]
    fn test_unknown_template_is_noop() {
        let mut store = store();
        assert!(store.set_template(&TemplateId::from("castle-lease")).is_none());
        assert_eq!(store.lease(), &LeaseDraft::default());
    }

    #[test]
    fn test_switching_template_reseeds_clauses() {
        let mut store = store();
        store.set_template(&TemplateId::from("residential-standard"));
        store.set_template(&TemplateId::from("month-to-month"));

        let clauses: Vec<&str> = store.lease().selected_clauses.iter().map(|c| c.as_str()).collect();
        assert_eq!(clauses, vec!["rent-payment", "termination-notice"]);
        assert_eq!(store.lease().lease_type, Some(LeaseType::MonthToMonth));
    }

    #[test]
    fn test_template_default_duration_seeds_terms_form() {
        let mut h = harness();
        complete_template(&mut h.wizard, "commercial-standard");
        complete_property(&mut h.wizard, "P1", "U1");
        complete_tenant(&mut h.wizard, "Acme Corp", "lease@acme.test", "555-0111");

        let StepView::Terms(form) = h.wizard.active_form() else {
            panic!("expected terms step");
        };
        assert_eq!(form.duration_months(), 36);
    }
}

// ============= END DATE =============
mod end_date {
    use super::*;

    #[test]
    fn test_end_of_january_plus_one_month() {
        assert_eq!(compute_end_date(date(2026, 1, 31), 1), Some(date(2026, 2, 28)));
        assert_eq!(compute_end_date(date(2028, 1, 31), 1), Some(date(2028, 2, 29)));
    }

    #[test]
    fn test_twelve_months_from_first_of_march() {
        assert_eq!(compute_end_date(date(2026, 3, 1), 12), Some(date(2027, 3, 1)));
    }
}

// ============= CONDITIONAL FIELDS =============
mod conditional_fields {
    use super::*;

    #[test]
    fn test_pet_deposit_key_absent_when_pets_disallowed() {
        let mut h = harness();
        complete_template(&mut h.wizard, "residential-standard");
        complete_property(&mut h.wizard, "P1", "U1");
        complete_tenant(&mut h.wizard, "Jane Doe", "jane@example.com", "555-0100");
        complete_terms(&mut h.wizard, date(2026, 3, 1), usd(dec!(1500)), usd(dec!(1500)));

        let StepView::AdditionalTerms(mut form) = h.wizard.active_form() else {
            panic!("expected additional terms step");
        };
        form.pets_allowed = false;
        form.pet_deposit = usd(dec!(500));
        form.parking_spots = 1;
        form.parking_fee = usd(dec!(75));
        form.set_utility(Utility::Water, true);
        h.wizard.confirm(form).unwrap();

        let json = serde_json::to_value(h.wizard.store().lease()).unwrap();
        let extras = json["additional_terms"].as_object().unwrap();
        assert!(!extras.contains_key("pet_deposit"));
        assert!(extras.contains_key("parking_fee"));
    }

    #[test]
    fn test_optional_clause_toggle_reaches_draft() {
        let mut h = harness();
        complete_template(&mut h.wizard, "residential-standard");
        complete_property(&mut h.wizard, "P1", "U1");
        complete_tenant(&mut h.wizard, "Jane Doe", "jane@example.com", "555-0100");
        complete_terms(&mut h.wizard, date(2026, 3, 1), usd(dec!(1500)), usd(dec!(1500)));

        let StepView::AdditionalTerms(mut form) = h.wizard.active_form() else {
            panic!("expected additional terms step");
        };
        assert!(form.toggle_clause(&ClauseId::from("late-fees")));
        assert!(!form.toggle_clause(&ClauseId::from("rent-payment")));
        h.wizard.confirm(form).unwrap();

        let selected = &h.wizard.store().lease().selected_clauses;
        assert!(selected.contains(&ClauseId::from("late-fees")));
        assert!(residential_required().is_subset(selected));
    }
}

// ============= NAVIGATION =============
mod navigation {
    use super::*;

    #[test]
    fn test_back_then_forward_preserves_lease() {
        let mut h = harness();
        complete_template(&mut h.wizard, "residential-standard");
        complete_property(&mut h.wizard, "P1", "U1");
        complete_tenant(&mut h.wizard, "Jane Doe", "jane@example.com", "555-0100");
        let before = h.wizard.store().lease().clone();

        assert_eq!(h.wizard.back(), WizardStep::Tenant);
        let StepView::Tenant(form) = h.wizard.active_form() else {
            panic!("expected tenant step");
        };
        assert_eq!(form.tenant_name, "Jane Doe");
        h.wizard.confirm(form).unwrap();

        assert_eq!(h.wizard.current_step(), WizardStep::Terms);
        assert_eq!(h.wizard.store().lease(), &before);
    }

    #[test]
    fn test_back_at_first_step_is_noop() {
        let mut h = harness();
        assert_eq!(h.wizard.back(), WizardStep::Template);
        assert!(h.wizard.take_events().is_empty());
    }

    #[test]
    fn test_revisited_template_keeps_optional_clauses() {
        let mut h = harness();
        reach_review(&mut h.wizard);
        for _ in 0..2 {
            h.wizard.back();
        }
        let StepView::AdditionalTerms(mut form) = h.wizard.active_form() else {
            panic!("expected additional terms step");
        };
        form.toggle_clause(&ClauseId::from("subletting"));
        h.wizard.confirm(form).unwrap();

        while h.wizard.current_step() != WizardStep::Template {
            h.wizard.back();
        }
        complete_template(&mut h.wizard, "residential-standard");
        assert!(h
            .wizard
            .store()
            .lease()
            .selected_clauses
            .contains(&ClauseId::from("subletting")));
    }
}

// ============= RESET =============
mod reset {
    use super::*;

    #[test]
    fn test_cancel_restores_initial_state() {
        let mut h = harness();
        reach_review(&mut h.wizard);
        let old_id = h.wizard.store().lease_id();

        h.wizard.cancel();

        assert_eq!(h.wizard.store().lease(), &LeaseDraft::default());
        assert_eq!(h.wizard.current_step(), WizardStep::Template);
        assert_eq!(h.wizard.status(), LeaseStatus::default());
        assert!(h.wizard.store().template_id().is_none());
        assert_ne!(h.wizard.store().lease_id(), old_id);
    }
}

// ============= END TO END =============
mod end_to_end {
    use super::*;

    #[test]
    fn test_reference_scenario_saved_as_draft() {
        let mut h = harness();
        reach_review(&mut h.wizard);

        let StepView::Review(summary) = h.wizard.active_form() else {
            panic!("expected review step");
        };
        assert!(summary.is_ready());
        assert_eq!(summary.template_name.as_deref(), Some("Residential Standard"));
        assert_eq!(summary.property_line.as_deref(), Some("12 Maple St, Unit 1A"));
        assert_eq!(summary.end_date, Some(date(2027, 3, 1)));

        let lease = h.wizard.store().lease();
        assert_eq!(lease.selected_clauses, residential_required());
        assert_eq!(lease.parties.as_ref().unwrap().tenant_email, "jane@example.com");
        assert_eq!(lease.terms.as_ref().unwrap().end_date(), date(2027, 3, 1));

        let record = h.wizard.save_draft().unwrap();
        assert_eq!(h.wizard.status(), LeaseStatus::Draft);
        assert_eq!(h.wizard.current_step(), WizardStep::Review);
        assert_eq!(h.repository.load_draft(record.id).unwrap(), record);
    }

    #[test]
    fn test_resume_saved_draft() {
        let mut h = harness();
        complete_template(&mut h.wizard, "residential-standard");
        complete_property(&mut h.wizard, "P1", "U1");
        let record = h.wizard.save_draft().unwrap();

        let resumed = domain_lease::StepController::resume(
            domain_lease::BuilderConfig::default(),
            landlord(h.owner_id),
            h.templates.clone(),
            h.properties.clone(),
            h.repository.clone(),
            record.id,
        )
        .unwrap();

        assert_eq!(resumed.current_step(), WizardStep::Tenant);
        assert_eq!(resumed.status(), LeaseStatus::Draft);
        assert_eq!(resumed.store().lease(), &record.draft);
    }

    #[test]
    fn test_events_trace_the_session() {
        let mut h = harness();
        reach_review(&mut h.wizard);
        h.wizard.save_draft().unwrap();

        let events = h.wizard.take_events();
        let kinds: Vec<&str> = events.iter().map(|e| e.event_type()).collect();
        assert_eq!(kinds.first(), Some(&"TemplateSelected"));
        assert_eq!(kinds.iter().filter(|k| **k == "StepAdvanced").count(), 6);
        assert!(matches!(events.last(), Some(LeaseEvent::DraftSaved { step: WizardStep::Review, .. })));
    }
}

// ============= FINALIZE =============
mod finalize {
    use super::*;

    #[test]
    fn test_finalize_stores_document_and_resets() {
        let mut h = harness();
        reach_review(&mut h.wizard);
        let lease_id = h.wizard.store().lease_id();

        let document = h.wizard.finalize().unwrap();

        assert_eq!(document.id, lease_id);
        assert_eq!(document.status, LeaseStatus::Finalized);
        assert_eq!(document.move_in_total, usd(dec!(3000)));
        let clause_ids: Vec<&str> = document.clauses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            clause_ids,
            vec!["rent-payment", "security-deposit", "maintenance-repairs", "right-of-entry"]
        );
        assert_eq!(h.repository.load_document(lease_id).unwrap(), document);

        assert_eq!(h.wizard.store().lease(), &LeaseDraft::default());
        assert_eq!(h.wizard.current_step(), WizardStep::Template);
        assert!(h
            .wizard
            .take_events()
            .iter()
            .any(|e| matches!(e, LeaseEvent::LeaseFinalized { .. })));
    }

    #[test]
    fn test_finalize_removes_saved_draft() {
        let mut h = harness();
        reach_review(&mut h.wizard);
        let record = h.wizard.save_draft().unwrap();

        h.wizard.finalize().unwrap();
        assert!(h.repository.load_draft(record.id).unwrap_err().is_not_found());
        assert_eq!(h.repository.document_count(), 1);
    }

    #[test]
    fn test_finalize_only_from_review() {
        let mut h = harness();
        complete_template(&mut h.wizard, "residential-standard");
        let err = h.wizard.finalize().unwrap_err();
        assert!(matches!(err, LeaseError::StepMismatch { actual: WizardStep::Review, .. }));
    }

    #[test]
    fn test_store_finalize_revalidates() {
        let mut store = LeaseDraftStore::new(
            Arc::new(InMemoryTemplateCatalog::standard()),
            Arc::new(InMemoryLeaseRepository::new()),
        );
        store.set_template(&TemplateId::from("residential-standard"));

        let err = store.finalize().unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert!(matches!(err, LeaseError::Incomplete { .. }));
        assert_eq!(fields, vec!["property_id", "unit_id", "tenant_name", "start_date"]);
        assert!(store.template_id().is_some());
    }

    #[test]
    fn test_resumed_record_with_orphaned_fees_not_finalized() {
        let mut h = harness();
        reach_review(&mut h.wizard);
        let mut record = h.wizard.save_draft().unwrap();

        record.draft.additional_terms = Some(domain_lease::AdditionalTerms {
            pets_allowed: false,
            pet_deposit: Some(usd(dec!(500))),
            parking_spots: 0,
            parking_fee: Some(usd(dec!(75))),
            ..Default::default()
        });
        h.repository.save_draft(&record).unwrap();

        let mut store = LeaseDraftStore::resume(
            h.repository.load_draft(record.id).unwrap(),
            h.templates.clone(),
            h.repository.clone(),
        )
        .unwrap();
        let err = store.finalize().unwrap_err();

        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert!(matches!(err, LeaseError::Incomplete { .. }));
        assert_eq!(fields, vec!["pet_deposit", "parking_fee"]);
        assert_eq!(h.repository.document_count(), 0);
        assert_eq!(store.lease(), &record.draft);
    }

    #[test]
    fn test_unit_let_meanwhile_blocks_finalize() {
        let mut h = harness();
        reach_review(&mut h.wizard);
        h.properties.set_occupied("P1", "U1", true);

        let err = h.wizard.finalize().unwrap_err();
        assert!(matches!(err, LeaseError::UnitOccupied(_)));
        assert_eq!(h.wizard.current_step(), WizardStep::Review);
        assert_eq!(h.repository.document_count(), 0);
    }
}
