//! Property-Based Test Generators
//!
//! Proptest strategies for lease builder inputs, plus `fake`-backed tenant
//! data for tests that only need plausible values.

use chrono::{Duration, NaiveDate};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use proptest::prelude::*;

use core_kernel::{Currency, Money};
use domain_lease::{PaymentSchedule, WizardStep, MAX_DURATION_MONTHS};

/// Strategy for start dates across 2020-2035, month ends included
pub fn start_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..5844i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(days)
    })
}

/// Strategy for start dates pinned to the 29th-31st, where end dates clamp
pub fn month_end_start_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2035i32, 1u32..=12u32, 29u32..=31u32).prop_filter_map(
        "day not in month",
        |(year, month, day)| NaiveDate::from_ymd_opt(year, month, day),
    )
}

/// Strategy for durations the terms step accepts
pub fn duration_strategy() -> impl Strategy<Value = u32> {
    1u32..=MAX_DURATION_MONTHS
}

/// Strategy for positive USD amounts up to 100k
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    (1i64..10_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// Strategy for non-negative USD deposits
pub fn usd_deposit_strategy() -> impl Strategy<Value = Money> {
    (0i64..10_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

pub fn payment_schedule_strategy() -> impl Strategy<Value = PaymentSchedule> {
    prop_oneof![
        Just(PaymentSchedule::Monthly),
        Just(PaymentSchedule::Quarterly),
        Just(PaymentSchedule::Annually),
    ]
}

pub fn wizard_step_strategy() -> impl Strategy<Value = WizardStep> {
    (0usize..WizardStep::ALL.len()).prop_map(|i| WizardStep::ALL[i])
}

/// Strategy for tenant names, padded with stray whitespace
pub fn tenant_name_strategy() -> impl Strategy<Value = String> {
    (" {0,2}", "[A-Z][a-z]{2,10} [A-Z][a-z]{2,12}", " {0,2}")
        .prop_map(|(lead, name, trail)| format!("{}{}{}", lead, name, trail))
}

/// Strategy for strings that are empty once trimmed
pub fn blank_text_strategy() -> impl Strategy<Value = String> {
    "[ \t\n]{0,6}"
}

/// Plausible tenant contact details
#[derive(Debug, Clone)]
pub struct FakeTenant {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Generates a random tenant with `fake`
pub fn fake_tenant() -> FakeTenant {
    FakeTenant {
        name: Name().fake(),
        email: SafeEmail().fake(),
        phone: PhoneNumber().fake(),
    }
}
