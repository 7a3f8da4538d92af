use chrono::NaiveDate;

use core_kernel::{parse_date, Currency, Money, MoneyError, TemporalError};

use super::{StepCommit, StepForm};
use crate::config::{BuilderConfig, MAX_DURATION_MONTHS};
use crate::draft::LeasePatch;
use crate::error::LeaseError;
use crate::status::WizardStep;
use crate::terms::{compute_end_date, LeaseTerms, PaymentSchedule};
use crate::validation::{check_deposit, check_rent, warn_on_deposit_cap, FieldError, ValidationResult};

/// Step 4: dates, rent and deposit
///
/// The end date is shown as a preview derived from the start date and
/// duration; there is no way to enter it.
#[derive(Debug, Clone, PartialEq)]
pub struct TermsForm {
    currency: Currency,
    today: NaiveDate,
    start_date: Option<NaiveDate>,
    duration_months: u32,
    rent_amount: Money,
    security_deposit: Money,
    rent_due_day: u8,
    payment_schedule: PaymentSchedule,
    first_month_rent: bool,
    last_month_rent: bool,
}

impl TermsForm {
    /// Creates an empty form using the configured defaults
    ///
    /// `today` is the owner's current date, used only for warnings.
    pub fn new(config: &BuilderConfig, duration_months: u32, today: NaiveDate) -> Self {
        Self {
            currency: config.currency,
            today,
            start_date: None,
            duration_months: duration_months.clamp(1, MAX_DURATION_MONTHS),
            rent_amount: Money::zero(config.currency),
            security_deposit: Money::zero(config.currency),
            rent_due_day: config.default_rent_due_day,
            payment_schedule: config.default_payment_schedule,
            first_month_rent: true,
            last_month_rent: false,
        }
    }

    /// Restores the form from terms already on the draft
    pub fn from_terms(config: &BuilderConfig, terms: &LeaseTerms, today: NaiveDate) -> Self {
        Self {
            currency: config.currency,
            today,
            start_date: Some(terms.start_date()),
            duration_months: terms.duration_months(),
            rent_amount: terms.rent_amount,
            security_deposit: terms.security_deposit,
            rent_due_day: terms.rent_due_day,
            payment_schedule: terms.payment_schedule,
            first_month_rent: terms.first_month_rent,
            last_month_rent: terms.last_month_rent,
        }
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.start_date = date;
    }

    /// Sets the lease length, clamped to 1..=120 months
    pub fn set_duration_months(&mut self, months: u32) {
        self.duration_months = months.clamp(1, MAX_DURATION_MONTHS);
    }

    pub fn set_rent_amount(&mut self, amount: Money) {
        self.rent_amount = amount;
    }

    pub fn set_security_deposit(&mut self, amount: Money) {
        self.security_deposit = amount;
    }

    /// Sets the start date from typed `YYYY-MM-DD` text
    ///
    /// Blank input clears the date. On error the previous value is kept.
    pub fn enter_start_date(&mut self, input: &str) -> Result<(), TemporalError> {
        self.start_date = if input.trim().is_empty() {
            None
        } else {
            Some(parse_date(input)?)
        };
        Ok(())
    }

    /// Sets the rent from typed text such as `1,500.00` in the form's currency
    pub fn enter_rent_amount(&mut self, input: &str) -> Result<(), MoneyError> {
        self.rent_amount = Money::parse(input, self.currency)?;
        Ok(())
    }

    pub fn enter_security_deposit(&mut self, input: &str) -> Result<(), MoneyError> {
        self.security_deposit = Money::parse(input, self.currency)?;
        Ok(())
    }

    /// Sets the rent due day, clamped to 1..=31
    pub fn set_rent_due_day(&mut self, day: u8) {
        self.rent_due_day = day.clamp(1, 31);
    }

    pub fn set_payment_schedule(&mut self, schedule: PaymentSchedule) {
        self.payment_schedule = schedule;
    }

    pub fn set_upfront_rent(&mut self, first_month: bool, last_month: bool) {
        self.first_month_rent = first_month;
        self.last_month_rent = last_month;
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn duration_months(&self) -> u32 {
        self.duration_months
    }

    pub fn rent_amount(&self) -> Money {
        self.rent_amount
    }

    pub fn security_deposit(&self) -> Money {
        self.security_deposit
    }

    /// The derived end date, if a start date is set and the result is in range
    pub fn end_date(&self) -> Option<NaiveDate> {
        compute_end_date(self.start_date?, self.duration_months)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl StepForm for TermsForm {
    const STEP: WizardStep = WizardStep::Terms;

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();

        match self.start_date {
            None => result.add_error("start_date", "Start date is required"),
            Some(start) => {
                if self.end_date().is_none() {
                    result.add_error(
                        "end_date",
                        format!(
                            "A {}-month lease starting {} ends outside the supported calendar",
                            self.duration_months, start
                        ),
                    );
                }
                if start < self.today {
                    result.add_warning(format!("Start date {} is in the past", start));
                }
            }
        }

        check_rent(&mut result, &self.rent_amount, self.currency);
        check_deposit(&mut result, &self.security_deposit, self.currency);
        warn_on_deposit_cap(&mut result, &self.rent_amount, &self.security_deposit);

        if self.rent_due_day > 28 {
            result.add_warning(format!(
                "Rent due on day {} falls outside shorter months",
                self.rent_due_day
            ));
        }

        result
    }

    fn into_commit(self) -> Result<StepCommit, LeaseError> {
        let start_date = self.start_date.ok_or_else(|| LeaseError::ValidationFailed {
            step: WizardStep::Terms,
            errors: vec![FieldError::new("start_date", "Start date is required")],
        })?;
        let terms = LeaseTerms::new(
            start_date,
            self.duration_months,
            self.rent_amount,
            self.security_deposit,
        )?
        .with_rent_due_day(self.rent_due_day)
        .with_payment_schedule(self.payment_schedule)
        .with_upfront_rent(self.first_month_rent, self.last_month_rent);

        Ok(StepCommit::Merge(LeasePatch::new().terms(terms)))
    }
}
