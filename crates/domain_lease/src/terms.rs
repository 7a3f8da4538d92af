//! Lease terms and the derived end date
//!
//! The end date is never entered: it is always `start_date` advanced by
//! `duration_months` calendar months, clamped to the last day of the target
//! month when the start day does not exist there. The only ways to change the
//! start date or duration go through [`LeaseTerms::reschedule`], which
//! re-derives the end date in the same call.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{add_months, DateRange, Money, MoneyError};

use crate::error::LeaseError;

/// Rent collection cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSchedule {
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl PaymentSchedule {
    /// Months covered by one payment
    pub fn months_per_payment(&self) -> u32 {
        match self {
            PaymentSchedule::Monthly => 1,
            PaymentSchedule::Quarterly => 3,
            PaymentSchedule::Annually => 12,
        }
    }
}

impl fmt::Display for PaymentSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentSchedule::Monthly => "monthly",
            PaymentSchedule::Quarterly => "quarterly",
            PaymentSchedule::Annually => "annually",
        };
        f.write_str(label)
    }
}

/// Computes the lease end date from its start and length in months
///
/// Returns `None` only when the result falls outside the supported calendar.
pub fn compute_end_date(start_date: NaiveDate, duration_months: u32) -> Option<NaiveDate> {
    add_months(start_date, duration_months)
}

/// Financial and scheduling terms of a lease
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseTerms {
    start_date: NaiveDate,
    end_date: NaiveDate,
    duration_months: u32,
    pub rent_amount: Money,
    /// Day of month rent is due, 1 to 31
    pub rent_due_day: u8,
    pub payment_schedule: PaymentSchedule,
    pub security_deposit: Money,
    /// First month's rent collected at signing
    pub first_month_rent: bool,
    /// Last month's rent collected at signing
    pub last_month_rent: bool,
}

impl LeaseTerms {
    /// Creates terms, deriving the end date
    ///
    /// Defaults: rent due on the 1st, monthly schedule, first month's rent
    /// collected up front, last month's not.
    ///
    /// # Errors
    ///
    /// Returns `LeaseError::Calculation` if the end date is out of range or
    /// the deposit currency differs from the rent currency.
    pub fn new(
        start_date: NaiveDate,
        duration_months: u32,
        rent_amount: Money,
        security_deposit: Money,
    ) -> Result<Self, LeaseError> {
        if rent_amount.currency() != security_deposit.currency() {
            return Err(MoneyError::CurrencyMismatch(
                rent_amount.currency().to_string(),
                security_deposit.currency().to_string(),
            )
            .into());
        }
        let period = DateRange::from_months(start_date, duration_months)?;

        Ok(Self {
            start_date,
            end_date: period.end,
            duration_months,
            rent_amount,
            rent_due_day: 1,
            payment_schedule: PaymentSchedule::default(),
            security_deposit,
            first_month_rent: true,
            last_month_rent: false,
        })
    }

    pub fn with_rent_due_day(mut self, day: u8) -> Self {
        self.rent_due_day = day.clamp(1, 31);
        self
    }

    pub fn with_payment_schedule(mut self, schedule: PaymentSchedule) -> Self {
        self.payment_schedule = schedule;
        self
    }

    pub fn with_upfront_rent(mut self, first_month: bool, last_month: bool) -> Self {
        self.first_month_rent = first_month;
        self.last_month_rent = last_month;
        self
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn duration_months(&self) -> u32 {
        self.duration_months
    }

    /// Changes the start date and duration together, re-deriving the end date
    ///
    /// # Errors
    ///
    /// Leaves the terms untouched and returns `LeaseError::Calculation` if the
    /// new end date is out of range.
    pub fn reschedule(&mut self, start_date: NaiveDate, duration_months: u32) -> Result<(), LeaseError> {
        let period = DateRange::from_months(start_date, duration_months)?;
        self.start_date = start_date;
        self.duration_months = duration_months;
        self.end_date = period.end;
        Ok(())
    }

    /// True when the stored end date matches the derivation rule
    ///
    /// Only terms read back from storage can fail this.
    pub fn is_consistent(&self) -> bool {
        compute_end_date(self.start_date, self.duration_months) == Some(self.end_date)
    }

    /// Money due at signing: deposit plus any rent collected up front
    pub fn move_in_total(&self) -> Result<Money, MoneyError> {
        let upfront = [self.first_month_rent, self.last_month_rent]
            .into_iter()
            .filter(|collected| *collected)
            .map(|_| &self.rent_amount);
        Money::sum(
            self.security_deposit.currency(),
            std::iter::once(&self.security_deposit).chain(upfront),
        )
    }

    /// Amount collected per payment under the chosen schedule
    pub fn installment(&self) -> Money {
        self.rent_amount
            .multiply(Decimal::from(self.payment_schedule.months_per_payment()))
    }
}
