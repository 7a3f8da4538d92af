//! Builder configuration
//!
//! Values come from `LEASE_`-prefixed environment variables, falling back to
//! the defaults below:
//!
//! | variable                         | default   |
//! |----------------------------------|-----------|
//! | `LEASE_CURRENCY`                 | `USD`     |
//! | `LEASE_TIMEZONE`                 | `UTC`     |
//! | `LEASE_DEFAULT_RENT_DUE_DAY`     | `1`       |
//! | `LEASE_DEFAULT_PAYMENT_SCHEDULE` | `monthly` |
//! | `LEASE_DEFAULT_DURATION_MONTHS`  | `12`      |
//! | `LEASE_DRAFT_DIR`                | `./lease-drafts` |

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

use core_kernel::{CoreError, Currency, Timezone};

use crate::error::LeaseError;
use crate::terms::PaymentSchedule;

/// Longest lease the builder will compute an end date for
pub const MAX_DURATION_MONTHS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Currency every amount in a lease is entered in
    #[serde(deserialize_with = "currency_code")]
    pub currency: Currency,
    /// Owner's timezone, used for "start date in the past" warnings
    pub timezone: Timezone,
    pub default_rent_due_day: u8,
    pub default_payment_schedule: PaymentSchedule,
    /// Used when a template does not suggest a duration
    pub default_duration_months: u32,
    /// Root directory for the file-backed lease repository
    pub draft_dir: PathBuf,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            timezone: Timezone::default(),
            default_rent_due_day: 1,
            default_payment_schedule: PaymentSchedule::Monthly,
            default_duration_months: 12,
            draft_dir: PathBuf::from("./lease-drafts"),
        }
    }
}

/// Accepts ISO codes in any case, so `LEASE_CURRENCY=usd` works
fn currency_code<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    code.parse().map_err(serde::de::Error::custom)
}

impl BuilderConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, LeaseError> {
        Self::load(None)
    }

    /// Loads configuration from an explicit set of `LEASE_*` variables
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, LeaseError> {
        Self::load(Some(vars))
    }

    fn load(vars: Option<HashMap<String, String>>) -> Result<Self, LeaseError> {
        let config: BuilderConfig = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("LEASE")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        config.validate()?;
        tracing::debug!(
            currency = %config.currency,
            timezone = config.timezone.0.name(),
            "Loaded lease builder configuration"
        );
        Ok(config)
    }

    /// Checks the values are usable
    pub fn validate(&self) -> Result<(), LeaseError> {
        if !(1..=31).contains(&self.default_rent_due_day) {
            return Err(LeaseError::configuration(format!(
                "default_rent_due_day must be between 1 and 31, got {}",
                self.default_rent_due_day
            )));
        }
        if self.default_duration_months == 0 || self.default_duration_months > MAX_DURATION_MONTHS {
            return Err(LeaseError::configuration(format!(
                "default_duration_months must be between 1 and {}, got {}",
                MAX_DURATION_MONTHS, self.default_duration_months
            )));
        }
        if self.draft_dir.as_os_str().is_empty() {
            return Err(LeaseError::configuration("draft_dir must not be empty"));
        }
        Ok(())
    }
}
