//! The payroll configuration singleton.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Pay-period geometry and statutory deduction rates.
///
/// At most one configuration is active at any time; activating one
/// deactivates every other inside the same transaction. The engine reads
/// the active configuration at the start of each payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollConfiguration {
    /// Unique identifier for the configuration.
    pub id: Uuid,
    /// Days covered by one biweekly period.
    pub biweekly_days: u32,
    /// Day of month of the first biweekly pay day.
    pub first_pay_day: u32,
    /// Day of month of the second biweekly pay day.
    pub second_pay_day: u32,
    /// Social security deduction as a percentage of base salary.
    pub social_security_rate: Decimal,
    /// Income tax deduction as a percentage of base salary.
    pub income_tax_rate: Decimal,
    /// Whether this configuration is the active one.
    pub active: bool,
}

impl PayrollConfiguration {
    /// Creates a configuration with the standard biweekly geometry
    /// (15-day periods paid on the 15th and 30th) and zero deduction rates.
    pub fn new(id: Uuid) -> Self {
        PayrollConfiguration {
            id,
            biweekly_days: 15,
            first_pay_day: 15,
            second_pay_day: 30,
            social_security_rate: Decimal::ZERO,
            income_tax_rate: Decimal::ZERO,
            active: false,
        }
    }

    /// Validates the numeric fields.
    ///
    /// Rates must be non-negative and pay days must fall within a month.
    pub fn validate(&self) -> EngineResult<()> {
        if self.social_security_rate < Decimal::ZERO {
            return Err(EngineError::validation(
                "social security rate cannot be negative",
            ));
        }
        if self.income_tax_rate < Decimal::ZERO {
            return Err(EngineError::validation("income tax rate cannot be negative"));
        }
        if self.biweekly_days == 0 {
            return Err(EngineError::validation(
                "biweekly period must cover at least one day",
            ));
        }
        for (field, day) in [
            ("first pay day", self.first_pay_day),
            ("second pay day", self.second_pay_day),
        ] {
            if !(1..=31).contains(&day) {
                return Err(EngineError::validation(format!(
                    "{field} must be a day of the month (1-31), got {day}"
                )));
            }
        }
        Ok(())
    }
}
