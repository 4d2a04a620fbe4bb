//! Benefit configuration rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeType;

/// The kind of benefit a configuration defines.
///
/// Routing during evaluation is by kind: the five direct kinds become
/// bonus lines outright, `YearEndBonus` only applies to December runs,
/// and `Other` is informational and never evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitType {
    /// Meal voucher allowance.
    MealVoucher,
    /// Bonus for positions of responsibility.
    ResponsibilityBonus,
    /// Punctuality incentive.
    PunctualityBonus,
    /// Year-end bonus, paid only in December.
    YearEndBonus,
    /// Vacation bonus.
    VacationBonus,
    /// Monthly accrual toward future severance.
    SeveranceAccrual,
    /// Any benefit the engine does not evaluate.
    Other,
}

/// The employee classifications a benefit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliesTo {
    /// Every payroll classification.
    All,
    /// Teaching staff only.
    Teacher,
    /// Administrative staff only.
    Administrative,
    /// Laborers only.
    Laborer,
}

impl AppliesTo {
    /// Returns true if a benefit with this scope applies to the given
    /// employee classification.
    ///
    /// # Examples
    ///
    /// ```
    /// use school_payroll_engine::config::AppliesTo;
    /// use school_payroll_engine::models::EmployeeType;
    ///
    /// assert!(AppliesTo::All.matches(EmployeeType::Laborer));
    /// assert!(AppliesTo::Teacher.matches(EmployeeType::Teacher));
    /// assert!(!AppliesTo::Teacher.matches(EmployeeType::Administrative));
    /// ```
    pub fn matches(&self, employee_type: EmployeeType) -> bool {
        match self {
            AppliesTo::All => true,
            AppliesTo::Teacher => employee_type == EmployeeType::Teacher,
            AppliesTo::Administrative => employee_type == EmployeeType::Administrative,
            AppliesTo::Laborer => employee_type == EmployeeType::Laborer,
        }
    }
}

/// An active, typed bonus rule scoped to an employee classification.
///
/// Each rule contributes `base_value + base_salary * salary_percentage / 100`
/// to an applicable employee's pay. Rules are created, updated and
/// deactivated independently of one another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitConfiguration {
    /// Unique identifier for the rule.
    pub id: Uuid,
    /// Display name, used as the bonus line name on generated runs.
    pub name: String,
    /// The kind of benefit, which decides evaluation routing.
    pub benefit_type: BenefitType,
    /// Flat amount contributed regardless of salary.
    pub base_value: Decimal,
    /// Percentage of base salary contributed on top of `base_value`.
    pub salary_percentage: Decimal,
    /// Which employee classifications the rule applies to.
    pub applies_to: AppliesTo,
    /// Free-text formula documentation. Never evaluated by the engine.
    #[serde(default)]
    pub formula: Option<String>,
    /// Whether the rule participates in evaluation.
    pub active: bool,
}

impl BenefitConfiguration {
    /// Computes the rule's value for an employee with the given base salary.
    ///
    /// # Examples
    ///
    /// ```
    /// use school_payroll_engine::config::{AppliesTo, BenefitConfiguration, BenefitType};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    /// use uuid::Uuid;
    ///
    /// let rule = BenefitConfiguration {
    ///     id: Uuid::new_v4(),
    ///     name: "Meal Voucher".to_string(),
    ///     benefit_type: BenefitType::MealVoucher,
    ///     base_value: Decimal::from_str("40").unwrap(),
    ///     salary_percentage: Decimal::from_str("2").unwrap(),
    ///     applies_to: AppliesTo::All,
    ///     formula: None,
    ///     active: true,
    /// };
    /// // 40 + 500 * 2% = 50
    /// assert_eq!(
    ///     rule.effective_value(Decimal::from_str("500").unwrap()),
    ///     Decimal::from_str("50").unwrap()
    /// );
    /// ```
    pub fn effective_value(&self, base_salary: Decimal) -> Decimal {
        self.base_value + base_salary * self.salary_percentage / Decimal::ONE_HUNDRED
    }

    /// Validates the numeric fields, mirroring the payroll configuration
    /// rule: amounts and percentages must be non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_value < Decimal::ZERO {
            return Err(EngineError::validation("benefit base value cannot be negative"));
        }
        if self.salary_percentage < Decimal::ZERO {
            return Err(EngineError::validation(
                "benefit salary percentage cannot be negative",
            ));
        }
        if self.name.trim().is_empty() {
            return Err(EngineError::validation("benefit name cannot be empty"));
        }
        Ok(())
    }
}
