//! Per-employee benefit and deduction evaluation.
//!
//! Given an employee, the active payroll configuration, and the applicable
//! benefit rules, this module computes the bonus and deduction lines for one
//! pay period. The evaluation is pure; it never raises for missing
//! configuration (that is checked by the generator before it gets here) and
//! an empty rule set simply yields no bonuses.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::{BenefitConfiguration, BenefitType, PayrollConfiguration};
use crate::models::{Employee, EmployeePayment};

use super::base_salary_for;

/// Name of the social security deduction line.
pub const SOCIAL_SECURITY_LINE: &str = "Social Security";

/// Name of the income tax deduction line.
pub const INCOME_TAX_LINE: &str = "Income Tax";

/// A computed bonus for one employee in one period.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusLine {
    /// The benefit configuration's display name.
    pub name: String,
    /// The kind of benefit that produced this line.
    pub benefit_type: BenefitType,
    /// The computed amount.
    pub amount: Decimal,
}

/// A computed deduction for one employee in one period.
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionLine {
    /// The deduction's display name.
    pub name: String,
    /// The computed amount.
    pub amount: Decimal,
}

/// The full evaluation result for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct BenefitEvaluation {
    /// The employee's base salary (zero for non-payroll classifications).
    pub base_salary: Decimal,
    /// All computed bonus lines.
    pub bonuses: Vec<BonusLine>,
    /// All computed deduction lines. Social security and income tax are
    /// always present, even at zero.
    pub deductions: Vec<DeductionLine>,
    /// Gross pay for the period (the base salary).
    pub gross_amount: Decimal,
    /// Sum of all bonus amounts.
    pub total_bonuses: Decimal,
    /// Sum of all deduction amounts.
    pub total_deductions: Decimal,
    /// Net pay: `gross - deductions + bonuses`.
    pub net_amount: Decimal,
}

impl BenefitEvaluation {
    /// Sums the bonus amounts of the given kind.
    pub fn bonus_total(&self, benefit_type: BenefitType) -> Decimal {
        self.bonuses
            .iter()
            .filter(|b| b.benefit_type == benefit_type)
            .map(|b| b.amount)
            .sum()
    }

    /// Builds the persisted payment record for this evaluation.
    pub fn to_payment(&self, employee_id: impl Into<String>) -> EmployeePayment {
        EmployeePayment {
            employee_id: employee_id.into(),
            base_salary: self.base_salary,
            meal_voucher: self.bonus_total(BenefitType::MealVoucher),
            responsibility_bonus: self.bonus_total(BenefitType::ResponsibilityBonus),
            punctuality_bonus: self.bonus_total(BenefitType::PunctualityBonus),
            year_end_bonus: self.bonus_total(BenefitType::YearEndBonus),
            vacation_bonus: self.bonus_total(BenefitType::VacationBonus),
            severance_accrual: self.bonus_total(BenefitType::SeveranceAccrual),
            vacation_days: 0,
            vacation_amount: Decimal::ZERO,
            total_bonuses: self.total_bonuses,
            total_deductions: self.total_deductions,
            gross_amount: self.gross_amount,
            net_amount: self.net_amount,
        }
    }
}

/// Evaluates one employee's bonuses and deductions for one pay period.
///
/// Bonus routing is by benefit kind: meal voucher, responsibility,
/// punctuality, severance accrual and vacation bonuses contribute their
/// effective value directly; a year-end bonus contributes only when the pay
/// date falls in December; `Other` rules are ignored. Only rules that are
/// active and whose scope matches the employee's classification are
/// considered.
///
/// Deductions come from the payroll configuration alone: social security
/// and income tax as percentages of base salary, both always emitted even
/// when zero.
///
/// Employees without a payroll classification evaluate to all zeros and
/// accrue no benefits.
pub fn evaluate(
    employee: &Employee,
    config: &PayrollConfiguration,
    benefits: &[BenefitConfiguration],
    pay_date: NaiveDate,
) -> BenefitEvaluation {
    let (base_salary, eligible) = match base_salary_for(employee.employee_type) {
        Some(salary) => (salary, true),
        None => (Decimal::ZERO, false),
    };

    let mut bonuses = Vec::new();
    if eligible {
        for benefit in benefits {
            if !benefit.active || !benefit.applies_to.matches(employee.employee_type) {
                continue;
            }
            let value = benefit.effective_value(base_salary);
            let applies = match benefit.benefit_type {
                BenefitType::MealVoucher
                | BenefitType::ResponsibilityBonus
                | BenefitType::PunctualityBonus
                | BenefitType::SeveranceAccrual
                | BenefitType::VacationBonus => true,
                BenefitType::YearEndBonus => pay_date.month() == 12,
                BenefitType::Other => false,
            };
            if applies {
                bonuses.push(BonusLine {
                    name: benefit.name.clone(),
                    benefit_type: benefit.benefit_type,
                    amount: value,
                });
            }
        }
    }

    let social_security = base_salary * config.social_security_rate / Decimal::ONE_HUNDRED;
    let income_tax = base_salary * config.income_tax_rate / Decimal::ONE_HUNDRED;
    let deductions = vec![
        DeductionLine {
            name: SOCIAL_SECURITY_LINE.to_string(),
            amount: social_security,
        },
        DeductionLine {
            name: INCOME_TAX_LINE.to_string(),
            amount: income_tax,
        },
    ];

    let total_bonuses: Decimal = bonuses.iter().map(|b| b.amount).sum();
    let total_deductions = social_security + income_tax;
    let gross_amount = base_salary;
    let net_amount = gross_amount - total_deductions + total_bonuses;

    BenefitEvaluation {
        base_salary,
        bonuses,
        deductions,
        gross_amount,
        total_bonuses,
        total_deductions,
        net_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppliesTo;
    use crate::models::EmployeeType;
    use proptest::prelude::*;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_employee(employee_type: EmployeeType) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Maria Gonzalez".to_string(),
            employee_type,
            hire_date: date(2020, 1, 1),
        }
    }

    fn create_config(social_security: &str, income_tax: &str) -> PayrollConfiguration {
        let mut config = PayrollConfiguration::new(Uuid::new_v4());
        config.social_security_rate = dec(social_security);
        config.income_tax_rate = dec(income_tax);
        config.active = true;
        config
    }

    fn create_benefit(
        name: &str,
        benefit_type: BenefitType,
        base_value: &str,
        salary_percentage: &str,
        applies_to: AppliesTo,
    ) -> BenefitConfiguration {
        BenefitConfiguration {
            id: Uuid::new_v4(),
            name: name.to_string(),
            benefit_type,
            base_value: dec(base_value),
            salary_percentage: dec(salary_percentage),
            applies_to,
            formula: None,
            active: true,
        }
    }

    /// BE-001: direct bonus kinds contribute their effective value
    #[test]
    fn test_direct_bonus_contributes_effective_value() {
        let employee = create_test_employee(EmployeeType::Teacher);
        let config = create_config("0", "0");
        let benefits = vec![create_benefit(
            "Meal Voucher",
            BenefitType::MealVoucher,
            "40",
            "2",
            AppliesTo::All,
        )];

        let result = evaluate(&employee, &config, &benefits, date(2024, 6, 15));

        // 40 + 500 * 2% = 50
        assert_eq!(result.bonuses.len(), 1);
        assert_eq!(result.bonuses[0].amount, dec("50"));
        assert_eq!(result.total_bonuses, dec("50"));
        assert_eq!(result.net_amount, dec("550"));
    }

    /// BE-002: year-end bonus only applies in December
    #[test]
    fn test_year_end_bonus_skipped_outside_december() {
        let employee = create_test_employee(EmployeeType::Teacher);
        let config = create_config("0", "0");
        let benefits = vec![create_benefit(
            "Year End Bonus",
            BenefitType::YearEndBonus,
            "100",
            "0",
            AppliesTo::All,
        )];

        let result = evaluate(&employee, &config, &benefits, date(2024, 6, 15));
        assert!(result.bonuses.is_empty());
        assert_eq!(result.total_bonuses, Decimal::ZERO);
    }

    /// BE-003: year-end bonus applies in December
    #[test]
    fn test_year_end_bonus_applies_in_december() {
        let employee = create_test_employee(EmployeeType::Teacher);
        let config = create_config("0", "0");
        let benefits = vec![create_benefit(
            "Year End Bonus",
            BenefitType::YearEndBonus,
            "100",
            "0",
            AppliesTo::All,
        )];

        let result = evaluate(&employee, &config, &benefits, date(2024, 12, 15));
        assert_eq!(result.bonuses.len(), 1);
        assert_eq!(result.bonuses[0].amount, dec("100"));
    }

    /// BE-004: deductions come from the payroll configuration
    #[test]
    fn test_deductions_from_configuration_rates() {
        let employee = create_test_employee(EmployeeType::Teacher);
        let config = create_config("4", "2");

        let result = evaluate(&employee, &config, &[], date(2024, 6, 15));

        // 500 * 4% = 20 and 500 * 2% = 10
        assert_eq!(result.deductions.len(), 2);
        assert_eq!(result.deductions[0].name, SOCIAL_SECURITY_LINE);
        assert_eq!(result.deductions[0].amount, dec("20"));
        assert_eq!(result.deductions[1].name, INCOME_TAX_LINE);
        assert_eq!(result.deductions[1].amount, dec("10"));
        assert_eq!(result.total_deductions, dec("30"));
        assert_eq!(result.net_amount, dec("470"));
    }

    /// BE-005: deduction lines are emitted even at zero
    #[test]
    fn test_zero_deduction_lines_still_emitted() {
        let employee = create_test_employee(EmployeeType::Laborer);
        let config = create_config("0", "0");

        let result = evaluate(&employee, &config, &[], date(2024, 6, 15));

        assert_eq!(result.deductions.len(), 2);
        assert!(result.deductions.iter().all(|d| d.amount == Decimal::ZERO));
    }

    /// BE-006: scope filtering excludes non-matching classifications
    #[test]
    fn test_scope_filtering() {
        let employee = create_test_employee(EmployeeType::Administrative);
        let config = create_config("0", "0");
        let benefits = vec![
            create_benefit(
                "Teacher Responsibility",
                BenefitType::ResponsibilityBonus,
                "75",
                "0",
                AppliesTo::Teacher,
            ),
            create_benefit(
                "Punctuality",
                BenefitType::PunctualityBonus,
                "25",
                "0",
                AppliesTo::All,
            ),
        ];

        let result = evaluate(&employee, &config, &benefits, date(2024, 6, 15));

        assert_eq!(result.bonuses.len(), 1);
        assert_eq!(result.bonuses[0].name, "Punctuality");
    }

    /// BE-007: inactive rules are skipped
    #[test]
    fn test_inactive_rule_skipped() {
        let employee = create_test_employee(EmployeeType::Teacher);
        let config = create_config("0", "0");
        let mut benefit = create_benefit(
            "Meal Voucher",
            BenefitType::MealVoucher,
            "40",
            "0",
            AppliesTo::All,
        );
        benefit.active = false;

        let result = evaluate(&employee, &config, &[benefit], date(2024, 6, 15));
        assert!(result.bonuses.is_empty());
    }

    /// BE-008: rules of kind Other produce no lines
    #[test]
    fn test_other_kind_ignored() {
        let employee = create_test_employee(EmployeeType::Teacher);
        let config = create_config("0", "0");
        let benefits = vec![create_benefit(
            "Informational",
            BenefitType::Other,
            "999",
            "0",
            AppliesTo::All,
        )];

        let result = evaluate(&employee, &config, &benefits, date(2024, 6, 15));
        assert!(result.bonuses.is_empty());
    }

    /// BE-009: non-payroll classifications evaluate to zero
    #[test]
    fn test_non_payroll_type_evaluates_to_zero() {
        let employee = create_test_employee(EmployeeType::Other);
        let config = create_config("4", "2");
        let benefits = vec![create_benefit(
            "Meal Voucher",
            BenefitType::MealVoucher,
            "40",
            "0",
            AppliesTo::All,
        )];

        let result = evaluate(&employee, &config, &benefits, date(2024, 6, 15));

        assert_eq!(result.base_salary, Decimal::ZERO);
        assert!(result.bonuses.is_empty());
        assert_eq!(result.gross_amount, Decimal::ZERO);
        assert_eq!(result.total_deductions, Decimal::ZERO);
        assert_eq!(result.net_amount, Decimal::ZERO);
        // Zero-amount deduction lines are still present in the evaluation.
        assert_eq!(result.deductions.len(), 2);
    }

    /// BE-010: multiple rules of one kind accumulate in the payment record
    #[test]
    fn test_multiple_rules_of_same_kind_accumulate() {
        let employee = create_test_employee(EmployeeType::Teacher);
        let config = create_config("0", "0");
        let benefits = vec![
            create_benefit(
                "Lunch Voucher",
                BenefitType::MealVoucher,
                "30",
                "0",
                AppliesTo::All,
            ),
            create_benefit(
                "Dinner Voucher",
                BenefitType::MealVoucher,
                "20",
                "0",
                AppliesTo::Teacher,
            ),
        ];

        let result = evaluate(&employee, &config, &benefits, date(2024, 6, 15));
        let payment = result.to_payment("emp_001");

        assert_eq!(result.bonuses.len(), 2);
        assert_eq!(payment.meal_voucher, dec("50"));
        assert_eq!(payment.total_bonuses, dec("50"));
    }

    #[test]
    fn test_to_payment_preserves_totals_and_identity() {
        let employee = create_test_employee(EmployeeType::Teacher);
        let config = create_config("4", "2");
        let benefits = vec![create_benefit(
            "Responsibility",
            BenefitType::ResponsibilityBonus,
            "0",
            "10",
            AppliesTo::Teacher,
        )];

        let payment =
            evaluate(&employee, &config, &benefits, date(2024, 6, 15)).to_payment("emp_001");

        assert_eq!(payment.base_salary, dec("500"));
        assert_eq!(payment.responsibility_bonus, dec("50"));
        assert_eq!(payment.total_deductions, dec("30"));
        assert_eq!(payment.net_amount, dec("520"));
        assert!(payment.net_identity_holds());
    }

    proptest! {
        /// The net pay identity holds for arbitrary rates and rule values.
        #[test]
        fn prop_net_identity_holds(
            social_security in 0u32..50,
            income_tax in 0u32..50,
            base_value in 0u32..1000,
            salary_percentage in 0u32..100,
            month in 1u32..=12,
        ) {
            let employee = create_test_employee(EmployeeType::Teacher);
            let config = create_config(
                &social_security.to_string(),
                &income_tax.to_string(),
            );
            let benefits = vec![create_benefit(
                "Rule",
                BenefitType::MealVoucher,
                &base_value.to_string(),
                &salary_percentage.to_string(),
                AppliesTo::All,
            )];
            let pay_date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();

            let result = evaluate(&employee, &config, &benefits, pay_date);

            prop_assert_eq!(
                result.net_amount,
                result.gross_amount - result.total_deductions + result.total_bonuses
            );
            let bonus_sum: Decimal = result.bonuses.iter().map(|b| b.amount).sum();
            prop_assert_eq!(result.total_bonuses, bonus_sum);
            let deduction_sum: Decimal = result.deductions.iter().map(|d| d.amount).sum();
            prop_assert_eq!(result.total_deductions, deduction_sum);
        }
    }
}
