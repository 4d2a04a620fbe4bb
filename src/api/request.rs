//! Request types for the Payroll and Severance Engine API.
//!
//! This module defines the JSON request structures for the payroll,
//! severance and configuration endpoints, plus their conversions into
//! domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{AppliesTo, BenefitConfiguration, BenefitType, PayrollConfiguration};
use crate::engine::{NewPayrollRun, NewSeverance, SeveranceUpdate};
use crate::models::{
    EmployeePayment, EmployeeType, PayrollBonusLine, PayrollDeductionLine, SettlementStatus,
};

/// Request body for `POST /payroll/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// The pay date to generate for.
    pub pay_date: NaiveDate,
    /// Optional classification filter; defaults to every payroll type.
    #[serde(default)]
    pub employee_types: Option<Vec<EmployeeType>>,
}

/// Request body for `POST /payroll/runs` (manual runs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayrollRunRequest {
    /// The period label for the run.
    pub period_label: String,
    /// The pay date for the run.
    pub pay_date: NaiveDate,
    /// A description of the run.
    #[serde(default)]
    pub description: String,
    /// Pre-computed payments, one per employee.
    #[serde(default)]
    pub employees: Vec<EmployeePaymentRequest>,
    /// Itemized bonus lines.
    #[serde(default)]
    pub bonuses: Vec<PayrollLineRequest>,
    /// Itemized deduction lines.
    #[serde(default)]
    pub deductions: Vec<PayrollLineRequest>,
}

/// A pre-computed employee payment in a manual run request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePaymentRequest {
    /// The employee this payment is for.
    pub employee_id: String,
    /// The employee's base salary.
    pub base_salary: Decimal,
    /// Meal voucher bonus amount.
    #[serde(default)]
    pub meal_voucher: Decimal,
    /// Responsibility bonus amount.
    #[serde(default)]
    pub responsibility_bonus: Decimal,
    /// Punctuality bonus amount.
    #[serde(default)]
    pub punctuality_bonus: Decimal,
    /// Year-end bonus amount.
    #[serde(default)]
    pub year_end_bonus: Decimal,
    /// Vacation bonus amount.
    #[serde(default)]
    pub vacation_bonus: Decimal,
    /// Severance accrual amount.
    #[serde(default)]
    pub severance_accrual: Decimal,
    /// Vacation days paid out.
    #[serde(default)]
    pub vacation_days: u32,
    /// Amount paid for vacation days.
    #[serde(default)]
    pub vacation_amount: Decimal,
    /// Sum of all bonus amounts.
    #[serde(default)]
    pub total_bonuses: Decimal,
    /// Sum of all deduction amounts.
    #[serde(default)]
    pub total_deductions: Decimal,
    /// Gross pay before bonuses and deductions.
    pub gross_amount: Decimal,
    /// Net pay.
    pub net_amount: Decimal,
}

/// An itemized line in a manual run request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollLineRequest {
    /// The employee the line belongs to, or `None` for a run-scoped line.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The line's display name.
    pub name: String,
    /// The line amount.
    pub amount: Decimal,
}

/// Request body for `POST /severances/estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateSeveranceRequest {
    /// The departing employee.
    pub employee_id: String,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment.
    pub end_date: NaiveDate,
    /// The stated reason for departure.
    #[serde(default)]
    pub reason: String,
}

/// Request body for `POST /severances`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSeveranceRequest {
    /// The departing employee.
    pub employee_id: String,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment.
    pub end_date: NaiveDate,
    /// The stated reason for departure.
    #[serde(default)]
    pub reason: String,
    /// Negotiated extras beyond the computed components.
    #[serde(default)]
    pub other_benefits: Decimal,
}

/// Request body for `PUT /severances/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSeveranceRequest {
    /// New employment start date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// New employment end date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// New departure reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// New severance pay component.
    #[serde(default)]
    pub severance_pay: Option<Decimal>,
    /// New year-end bonus component.
    #[serde(default)]
    pub year_end_bonus: Option<Decimal>,
    /// New vacation bonus component.
    #[serde(default)]
    pub vacation_bonus: Option<Decimal>,
    /// New pending vacation day count.
    #[serde(default)]
    pub pending_vacation_days: Option<u32>,
    /// New pending vacation pay component.
    #[serde(default)]
    pub pending_vacation_pay: Option<Decimal>,
    /// New negotiated extras.
    #[serde(default)]
    pub other_benefits: Option<Decimal>,
    /// Explicit status override.
    #[serde(default)]
    pub status: Option<SettlementStatus>,
}

/// Request body for `PUT /severances/:id/pay`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkPaidRequest {
    /// The payment date; defaults to today.
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
}

/// Request body for `PUT /config/payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollConfigurationRequest {
    /// Existing configuration id to update in place; omitted on creation.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Days covered by one biweekly period.
    #[serde(default = "default_biweekly_days")]
    pub biweekly_days: u32,
    /// Day of month of the first pay day.
    #[serde(default = "default_first_pay_day")]
    pub first_pay_day: u32,
    /// Day of month of the second pay day.
    #[serde(default = "default_second_pay_day")]
    pub second_pay_day: u32,
    /// Social security deduction percentage.
    #[serde(default)]
    pub social_security_rate: Decimal,
    /// Income tax deduction percentage.
    #[serde(default)]
    pub income_tax_rate: Decimal,
}

fn default_biweekly_days() -> u32 {
    15
}

fn default_first_pay_day() -> u32 {
    15
}

fn default_second_pay_day() -> u32 {
    30
}

/// Request body for benefit configuration creation and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitConfigurationRequest {
    /// Display name for the rule.
    pub name: String,
    /// The kind of benefit.
    pub benefit_type: BenefitType,
    /// Flat amount contributed regardless of salary.
    #[serde(default)]
    pub base_value: Decimal,
    /// Percentage of base salary contributed on top.
    #[serde(default)]
    pub salary_percentage: Decimal,
    /// Which classifications the rule applies to.
    pub applies_to: AppliesTo,
    /// Free-text formula documentation.
    #[serde(default)]
    pub formula: Option<String>,
    /// Whether the rule participates in evaluation.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl From<EmployeePaymentRequest> for EmployeePayment {
    fn from(req: EmployeePaymentRequest) -> Self {
        EmployeePayment {
            employee_id: req.employee_id,
            base_salary: req.base_salary,
            meal_voucher: req.meal_voucher,
            responsibility_bonus: req.responsibility_bonus,
            punctuality_bonus: req.punctuality_bonus,
            year_end_bonus: req.year_end_bonus,
            vacation_bonus: req.vacation_bonus,
            severance_accrual: req.severance_accrual,
            vacation_days: req.vacation_days,
            vacation_amount: req.vacation_amount,
            total_bonuses: req.total_bonuses,
            total_deductions: req.total_deductions,
            gross_amount: req.gross_amount,
            net_amount: req.net_amount,
        }
    }
}

impl From<PayrollLineRequest> for PayrollBonusLine {
    fn from(req: PayrollLineRequest) -> Self {
        PayrollBonusLine {
            employee_id: req.employee_id,
            name: req.name,
            amount: req.amount,
        }
    }
}

impl From<PayrollLineRequest> for PayrollDeductionLine {
    fn from(req: PayrollLineRequest) -> Self {
        PayrollDeductionLine {
            employee_id: req.employee_id,
            name: req.name,
            amount: req.amount,
        }
    }
}

impl From<CreatePayrollRunRequest> for NewPayrollRun {
    fn from(req: CreatePayrollRunRequest) -> Self {
        NewPayrollRun {
            period_label: req.period_label,
            pay_date: req.pay_date,
            description: req.description,
            payments: req.employees.into_iter().map(Into::into).collect(),
            bonuses: req.bonuses.into_iter().map(Into::into).collect(),
            deductions: req.deductions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreateSeveranceRequest> for NewSeverance {
    fn from(req: CreateSeveranceRequest) -> Self {
        NewSeverance {
            employee_id: req.employee_id,
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason,
            other_benefits: req.other_benefits,
        }
    }
}

impl From<UpdateSeveranceRequest> for SeveranceUpdate {
    fn from(req: UpdateSeveranceRequest) -> Self {
        SeveranceUpdate {
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason,
            severance_pay: req.severance_pay,
            year_end_bonus: req.year_end_bonus,
            vacation_bonus: req.vacation_bonus,
            pending_vacation_days: req.pending_vacation_days,
            pending_vacation_pay: req.pending_vacation_pay,
            other_benefits: req.other_benefits,
            status: req.status,
        }
    }
}

impl PayrollConfigurationRequest {
    /// Builds the domain configuration, minting an id when none was given.
    pub fn into_configuration(self) -> PayrollConfiguration {
        PayrollConfiguration {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            biweekly_days: self.biweekly_days,
            first_pay_day: self.first_pay_day,
            second_pay_day: self.second_pay_day,
            social_security_rate: self.social_security_rate,
            income_tax_rate: self.income_tax_rate,
            active: false,
        }
    }
}

impl BenefitConfigurationRequest {
    /// Builds the domain rule under the given id.
    pub fn into_configuration(self, id: Uuid) -> BenefitConfiguration {
        BenefitConfiguration {
            id,
            name: self.name,
            benefit_type: self.benefit_type,
            base_value: self.base_value,
            salary_percentage: self.salary_percentage,
            applies_to: self.applies_to,
            formula: self.formula,
            active: self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_without_types() {
        let json = r#"{"pay_date": "2024-06-15"}"#;
        let request: GeneratePayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_types, None);
    }

    #[test]
    fn test_generate_request_with_types() {
        let json = r#"{"pay_date": "2024-06-15", "employee_types": ["teacher", "laborer"]}"#;
        let request: GeneratePayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.employee_types,
            Some(vec![EmployeeType::Teacher, EmployeeType::Laborer])
        );
    }

    #[test]
    fn test_payment_request_defaults_itemized_fields() {
        let json = r#"{
            "employee_id": "t1",
            "base_salary": "500",
            "gross_amount": "500",
            "net_amount": "500"
        }"#;
        let request: EmployeePaymentRequest = serde_json::from_str(json).unwrap();
        let payment: EmployeePayment = request.into();
        assert_eq!(payment.meal_voucher, Decimal::ZERO);
        assert_eq!(payment.vacation_days, 0);
        assert!(payment.net_identity_holds());
    }

    #[test]
    fn test_payroll_configuration_request_defaults() {
        let json = r#"{}"#;
        let request: PayrollConfigurationRequest = serde_json::from_str(json).unwrap();
        let config = request.into_configuration();
        assert_eq!(config.biweekly_days, 15);
        assert_eq!(config.first_pay_day, 15);
        assert_eq!(config.second_pay_day, 30);
        assert_eq!(config.social_security_rate, Decimal::ZERO);
        assert!(!config.active);
    }

    #[test]
    fn test_benefit_request_defaults_to_active() {
        let json = r#"{
            "name": "Meal Voucher",
            "benefit_type": "meal_voucher",
            "applies_to": "all"
        }"#;
        let request: BenefitConfigurationRequest = serde_json::from_str(json).unwrap();
        assert!(request.active);
        let config = request.into_configuration(Uuid::new_v4());
        assert!(config.active);
        assert_eq!(config.base_value, Decimal::ZERO);
    }

    #[test]
    fn test_update_severance_request_is_fully_optional() {
        let request: UpdateSeveranceRequest = serde_json::from_str("{}").unwrap();
        let update: SeveranceUpdate = request.into();
        assert!(update.status.is_none());
        assert!(update.other_benefits.is_none());
    }
}
