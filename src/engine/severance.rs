//! Severance settlement lifecycle.
//!
//! Estimates are pure and persist nothing; creating a settlement recomputes
//! the component amounts, stores the record as `Pending`, and from there the
//! only lifecycle transition is marking it paid. Updates may rewrite the
//! component fields and always re-derive the total.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::calculation::{estimate_settlement, fractional_years};
use crate::error::{EngineError, EngineResult};
use crate::models::{SettlementStatus, SeveranceEstimate, SeveranceSettlement};

use super::PayrollEngine;

/// Input for creating a severance settlement.
#[derive(Debug, Clone)]
pub struct NewSeverance {
    /// The departing employee.
    pub employee_id: String,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment.
    pub end_date: NaiveDate,
    /// The stated reason for departure.
    pub reason: String,
    /// Negotiated extras beyond the computed components.
    pub other_benefits: Decimal,
}

/// A partial rewrite of a settlement's fields.
///
/// Only the provided fields change; the total is re-derived afterwards
/// regardless. Status may be set explicitly, which is how an adjustment
/// can reopen a paid settlement.
#[derive(Debug, Clone, Default)]
pub struct SeveranceUpdate {
    /// New employment start date.
    pub start_date: Option<NaiveDate>,
    /// New employment end date.
    pub end_date: Option<NaiveDate>,
    /// New departure reason.
    pub reason: Option<String>,
    /// New severance pay component.
    pub severance_pay: Option<Decimal>,
    /// New year-end bonus component.
    pub year_end_bonus: Option<Decimal>,
    /// New vacation bonus component.
    pub vacation_bonus: Option<Decimal>,
    /// New pending vacation day count.
    pub pending_vacation_days: Option<u32>,
    /// New pending vacation pay component.
    pub pending_vacation_pay: Option<Decimal>,
    /// New negotiated extras.
    pub other_benefits: Option<Decimal>,
    /// Explicit status override.
    pub status: Option<SettlementStatus>,
}

impl PayrollEngine {
    /// Computes a severance estimate without persisting anything.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown employee; `Validation` when the employee
    /// is not a payroll classification or the dates are inverted.
    pub fn estimate_severance(
        &self,
        employee_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: &str,
    ) -> EngineResult<SeveranceEstimate> {
        let employee = self
            .directory
            .get_by_id(employee_id)
            .ok_or_else(|| EngineError::not_found(format!("employee '{}'", employee_id)))?;
        let today = Utc::now().date_naive();
        estimate_settlement(&employee, start_date, end_date, reason, today)
    }

    /// Creates a `Pending` settlement from a fresh estimate.
    ///
    /// The persisted total, unlike the estimate total, includes
    /// `other_benefits`.
    pub fn create_severance(&self, new: NewSeverance) -> EngineResult<SeveranceSettlement> {
        let estimate =
            self.estimate_severance(&new.employee_id, new.start_date, new.end_date, &new.reason)?;

        let mut settlement = SeveranceSettlement {
            id: Uuid::new_v4(),
            employee_id: estimate.employee_id,
            start_date: estimate.start_date,
            end_date: estimate.end_date,
            reason: estimate.reason,
            years_of_service: estimate.years_of_service,
            average_salary: estimate.average_salary,
            severance_pay: estimate.severance_pay,
            year_end_bonus: estimate.year_end_bonus,
            vacation_bonus: estimate.vacation_bonus,
            pending_vacation_days: estimate.pending_vacation_days,
            pending_vacation_pay: estimate.pending_vacation_pay,
            other_benefits: new.other_benefits,
            total_amount: Decimal::ZERO,
            status: SettlementStatus::Pending,
            paid_date: None,
        };
        settlement.recompute_total();

        let settlement = self
            .store
            .transaction(|tx| {
                tx.insert_settlement(settlement.clone())?;
                Ok(settlement.clone())
            })?;

        info!(
            settlement = %settlement.id,
            employee = %settlement.employee_id,
            total = %settlement.total_amount,
            "severance settlement created"
        );
        Ok(settlement)
    }

    /// Rewrites a settlement's fields and re-derives its total.
    ///
    /// When either employment date changes, tenure is recomputed from the
    /// updated pair.
    pub fn update_severance(
        &self,
        id: Uuid,
        update: SeveranceUpdate,
    ) -> EngineResult<SeveranceSettlement> {
        self.store.transaction(|tx| {
            let settlement = tx.settlement_mut(id)?;

            if let Some(start_date) = update.start_date {
                settlement.start_date = start_date;
            }
            if let Some(end_date) = update.end_date {
                settlement.end_date = end_date;
            }
            if update.start_date.is_some() || update.end_date.is_some() {
                settlement.years_of_service =
                    fractional_years(settlement.start_date, settlement.end_date)?;
            }
            if let Some(reason) = update.reason.clone() {
                settlement.reason = reason;
            }
            if let Some(severance_pay) = update.severance_pay {
                settlement.severance_pay = severance_pay;
            }
            if let Some(year_end_bonus) = update.year_end_bonus {
                settlement.year_end_bonus = year_end_bonus;
            }
            if let Some(vacation_bonus) = update.vacation_bonus {
                settlement.vacation_bonus = vacation_bonus;
            }
            if let Some(days) = update.pending_vacation_days {
                settlement.pending_vacation_days = days;
            }
            if let Some(pending_vacation_pay) = update.pending_vacation_pay {
                settlement.pending_vacation_pay = pending_vacation_pay;
            }
            if let Some(other_benefits) = update.other_benefits {
                settlement.other_benefits = other_benefits;
            }
            if let Some(status) = update.status {
                settlement.status = status;
            }
            settlement.recompute_total();
            Ok(settlement.clone())
        })
    }

    /// Transitions a `Pending` settlement to `Paid`.
    ///
    /// # Errors
    ///
    /// `Conflict` when the settlement is already paid.
    pub fn mark_severance_paid(
        &self,
        id: Uuid,
        paid_date: Option<NaiveDate>,
    ) -> EngineResult<SeveranceSettlement> {
        let today = Utc::now().date_naive();
        let settlement = self.store.transaction(|tx| {
            let settlement = tx.settlement_mut(id)?;
            if settlement.status == SettlementStatus::Paid {
                return Err(EngineError::conflict(format!(
                    "severance settlement '{}' is already paid",
                    id
                )));
            }
            settlement.status = SettlementStatus::Paid;
            settlement.paid_date = Some(paid_date.unwrap_or(today));
            Ok(settlement.clone())
        })?;

        info!(settlement = %id, "severance settlement paid");
        Ok(settlement)
    }

    /// Deletes a settlement.
    ///
    /// # Errors
    ///
    /// `Conflict` when the settlement is paid; paid settlements are part of
    /// the financial record and cannot be removed.
    pub fn delete_severance(&self, id: Uuid) -> EngineResult<()> {
        self.store.transaction(|tx| {
            let settlement = tx.settlement_mut(id)?;
            if settlement.status == SettlementStatus::Paid {
                return Err(EngineError::conflict(format!(
                    "severance settlement '{}' is paid and cannot be deleted",
                    id
                )));
            }
            tx.remove_settlement(id)?;
            Ok(())
        })
    }

    /// Returns every severance settlement.
    pub fn severances(&self) -> Vec<SeveranceSettlement> {
        self.store.settlements()
    }

    /// Looks up a settlement by id.
    pub fn severance(&self, id: Uuid) -> Option<SeveranceSettlement> {
        self.store.settlement(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, EmployeeType};
    use crate::store::{MemoryDirectory, MemoryStore};
    use std::str::FromStr;
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine() -> PayrollEngine {
        let store = Arc::new(MemoryStore::new());
        let directory = Arc::new(MemoryDirectory::new(vec![
            Employee {
                id: "t1".to_string(),
                name: "Maria Gonzalez".to_string(),
                employee_type: EmployeeType::Teacher,
                hire_date: date(2020, 1, 1),
            },
            Employee {
                id: "s1".to_string(),
                name: "Pedro Diaz".to_string(),
                employee_type: EmployeeType::Other,
                hire_date: date(2023, 9, 1),
            },
        ]));
        PayrollEngine::new(store, directory)
    }

    fn four_year_teacher_settlement(engine: &PayrollEngine) -> SeveranceSettlement {
        engine
            .create_severance(NewSeverance {
                employee_id: "t1".to_string(),
                start_date: date(2020, 1, 1),
                end_date: date(2024, 1, 1),
                reason: "resignation".to_string(),
                other_benefits: dec("50"),
            })
            .unwrap()
    }

    /// SL-001: the persisted total law includes other benefits
    #[test]
    fn test_create_total_includes_other_benefits() {
        let engine = engine();
        let settlement = four_year_teacher_settlement(&engine);

        assert_eq!(settlement.years_of_service, dec("4"));
        assert_eq!(settlement.severance_pay, dec("2000"));
        assert_eq!(settlement.pending_vacation_days, 60);
        assert_eq!(settlement.pending_vacation_pay, dec("1000"));
        assert_eq!(settlement.vacation_bonus, dec("250"));
        assert_eq!(settlement.status, SettlementStatus::Pending);
        assert_eq!(
            settlement.total_amount,
            settlement.severance_pay
                + settlement.year_end_bonus
                + settlement.vacation_bonus
                + settlement.pending_vacation_pay
                + settlement.other_benefits
        );
    }

    /// SL-002: the estimate excludes other benefits and persists nothing
    #[test]
    fn test_estimate_persists_nothing() {
        let engine = engine();
        let estimate = engine
            .estimate_severance("t1", date(2020, 1, 1), date(2024, 1, 1), "resignation")
            .unwrap();

        assert_eq!(
            estimate.total_amount,
            estimate.severance_pay
                + estimate.year_end_bonus
                + estimate.vacation_bonus
                + estimate.pending_vacation_pay
        );
        assert!(engine.severances().is_empty());
    }

    /// SL-003: unknown employees and non-payroll classifications are rejected
    #[test]
    fn test_estimate_rejects_bad_employees() {
        let engine = engine();

        let err = engine
            .estimate_severance("ghost", date(2020, 1, 1), date(2024, 1, 1), "resignation")
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));

        let err = engine
            .estimate_severance("s1", date(2020, 1, 1), date(2024, 1, 1), "resignation")
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));
        assert!(engine.severances().is_empty());
    }

    /// SL-004: pending to paid is the only lifecycle transition
    #[test]
    fn test_mark_paid_transition() {
        let engine = engine();
        let settlement = four_year_teacher_settlement(&engine);

        let paid = engine
            .mark_severance_paid(settlement.id, Some(date(2024, 2, 1)))
            .unwrap();
        assert_eq!(paid.status, SettlementStatus::Paid);
        assert_eq!(paid.paid_date, Some(date(2024, 2, 1)));

        let err = engine.mark_severance_paid(settlement.id, None).unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
    }

    #[test]
    fn test_mark_paid_defaults_to_today() {
        let engine = engine();
        let settlement = four_year_teacher_settlement(&engine);

        let paid = engine.mark_severance_paid(settlement.id, None).unwrap();
        assert!(paid.paid_date.is_some());
    }

    /// SL-005: updates rewrite fields and re-derive the total
    #[test]
    fn test_update_resums_total() {
        let engine = engine();
        let settlement = four_year_teacher_settlement(&engine);

        let updated = engine
            .update_severance(
                settlement.id,
                SeveranceUpdate {
                    other_benefits: Some(dec("100")),
                    ..SeveranceUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.other_benefits, dec("100"));
        assert_eq!(
            updated.total_amount,
            settlement.total_amount - dec("50") + dec("100")
        );
    }

    /// SL-006: an explicit status override may reopen a paid settlement
    #[test]
    fn test_update_can_reopen_paid_settlement() {
        let engine = engine();
        let settlement = four_year_teacher_settlement(&engine);
        engine.mark_severance_paid(settlement.id, None).unwrap();

        // Without an explicit override the status is untouched.
        let updated = engine
            .update_severance(
                settlement.id,
                SeveranceUpdate {
                    reason: Some("correction".to_string()),
                    ..SeveranceUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, SettlementStatus::Paid);

        let reopened = engine
            .update_severance(
                settlement.id,
                SeveranceUpdate {
                    status: Some(SettlementStatus::Pending),
                    ..SeveranceUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(reopened.status, SettlementStatus::Pending);
    }

    /// SL-007: date rewrites recompute tenure
    #[test]
    fn test_update_dates_recomputes_tenure() {
        let engine = engine();
        let settlement = four_year_teacher_settlement(&engine);

        // 2020-01-01 to 2028-01-01 spans 2922 days, exactly 8 mean years.
        let updated = engine
            .update_severance(
                settlement.id,
                SeveranceUpdate {
                    end_date: Some(date(2028, 1, 1)),
                    ..SeveranceUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.years_of_service, dec("8"));
    }

    #[test]
    fn test_update_inverted_dates_rolls_back() {
        let engine = engine();
        let settlement = four_year_teacher_settlement(&engine);

        let err = engine
            .update_severance(
                settlement.id,
                SeveranceUpdate {
                    end_date: Some(date(2019, 1, 1)),
                    ..SeveranceUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));

        // The failed update left the settlement untouched.
        let stored = engine.severance(settlement.id).unwrap();
        assert_eq!(stored.end_date, date(2024, 1, 1));
        assert_eq!(stored.years_of_service, dec("4"));
    }

    /// SL-008: only pending settlements can be deleted
    #[test]
    fn test_delete_guards_paid_settlements() {
        let engine = engine();
        let pending = four_year_teacher_settlement(&engine);
        engine.delete_severance(pending.id).unwrap();
        assert!(engine.severances().is_empty());

        let paid = four_year_teacher_settlement(&engine);
        engine.mark_severance_paid(paid.id, None).unwrap();
        let err = engine.delete_severance(paid.id).unwrap_err();
        assert!(matches!(err, EngineError::Conflict { .. }));
        assert_eq!(engine.severances().len(), 1);
    }

    #[test]
    fn test_delete_unknown_settlement_is_not_found() {
        let engine = engine();
        let err = engine.delete_severance(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }
}
