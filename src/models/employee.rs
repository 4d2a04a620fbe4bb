//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeType enum
//! for representing workers in the payroll system. Employee records are
//! owned by the surrounding school administration system; the engine only
//! reads their classification and tenure dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee's classification within the school.
///
/// Only teachers, administrative staff and laborers are payroll
/// classifications; every other role in the system (students, guardians)
/// maps to [`EmployeeType::Other`] and is skipped by payroll generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeType {
    /// Teaching staff.
    Teacher,
    /// Administrative staff.
    Administrative,
    /// Maintenance and grounds staff.
    Laborer,
    /// Any non-payroll classification.
    Other,
}

impl EmployeeType {
    /// The classifications included in a payroll run by default.
    pub const PAYROLL_TYPES: [EmployeeType; 3] = [
        EmployeeType::Teacher,
        EmployeeType::Administrative,
        EmployeeType::Laborer,
    ];

    /// Returns true if this classification is paid through payroll.
    ///
    /// # Examples
    ///
    /// ```
    /// use school_payroll_engine::models::EmployeeType;
    ///
    /// assert!(EmployeeType::Teacher.is_payroll_type());
    /// assert!(!EmployeeType::Other.is_payroll_type());
    /// ```
    pub fn is_payroll_type(&self) -> bool {
        Self::PAYROLL_TYPES.contains(self)
    }
}

/// Represents an employee subject to payroll generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's full name.
    pub name: String,
    /// The employee's classification.
    pub employee_type: EmployeeType,
    /// The date the employee was hired, used by tenure-based rules.
    pub hire_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(employee_type: EmployeeType) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Maria Gonzalez".to_string(),
            employee_type,
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_deserialize_teacher() {
        let json = r#"{
            "id": "emp_001",
            "name": "Maria Gonzalez",
            "employee_type": "teacher",
            "hire_date": "2020-01-01"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.employee_type, EmployeeType::Teacher);
        assert_eq!(
            employee.hire_date,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_deserialize_other_type() {
        let json = r#"{
            "id": "stu_001",
            "name": "Pedro Diaz",
            "employee_type": "other",
            "hire_date": "2023-09-01"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.employee_type, EmployeeType::Other);
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let employee = create_test_employee(EmployeeType::Administrative);
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_employee_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EmployeeType::Teacher).unwrap(),
            "\"teacher\""
        );
        assert_eq!(
            serde_json::to_string(&EmployeeType::Administrative).unwrap(),
            "\"administrative\""
        );
        assert_eq!(
            serde_json::to_string(&EmployeeType::Laborer).unwrap(),
            "\"laborer\""
        );
    }

    #[test]
    fn test_payroll_types_exclude_other() {
        assert!(EmployeeType::Teacher.is_payroll_type());
        assert!(EmployeeType::Administrative.is_payroll_type());
        assert!(EmployeeType::Laborer.is_payroll_type());
        assert!(!EmployeeType::Other.is_payroll_type());
    }

    #[test]
    fn test_payroll_types_constant_has_three_entries() {
        assert_eq!(EmployeeType::PAYROLL_TYPES.len(), 3);
    }
}
