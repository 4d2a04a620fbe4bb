//! The employee directory seam.

use crate::models::{Employee, EmployeeType};

/// Read access to the school system's employee records.
///
/// The engine never mutates employees; it only lists them by classification
/// when generating a run and looks them up by id when validating input.
/// Implementations must preserve a stable listing order, since payroll
/// lines are persisted in the order employees are returned.
pub trait EmployeeDirectory: Send + Sync {
    /// Lists employees whose classification is in `types`, in directory
    /// order.
    fn list_by_types(&self, types: &[EmployeeType]) -> Vec<Employee>;

    /// Looks up an employee by id.
    fn get_by_id(&self, id: &str) -> Option<Employee>;
}

/// An in-process directory backed by a seeded list.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    employees: Vec<Employee>,
}

impl MemoryDirectory {
    /// Creates a directory over the given employees, preserving their order.
    pub fn new(employees: Vec<Employee>) -> Self {
        MemoryDirectory { employees }
    }
}

impl EmployeeDirectory for MemoryDirectory {
    fn list_by_types(&self, types: &[EmployeeType]) -> Vec<Employee> {
        self.employees
            .iter()
            .filter(|e| types.contains(&e.employee_type))
            .cloned()
            .collect()
    }

    fn get_by_id(&self, id: &str) -> Option<Employee> {
        self.employees.iter().find(|e| e.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn employee(id: &str, employee_type: EmployeeType) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            employee_type,
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_list_by_types_filters_and_preserves_order() {
        let directory = MemoryDirectory::new(vec![
            employee("t1", EmployeeType::Teacher),
            employee("s1", EmployeeType::Other),
            employee("a1", EmployeeType::Administrative),
            employee("t2", EmployeeType::Teacher),
        ]);

        let listed = directory.list_by_types(&[EmployeeType::Teacher, EmployeeType::Administrative]);
        let ids: Vec<&str> = listed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "a1", "t2"]);
    }

    #[test]
    fn test_list_by_types_with_no_match_is_empty() {
        let directory = MemoryDirectory::new(vec![employee("s1", EmployeeType::Other)]);
        assert!(directory.list_by_types(&EmployeeType::PAYROLL_TYPES).is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let directory = MemoryDirectory::new(vec![
            employee("t1", EmployeeType::Teacher),
            employee("a1", EmployeeType::Administrative),
        ]);

        assert_eq!(directory.get_by_id("a1").unwrap().id, "a1");
        assert!(directory.get_by_id("missing").is_none());
    }
}
