//! Conversion of persisted rows into in-memory entities.

use crate::types::{Department, DepartmentRow, Employee, EmployeeRow, EntityId, Role, RoleRow};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("role {id} has an invalid salary: {salary}")]
    InvalidSalary { id: EntityId, salary: f64 },
}

pub fn normalize_department(row: DepartmentRow) -> Department {
    Department {
        id: row.id,
        name: row.name,
    }
}

/// Salaries must be finite and non-negative even when they come from the store.
pub fn normalize_role(row: RoleRow) -> Result<Role, NormalizeError> {
    if !row.salary.is_finite() || row.salary < 0.0 {
        return Err(NormalizeError::InvalidSalary {
            id: row.id,
            salary: row.salary,
        });
    }
    Ok(Role {
        id: row.id,
        title: row.title,
        salary: row.salary,
        department_id: row.department_id,
    })
}

pub fn normalize_employee(row: EmployeeRow) -> Employee {
    Employee {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        role_id: row.role_id,
        manager_id: row.manager_id,
        display_name: String::new(),
    }
}
