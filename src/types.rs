//! Core types for tracked entities and their persisted rows.

use serde::{Deserialize, Serialize};

/// Store-assigned primary key shared by every table.
pub type EntityId = i64;

/// A department as persisted in the `department` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRow {
    pub id: EntityId,
    pub name: String,
}

/// A role as persisted in the `role` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRow {
    pub id: EntityId,
    pub title: String,
    pub salary: f64,
    pub department_id: EntityId,
}

/// An employee as persisted in the `employee` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRow {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub role_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<EntityId>,
}

/// Fields collected for a department that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    pub name: String,
}

/// Fields collected for a role that has not been written yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub title: String,
    pub salary: f64,
    pub department_id: EntityId,
}

/// Fields collected for an employee that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role_id: EntityId,
    pub manager_id: Option<EntityId>,
}

impl NewDepartment {
    pub fn with_id(self, id: EntityId) -> DepartmentRow {
        DepartmentRow {
            id,
            name: self.name,
        }
    }
}

impl NewRole {
    pub fn with_id(self, id: EntityId) -> RoleRow {
        RoleRow {
            id,
            title: self.title,
            salary: self.salary,
            department_id: self.department_id,
        }
    }
}

impl NewEmployee {
    pub fn with_id(self, id: EntityId) -> EmployeeRow {
        EmployeeRow {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            role_id: self.role_id,
            manager_id: self.manager_id,
        }
    }
}

/// In-memory department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: EntityId,
    pub name: String,
}

/// In-memory role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: EntityId,
    pub title: String,
    pub salary: f64,
    pub department_id: EntityId,
}

/// In-memory employee.
///
/// `display_name` is empty until the reference store registers the employee
/// and assigns a unique, disambiguated name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub role_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<EntityId>,
    #[serde(default)]
    pub display_name: String,
}

impl Employee {
    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
