//! In-memory reference store for departments, roles and employees.
//!
//! The store owns every entity loaded for a session together with the
//! secondary indexes used to validate input and populate choice lists.

use crate::normalize::{NormalizeError, normalize_department, normalize_employee, normalize_role};
use crate::types::{
    Department, DepartmentRow, Employee, EmployeeRow, EntityId, NewDepartment, NewRole, Role,
    RoleRow,
};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Sorry, a department already exists with that name.")]
    DuplicateName(String),
    #[error("Sorry, that title is already taken.")]
    DuplicateTitle(String),
    #[error("Sorry, please use a positive number for salary?")]
    InvalidSalary(String),
}

/// Parse salary input, rejecting anything that is not a finite, non-negative number.
pub fn parse_salary(input: &str) -> Result<f64, StoreError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(salary) if salary.is_finite() && salary >= 0.0 => Ok(salary),
        _ => Err(StoreError::InvalidSalary(trimmed.to_string())),
    }
}

#[derive(Debug, Default)]
pub struct ReferenceStore {
    departments: BTreeMap<EntityId, Department>,
    departments_by_name: HashMap<String, EntityId>,
    roles: BTreeMap<EntityId, Role>,
    roles_by_title: HashMap<String, EntityId>,
    employees: BTreeMap<EntityId, Employee>,
    employees_by_name: HashMap<String, EntityId>,
    name_counts: HashMap<String, u32>,
}

impl ReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole store with freshly fetched rows.
    ///
    /// The new state is built aside and swapped in only once every row has
    /// normalized, so a failed reload leaves the previous state untouched.
    /// Display-name counters start from zero again.
    pub fn reload(
        &mut self,
        employees: Vec<EmployeeRow>,
        departments: Vec<DepartmentRow>,
        roles: Vec<RoleRow>,
    ) -> Result<(), NormalizeError> {
        let mut fresh = ReferenceStore::new();

        for row in employees {
            fresh.register_employee(normalize_employee(row));
        }
        for row in departments {
            let department = normalize_department(row);
            fresh
                .departments_by_name
                .insert(department.name.clone(), department.id);
            fresh.departments.insert(department.id, department);
        }
        for row in roles {
            let role = normalize_role(row)?;
            fresh.roles_by_title.insert(role.title.clone(), role.id);
            fresh.roles.insert(role.id, role);
        }

        *self = fresh;
        Ok(())
    }

    /// Reject a department whose name is already indexed.
    pub fn check_department(&self, record: &NewDepartment) -> Result<(), StoreError> {
        if self.departments_by_name.contains_key(&record.name) {
            return Err(StoreError::DuplicateName(record.name.clone()));
        }
        Ok(())
    }

    /// Reject a role with a negative salary or an already indexed title.
    pub fn check_role(&self, record: &NewRole) -> Result<(), StoreError> {
        if !record.salary.is_finite() || record.salary < 0.0 {
            return Err(StoreError::InvalidSalary(record.salary.to_string()));
        }
        if self.roles_by_title.contains_key(&record.title) {
            return Err(StoreError::DuplicateTitle(record.title.clone()));
        }
        Ok(())
    }

    pub fn insert_department(&mut self, record: DepartmentRow) -> Result<(), StoreError> {
        self.check_department(&NewDepartment {
            name: record.name.clone(),
        })?;
        let department = normalize_department(record);
        self.departments_by_name
            .insert(department.name.clone(), department.id);
        self.departments.insert(department.id, department);
        Ok(())
    }

    pub fn insert_role(&mut self, record: RoleRow) -> Result<(), StoreError> {
        self.check_role(&NewRole {
            title: record.title.clone(),
            salary: record.salary,
            department_id: record.department_id,
        })?;
        let role =
            normalize_role(record).map_err(|err| StoreError::InvalidSalary(err.to_string()))?;
        self.roles_by_title.insert(role.title.clone(), role.id);
        self.roles.insert(role.id, role);
        Ok(())
    }

    /// Register an employee, returning the display name it was given.
    pub fn insert_employee(&mut self, record: EmployeeRow) -> String {
        self.register_employee(normalize_employee(record))
    }

    fn register_employee(&mut self, mut employee: Employee) -> String {
        let display_name = self.next_display_name(&employee.full_name());
        employee.display_name = display_name.clone();
        self.employees_by_name
            .insert(display_name.clone(), employee.id);
        self.employees.insert(employee.id, employee);
        display_name
    }

    /// First holder of a full name gets it verbatim; later ones get " (n)".
    /// The counter keeps climbing past any suffix already taken by an
    /// unrelated employee so display names stay unique.
    fn next_display_name(&mut self, full_name: &str) -> String {
        let count = self.name_counts.entry(full_name.to_string()).or_insert(0);
        loop {
            *count += 1;
            let candidate = if *count == 1 {
                full_name.to_string()
            } else {
                format!("{} ({})", full_name, count)
            };
            if !self.employees_by_name.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    pub fn department_id_by_name(&self, name: &str) -> Option<EntityId> {
        self.departments_by_name.get(name).copied()
    }

    pub fn role_id_by_title(&self, title: &str) -> Option<EntityId> {
        self.roles_by_title.get(title).copied()
    }

    pub fn employee_id_by_display_name(&self, name: &str) -> Option<EntityId> {
        self.employees_by_name.get(name).copied()
    }

    pub fn department(&self, id: EntityId) -> Option<&Department> {
        self.departments.get(&id)
    }

    pub fn role(&self, id: EntityId) -> Option<&Role> {
        self.roles.get(&id)
    }

    pub fn employee(&self, id: EntityId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    /// Departments in ascending id order.
    pub fn departments(&self) -> impl Iterator<Item = &Department> {
        self.departments.values()
    }

    /// Roles in ascending id order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    /// Employees in ascending id order.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    pub fn department_count(&self) -> usize {
        self.departments.len()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// Indexed department names, ordered by department id.
    pub fn department_names(&self) -> Vec<String> {
        self.indexed_keys(&self.departments_by_name)
    }

    /// Indexed role titles, ordered by role id.
    pub fn role_titles(&self) -> Vec<String> {
        self.indexed_keys(&self.roles_by_title)
    }

    /// Employee display names, ordered by employee id.
    pub fn employee_display_names(&self) -> Vec<String> {
        self.indexed_keys(&self.employees_by_name)
    }

    fn indexed_keys(&self, index: &HashMap<String, EntityId>) -> Vec<String> {
        let mut keyed: Vec<(EntityId, &String)> =
            index.iter().map(|(key, id)| (*id, key)).collect();
        keyed.sort();
        keyed.into_iter().map(|(_, key)| key.clone()).collect()
    }
}
