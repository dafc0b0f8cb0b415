//! Relational persistence for the `department`, `role` and `employee` tables.

use crate::types::{
    DepartmentRow, EmployeeRow, EntityId, NewDepartment, NewEmployee, NewRole, RoleRow,
};
use rusqlite::{Connection, params};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// Result of a single-row insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertOutcome {
    pub table: &'static str,
    pub insert_id: EntityId,
    pub affected_rows: usize,
}

/// Bulk reads and single-row inserts against the three tables.
pub trait Persistence {
    fn fetch_employees(&self) -> Result<Vec<EmployeeRow>, PersistenceError>;
    fn fetch_departments(&self) -> Result<Vec<DepartmentRow>, PersistenceError>;
    fn fetch_roles(&self) -> Result<Vec<RoleRow>, PersistenceError>;

    fn insert_department(
        &mut self,
        record: &NewDepartment,
    ) -> Result<InsertOutcome, PersistenceError>;
    fn insert_role(&mut self, record: &NewRole) -> Result<InsertOutcome, PersistenceError>;
    fn insert_employee(&mut self, record: &NewEmployee)
    -> Result<InsertOutcome, PersistenceError>;
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS department (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS role (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    salary REAL NOT NULL,
    department_id INTEGER NOT NULL REFERENCES department(id)
);
CREATE TABLE IF NOT EXISTS employee (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    role_id INTEGER NOT NULL REFERENCES role(id),
    manager_id INTEGER REFERENCES employee(id)
);
";

const SEED: &str = "
INSERT INTO department (name) VALUES ('Engineering'), ('Sales'), ('Finance');
INSERT INTO role (title, salary, department_id) VALUES
    ('Lead Engineer', 150000, 1),
    ('Software Engineer', 120000, 1),
    ('Sales Lead', 100000, 2),
    ('Salesperson', 80000, 2),
    ('Accountant', 125000, 3);
INSERT INTO employee (first_name, last_name, role_id, manager_id) VALUES
    ('Ashley', 'Rodriguez', 1, NULL),
    ('Kevin', 'Tupik', 2, 1),
    ('Kevin', 'Tupik', 2, 1),
    ('Sarah', 'Lourd', 3, NULL),
    ('Tom', 'Allen', 4, 4),
    ('Malia', 'Brown', 5, NULL);
";

/// SQLite-backed store holding one long-lived connection.
#[derive(Debug)]
pub struct SqlitePersistence {
    conn: Connection,
}

impl SqlitePersistence {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, PersistenceError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert the demo dataset if the store has no departments yet.
    /// Returns whether anything was written.
    pub fn seed_demo_data(&self) -> Result<bool, PersistenceError> {
        let departments: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM department", [], |row| row.get(0))?;
        if departments > 0 {
            return Ok(false);
        }
        self.conn.execute_batch(SEED)?;
        Ok(true)
    }

    fn outcome(&self, table: &'static str, affected_rows: usize) -> InsertOutcome {
        InsertOutcome {
            table,
            insert_id: self.conn.last_insert_rowid(),
            affected_rows,
        }
    }
}

impl Persistence for SqlitePersistence {
    fn fetch_employees(&self) -> Result<Vec<EmployeeRow>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, role_id, manager_id FROM employee ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(EmployeeRow {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                role_id: row.get(3)?,
                manager_id: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn fetch_departments(&self) -> Result<Vec<DepartmentRow>, PersistenceError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM department ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(DepartmentRow {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn fetch_roles(&self) -> Result<Vec<RoleRow>, PersistenceError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, salary, department_id FROM role ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(RoleRow {
                id: row.get(0)?,
                title: row.get(1)?,
                salary: row.get(2)?,
                department_id: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn insert_department(
        &mut self,
        record: &NewDepartment,
    ) -> Result<InsertOutcome, PersistenceError> {
        let affected = self.conn.execute(
            "INSERT INTO department (name) VALUES (?1)",
            params![record.name],
        )?;
        Ok(self.outcome("department", affected))
    }

    fn insert_role(&mut self, record: &NewRole) -> Result<InsertOutcome, PersistenceError> {
        let affected = self.conn.execute(
            "INSERT INTO role (title, salary, department_id) VALUES (?1, ?2, ?3)",
            params![record.title, record.salary, record.department_id],
        )?;
        Ok(self.outcome("role", affected))
    }

    fn insert_employee(
        &mut self,
        record: &NewEmployee,
    ) -> Result<InsertOutcome, PersistenceError> {
        let affected = self.conn.execute(
            "INSERT INTO employee (first_name, last_name, role_id, manager_id) VALUES (?1, ?2, ?3, ?4)",
            params![
                record.first_name,
                record.last_name,
                record.role_id,
                record.manager_id
            ],
        )?;
        Ok(self.outcome("employee", affected))
    }
}
