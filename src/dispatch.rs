//! Menu commands and the interactive session that runs them.

use crate::normalize::NormalizeError;
use crate::persistence::{InsertOutcome, Persistence, PersistenceError};
use crate::projection::{
    DEPARTMENT_HEADERS, EMPLOYEE_DEPARTMENT_COLUMN, EMPLOYEE_HEADERS, EMPLOYEE_MANAGER_COLUMN,
    IntegrityFault, ROLE_HEADERS, department_rows, employee_rows, render_table, role_rows,
    sort_by_column,
};
use crate::prompt::{PromptError, Prompter, Question};
use crate::store::{ReferenceStore, StoreError, parse_salary};
use crate::types::{NewDepartment, NewEmployee, NewRole};
use colored::Colorize;
use std::io::{self, Write};
use thiserror::Error;

/// Manager choice meaning "this employee has no manager".
pub const NO_MANAGER: &str = "--- ---Nobody--- ---";

const MENU_MESSAGE: &str = "what would you like to do?";

#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Rejected(#[from] StoreError),
    #[error("{0}")]
    MissingPrerequisite(&'static str),
    #[error("Sorry, '{0}' is no longer available.")]
    UnknownChoice(String),
    #[error("SQL error occurred: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("data integrity fault: {0}")]
    Integrity(#[from] IntegrityFault),
    #[error("data integrity fault: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("prompt failed: {0}")]
    Prompt(#[from] PromptError),
    #[error("output failed: {0}")]
    Output(#[from] io::Error),
}

impl ActionError {
    /// Errors that end the session rather than just the current action.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ActionError::Output(_) | ActionError::Prompt(PromptError::Io(_) | PromptError::Closed)
        )
    }
}

/// Every menu entry, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    RefreshLocalData,
    ViewAllEmployees,
    ViewAllEmployeesByDepartment,
    ViewAllEmployeesByManager,
    AddEmployee,
    RemoveEmployee,
    UpdateEmployeeRole,
    UpdateEmployeeManager,
    ViewAllRoles,
    AddRole,
    RemoveRole,
    ViewAllDepartments,
    AddDepartment,
    RemoveDepartment,
    Quit,
}

impl Command {
    pub const ALL: [Command; 15] = [
        Command::RefreshLocalData,
        Command::ViewAllEmployees,
        Command::ViewAllEmployeesByDepartment,
        Command::ViewAllEmployeesByManager,
        Command::AddEmployee,
        Command::RemoveEmployee,
        Command::UpdateEmployeeRole,
        Command::UpdateEmployeeManager,
        Command::ViewAllRoles,
        Command::AddRole,
        Command::RemoveRole,
        Command::ViewAllDepartments,
        Command::AddDepartment,
        Command::RemoveDepartment,
        Command::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Command::RefreshLocalData => "Refresh Local Data",
            Command::ViewAllEmployees => "View All Employees",
            Command::ViewAllEmployeesByDepartment => "View All Employees By Department",
            Command::ViewAllEmployeesByManager => "View All Employees By Manager",
            Command::AddEmployee => "Add Employee",
            Command::RemoveEmployee => "Remove Employee",
            Command::UpdateEmployeeRole => "Update Employee Role",
            Command::UpdateEmployeeManager => "Update Employee Manager",
            Command::ViewAllRoles => "View All Roles",
            Command::AddRole => "Add Role",
            Command::RemoveRole => "Remove Role",
            Command::ViewAllDepartments => "View All Departments",
            Command::AddDepartment => "Add Department",
            Command::RemoveDepartment => "Remove Department",
            Command::Quit => "Quit",
        }
    }

    /// Menu entries that are listed but have no action behind them yet.
    pub fn is_implemented(self) -> bool {
        !matches!(
            self,
            Command::RemoveEmployee
                | Command::UpdateEmployeeRole
                | Command::UpdateEmployeeManager
                | Command::RemoveRole
                | Command::RemoveDepartment
        )
    }

    pub fn menu_labels() -> Vec<String> {
        Command::ALL.iter().map(|c| c.label().to_string()).collect()
    }
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("Unknown command: {}", s))
    }
}

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The no-manager choice, lengthened if an employee somehow carries the same
/// display name.
pub fn no_manager_choice(store: &ReferenceStore) -> String {
    let mut choice = NO_MANAGER.to_string();
    while store.employee_id_by_display_name(&choice).is_some() {
        choice.push('-');
    }
    choice
}

/// One interactive session over a reference store.
pub struct Dispatcher<P, Q, W> {
    store: ReferenceStore,
    persistence: P,
    prompter: Q,
    out: W,
}

impl<P: Persistence, Q: Prompter, W: Write> Dispatcher<P, Q, W> {
    pub fn new(persistence: P, prompter: Q, out: W) -> Self {
        Self {
            store: ReferenceStore::new(),
            persistence,
            prompter,
            out,
        }
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Fetch all three tables, then rebuild the store from them.
    /// Nothing changes in memory unless every fetch succeeds.
    pub fn refresh(&mut self) -> Result<(), ActionError> {
        let employees = self.persistence.fetch_employees()?;
        let departments = self.persistence.fetch_departments()?;
        let roles = self.persistence.fetch_roles()?;
        self.store.reload(employees, departments, roles)?;
        Ok(())
    }

    /// Show the menu and run commands until Quit.
    pub fn run(&mut self) -> Result<(), ActionError> {
        let labels = Command::menu_labels();
        loop {
            let choice = self.prompter.select(MENU_MESSAGE, &labels)?;
            if self.dispatch_label(&choice)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Dispatch a menu label; unknown labels are reported as not implemented.
    pub fn dispatch_label(&mut self, label: &str) -> Result<Flow, ActionError> {
        match label.parse::<Command>() {
            Ok(command) => self.dispatch(command),
            Err(_) => {
                self.not_implemented()?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Flow, ActionError> {
        if command == Command::Quit {
            writeln!(self.out, "{}", "Okay, goodbye".green())?;
            return Ok(Flow::Quit);
        }

        match self.execute(command) {
            Ok(()) => {}
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn execute(&mut self, command: Command) -> Result<(), ActionError> {
        match command {
            Command::RefreshLocalData => {
                self.refresh()?;
                writeln!(
                    self.out,
                    "{}",
                    format!(
                        "Loaded {} employees, {} roles, {} departments",
                        self.store.employee_count(),
                        self.store.role_count(),
                        self.store.department_count()
                    )
                    .dimmed()
                )?;
                Ok(())
            }
            Command::ViewAllEmployees => self.view_employees(None),
            Command::ViewAllEmployeesByDepartment => {
                self.view_employees(Some(EMPLOYEE_DEPARTMENT_COLUMN))
            }
            Command::ViewAllEmployeesByManager => self.view_employees(Some(EMPLOYEE_MANAGER_COLUMN)),
            Command::ViewAllRoles => {
                let rows = role_rows(&self.store)?;
                write!(self.out, "{}", render_table(&ROLE_HEADERS, &rows))?;
                Ok(())
            }
            Command::ViewAllDepartments => {
                let rows = department_rows(&self.store);
                write!(self.out, "{}", render_table(&DEPARTMENT_HEADERS, &rows))?;
                Ok(())
            }
            Command::AddDepartment => self.add_department(),
            Command::AddRole => self.add_role(),
            Command::AddEmployee => self.add_employee(),
            Command::Quit => Ok(()),
            _ => self.not_implemented(),
        }
    }

    fn not_implemented(&mut self) -> Result<(), ActionError> {
        writeln!(self.out, "\n\n{}\n\n", "NOT YET IMPLEMENTED".yellow())?;
        Ok(())
    }

    fn report(&mut self, err: &ActionError) -> Result<(), ActionError> {
        match err {
            ActionError::Persistence(detail) => {
                writeln!(self.out, "{}", "SQL error occurred".red())?;
                writeln!(self.out, "{}", detail.to_string().dimmed())?;
            }
            ActionError::Integrity(_) | ActionError::Normalize(_) => {
                writeln!(self.out, "{}", err.to_string().red().bold())?;
            }
            _ => writeln!(self.out, "{}", err.to_string().yellow())?,
        }
        Ok(())
    }

    fn report_insert(&mut self, outcome: &InsertOutcome) -> Result<(), ActionError> {
        writeln!(self.out, "{}", "Success!".green())?;
        if let Ok(json) = serde_json::to_string(outcome) {
            writeln!(self.out, "{}", json.dimmed())?;
        }
        Ok(())
    }

    fn view_employees(&mut self, sort_column: Option<usize>) -> Result<(), ActionError> {
        let mut rows = employee_rows(&self.store)?;
        if let Some(column) = sort_column {
            sort_by_column(&mut rows, column);
        }
        write!(self.out, "{}", render_table(&EMPLOYEE_HEADERS, &rows))?;
        Ok(())
    }

    fn add_department(&mut self) -> Result<(), ActionError> {
        let mut answers = self.prompter.ask(&[Question::input(
            "name",
            "what will the department name be?",
        )])?;
        let record = NewDepartment {
            name: answers.take("name"),
        };
        self.store.check_department(&record)?;

        let outcome = self.persistence.insert_department(&record)?;
        self.store
            .insert_department(record.with_id(outcome.insert_id))?;
        self.report_insert(&outcome)
    }

    fn add_role(&mut self) -> Result<(), ActionError> {
        let departments = self.store.department_names();
        if departments.is_empty() {
            return Err(ActionError::MissingPrerequisite(
                "Sorry, add a department before adding a role.",
            ));
        }

        let mut answers = self.prompter.ask(&[
            Question::input("title", "what will the role's title be?"),
            Question::number("salary", "what is the role's annual salary?"),
            Question::list(
                "department",
                "what department is the role associated with?",
                departments,
            ),
        ])?;
        let salary = parse_salary(answers.get("salary"))?;
        let department = answers.take("department");
        let department_id = self
            .store
            .department_id_by_name(&department)
            .ok_or(ActionError::UnknownChoice(department))?;
        let record = NewRole {
            title: answers.take("title"),
            salary,
            department_id,
        };
        self.store.check_role(&record)?;

        let outcome = self.persistence.insert_role(&record)?;
        self.store.insert_role(record.with_id(outcome.insert_id))?;
        self.report_insert(&outcome)
    }

    fn add_employee(&mut self) -> Result<(), ActionError> {
        let roles = self.store.role_titles();
        if roles.is_empty() {
            return Err(ActionError::MissingPrerequisite(
                "Sorry, add a role before adding an employee.",
            ));
        }

        let no_manager = no_manager_choice(&self.store);
        let mut managers = vec![no_manager.clone()];
        managers.extend(self.store.employee_display_names());

        let mut answers = self.prompter.ask(&[
            Question::input("first_name", "what will the first name be?"),
            Question::input("last_name", "what will the last name be?"),
            Question::list("role", "what is this employees role?", roles),
            Question::list("manager", "who is this employee's manager?", managers),
        ])?;

        let role = answers.take("role");
        let role_id = self
            .store
            .role_id_by_title(&role)
            .ok_or(ActionError::UnknownChoice(role))?;
        let manager = answers.take("manager");
        let manager_id = if manager == no_manager {
            None
        } else {
            Some(
                self.store
                    .employee_id_by_display_name(&manager)
                    .ok_or(ActionError::UnknownChoice(manager))?,
            )
        };
        let record = NewEmployee {
            first_name: answers.take("first_name"),
            last_name: answers.take("last_name"),
            role_id,
            manager_id,
        };

        let outcome = self.persistence.insert_employee(&record)?;
        let display_name = self
            .store
            .insert_employee(record.with_id(outcome.insert_id));
        self.report_insert(&outcome)?;
        writeln!(self.out, "{}", format!("Added {}", display_name).dimmed())?;
        Ok(())
    }
}
