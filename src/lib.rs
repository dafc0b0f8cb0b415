//! Employee Tracker - an interactive tracker for employees, roles and departments.
//!
//! This library provides the in-memory reference store, the display
//! projections over it, SQLite persistence and the menu-driven session that
//! ties them together.

pub mod config;
pub mod dispatch;
pub mod normalize;
pub mod persistence;
pub mod projection;
pub mod prompt;
pub mod store;
pub mod types;

pub use config::{ConfigError, TrackerConfig, load_config, resolve_database};
pub use dispatch::{ActionError, Command, Dispatcher, Flow, NO_MANAGER};
pub use persistence::{InsertOutcome, Persistence, PersistenceError, SqlitePersistence};
pub use projection::{
    Cell, IntegrityFault, Row, compare_text, department_rows, employee_rows, render_table,
    role_rows, sort_by_column,
};
pub use prompt::{LinePrompter, PromptError, Prompter, Question};
pub use store::{ReferenceStore, StoreError};
pub use types::{Department, Employee, EntityId, Role};
