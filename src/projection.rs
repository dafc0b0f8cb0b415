//! Denormalized display rows and plain-text table rendering.

use crate::store::ReferenceStore;
use crate::types::{Department, EntityId, Role};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

pub const EMPLOYEE_HEADERS: [&str; 7] = [
    "id",
    "first_name",
    "last_name",
    "title",
    "department",
    "salary",
    "manager",
];
pub const DEPARTMENT_HEADERS: [&str; 2] = ["id", "name"];
pub const ROLE_HEADERS: [&str; 4] = ["id", "title", "salary", "department"];

/// Column holding the department name in an employee row.
pub const EMPLOYEE_DEPARTMENT_COLUMN: usize = 4;
/// Column holding the manager display name in an employee row.
pub const EMPLOYEE_MANAGER_COLUMN: usize = 6;

/// Shown in the manager column when an employee has no manager.
pub const NO_MANAGER_CELL: &str = "null";

const GUTTER: &str = "  ";
const DIVIDER: char = '-';

/// A referenced role or department is missing from the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityFault {
    #[error("employee {employee_id} references missing role {role_id}")]
    MissingRole {
        employee_id: EntityId,
        role_id: EntityId,
    },
    #[error("role {role_id} references missing department {department_id}")]
    MissingDepartment {
        role_id: EntityId,
        department_id: EntityId,
    },
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Id(EntityId),
    Number(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Id(id) => write!(f, "{}", id),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

pub type Row = Vec<Cell>;

fn role_department<'a>(
    store: &'a ReferenceStore,
    role: &Role,
) -> Result<&'a Department, IntegrityFault> {
    store
        .department(role.department_id)
        .ok_or(IntegrityFault::MissingDepartment {
            role_id: role.id,
            department_id: role.department_id,
        })
}

/// `(id, first_name, last_name, title, department, salary, manager)` per employee.
pub fn employee_rows(store: &ReferenceStore) -> Result<Vec<Row>, IntegrityFault> {
    store
        .employees()
        .map(|employee| -> Result<Row, IntegrityFault> {
            let role = store
                .role(employee.role_id)
                .ok_or(IntegrityFault::MissingRole {
                    employee_id: employee.id,
                    role_id: employee.role_id,
                })?;
            let department = role_department(store, role)?;
            let manager = employee
                .manager_id
                .and_then(|id| store.employee(id))
                .map(|manager| manager.display_name.as_str())
                .unwrap_or(NO_MANAGER_CELL);

            Ok(vec![
                Cell::Id(employee.id),
                Cell::Text(employee.first_name.clone()),
                Cell::Text(employee.last_name.clone()),
                Cell::Text(role.title.clone()),
                Cell::Text(department.name.clone()),
                Cell::Number(role.salary),
                Cell::from(manager),
            ])
        })
        .collect()
}

/// `(id, name)` per department.
pub fn department_rows(store: &ReferenceStore) -> Vec<Row> {
    store
        .departments()
        .map(|department| vec![Cell::Id(department.id), Cell::Text(department.name.clone())])
        .collect()
}

/// `(id, title, salary, department)` per role.
pub fn role_rows(store: &ReferenceStore) -> Result<Vec<Row>, IntegrityFault> {
    store
        .roles()
        .map(|role| -> Result<Row, IntegrityFault> {
            let department = role_department(store, role)?;
            Ok(vec![
                Cell::Id(role.id),
                Cell::Text(role.title.clone()),
                Cell::Number(role.salary),
                Cell::Text(department.name.clone()),
            ])
        })
        .collect()
}

/// Three-way ordering of two strings.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    if a == b {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Stable ascending sort on the string form of one column.
/// Rows missing the column sort as an empty string.
pub fn sort_by_column(rows: &mut [Row], column: usize) {
    let key = |row: &Row| row.get(column).map(ToString::to_string).unwrap_or_default();
    rows.sort_by(|a, b| compare_text(&key(a), &key(b)));
}

fn right_pad(text: &str, width: usize, fill: char) -> String {
    let mut padded = text.to_string();
    let len = text.chars().count();
    if len < width {
        padded.extend(std::iter::repeat_n(fill, width - len));
    }
    padded
}

/// Render a header line, a dashed divider and one line per row.
///
/// Each column is as wide as its longest header or cell, and every column is
/// followed by a two-space gutter.
pub fn render_table(headers: &[&str], rows: &[Row]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (column, cell) in row.iter().enumerate().take(widths.len()) {
            widths[column] = widths[column].max(cell.chars().count());
        }
    }

    let mut header_line = String::new();
    let mut divider_line = String::new();
    for (header, width) in headers.iter().zip(&widths) {
        header_line.push_str(&right_pad(header, *width, ' '));
        header_line.push_str(GUTTER);
        divider_line.push_str(&right_pad("", *width, DIVIDER));
        divider_line.push_str(GUTTER);
    }

    let mut out = String::new();
    out.push_str(&header_line);
    out.push('\n');
    out.push_str(&divider_line);
    out.push('\n');
    for row in &cells {
        for (column, width) in widths.iter().enumerate() {
            let cell = row.get(column).map(String::as_str).unwrap_or("");
            out.push_str(&right_pad(cell, *width, ' '));
            out.push_str(GUTTER);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DepartmentRow, EmployeeRow, RoleRow};

    fn scenario_store() -> ReferenceStore {
        let mut store = ReferenceStore::new();
        store
            .reload(
                vec![
                    EmployeeRow {
                        id: 1,
                        first_name: "Ann".to_string(),
                        last_name: "Lee".to_string(),
                        role_id: 10,
                        manager_id: None,
                    },
                    EmployeeRow {
                        id: 2,
                        first_name: "Ann".to_string(),
                        last_name: "Lee".to_string(),
                        role_id: 10,
                        manager_id: Some(1),
                    },
                ],
                vec![DepartmentRow {
                    id: 100,
                    name: "Eng".to_string(),
                }],
                vec![RoleRow {
                    id: 10,
                    title: "Dev".to_string(),
                    salary: 60000.0,
                    department_id: 100,
                }],
            )
            .unwrap();
        store
    }

    fn text_row(cells: &[&str]) -> Row {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    #[test]
    fn test_employee_rows_resolve_role_department_and_manager() {
        let rows = employee_rows(&scenario_store()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            vec![
                Cell::Id(2),
                Cell::from("Ann"),
                Cell::from("Lee"),
                Cell::from("Dev"),
                Cell::from("Eng"),
                Cell::Number(60000.0),
                Cell::from("Ann Lee"),
            ]
        );
        assert_eq!(rows[0][EMPLOYEE_MANAGER_COLUMN], Cell::from("null"));
    }

    #[test]
    fn test_employee_rows_report_missing_role() {
        let mut store = scenario_store();
        store.insert_employee(EmployeeRow {
            id: 3,
            first_name: "Bo".to_string(),
            last_name: "Ng".to_string(),
            role_id: 99,
            manager_id: None,
        });
        assert_eq!(
            employee_rows(&store).unwrap_err(),
            IntegrityFault::MissingRole {
                employee_id: 3,
                role_id: 99
            }
        );
    }

    #[test]
    fn test_role_rows_report_missing_department() {
        let mut store = scenario_store();
        store
            .insert_role(RoleRow {
                id: 11,
                title: "Ops".to_string(),
                salary: 1.0,
                department_id: 404,
            })
            .unwrap();
        assert_eq!(
            role_rows(&store).unwrap_err(),
            IntegrityFault::MissingDepartment {
                role_id: 11,
                department_id: 404
            }
        );
    }

    #[test]
    fn test_role_and_department_rows() {
        let store = scenario_store();
        assert_eq!(
            role_rows(&store).unwrap(),
            vec![vec![
                Cell::Id(10),
                Cell::from("Dev"),
                Cell::Number(60000.0),
                Cell::from("Eng"),
            ]]
        );
        assert_eq!(
            department_rows(&store),
            vec![vec![Cell::Id(100), Cell::from("Eng")]]
        );
    }

    #[test]
    fn test_compare_text() {
        assert_eq!(compare_text("a", "a"), Ordering::Equal);
        assert_eq!(compare_text("Eng", "Ops"), Ordering::Less);
        assert_eq!(compare_text("b", "B"), Ordering::Greater);
    }

    #[test]
    fn test_sort_by_column_is_stable() {
        let mut rows = vec![
            text_row(&["1", "Sales"]),
            text_row(&["2", "Eng"]),
            text_row(&["3", "Sales"]),
            text_row(&["4", "Eng"]),
        ];
        sort_by_column(&mut rows, 1);
        let ids: Vec<String> = rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(ids, vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_sort_by_column_uses_string_form() {
        let mut rows = vec![vec![Cell::Id(10)], vec![Cell::Id(9)], vec![Cell::Id(100)]];
        sort_by_column(&mut rows, 0);
        let ids: Vec<String> = rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(ids, vec!["10", "100", "9"]);
    }

    #[test]
    fn test_render_table_widths_and_divider() {
        let rendered = render_table(
            &["id", "name"],
            &[
                vec![Cell::Id(1), Cell::from("Engineering")],
                vec![Cell::Id(100), Cell::from("Ops")],
            ],
        );
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "id   name         ");
        assert_eq!(lines[1], "---  -----------  ");
        assert_eq!(lines[2], "1    Engineering  ");
        assert_eq!(lines[3], "100  Ops          ");
    }

    #[test]
    fn test_render_table_without_rows() {
        let rendered = render_table(&DEPARTMENT_HEADERS, &[]);
        assert_eq!(rendered, "id  name  \n--  ----  \n");
    }

    #[test]
    fn test_render_employee_scenario() {
        let rows = employee_rows(&scenario_store()).unwrap();
        let rendered = render_table(&EMPLOYEE_HEADERS, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines[0],
            "id  first_name  last_name  title  department  salary  manager  "
        );
        assert_eq!(
            lines[3],
            "2   Ann         Lee        Dev    Eng         60000   Ann Lee  "
        );
        for line in &lines {
            assert_eq!(line.chars().count(), lines[0].chars().count());
        }
    }
}
