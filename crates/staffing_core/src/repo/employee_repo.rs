//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/delete/lookup APIs over `employees`.
//! - Own the ordered `employee_projects` link rows.
//!
//! # Invariants
//! - Name lookups compare the case-folded `name_key`.
//! - Project links are replaced wholesale, in caller order, in the same
//!   transaction as the employee row.

use crate::model::employee::{
    employee_name_key, Employee, EmployeeChanges, EmployeeId, NewEmployee,
};
use crate::model::project::ProjectId;
use crate::repo::{bool_to_int, millis_to_datetime, parse_bool, parse_uuid, RepoResult};
use chrono::Utc;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::collections::HashMap;
use uuid::Uuid;

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    post,
    admission,
    active
FROM employees";

/// Storage port for employee records.
pub trait EmployeeRepository {
    /// Persists a new employee, applying store defaults for unset fields.
    fn create(&self, employee: &NewEmployee) -> RepoResult<Employee>;
    /// Applies `changes`; `None` when no employee has `id`.
    fn update(&self, id: EmployeeId, changes: &EmployeeChanges) -> RepoResult<Option<Employee>>;
    /// Case-insensitive exact name match.
    fn find_one_by_name(&self, name: &str) -> RepoResult<Option<Employee>>;
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// All employees in insertion order.
    fn find_all(&self) -> RepoResult<Vec<Employee>>;
    /// Returns whether a row was deleted.
    fn delete(&self, id: EmployeeId) -> RepoResult<bool>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Wraps a migrated connection from `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create(&self, employee: &NewEmployee) -> RepoResult<Employee> {
        let employee = employee.clone().into_employee(Uuid::new_v4(), Utc::now());
        employee.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO employees (
                uuid,
                name,
                name_key,
                post,
                admission,
                active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                employee.id.to_string(),
                employee.name.as_str(),
                employee_name_key(&employee.name),
                employee.post.as_str(),
                employee.admission.timestamp_millis(),
                bool_to_int(employee.active),
            ],
        )?;
        replace_project_links(&tx, employee.id, &employee.projects)?;
        tx.commit()?;

        Ok(employee)
    }

    fn update(&self, id: EmployeeId, changes: &EmployeeChanges) -> RepoResult<Option<Employee>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let Some(mut employee) = load_employee(&tx, id)? else {
            return Ok(None);
        };

        changes.apply_to(&mut employee);
        employee.validate()?;

        tx.execute(
            "UPDATE employees
             SET
                name = ?1,
                name_key = ?2,
                post = ?3,
                admission = ?4,
                active = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?6;",
            params![
                employee.name.as_str(),
                employee_name_key(&employee.name),
                employee.post.as_str(),
                employee.admission.timestamp_millis(),
                bool_to_int(employee.active),
                id.to_string(),
            ],
        )?;
        if changes.projects.is_some() {
            replace_project_links(&tx, id, &employee.projects)?;
        }
        tx.commit()?;

        Ok(Some(employee))
    }

    fn find_one_by_name(&self, name: &str) -> RepoResult<Option<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL} WHERE name_key = ?1 LIMIT 1;"
        ))?;
        let mut rows = stmt.query([employee_name_key(name)])?;
        match rows.next()? {
            Some(row) => {
                let mut employee = parse_employee_row(row)?;
                employee.projects = load_project_links(self.conn, employee.id)?;
                Ok(Some(employee))
            }
            None => Ok(None),
        }
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        load_employee(self.conn, id)
    }

    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let mut links = load_all_project_links(self.conn)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            let mut employee = parse_employee_row(row)?;
            employee.projects = links.remove(&employee.id).unwrap_or_default();
            employees.push(employee);
        }

        Ok(employees)
    }

    fn delete(&self, id: EmployeeId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE uuid = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

fn load_employee(conn: &Connection, id: EmployeeId) -> RepoResult<Option<Employee>> {
    let mut stmt = conn.prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    let Some(row) = rows.next()? else {
        return Ok(None);
    };

    let mut employee = parse_employee_row(row)?;
    employee.projects = load_project_links(conn, id)?;
    Ok(Some(employee))
}

/// Parses the scalar columns; `projects` is filled in by the caller.
fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let uuid_text: String = row.get("uuid")?;
    let employee = Employee {
        id: parse_uuid(&uuid_text, "employees.uuid")?,
        name: row.get("name")?,
        post: row.get("post")?,
        admission: millis_to_datetime(row.get("admission")?, "employees.admission")?,
        active: parse_bool(row.get("active")?, "employees.active")?,
        projects: Vec::new(),
    };
    employee.validate()?;
    Ok(employee)
}

fn load_project_links(conn: &Connection, id: EmployeeId) -> RepoResult<Vec<ProjectId>> {
    let mut stmt = conn.prepare(
        "SELECT project_uuid
         FROM employee_projects
         WHERE employee_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([id.to_string()])?;
    let mut projects = Vec::new();

    while let Some(row) = rows.next()? {
        let project_text: String = row.get(0)?;
        projects.push(parse_uuid(&project_text, "employee_projects.project_uuid")?);
    }

    Ok(projects)
}

fn load_all_project_links(conn: &Connection) -> RepoResult<HashMap<EmployeeId, Vec<ProjectId>>> {
    let mut stmt = conn.prepare(
        "SELECT employee_uuid, project_uuid
         FROM employee_projects
         ORDER BY employee_uuid ASC, position ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut links: HashMap<EmployeeId, Vec<ProjectId>> = HashMap::new();

    while let Some(row) = rows.next()? {
        let employee_text: String = row.get(0)?;
        let project_text: String = row.get(1)?;
        links
            .entry(parse_uuid(&employee_text, "employee_projects.employee_uuid")?)
            .or_default()
            .push(parse_uuid(&project_text, "employee_projects.project_uuid")?);
    }

    Ok(links)
}

fn replace_project_links(
    conn: &Connection,
    id: EmployeeId,
    projects: &[ProjectId],
) -> RepoResult<()> {
    conn.execute(
        "DELETE FROM employee_projects WHERE employee_uuid = ?1;",
        [id.to_string()],
    )?;

    let mut stmt = conn.prepare(
        "INSERT INTO employee_projects (employee_uuid, position, project_uuid)
         VALUES (?1, ?2, ?3);",
    )?;
    for (position, project_id) in projects.iter().enumerate() {
        stmt.execute(params![
            id.to_string(),
            position as i64,
            project_id.to_string()
        ])?;
    }

    Ok(())
}
