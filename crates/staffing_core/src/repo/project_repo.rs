//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/lookup APIs over the `projects` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Name lookups are exact and case-sensitive.
//! - Updates are read-modify-write inside one IMMEDIATE transaction, so a
//!   concurrent writer waits on the busy timeout instead of failing.

use crate::model::project::{NewProject, Project, ProjectChanges, ProjectId};
use crate::repo::{bool_to_int, millis_to_datetime, parse_bool, parse_uuid, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

const PROJECT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    description,
    start_date,
    end_date,
    active
FROM projects";

/// Storage port for project records.
pub trait ProjectRepository {
    /// Persists a new project and returns it with its assigned id.
    fn create(&self, project: &NewProject) -> RepoResult<Project>;
    /// Applies `changes`; `None` when no project has `id`.
    fn update(&self, id: ProjectId, changes: &ProjectChanges) -> RepoResult<Option<Project>>;
    /// Exact, case-sensitive name match.
    fn find_one_by_name(&self, name: &str) -> RepoResult<Option<Project>>;
    fn find_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// All projects in insertion order.
    fn find_all(&self) -> RepoResult<Vec<Project>>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Wraps a migrated connection from `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create(&self, project: &NewProject) -> RepoResult<Project> {
        let project = project.clone().into_project(Uuid::new_v4());
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (
                uuid,
                name,
                description,
                start_date,
                end_date,
                active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                project.id.to_string(),
                project.name.as_str(),
                project.description.as_str(),
                project.start_date.timestamp_millis(),
                project.end_date.map(|date| date.timestamp_millis()),
                bool_to_int(project.active),
            ],
        )?;

        Ok(project)
    }

    fn update(&self, id: ProjectId, changes: &ProjectChanges) -> RepoResult<Option<Project>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let Some(mut project) = load_project(&tx, id)? else {
            return Ok(None);
        };

        changes.apply_to(&mut project);
        project.validate()?;

        tx.execute(
            "UPDATE projects
             SET
                name = ?1,
                description = ?2,
                start_date = ?3,
                end_date = ?4,
                active = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?6;",
            params![
                project.name.as_str(),
                project.description.as_str(),
                project.start_date.timestamp_millis(),
                project.end_date.map(|date| date.timestamp_millis()),
                bool_to_int(project.active),
                id.to_string(),
            ],
        )?;
        tx.commit()?;

        Ok(Some(project))
    }

    fn find_one_by_name(&self, name: &str) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE name = ?1 LIMIT 1;"))?;
        let mut rows = stmt.query([name])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_project_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        load_project(self.conn, id)
    }

    fn find_all(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }
}

fn load_project(conn: &Connection, id: ProjectId) -> RepoResult<Option<Project>> {
    let mut stmt = conn.prepare(&format!("{PROJECT_SELECT_SQL} WHERE uuid = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_project_row(row)?)),
        None => Ok(None),
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let uuid_text: String = row.get("uuid")?;
    let end_date = match row.get::<_, Option<i64>>("end_date")? {
        Some(value) => Some(millis_to_datetime(value, "projects.end_date")?),
        None => None,
    };

    let project = Project {
        id: parse_uuid(&uuid_text, "projects.uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        start_date: millis_to_datetime(row.get("start_date")?, "projects.start_date")?,
        end_date,
        active: parse_bool(row.get("active")?, "projects.active")?,
    };
    project.validate()?;
    Ok(project)
}
