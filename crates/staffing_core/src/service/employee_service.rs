//! Employee validation and update engine.
//!
//! # Responsibility
//! - Enforce case-insensitive name uniqueness.
//! - Check that every referenced project exists before writing.
//!
//! # Invariants
//! - Update name checks ignore a match on the employee being updated.
//! - Project references are checked one by one, in order; the first
//!   missing id aborts the operation before any write.

use crate::model::employee::{Employee, EmployeeChanges, NewEmployee};
use crate::model::project::ProjectId;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::service::dates::parse_date_field;
use crate::service::error::{NotFoundError, ServiceResult, ValidationError};
use crate::service::{log_outcome, parse_record_id};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Create request for an employee. `admission` is raw request text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeInput {
    pub name: String,
    pub post: String,
    pub admission: Option<String>,
    pub active: Option<bool>,
    /// Project ids as supplied by the caller.
    pub projects: Option<Vec<String>>,
}

/// Partial update request for an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub post: Option<String>,
    pub admission: Option<String>,
    pub active: Option<bool>,
    /// Replaces all references when present; `Some(vec![])` clears them.
    pub projects: Option<Vec<String>>,
}

/// Employee engine over employee and project repositories.
pub struct EmployeeService<E: EmployeeRepository, P: ProjectRepository> {
    employees: E,
    projects: P,
}

impl<E: EmployeeRepository, P: ProjectRepository> EmployeeService<E, P> {
    pub fn new(employees: E, projects: P) -> Self {
        Self {
            employees,
            projects,
        }
    }

    /// Validates and persists a new employee.
    ///
    /// # Errors
    /// - `Employee already exists` on a case-insensitive name match.
    /// - `admission must be a date` for unparseable admission text.
    /// - `Project {id} not found` for the first missing reference.
    pub fn create(&self, input: CreateEmployeeInput) -> ServiceResult<Employee> {
        let started_at = Instant::now();
        let result = self.create_inner(input);
        log_outcome("employee_create", started_at, &result);
        result
    }

    /// Validates and applies a partial update to employee `id`.
    ///
    /// # Errors
    /// - `Name already exists` when another employee owns the name.
    /// - `Project {id} not found` for the first missing reference.
    /// - `Employee not found` when the store has no such employee.
    pub fn update(&self, id: &str, input: UpdateEmployeeInput) -> ServiceResult<Employee> {
        let started_at = Instant::now();
        let result = self.update_inner(id, input);
        log_outcome("employee_update", started_at, &result);
        result
    }

    /// Lists every employee. An empty list is not an error.
    pub fn find_all(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.employees.find_all()?)
    }

    /// Gets one employee, failing with `Employee not found` when absent.
    pub fn find_one(&self, id: &str) -> ServiceResult<Employee> {
        let found = match parse_record_id(id) {
            Some(employee_id) => self.employees.find_by_id(employee_id)?,
            None => None,
        };
        found.ok_or_else(|| NotFoundError::Employee.into())
    }

    /// Deletes one employee, failing with `Employee not found` when nothing
    /// was deleted.
    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        let started_at = Instant::now();
        let result = self.delete_inner(id);
        log_outcome("employee_delete", started_at, &result);
        result
    }

    fn create_inner(&self, input: CreateEmployeeInput) -> ServiceResult<Employee> {
        if self.employees.find_one_by_name(&input.name)?.is_some() {
            return Err(ValidationError::EmployeeAlreadyExists.into());
        }

        let admission = input
            .admission
            .as_deref()
            .map(|raw| parse_date_field("admission", raw))
            .transpose()?;
        let projects = match input.projects.as_deref() {
            Some(references) => self.resolve_projects(references)?,
            None => Vec::new(),
        };

        let employee = NewEmployee {
            name: input.name,
            post: input.post,
            admission,
            active: input.active,
            projects,
        };
        Ok(self.employees.create(&employee)?)
    }

    fn update_inner(&self, id: &str, input: UpdateEmployeeInput) -> ServiceResult<Employee> {
        let employee_id = parse_record_id(id);

        if let Some(name) = input.name.as_deref() {
            if let Some(existing) = self.employees.find_one_by_name(name)? {
                if Some(existing.id) != employee_id {
                    return Err(ValidationError::EmployeeNameTaken.into());
                }
            }
        }

        let admission = input
            .admission
            .as_deref()
            .map(|raw| parse_date_field("admission", raw))
            .transpose()?;
        let projects = match input.projects.as_deref() {
            Some(references) => Some(self.resolve_projects(references)?),
            None => None,
        };

        let employee_id = employee_id.ok_or(NotFoundError::Employee)?;
        let changes = EmployeeChanges {
            name: input.name,
            post: input.post,
            admission,
            active: input.active,
            projects,
        };
        self.employees
            .update(employee_id, &changes)?
            .ok_or_else(|| NotFoundError::Employee.into())
    }

    fn delete_inner(&self, id: &str) -> ServiceResult<()> {
        let employee_id = parse_record_id(id).ok_or(NotFoundError::Employee)?;
        if !self.employees.delete(employee_id)? {
            return Err(NotFoundError::Employee.into());
        }
        Ok(())
    }

    /// Looks up each reference in order; the first miss wins.
    fn resolve_projects(&self, references: &[String]) -> ServiceResult<Vec<ProjectId>> {
        let mut resolved = Vec::with_capacity(references.len());
        for reference in references {
            let found = match parse_record_id(reference) {
                Some(project_id) => self.projects.find_by_id(project_id)?,
                None => None,
            };
            let Some(project) = found else {
                return Err(NotFoundError::ReferencedProject(reference.clone()).into());
            };
            resolved.push(project.id);
        }
        Ok(resolved)
    }
}
