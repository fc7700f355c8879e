//! Project validation and update engine.
//!
//! # Responsibility
//! - Validate start/end ordering on create and across partial updates.
//! - Enforce exact-name uniqueness before writes.
//!
//! # Invariants
//! - On update, a new `startDate` is compared with the new `endDate` when
//!   both are supplied, else with the stored one.
//! - A new `endDate` is always compared with the *stored* `startDate`.
//! - Any existing project with the submitted name blocks an update, the
//!   project's own current name included.

use crate::model::project::{NewProject, Project, ProjectChanges};
use crate::repo::project_repo::ProjectRepository;
use crate::service::dates::parse_date_field;
use crate::service::error::{NotFoundError, ServiceResult, ValidationError};
use crate::service::{log_outcome, parse_record_id};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Create request for a project. Dates are raw request text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub active: Option<bool>,
}

/// Partial update request for a project. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub active: Option<bool>,
}

/// Project engine over a repository implementation.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new project.
    ///
    /// # Errors
    /// - `startDate must be a date` / `endDate must be a date`
    /// - `startDate must be lesser than endDate` when `start >= end`
    /// - `The project's name already exists`
    pub fn create(&self, input: CreateProjectInput) -> ServiceResult<Project> {
        let started_at = Instant::now();
        let result = self.create_inner(input);
        log_outcome("project_create", started_at, &result);
        result
    }

    /// Validates and applies a partial update to project `id`.
    ///
    /// # Errors
    /// - `Project not found` for unknown or malformed ids.
    /// - Date parse and ordering failures, see module invariants.
    /// - `The project's name already exists` for any name match.
    pub fn update(&self, id: &str, input: UpdateProjectInput) -> ServiceResult<Project> {
        let started_at = Instant::now();
        let result = self.update_inner(id, input);
        log_outcome("project_update", started_at, &result);
        result
    }

    /// Lists every project. An empty list is not an error.
    pub fn find_all(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.repo.find_all()?)
    }

    /// Gets one project, failing with `Project not found` when absent.
    pub fn find_one(&self, id: &str) -> ServiceResult<Project> {
        let found = match parse_record_id(id) {
            Some(project_id) => self.repo.find_by_id(project_id)?,
            None => None,
        };
        found.ok_or_else(|| NotFoundError::Project.into())
    }

    /// Accepts a removal request without touching storage; projects are
    /// never hard-deleted.
    pub fn remove(&self, id: &str) -> ServiceResult<()> {
        info!(
            "event=project_remove module=service status=skipped id_valid={}",
            parse_record_id(id).is_some()
        );
        Ok(())
    }

    fn create_inner(&self, input: CreateProjectInput) -> ServiceResult<Project> {
        let start_date = parse_date_field("startDate", &input.start_date)?;
        let end_date = input
            .end_date
            .as_deref()
            .map(|raw| parse_date_field("endDate", raw))
            .transpose()?;

        if let Some(end_date) = end_date {
            ensure_start_before_end(start_date, end_date)?;
        }

        if self.repo.find_one_by_name(&input.name)?.is_some() {
            return Err(ValidationError::ProjectNameTaken.into());
        }

        let project = NewProject {
            name: input.name,
            description: input.description,
            start_date,
            end_date,
            active: input.active,
        };
        Ok(self.repo.create(&project)?)
    }

    fn update_inner(&self, id: &str, input: UpdateProjectInput) -> ServiceResult<Project> {
        let project_id = parse_record_id(id).ok_or(NotFoundError::Project)?;
        let current = self
            .repo
            .find_by_id(project_id)?
            .ok_or(NotFoundError::Project)?;

        let mut changes = ProjectChanges {
            name: input.name.clone(),
            description: input.description,
            active: input.active,
            ..ProjectChanges::default()
        };

        if let Some(raw_start) = input.start_date.as_deref() {
            let start_date = parse_date_field("startDate", raw_start)?;
            match input.end_date.as_deref() {
                Some(raw_end) => {
                    let end_date = parse_date_field("endDate", raw_end)?;
                    ensure_start_before_end(start_date, end_date)?;
                }
                None => {
                    // Open-ended projects have no stored bound to violate.
                    if let Some(stored_end) = current.end_date {
                        ensure_start_before_end(start_date, stored_end)?;
                    }
                }
            }
            changes.start_date = Some(start_date);
        }

        if let Some(raw_end) = input.end_date.as_deref() {
            let end_date = parse_date_field("endDate", raw_end)?;
            if end_date.timestamp_millis() <= current.start_date.timestamp_millis() {
                return Err(ValidationError::EndDateNotAfterStartDate.into());
            }
            changes.end_date = Some(end_date);
        }

        if let Some(name) = input.name.as_deref() {
            if self.repo.find_one_by_name(name)?.is_some() {
                return Err(ValidationError::ProjectNameTaken.into());
            }
        }

        self.repo
            .update(project_id, &changes)?
            .ok_or_else(|| NotFoundError::Project.into())
    }
}

fn ensure_start_before_end(
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if start_date.timestamp_millis() >= end_date.timestamp_millis() {
        return Err(ValidationError::StartDateNotBeforeEndDate);
    }
    Ok(())
}
