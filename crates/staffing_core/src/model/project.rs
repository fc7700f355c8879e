//! Project domain model.
//!
//! # Responsibility
//! - Define the persisted project record and its write payloads.
//! - Provide `validate()` for repository write paths.
//!
//! # Invariants
//! - `name` and `description` are never blank.
//! - `end_date`, when set, is strictly after `start_date`.
//! - `active` defaults to `true` when a create payload leaves it unset.

use crate::model::validation::{
    ensure_not_blank, ensure_strict_interval, truncate_to_millis, RecordValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable project identifier assigned by the store.
pub type ProjectId = Uuid;

/// Persisted project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    /// Unique across projects, compared case-sensitively.
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    /// Open-ended when `None`.
    pub end_date: Option<DateTime<Utc>>,
    pub active: bool,
}

impl Project {
    /// Checks record invariants before persistence.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("description", &self.description)?;
        ensure_strict_interval(self.start_date, self.end_date)
    }
}

/// Create payload for a project. The store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    /// Stored as `true` when `None`.
    pub active: Option<bool>,
}

impl NewProject {
    /// Materializes the record the store will persist under `id`, at store
    /// (millisecond) precision.
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            start_date: truncate_to_millis(self.start_date),
            end_date: self.end_date.map(truncate_to_millis),
            active: self.active.unwrap_or(true),
        }
    }
}

/// Partial change set for a project. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

impl ProjectChanges {
    /// Overwrites the provided fields on `project`, truncating dates to
    /// milliseconds.
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(start_date) = self.start_date {
            project.start_date = truncate_to_millis(start_date);
        }
        if let Some(end_date) = self.end_date {
            project.end_date = Some(truncate_to_millis(end_date));
        }
        if let Some(active) = self.active {
            project.active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewProject, ProjectChanges};
    use crate::model::validation::RecordValidationError;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample() -> NewProject {
        NewProject {
            name: "apollo".to_string(),
            description: "moonshot".to_string(),
            start_date: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            end_date: None,
            active: None,
        }
    }

    #[test]
    fn into_project_defaults_active_to_true() {
        let project = sample().into_project(Uuid::new_v4());
        assert!(project.active);
        assert!(project.validate().is_ok());
    }

    #[test]
    fn changes_only_touch_provided_fields() {
        let mut project = sample().into_project(Uuid::new_v4());
        let changes = ProjectChanges {
            description: Some("relaunched".to_string()),
            active: Some(false),
            ..ProjectChanges::default()
        };
        changes.apply_to(&mut project);

        assert_eq!(project.name, "apollo");
        assert_eq!(project.description, "relaunched");
        assert!(!project.active);
    }

    #[test]
    fn validate_rejects_blank_description() {
        let mut project = sample().into_project(Uuid::new_v4());
        project.description = " ".to_string();
        assert_eq!(
            project.validate(),
            Err(RecordValidationError::BlankField("description"))
        );
    }
}
