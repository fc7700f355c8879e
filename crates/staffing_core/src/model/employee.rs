//! Employee domain model.
//!
//! # Responsibility
//! - Define the persisted employee record and its write payloads.
//! - Derive the case-folded name key used for uniqueness lookups.
//!
//! # Invariants
//! - `name` and `post` are never blank.
//! - `projects` keeps insertion order; duplicates are allowed.

use crate::model::project::ProjectId;
use crate::model::validation::{ensure_not_blank, truncate_to_millis, RecordValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable employee identifier assigned by the store.
pub type EmployeeId = Uuid;

/// Persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    /// Unique across employees, compared case-insensitively.
    pub name: String,
    /// Job title.
    pub post: String,
    pub admission: DateTime<Utc>,
    pub active: bool,
    /// Referenced projects, in the order they were assigned.
    pub projects: Vec<ProjectId>,
}

impl Employee {
    /// Checks record invariants before persistence.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("post", &self.post)
    }
}

/// Create payload for an employee. The store assigns `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub post: String,
    /// Stored as the creation time when `None`.
    pub admission: Option<DateTime<Utc>>,
    /// Stored as `true` when `None`.
    pub active: Option<bool>,
    pub projects: Vec<ProjectId>,
}

impl NewEmployee {
    /// Materializes the record the store will persist under `id`, at store
    /// (millisecond) precision.
    pub fn into_employee(self, id: EmployeeId, now: DateTime<Utc>) -> Employee {
        Employee {
            id,
            name: self.name,
            post: self.post,
            admission: truncate_to_millis(self.admission.unwrap_or(now)),
            active: self.active.unwrap_or(true),
            projects: self.projects,
        }
    }
}

/// Partial change set for an employee. `None` fields are left untouched;
/// `projects: Some(vec![])` clears all references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub post: Option<String>,
    pub admission: Option<DateTime<Utc>>,
    pub active: Option<bool>,
    pub projects: Option<Vec<ProjectId>>,
}

impl EmployeeChanges {
    /// Overwrites the provided fields on `employee`.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name = name.clone();
        }
        if let Some(post) = &self.post {
            employee.post = post.clone();
        }
        if let Some(admission) = self.admission {
            employee.admission = truncate_to_millis(admission);
        }
        if let Some(active) = self.active {
            employee.active = active;
        }
        if let Some(projects) = &self.projects {
            employee.projects = projects.clone();
        }
    }
}

/// Case-folded form of an employee name used for uniqueness.
pub fn employee_name_key(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{employee_name_key, EmployeeChanges, NewEmployee};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn into_employee_applies_store_defaults() {
        let now = Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap();
        let employee = NewEmployee {
            name: "Ada".to_string(),
            post: "engineer".to_string(),
            ..NewEmployee::default()
        }
        .into_employee(Uuid::new_v4(), now);

        assert_eq!(employee.admission, now);
        assert!(employee.active);
        assert!(employee.projects.is_empty());
    }

    #[test]
    fn empty_project_list_clears_references() {
        let now = Utc::now();
        let mut employee = NewEmployee {
            name: "Ada".to_string(),
            post: "engineer".to_string(),
            projects: vec![Uuid::new_v4()],
            ..NewEmployee::default()
        }
        .into_employee(Uuid::new_v4(), now);

        EmployeeChanges {
            projects: Some(Vec::new()),
            ..EmployeeChanges::default()
        }
        .apply_to(&mut employee);

        assert!(employee.projects.is_empty());
    }

    #[test]
    fn name_key_folds_case_beyond_ascii() {
        assert_eq!(employee_name_key("ÉLODIE"), employee_name_key("élodie"));
        assert_eq!(employee_name_key("Test"), "test");
    }
}
