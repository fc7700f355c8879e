//! Service-level failure taxonomy.
//!
//! # Responsibility
//! - Classify engine failures as validation, not-found, or passthrough.
//! - Expose the transport status each kind maps to.
//!
//! # Invariants
//! - `Display` output is the caller-facing message, verbatim.
//! - Storage failures other than record validation pass through unchanged.

use crate::model::validation::RecordValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Business-rule violations correctable by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date text for the named field cannot be parsed.
    InvalidDate(&'static str),
    StartDateNotBeforeEndDate,
    EndDateNotAfterStartDate,
    ProjectNameTaken,
    /// Employee create hit an existing name.
    EmployeeAlreadyExists,
    /// Employee update hit a name owned by another employee.
    EmployeeNameTaken,
    /// Record shape rejected by the repository before writing.
    Record(RecordValidationError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(field) => write!(f, "{field} must be a date"),
            Self::StartDateNotBeforeEndDate => write!(f, "startDate must be lesser than endDate"),
            Self::EndDateNotAfterStartDate => write!(f, "endDate must be greater than startDate"),
            Self::ProjectNameTaken => write!(f, "The project's name already exists"),
            Self::EmployeeAlreadyExists => write!(f, "Employee already exists"),
            Self::EmployeeNameTaken => write!(f, "Name already exists"),
            Self::Record(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Record(err) => Some(err),
            _ => None,
        }
    }
}

/// Missing target or referenced record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    Project,
    Employee,
    /// A project id listed on an employee, as the caller supplied it.
    ReferencedProject(String),
}

impl Display for NotFoundError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project => write!(f, "Project not found"),
            Self::Employee => write!(f, "Employee not found"),
            Self::ReferencedProject(id) => write!(f, "Project {id} not found"),
        }
    }
}

impl Error for NotFoundError {}

/// Coarse failure class used by boundary layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unclassified,
}

impl ErrorKind {
    /// Stable string id for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Unclassified => "unclassified",
        }
    }

    /// HTTP status code a transport layer should answer with.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Unclassified => 500,
        }
    }
}

/// Errors from project/employee service operations.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    NotFound(NotFoundError),
    /// Storage failure surfaced unchanged.
    Repo(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Repo(_) => ErrorKind::Unclassified,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<NotFoundError> for ServiceError {
    fn from(value: NotFoundError) -> Self {
        Self::NotFound(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(ValidationError::Record(err)),
            other => Self::Repo(other),
        }
    }
}
