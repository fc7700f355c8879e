//! Core domain logic for project staffing.
//! This crate is the single source of truth for project and employee
//! business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{Employee, EmployeeChanges, EmployeeId, NewEmployee};
pub use model::project::{NewProject, Project, ProjectChanges, ProjectId};
pub use model::validation::RecordValidationError;
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::{RepoError, RepoResult};
pub use service::employee_service::{CreateEmployeeInput, EmployeeService, UpdateEmployeeInput};
pub use service::error::{ErrorKind, NotFoundError, ServiceError, ServiceResult, ValidationError};
pub use service::project_service::{CreateProjectInput, ProjectService, UpdateProjectInput};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
