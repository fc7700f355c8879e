//! Validation and update engines for projects and employees.
//!
//! # Responsibility
//! - Enforce interval, uniqueness, and reference rules above repositories.
//! - Translate raw request payloads into typed repository writes.
//!
//! # Invariants
//! - Services hold repository handles only; every call re-reads store state.
//! - Writes happen as the final step, after every check has passed.

pub mod dates;
pub mod employee_service;
pub mod error;
pub mod project_service;

use crate::service::error::{ErrorKind, ServiceResult};
use log::{error, info, warn};
use std::time::Instant;
use uuid::Uuid;

/// Resolves caller-supplied id text. Malformed text resolves to `None`,
/// which services treat the same as an unknown id.
pub fn parse_record_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

fn log_outcome<T>(event: &'static str, started_at: Instant, result: &ServiceResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event={event} module=service status=ok duration_ms={duration_ms}"),
        Err(err) if err.kind() == ErrorKind::Unclassified => error!(
            "event={event} module=service status=error duration_ms={duration_ms} error_code={} error={err}",
            err.kind().as_str()
        ),
        Err(err) => warn!(
            "event={event} module=service status=rejected duration_ms={duration_ms} error_code={} reason=\"{err}\"",
            err.kind().as_str()
        ),
    }
}
