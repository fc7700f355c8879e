//! Domain records for projects and the employees staffed on them.
//!
//! # Responsibility
//! - Define canonical record shapes shared by repositories and services.
//! - Define create payloads and partial change sets for both entities.
//! - Provide record-level invariant checks run before every write.
//!
//! # Invariants
//! - Every record is identified by a store-assigned UUID.
//! - A project end date, when present, is strictly after its start date.
//! - Employee project references keep caller order, duplicates included.

pub mod employee;
pub mod project;
pub mod validation;
