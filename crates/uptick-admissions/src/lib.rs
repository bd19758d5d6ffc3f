//! Admissions pipeline core: the multi-step application wizard, applicant
//! intake and notification, and the HTTP plumbing shared by the API service.

pub mod config;
pub mod cors;
pub mod error;
pub mod telemetry;
pub mod workflows;
