//! service-core: Shared infrastructure for the employee API workspace.
pub mod config;
pub mod error;
pub mod observability;
pub mod response;
