//! Client-side data layer for a project management service.
//!
//! Repository clients for projects and team members sit on a [`Backend`]
//! port, with an HTTP adapter for the real service and an in-memory one for
//! running without it. [`ProjectSession`] ties a client call to the
//! [`reconcile`] function so a view's copy of a project follows each
//! successful mutation without refetching.

pub mod backend;
pub mod clients;
pub mod config;
pub mod domain;
pub mod reconciler;
pub mod session;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use backend::{Backend, DevBackend, HttpBackend};
pub use clients::{Planboard, ProjectClient, TeamMemberClient};
pub use config::{ClientConfig, ConfigError};
pub use domain::*;
pub use reconciler::{reconcile, ProjectEvent, ProjectState};
pub use session::ProjectSession;
pub use validation::{
    validate, validate_assignments, validated, FieldError, FieldErrorKind, ProjectField,
    ValidationErrors,
};
