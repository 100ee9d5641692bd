mod projects;
mod team;

pub use projects::ProjectClient;
pub use team::TeamMemberClient;

use std::sync::Arc;

use crate::backend::{Backend, DevBackend, HttpBackend};
use crate::config::{ClientConfig, ConfigError};

/// Both repository clients over one shared backend.
#[derive(Clone)]
pub struct Planboard {
    projects: ProjectClient,
    team: TeamMemberClient,
}

impl Planboard {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            projects: ProjectClient::new(Arc::clone(&backend)),
            team: TeamMemberClient::new(backend),
        }
    }

    /// Clients talking to the HTTP service described by `config`.
    pub fn http(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(Arc::new(HttpBackend::new(config)?)))
    }

    /// Clients over a seeded in-memory backend.
    pub fn dev() -> Self {
        Self::new(Arc::new(DevBackend::new()))
    }

    pub fn projects(&self) -> &ProjectClient {
        &self.projects
    }

    pub fn team(&self) -> &TeamMemberClient {
        &self.team
    }
}
