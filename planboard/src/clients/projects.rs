use std::sync::Arc;

use tracing::{debug, instrument};

use crate::backend::Backend;
use crate::domain::{ApiError, Project, ProjectDraft, ProjectId};
use crate::validation;

/// Repository client for projects.
///
/// Stateless: nothing here touches a session's local copy. Callers apply the
/// reconciler once a mutation has succeeded.
#[derive(Clone)]
pub struct ProjectClient {
    backend: Arc<dyn Backend>,
}

impl ProjectClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    #[instrument(name = "ProjectClient::list", skip(self))]
    pub async fn list(&self) -> Result<Vec<Project>, ApiError> {
        let projects = self.backend.list_projects().await?;
        debug!(count = projects.len(), "projects loaded");
        Ok(projects)
    }

    #[instrument(name = "ProjectClient::get_by_id", skip(self), fields(project_id = %id))]
    pub async fn get_by_id(&self, id: &ProjectId) -> Result<Project, ApiError> {
        self.backend.get_project(id).await
    }

    /// Create a project from a draft.
    ///
    /// The draft is validated first; an invalid draft never reaches the backend.
    #[instrument(name = "ProjectClient::create", skip(self, draft))]
    pub async fn create(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let fields = validation::validated(draft)?;
        let project = self.backend.create_project(&fields).await?;
        debug!(project_id = %project.id, "project created");
        Ok(project)
    }

    /// Replace the scalar fields of a project.
    ///
    /// Only name, description, dates and status are transmitted.
    #[instrument(name = "ProjectClient::update", skip(self, draft), fields(project_id = %id))]
    pub async fn update(&self, id: &ProjectId, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let fields = validation::validated(draft)?;
        self.backend.update_project(id, &fields).await
    }

    #[instrument(name = "ProjectClient::remove", skip(self), fields(project_id = %id))]
    pub async fn remove(&self, id: &ProjectId) -> Result<(), ApiError> {
        self.backend.delete_project(id).await
    }
}
