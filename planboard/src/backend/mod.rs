mod dev;
mod dto;
mod http;

pub use dev::DevBackend;
pub use http::HttpBackend;

use async_trait::async_trait;

use crate::domain::{
    ApiError, AssignedMember, Assignment, MemberId, Project, ProjectFields, ProjectId, User,
};

/// Outbound port for the remote project store.
///
/// This trait defines the operations the repository clients depend on. The
/// HTTP adapter talks to the real service; the dev backend keeps everything
/// in memory.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// List projects in server order.
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    async fn get_project(&self, id: &ProjectId) -> Result<Project, ApiError>;

    /// Persist a new project. The backend assigns its identity.
    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, ApiError>;

    /// Replace the scalar fields of an existing project.
    async fn update_project(
        &self,
        id: &ProjectId,
        fields: &ProjectFields,
    ) -> Result<Project, ApiError>;

    async fn delete_project(&self, id: &ProjectId) -> Result<(), ApiError>;

    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// Assign users to a project.
    ///
    /// Returns whatever the backend echoed back, which may be nothing at all.
    async fn assign_members(
        &self,
        project_id: &ProjectId,
        assignments: &[Assignment],
    ) -> Result<Vec<AssignedMember>, ApiError>;

    async fn remove_member(
        &self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<(), ApiError>;
}
