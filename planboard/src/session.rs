use tracing::{debug, info, instrument, warn};

use crate::clients::Planboard;
use crate::domain::{ApiError, Assignment, MemberId, Project, ProjectDraft, ProjectId, TeamMember};
use crate::reconciler::{reconcile, ProjectEvent, ProjectState};

/// A single project held by a view, kept in sync with the backend.
///
/// Each mutation goes remote first and only touches the local copy once the
/// call has succeeded. A failed call leaves the state exactly as it was.
pub struct ProjectSession {
    board: Planboard,
    id: ProjectId,
    state: ProjectState,
}

impl ProjectSession {
    /// Load a project fresh from the backend.
    #[instrument(name = "ProjectSession::open", skip(board), fields(project_id = %id))]
    pub async fn open(board: Planboard, id: ProjectId) -> Result<Self, ApiError> {
        let project = board.projects().get_by_id(&id).await?;
        Ok(Self {
            board,
            id,
            state: ProjectState::Loaded(project),
        })
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn project(&self) -> Option<&Project> {
        self.state.project()
    }

    pub fn is_absent(&self) -> bool {
        self.state.is_absent()
    }

    fn ensure_loaded(&self) -> Result<(), ApiError> {
        if self.state.is_absent() {
            return Err(ApiError::not_found(format!("project {}", self.id)));
        }
        Ok(())
    }

    fn apply(&mut self, event: ProjectEvent) {
        let state = std::mem::replace(&mut self.state, ProjectState::Absent);
        self.state = reconcile(state, event);
    }

    /// Replace the held copy with whatever the backend has now.
    #[instrument(name = "ProjectSession::refresh", skip(self), fields(project_id = %self.id))]
    pub async fn refresh(&mut self) -> Result<&Project, ApiError> {
        self.ensure_loaded()?;
        let project = self.board.projects().get_by_id(&self.id).await?;
        self.state = ProjectState::Loaded(project);
        self.project()
            .ok_or_else(|| ApiError::not_found(format!("project {}", self.id)))
    }

    #[instrument(name = "ProjectSession::edit", skip(self, draft), fields(project_id = %self.id))]
    pub async fn edit(&mut self, draft: &ProjectDraft) -> Result<(), ApiError> {
        self.ensure_loaded()?;
        let persisted = self.board.projects().update(&self.id, draft).await?;
        self.apply(ProjectEvent::ProjectUpdated((&persisted).into()));
        debug!("project updated");
        Ok(())
    }

    #[instrument(name = "ProjectSession::delete", skip(self), fields(project_id = %self.id))]
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        self.ensure_loaded()?;
        self.board.projects().remove(&self.id).await?;
        self.apply(ProjectEvent::ProjectDeleted);
        info!("project deleted");
        Ok(())
    }

    /// Assign a batch of users and append the new members locally.
    #[instrument(
        name = "ProjectSession::add_members",
        skip(self, assignments),
        fields(project_id = %self.id)
    )]
    pub async fn add_members(
        &mut self,
        assignments: &[Assignment],
    ) -> Result<Vec<TeamMember>, ApiError> {
        self.ensure_loaded()?;
        let members = self.board.team().assign(&self.id, assignments).await?;
        self.apply(ProjectEvent::MembersAdded(members.clone()));
        Ok(members)
    }

    /// Remove a member. Removing one the backend no longer knows still succeeds,
    /// as long as the project itself still exists there.
    #[instrument(
        name = "ProjectSession::remove_member",
        skip(self),
        fields(project_id = %self.id, member_id = %member_id)
    )]
    pub async fn remove_member(&mut self, member_id: &MemberId) -> Result<(), ApiError> {
        self.ensure_loaded()?;
        match self.board.team().remove(&self.id, member_id).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                // A 404 does not say which of project or member is missing.
                self.board.projects().get_by_id(&self.id).await?;
                warn!(error = %err, "member already gone remotely");
            }
            Err(err) => return Err(err),
        }
        self.apply(ProjectEvent::MemberRemoved(member_id.clone()));
        Ok(())
    }
}
