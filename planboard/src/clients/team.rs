use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, instrument, warn};

use crate::backend::Backend;
use crate::domain::{
    ApiError, AssignedMember, Assignment, MemberId, ProjectId, TeamMember, User, UserId,
    ValidationFailure, UNKNOWN_MEMBER_NAME,
};
use crate::validation;

/// Repository client for team-member assignments and the user directory.
///
/// Keeps the most recently loaded user listing to denormalize display names
/// onto new members. Clones share that listing.
#[derive(Clone)]
pub struct TeamMemberClient {
    backend: Arc<dyn Backend>,
    directory: Arc<RwLock<Vec<User>>>,
}

impl TeamMemberClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            directory: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Fetch the user directory and remember it for later assignments.
    #[instrument(name = "TeamMemberClient::list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let users = self.backend.list_users().await?;
        debug!(count = users.len(), "user directory loaded");
        *self
            .directory
            .write()
            .unwrap_or_else(PoisonError::into_inner) = users.clone();
        Ok(users)
    }

    /// The last user listing loaded through this client (empty before the first).
    pub fn directory(&self) -> Vec<User> {
        self.directory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn display_name(&self, user_id: &UserId) -> String {
        let directory = self.directory.read().unwrap_or_else(PoisonError::into_inner);
        match directory.iter().find(|user| &user.id == user_id) {
            Some(user) => user.name.clone(),
            None => {
                warn!(user_id = %user_id, "user missing from directory, recording as unknown");
                UNKNOWN_MEMBER_NAME.to_string()
            }
        }
    }

    /// Assign a batch of users to a project.
    ///
    /// All-or-nothing: if any row lacks a user or role, nothing is sent.
    /// Returns the new members in submission order.
    #[instrument(
        name = "TeamMemberClient::assign",
        skip(self, assignments),
        fields(project_id = %project_id, count = assignments.len())
    )]
    pub async fn assign(
        &self,
        project_id: &ProjectId,
        assignments: &[Assignment],
    ) -> Result<Vec<TeamMember>, ApiError> {
        if assignments.is_empty() {
            return Err(ApiError::Validation(ValidationFailure::EmptyAssignments));
        }
        let incomplete = validation::validate_assignments(assignments);
        if !incomplete.is_empty() {
            return Err(ApiError::Validation(
                ValidationFailure::IncompleteAssignments(incomplete),
            ));
        }

        let mut echoed: Vec<Option<AssignedMember>> = self
            .backend
            .assign_members(project_id, assignments)
            .await?
            .into_iter()
            .map(Some)
            .collect();

        Ok(assignments
            .iter()
            .map(|assignment| TeamMember {
                id: take_echoed_id(&mut echoed, &assignment.user_id),
                user_id: assignment.user_id.clone(),
                name: self.display_name(&assignment.user_id),
                role: assignment.role.clone(),
                project_id: project_id.clone(),
            })
            .collect())
    }

    #[instrument(
        name = "TeamMemberClient::remove",
        skip(self),
        fields(project_id = %project_id, member_id = %member_id)
    )]
    pub async fn remove(
        &self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<(), ApiError> {
        self.backend.remove_member(project_id, member_id).await
    }
}

/// Claim the first unclaimed echoed member for `user_id`, so echo order does
/// not matter and a user assigned twice gets two distinct ids.
fn take_echoed_id(echoed: &mut [Option<AssignedMember>], user_id: &UserId) -> MemberId {
    let claimed = echoed
        .iter_mut()
        .find(|slot| matches!(slot, Some(member) if &member.user_id == user_id))
        .and_then(Option::take);

    match claimed {
        Some(member) => member.id,
        None => {
            warn!(
                user_id = %user_id,
                "backend did not echo this assignment, generating local id"
            );
            MemberId::generate()
        }
    }
}
