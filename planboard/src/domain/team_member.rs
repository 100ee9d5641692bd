use super::{MemberId, ProjectId, UserId};

/// Display name recorded when a user id is missing from the loaded directory.
pub const UNKNOWN_MEMBER_NAME: &str = "Unknown";

/// A user assigned to a project with a role. Never mutated in place; a role
/// change is a removal followed by a new assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: MemberId,
    pub user_id: UserId,
    /// Copy of the user's display name at assignment time.
    pub name: String,
    pub role: String,
    pub project_id: ProjectId,
}

/// One row of an assignment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub user_id: UserId,
    pub role: String,
}

impl Assignment {
    pub fn new(user_id: impl Into<UserId>, role: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: role.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.user_id.is_blank() && !self.role.trim().is_empty()
    }
}

/// What the backend reports back for one created assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedMember {
    pub id: MemberId,
    pub user_id: UserId,
}
