mod dates;
mod error;
mod ids;
mod project;
mod team_member;
mod user;

pub use dates::{format_date, parse_date, to_iso, truncate_text};
pub use error::{ApiError, ValidationFailure};
pub use ids::{MemberId, ProjectId, UserId};
pub use project::{
    DueStatus, Project, ProjectDraft, ProjectFields, ProjectPatch, ProjectStatus,
    APPROACHING_WINDOW_DAYS,
};
pub use team_member::{AssignedMember, Assignment, TeamMember, UNKNOWN_MEMBER_NAME};
pub use user::User;

pub(crate) use dates::deserialize_date;
pub(crate) use ids::generate_local_id;
