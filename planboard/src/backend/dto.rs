use serde::{Deserialize, Serialize};
use time::Date;

use crate::domain::{
    deserialize_date, to_iso, ApiError, AssignedMember, Assignment, MemberId, Project,
    ProjectFields, ProjectId, ProjectStatus, TeamMember, User, UserId, UNKNOWN_MEMBER_NAME,
};

/// Success bodies carry their payload under `data`.
#[derive(Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Envelope for endpoints that may or may not echo anything back.
#[derive(Deserialize)]
pub struct OptionalEnvelope<T> {
    pub data: Option<T>,
}

/// Error bodies, when the server bothers to send one.
#[derive(Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "error")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: Date,
    #[serde(deserialize_with = "deserialize_date")]
    pub due_date: Date,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub team_members: Option<Vec<TeamMemberDto>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDto {
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,
    pub user_id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub role: String,
    pub project_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub position: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedMemberDto {
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,
    pub user_id: String,
}

/// Body for create and update. Only the mutable scalar fields exist here.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub start_date: String,
    pub due_date: String,
    pub status: ProjectStatus,
}

impl<'a> From<&'a ProjectFields> for ProjectRequest<'a> {
    fn from(fields: &'a ProjectFields) -> Self {
        Self {
            name: &fields.name,
            description: &fields.description,
            start_date: to_iso(fields.start_date),
            due_date: to_iso(fields.due_date),
            status: fields.status,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest<'a> {
    pub user_id: &'a str,
    pub role: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignMembersRequest<'a> {
    pub members: Vec<AssignmentRequest<'a>>,
}

impl<'a> From<&'a [Assignment]> for AssignMembersRequest<'a> {
    fn from(assignments: &'a [Assignment]) -> Self {
        Self {
            members: assignments
                .iter()
                .map(|assignment| AssignmentRequest {
                    user_id: assignment.user_id.as_str(),
                    role: &assignment.role,
                })
                .collect(),
        }
    }
}

fn identity(id: Option<String>, mongo_id: Option<String>, what: &str) -> Result<String, ApiError> {
    id.or(mongo_id)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::InvalidResponse(format!("{what} without an identifier")))
}

impl TryFrom<ProjectDto> for Project {
    type Error = ApiError;

    fn try_from(dto: ProjectDto) -> Result<Self, Self::Error> {
        let id = ProjectId::new(identity(dto.id, dto.mongo_id, "project")?);
        let team_members = dto
            .team_members
            .unwrap_or_default()
            .into_iter()
            .map(|member| member.into_domain(&id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Project {
            id,
            name: dto.name,
            description: dto.description,
            start_date: dto.start_date,
            due_date: dto.due_date,
            status: dto.status,
            team_members,
        })
    }
}

impl TeamMemberDto {
    fn into_domain(self, owner: &ProjectId) -> Result<TeamMember, ApiError> {
        Ok(TeamMember {
            id: MemberId::new(identity(self.id, self.mongo_id, "team member")?),
            user_id: UserId::new(self.user_id),
            name: self
                .name
                .unwrap_or_else(|| UNKNOWN_MEMBER_NAME.to_string()),
            role: self.role,
            project_id: self
                .project_id
                .map(ProjectId::new)
                .unwrap_or_else(|| owner.clone()),
        })
    }
}

impl TryFrom<UserDto> for User {
    type Error = ApiError;

    fn try_from(dto: UserDto) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(identity(dto.id, dto.mongo_id, "user")?),
            name: dto.name,
            position: dto.position,
            email: dto.email,
        })
    }
}

impl TryFrom<AssignedMemberDto> for AssignedMember {
    type Error = ApiError;

    fn try_from(dto: AssignedMemberDto) -> Result<Self, Self::Error> {
        Ok(AssignedMember {
            id: MemberId::new(identity(dto.id, dto.mongo_id, "team member")?),
            user_id: UserId::new(dto.user_id),
        })
    }
}
