use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, RequestBuilder, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::dto::{
    AssignMembersRequest, AssignedMemberDto, Envelope, ErrorBody, OptionalEnvelope, ProjectDto,
    ProjectRequest, UserDto,
};
use super::Backend;
use crate::config::{ClientConfig, ConfigError};
use crate::domain::{
    ApiError, AssignedMember, Assignment, MemberId, Project, ProjectFields, ProjectId, User,
};

const PROJECTS: &str = "projectManagement";
const USERS: &str = "userManagement";
const TEAMS: &str = "teamManagement";

/// Backend adapter speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let path = segments
            .iter()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        self.base_url
            .join(&path)
            .map_err(|e| ApiError::Network(format!("failed to build URL for {path}: {e}")))
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            ApiError::Network(format!("failed to call {call_name}: {e}"))
        })?;

        let status = response.status();
        debug!(call = call_name, status = status.as_u16(), "response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| body.trim().to_string());

        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(if message.is_empty() {
                call_name.to_string()
            } else {
                message
            }),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::rejected(if message.is_empty() {
                    format!("{call_name} rejected the request")
                } else {
                    message
                })
            }
            _ => ApiError::Server {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("unknown").to_string()
                } else {
                    message
                },
            },
        })
    }

    async fn read_body(&self, response: Response, call_name: &str) -> Result<Vec<u8>, ApiError> {
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| ApiError::Network(format!("failed to read {call_name} response: {e}")))
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, call_name).await?;
        let body = self.read_body(response, call_name).await?;
        serde_json::from_slice::<Envelope<T>>(&body)
            .map(|envelope| envelope.data)
            .map_err(|e| ApiError::InvalidResponse(format!("failed to parse {call_name} response: {e}")))
    }

    async fn get_optional_data<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<Option<T>, ApiError> {
        let response = self.send(request, call_name).await?;
        let body = self.read_body(response, call_name).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice::<OptionalEnvelope<T>>(&body)
            .map(|envelope| envelope.data)
            .map_err(|e| ApiError::InvalidResponse(format!("failed to parse {call_name} response: {e}")))
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), ApiError> {
        let response = self.send(request, call_name).await?;
        if let Err(e) = response.bytes().await {
            debug!(call = call_name, error = %e, "ignoring unreadable response body");
        }
        Ok(())
    }
}

/// A listing endpoint has nothing to be "not found"; a 404 there means the
/// service is misrouted.
fn listing_error(err: ApiError) -> ApiError {
    match err {
        ApiError::NotFound(message) => ApiError::Server {
            status: StatusCode::NOT_FOUND.as_u16(),
            message,
        },
        other => other,
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(name = "HttpBackend::list_projects", skip(self))]
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let dtos: Vec<ProjectDto> = self
            .get_data(
                self.client.get(self.endpoint(&[PROJECTS, "getAllProjects"])?),
                "GET getAllProjects",
            )
            .await
            .map_err(listing_error)?;

        dtos.into_iter().map(Project::try_from).collect()
    }

    #[instrument(name = "HttpBackend::get_project", skip(self), fields(project_id = %id))]
    async fn get_project(&self, id: &ProjectId) -> Result<Project, ApiError> {
        let dto: ProjectDto = self
            .get_data(
                self.client
                    .get(self.endpoint(&[PROJECTS, "getProjectById", id.as_str()])?),
                "GET getProjectById",
            )
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => ApiError::not_found(format!("project {id}")),
                other => other,
            })?;

        Project::try_from(dto)
    }

    #[instrument(name = "HttpBackend::create_project", skip(self, payload))]
    async fn create_project(&self, payload: &ProjectFields) -> Result<Project, ApiError> {
        let dto: ProjectDto = self
            .get_data(
                self.client
                    .post(self.endpoint(&[PROJECTS, "createProject"])?)
                    .json(&ProjectRequest::from(payload)),
                "POST createProject",
            )
            .await?;

        Project::try_from(dto)
    }

    #[instrument(name = "HttpBackend::update_project", skip(self, payload), fields(project_id = %id))]
    async fn update_project(
        &self,
        id: &ProjectId,
        payload: &ProjectFields,
    ) -> Result<Project, ApiError> {
        let dto: ProjectDto = self
            .get_data(
                self.client
                    .put(self.endpoint(&[PROJECTS, "updateProject", id.as_str()])?)
                    .json(&ProjectRequest::from(payload)),
                "PUT updateProject",
            )
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => ApiError::not_found(format!("project {id}")),
                other => other,
            })?;

        Project::try_from(dto)
    }

    #[instrument(name = "HttpBackend::delete_project", skip(self), fields(project_id = %id))]
    async fn delete_project(&self, id: &ProjectId) -> Result<(), ApiError> {
        self.send_without_body(
            self.client
                .delete(self.endpoint(&[PROJECTS, "deleteProject", id.as_str()])?),
            "DELETE deleteProject",
        )
        .await
        .map_err(|e| match e {
            ApiError::NotFound(_) => ApiError::not_found(format!("project {id}")),
            other => other,
        })
    }

    #[instrument(name = "HttpBackend::list_users", skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let dtos: Vec<UserDto> = self
            .get_data(
                self.client.get(self.endpoint(&[USERS, "getAllUsers"])?),
                "GET getAllUsers",
            )
            .await
            .map_err(listing_error)?;

        dtos.into_iter().map(User::try_from).collect()
    }

    #[instrument(
        name = "HttpBackend::assign_members",
        skip(self, assignments),
        fields(project_id = %project_id, count = assignments.len())
    )]
    async fn assign_members(
        &self,
        project_id: &ProjectId,
        assignments: &[Assignment],
    ) -> Result<Vec<AssignedMember>, ApiError> {
        let echoed: Option<Vec<AssignedMemberDto>> = self
            .get_optional_data(
                self.client
                    .post(self.endpoint(&[TEAMS, "projects", project_id.as_str(), "team"])?)
                    .json(&AssignMembersRequest::from(assignments)),
                "POST team",
            )
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => ApiError::not_found(format!("project {project_id}")),
                other => other,
            })?;

        echoed
            .unwrap_or_default()
            .into_iter()
            .map(AssignedMember::try_from)
            .collect()
    }

    #[instrument(
        name = "HttpBackend::remove_member",
        skip(self),
        fields(project_id = %project_id, member_id = %member_id)
    )]
    async fn remove_member(
        &self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<(), ApiError> {
        self.send_without_body(
            self.client.delete(self.endpoint(&[
                PROJECTS,
                "removeTeamMember",
                project_id.as_str(),
                member_id.as_str(),
            ])?),
            "DELETE removeTeamMember",
        )
        .await
    }
}
