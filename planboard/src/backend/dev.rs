use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use time::macros::date;
use time::Date;

use super::Backend;
use crate::domain::{
    generate_local_id, ApiError, AssignedMember, Assignment, MemberId, Project, ProjectFields,
    ProjectId, ProjectStatus, TeamMember, User, UserId,
};

/// In-memory backend for running without a server.
///
/// Clones share the same store, so a CLI session and its tests observe each
/// other's writes the way two requests against one server would.
#[derive(Debug, Clone, Default)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug, Default)]
struct DevStore {
    projects: Vec<Project>,
    users: Vec<User>,
}

impl DevBackend {
    /// A backend seeded with demo projects and users.
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(DevStore {
                projects: seed_projects(),
                users: seed_users(),
            })),
        }
    }

    #[cfg(test)]
    pub(crate) fn project_count(&self) -> usize {
        self.lock().projects.len()
    }

    fn lock(&self) -> MutexGuard<'_, DevStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DevStore {
    fn project_mut(&mut self, id: &ProjectId) -> Result<&mut Project, ApiError> {
        self.projects
            .iter_mut()
            .find(|project| &project.id == id)
            .ok_or_else(|| ApiError::not_found(format!("project {id}")))
    }
}

#[async_trait]
impl Backend for DevBackend {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        Ok(self.lock().projects.clone())
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project, ApiError> {
        self.lock().project_mut(id).map(|project| project.clone())
    }

    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, ApiError> {
        let project = Project {
            id: ProjectId::new(generate_local_id()),
            name: fields.name.clone(),
            description: fields.description.clone(),
            start_date: fields.start_date,
            due_date: fields.due_date,
            status: fields.status,
            team_members: vec![],
        };
        self.lock().projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        fields: &ProjectFields,
    ) -> Result<Project, ApiError> {
        let mut store = self.lock();
        let project = store.project_mut(id)?;
        project.apply(fields.into());
        Ok(project.clone())
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), ApiError> {
        let mut store = self.lock();
        let before = store.projects.len();
        store.projects.retain(|project| &project.id != id);
        if store.projects.len() == before {
            return Err(ApiError::not_found(format!("project {id}")));
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.lock().users.clone())
    }

    async fn assign_members(
        &self,
        project_id: &ProjectId,
        assignments: &[Assignment],
    ) -> Result<Vec<AssignedMember>, ApiError> {
        let mut store = self.lock();
        store.project_mut(project_id)?;

        let mut members = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let user = store
                .users
                .iter()
                .find(|user| user.id == assignment.user_id)
                .ok_or_else(|| ApiError::rejected(format!("unknown user {}", assignment.user_id)))?;
            members.push(TeamMember {
                id: MemberId::generate(),
                user_id: user.id.clone(),
                name: user.name.clone(),
                role: assignment.role.clone(),
                project_id: project_id.clone(),
            });
        }

        let project = store.project_mut(project_id)?;
        let echoed = members
            .iter()
            .map(|member| AssignedMember {
                id: member.id.clone(),
                user_id: member.user_id.clone(),
            })
            .collect();
        project.team_members.extend(members);
        Ok(echoed)
    }

    async fn remove_member(
        &self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<(), ApiError> {
        let mut store = self.lock();
        let project = store.project_mut(project_id)?;
        let index = project
            .team_members
            .iter()
            .position(|member| &member.id == member_id)
            .ok_or_else(|| ApiError::not_found(format!("team member {member_id}")))?;
        project.team_members.remove(index);
        Ok(())
    }
}

fn seed_users() -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, position: &str| User {
        id: UserId::from(id),
        name: name.to_string(),
        position: Some(position.to_string()),
        email: Some(email.to_string()),
    };

    vec![
        user("user1", "Maja Lindqvist", "maja@example.com", "Frontend Developer"),
        user("user2", "Omar Haddad", "omar@example.com", "Backend Developer"),
        user("user3", "Priya Nair", "priya@example.com", "Product Designer"),
        user("user4", "Tomás Ruiz", "tomas@example.com", "Project Manager"),
        user("user5", "Kenji Mori", "kenji@example.com", "Platform Engineer"),
    ]
}

fn seed_projects() -> Vec<Project> {
    let member = |id: &str, user_id: &str, name: &str, role: &str, project_id: &str| TeamMember {
        id: MemberId::from(id),
        user_id: UserId::from(user_id),
        name: name.to_string(),
        role: role.to_string(),
        project_id: ProjectId::from(project_id),
    };
    let project = |id: &str,
                   name: &str,
                   description: &str,
                   start_date: Date,
                   due_date: Date,
                   status: ProjectStatus,
                   team_members: Vec<TeamMember>| Project {
        id: ProjectId::from(id),
        name: name.to_string(),
        description: description.to_string(),
        start_date,
        due_date,
        status,
        team_members,
    };

    vec![
        project(
            "proj1",
            "Customer Portal",
            "Self-service portal for invoices, tickets and account settings",
            date!(2025 - 01 - 15),
            date!(2025 - 03 - 30),
            ProjectStatus::InProgress,
            vec![
                member("tm1", "user1", "Maja Lindqvist", "Frontend Lead", "proj1"),
                member("tm2", "user3", "Priya Nair", "UX Designer", "proj1"),
            ],
        ),
        project(
            "proj2",
            "Billing Service Rewrite",
            "Replace the legacy billing batch jobs with an event driven service",
            date!(2025 - 02 - 01),
            date!(2025 - 05 - 15),
            ProjectStatus::Open,
            vec![
                member("tm3", "user2", "Omar Haddad", "Backend Developer", "proj2"),
                member("tm4", "user4", "Tomás Ruiz", "Project Manager", "proj2"),
            ],
        ),
        project(
            "proj3",
            "Cluster Upgrade",
            "Move production workloads to the new Kubernetes cluster",
            date!(2024 - 11 - 01),
            date!(2024 - 12 - 15),
            ProjectStatus::Completed,
            vec![
                member("tm5", "user2", "Omar Haddad", "Database Engineer", "proj3"),
                member("tm6", "user5", "Kenji Mori", "Platform Engineer", "proj3"),
            ],
        ),
    ]
}
