//! Backend doubles shared by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{Backend, DevBackend};
use crate::domain::{
    ApiError, AssignedMember, Assignment, MemberId, Project, ProjectFields, ProjectId, User,
};

/// Wraps a [`DevBackend`], counting every call and optionally failing them.
#[derive(Clone)]
pub struct CountingBackend {
    inner: DevBackend,
    calls: Arc<AtomicUsize>,
    offline: Arc<AtomicBool>,
    reverse_echo: Arc<AtomicBool>,
}

impl CountingBackend {
    pub fn new(inner: DevBackend) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
            offline: Arc::new(AtomicBool::new(false)),
            reverse_echo: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// While offline every call fails with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Echo assigned members back in reverse submission order.
    pub fn set_reverse_echo(&self, reverse: bool) {
        self.reverse_echo.store(reverse, Ordering::SeqCst);
    }

    fn record(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for CountingBackend {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.record()?;
        self.inner.list_projects().await
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project, ApiError> {
        self.record()?;
        self.inner.get_project(id).await
    }

    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, ApiError> {
        self.record()?;
        self.inner.create_project(fields).await
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        fields: &ProjectFields,
    ) -> Result<Project, ApiError> {
        self.record()?;
        self.inner.update_project(id, fields).await
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), ApiError> {
        self.record()?;
        self.inner.delete_project(id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.record()?;
        self.inner.list_users().await
    }

    async fn assign_members(
        &self,
        project_id: &ProjectId,
        assignments: &[Assignment],
    ) -> Result<Vec<AssignedMember>, ApiError> {
        self.record()?;
        let mut echoed = self.inner.assign_members(project_id, assignments).await?;
        if self.reverse_echo.load(Ordering::SeqCst) {
            echoed.reverse();
        }
        Ok(echoed)
    }

    async fn remove_member(
        &self,
        project_id: &ProjectId,
        member_id: &MemberId,
    ) -> Result<(), ApiError> {
        self.record()?;
        self.inner.remove_member(project_id, member_id).await
    }
}

/// Accepts every write and echoes nothing back.
pub struct QuietBackend;

#[async_trait]
impl Backend for QuietBackend {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        Ok(vec![])
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project, ApiError> {
        Err(ApiError::not_found(format!("project {id}")))
    }

    async fn create_project(&self, _fields: &ProjectFields) -> Result<Project, ApiError> {
        Err(ApiError::InvalidResponse("nothing echoed".to_string()))
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        _fields: &ProjectFields,
    ) -> Result<Project, ApiError> {
        Err(ApiError::not_found(format!("project {id}")))
    }

    async fn delete_project(&self, _id: &ProjectId) -> Result<(), ApiError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(vec![])
    }

    async fn assign_members(
        &self,
        _project_id: &ProjectId,
        _assignments: &[Assignment],
    ) -> Result<Vec<AssignedMember>, ApiError> {
        Ok(vec![])
    }

    async fn remove_member(
        &self,
        _project_id: &ProjectId,
        _member_id: &MemberId,
    ) -> Result<(), ApiError> {
        Ok(())
    }
}
