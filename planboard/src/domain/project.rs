use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::Date;

use super::{ProjectId, TeamMember};

/// Days before the due date at which a project counts as "due soon".
pub const APPROACHING_WINDOW_DAYS: i64 = 7;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum ProjectStatus {
    #[default]
    #[strum(serialize = "open", to_string = "Open")]
    Open,
    #[strum(serialize = "in-progress", to_string = "In Progress")]
    InProgress,
    #[strum(serialize = "completed", to_string = "Completed")]
    Completed,
}

/// Urgency of a project relative to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DueStatus {
    #[strum(to_string = "Completed")]
    Completed,
    #[strum(to_string = "Overdue")]
    Overdue,
    #[strum(to_string = "Due Soon")]
    Approaching,
    #[strum(to_string = "On Track")]
    OnTrack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub start_date: Date,
    pub due_date: Date,
    pub status: ProjectStatus,
    pub team_members: Vec<TeamMember>,
}

impl Project {
    /// Urgency indicator; completed projects never report urgency.
    pub fn due_status(&self, today: Date) -> DueStatus {
        if self.status == ProjectStatus::Completed {
            return DueStatus::Completed;
        }

        let days_left = (self.due_date - today).whole_days();
        if days_left < 0 {
            DueStatus::Overdue
        } else if days_left <= APPROACHING_WINDOW_DAYS {
            DueStatus::Approaching
        } else {
            DueStatus::OnTrack
        }
    }

    /// A draft pre-filled with the current values, for edit forms.
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: Some(self.start_date),
            due_date: Some(self.due_date),
            status: self.status,
        }
    }

    /// Shallow-merge the present fields of `patch`. Identity and team members are untouched.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// User-supplied project fields as entered in a form. Dates may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub start_date: Option<Date>,
    pub due_date: Option<Date>,
    pub status: ProjectStatus,
}

/// The mutable scalar fields of a project after validation.
///
/// This is everything create and update transmit; identity, team members and
/// server-managed timestamps have no place here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: String,
    pub description: String,
    pub start_date: Date,
    pub due_date: Date,
    pub status: ProjectStatus,
}

/// Partial update applied by the reconciler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub due_date: Option<Date>,
    pub status: Option<ProjectStatus>,
}

impl From<&ProjectFields> for ProjectPatch {
    fn from(fields: &ProjectFields) -> Self {
        Self {
            name: Some(fields.name.clone()),
            description: Some(fields.description.clone()),
            start_date: Some(fields.start_date),
            due_date: Some(fields.due_date),
            status: Some(fields.status),
        }
    }
}

impl From<&Project> for ProjectPatch {
    fn from(project: &Project) -> Self {
        Self {
            name: Some(project.name.clone()),
            description: Some(project.description.clone()),
            start_date: Some(project.start_date),
            due_date: Some(project.due_date),
            status: Some(project.status),
        }
    }
}
