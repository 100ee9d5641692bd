//! Local state transitions applied after a successful remote mutation, so a
//! view never has to refetch the whole project.

use std::collections::HashSet;

use crate::domain::{MemberId, Project, ProjectPatch, TeamMember};

/// The project a view is holding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectState {
    Loaded(Project),
    /// The project was deleted. Terminal.
    Absent,
}

impl ProjectState {
    pub fn project(&self) -> Option<&Project> {
        match self {
            ProjectState::Loaded(project) => Some(project),
            ProjectState::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ProjectState::Absent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectEvent {
    ProjectUpdated(ProjectPatch),
    ProjectDeleted,
    MembersAdded(Vec<TeamMember>),
    MemberRemoved(MemberId),
}

/// Apply `event` to `state`. Never fails and never performs I/O.
///
/// Team members stay unique by id: added members whose id is already held are
/// dropped, and removing an id that is not held leaves the state as it was.
pub fn reconcile(state: ProjectState, event: ProjectEvent) -> ProjectState {
    let ProjectState::Loaded(mut project) = state else {
        return ProjectState::Absent;
    };

    match event {
        ProjectEvent::ProjectUpdated(patch) => project.apply(patch),
        ProjectEvent::ProjectDeleted => return ProjectState::Absent,
        ProjectEvent::MembersAdded(members) => {
            let mut seen: HashSet<MemberId> = project
                .team_members
                .iter()
                .map(|member| member.id.clone())
                .collect();
            project.team_members.extend(
                members
                    .into_iter()
                    .filter(|member| seen.insert(member.id.clone())),
            );
        }
        ProjectEvent::MemberRemoved(member_id) => {
            if let Some(index) = project
                .team_members
                .iter()
                .position(|member| member.id == member_id)
            {
                project.team_members.remove(index);
            }
        }
    }

    ProjectState::Loaded(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectId, ProjectStatus, UserId};
    use time::macros::date;

    fn member(id: &str, user: &str) -> TeamMember {
        TeamMember {
            id: MemberId::from(id),
            user_id: UserId::from(user),
            name: format!("User {user}"),
            role: "Dev".to_string(),
            project_id: ProjectId::from("p1"),
        }
    }

    fn loaded(members: Vec<TeamMember>) -> ProjectState {
        ProjectState::Loaded(Project {
            id: ProjectId::from("p1"),
            name: "Site".to_string(),
            description: "Revamp".to_string(),
            start_date: date!(2025 - 01 - 01),
            due_date: date!(2025 - 02 - 01),
            status: ProjectStatus::Open,
            team_members: members,
        })
    }

    fn member_ids(state: &ProjectState) -> Vec<&str> {
        state
            .project()
            .unwrap()
            .team_members
            .iter()
            .map(|m| m.id.as_str())
            .collect()
    }

    #[test]
    fn update_merges_fields_and_keeps_members() {
        let state = loaded(vec![member("m1", "u1")]);
        let next = reconcile(
            state,
            ProjectEvent::ProjectUpdated(ProjectPatch {
                description: Some("Full rebuild".to_string()),
                due_date: Some(date!(2025 - 03 - 01)),
                ..Default::default()
            }),
        );

        let project = next.project().unwrap();
        assert_eq!(project.name, "Site");
        assert_eq!(project.description, "Full rebuild");
        assert_eq!(project.due_date, date!(2025 - 03 - 01));
        assert_eq!(project.team_members.len(), 1);
    }

    #[test]
    fn delete_is_terminal() {
        let next = reconcile(loaded(vec![member("m1", "u1")]), ProjectEvent::ProjectDeleted);
        assert!(next.is_absent());

        let after = reconcile(
            next,
            ProjectEvent::MembersAdded(vec![member("m2", "u2")]),
        );
        assert_eq!(after, ProjectState::Absent);
    }

    #[test]
    fn added_members_follow_existing_in_submission_order() {
        let state = loaded(vec![member("m1", "u1")]);
        let next = reconcile(
            state,
            ProjectEvent::MembersAdded(vec![member("m3", "u3"), member("m2", "u2")]),
        );
        assert_eq!(member_ids(&next), vec!["m1", "m3", "m2"]);
    }

    #[test]
    fn added_members_stay_unique_by_id() {
        let state = loaded(vec![member("m1", "u1")]);
        let next = reconcile(
            state,
            ProjectEvent::MembersAdded(vec![
                member("m1", "u9"),
                member("m2", "u2"),
                member("m2", "u2"),
            ]),
        );
        assert_eq!(member_ids(&next), vec!["m1", "m2"]);
        assert_eq!(next.project().unwrap().team_members[0].user_id.as_str(), "u1");
    }

    #[test]
    fn removal_drops_the_matching_member() {
        let state = loaded(vec![member("m1", "u1"), member("m2", "u2")]);
        let next = reconcile(state, ProjectEvent::MemberRemoved(MemberId::from("m1")));
        assert_eq!(member_ids(&next), vec!["m2"]);
    }

    #[test]
    fn removing_an_absent_member_changes_nothing() {
        let state = loaded(vec![member("m1", "u1")]);
        let next = reconcile(
            state.clone(),
            ProjectEvent::MemberRemoved(MemberId::from("m9")),
        );
        assert_eq!(next, state);
    }

    #[test]
    fn removal_is_idempotent() {
        let state = loaded(vec![member("m1", "u1"), member("m2", "u2")]);
        let once = reconcile(state, ProjectEvent::MemberRemoved(MemberId::from("m2")));
        let twice = reconcile(
            once.clone(),
            ProjectEvent::MemberRemoved(MemberId::from("m2")),
        );
        assert_eq!(once, twice);
    }
}
