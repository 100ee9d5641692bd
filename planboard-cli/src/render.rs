//! Plain-text views of projects, teams and users.

use planboard::{format_date, truncate_text, ApiError, Project, TeamMember, User};
use time::Date;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

pub fn project_line(project: &Project, today: Date) -> String {
    format!(
        "{:<10} {:<32} {:<12} due {:<13} {}",
        project.id.as_str(),
        project.name,
        project.status.to_string(),
        format_date(project.due_date),
        project.due_status(today),
    )
}

pub fn project_list(projects: &[Project], today: Date) -> String {
    if projects.is_empty() {
        return "No projects yet.".to_string();
    }
    projects
        .iter()
        .flat_map(|project| {
            [
                project_line(project, today),
                format!(
                    "           {}",
                    truncate_text(&project.description, DESCRIPTION_PREVIEW_CHARS)
                ),
            ]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn project_detail(project: &Project, today: Date) -> String {
    let mut lines = vec![
        format!("{} ({})", project.name, project.id),
        format!("Status:      {}", project.status),
        format!("Start date:  {}", format_date(project.start_date)),
        format!(
            "Due date:    {} ({})",
            format_date(project.due_date),
            project.due_status(today)
        ),
        String::new(),
        project.description.clone(),
        String::new(),
    ];

    if project.team_members.is_empty() {
        lines.push("No team members assigned.".to_string());
    } else {
        lines.push(format!("Team ({}):", project.team_members.len()));
        lines.extend(project.team_members.iter().map(member_line));
    }
    lines.join("\n")
}

pub fn member_line(member: &TeamMember) -> String {
    format!(
        "  {:<10} {:<24} {}",
        member.id.as_str(),
        member.name,
        member.role
    )
}

pub fn user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }
    users
        .iter()
        .map(|user| format!("{:<10} {}", user.id.as_str(), user.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per field error, or the error's own message for everything else.
pub fn api_error(err: &ApiError) -> String {
    match err.field_errors() {
        Some(errors) => errors
            .iter()
            .map(|(field, error)| format!("  {}: {}", field.as_str(), error.message))
            .collect::<Vec<_>>()
            .join("\n"),
        None => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planboard::{MemberId, ProjectDraft, ProjectId, ProjectStatus, UserId};
    use time::macros::date;

    fn project() -> Project {
        Project {
            id: ProjectId::from("p1"),
            name: "Site".to_string(),
            description: "x".repeat(150),
            start_date: date!(2025 - 01 - 01),
            due_date: date!(2025 - 02 - 01),
            status: ProjectStatus::Open,
            team_members: vec![TeamMember {
                id: MemberId::from("m1"),
                user_id: UserId::from("u1"),
                name: "Ada".to_string(),
                role: "Lead".to_string(),
                project_id: ProjectId::from("p1"),
            }],
        }
    }

    #[test]
    fn list_truncates_descriptions() {
        let out = project_list(&[project()], date!(2025 - 01 - 10));
        assert!(out.contains(&format!("{}...", "x".repeat(100))));
        assert!(!out.contains(&"x".repeat(101)));
        assert!(out.contains("Feb 1, 2025"));
        assert!(out.contains("On Track"));
    }

    #[test]
    fn detail_shows_urgency_and_team() {
        let out = project_detail(&project(), date!(2025 - 01 - 28));
        assert!(out.contains("Due date:    Feb 1, 2025 (Due Soon)"));
        assert!(out.contains("Team (1):"));
        assert!(out.contains("Ada"));
    }

    #[test]
    fn field_errors_are_listed_per_field() {
        let errors = planboard::validate(&ProjectDraft::default());
        let out = api_error(&ApiError::from(errors));
        assert!(out.contains("name: Project name is required"));
        assert!(out.contains("dueDate: Due date is required"));
    }

    #[test]
    fn empty_lists_say_so() {
        assert_eq!(project_list(&[], date!(2025 - 01 - 01)), "No projects yet.");
        assert_eq!(user_list(&[]), "No users found.");
    }
}
