use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use planboard::{
    parse_date, Assignment, MemberId, Planboard, ProjectDraft, ProjectId, ProjectSession,
};
use time::Date;
use tracing::info;

use crate::cli::{Commands, ProjectArgs};
use crate::config::CliConfig;
use crate::render;

pub async fn run(board: Planboard, command: Commands) -> Result<()> {
    let today = time::OffsetDateTime::now_utc().date();

    match command {
        Commands::List => {
            let projects = board.projects().list().await?;
            println!("{}", render::project_list(&projects, today));
        }
        Commands::Show { id } => {
            let project = board.projects().get_by_id(&ProjectId::new(id)).await?;
            println!("{}", render::project_detail(&project, today));
        }
        Commands::Create(args) => {
            let mut draft = ProjectDraft::default();
            apply_args(&mut draft, args)?;
            let project = board.projects().create(&draft).await?;
            info!(project_id = %project.id, "project created");
            println!("Created project {}", project.id);
        }
        Commands::Edit { id, fields } => {
            let mut session = ProjectSession::open(board, ProjectId::new(id)).await?;
            let mut draft = session
                .project()
                .map(|project| project.to_draft())
                .unwrap_or_default();
            apply_args(&mut draft, fields)?;
            session.edit(&draft).await?;
            if let Some(project) = session.project() {
                println!("{}", render::project_detail(project, today));
            }
        }
        Commands::Delete { id, yes } => {
            let mut session = ProjectSession::open(board, ProjectId::new(id)).await?;
            let name = session
                .project()
                .map(|project| project.name.clone())
                .unwrap_or_default();
            if !yes && !confirm(&format!("Delete project \"{name}\"? [y/N] "))? {
                println!("Cancelled.");
                return Ok(());
            }
            session.delete().await?;
            println!("Deleted project \"{name}\"");
        }
        Commands::Assign { project, members } => {
            let assignments = members
                .iter()
                .map(|raw| parse_assignment(raw))
                .collect::<Result<Vec<_>>>()?;
            board.team().list_users().await?;
            let mut session = ProjectSession::open(board, ProjectId::new(project)).await?;
            let added = session.add_members(&assignments).await?;
            println!("Added {} team member(s):", added.len());
            for member in &added {
                println!("{}", render::member_line(member));
            }
        }
        Commands::Unassign { project, member } => {
            let mut session = ProjectSession::open(board, ProjectId::new(project)).await?;
            session.remove_member(&MemberId::new(member)).await?;
            let remaining = session
                .project()
                .map(|project| project.team_members.len())
                .unwrap_or_default();
            println!("Removed. {remaining} team member(s) left.");
        }
        Commands::Users => {
            let users = board.team().list_users().await?;
            println!("{}", render::user_list(&users));
        }
        Commands::ConfigPath => config_path()?,
    }

    Ok(())
}

/// Print the config path, writing a default file there if none exists.
pub fn config_path() -> Result<()> {
    let path = CliConfig::config_path()?;
    if CliConfig::ensure_exists(&path)? {
        info!(path = %path.display(), "wrote default config");
    }
    println!("{}", path.display());
    Ok(())
}

/// Overlay the flags that were given onto `draft`.
fn apply_args(draft: &mut ProjectDraft, args: ProjectArgs) -> Result<()> {
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(start) = args.start {
        draft.start_date = Some(parse_date_arg("--start", &start)?);
    }
    if let Some(due) = args.due {
        draft.due_date = Some(parse_date_arg("--due", &due)?);
    }
    if let Some(status) = args.status {
        draft.status = status;
    }
    Ok(())
}

fn parse_date_arg(flag: &str, raw: &str) -> Result<Date> {
    parse_date(raw).with_context(|| format!("{flag} expects YYYY-MM-DD, got {raw:?}"))
}

/// Parse `USER_ID:ROLE`. Either side may be empty; completeness is checked
/// for the whole batch before anything is sent.
fn parse_assignment(raw: &str) -> Result<Assignment> {
    let Some((user_id, role)) = raw.split_once(':') else {
        bail!("--member expects USER_ID:ROLE, got {raw:?}");
    };
    Ok(Assignment::new(user_id.trim(), role.trim()))
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use planboard::ProjectStatus;
    use time::macros::date;

    fn args() -> ProjectArgs {
        ProjectArgs {
            name: None,
            description: None,
            start: None,
            due: None,
            status: None,
        }
    }

    #[test]
    fn only_given_flags_change_the_draft() {
        let mut draft = ProjectDraft {
            name: "Site".to_string(),
            description: "Revamp".to_string(),
            start_date: Some(date!(2025 - 01 - 01)),
            due_date: Some(date!(2025 - 02 - 01)),
            status: ProjectStatus::Open,
        };
        let mut overlay = args();
        overlay.due = Some("2025-03-01".to_string());
        overlay.status = Some(ProjectStatus::InProgress);

        apply_args(&mut draft, overlay).unwrap();

        assert_eq!(draft.name, "Site");
        assert_eq!(draft.due_date, Some(date!(2025 - 03 - 01)));
        assert_eq!(draft.status, ProjectStatus::InProgress);
    }

    #[test]
    fn unparsable_date_names_the_flag() {
        let mut overlay = args();
        overlay.start = Some("next week".to_string());
        let err = apply_args(&mut ProjectDraft::default(), overlay).unwrap_err();
        assert!(err.to_string().contains("--start"));
    }

    #[test]
    fn assignment_needs_a_separator() {
        let assignment = parse_assignment("user1:Frontend Lead").unwrap();
        assert_eq!(assignment.user_id.as_str(), "user1");
        assert_eq!(assignment.role, "Frontend Lead");

        assert!(!parse_assignment(":Dev").unwrap().is_complete());
        assert!(parse_assignment("user1").is_err());
    }

    #[tokio::test]
    async fn dev_board_runs_commands_end_to_end() {
        let board = Planboard::dev();
        run(
            board.clone(),
            Commands::Assign {
                project: "proj2".to_string(),
                members: vec!["user5:SRE".to_string()],
            },
        )
        .await
        .unwrap();

        let project = board
            .projects()
            .get_by_id(&ProjectId::from("proj2"))
            .await
            .unwrap();
        assert_eq!(project.team_members.len(), 3);
        assert_eq!(project.team_members[2].name, "Kenji Mori");
    }

    #[tokio::test]
    async fn validation_failures_surface_as_api_errors() {
        let err = run(Planboard::dev(), Commands::Create(args()))
            .await
            .unwrap_err();
        let api = err.downcast_ref::<planboard::ApiError>().unwrap();
        assert!(api.field_errors().is_some());
    }
}
