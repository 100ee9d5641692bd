use clap::{Args, Parser, Subcommand};
use planboard::ProjectStatus;

#[derive(Debug, Parser)]
#[command(name = "planboard")]
#[command(about = "Manage projects and their team members")]
pub struct Cli {
    /// Run against local in-memory demo data instead of the API
    #[arg(long, global = true)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all projects
    List,
    /// Show one project with its team
    Show { id: String },
    /// Create a project
    Create(ProjectArgs),
    /// Change fields of an existing project
    Edit {
        id: String,
        #[command(flatten)]
        fields: ProjectArgs,
    },
    /// Delete a project
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Assign users to a project
    Assign {
        project: String,
        /// USER_ID:ROLE, repeatable
        #[arg(long = "member", short = 'm', value_name = "USER_ID:ROLE")]
        members: Vec<String>,
    },
    /// Remove a team member from a project
    Unassign { project: String, member: String },
    /// List users that can be assigned
    Users,
    /// Print config path and create default file if missing
    ConfigPath,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub due: Option<String>,
    /// open, in-progress or completed
    #[arg(long)]
    pub status: Option<ProjectStatus>,
}
