use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod analyze_cmd;
mod assess_cmd;
mod compare_cmd;
mod config;
mod interview_cmd;
mod jobs_cmd;
mod resources_cmd;
mod roadmap_cmd;
mod setup;
mod state;
mod tasks_cmd;

use assess_cmd::AssessCommand;
use interview_cmd::InterviewCommand;
use jobs_cmd::JobsCommand;
use resources_cmd::ResourcesCommand;
use roadmap_cmd::RoadmapCommand;
use tasks_cmd::TasksCommand;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARVIX_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "carvix", version = VERSION, about = "Career profile analysis and placement-prep trackers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive profile intake: writes ~/.carvix/profile.json
    Setup,

    /// Stored profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Strengths, recommended career paths and skill gaps for the stored profile
    Analyze {
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Job application tracker
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },

    /// Career task list and reminders
    Tasks {
        #[command(subcommand)]
        command: TasksCommand,
    },

    /// Skills assessments
    Assess {
        #[command(subcommand)]
        command: AssessCommand,
    },

    /// Learning roadmap progress
    Roadmap {
        #[command(subcommand)]
        command: RoadmapCommand,
    },

    /// Interview practice
    Interview {
        #[command(subcommand)]
        command: InterviewCommand,
    },

    /// Resource library search and bookmarks
    Resources {
        #[command(subcommand)]
        command: ResourcesCommand,
    },

    /// Compare up to three careers side by side; without ids, list careers
    Compare {
        ids: Vec<String>,

        /// Filter the list by title or description
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Print the stored profile
    Show {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective config
    Show,
}

/// Logs go to stderr so `--json` output stays clean. Filter via CARVIX_LOG.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CARVIX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Setup => setup::run_setup()?,

        Command::Profile { command } => match command {
            ProfileCommand::Show { json } => {
                let profile = state::load_profile()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&profile)?);
                } else {
                    print!("{}", setup::render_profile(&profile));
                }
            }
        },

        Command::Analyze { json } => analyze_cmd::run(json)?,

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },

        Command::Jobs { command } => jobs_cmd::run(command)?,
        Command::Tasks { command } => tasks_cmd::run(command)?,
        Command::Assess { command } => assess_cmd::run(command)?,
        Command::Roadmap { command } => roadmap_cmd::run(command)?,
        Command::Interview { command } => interview_cmd::run(command)?,
        Command::Resources { command } => resources_cmd::run(command)?,

        Command::Compare {
            ids,
            search,
            category,
        } => compare_cmd::run(ids, search, category)?,
    }

    Ok(())
}
