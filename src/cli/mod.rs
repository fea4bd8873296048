mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::Config;
use crate::services::DashboardService;
use crate::store::{MemoryStore, RecordStore, RestStore};
use crate::types::{Category, QueryWarning};

/// Personal life dashboard: expenses, todos, projects and entertainment
#[derive(Parser)]
#[command(name = "lifedash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Read from a JSON snapshot file instead of the backend
    #[arg(long, global = true, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Show the overview (default)
    Overview {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List expenses, newest first
    Expenses {
        /// Only show one category (e.g., Food)
        #[arg(long)]
        category: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List todos with completion progress
    Todos {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the project kanban board
    Projects {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the games and movies & series boards
    Backlog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(path) = self.snapshot {
            config.snapshot = Some(path);
        }
        let command = self.command.unwrap_or(Commands::Overview { json: false });

        match &config.snapshot {
            Some(path) => run_command(MemoryStore::from_file(path)?, command).await,
            None => run_command(RestStore::from_config(&config)?, command).await,
        }
    }
}

async fn run_command<S: RecordStore>(store: S, command: Commands) -> anyhow::Result<()> {
    let service = DashboardService::new(store);

    match command {
        Commands::Overview { json } => {
            let overview = service.overview().await;
            emit(&overview, &overview.warnings, json, report::overview)
        }
        Commands::Expenses { category, json } => {
            let category = category.map(Category::from);
            let view = service.expenses(category.as_ref()).await;
            emit(&view, &view.warnings, json, |v| report::expenses(&v.data))
        }
        Commands::Todos { json } => {
            let view = service.todos().await;
            emit(&view, &view.warnings, json, |v| report::todos(&v.data))
        }
        Commands::Projects { json } => {
            let view = service.projects().await;
            emit(&view, &view.warnings, json, |v| report::projects(&v.data))
        }
        Commands::Backlog { json } => {
            let view = service.backlog().await;
            emit(&view, &view.warnings, json, |v| report::backlog(&v.data))
        }
    }
}

/// Print as JSON or as a text report; text mode sends warnings to stderr
fn emit<T, F>(value: &T, warnings: &[QueryWarning], json: bool, render: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }

    for warning in warnings {
        eprintln!("[lifedash] Warning: {}", warning);
    }
    print!("{}", render(value));
    Ok(())
}
