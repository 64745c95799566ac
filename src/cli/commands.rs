use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tick", about = concat!("[x] tick v", env!("CARGO_PKG_VERSION"), " - a to-do list that stays out of the way"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task (goes to the top of the list)
    Add(AddArgs),
    /// List tasks, with optional filter, search, and sort
    List(ListArgs),
    /// Toggle a task between done and not done
    Toggle(ToggleArgs),
    /// Change a task's title
    Edit(EditArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Delete every completed task
    Clear(ClearArgs),
    /// Search task titles (case-insensitive substring)
    Search(SearchArgs),
    /// Show task totals
    Counts,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Free-text category
    #[arg(long)]
    pub category: Option<String>,
    /// Due date
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by state (all, active, completed)
    #[arg(long)]
    pub filter: Option<String>,
    /// Keep only titles containing this text
    #[arg(long)]
    pub search: Option<String>,
    /// Display order (none, due-date, status)
    #[arg(long)]
    pub sort: Option<String>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: String,
    /// New title
    pub title: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for in titles
    pub term: String,
}
