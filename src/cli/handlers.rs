use std::io::{BufRead, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::paths;
use crate::io::store_io::StoreFile;
use crate::model::view::{Filter, SortMode};
use crate::store::TodoStore;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let mut store = open_store(cli.data_dir.as_deref())?;

    match cli.command {
        // main.rs routes the no-subcommand case to the TUI
        None => Ok(()),
        Some(cmd) => match cmd {
            Commands::Add(args) => cmd_add(&mut store, args, json),
            Commands::List(args) => cmd_list(&mut store, args, json),
            Commands::Toggle(args) => cmd_toggle(&mut store, args),
            Commands::Edit(args) => cmd_edit(&mut store, args),
            Commands::Rm(args) => cmd_rm(&mut store, args),
            Commands::Clear(args) => cmd_clear(&mut store, args),
            Commands::Search(args) => cmd_search(&mut store, args, json),
            Commands::Counts => cmd_counts(&store, json),
        },
    }
}

/// Resolve the data directory and load the store (corrupt or missing
/// data starts as an empty list).
pub fn open_store(data_dir: Option<&str>) -> Result<TodoStore, Box<dyn std::error::Error>> {
    let dir = paths::data_dir(data_dir.map(Path::new))?;
    Ok(TodoStore::open(StoreFile::new(&dir)))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_add(
    store: &mut TodoStore,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate up front; stored due dates stay loose text
    if let Some(due) = &args.due
        && NaiveDate::parse_from_str(due, "%Y-%m-%d").is_err()
    {
        return Err(format!("invalid due date '{}' (expected YYYY-MM-DD)", due).into());
    }

    match store.add(&args.title, args.category, args.due)? {
        // Whitespace-only title: deliberately silent, nothing was added
        None => Ok(()),
        Some(id) => {
            let task = store.get(&id).ok_or("task vanished after add")?;
            if json {
                let out = AddedJson {
                    id: &task.id,
                    title: &task.title,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("added {}  {}", task.id, task.title);
            }
            Ok(())
        }
    }
}

fn cmd_list(
    store: &mut TodoStore,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(filter) = &args.filter {
        let filter = Filter::parse(filter)
            .ok_or_else(|| format!("unknown filter '{}' (all, active, completed)", filter))?;
        store.set_filter(filter);
    }
    if let Some(term) = &args.search {
        store.set_search_term(term);
    }
    if let Some(sort) = &args.sort {
        let sort = SortMode::parse(sort)
            .ok_or_else(|| format!("unknown sort mode '{}' (none, due-date, status)", sort))?;
        store.set_sort_mode(sort);
    }
    print_visible(store, json)
}

fn cmd_toggle(store: &mut TodoStore, args: ToggleArgs) -> Result<(), Box<dyn std::error::Error>> {
    if store.toggle_completed(&args.id)? {
        let task = store.get(&args.id).ok_or("task vanished after toggle")?;
        let state = if task.completed { "done" } else { "not done" };
        println!("{}  {} \u{2192} {}", task.id, task.title, state);
    }
    // Unknown ID: silent no-op by contract
    Ok(())
}

fn cmd_edit(store: &mut TodoStore, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    if store.edit_title(&args.id, &args.title)? {
        let task = store.get(&args.id).ok_or("task vanished after edit")?;
        println!("{}  {}", task.id, task.title);
    }
    Ok(())
}

fn cmd_rm(store: &mut TodoStore, args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    if store.remove(&args.id)? {
        println!("deleted {}", args.id);
    }
    Ok(())
}

fn cmd_clear(store: &mut TodoStore, args: ClearArgs) -> Result<(), Box<dyn std::error::Error>> {
    let done = store.counts().total - store.counts().remaining;
    if !args.yes {
        let noun = if done == 1 { "task" } else { "tasks" };
        print!("delete {} completed {}? [y/N] ", done, noun);
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y") {
            println!("aborted");
            return Ok(());
        }
    }
    let cleared = store.clear_completed()?;
    println!("cleared {} completed", cleared);
    Ok(())
}

fn cmd_search(
    store: &mut TodoStore,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    store.set_search_term(&args.term);
    print_visible(store, json)
}

fn cmd_counts(store: &TodoStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let out = counts_to_json(store.counts());
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", format_counts_line(store.counts()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_visible(store: &TodoStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let visible = store.visible();
    if json {
        let out = ListJson {
            tasks: visible,
            counts: counts_to_json(store.counts()),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let id_width = visible.iter().map(|t| t.id.len()).max().unwrap_or(0);
    for task in &visible {
        println!("{}", format_task_line(task, id_width));
    }
    if visible.is_empty() {
        println!("nothing matches");
    }
    println!("{}", format_counts_line(store.counts()));
    Ok(())
}
