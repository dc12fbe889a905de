use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::list_io::{self, ListFile};
use crate::io::recovery;
use crate::model::task::TaskList;
use crate::parse::{flatten_entry, parse_entry};

type CliResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands) -> CliResult {
    match command {
        // Read commands
        Commands::List(args) => cmd_list(args),
        Commands::Recovery(args) => cmd_recovery(args),

        // Write commands
        Commands::Add(args) => cmd_add(args),
        Commands::Done(args) => cmd_done(args),
        Commands::Rm(args) => cmd_rm(args),
        Commands::Mv(args) => cmd_mv(args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open the list file and load it, warning about skipped lines
fn open_list(path: &Path) -> Result<(ListFile, TaskList), Box<dyn std::error::Error>> {
    let mut file = ListFile::open(path)?;
    let mut list = TaskList::new();
    let report = file.load_into(&mut list)?;
    if !report.dropped.is_empty() {
        eprintln!(
            "warning: skipped {} malformed line(s) in {}, see `tildo recovery {}`",
            report.dropped.len(),
            path.display(),
            path.display()
        );
    }
    Ok((file, list))
}

/// Convert a 1-based task number to an index into `list`
fn resolve_ordinal(list: &TaskList, n: usize) -> Result<usize, String> {
    if n == 0 || n > list.len() {
        return Err(match list.len() {
            0 => format!("no task {}: the list is empty", n),
            1 => format!("no task {}: the list has 1 task", n),
            len => format!("no task {}: the list has {} tasks", n, len),
        });
    }
    Ok(n - 1)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs) -> CliResult {
    let mut list = TaskList::new();
    let report = list_io::load_list(&args.file, &mut list)?;
    if !report.dropped.is_empty() {
        eprintln!(
            "warning: skipped {} malformed line(s) in {}",
            report.dropped.len(),
            args.file.display()
        );
    }

    if args.json {
        let out = TaskListJson {
            file: args.file.display().to_string(),
            tasks: list
                .tasks()
                .iter()
                .enumerate()
                .map(|(i, t)| task_to_json(i, t))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if list.is_empty() {
        println!("(no tasks)");
    } else {
        for (i, task) in list.tasks().iter().enumerate() {
            println!("{}", format_task_line(i, task));
        }
    }
    Ok(())
}

fn cmd_recovery(args: RecoveryArgs) -> CliResult {
    if args.path {
        println!("{}", recovery::recovery_log_path(&args.file).display());
        return Ok(());
    }

    let entries = recovery::read_recovery_entries(&args.file, Some(args.limit.unwrap_or(10)));
    if args.json {
        let out: Vec<RecoveryEntryJson> = entries.iter().map(recovery_entry_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("(no recovery entries)");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", entry.summary_line());
        for (key, value) in &entry.fields {
            println!("    {}: {}", key, value);
        }
        for line in entry.body.lines() {
            println!("    | {}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs) -> CliResult {
    let input = flatten_entry(&args.entry);
    if input.is_empty() {
        return Err("empty entry: nothing to add".into());
    }
    let (mut file, mut list) = open_list(&args.file)?;
    let entry = parse_entry(&input);
    list.append(entry.text, entry.deadline);
    file.save(&list)?;
    let index = list.len() - 1;
    if let Some(task) = list.get(index) {
        println!("{}", format_task_line(index, task));
    }
    Ok(())
}

fn cmd_done(args: OrdinalArgs) -> CliResult {
    let (mut file, mut list) = open_list(&args.file)?;
    let index = resolve_ordinal(&list, args.n)?;
    list.toggle_done(index);
    file.save(&list)?;
    if let Some(task) = list.get(index) {
        println!("{}", format_task_line(index, task));
    }
    Ok(())
}

fn cmd_rm(args: OrdinalArgs) -> CliResult {
    let (mut file, mut list) = open_list(&args.file)?;
    let index = resolve_ordinal(&list, args.n)?;
    if let Some(task) = list.remove_at(index) {
        file.log_deletion(args.n, &task);
        file.save(&list)?;
        println!("removed: {}", format_task_line(index, &task));
    }
    Ok(())
}

fn cmd_mv(args: MvArgs) -> CliResult {
    let (mut file, mut list) = open_list(&args.file)?;
    let a = resolve_ordinal(&list, args.a)?;
    let b = resolve_ordinal(&list, args.b)?;
    if list.swap(a, b) {
        file.save(&list)?;
    }
    for index in [a.min(b), a.max(b)] {
        if let Some(task) = list.get(index) {
            println!("{}", format_task_line(index, task));
        }
        if a == b {
            break;
        }
    }
    Ok(())
}
