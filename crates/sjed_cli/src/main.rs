//! Command-line entry point for the case store.
//!
//! # Responsibility
//! - Open the configured case database and load the store.
//! - Print the dashboard summary, run searches and export CSV.
//! - Save notes through the configured autosave session.
//!
//! Usage: `sjed_cli [summary | search <query> | export <tasks|counsel|settlements>
//! | notes <file|counsel|party|settlement> <id> <text> | version]`

use sjed_core::collab::{export_counsel_csv, export_settlements_csv, export_tasks_csv};
use sjed_core::query::DEFAULT_PRIORITY_LIMIT;
use sjed_core::{
    init_logging_from_config, open_db, CaseStore, CoreConfig, NotesAutosave, NotesTarget,
    SqliteBlobStore, SystemClock,
};
use std::error::Error;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let command = args.first().map(String::as_str).unwrap_or("summary");
    if command == "version" {
        println!("sjed_core version={}", sjed_core::core_version());
        return Ok(());
    }

    let config = CoreConfig::from_env()?;
    if let Err(err) = init_logging_from_config(&config) {
        // Logging is optional for the CLI.
        eprintln!("warning: {err}");
    }

    let conn = open_db(&config.db_path)?;
    let blobs = SqliteBlobStore::new(&conn);
    let mut store = CaseStore::open(blobs, Box::new(SystemClock), config.storage_key.as_str());

    match command {
        "summary" => print_summary(&store),
        "search" => {
            let query = args[1..].join(" ");
            print_search(&store, &query);
        }
        "export" => {
            let data = store.snapshot();
            let csv = match args.get(1).map(String::as_str) {
                Some("tasks") => export_tasks_csv(&data.tasks, &data.counsel)?,
                Some("counsel") => export_counsel_csv(&data.counsel)?,
                Some("settlements") => export_settlements_csv(&data.settlements)?,
                _ => return Err("usage: export <tasks|counsel|settlements>".into()),
            };
            println!("{csv}");
        }
        "notes" => save_notes(&mut store, &config, &args[1..])?,
        other => return Err(format!("unknown command `{other}`").into()),
    }

    store.dispose();
    Ok(())
}

fn save_notes(
    store: &mut CaseStore<SqliteBlobStore<'_>>,
    config: &CoreConfig,
    args: &[String],
) -> Result<(), Box<dyn Error>> {
    let (Some(kind), Some(id)) = (args.first(), args.get(1)) else {
        return Err("usage: notes <file|counsel|party|settlement> <id> <text>".into());
    };
    let id = id.clone();
    let target = match kind.as_str() {
        "file" => NotesTarget::File(id),
        "counsel" => NotesTarget::Counsel(id),
        "party" => NotesTarget::Party(id),
        "settlement" => NotesTarget::Settlement(id),
        other => return Err(format!("unknown notes target `{other}`").into()),
    };
    let text = args[2..].join(" ");

    let mut session = NotesAutosave::from_config(store, target, config);
    session.edit(text, Instant::now());
    if session.finish()? {
        println!("notes saved");
        Ok(())
    } else {
        Err("no such record".into())
    }
}

fn print_summary(store: &CaseStore<SqliteBlobStore<'_>>) {
    let config = store.case_config();
    let tasks = store.task_summary();
    let settlement = store.settlement_summary();

    println!(
        "case {}",
        config.case_number.as_deref().unwrap_or("(no case number)")
    );
    println!(
        "judgment {:.2} + interest {:.2} = {:.2}",
        config.judgment_amount, settlement.interest, settlement.total_owed
    );
    println!(
        "best offer {:.2} ({:.1}% recovery, floor {:.2}, meets floor: {})",
        settlement.best_offer,
        settlement.recovery_percent,
        settlement.floor_amount,
        settlement.meets_floor
    );
    println!(
        "tasks open={} this_week={} done={} completion={}%",
        tasks.open, tasks.this_week, tasks.done, tasks.completion_rate
    );
    for stat in store.jurisdiction_stats() {
        println!(
            "  {} {:<9} open={}/{} files={} progress={}%",
            stat.jurisdiction,
            stat.phase.as_str(),
            stat.open_tasks,
            stat.total_tasks,
            stat.files,
            stat.progress
        );
    }
    println!("priority:");
    for task in store.priority_tasks(DEFAULT_PRIORITY_LIMIT) {
        println!("  [{}] {}", task.status, task.title);
    }
    let overdue = store.overdue_tasks();
    if !overdue.is_empty() {
        println!("overdue:");
        for task in overdue {
            println!("  {} (due {:?})", task.title, task.due_date);
        }
    }
}

fn print_search(store: &CaseStore<SqliteBlobStore<'_>>, query: &str) {
    let results = store.search(query);
    if results.is_empty() {
        println!("no matches for `{query}`");
        return;
    }
    for task in &results.tasks {
        println!("task    {} {}", task.id, task.title);
    }
    for file in &results.files {
        println!("file    {} {}", file.id, file.title);
    }
    for email in &results.emails {
        println!("email   {} {}", email.id, email.subject);
    }
    for party in &results.parties {
        println!("party   {} {}", party.id, party.name);
    }
    for counsel in &results.counsel {
        println!("counsel {} {}", counsel.id, counsel.name);
    }
}
