use anyhow::Result;
use log::info;
use std::io;

use super::{open_store, Console};
use crate::config::Config;
use crate::models::{Expense, Note, Student};
use crate::store::RecordStore;

/// Parsed command line: an optional data directory and the sub-command.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) data_dir: Option<String>,
    pub(crate) command: Option<String>,
}

pub(crate) fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut invocation = Invocation::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data-dir" | "-d" => {
                let dir = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("Usage: ledgerkit --data-dir <dir> <command>"))?;
                invocation.data_dir = Some(dir.clone());
            }
            other if invocation.command.is_none() => invocation.command = Some(other.to_string()),
            other => anyhow::bail!("Unexpected argument: {other}"),
        }
    }
    Ok(invocation)
}

/// `args` excludes the program name.
pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    let invocation = parse_args(args)?;
    let Some(command) = invocation.command.as_deref() else {
        print_usage();
        return Ok(());
    };

    match command {
        "expenses" | "e" => cli_expenses(invocation.data_dir.as_deref()),
        "notes" | "n" => cli_notes(invocation.data_dir.as_deref()),
        "students" | "s" => cli_students(invocation.data_dir.as_deref()),
        "password" | "p" => cli_password(),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("ledgerkit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Ledgerkit: small record keepers for the terminal");
    println!();
    println!("Usage: ledgerkit [--data-dir <dir>] <command>");
    println!();
    println!("Commands:");
    println!("  expenses, e                   Expense tracker (expenses.csv)");
    println!("  notes, n                      Personal diary (notes.txt)");
    println!("  students, s                   Student records (students.txt)");
    println!("  password, p                   Password strength checker");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --data-dir, -d <dir>          Directory holding the data files");
    println!("                                (default: platform data directory)");
}

fn open_config(data_dir: Option<&str>) -> Result<Config> {
    let config = Config::resolve(data_dir)?;
    info!("Data directory: {}", config.data_dir().display());
    Ok(config)
}

fn cli_expenses(data_dir: Option<&str>) -> Result<()> {
    let config = open_config(data_dir)?;
    let mut console = Console::new(io::stdin().lock(), io::stdout());
    let mut store: RecordStore<Expense> = open_store(config.expenses_path(), &mut console)?;
    info!(
        "Expense tracker started with {} expenses from {}",
        store.len(),
        store.path().display()
    );
    super::expenses::run(&mut store, &mut console)
}

fn cli_notes(data_dir: Option<&str>) -> Result<()> {
    let config = open_config(data_dir)?;
    let mut console = Console::new(io::stdin().lock(), io::stdout());
    let mut store: RecordStore<Note> = open_store(config.notes_path(), &mut console)?;
    info!(
        "Diary started with {} notes from {}",
        store.len(),
        store.path().display()
    );
    super::notes::run(&mut store, &mut console)
}

fn cli_students(data_dir: Option<&str>) -> Result<()> {
    let config = open_config(data_dir)?;
    let mut console = Console::new(io::stdin().lock(), io::stdout());
    let mut store: RecordStore<Student> = open_store(config.students_path(), &mut console)?;
    info!(
        "Student records started with {} students from {}",
        store.len(),
        store.path().display()
    );
    super::students::run(&mut store, &mut console)
}

fn cli_password() -> Result<()> {
    let mut console = Console::new(io::stdin().lock(), io::stdout());
    if !super::password::run(&mut console)? {
        info!("Input closed before a strong password was entered");
    }
    Ok(())
}
