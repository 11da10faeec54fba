mod cli;
mod expenses;
mod notes;
mod password;
mod prompt;
mod students;

use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::store::{Record, RecordStore};
use crate::ui::theme;

pub(crate) use cli::as_cli;
pub(crate) use prompt::{Console, Reply};

/// Whether a menu loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Open a store for an interactive session. A file that fails to load is
/// reported and the session carries on with an empty list that is never
/// saved, so the file stays as it was.
pub(crate) fn open_store<R: Record, I: BufRead, W: Write>(
    path: PathBuf,
    console: &mut Console<I, W>,
) -> io::Result<RecordStore<R>> {
    match RecordStore::open(&path) {
        Ok(store) => Ok(store),
        Err(e) => {
            warn!("Could not load {}: {e}", path.display());
            console.say(theme::error(format!(
                "❌ Error loading {}: {e}",
                path.display()
            )))?;
            console.say(theme::notice(
                "Starting with an empty list. Changes will not be saved until the file is fixed.",
            ))?;
            Ok(RecordStore::locked(path))
        }
    }
}

/// Print a menu block: heading, then one numbered line per option.
fn print_menu<I: BufRead, W: Write>(
    console: &mut Console<I, W>,
    title: &str,
    options: &[&str],
) -> io::Result<()> {
    console.say("")?;
    console.say(theme::heading(title))?;
    for (i, option) in options.iter().enumerate() {
        console.say(format!("{}. {option}", i + 1))?;
    }
    Ok(())
}

/// Map a menu choice to a 1-based option number.
fn choice_number(choice: &str, options: usize) -> Option<usize> {
    choice
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=options).contains(n))
}
