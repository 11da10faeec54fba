use anyhow::Result;
use std::io::{BufRead, Write};

use super::{choice_number, print_menu, Console, Flow, Reply};
use crate::models::Note;
use crate::store::{RecordStore, StoreError};
use crate::ui::calendar::render_month;
use crate::ui::theme;
use crate::ui::util::{new_table, preview};

const MENU: &[&str] = &[
    "Add Note",
    "View Notes",
    "Search Note",
    "Delete Note",
    "Calendar View",
    "Analyze Notes",
    "Exit",
];

pub(crate) fn run<I: BufRead, W: Write>(
    store: &mut RecordStore<Note>,
    console: &mut Console<I, W>,
) -> Result<()> {
    loop {
        print_menu(console, "📓 ==== Personal Diary Menu ====", MENU)?;
        let Some(choice) = console.ask("Choose an option: ")? else {
            break;
        };
        let flow = match choice_number(&choice, MENU.len()) {
            Some(1) => add(store, console)?,
            Some(2) => view(store, console)?,
            Some(3) => search(store, console)?,
            Some(4) => delete(store, console)?,
            Some(5) => calendar(store, console)?,
            Some(6) => analyze(store, console)?,
            Some(_) => {
                console.say(theme::success("Exiting Diary... Goodbye!"))?;
                Flow::Exit
            }
            None => {
                console.say(theme::error("❌ Invalid option. Try again."))?;
                Flow::Continue
            }
        };
        if flow == Flow::Exit {
            break;
        }
    }
    Ok(())
}

fn add<I: BufRead, W: Write>(
    store: &mut RecordStore<Note>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    let Some(title) = console.ask("Enter title: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(content) = console.ask("Enter content: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(category) = console.ask("Enter category: ")? else {
        return Ok(Flow::Exit);
    };

    let note = match Note::new(title, content, category, None) {
        Ok(note) => note,
        Err(e) => {
            console.say(theme::error(format!("❌ Error: {e}")))?;
            return Ok(Flow::Continue);
        }
    };
    match store.add(note) {
        Ok(()) => console.say(theme::success("✅ Note added successfully!"))?,
        Err(e) => console.say(theme::error(format!("❌ Error: {e}")))?,
    }
    Ok(Flow::Continue)
}

fn view<I: BufRead, W: Write>(
    store: &RecordStore<Note>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    if store.is_empty() {
        console.say(theme::notice("No notes found!"))?;
        return Ok(Flow::Continue);
    }
    let mut table = new_table(vec!["ID", "Date", "Title", "Category", "Preview"]);
    for (i, note) in store.records().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            note.date().to_string(),
            note.title().to_string(),
            note.category().to_string(),
            preview(note.content(), 40),
        ]);
    }
    console.say(theme::heading("\n--- All Notes ---"))?;
    console.say(table)?;
    Ok(Flow::Continue)
}

fn search<I: BufRead, W: Write>(
    store: &RecordStore<Note>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    let Some(keyword) = console.ask("Enter keyword to search: ")? else {
        return Ok(Flow::Exit);
    };
    let results = store.search(&keyword);
    if results.is_empty() {
        console.say(theme::notice(format!("No notes found with '{keyword}'")))?;
        return Ok(Flow::Continue);
    }
    let mut table = new_table(vec!["Date", "Title", "Category", "Preview"]);
    for note in results {
        table.add_row(vec![
            note.date().to_string(),
            note.title().to_string(),
            note.category().to_string(),
            preview(note.content(), 50),
        ]);
    }
    console.say(theme::heading(format!(
        "\n--- Search Results for '{keyword}' ---"
    )))?;
    console.say(table)?;
    Ok(Flow::Continue)
}

fn delete<I: BufRead, W: Write>(
    store: &mut RecordStore<Note>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    let id = match console.ask_parsed::<usize>("Enter note ID to delete: ")? {
        Reply::Value(id) => id,
        Reply::Invalid(_) => {
            console.say(theme::error("❌ Invalid input. Please enter a number."))?;
            return Ok(Flow::Continue);
        }
        Reply::Closed => return Ok(Flow::Exit),
    };
    match store.delete(id) {
        Ok(note) => console.say(theme::success(format!("✅ Deleted note: {}", note.title())))?,
        Err(StoreError::InvalidId { .. }) => console.say(theme::error("❌ Invalid note ID."))?,
        Err(e) => console.say(theme::error(format!("❌ Error: {e}")))?,
    }
    Ok(Flow::Continue)
}

fn calendar<I: BufRead, W: Write>(
    store: &RecordStore<Note>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    let (year, month) = match console.ask_year_month()? {
        Reply::Value(ym) => ym,
        Reply::Invalid(_) => {
            console.say(theme::error("❌ Invalid input for year/month."))?;
            return Ok(Flow::Continue);
        }
        Reply::Closed => return Ok(Flow::Exit),
    };
    let Some(grid) = render_month(year, month) else {
        console.say(theme::error("❌ Invalid input for year/month."))?;
        return Ok(Flow::Continue);
    };

    console.say(theme::calendar(format!("\n--- Calendar ({month}/{year}) ---")))?;
    console.say(grid)?;
    let days = store.days_with_notes(year, month);
    if !days.is_empty() {
        console.say(theme::success(format!("📌 Notes exist on days: {days:?}")))?;
    }
    Ok(Flow::Continue)
}

fn analyze<I: BufRead, W: Write>(
    store: &RecordStore<Note>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    let Some(analysis) = store.analyze() else {
        console.say(theme::notice("No notes to analyze!"))?;
        return Ok(Flow::Continue);
    };

    console.say(theme::heading("\n--- Notes Analysis ---"))?;
    console.say("📊 Notes per Category:")?;
    let mut table = new_table(vec!["Category", "Notes"]);
    for (category, count) in &analysis.per_category {
        table.add_row(vec![category.clone(), count.to_string()]);
    }
    console.say(table)?;

    let (date, count) = analysis.busiest_day;
    console.say(format!("\n📅 Busiest Day: {date} ({count} notes)"))?;
    Ok(Flow::Continue)
}
