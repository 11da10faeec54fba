use anyhow::Result;
use std::io::{BufRead, Write};

use super::{choice_number, print_menu, Console, Flow, Reply};
use crate::models::{Student, StudentPatch};
use crate::store::{RecordStore, StoreError};
use crate::ui::calendar::render_month;
use crate::ui::theme;
use crate::ui::util::new_table;

const MENU: &[&str] = &[
    "Add Student",
    "View Students",
    "Update Student",
    "Delete Student",
    "Analyze Students",
    "Calendar View",
    "Exit",
];

pub(crate) fn run<I: BufRead, W: Write>(
    store: &mut RecordStore<Student>,
    console: &mut Console<I, W>,
) -> Result<()> {
    loop {
        print_menu(console, "🎓 ==== Student Management System ====", MENU)?;
        let Some(choice) = console.ask("Choose an option: ")? else {
            break;
        };
        let flow = match choice_number(&choice, MENU.len()) {
            Some(1) => add(store, console)?,
            Some(2) => view(store, console)?,
            Some(3) => update(store, console)?,
            Some(4) => delete(store, console)?,
            Some(5) => analyze(store, console)?,
            Some(6) => calendar(console)?,
            Some(_) => {
                console.say(theme::success(
                    "👋 Exiting Student Management System. Goodbye!",
                ))?;
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
    store: &mut RecordStore<Student>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    let Some(name) = console.ask("Enter name: ")? else {
        return Ok(Flow::Exit);
    };
    let mut numbers = [0i64; 2];
    for (slot, label) in numbers
        .iter_mut()
        .zip(["Enter age: ", "Enter grade (0-100): "])
    {
        match console.ask_parsed::<i64>(label)? {
            Reply::Value(n) => *slot = n,
            Reply::Invalid(_) => {
                console.say(theme::error("❌ Invalid number input."))?;
                return Ok(Flow::Continue);
            }
            Reply::Closed => return Ok(Flow::Exit),
        }
    }
    let [age, grade] = numbers;
    let Some(city) = console.ask("Enter city: ")? else {
        return Ok(Flow::Exit);
    };

    let student = match Student::new(name, age, grade, city, None) {
        Ok(student) => student,
        Err(e) => {
            console.say(theme::error(format!("❌ Error: {e}")))?;
            return Ok(Flow::Continue);
        }
    };
    match store.add(student) {
        Ok(()) => console.say(theme::success("✅ Student added successfully!"))?,
        Err(e) => console.say(theme::error(format!("❌ Error: {e}")))?,
    }
    Ok(Flow::Continue)
}

fn view<I: BufRead, W: Write>(
    store: &RecordStore<Student>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    if store.is_empty() {
        console.say(theme::notice("No students available."))?;
        return Ok(Flow::Continue);
    }
    console.say(theme::heading("\n--- Student Records ---"))?;
    for (i, student) in store.records().iter().enumerate() {
        console.say(format!("{}. {student}", i + 1))?;
    }
    Ok(Flow::Continue)
}

fn update<I: BufRead, W: Write>(
    store: &mut RecordStore<Student>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    let id = match console.ask_parsed::<usize>("Enter student ID to update: ")? {
        Reply::Value(id) => id,
        Reply::Invalid(_) => {
            console.say(theme::error("❌ Invalid input."))?;
            return Ok(Flow::Continue);
        }
        Reply::Closed => return Ok(Flow::Exit),
    };

    let Some(name) = console.ask_optional("Enter new name (leave blank to skip): ")? else {
        return Ok(Flow::Exit);
    };
    let mut numbers: [Option<i64>; 2] = [None, None];
    for (slot, label) in numbers.iter_mut().zip([
        "Enter new age (leave blank to skip): ",
        "Enter new grade (leave blank to skip): ",
    ]) {
        let Some(raw) = console.ask_optional(label)? else {
            return Ok(Flow::Exit);
        };
        if let Some(raw) = raw {
            match raw.trim().parse::<i64>() {
                Ok(n) => *slot = Some(n),
                Err(_) => {
                    console.say(theme::error("❌ Invalid input."))?;
                    return Ok(Flow::Continue);
                }
            }
        }
    }
    let [age, grade] = numbers;
    let Some(city) = console.ask_optional("Enter new city (leave blank to skip): ")? else {
        return Ok(Flow::Exit);
    };

    let patch = StudentPatch {
        name,
        age,
        grade,
        city,
    };
    match store.update(id, &patch) {
        Ok(_) if patch.is_empty() => console.say(theme::notice("Nothing to change."))?,
        Ok(student) => {
            let line = format!("✅ Student updated successfully! {student}");
            console.say(theme::success(line))?;
        }
        Err(StoreError::InvalidId { .. }) => console.say(theme::error("❌ Invalid student ID."))?,
        Err(e) => console.say(theme::error(format!("❌ Error: {e}")))?,
    }
    Ok(Flow::Continue)
}

fn delete<I: BufRead, W: Write>(
    store: &mut RecordStore<Student>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    let id = match console.ask_parsed::<usize>("Enter student ID to delete: ")? {
        Reply::Value(id) => id,
        Reply::Invalid(_) => {
            console.say(theme::error("❌ Invalid input."))?;
            return Ok(Flow::Continue);
        }
        Reply::Closed => return Ok(Flow::Exit),
    };
    match store.delete(id) {
        Ok(student) => console.say(theme::success(format!(
            "✅ Deleted student: {}",
            student.name()
        )))?,
        Err(StoreError::InvalidId { .. }) => console.say(theme::error("❌ Invalid student ID."))?,
        Err(e) => console.say(theme::error(format!("❌ Error: {e}")))?,
    }
    Ok(Flow::Continue)
}

fn analyze<I: BufRead, W: Write>(
    store: &RecordStore<Student>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    let Some(analysis) = store.analyze() else {
        console.say(theme::notice("No students to analyze."))?;
        return Ok(Flow::Continue);
    };

    console.say(theme::heading("\n--- Student Analysis ---"))?;
    console.say(format!("📊 Average Age: {}", analysis.average_age))?;
    console.say(format!("📊 Average Grade: {}", analysis.average_grade))?;

    console.say("\n📊 Students by City:")?;
    let mut table = new_table(vec!["City", "Students"]);
    for (city, count) in &analysis.by_city {
        table.add_row(vec![city.clone(), count.to_string()]);
    }
    console.say(table)?;

    console.say("\n📊 Students Pass vs Fail:")?;
    console.say(format!("Pass: {}", analysis.passed))?;
    console.say(format!("Fail: {}", analysis.failed))?;
    Ok(Flow::Continue)
}

fn calendar<I: BufRead, W: Write>(console: &mut Console<I, W>) -> Result<Flow> {
    let grid = match console.ask_year_month()? {
        Reply::Value((year, month)) => render_month(year, month).map(|g| (year, month, g)),
        Reply::Invalid(_) => None,
        Reply::Closed => return Ok(Flow::Exit),
    };
    match grid {
        Some((year, month, grid)) => {
            console.say(theme::calendar(format!("\n--- Calendar ({month}/{year}) ---")))?;
            console.say(grid)?;
        }
        None => console.say(theme::error("❌ Invalid input for year/month."))?,
    }
    Ok(Flow::Continue)
}
