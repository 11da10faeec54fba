use anyhow::Result;
use comfy_table::{Cell, CellAlignment};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

use super::{choice_number, print_menu, Console, Flow, Reply};
use crate::models::Expense;
use crate::store::RecordStore;
use crate::ui::theme;
use crate::ui::util::{format_amount, new_table};

const MENU: &[&str] = &["Add Expense", "View Expenses", "Monthly Summary", "Exit"];

pub(crate) fn run<I: BufRead, W: Write>(
    store: &mut RecordStore<Expense>,
    console: &mut Console<I, W>,
) -> Result<()> {
    loop {
        print_menu(console, "==== Expense Tracker ====", MENU)?;
        let Some(choice) = console.ask("Choose an option: ")? else {
            break;
        };
        let flow = match choice_number(&choice, MENU.len()) {
            Some(1) => add(store, console)?,
            Some(2) => view(store, console)?,
            Some(3) => summary(store, console)?,
            Some(_) => {
                console.say(theme::success("Exiting Expense Tracker... Goodbye!"))?;
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
    store: &mut RecordStore<Expense>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    let Some(name) = console.ask("Enter expense name: ")? else {
        return Ok(Flow::Exit);
    };
    let amount = match console.ask_parsed::<Decimal>("Enter amount: ")? {
        Reply::Value(amount) => amount,
        Reply::Invalid(_) => {
            console.say(theme::error("❌ Invalid amount. Try again."))?;
            return Ok(Flow::Continue);
        }
        Reply::Closed => return Ok(Flow::Exit),
    };
    let Some(category) = console.ask("Enter category: ")? else {
        return Ok(Flow::Exit);
    };

    let expense = match Expense::new(name, amount, category, None) {
        Ok(expense) => expense,
        Err(e) => {
            console.say(theme::error(format!("❌ Error: {e}")))?;
            return Ok(Flow::Continue);
        }
    };
    match store.add(expense) {
        Ok(()) => console.say(theme::success("✅ Expense added successfully!"))?,
        Err(e) => console.say(theme::error(format!("❌ Error: {e}")))?,
    }
    Ok(Flow::Continue)
}

fn view<I: BufRead, W: Write>(
    store: &RecordStore<Expense>,
    console: &mut Console<I, W>,
) -> Result<Flow> {
    if store.is_empty() {
        console.say(theme::notice("No expenses recorded yet."))?;
        return Ok(Flow::Continue);
    }
    console.say(theme::heading("\n--- All Expenses ---"))?;
    for expense in store.records() {
        console.say(expense)?;
    }
    Ok(Flow::Continue)
}

fn summary<I: BufRead, W: Write>(
    store: &RecordStore<Expense>,
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

    if store.is_empty() {
        console.say(theme::notice("No expenses available for summary."))?;
        return Ok(Flow::Continue);
    }
    let summary = match store.monthly_summary(year, month) {
        Ok(Some(summary)) => summary,
        Ok(None) => {
            console.say(theme::notice(format!("No expenses for {month}/{year}.")))?;
            return Ok(Flow::Continue);
        }
        Err(e) => {
            console.say(theme::error(format!("❌ Error: {e}")))?;
            return Ok(Flow::Continue);
        }
    };

    console.say(theme::heading(format!(
        "\n--- Monthly Summary ({month}/{year}) ---"
    )))?;
    console.say(format!(
        "Total Spending: {} across {} expenses",
        format_amount(summary.total),
        summary.count
    ))?;
    console.say("\nSpending by Category:")?;
    let mut table = new_table(vec!["Category", "Amount"]);
    for (category, amount) in &summary.by_category {
        table.add_row(vec![
            Cell::new(category),
            Cell::new(format_amount(*amount)).set_alignment(CellAlignment::Right),
        ]);
    }
    console.say(table)?;
    Ok(Flow::Continue)
}
