use chrono::{Datelike, Month, Months, NaiveDate};

const WIDTH: usize = 20;

/// Render a month as a text grid, weeks starting on Monday:
///
/// ```text
///     January 2024
/// Mo Tu We Th Fr Sa Su
///  1  2  3  4  5  6  7
///  8  9 10 11 12 13 14
/// ```
///
/// `None` when `month` is outside 1..=12 or the year is out of range.
pub(crate) fn render_month(year: i32, month: u32) -> Option<String> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    let name = Month::try_from(u8::try_from(month).ok()?).ok()?.name();

    let mut lines = vec![
        format!("{:^WIDTH$}", format!("{name} {year}")).trim_end().to_string(),
        "Mo Tu We Th Fr Sa Su".to_string(),
    ];

    let lead = first.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<String> = vec!["  ".to_string(); lead];
    cells.extend((1..=last.day()).map(|d| format!("{d:>2}")));

    for week in cells.chunks(7) {
        lines.push(week.join(" ").trim_end().to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Some(out)
}
