#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::calendar::render_month;
use super::util::*;

// ── truncate / preview ────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

#[test]
fn test_preview_flattens_lines() {
    assert_eq!(preview("first line\nsecond\tline", 40), "first line second line");
}

#[test]
fn test_preview_truncates() {
    let long = "word ".repeat(20);
    let p = preview(&long, 40);
    assert_eq!(p.chars().count(), 40);
    assert!(p.ends_with('…'));
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn test_format_amount_pads_decimals() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

// ── new_table ─────────────────────────────────────────────────

#[test]
fn test_table_contains_header_and_rows() {
    let mut table = new_table(vec!["ID", "Title"]);
    table.add_row(vec!["1".to_string(), "Groceries".to_string()]);
    let rendered = table.to_string();
    assert!(rendered.contains("ID"));
    assert!(rendered.contains("Title"));
    assert!(rendered.contains("Groceries"));
}

// ── render_month ──────────────────────────────────────────────

#[test]
fn test_render_month_starting_monday() {
    // 1 January 2024 was a Monday.
    let cal = render_month(2024, 1).unwrap();
    let lines: Vec<&str> = cal.lines().collect();
    assert_eq!(lines[0], "    January 2024");
    assert_eq!(lines[1], "Mo Tu We Th Fr Sa Su");
    assert_eq!(lines[2], " 1  2  3  4  5  6  7");
    assert_eq!(lines.last().copied(), Some("29 30 31"));
    assert_eq!(lines.len(), 7);
}

#[test]
fn test_render_month_leading_blanks() {
    // 1 February 2024 was a Thursday.
    let cal = render_month(2024, 2).unwrap();
    let lines: Vec<&str> = cal.lines().collect();
    assert_eq!(lines[2], "          1  2  3  4");
    assert_eq!(lines.last().copied(), Some("26 27 28 29"));
}

#[test]
fn test_render_month_invalid() {
    assert!(render_month(2024, 0).is_none());
    assert!(render_month(2024, 13).is_none());
}
