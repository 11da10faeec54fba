#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{Expense, Note, Student, StudentPatch, ValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(name: &str, amount: Decimal, category: &str, date: NaiveDate) -> Expense {
    Expense::new(name, amount, category, Some(date)).unwrap()
}

fn note(title: &str, content: &str, category: &str, date: NaiveDate) -> Note {
    Note::new(title, content, category, Some(date)).unwrap()
}

fn student(name: &str, age: i64, grade: i64, city: &str) -> Student {
    Student::new(name, age, grade, city, Some(day(2023, 9, 1))).unwrap()
}

fn setup_students(dir: &tempfile::TempDir) -> RecordStore<Student> {
    let mut store = RecordStore::open(dir.path().join("students.txt")).unwrap();
    store.add(student("Alice", 20, 85, "Paris")).unwrap();
    store.add(student("Bob", 22, 35, "Rome")).unwrap();
    store.add(student("Carol", 21, 60, "Paris")).unwrap();
    store
}

// ── Open / load ───────────────────────────────────────────────

#[test]
fn test_open_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store: RecordStore<Expense> = RecordStore::open(dir.path().join("expenses.csv")).unwrap();
    assert!(store.is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_load_plain_expense_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    fs::write(&path, "Coffee,4.5,Food,2024-01-15\nBus,2.75,Transport,2024-01-16\n").unwrap();

    let store: RecordStore<Expense> = RecordStore::open(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0].name(), "Coffee");
    assert_eq!(store.records()[0].amount(), dec!(4.5));
    assert_eq!(store.records()[1].date(), day(2024, 1, 16));
}

#[test]
fn test_load_plain_note_and_student_files() {
    let dir = tempfile::tempdir().unwrap();
    let notes_path = dir.path().join("notes.txt");
    fs::write(&notes_path, "Trip|Packed bags, passport|Travel|2024-07-04\n").unwrap();
    let notes: RecordStore<Note> = RecordStore::open(&notes_path).unwrap();
    assert_eq!(notes.records()[0].content(), "Packed bags, passport");

    let students_path = dir.path().join("students.txt");
    fs::write(&students_path, "Alice|20|85|Paris|2023-09-01\n").unwrap();
    let students: RecordStore<Student> = RecordStore::open(&students_path).unwrap();
    assert_eq!(students.records()[0], student("Alice", 20, 85, "Paris"));
}

#[test]
fn test_load_exponent_amount() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    fs::write(&path, "Tiny,1e-05,Misc,2024-01-15\n").unwrap();
    let store: RecordStore<Expense> = RecordStore::open(&path).unwrap();
    assert_eq!(store.records()[0].amount(), dec!(0.00001));
}

#[test]
fn test_malformed_expense_line_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    fs::write(
        &path,
        "Coffee,4.5,Food,2024-01-15\nBroken,abc,Food,2024-01-16\nTea,3,Food,2024-01-17\n",
    )
    .unwrap();

    let err = RecordStore::<Expense>::open(&path).unwrap_err();
    match err {
        StoreError::Parse { line, reason } => {
            assert_eq!(line, 2);
            assert_eq!(
                reason,
                FieldError::InvalidValue {
                    field: "amount",
                    value: "abc".into()
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_note_line_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "Good|content|Misc|2024-01-01\nonly|three|fields\n").unwrap();

    let err = RecordStore::<Note>::open(&path).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Parse {
            line: 2,
            reason: FieldError::FieldCount {
                expected: 4,
                found: 3
            }
        }
    ));
}

#[test]
fn test_invalid_student_line_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.txt");
    fs::write(&path, "Alice|20|85|Paris|2023-09-01\nBob|20|150|Rome|2023-09-01\n").unwrap();

    let err = RecordStore::<Student>::open(&path).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Parse {
            line: 2,
            reason: FieldError::Validation(ValidationError::GradeOutOfRange)
        }
    ));
    assert!(err.to_string().contains("Grade must be between 0 and 100!"));
}

#[test]
fn test_failed_reload_keeps_records_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = setup_students(&dir);
    fs::write(store.path(), "garbage line without delimiters\n").unwrap();

    assert!(store.load().is_err());
    assert_eq!(store.len(), 3);
}

#[test]
fn test_bad_date_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    fs::write(&path, "Coffee,4.5,Food,15/01/2024\n").unwrap();
    let err = RecordStore::<Expense>::open(&path).unwrap_err();
    assert_eq!(err.to_string(), "line 1: invalid date '15/01/2024'");
}

#[test]
fn test_legacy_quote_at_field_start_kept_literally() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "Quote|\"To be\" said Hamlet|lit|2024-01-01\n").unwrap();

    let mut store = RecordStore::<Note>::open(&path).unwrap();
    assert_eq!(store.records()[0].content(), "\"To be\" said Hamlet");

    // A save quotes the field properly and the next load reads it back as-is.
    store.add(note("Next", "plain", "misc", day(2024, 1, 2))).unwrap();
    let reopened = RecordStore::<Note>::open(&path).unwrap();
    assert_eq!(reopened.records(), store.records());
}

#[test]
fn test_legacy_unclosed_quote_does_not_swallow_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(
        &path,
        "Q|\"open quote never closed|lit|2024-01-01\nNext|plain|misc|2024-01-02\n",
    )
    .unwrap();

    let store = RecordStore::<Note>::open(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0].content(), "\"open quote never closed");
    assert_eq!(store.records()[1].title(), "Next");
}

#[test]
fn test_line_numbers_survive_literal_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(
        &path,
        "A|\"multi\nline\"|x|2024-01-01\nQ|\"open|lit|2024-01-02\nbad|line\n",
    )
    .unwrap();

    let err = RecordStore::<Note>::open(&path).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Parse {
            line: 4,
            reason: FieldError::FieldCount {
                expected: 4,
                found: 2
            }
        }
    ));
}

#[test]
fn test_load_crlf_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    fs::write(&path, "Coffee,4.5,Food,2024-01-15\r\nTea,3,Food,2024-01-16\r\n").unwrap();

    let store = RecordStore::<Expense>::open(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[1].date(), day(2024, 1, 16));
}

#[test]
fn test_locked_store_never_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    fs::write(&path, "Coffee,4.5,Food,2024-01-15\nBroken,abc,Food,2024-01-16\n").unwrap();

    let mut store: RecordStore<Expense> = RecordStore::locked(&path);
    let err = store
        .add(expense("Tea", dec!(3), "Food", day(2024, 1, 17)))
        .unwrap_err();
    assert!(matches!(err, StoreError::Unsaved { .. }));
    assert!(store.is_empty());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Coffee,4.5,Food,2024-01-15\nBroken,abc,Food,2024-01-16\n"
    );
}

// ── Save / round-trip ─────────────────────────────────────────

#[test]
fn test_save_writes_plain_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    let mut store: RecordStore<Expense> = RecordStore::open(&path).unwrap();
    store
        .add(expense("Coffee", dec!(4.50), "Food", day(2024, 1, 15)))
        .unwrap();
    store
        .add(expense("Rent", dec!(1200), "Housing", day(2024, 1, 1)))
        .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "Coffee,4.50,Food,2024-01-15\nRent,1200,Housing,2024-01-01\n");
}

#[test]
fn test_roundtrip_each_record_type() {
    let dir = tempfile::tempdir().unwrap();

    let exp = expense("Coffee", dec!(4.567), "Food", day(2024, 1, 15));
    let mut expenses: RecordStore<Expense> = RecordStore::open(dir.path().join("expenses.csv")).unwrap();
    expenses.add(exp.clone()).unwrap();
    let reopened: RecordStore<Expense> = RecordStore::open(expenses.path()).unwrap();
    assert_eq!(reopened.records(), &[exp]);

    let n = note("Plan", "Write tests", "Work", day(2024, 2, 2));
    let mut notes: RecordStore<Note> = RecordStore::open(dir.path().join("notes.txt")).unwrap();
    notes.add(n.clone()).unwrap();
    let reopened: RecordStore<Note> = RecordStore::open(notes.path()).unwrap();
    assert_eq!(reopened.records(), &[n]);

    let s = student("Alice", 20, 85, "Paris");
    let mut students: RecordStore<Student> = RecordStore::open(dir.path().join("students.txt")).unwrap();
    students.add(s.clone()).unwrap();
    let reopened: RecordStore<Student> = RecordStore::open(students.path()).unwrap();
    assert_eq!(reopened.records(), &[s]);
}

#[test]
fn test_roundtrip_embedded_delimiters() {
    let dir = tempfile::tempdir().unwrap();

    let n = note(
        "a|b",
        "pipes | inside, and \"quotes\"\nand a second line",
        "x|y",
        day(2024, 2, 2),
    );
    let mut notes: RecordStore<Note> = RecordStore::open(dir.path().join("notes.txt")).unwrap();
    notes.add(n.clone()).unwrap();
    let reopened: RecordStore<Note> = RecordStore::open(notes.path()).unwrap();
    assert_eq!(reopened.records(), &[n]);

    let exp = expense("Dinner, with friends", dec!(80), "Food,Fun", day(2024, 1, 5));
    let mut expenses: RecordStore<Expense> = RecordStore::open(dir.path().join("expenses.csv")).unwrap();
    expenses.add(exp.clone()).unwrap();
    let reopened: RecordStore<Expense> = RecordStore::open(expenses.path()).unwrap();
    assert_eq!(reopened.records(), &[exp]);
}

// ── Add / get / delete ────────────────────────────────────────

#[test]
fn test_add_appends_last() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = setup_students(&dir);
    store.add(student("Dave", 19, 70, "Oslo")).unwrap();
    assert_eq!(store.len(), 4);
    assert_eq!(store.records().last().unwrap().name(), "Dave");
    assert_eq!(store.get(4).unwrap().name(), "Dave");
}

#[test]
fn test_delete_removes_exact_position() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = setup_students(&dir);
    let removed = store.delete(2).unwrap();
    assert_eq!(removed.name(), "Bob");

    let names: Vec<&str> = store.records().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Alice", "Carol"]);

    let reopened: RecordStore<Student> = RecordStore::open(store.path()).unwrap();
    assert_eq!(reopened.records(), store.records());
}

#[test]
fn test_delete_invalid_id_leaves_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = setup_students(&dir);
    let before = fs::read_to_string(store.path()).unwrap();

    for id in [0, 4, 100] {
        let err = store.delete(id).unwrap_err();
        assert!(matches!(err, StoreError::InvalidId { len: 3, .. }));
    }
    assert_eq!(store.len(), 3);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn test_delete_last_record_empties_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store: RecordStore<Note> = RecordStore::open(dir.path().join("notes.txt")).unwrap();
    store.add(note("Only", "one", "Misc", day(2024, 1, 1))).unwrap();
    store.delete(1).unwrap();
    assert!(store.is_empty());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
}

#[test]
fn test_add_to_unwritable_path_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = RecordStore::empty(dir.path().join("missing-dir").join("notes.txt"));
    let err = store.add(note("T", "c", "x", day(2024, 1, 1))).unwrap_err();
    assert!(matches!(err, StoreError::Csv { .. } | StoreError::Io { .. }));
    assert!(store.is_empty());
}

// ── Student update ────────────────────────────────────────────

#[test]
fn test_update_changes_only_supplied_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = setup_students(&dir);
    let patch = StudentPatch {
        city: Some("  Lyon ".into()),
        ..StudentPatch::default()
    };
    let updated = store.update(1, &patch).unwrap();
    assert_eq!(updated.city(), "Lyon");
    assert_eq!(updated.name(), "Alice");
    assert_eq!(updated.grade(), 85);

    let reopened: RecordStore<Student> = RecordStore::open(store.path()).unwrap();
    assert_eq!(reopened.records()[0].city(), "Lyon");
    assert_eq!(reopened.records()[1], student("Bob", 22, 35, "Rome"));
}

#[test]
fn test_update_invalid_value_rejects_whole_patch() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = setup_students(&dir);
    let before = fs::read_to_string(store.path()).unwrap();
    let patch = StudentPatch {
        name: Some("Alicia".into()),
        grade: Some(101),
        ..StudentPatch::default()
    };

    let err = store.update(1, &patch).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::GradeOutOfRange)
    ));
    assert_eq!(store.records()[0].name(), "Alice");
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn test_update_invalid_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = setup_students(&dir);
    let err = store.update(9, &StudentPatch::default()).unwrap_err();
    assert!(matches!(err, StoreError::InvalidId { id: 9, len: 3 }));
}

// ── Month filtering and summaries ─────────────────────────────

#[test]
fn test_in_month() {
    let dir = tempfile::tempdir().unwrap();
    let mut store: RecordStore<Expense> = RecordStore::open(dir.path().join("expenses.csv")).unwrap();
    store.add(expense("A", dec!(1), "x", day(2024, 1, 31))).unwrap();
    store.add(expense("B", dec!(2), "x", day(2024, 2, 1))).unwrap();
    store.add(expense("C", dec!(3), "x", day(2023, 1, 10))).unwrap();
    store.add(expense("D", dec!(4), "x", day(2024, 1, 1))).unwrap();

    let names: Vec<&str> = store.in_month(2024, 1).iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["A", "D"]);
}

#[test]
fn test_monthly_summary() {
    let dir = tempfile::tempdir().unwrap();
    let mut store: RecordStore<Expense> = RecordStore::open(dir.path().join("expenses.csv")).unwrap();
    store.add(expense("Coffee", dec!(4.50), "Food", day(2024, 1, 3))).unwrap();
    store.add(expense("Bus", dec!(2.75), "Transport", day(2024, 1, 4))).unwrap();
    store.add(expense("Lunch", dec!(12.25), "Food", day(2024, 1, 9))).unwrap();
    store.add(expense("Hotel", dec!(300), "Travel", day(2024, 2, 1))).unwrap();

    let summary = store.monthly_summary(2024, 1).unwrap().unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.total, dec!(19.50));
    assert_eq!(
        summary.by_category,
        vec![
            ("Food".to_string(), dec!(16.75)),
            ("Transport".to_string(), dec!(2.75)),
        ]
    );
}

#[test]
fn test_monthly_summary_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let mut store: RecordStore<Expense> = RecordStore::open(dir.path().join("expenses.csv")).unwrap();
    assert!(store.monthly_summary(2024, 1).unwrap().is_none());

    store.add(expense("Coffee", dec!(4.50), "Food", day(2024, 1, 3))).unwrap();
    assert!(store.monthly_summary(2024, 3).unwrap().is_none());
}

#[test]
fn test_monthly_summary_total_overflow() {
    let dir = tempfile::tempdir().unwrap();
    let mut store: RecordStore<Expense> = RecordStore::open(dir.path().join("expenses.csv")).unwrap();
    store.add(expense("Yacht", Decimal::MAX, "Toys", day(2024, 1, 3))).unwrap();
    store.add(expense("Island", Decimal::MAX, "Toys", day(2024, 1, 4))).unwrap();
    store.add(expense("Bread", dec!(3), "Food", day(2024, 2, 1))).unwrap();

    let err = store.monthly_summary(2024, 1).unwrap_err();
    assert!(matches!(err, StoreError::TotalOverflow { year: 2024, month: 1 }));
    assert_eq!(err.to_string(), "Spending for 1/2024 is too large to total");
    assert_eq!(store.monthly_summary(2024, 2).unwrap().unwrap().total, dec!(3));
}

#[test]
fn test_note_search() {
    let dir = tempfile::tempdir().unwrap();
    let mut store: RecordStore<Note> = RecordStore::open(dir.path().join("notes.txt")).unwrap();
    store.add(note("Groceries", "milk, eggs", "Home", day(2024, 1, 1))).unwrap();
    store.add(note("Work", "Finish the MILKshake report", "Job", day(2024, 1, 2))).unwrap();
    store.add(note("Gym", "leg day", "Health", day(2024, 1, 3))).unwrap();

    let titles: Vec<&str> = store.search("Milk").iter().map(|n| n.title()).collect();
    assert_eq!(titles, vec!["Groceries", "Work"]);
    assert!(store.search("yoga").is_empty());
}

#[test]
fn test_days_with_notes() {
    let dir = tempfile::tempdir().unwrap();
    let mut store: RecordStore<Note> = RecordStore::open(dir.path().join("notes.txt")).unwrap();
    store.add(note("a", "x", "c", day(2024, 5, 20))).unwrap();
    store.add(note("b", "x", "c", day(2024, 5, 3))).unwrap();
    store.add(note("c", "x", "c", day(2024, 5, 20))).unwrap();
    store.add(note("d", "x", "c", day(2024, 6, 1))).unwrap();

    assert_eq!(store.days_with_notes(2024, 5), vec![3, 20]);
    assert!(store.days_with_notes(2023, 5).is_empty());
}

#[test]
fn test_notes_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let mut store: RecordStore<Note> = RecordStore::open(dir.path().join("notes.txt")).unwrap();
    assert!(store.analyze().is_none());

    store.add(note("a", "x", "Work", day(2024, 5, 2))).unwrap();
    store.add(note("b", "x", "Home", day(2024, 5, 1))).unwrap();
    store.add(note("c", "x", "Work", day(2024, 5, 2))).unwrap();
    store.add(note("d", "x", "Art", day(2024, 5, 1))).unwrap();

    let analysis = store.analyze().unwrap();
    assert_eq!(
        analysis.per_category,
        vec![
            ("Work".to_string(), 2),
            ("Art".to_string(), 1),
            ("Home".to_string(), 1),
        ]
    );
    // Two notes on each day; the earlier date wins.
    assert_eq!(analysis.busiest_day, (day(2024, 5, 1), 2));
}

#[test]
fn test_student_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let store = setup_students(&dir);
    let analysis = store.analyze().unwrap();
    assert_eq!(analysis.average_age, dec!(21));
    assert_eq!(analysis.average_grade, dec!(60));
    assert_eq!(
        analysis.by_city,
        vec![("Paris".to_string(), 2), ("Rome".to_string(), 1)]
    );
    assert_eq!(analysis.passed, 2);
    assert_eq!(analysis.failed, 1);
}

#[test]
fn test_student_analysis_rounds_averages() {
    let dir = tempfile::tempdir().unwrap();
    let mut store: RecordStore<Student> = RecordStore::open(dir.path().join("students.txt")).unwrap();
    store.add(student("A", 20, 50, "X")).unwrap();
    store.add(student("B", 20, 50, "X")).unwrap();
    store.add(student("C", 21, 51, "X")).unwrap();

    let analysis = store.analyze().unwrap();
    assert_eq!(analysis.average_age, dec!(20.33));
    assert_eq!(analysis.average_grade, dec!(50.33));
}

#[test]
fn test_student_analysis_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store: RecordStore<Student> = RecordStore::open(dir.path().join("students.txt")).unwrap();
    assert!(store.analyze().is_none());
}

// ── tally ─────────────────────────────────────────────────────

#[test]
fn test_tally_orders_by_count_then_key() {
    let counts = tally(["b", "a", "c", "b", "a", "b"].into_iter());
    assert_eq!(
        counts,
        vec![
            ("b".to_string(), 3),
            ("a".to_string(), 2),
            ("c".to_string(), 1),
        ]
    );
}
