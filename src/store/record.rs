use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::FieldError;
use crate::models::{Expense, Note, Student};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A value that lives as one delimited line in a backing file.
///
/// `to_fields` and `from_fields` must agree on field order.
pub trait Record: Sized {
    /// Field separator for this record's backing file.
    const DELIMITER: u8;

    /// Number of fields in one line.
    const FIELD_COUNT: usize;

    fn to_fields(&self) -> Vec<String>;

    fn from_fields(fields: &StringRecord) -> Result<Self, FieldError>;

    /// The calendar date used for month filtering.
    fn date(&self) -> NaiveDate;
}

impl Record for Expense {
    const DELIMITER: u8 = b',';
    const FIELD_COUNT: usize = 4;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.name().to_string(),
            self.amount().to_string(),
            self.category().to_string(),
            format_date(self.date()),
        ]
    }

    fn from_fields(fields: &StringRecord) -> Result<Self, FieldError> {
        check_field_count(fields, Self::FIELD_COUNT)?;
        let amount = parse_amount(&fields[1])?;
        let date = parse_date(&fields[3])?;
        Ok(Expense::new(&fields[0], amount, &fields[2], Some(date))?)
    }

    fn date(&self) -> NaiveDate {
        Expense::date(self)
    }
}

impl Record for Note {
    const DELIMITER: u8 = b'|';
    const FIELD_COUNT: usize = 4;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.title().to_string(),
            self.content().to_string(),
            self.category().to_string(),
            format_date(self.date()),
        ]
    }

    fn from_fields(fields: &StringRecord) -> Result<Self, FieldError> {
        check_field_count(fields, Self::FIELD_COUNT)?;
        let date = parse_date(&fields[3])?;
        Ok(Note::new(&fields[0], &fields[1], &fields[2], Some(date))?)
    }

    fn date(&self) -> NaiveDate {
        Note::date(self)
    }
}

impl Record for Student {
    const DELIMITER: u8 = b'|';
    const FIELD_COUNT: usize = 5;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.name().to_string(),
            self.age().to_string(),
            self.grade().to_string(),
            self.city().to_string(),
            format_date(self.admission_date()),
        ]
    }

    fn from_fields(fields: &StringRecord) -> Result<Self, FieldError> {
        check_field_count(fields, Self::FIELD_COUNT)?;
        let age = parse_number(&fields[1], "age")?;
        let grade = parse_number(&fields[2], "grade")?;
        let admitted = parse_date(&fields[4])?;
        Ok(Student::new(&fields[0], age, grade, &fields[3], Some(admitted))?)
    }

    fn date(&self) -> NaiveDate {
        self.admission_date()
    }
}

/// Writer settings shared by saving and by [`split_records`].
pub(super) fn writer(delimiter: u8) -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'));
    builder
}

/// Split the text of a backing file into records, each tagged with the
/// line it starts on (counting from `first_line`).
///
/// Quoted fields are honoured, so values holding the delimiter or a line
/// break read back intact. A record keeps its quoted reading only if
/// writing it again reproduces the source text exactly. Otherwise its first
/// line is split literally on the delimiter and the text after that line is
/// split again, so stray quotes in hand-written files stay as they were.
pub(super) fn split_records(
    contents: &str,
    delimiter: u8,
    first_line: usize,
) -> Result<Vec<(usize, StringRecord)>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let mut parsed = Vec::new();
    for result in rdr.records() {
        let fields = result?;
        let pos = fields.position().cloned().unwrap_or_else(csv::Position::new);
        parsed.push((pos, fields));
    }

    let mut records = Vec::with_capacity(parsed.len());
    for (i, (pos, fields)) in parsed.iter().enumerate() {
        let start = usize::try_from(pos.byte()).unwrap_or(0);
        let end = parsed
            .get(i + 1)
            .and_then(|(next, _)| usize::try_from(next.byte()).ok())
            .unwrap_or(contents.len());
        // A record's position sits right after the previous one, before
        // any blank lines or the `\n` of a `\r\n` pair.
        let span = contents.get(start..end).unwrap_or_default();
        let body = span.trim_start_matches(['\r', '\n']);
        let skipped = span.len() - body.len();
        let line = first_line
            + usize::try_from(pos.line()).unwrap_or(1).saturating_sub(1)
            + span[..skipped].matches('\n').count();
        let raw = body.trim_end_matches(['\r', '\n']);

        if rewrite(fields, delimiter)? == raw.as_bytes() {
            records.push((line, fields.clone()));
            continue;
        }
        let (head, tail) = raw.split_once('\n').unwrap_or((raw, ""));
        let literal: StringRecord = head
            .trim_end_matches('\r')
            .split(char::from(delimiter))
            .collect();
        records.push((line, literal));
        records.extend(split_records(tail, delimiter, line + 1)?);
    }
    Ok(records)
}

/// `fields` as the store would write them, without the line terminator.
fn rewrite(fields: &StringRecord, delimiter: u8) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = writer(delimiter).from_writer(Vec::new());
    wtr.write_record(fields)?;
    let mut bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(bytes)
}

fn check_field_count(fields: &StringRecord, expected: usize) -> Result<(), FieldError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(FieldError::FieldCount {
            expected,
            found: fields.len(),
        })
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(s: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| FieldError::InvalidValue {
        field: "date",
        value: s.to_string(),
    })
}

/// Accepts plain decimals ("12.50") and the exponent form some float
/// writers emit for tiny values ("1e-05").
fn parse_amount(s: &str) -> Result<Decimal, FieldError> {
    let trimmed = s.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| FieldError::InvalidValue {
            field: "amount",
            value: s.to_string(),
        })
}

fn parse_number(s: &str, field: &'static str) -> Result<i64, FieldError> {
    s.trim().parse().map_err(|_| FieldError::InvalidValue {
        field,
        value: s.to_string(),
    })
}
