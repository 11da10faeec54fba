use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use super::{tally, RecordStore};
use crate::models::Note;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesAnalysis {
    /// Notes per category, most used first.
    pub per_category: Vec<(String, usize)>,
    /// Date with the most notes and how many; earliest date wins a tie.
    pub busiest_day: (NaiveDate, usize),
}

impl RecordStore<Note> {
    pub fn search(&self, keyword: &str) -> Vec<&Note> {
        self.records().iter().filter(|n| n.mentions(keyword)).collect()
    }

    /// Days of the month that have at least one note, ascending.
    pub fn days_with_notes(&self, year: i32, month: u32) -> Vec<u32> {
        let mut days: Vec<u32> = self
            .in_month(year, month)
            .into_iter()
            .map(|n| n.date().day())
            .collect();
        days.sort_unstable();
        days.dedup();
        days
    }

    pub fn analyze(&self) -> Option<NotesAnalysis> {
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for note in self.records() {
            *per_day.entry(note.date()).or_insert(0) += 1;
        }
        // BTreeMap iterates dates ascending, so the first maximum is the earliest.
        let busiest_day = per_day
            .into_iter()
            .fold(None, |best: Option<(NaiveDate, usize)>, (date, n)| match best {
                Some((_, top)) if top >= n => best,
                _ => Some((date, n)),
            })?;

        Some(NotesAnalysis {
            per_category: tally(self.records().iter().map(|n| n.category())),
            busiest_day,
        })
    }
}
