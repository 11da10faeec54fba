mod error;
mod expenses;
mod notes;
mod record;
mod students;

use chrono::Datelike;
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use error::{FieldError, StoreError};
pub use record::Record;

/// An ordered list of records mirrored to a flat file.
///
/// The whole file is read when the store is opened and rewritten after
/// every mutation. IDs handed out to callers are 1-based positions.
#[derive(Debug)]
pub struct RecordStore<R> {
    path: PathBuf,
    records: Vec<R>,
    /// Set when the backing file could not be read; nothing is written then.
    locked: bool,
}

impl<R: Record> RecordStore<R> {
    /// Open the store backed by `path`, loading any existing records.
    /// A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::empty(path);
        store.load()?;
        Ok(store)
    }

    /// A store with no records that will write to `path` on first mutation.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
            locked: false,
        }
    }

    /// A store with no records that refuses every save, for a backing file
    /// that exists but failed to load. Mutations fail with
    /// [`StoreError::Unsaved`] and leave the file untouched.
    pub fn locked(path: impl Into<PathBuf>) -> Self {
        Self {
            locked: true,
            ..Self::empty(path)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Re-read the backing file.
    ///
    /// Every line is parsed before any is kept: the first bad line fails
    /// the whole load and the records already in memory stay as they were.
    pub fn load(&mut self) -> Result<usize, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.path.display());
                self.records.clear();
                return Ok(0);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let lines = record::split_records(&contents, R::DELIMITER, 1).map_err(|source| StoreError::Csv {
            path: self.path.clone(),
            source,
        })?;
        let mut loaded = Vec::with_capacity(lines.len());
        for (line, fields) in lines {
            let record =
                R::from_fields(&fields).map_err(|reason| StoreError::Parse { line, reason })?;
            loaded.push(record);
        }

        info!("Loaded {} records from {}", loaded.len(), self.path.display());
        self.records = loaded;
        Ok(self.records.len())
    }

    /// Overwrite the backing file with the current records.
    pub fn save(&self) -> Result<(), StoreError> {
        if self.locked {
            return Err(StoreError::Unsaved {
                path: self.path.clone(),
            });
        }
        let csv_err = |source: csv::Error| StoreError::Csv {
            path: self.path.clone(),
            source,
        };

        let mut wtr = record::writer(R::DELIMITER)
            .from_path(&self.path)
            .map_err(csv_err)?;

        for record in &self.records {
            wtr.write_record(record.to_fields()).map_err(csv_err)?;
        }
        wtr.flush().map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved {} records to {}", self.records.len(), self.path.display());
        Ok(())
    }

    /// Append a record and persist. On a failed write the record is dropped
    /// again so memory keeps matching the file.
    pub fn add(&mut self, record: R) -> Result<(), StoreError> {
        self.records.push(record);
        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }

    pub fn get(&self, id: usize) -> Result<&R, StoreError> {
        let index = self.index_of(id)?;
        Ok(&self.records[index])
    }

    /// Swap the record at `id` for `record`, persist, and return the old one.
    pub fn replace(&mut self, id: usize, record: R) -> Result<R, StoreError> {
        let index = self.index_of(id)?;
        let previous = std::mem::replace(&mut self.records[index], record);
        if let Err(e) = self.save() {
            self.records[index] = previous;
            return Err(e);
        }
        Ok(previous)
    }

    /// Remove the record at `id`, persist, and return it.
    pub fn delete(&mut self, id: usize) -> Result<R, StoreError> {
        let index = self.index_of(id)?;
        let removed = self.records.remove(index);
        if let Err(e) = self.save() {
            self.records.insert(index, removed);
            return Err(e);
        }
        info!("Deleted record {id} from {}", self.path.display());
        Ok(removed)
    }

    /// Records dated in the given month, in insertion order.
    pub fn in_month(&self, year: i32, month: u32) -> Vec<&R> {
        self.records
            .iter()
            .filter(|r| {
                let date = r.date();
                date.year() == year && date.month() == month
            })
            .collect()
    }

    fn index_of(&self, id: usize) -> Result<usize, StoreError> {
        if id == 0 || id > self.records.len() {
            return Err(StoreError::InvalidId {
                id,
                len: self.records.len(),
            });
        }
        Ok(id - 1)
    }
}

/// Count occurrences of each key, most frequent first, ties by key.
pub(crate) fn tally<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut result: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    result
}

#[cfg(test)]
mod tests;
