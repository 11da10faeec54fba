use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const EXPENSES_FILE: &str = "expenses.csv";
pub(crate) const NOTES_FILE: &str = "notes.txt";
pub(crate) const STUDENTS_FILE: &str = "students.txt";

/// Where the backing files live.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    data_dir: PathBuf,
}

impl Config {
    /// Use `data_dir` when given, otherwise the platform data directory.
    /// The directory is created if it does not exist.
    pub(crate) fn resolve(data_dir: Option<&str>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => PathBuf::from(shellexpand(dir)),
            None => directories::ProjectDirs::from("com", "ledgerkit", "ledgerkit")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub(crate) fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub(crate) fn expenses_path(&self) -> PathBuf {
        self.data_dir.join(EXPENSES_FILE)
    }

    pub(crate) fn notes_path(&self) -> PathBuf {
        self.data_dir.join(NOTES_FILE)
    }

    pub(crate) fn students_path(&self) -> PathBuf {
        self.data_dir.join(STUDENTS_FILE)
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
