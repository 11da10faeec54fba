use chrono::NaiveDate;

use super::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    title: String,
    content: String,
    category: String,
    date: NaiveDate,
}

impl Note {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        Ok(Self {
            title: title.into(),
            content,
            category: category.into(),
            date: date.unwrap_or_else(super::today),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Case-insensitive keyword match against title and content.
    pub fn mentions(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.content.to_lowercase().contains(&needle)
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} ({})", self.date, self.title, self.category)
    }
}
