use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// What came back from a prompt that expects a typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reply<T> {
    Value(T),
    /// The line did not parse; holds the raw text.
    Invalid(String),
    /// Input is exhausted.
    Closed,
}

/// Line-oriented console over any reader/writer pair.
pub(crate) struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub(crate) fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Print `label` and read one line without its line ending.
    /// `None` at end of input.
    pub(crate) fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub(crate) fn ask_parsed<T: FromStr>(&mut self, label: &str) -> io::Result<Reply<T>> {
        Ok(match self.ask(label)? {
            None => Reply::Closed,
            Some(raw) => match raw.trim().parse() {
                Ok(value) => Reply::Value(value),
                Err(_) => Reply::Invalid(raw),
            },
        })
    }

    /// Like [`Console::ask`], but a blank answer means "no value".
    pub(crate) fn ask_optional(&mut self, label: &str) -> io::Result<Option<Option<String>>> {
        Ok(self
            .ask(label)?
            .map(|raw| if raw.trim().is_empty() { None } else { Some(raw) }))
    }

    /// Prompt for a year and a month in 1..=12.
    pub(crate) fn ask_year_month(&mut self) -> io::Result<Reply<(i32, u32)>> {
        let year = match self.ask_parsed::<i32>("Enter year (YYYY): ")? {
            Reply::Value(y) => y,
            Reply::Invalid(raw) => return Ok(Reply::Invalid(raw)),
            Reply::Closed => return Ok(Reply::Closed),
        };
        Ok(match self.ask_parsed::<u32>("Enter month (1-12): ")? {
            Reply::Value(m) if (1..=12).contains(&m) => Reply::Value((year, m)),
            Reply::Value(m) => Reply::Invalid(m.to_string()),
            Reply::Invalid(raw) => Reply::Invalid(raw),
            Reply::Closed => Reply::Closed,
        })
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}
