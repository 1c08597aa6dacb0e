//! Quote source.
//!
//! # Responsibility
//! - Provide the built-in quote list.
//! - Parse quote files: one quote per non-blank line.
//!
//! # Invariants
//! - Returned quotes are trimmed, non-empty, with internal whitespace runs
//!   collapsed to one space.
//! - Source order is preserved; shuffling happens in the layout path.

use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const DEFAULT_QUOTES: &[&str] = &[
    "Your manager is cash, mentor is credit, networking is investments.",
    "Effort that is not recognized is effort that is not done",
    "This is the best banana bread I’ve ever had",
];

/// Returns the built-in quotes in source order.
pub fn default_quotes() -> Vec<String> {
    DEFAULT_QUOTES.iter().map(|quote| quote.to_string()).collect()
}

/// Splits `text` into normalized quotes, skipping blank lines.
pub fn parse_quotes(text: &str) -> Vec<String> {
    text.lines()
        .map(normalize_quote)
        .filter(|quote| !quote.is_empty())
        .collect()
}

/// Loads quotes from a UTF-8 text file.
///
/// # Errors
/// - `QuoteError::Io` when the file cannot be read.
/// - `QuoteError::Empty` when the file holds no non-blank line.
pub fn load_quotes(path: impl AsRef<Path>) -> Result<Vec<String>, QuoteError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|err| {
        error!(
            "event=quotes_load module=quotes status=error path={} error={}",
            path.display(),
            err
        );
        QuoteError::Io(err)
    })?;
    let quotes = parse_quotes(&raw);
    if quotes.is_empty() {
        return Err(QuoteError::Empty(path.display().to_string()));
    }
    info!(
        "event=quotes_load module=quotes status=ok path={} count={}",
        path.display(),
        quotes.len()
    );
    Ok(quotes)
}

fn normalize_quote(line: &str) -> String {
    WHITESPACE_RE.replace_all(line.trim(), " ").into_owned()
}

/// Quote loading errors.
#[derive(Debug)]
pub enum QuoteError {
    Io(std::io::Error),
    Empty(String),
}

impl Display for QuoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read quotes: {err}"),
            Self::Empty(path) => write!(f, "quote file `{path}` contains no quotes"),
        }
    }
}

impl Error for QuoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Empty(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{default_quotes, parse_quotes};

    #[test]
    fn default_quotes_are_non_empty() {
        let quotes = default_quotes();
        assert!(!quotes.is_empty());
        assert!(quotes.iter().all(|quote| !quote.trim().is_empty()));
    }

    #[test]
    fn parse_skips_blank_lines_and_collapses_whitespace() {
        let quotes = parse_quotes("  first   quote \n\n\t\nsecond\tquote\r\n");
        assert_eq!(quotes, vec!["first quote", "second quote"]);
    }
}
