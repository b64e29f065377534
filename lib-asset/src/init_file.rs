//! Line-oriented init files shared by every catalog.
//!
//! ```text
//! -["Walls", color(120, 120, 120)]
//! [#nm: "Block", #sz: point(1, 1), ...]
//! -- comment
//! ```
//! A line starting with a single `-` opens a category, every other non-blank
//! line is one record. Lines starting with `--` are comments.

use lib_notation::{
    Color, ParseError, ParseMode, Record, SchemaError, notation_record, parse_with,
    record_from_value, split_lines,
};
use log::warn;
use thiserror::Error;

pub const IMPLICIT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("bad notation: {0}")]
    Parse(#[from] ParseError),
    #[error("bad record: {0}")]
    Schema(#[from] SchemaError),
    #[error("{0}")]
    Invalid(String),
}

/// A per-line failure. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {error}")]
pub struct InitError {
    pub line: usize,
    #[source]
    pub error: CatalogError,
}

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    struct CategoryHeader {
        name: String => pos,
        color: Color => pos skippable,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitEntry<T> {
    pub line: usize,
    pub record: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitCategory<T> {
    pub name: String,
    pub color: Color,
    pub entries: Vec<InitEntry<T>>,
}

impl<T> InitCategory<T> {
    fn new(name: impl Into<String>, color: Color) -> Self {
        InitCategory {
            name: name.into(),
            color,
            entries: Vec::new(),
        }
    }
}

/// The parsed contents of one init file. Lines that fail to parse are
/// collected in `errors` and do not stop the rest of the file from loading.
#[derive(Debug, Clone, PartialEq)]
pub struct InitFile<T> {
    pub categories: Vec<InitCategory<T>>,
    pub errors: Vec<InitError>,
}

impl<T: Record> InitFile<T> {
    pub fn parse(src: &str, mode: ParseMode) -> Self {
        let mut categories = Vec::<InitCategory<T>>::new();
        let mut errors = Vec::new();

        for (idx, raw) in split_lines(src).into_iter().enumerate() {
            let line = idx + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with("--") {
                continue;
            }

            let res = match text.strip_prefix('-') {
                Some(header) => parse_record::<CategoryHeader>(header, mode).map(|header| {
                    categories.push(InitCategory::new(header.name, header.color));
                }),
                None => parse_record::<T>(text, mode).map(|record| {
                    if categories.is_empty() {
                        categories.push(InitCategory::new(IMPLICIT_CATEGORY, Color::default()));
                    }
                    if let Some(category) = categories.last_mut() {
                        category.entries.push(InitEntry { line, record });
                    }
                }),
            };

            if let Err(error) = res {
                warn!("Skipping {} line {line}: {error}", T::NAME);
                errors.push(InitError { line, error });
            }
        }

        InitFile { categories, errors }
    }

    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }
}

fn parse_record<R: Record>(text: &str, mode: ParseMode) -> Result<R, CatalogError> {
    let value = parse_with(text, mode)?;
    Ok(record_from_value::<R>(&value)?)
}
