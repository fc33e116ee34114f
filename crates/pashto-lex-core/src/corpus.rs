//! Corpus word lists.
//!
//! The tokenizer that walks the raw corpus is external. It hands us one
//! record per distinct token with an occurrence count and the verses it
//! appears in, either as text lines:
//!
//! ```text
//! وینم (3): Matthew 5:8, John 1:18
//! ```
//!
//! or as a JSON array of `{"word": ..., "count": ..., "verses": [...]}`
//! objects (`pashto`/`form` and `frequency` are accepted as aliases).
//!
//! Records whose text collides after normalization are merged. A malformed
//! record is skipped and reported; it never aborts the load.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, CorpusResult, RecordError};
use crate::normalize::normalize;

static LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?) \((\d+)\):\s*(.*)$").expect("valid regex"));

/// A verse reference such as `1 John 4:8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerseRef {
    /// Book name, possibly with a leading number.
    pub book: String,
    /// Chapter number (1-based).
    pub chapter: u32,
    /// Verse number (1-based).
    pub verse: u32,
}

impl FromStr for VerseRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || format!("invalid verse reference '{s}'");
        let (book, location) = s.trim().rsplit_once(' ').ok_or_else(bad)?;
        let (chapter, verse) = location.split_once(':').ok_or_else(bad)?;
        let chapter: u32 = chapter.parse().map_err(|_| bad())?;
        let verse: u32 = verse.parse().map_err(|_| bad())?;
        let book = book.trim();
        if book.is_empty() || chapter == 0 || verse == 0 {
            return Err(bad());
        }
        Ok(Self {
            book: book.to_string(),
            chapter,
            verse,
        })
    }
}

impl TryFrom<String> for VerseRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VerseRef> for String {
    fn from(value: VerseRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Append `incoming` to `verses`, skipping references already present.
pub fn merge_verses(verses: &mut Vec<VerseRef>, incoming: impl IntoIterator<Item = VerseRef>) {
    for verse in incoming {
        if !verses.contains(&verse) {
            verses.push(verse);
        }
    }
}

/// One distinct normalized token from the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordForm {
    /// Normalized surface text.
    pub text: String,
    /// Number of occurrences.
    pub count: u64,
    /// Distinct verses, in first-seen order.
    #[schemars(with = "Vec<String>")]
    pub verses: Vec<VerseRef>,
}

impl WordForm {
    /// Build a word form, normalizing the text and deduplicating verses.
    pub fn new(text: &str, count: u64, verses: impl IntoIterator<Item = VerseRef>) -> Self {
        let mut unique = Vec::new();
        merge_verses(&mut unique, verses);
        Self {
            text: normalize(text),
            count,
            verses: unique,
        }
    }
}

/// A record that was skipped while loading.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SkippedRecord {
    /// 1-based line number (text) or array position (JSON).
    pub position: usize,
    /// Why the record was rejected.
    pub reason: String,
}

/// Statistics from loading a word list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LoadReport {
    /// Records accepted.
    pub records: usize,
    /// Records merged into an earlier record after normalization.
    pub merged: usize,
    /// Verse references dropped because they did not parse.
    pub invalid_verses: usize,
    /// Records skipped.
    pub skipped: Vec<SkippedRecord>,
}

/// Input format of a word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordListFormat {
    /// `<word> (<count>): <ref>, <ref>` lines.
    Text,
    /// JSON array of record objects.
    Json,
}

impl WordListFormat {
    /// Choose a format from the file extension; anything but `.json` is text.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Deserialize)]
struct JsonRecord {
    #[serde(alias = "pashto", alias = "form")]
    word: String,
    #[serde(alias = "frequency")]
    count: serde_json::Value,
    #[serde(default)]
    verses: Vec<String>,
}

/// Word forms loaded from a corpus word list.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    forms: Vec<WordForm>,
    positions: HashMap<String, usize>,
    report: LoadReport,
}

impl WordList {
    /// Parse a word list held in memory.
    pub fn parse(input: &str, format: WordListFormat) -> Result<Self, serde_json::Error> {
        match format {
            WordListFormat::Text => Ok(Self::parse_text(input)),
            WordListFormat::Json => Self::parse_json(input),
        }
    }

    /// Read and parse a word list file, choosing the format by extension.
    #[tracing::instrument]
    pub fn load(path: &Utf8Path) -> CorpusResult<Self> {
        let input =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| CorpusError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&input, WordListFormat::from_path(path)).map_err(|source| CorpusError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse `<word> (<count>): <refs>` lines. Blank lines are ignored.
    pub fn parse_text(input: &str) -> Self {
        let mut list = Self::default();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok((word, count, refs)) => list.accept(word, count, split_refs(refs), idx + 1),
                Err(err) => list.skip(idx + 1, &err),
            }
        }
        list.finish()
    }

    /// Parse a JSON array of record objects.
    ///
    /// Fails only when the document is not an array.
    pub fn parse_json(input: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<serde_json::Value> = serde_json::from_str(input)?;
        let mut list = Self::default();
        for (idx, value) in records.into_iter().enumerate() {
            let position = idx + 1;
            let record = match serde_json::from_value::<JsonRecord>(value) {
                Ok(record) => record,
                Err(e) => {
                    list.skip(position, &RecordError::Shape(e.to_string()));
                    continue;
                }
            };
            match json_count(&record.count) {
                Ok(count) => list.accept(
                    &record.word,
                    count,
                    record.verses.iter().map(String::as_str),
                    position,
                ),
                Err(err) => list.skip(position, &err),
            }
        }
        Ok(list.finish())
    }

    /// Accepted word forms, in first-seen order.
    pub fn forms(&self) -> &[WordForm] {
        &self.forms
    }

    /// Loading statistics.
    pub const fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Number of distinct forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns `true` if no forms were accepted.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    fn accept<'a>(
        &mut self,
        word: &str,
        count: u64,
        refs: impl IntoIterator<Item = &'a str>,
        position: usize,
    ) {
        let text = normalize(word.trim());
        if text.is_empty() {
            self.skip(position, &RecordError::EmptyWord);
            return;
        }

        let mut verses = Vec::new();
        for raw in refs {
            match raw.parse::<VerseRef>() {
                Ok(v) => verses.push(v),
                Err(reason) => {
                    tracing::debug!(position, %reason, "dropping verse reference");
                    self.report.invalid_verses += 1;
                }
            }
        }

        self.report.records += 1;
        if let Some(&existing) = self.positions.get(&text) {
            let form = &mut self.forms[existing];
            form.count = form.count.saturating_add(count);
            merge_verses(&mut form.verses, verses);
            self.report.merged += 1;
        } else {
            self.positions.insert(text.clone(), self.forms.len());
            self.forms.push(WordForm::new(&text, count, verses));
        }
    }

    fn skip(&mut self, position: usize, reason: &RecordError) {
        tracing::warn!(position, %reason, "skipping malformed word-list record");
        self.report.skipped.push(SkippedRecord {
            position,
            reason: reason.to_string(),
        });
    }

    fn finish(self) -> Self {
        tracing::debug!(
            forms = self.forms.len(),
            merged = self.report.merged,
            skipped = self.report.skipped.len(),
            "word list parsed"
        );
        self
    }
}

fn parse_line(line: &str) -> Result<(&str, u64, &str), RecordError> {
    let caps = LINE_PATTERN.captures(line).ok_or(RecordError::Malformed)?;
    let (_, [word, count, refs]) = caps.extract();
    let count = parse_count(count)?;
    Ok((word, count, refs))
}

fn parse_count(raw: &str) -> Result<u64, RecordError> {
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RecordError::InvalidCount(raw.to_string())),
    }
}

fn json_count(value: &serde_json::Value) -> Result<u64, RecordError> {
    match value {
        serde_json::Value::Number(n) => match n.as_u64() {
            Some(c) if c > 0 => Ok(c),
            _ => Err(RecordError::InvalidCount(n.to_string())),
        },
        serde_json::Value::String(s) => parse_count(s.trim()),
        other => Err(RecordError::InvalidCount(other.to_string())),
    }
}

fn split_refs(refs: &str) -> impl Iterator<Item = &str> {
    refs.split(',').map(str::trim).filter(|r| !r.is_empty())
}
