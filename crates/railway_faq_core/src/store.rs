//! Append-only CSV logs for queries and feedback.
//!
//! Stores are single-writer: nothing guards against two processes appending
//! to the same file at once.

use std::fs::{self, OpenOptions};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{FaqError, Result};

pub const QUERY_LOG_FILE: &str = "query_log.csv";
pub const FEEDBACK_LOG_FILE: &str = "feedback_log.csv";

/// A row type with a fixed header.
pub trait LogRecord: Serialize + DeserializeOwned {
    const HEADER: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub timestamp: DateTime<Utc>,
    pub query: String,
}

impl QueryRecord {
    pub fn now(query: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            query: query.into(),
        }
    }
}

impl LogRecord for QueryRecord {
    const HEADER: &'static [&'static str] = &["timestamp", "query"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: DateTime<Utc>,
    pub rating: u8,
    pub comment: String,
}

impl FeedbackRecord {
    pub fn now(rating: u8, comment: impl Into<String>) -> Result<Self> {
        if !(1..=5).contains(&rating) {
            return Err(FaqError::InvalidRating(rating));
        }
        Ok(Self {
            timestamp: Utc::now(),
            rating,
            comment: comment.into(),
        })
    }
}

impl LogRecord for FeedbackRecord {
    const HEADER: &'static [&'static str] = &["timestamp", "rating", "comment"];
}

#[derive(Debug, Clone)]
pub struct CsvStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: LogRecord> CsvStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Missing, empty and unreadable files all count as new.
    fn needs_header(&self) -> bool {
        match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        }
    }

    pub fn append_with_header_if_new(&self, record: &R) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let write_header = self.needs_header();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(R::HEADER)?;
        }
        writer.serialize(record)?;
        writer.flush()?;

        tracing::debug!(path = %self.path.display(), write_header, "appended record");
        Ok(())
    }

    /// All records in append order; a missing file reads as empty.
    pub fn load(&self) -> Result<Vec<R>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }
}

/// The query and feedback stores of one log directory.
#[derive(Debug, Clone)]
pub struct SessionLog {
    pub queries: CsvStore<QueryRecord>,
    pub feedback: CsvStore<FeedbackRecord>,
}

impl SessionLog {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            queries: CsvStore::new(dir.join(QUERY_LOG_FILE)),
            feedback: CsvStore::new(dir.join(FEEDBACK_LOG_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn fresh_store_gets_one_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::<QueryRecord>::new(dir.path().join("query_log.csv"));
        assert!(!store.exists());

        store
            .append_with_header_if_new(&QueryRecord::now("pnr status"))
            .unwrap();
        let first = lines(store.path());
        assert_eq!(first.len(), 2);
        assert_eq!(first[0], "timestamp,query");
        assert!(first[1].ends_with(",pnr status"));

        store
            .append_with_header_if_new(&QueryRecord::now("train delayed"))
            .unwrap();
        let second = lines(store.path());
        assert_eq!(second.len(), 3);
        assert_eq!(
            second.iter().filter(|l| l.as_str() == "timestamp,query").count(),
            1
        );
    }

    #[test]
    fn empty_file_counts_as_new() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback_log.csv");
        fs::write(&path, "").unwrap();

        let store = CsvStore::<FeedbackRecord>::new(&path);
        assert!(store.exists());
        store
            .append_with_header_if_new(&FeedbackRecord::now(4, "helpful").unwrap())
            .unwrap();

        let rows = lines(&path);
        assert_eq!(rows[0], "timestamp,rating,comment");
        assert!(rows[1].ends_with(",4,helpful"));
    }

    #[test]
    fn creates_parent_directories_and_quotes_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::<FeedbackRecord>::new(dir.path().join("logs/nested/fb.csv"));

        let record = FeedbackRecord::now(2, "slow, \"confusing\" answer").unwrap();
        store.append_with_header_if_new(&record).unwrap();

        assert_eq!(store.load().unwrap(), vec![record]);
    }

    #[test]
    fn load_reads_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = SessionLog::in_dir(dir.path());
        assert!(log.queries.load().unwrap().is_empty());

        let a = QueryRecord::now("first");
        let b = QueryRecord::now("second");
        log.queries.append_with_header_if_new(&a).unwrap();
        log.queries.append_with_header_if_new(&b).unwrap();

        assert_eq!(log.queries.load().unwrap(), vec![a, b]);
    }

    #[test]
    fn rating_must_be_one_to_five() {
        assert!(matches!(
            FeedbackRecord::now(0, ""),
            Err(FaqError::InvalidRating(0))
        ));
        assert!(matches!(
            FeedbackRecord::now(6, ""),
            Err(FaqError::InvalidRating(6))
        ));
        assert!(FeedbackRecord::now(1, "").is_ok());
        assert!(FeedbackRecord::now(5, "").is_ok());
    }
}
