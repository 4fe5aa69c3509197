use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaqError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid rating {0}: expected a value from 1 to 5")]
    InvalidRating(u8),

    #[error("Corpus has {questions} questions but {answers} answers")]
    CorpusMismatch { questions: usize, answers: usize },

    #[error("Duplicate canonical question: {0}")]
    DuplicateQuestion(String),

    #[error("Corpus is empty")]
    EmptyCorpus,

    #[error("Logging is disabled; run in extended mode to record {0}")]
    LoggingDisabled(&'static str),

    #[error("Malformed translation response: {0}")]
    Translation(String),
}

pub type Result<T> = std::result::Result<T, FaqError>;
