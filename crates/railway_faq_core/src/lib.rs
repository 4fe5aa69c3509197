pub mod corpus;
pub mod error;
pub mod eval;
pub mod matcher;
pub mod model;
pub mod retrieval;
pub mod session;
pub mod storage;
pub mod store;
pub mod tfidf;
pub mod translate;

pub use corpus::{FaqCorpus, FALLBACK_ANSWER};
pub use error::{FaqError, Result};
pub use eval::{evaluate_cases, CaseExpectation, EvalCase, EvalOutcome, EvalSummary};
pub use matcher::{Matcher, DEFAULT_THRESHOLD};
pub use model::{Decision, FaqEntry, RetrievalMatch};
pub use retrieval::{cosine_similarity, decide, top_k, top_match};
pub use session::{Assistant, Reply, Role, Session, Turn};
pub use storage::{load_corpus_jsonl, save_corpus_jsonl};
pub use store::{
    CsvStore, FeedbackRecord, LogRecord, QueryRecord, SessionLog, FEEDBACK_LOG_FILE,
    QUERY_LOG_FILE,
};
pub use tfidf::{tokenize, TfidfMatrix};
pub use translate::{
    normalize, HttpTranslator, Normalized, Translation, Translator, DEFAULT_ENDPOINT,
    DEFAULT_TARGET_LANG, DEFAULT_TIMEOUT_SECS,
};
