use crate::corpus::{FaqCorpus, FALLBACK_ANSWER};
use crate::model::{Decision, RetrievalMatch};
use crate::retrieval::{cosine_similarity, decide};
use crate::tfidf::TfidfMatrix;

pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// Lexical matcher over a fixed corpus.
///
/// Each query is vectorized together with the canonical questions, so the
/// idf weights account for the query as one more document.
#[derive(Debug, Clone)]
pub struct Matcher {
    corpus: FaqCorpus,
    threshold: f32,
}

impl Matcher {
    pub fn new(corpus: FaqCorpus, threshold: f32) -> Self {
        Self { corpus, threshold }
    }

    pub fn corpus(&self) -> &FaqCorpus {
        &self.corpus
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Cosine similarity of `query` against every canonical question, in corpus order.
    pub fn scores(&self, query: &str) -> Vec<f32> {
        let mut documents: Vec<&str> = self.corpus.questions().collect();
        documents.push(query);

        let matrix = TfidfMatrix::fit_transform(&documents);
        let (questions, query_row) = matrix.rows().split_at(self.corpus.len());
        let query_row = &query_row[0];

        questions
            .iter()
            .map(|row| cosine_similarity(query_row, row))
            .collect()
    }

    pub fn best_match(&self, query: &str) -> RetrievalMatch {
        let scores = self.scores(query);
        let result = decide(&scores, &self.corpus, self.threshold);
        tracing::debug!(
            query,
            score = result.score,
            entry = ?result.entry_index,
            decision = ?result.decision,
            "matched query"
        );
        result
    }

    /// The matched answer, or the fallback message when nothing scores above the threshold.
    pub fn answer(&self, query: &str) -> String {
        let result = self.best_match(query);
        match (result.decision, result.answer) {
            (Decision::Hit, Some(answer)) => answer,
            _ => FALLBACK_ANSWER.to_string(),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(FaqCorpus::railway(), DEFAULT_THRESHOLD)
    }
}
