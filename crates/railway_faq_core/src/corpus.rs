use std::collections::HashSet;

use crate::error::{FaqError, Result};
use crate::model::FaqEntry;

pub const FALLBACK_ANSWER: &str =
    "😕 Sorry, I couldn’t understand that. Try rephrasing your question.";

const RAILWAY_FAQ: [(&str, &str); 6] = [
    (
        "How can I book a train ticket online?",
        "💳 You can book train tickets online through [IRCTC](https://www.irctc.co.in).",
    ),
    (
        "Why is PNR not available at night?",
        "🌙 PNR status and seat availability are unavailable daily from 11:30 PM to 12:30 AM due to system updates.",
    ),
    (
        "How to get train enquiry via SMS?",
        "📱 Send an SMS with your train number to 139 to get train status.",
    ),
    (
        "Why is the IRCTC site slow or fonts broken?",
        "🖥️ Use updated browsers like Chrome/Edge. Some issues occur on older versions.",
    ),
    (
        "What happens when train is delayed?",
        "🚦 You can check [NTES](https://enquiry.indianrail.gov.in/ntes/) for live delay updates.",
    ),
    (
        "Where to give railway complaints or suggestions?",
        "📩 Use the Feedback page on [indianrail.gov.in](https://indianrail.gov.in).",
    ),
];

/// Insertion-ordered, immutable set of FAQ entries.
///
/// Questions and answers live side by side in [`FaqEntry`] pairs, so the
/// question list and the answer list can never drift apart in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqCorpus {
    entries: Vec<FaqEntry>,
}

impl FaqCorpus {
    /// The built-in Indian Railways FAQ.
    pub fn railway() -> Self {
        Self {
            entries: RAILWAY_FAQ
                .iter()
                .map(|(q, a)| FaqEntry::new(*q, *a))
                .collect(),
        }
    }

    pub fn from_entries(entries: Vec<FaqEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(FaqError::EmptyCorpus);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.question.as_str()) {
                return Err(FaqError::DuplicateQuestion(entry.question.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Builds a corpus from separate, index-aligned question and answer lists.
    pub fn from_parallel(questions: Vec<String>, answers: Vec<String>) -> Result<Self> {
        if questions.len() != answers.len() {
            return Err(FaqError::CorpusMismatch {
                questions: questions.len(),
                answers: answers.len(),
            });
        }

        Self::from_entries(
            questions
                .into_iter()
                .zip(answers)
                .map(|(q, a)| FaqEntry::new(q, a))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FaqEntry> {
        self.entries.get(index)
    }

    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.question.as_str())
    }

    pub fn answers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FaqCorpus {
    fn default() -> Self {
        Self::railway()
    }
}
