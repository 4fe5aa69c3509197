use serde::{Deserialize, Serialize};

use crate::corpus::FALLBACK_ANSWER;
use crate::error::{FaqError, Result};
use crate::matcher::Matcher;
use crate::model::RetrievalMatch;
use crate::store::{FeedbackRecord, QueryRecord, SessionLog};
use crate::translate::{normalize, Normalized, Translator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Bot => "Bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub normalized: Normalized,
    pub retrieval: RetrievalMatch,
    pub answer: String,
}

/// Matcher plus the optional extended-mode pieces: translation and logging.
pub struct Assistant {
    matcher: Matcher,
    translator: Option<Box<dyn Translator>>,
    log: Option<SessionLog>,
}

impl Assistant {
    pub fn new(matcher: Matcher) -> Self {
        Self {
            matcher,
            translator: None,
            log: None,
        }
    }

    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_log(mut self, log: SessionLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn log(&self) -> Option<&SessionLog> {
        self.log.as_ref()
    }

    /// Answers one query. The raw query is logged, the translated text is matched.
    /// Blank queries get the fallback answer and are neither logged nor translated.
    pub fn handle(&self, query: &str) -> Reply {
        if query.trim().is_empty() {
            return Reply {
                normalized: Normalized::Original {
                    text: query.to_string(),
                    reason: None,
                },
                retrieval: self.matcher.best_match(query),
                answer: FALLBACK_ANSWER.to_string(),
            };
        }

        if let Some(log) = &self.log {
            if let Err(err) = log.queries.append_with_header_if_new(&QueryRecord::now(query)) {
                tracing::warn!(
                    error = %err,
                    path = %log.queries.path().display(),
                    "failed to log query"
                );
            }
        }

        let normalized = match &self.translator {
            Some(translator) => normalize(translator.as_ref(), query),
            None => Normalized::Original {
                text: query.to_string(),
                reason: None,
            },
        };

        let retrieval = self.matcher.best_match(normalized.text());
        let answer = retrieval
            .answer
            .clone()
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

        Reply {
            normalized,
            retrieval,
            answer,
        }
    }

    pub fn submit_feedback(&self, rating: u8, comment: &str) -> Result<FeedbackRecord> {
        let log = self.log.as_ref().ok_or(FaqError::LoggingDisabled("feedback"))?;
        let record = FeedbackRecord::now(rating, comment)?;
        log.feedback.append_with_header_if_new(&record)?;
        tracing::info!(rating, "feedback recorded");
        Ok(record)
    }
}

/// Conversation history of one interactive session. Dropped when the session ends.
#[derive(Debug, Default)]
pub struct Session {
    history: Vec<Turn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank input is ignored; otherwise a user turn and a bot turn are appended.
    pub fn submit(&mut self, assistant: &Assistant, input: &str) -> Option<Reply> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let reply = assistant.handle(input);
        self.history.push(Turn {
            role: Role::User,
            text: input.to_string(),
        });
        self.history.push(Turn {
            role: Role::Bot,
            text: reply.answer.clone(),
        });
        Some(reply)
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }
}
