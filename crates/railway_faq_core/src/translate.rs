//! Best-effort translation of queries into the matching language.

use std::time::Duration;

use serde_json::Value;

use crate::error::{FaqError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_TARGET_LANG: &str = "en";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub source_lang: Option<String>,
}

pub trait Translator {
    fn translate(&self, text: &str) -> Result<Translation>;
}

/// Outcome of [`normalize`]: either translated text or the untouched input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Translated {
        text: String,
        source_lang: Option<String>,
    },
    Original {
        text: String,
        /// Why translation was skipped or failed; `None` for blank input.
        reason: Option<String>,
    },
}

impl Normalized {
    pub fn text(&self) -> &str {
        match self {
            Normalized::Translated { text, .. } | Normalized::Original { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Original { .. })
    }
}

/// Translates `text`, handing back the input unchanged on any failure.
pub fn normalize<T: Translator + ?Sized>(translator: &T, text: &str) -> Normalized {
    if text.trim().is_empty() {
        return Normalized::Original {
            text: text.to_string(),
            reason: None,
        };
    }

    match translator.translate(text) {
        Ok(translation) => Normalized::Translated {
            text: translation.text,
            source_lang: translation.source_lang,
        },
        Err(err) => {
            tracing::warn!(error = %err, "translation failed, matching original text");
            Normalized::Original {
                text: text.to_string(),
                reason: Some(err.to_string()),
            }
        }
    }
}

/// Client for the public `translate_a/single` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::blocking::Client,
    endpoint: String,
    target_lang: String,
}

impl HttpTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        target_lang: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            target_lang: target_lang.into(),
        })
    }
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str) -> Result<Translation> {
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()?
            .error_for_status()?
            .text()?;

        parse_response(&body)
    }
}

/// Payload shape: `[[["translated", "source", ...], ...], null, "detected-lang", ...]`.
fn parse_response(body: &str) -> Result<Translation> {
    let value: Value = serde_json::from_str(body)?;
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| FaqError::Translation("missing segment list".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        return Err(FaqError::Translation("empty translation".to_string()));
    }

    let source_lang = value.get(2).and_then(Value::as_str).map(str::to_string);

    Ok(Translation { text, source_lang })
}
