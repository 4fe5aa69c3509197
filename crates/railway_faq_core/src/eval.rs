use crate::corpus::FALLBACK_ANSWER;
use crate::matcher::Matcher;
use crate::model::Decision;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub case_id: String,
    pub question: String,
    /// `null` means the fallback message is expected.
    pub expected_answer: Option<String>,
    #[serde(default)]
    pub min_similarity: Option<f32>,
}

impl EvalCase {
    pub fn expected_decision(&self) -> Decision {
        if self.expected_answer.is_some() {
            Decision::Hit
        } else {
            Decision::Miss
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalOutcome {
    pub case_id: String,
    pub passed: bool,
    pub actual_decision: Decision,
    pub actual_entry: Option<usize>,
    pub actual_answer: String,
    pub score: f32,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f32,
    pub outcomes: Vec<EvalOutcome>,
}

pub struct CaseExpectation;

impl CaseExpectation {
    pub fn matches(
        case: &EvalCase,
        actual_decision: Decision,
        actual_answer: Option<&str>,
        score: f32,
    ) -> bool {
        if case.expected_decision() != actual_decision {
            return false;
        }

        if let Some(expected) = case.expected_answer.as_deref() {
            if actual_answer != Some(expected) {
                return false;
            }
        }

        if let Some(min_sim) = case.min_similarity {
            if score < min_sim {
                return false;
            }
        }

        true
    }
}

pub fn evaluate_cases(matcher: &Matcher, cases: &[EvalCase]) -> EvalSummary {
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in cases {
        let start = Instant::now();
        let result = matcher.best_match(&case.question);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let passed = CaseExpectation::matches(
            case,
            result.decision,
            result.answer.as_deref(),
            result.score,
        );

        outcomes.push(EvalOutcome {
            case_id: case.case_id.clone(),
            passed,
            actual_decision: result.decision,
            actual_entry: result.entry_index,
            actual_answer: result
                .answer
                .unwrap_or_else(|| FALLBACK_ANSWER.to_string()),
            score: result.score,
            latency_ms,
        });
    }

    let total = outcomes.len();
    let passed = outcomes.iter().filter(|o| o.passed).count();
    let failed = total.saturating_sub(passed);
    let pass_rate = if total == 0 {
        0.0
    } else {
        passed as f32 / total as f32
    };

    EvalSummary {
        total,
        passed,
        failed,
        pass_rate,
        outcomes,
    }
}
