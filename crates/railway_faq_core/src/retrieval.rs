use crate::corpus::FaqCorpus;
use crate::model::{Decision, RetrievalMatch};

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let (dot, na, nb) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(d, aa, bb), (x, y)| {
            (d + (x * y), aa + (x * x), bb + (y * y))
        });

    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na.sqrt() * nb.sqrt())
    }
}

/// Highest scores first; equal scores keep their corpus order.
pub fn top_k(scores: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(k).collect()
}

pub fn top_match(scores: &[f32]) -> Option<(usize, f32)> {
    top_k(scores, 1).into_iter().next()
}

/// A hit needs a score strictly above `threshold`.
pub fn decide(scores: &[f32], corpus: &FaqCorpus, threshold: f32) -> RetrievalMatch {
    match top_match(scores) {
        Some((index, score)) if score > threshold => RetrievalMatch {
            entry_index: Some(index),
            answer: corpus.get(index).map(|e| e.answer.clone()),
            score,
            decision: Decision::Hit,
        },
        Some((index, score)) => RetrievalMatch {
            entry_index: Some(index),
            answer: None,
            score,
            decision: Decision::Miss,
        },
        None => RetrievalMatch {
            entry_index: None,
            answer: None,
            score: 0.0,
            decision: Decision::Miss,
        },
    }
}
