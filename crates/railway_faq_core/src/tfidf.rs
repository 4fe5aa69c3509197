//! TF-IDF weighting over a handful of short documents.
//!
//! Tokens are lowercased runs of word characters at least two characters
//! long. A word character is a letter, a number or `_`; combining marks
//! split words. Weights are raw term counts times the smoothed inverse document
//! frequency `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalized.

use std::collections::BTreeMap;

use unicode_general_category::{get_general_category, GeneralCategory};

fn is_word_char(c: char) -> bool {
    use GeneralCategory::*;

    c == '_'
        || matches!(
            get_general_category(c),
            UppercaseLetter
                | LowercaseLetter
                | TitlecaseLetter
                | ModifierLetter
                | OtherLetter
                | DecimalNumber
                | LetterNumber
                | OtherNumber
        )
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Dense document-term matrix; rows follow the order of the fitted documents.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f32>,
    rows: Vec<Vec<f32>>,
}

impl TfidfMatrix {
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> =
            documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut vocabulary = BTreeMap::new();
        for token in tokenized.iter().flatten() {
            vocabulary.entry(token.clone()).or_insert(0usize);
        }
        for (i, idx) in vocabulary.values_mut().enumerate() {
            *idx = i;
        }

        let mut df = vec![0usize; vocabulary.len()];
        let mut counts = Vec::with_capacity(tokenized.len());
        for tokens in &tokenized {
            let mut tf = vec![0.0f32; vocabulary.len()];
            for token in tokens {
                tf[vocabulary[token]] += 1.0;
            }
            for (col, value) in tf.iter().enumerate() {
                if *value > 0.0 {
                    df[col] += 1;
                }
            }
            counts.push(tf);
        }

        let n = tokenized.len() as f32;
        let idf: Vec<f32> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|mut row| {
                for (value, weight) in row.iter_mut().zip(&idf) {
                    *value *= weight;
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        Self {
            vocabulary,
            idf,
            rows,
        }
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&col| self.idf[col])
    }
}

fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v {
            *x /= norm;
        }
    }
}
