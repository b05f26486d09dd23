//! TF-IDF vectorizer.
//!
//! Tokens are lowercased runs of two or more alphanumeric or `_` characters.
//! The vocabulary is sorted so feature indices are stable across refits of
//! the same data. IDF is smoothed, `ln((1 + n) / (1 + df)) + 1`, and each
//! document vector is L2-normalized.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Sparse feature vector: `(feature index, weight)` sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Minimum token length in characters.
const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TfidfVectorizer {
    /// Sorted vocabulary; a term's index is its position.
    vocabulary: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF weights from a corpus.
    #[must_use]
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut n_documents = 0usize;

        for document in documents {
            n_documents += 1;
            let unique: BTreeSet<String> = tokenize(document).collect();
            for term in unique {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let n = n_documents as f64;
        let (vocabulary, idf) = document_frequency
            .into_iter()
            .map(|(term, df)| {
                #[allow(clippy::cast_precision_loss)]
                let weight = ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0;
                (term, weight)
            })
            .unzip();

        Self { vocabulary, idf }
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|probe| probe.as_str().cmp(term))
            .ok()
    }

    /// Vectorize one document. Terms outside the vocabulary are ignored.
    #[must_use]
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in tokenize(document) {
            if let Some(index) = self.index_of(&term) {
                *counts.entry(index).or_default() += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }

    pub fn transform_all<'a, I>(&self, documents: I) -> Vec<SparseVector>
    where
        I: IntoIterator<Item = &'a str>,
    {
        documents.into_iter().map(|doc| self.transform(doc)).collect()
    }
}

/// Split text into lowercase tokens of at least two word characters.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
}
