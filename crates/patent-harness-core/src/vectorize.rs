//! TF-IDF vectorization over a shared, per-call vocabulary.
//!
//! # Weighting
//!
//! 1. `tf(t, d) = count(t, d) / tokens(d)`
//! 2. `idf(t) = ln((1 + N) / (1 + df(t))) + 1`
//! 3. `w(t, d) = tf × idf`, then each document vector is L2-normalized.
//!
//! Column order is the lexicographic order of terms, so the same input
//! always produces bit-identical vectors.

use std::collections::{BTreeSet, HashMap};

use crate::tokenize::tokenize;

/// Term → column mapping for one batch of documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_sorted(terms: BTreeSet<String>) -> Self {
        let terms: Vec<String> = terms.into_iter().collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, index }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column of `term`, if it is part of the vocabulary.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Dense TF-IDF weights aligned to a [`Vocabulary`].
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfVector(Vec<f64>);

impl TfIdfVector {
    pub fn new(weights: Vec<f64>) -> Self {
        Self(weights)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|w| *w == 0.0)
    }
}

/// Output of [`vectorize`]: one vector per input document, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfMatrix {
    pub vocabulary: Vocabulary,
    pub vectors: Vec<TfIdfVector>,
}

/// Vectorize `docs` against a vocabulary built from exactly these documents.
///
/// Documents with no surviving tokens produce zero vectors.
pub fn vectorize<S: AsRef<str>>(docs: &[S]) -> TfIdfMatrix {
    let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d.as_ref())).collect();

    let vocabulary = Vocabulary::from_sorted(tokenized.iter().flatten().cloned().collect());
    let n_terms = vocabulary.len();

    let mut df = vec![0usize; n_terms];
    let mut counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(tokenized.len());
    for tokens in &tokenized {
        let mut tc: HashMap<usize, usize> = HashMap::new();
        for t in tokens {
            if let Some(col) = vocabulary.get(t) {
                *tc.entry(col).or_insert(0) += 1;
            }
        }
        for col in tc.keys() {
            df[*col] += 1;
        }
        counts.push(tc);
    }

    let n_docs = tokenized.len() as f64;
    let idf: Vec<f64> = df
        .iter()
        .map(|&d| ((1.0 + n_docs) / (1.0 + d as f64)).ln() + 1.0)
        .collect();

    let vectors = tokenized
        .iter()
        .zip(counts.iter())
        .map(|(tokens, tc)| {
            let mut weights = vec![0.0f64; n_terms];
            if tokens.is_empty() {
                return TfIdfVector(weights);
            }
            let total = tokens.len() as f64;
            for (&col, &count) in tc {
                weights[col] = (count as f64 / total) * idf[col];
            }
            let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for w in weights.iter_mut() {
                    *w /= norm;
                }
            }
            TfIdfVector(weights)
        })
        .collect();

    TfIdfMatrix {
        vocabulary,
        vectors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sorted_and_stop_words_removed() {
        let m = vectorize(&["the zebra and the apple", "mango"]);
        assert_eq!(m.vocabulary.terms(), &["apple", "mango", "zebra"]);
        assert_eq!(m.vocabulary.get("apple"), Some(0));
        assert_eq!(m.vocabulary.get("the"), None);
    }

    #[test]
    fn test_vectors_aligned_and_normalized() {
        let m = vectorize(&["solar panel energy", "solar cell", "quantum"]);
        assert_eq!(m.vectors.len(), 3);
        for v in &m.vectors {
            assert_eq!(v.len(), m.vocabulary.len());
            assert!((v.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rarer_term_weighs_more() {
        let m = vectorize(&["solar panel", "solar cell", "solar roof"]);
        let v = m.vectors[0].as_slice();
        let solar = m.vocabulary.get("solar").unwrap();
        let panel = m.vocabulary.get("panel").unwrap();
        assert!(v[panel] > v[solar]);
    }

    #[test]
    fn test_empty_document_is_zero_vector() {
        let m = vectorize(&["", "solar panel"]);
        assert!(m.vectors[0].is_zero());
        assert_eq!(m.vectors[0].norm(), 0.0);
        assert!(!m.vectors[1].is_zero());
    }

    #[test]
    fn test_all_empty_documents() {
        let m = vectorize(&["", "of the"]);
        assert!(m.vocabulary.is_empty());
        assert!(m.vectors.iter().all(|v| v.is_empty()));
    }

    #[test]
    fn test_no_documents() {
        let docs: [&str; 0] = [];
        let m = vectorize(&docs);
        assert!(m.vocabulary.is_empty());
        assert!(m.vectors.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let docs = ["wireless power transmission", "wireless home fridge", "power grid"];
        assert_eq!(vectorize(&docs), vectorize(&docs));
    }
}
