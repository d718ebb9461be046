//! Cosine similarity between TF-IDF vectors.

use crate::error::{Error, Result};
use crate::vectorize::TfIdfVector;

/// Cosine similarity of `a` and `b`, clamped to `[0.0, 1.0]`.
///
/// Returns `0.0` when either vector has zero norm. Vectors built by the
/// same [`vectorize`](crate::vectorize::vectorize) call always have equal
/// length; anything else is [`Error::InvalidInput`].
pub fn cosine_similarity(a: &TfIdfVector, b: &TfIdfVector) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::invalid(format!(
            "vector length mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorize::vectorize;

    fn v(w: &[f64]) -> TfIdfVector {
        TfIdfVector::new(w.to_vec())
    }

    #[test]
    fn test_identical() {
        let a = v(&[1.0, 2.0, 3.0]);
        assert!((cosine_similarity(&a, &a).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal() {
        let sim = cosine_similarity(&v(&[1.0, 0.0]), &v(&[0.0, 1.0])).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_zero_norm_is_zero() {
        let z = v(&[0.0, 0.0]);
        assert_eq!(cosine_similarity(&z, &v(&[1.0, 1.0])).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&z, &z).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&v(&[]), &v(&[])).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let err = cosine_similarity(&v(&[1.0, 2.0]), &v(&[1.0])).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let m = vectorize(&[
            "solar panel photovoltaic energy",
            "solar energy storage battery",
            "quantum cryptography entanglement",
            "",
        ]);
        for a in &m.vectors {
            for b in &m.vectors {
                let ab = cosine_similarity(a, b).unwrap();
                let ba = cosine_similarity(b, a).unwrap();
                assert_eq!(ab, ba);
                assert!((0.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_self_similarity_of_documents() {
        let m = vectorize(&["graphene water filtration", "neural network diagnosis"]);
        for a in &m.vectors {
            assert!((cosine_similarity(a, a).unwrap() - 1.0).abs() < 1e-9);
        }
    }
}
