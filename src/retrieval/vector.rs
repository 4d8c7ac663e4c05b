use crate::error::AskError;

/// Dense vector produced by the embedder.
pub type Embedding = Vec<f32>;

/// Cosine similarity between two embeddings of equal, non-zero length.
///
/// If either vector has zero norm the denominator is taken as 1, so the
/// result is the plain dot product (0 for an all-zero vector).
pub fn similarity(a: &[f32], b: &[f32]) -> Result<f32, AskError> {
    if a.len() != b.len() || a.is_empty() {
        return Err(AskError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }

    let (mut dot, mut na, mut nb) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }

    let denom = na.sqrt() * nb.sqrt();
    let denom = if denom == 0.0 { 1.0 } else { denom };
    Ok(dot / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_identical_unit_vectors() {
        let a = [0.6, 0.8];
        assert!((similarity(&a, &a).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert!(similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < EPS);
    }

    #[test]
    fn test_opposite_vectors() {
        assert!((similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap() + 1.0).abs() < EPS);
    }

    #[test]
    fn test_magnitude_does_not_matter() {
        let s = similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((s - 1.0).abs() < EPS);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        assert_eq!(similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            AskError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_empty_vectors_rejected() {
        assert!(matches!(
            similarity(&[], &[]),
            Err(AskError::DimensionMismatch { .. })
        ));
    }
}
