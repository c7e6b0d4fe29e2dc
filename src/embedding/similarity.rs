//! Cosine similarity between embedding vectors

use crate::EmbedError;

/// Computes cosine similarity between two vectors
///
/// Returns exactly `0.0` when either vector has zero norm instead of
/// propagating a NaN. The result is not clamped; callers use it purely as a
/// sort key, so the natural [-1, 1] cosine range is fine.
///
/// # Arguments
///
/// * `a` - First vector
/// * `b` - Second vector, must have the same length as `a`
///
/// # Returns
///
/// * `Ok(f32)` - The cosine similarity
/// * `Err(EmbedError::DimensionMismatch)` - Vector lengths differ
///
/// # Example
///
/// ```
/// use lantern::embedding::cosine;
///
/// let sim = cosine(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
/// assert!((sim - 1.0).abs() < 1e-6);
/// ```
pub fn cosine(a: &[f32], b: &[f32]) -> Result<f32, EmbedError> {
    if a.len() != b.len() {
        return Err(EmbedError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}
