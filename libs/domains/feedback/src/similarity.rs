/// Cosine similarity between two equal-length vectors.
///
/// Returns 0.0 when either vector has zero magnitude. The result is not
/// clamped, so rounding can push it slightly outside [-1, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    let denominator = norm_a * norm_b;
    if denominator == 0.0 {
        return 0.0;
    }
    dot / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        for v in [vec![1.0, 2.0, 3.0], vec![-0.5, 0.25], vec![1e-3, 4.0, -7.5, 2.0]] {
            assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_vector() {
        let v = vec![1.0, 2.0, 3.0];
        let zero = vec![0.0; 3];
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_orthogonal_and_opposite() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_magnitude_invariant() {
        let a = vec![1.0, 2.0, 2.0];
        let b = vec![10.0, 20.0, 20.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            (vec![1.0, 0.5, -2.0], vec![0.3, -0.7, 1.1]),
            (vec![3.0, 4.0], vec![4.0, 3.0]),
            (vec![0.0, 1.0, 0.0], vec![2.0, 2.0, 2.0]),
        ];
        for (a, b) in pairs {
            assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
        }
    }
}
