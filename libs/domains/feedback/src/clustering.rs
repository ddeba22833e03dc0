//! K-means style clustering over cosine similarity.
//!
//! Vectors are assigned to the most similar centroid (not the nearest by
//! distance), centroids move to the mean of their members, and the loop stops
//! once the centroids no longer change.

use rand::Rng;
use rand::seq::index;
use thiserror::Error;
use tracing::debug;

use crate::similarity::cosine_similarity;

pub const DEFAULT_MAX_ITERATIONS: usize = 100;

pub const MIN_CLUSTERS: usize = 2;
pub const MAX_CLUSTERS: usize = 6;
pub const ITEMS_PER_CLUSTER: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("cannot cluster an empty set of vectors")]
    EmptyInput,

    #[error("cluster count must be at least 1")]
    ZeroClusters,

    #[error("requested {k} clusters from only {available} vectors")]
    TooManyClusters { k: usize, available: usize },

    #[error("vector {index} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Roughly one cluster per five items, never fewer than 2 nor more than 6.
pub fn cluster_count(item_count: usize) -> usize {
    (item_count / ITEMS_PER_CLUSTER).clamp(MIN_CLUSTERS, MAX_CLUSTERS)
}

/// Partition `vectors` into `k` clusters and return the cluster index of each vector.
///
/// Initial centroids are `k` distinct input vectors drawn from `rng`, so the
/// result depends on the generator; pass a seeded one for reproducible output.
/// Clusters may end up empty.
///
/// A `max_iterations` of 0 is treated as 1: at least one assignment pass
/// always runs, so every vector gets a cluster index.
pub fn cluster<R: Rng + ?Sized>(
    vectors: &[Vec<f32>],
    k: usize,
    max_iterations: usize,
    rng: &mut R,
) -> Result<Vec<usize>, ClusterError> {
    let dimension = check_preconditions(vectors, k)?;

    let mut centroids: Vec<Vec<f32>> = index::sample(rng, vectors.len(), k)
        .into_vec()
        .into_iter()
        .map(|i| vectors[i].clone())
        .collect();

    let mut assignments = Vec::new();
    for iteration in 0..max_iterations.max(1) {
        assignments = vectors
            .iter()
            .map(|vector| most_similar_centroid(vector, &centroids))
            .collect();

        let updated = recompute_centroids(vectors, &assignments, &centroids, dimension);
        if updated == centroids {
            debug!(iteration, k, "Clustering converged");
            break;
        }
        centroids = updated;
    }

    Ok(assignments)
}

fn check_preconditions(vectors: &[Vec<f32>], k: usize) -> Result<usize, ClusterError> {
    let first = vectors.first().ok_or(ClusterError::EmptyInput)?;
    if k == 0 {
        return Err(ClusterError::ZeroClusters);
    }
    if k > vectors.len() {
        return Err(ClusterError::TooManyClusters {
            k,
            available: vectors.len(),
        });
    }

    let expected = first.len();
    if let Some((index, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != expected) {
        return Err(ClusterError::DimensionMismatch {
            index,
            expected,
            found: v.len(),
        });
    }
    Ok(expected)
}

// Ties go to the lowest centroid index.
fn most_similar_centroid(vector: &[f32], centroids: &[Vec<f32>]) -> usize {
    let mut best = 0;
    let mut best_score = f32::NEG_INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let score = cosine_similarity(vector, centroid);
        if score > best_score {
            best = i;
            best_score = score;
        }
    }
    best
}

// Centroids with no members are carried over unchanged.
fn recompute_centroids(
    vectors: &[Vec<f32>],
    assignments: &[usize],
    previous: &[Vec<f32>],
    dimension: usize,
) -> Vec<Vec<f32>> {
    let mut sums = vec![vec![0.0f32; dimension]; previous.len()];
    let mut counts = vec![0usize; previous.len()];

    for (vector, &c) in vectors.iter().zip(assignments) {
        counts[c] += 1;
        for (sum, value) in sums[c].iter_mut().zip(vector) {
            *sum += value;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((mut sum, count), old)| {
            if count == 0 {
                return old.clone();
            }
            let n = count as f32;
            sum.iter_mut().for_each(|v| *v /= n);
            sum
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn two_directions() -> Vec<Vec<f32>> {
        vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.0, 1.0],
            vec![0.1, 0.9],
        ]
    }

    fn pseudo_random_vectors(n: usize, dim: usize, seed: u64) -> Vec<Vec<f32>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| (0..dim).map(|_| rng.random_range(-1.0f32..1.0)).collect())
            .collect()
    }

    #[test]
    fn test_cluster_count() {
        assert_eq!(cluster_count(0), 2);
        assert_eq!(cluster_count(3), 2);
        assert_eq!(cluster_count(12), 2);
        assert_eq!(cluster_count(15), 3);
        assert_eq!(cluster_count(29), 5);
        assert_eq!(cluster_count(30), 6);
        assert_eq!(cluster_count(500), 6);
    }

    #[test]
    fn test_output_shape() {
        let vectors = pseudo_random_vectors(40, 8, 1);
        for k in 1..=6 {
            let mut rng = StdRng::seed_from_u64(k as u64);
            let assignments = cluster(&vectors, k, DEFAULT_MAX_ITERATIONS, &mut rng).unwrap();

            assert_eq!(assignments.len(), vectors.len());
            assert!(assignments.iter().all(|&c| c < k));
            let used: HashSet<_> = assignments.iter().collect();
            assert!(used.len() <= k);
        }
    }

    #[test]
    fn test_separates_distinct_directions() {
        let vectors = two_directions();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let a = cluster(&vectors, 2, DEFAULT_MAX_ITERATIONS, &mut rng).unwrap();

            assert_eq!(a[0], a[1], "seed {seed}");
            assert_eq!(a[2], a[3], "seed {seed}");
            assert_ne!(a[0], a[2], "seed {seed}");
        }
    }

    #[test]
    fn test_same_seed_same_partition() {
        let vectors = pseudo_random_vectors(30, 5, 9);
        let first = cluster(&vectors, 4, 100, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = cluster(&vectors, 4, 100, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ties_go_to_lowest_centroid() {
        let vectors = vec![vec![2.0, 1.0]; 4];
        let mut rng = StdRng::seed_from_u64(3);
        let assignments = cluster(&vectors, 3, 10, &mut rng).unwrap();
        assert_eq!(assignments, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_zero_vectors_land_in_first_cluster() {
        let vectors = vec![vec![0.0, 0.0]; 3];
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(cluster(&vectors, 2, 10, &mut rng).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_single_cluster() {
        let vectors = pseudo_random_vectors(7, 3, 5);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(cluster(&vectors, 1, 10, &mut rng).unwrap(), vec![0; 7]);
    }

    #[test]
    fn test_zero_iterations_still_assigns() {
        let vectors = two_directions();
        let mut rng = StdRng::seed_from_u64(11);
        let assignments = cluster(&vectors, 2, 0, &mut rng).unwrap();
        assert_eq!(assignments.len(), 4);
    }

    #[test]
    fn test_precondition_errors() {
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(cluster(&[], 2, 10, &mut rng), Err(ClusterError::EmptyInput));
        assert_eq!(
            cluster(&two_directions(), 0, 10, &mut rng),
            Err(ClusterError::ZeroClusters)
        );
        assert_eq!(
            cluster(&two_directions(), 5, 10, &mut rng),
            Err(ClusterError::TooManyClusters { k: 5, available: 4 })
        );
        assert_eq!(
            cluster(&[vec![1.0, 0.0], vec![1.0]], 1, 10, &mut rng),
            Err(ClusterError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_recompute_keeps_empty_centroid() {
        let vectors = vec![vec![1.0, 0.0], vec![3.0, 2.0]];
        let previous = vec![vec![0.0, 0.0], vec![5.0, 5.0]];
        let updated = recompute_centroids(&vectors, &[0, 0], &previous, 2);
        assert_eq!(updated, vec![vec![2.0, 1.0], vec![5.0, 5.0]]);
    }
}
