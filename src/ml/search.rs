//! Exact cosine similarity search
//!
//! Linear top-k scan over a [`Collection`]. Scores are cosine similarities in
//! `[-1, 1]`, higher meaning closer. A zero-norm vector on either side scores
//! `0.0` instead of dividing by zero.

use crate::error::{RagError, Result};
use crate::storage::collection::Collection;
use crate::storage::schema::Movie;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Search result with similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Matched record
    pub record: Movie,
    /// Cosine similarity (higher = closer)
    pub score: f32,
}

/// Dot product, accumulated in `f64`.
///
/// `a` and `b` must have the same length.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "dot_product on vectors of different length");
    dot_f64(a, b) as f32
}

/// Euclidean norm (L2), accumulated in `f64`
pub fn l2_norm(v: &[f32]) -> f32 {
    norm_f64(v) as f32
}

fn dot_f64(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum()
}

fn norm_f64(v: &[f32]) -> f64 {
    v.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>().sqrt()
}

/// Cosine similarity, `0.0` if either vector has zero norm.
///
/// `a` and `b` must have the same length. Sums run in `f64`, so the score does
/// not depend on the scale of either vector across the `f32` range.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "cosine_similarity on vectors of different length");
    let norm_a = norm_f64(a);
    let norm_b = norm_f64(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot_f64(a, b) / (norm_a * norm_b)).clamp(-1.0, 1.0) as f32
    }
}

/// Sort key for a score: NaN (from non-finite input) ranks last
fn rank_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

/// Return at most `top` records of `collection` ranked by cosine similarity to `query`.
///
/// Ties keep insertion order. An empty collection yields no results for any
/// query; otherwise `query` must match the collection dimension.
pub fn search(query: &[f32], collection: &Collection, top: usize) -> Result<Vec<SearchResult>> {
    if collection.is_empty() {
        log::debug!("Collection '{}' is empty, returning no results", collection.name());
        return Ok(Vec::new());
    }

    if query.len() != collection.dimension() {
        return Err(RagError::DimensionMismatch {
            expected: collection.dimension(),
            actual: query.len(),
        });
    }

    if top == 0 {
        return Ok(Vec::new());
    }

    let mut scored: Vec<(&Movie, f32)> = collection
        .get_all()
        .map(|record| (record, cosine_similarity(query, &record.vector)))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| {
        rank_key(b.1)
            .partial_cmp(&rank_key(a.1))
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(top);

    let results: Vec<SearchResult> = scored
        .into_iter()
        .map(|(record, score)| SearchResult {
            record: record.clone(),
            score,
        })
        .collect();

    log::debug!(
        "Search over '{}' returned {} results for top={}",
        collection.name(),
        results.len(),
        top
    );
    Ok(results)
}
