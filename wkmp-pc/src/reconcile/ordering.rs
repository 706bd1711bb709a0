//! Acclaim ordering comparator
//!
//! Shared by the reconciler and the allocator's hit re-derivation so both
//! agree on what "rank 1" means.

use std::cmp::Ordering;

/// Sort key for one track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankKey {
    pub rating: Option<f64>,
    pub score: Option<f64>,
    /// Original position; `None` sorts after every known position
    pub position: Option<u32>,
    pub title: String,
}

/// rating desc, score desc (nulls last), position asc (missing last), title asc
pub fn compare(a: &RankKey, b: &RankKey) -> Ordering {
    desc_nulls_last(a.rating, b.rating)
        .then_with(|| desc_nulls_last(a.score, b.score))
        .then_with(|| asc_missing_last(a.position, b.position))
        .then_with(|| a.title.cmp(&b.title))
}

/// Stable sort of `items` by the key each one maps to
pub fn sort_by_acclaim<T, F>(items: Vec<T>, key_of: F) -> Vec<T>
where
    F: Fn(&T) -> RankKey,
{
    let mut keyed: Vec<(RankKey, T)> = items.into_iter().map(|t| (key_of(&t), t)).collect();
    keyed.sort_by(|a, b| compare(&a.0, &b.0));
    keyed.into_iter().map(|(_, t)| t).collect()
}

fn desc_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn asc_missing_last(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
