//! Dense ranking of closeness scores.

/// Ranks scores from highest (rank 1) to lowest.
///
/// Equal scores share a rank and the next distinct score takes the next
/// integer, so `[0.8, 0.8, 0.5]` ranks as `[1, 1, 2]`. Scores are compared
/// for exact equality.
pub fn dense_rank(scores: &[f64]) -> Vec<u32> {
    let mut distinct = scores.to_vec();
    distinct.sort_by(|a, b| b.total_cmp(a));
    distinct.dedup();

    scores
        .iter()
        .map(|score| {
            let position = distinct
                .binary_search_by(|candidate| score.total_cmp(candidate))
                .unwrap_or_else(|p| p);
            position as u32 + 1
        })
        .collect()
}
