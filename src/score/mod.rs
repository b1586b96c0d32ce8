//! Matching quality score.
//!
//! Each matched agent contributes `10 / rank²`; unmatched agents contribute
//! nothing. A first choice is worth 10, a second 2.5, a third about 1.11,
//! so the score rewards first-choice satisfaction over raw match count.
//! Higher is better.

use crate::engine::Matching;

/// Points awarded for a first-choice match.
pub const FIRST_CHOICE_POINTS: f64 = 10.0;

/// Score contribution of a single realized rank. `0` means unmatched.
///
/// # Examples
///
/// ```
/// use u_matching::score::rank_score;
///
/// assert_eq!(rank_score(1), 10.0);
/// assert_eq!(rank_score(2), 2.5);
/// assert_eq!(rank_score(0), 0.0);
/// ```
pub fn rank_score(rank: usize) -> f64 {
    if rank == 0 {
        return 0.0;
    }
    let r = rank as f64;
    FIRST_CHOICE_POINTS / (r * r)
}

/// Sums [`rank_score`] over a slice of realized ranks.
pub fn score_ranks(ranks: &[usize]) -> f64 {
    ranks.iter().map(|&r| rank_score(r)).sum()
}

/// Aggregate score of a completed matching.
pub fn score(matching: &Matching) -> f64 {
    score_ranks(matching.ranks())
}
