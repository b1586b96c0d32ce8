//! Seed candidates and their ordering.

use std::cmp::Ordering;

/// Summary of one seed trial.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedCandidate {
    pub seed: u64,
    /// Agents left without a slot.
    pub unmatched: usize,
    /// Slots with positive capacity that hold nobody.
    pub empty_slots: usize,
    /// Aggregate score, higher is better.
    pub score: f64,
}

impl SeedCandidate {
    /// Acceptance rule applied while a worker scans its seeds.
    ///
    /// The candidate replaces the current best only when it has no more
    /// unmatched agents *and* a strictly higher score. A candidate with
    /// fewer unmatched agents but a lower score does not replace it.
    pub fn replaces(&self, best: &SeedCandidate) -> bool {
        self.unmatched <= best.unmatched && self.score > best.score
    }

    /// Total quality order used to merge worker results.
    ///
    /// `Less` means `self` is better: fewer unmatched agents first, then a
    /// higher score, then the lower seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_matching::search::SeedCandidate;
    ///
    /// let c = |unmatched, score| SeedCandidate { seed: 0, unmatched, empty_slots: 0, score };
    /// assert!(c(2, 7.0).is_better_than(&c(2, 5.0)));
    /// assert!(c(1, 3.0).is_better_than(&c(2, 100.0)));
    /// ```
    pub fn cmp_quality(&self, other: &SeedCandidate) -> Ordering {
        self.unmatched
            .cmp(&other.unmatched)
            .then_with(|| other.score.total_cmp(&self.score))
            .then_with(|| self.seed.cmp(&other.seed))
    }

    pub fn is_better_than(&self, other: &SeedCandidate) -> bool {
        self.cmp_quality(other) == Ordering::Less
    }
}
