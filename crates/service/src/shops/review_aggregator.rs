//! Derived review figures for a shop.

use models::{Comment, ShopRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewSummary {
    pub total_review: u64,
    pub average_review: f64,
}

/// Count and mean of `review`, the mean rounded to two decimals.
/// An empty ledger yields zero, never NaN.
pub fn recompute(comments: &[Comment]) -> ReviewSummary {
    if comments.is_empty() {
        return ReviewSummary { total_review: 0, average_review: 0.0 };
    }
    let total = comments.len() as f64;
    let sum: f64 = comments.iter().map(|c| c.review).sum();
    let mean = if sum.is_finite() {
        sum / total
    } else {
        // Large reviews overflow the plain sum; scaling first keeps the mean finite.
        comments.iter().map(|c| c.review / total).sum()
    };
    ReviewSummary { total_review: comments.len() as u64, average_review: round2(mean) }
}

/// Overwrite the shop's aggregate fields from its comments.
pub fn apply(shop: &mut ShopRecord) {
    let summary = recompute(&shop.comments);
    shop.total_review = summary.total_review;
    shop.average_review = summary.average_review;
}

/// Magnitudes past 2^52 carry no fractional digits, and scaling them can overflow.
fn round2(v: f64) -> f64 {
    if v.abs() >= 4_503_599_627_370_496.0 {
        return v;
    }
    (v * 100.0).round() / 100.0
}
