use crate::models::prediction::{ClassProbability, RankedResult};
use std::cmp::Ordering;

/// Pick the `k` most probable classes, highest first.
///
/// The sort is stable, so equal probabilities keep ascending class order.
/// Asking for more classes than exist returns all of them. Labels past
/// `u8::MAX` cannot be represented and are skipped.
pub fn top_k(probs: &[f64], k: usize) -> RankedResult {
    let mut pairs: Vec<ClassProbability> = probs
        .iter()
        .enumerate()
        .filter_map(|(digit, &prob)| {
            u8::try_from(digit)
                .ok()
                .map(|digit| ClassProbability::new(digit, prob))
        })
        .collect();

    pairs.sort_by(|a, b| b.prob.partial_cmp(&a.prob).unwrap_or(Ordering::Equal));
    pairs.truncate(k);

    RankedResult::new(pairs)
}
