use crate::types::ValidationOutcome;

/// Terms that mark a community as focused on relationships/communication.
/// Their presence in a description earns a flat relevance bonus.
pub const RELATIONSHIP_TERMS: &[&str] = &[
    "relationship",
    "advice",
    "communication",
    "social",
    "interpersonal",
];

/// Score how relevant a community is to a search keyword. Additive:
/// +0.4 keyword in title, +0.3 in description, +0.3 in name, +0.2 bonus if
/// the description mentions any relationship/communication term. Capped at 1.0.
pub fn relevance(title: &str, description: &str, name: &str, keyword: &str) -> f64 {
    let keyword = keyword.to_lowercase();
    let title = title.to_lowercase();
    let description = description.to_lowercase();
    let name = name.to_lowercase();

    let mut score: f64 = 0.0;

    if title.contains(&keyword) {
        score += 0.4;
    }
    if description.contains(&keyword) {
        score += 0.3;
    }
    if name.contains(&keyword) {
        score += 0.3;
    }
    if RELATIONSHIP_TERMS.iter().any(|t| description.contains(t)) {
        score += 0.2;
    }

    score.min(1.0)
}

/// Combine per-community validation scores into one overall score.
///
/// Each result is weighted by relevance and sample size:
/// `weight = relevance_score * (1 + 0.1 * snippet_count)`. The weighted mean
/// falls back to a neutral 0.5 when total weight is zero. The final score
/// blends in the verdict's self-reported confidence (70/30) and is clamped
/// to at most 1.0.
///
/// An empty result list short-circuits to 0.0 — no evidence at all is scored
/// lower than evidence with zero weight.
pub fn aggregate(results: &[ValidationOutcome], base_confidence: f64) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let mut total_weight = 0.0;
    let mut weighted_score = 0.0;

    for result in results {
        let weight = result.relevance_score * (1.0 + result.snippets.len() as f64 * 0.1);
        weighted_score += result.validation_score * weight;
        total_weight += weight;
    }

    let base_score = if total_weight > 0.0 {
        weighted_score / total_weight
    } else {
        0.5
    };

    let adjusted = base_score * 0.7 + base_confidence * 0.3;
    adjusted.min(1.0)
}
