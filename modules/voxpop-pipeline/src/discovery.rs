//! Stage 2: turn the analysis's vocabulary into search keywords and find
//! communities discussing similar issues. One candidate at a time; a failed
//! search skips that keyword and the stage continues.

use std::collections::HashSet;

use tracing::{info, warn};

use voxpop_common::{scoring, CommunityCandidate};

use crate::rate_limit::RateLimiter;
use crate::traits::CommunitySearch;

/// At most this many keywords are searched per run.
pub const MAX_DISCOVERY_KEYWORDS: usize = 5;
/// Results requested per community search.
pub const RESULTS_PER_SEARCH: u32 = 5;
/// Candidates below this relevance are dropped.
pub const MIN_RELEVANCE: f64 = 0.3;
/// Cap on the ranked candidate list.
pub const MAX_CANDIDATES: usize = 10;

pub async fn discover(
    search: &dyn CommunitySearch,
    limiter: &RateLimiter,
    keywords: &[String],
) -> Vec<CommunityCandidate> {
    let mut candidates = Vec::new();

    for keyword in keywords.iter().take(MAX_DISCOVERY_KEYWORDS) {
        match search.search_communities(keyword, RESULTS_PER_SEARCH).await {
            Ok(results) => {
                for info in results {
                    let score = scoring::relevance(
                        &info.title,
                        &info.public_description,
                        &info.display_name,
                        keyword,
                    );
                    if score > MIN_RELEVANCE {
                        candidates.push(CommunityCandidate {
                            name: info.display_name,
                            title: info.title,
                            description: info.public_description,
                            subscribers: info.subscribers.unwrap_or(0),
                            url: info.url,
                            source_keyword: keyword.clone(),
                            relevance_score: score,
                        });
                    }
                }
            }
            Err(e) => {
                warn!(keyword, error = %e, "Community search failed, skipping keyword");
            }
        }
        limiter.acquire().await;
    }

    let ranked = rank_candidates(candidates);
    info!(communities = ranked.len(), "Community discovery complete");
    ranked
}

/// Dedup by name (first occurrence wins), sort by relevance descending
/// (stable, so equal scores keep discovery order), cap the list.
pub fn rank_candidates(candidates: Vec<CommunityCandidate>) -> Vec<CommunityCandidate> {
    let mut seen = HashSet::new();
    let mut unique: Vec<CommunityCandidate> = candidates
        .into_iter()
        .filter(|c| seen.insert(c.name.clone()))
        .collect();

    unique.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    unique.truncate(MAX_CANDIDATES);
    unique
}
