//! Stage 3: sample each relevant community's content and ask the verdict
//! service whether the community's discourse corroborates the toxicity
//! judgment. A failure on one community skips it; the stage continues.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use ai_client::VerdictModel;
use voxpop_common::{
    clip_bytes, detect_patterns, ChatAnalysis, CommunityCandidate, ContentSnippet,
    ValidationOutcome,
};

use crate::consensus::ConsensusStance;
use crate::rate_limit::RateLimiter;
use crate::traits::CommunitySearch;

/// At most this many communities are validated per run.
pub const MAX_COMMUNITIES: usize = 3;
/// At most this many search terms per community.
pub const MAX_TERMS_PER_COMMUNITY: usize = 3;
/// Posts requested per term search.
pub const POSTS_PER_TERM: u32 = 5;
/// Cap on snippets kept per community.
pub const MAX_SNIPPETS: usize = 10;
/// Snippets included in the consensus prompt.
pub const SNIPPETS_IN_PROMPT: usize = 5;
/// Snippet bodies are bounded to this many bytes on ingest.
pub const SNIPPET_BODY_MAX_BYTES: usize = 1000;
/// Snippet bodies are further truncated to this inside the prompt.
const PROMPT_BODY_MAX_BYTES: usize = 200;

const SENTIMENT_SYSTEM: &str =
    "You analyze community consensus on social behavior issues.";

pub async fn validate_communities(
    model: &dyn VerdictModel,
    search: &dyn CommunitySearch,
    limiter: &RateLimiter,
    analysis: &ChatAnalysis,
    candidates: &[CommunityCandidate],
) -> Vec<ValidationOutcome> {
    let terms = analysis.search_terms();
    let mut outcomes = Vec::new();

    for candidate in candidates.iter().take(MAX_COMMUNITIES) {
        let snippets = fetch_snippets(search, limiter, &candidate.name, &terms).await;
        if snippets.is_empty() {
            info!(community = %candidate.name, "No matching posts, skipping community");
            continue;
        }

        let prompt = sentiment_prompt(analysis, &snippets);
        let summary = match model.generate(&prompt, SENTIMENT_SYSTEM).await {
            Ok(s) => s,
            Err(e) => {
                warn!(community = %candidate.name, error = %e, "Consensus summarization failed, skipping community");
                continue;
            }
        };

        let stance = ConsensusStance::classify(&summary);
        info!(
            community = %candidate.name,
            ?stance,
            snippets = snippets.len(),
            "Community validated"
        );

        outcomes.push(ValidationOutcome {
            community_name: candidate.name.clone(),
            relevance_score: candidate.relevance_score,
            snippets,
            consensus_summary: summary,
            validation_score: stance.score(),
        });
    }

    outcomes
}

/// Search one community for each term, convert hits into bounded snippets.
/// A failed term search is logged and skipped.
async fn fetch_snippets(
    search: &dyn CommunitySearch,
    limiter: &RateLimiter,
    community: &str,
    terms: &[String],
) -> Vec<ContentSnippet> {
    let mut snippets = Vec::new();

    for term in terms.iter().take(MAX_TERMS_PER_COMMUNITY) {
        match search.search_posts(community, term, POSTS_PER_TERM).await {
            Ok(posts) => {
                for post in posts {
                    let body = clip_bytes(&post.selftext, SNIPPET_BODY_MAX_BYTES).to_string();
                    let pattern_hits = detect_patterns(&format!("{} {}", post.title, body));
                    snippets.push(ContentSnippet {
                        title: post.title,
                        body,
                        upvotes: post.ups,
                        comment_count: post.num_comments,
                        permalink: post.permalink,
                        created_at: DateTime::from_timestamp(post.created_utc as i64, 0)
                            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
                        matched_term: term.clone(),
                        pattern_hits,
                    });
                }
            }
            Err(e) => {
                warn!(community, term, error = %e, "Post search failed, skipping term");
            }
        }
        limiter.acquire().await;
    }

    snippets.truncate(MAX_SNIPPETS);
    snippets
}

pub fn sentiment_prompt(analysis: &ChatAnalysis, snippets: &[ContentSnippet]) -> String {
    let posts_summary = snippets
        .iter()
        .take(SNIPPETS_IN_PROMPT)
        .map(|s| {
            format!(
                "Post: {}\nContent: {}\nUpvotes: {}\nComments: {}",
                s.title,
                clip_bytes(&s.body, PROMPT_BODY_MAX_BYTES),
                s.upvotes,
                s.comment_count,
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Based on these community posts about similar communication issues, what is the \
         general human consensus?\n\
         \n\
         ORIGINAL TOXICITY ANALYSIS:\n\
         - Level: {}\n\
         - Behaviors: {}\n\
         - Flagged Phrases: {}\n\
         \n\
         COMMUNITY POSTS:\n\
         {}\n\
         \n\
         Determine if the human consensus from these discussions:\n\
         1. Supports the toxicity analysis\n\
         2. Partially supports it\n\
         3. Contradicts it\n\
         4. Is inconclusive\n\
         \n\
         Provide a brief summary of the human perspective.",
        analysis.toxicity_level,
        analysis.behaviors.join(", "),
        analysis.flagged_phrases.join(", "),
        posts_summary,
    )
}
