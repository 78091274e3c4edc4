use serde::Serialize;
use uuid::Uuid;

use voxpop_common::{ChatAnalysis, ValidationOutcome};

use crate::consensus::ConsensusStance;

/// Terminal artifact of a pipeline run. Callers always receive one of these,
/// never a raw error: stage-1 failure produces the `failure` shape instead.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub chat_analysis: Option<ChatAnalysis>,
    pub reddit_validation: Option<RedditValidation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ReportMetadata>,
}

#[derive(Debug, Serialize)]
pub struct RedditValidation {
    pub relevant_subreddits_found: usize,
    pub validation_results: Vec<ValidationResultSummary>,
    pub overall_validation_score: f64,
    pub is_validated: bool,
}

#[derive(Debug, Serialize)]
pub struct ValidationResultSummary {
    pub subreddit: String,
    pub relevance_score: f64,
    pub human_consensus: String,
    pub stance: ConsensusStance,
    pub validation_score: f64,
    pub sample_posts: usize,
}

#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    pub run_id: Uuid,
    pub subreddits_analyzed: usize,
    pub posts_considered: usize,
}

impl ValidationReport {
    pub fn success(
        run_id: Uuid,
        analysis: ChatAnalysis,
        communities_found: usize,
        outcomes: Vec<ValidationOutcome>,
        overall_validation_score: f64,
    ) -> Self {
        let posts_considered = outcomes.iter().map(|o| o.snippets.len()).sum();
        let validation_results: Vec<ValidationResultSummary> = outcomes
            .into_iter()
            .map(|o| ValidationResultSummary {
                subreddit: o.community_name,
                relevance_score: o.relevance_score,
                stance: ConsensusStance::classify(&o.consensus_summary),
                human_consensus: o.consensus_summary,
                validation_score: o.validation_score,
                sample_posts: o.snippets.len(),
            })
            .collect();
        let subreddits_analyzed = validation_results.len();

        Self {
            success: true,
            error: None,
            chat_analysis: Some(analysis),
            reddit_validation: Some(RedditValidation {
                relevant_subreddits_found: communities_found,
                overall_validation_score,
                is_validated: overall_validation_score > 0.5,
                validation_results,
            }),
            metadata: Some(ReportMetadata {
                run_id,
                subreddits_analyzed,
                posts_considered,
            }),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            chat_analysis: None,
            reddit_validation: None,
            metadata: None,
        }
    }
}
