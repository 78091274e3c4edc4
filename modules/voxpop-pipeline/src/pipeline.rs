//! The three-stage orchestrator: analyze, discover, validate. Stages run
//! strictly in order and are never retried. Stage 1 failure aborts the run
//! and surfaces as a structured failure report; within stages 2 and 3 a
//! failed candidate is skipped and the stage continues.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use ai_client::VerdictModel;
use voxpop_common::{extract_keywords, scoring};

use crate::analysis;
use crate::discovery::{self, MAX_DISCOVERY_KEYWORDS};
use crate::rate_limit::RateLimiter;
use crate::report::ValidationReport;
use crate::traits::CommunitySearch;
use crate::validation;

pub struct Pipeline {
    model: Arc<dyn VerdictModel>,
    search: Arc<dyn CommunitySearch>,
    limiter: RateLimiter,
}

impl Pipeline {
    /// Clients are constructed by the caller and injected here; the pipeline
    /// owns no global state and several pipelines may share one HTTP session.
    pub fn new(
        model: Arc<dyn VerdictModel>,
        search: Arc<dyn CommunitySearch>,
        rate_per_sec: f64,
        burst: u32,
    ) -> Self {
        Self {
            model,
            search,
            limiter: RateLimiter::new(rate_per_sec, burst),
        }
    }

    /// Run the full validation pipeline for one conversation.
    /// Always returns a well-formed report, never an error.
    pub async fn run(&self, conversation: &str) -> ValidationReport {
        let run_id = Uuid::new_v4();
        info!(%run_id, "Starting toxicity validation pipeline");

        // Stage 1: analyze. The only hard stop in the pipeline.
        let chat_analysis = match analysis::analyze(self.model.as_ref(), conversation).await {
            Ok(a) => a,
            Err(e) => {
                warn!(%run_id, error = %e, "Stage 1 failed, aborting pipeline");
                return ValidationReport::failure(e.to_string());
            }
        };

        // Stage 2: discover communities from the flagged vocabulary.
        // Fall back to frequency-ranked keywords when the verdict lists none.
        let mut keywords = chat_analysis.search_terms();
        if keywords.is_empty() {
            keywords =
                extract_keywords(&chat_analysis.raw_conversation, MAX_DISCOVERY_KEYWORDS);
            info!(
                %run_id,
                keywords = keywords.len(),
                "No flagged vocabulary, using extracted keywords"
            );
        }

        let candidates =
            discovery::discover(self.search.as_ref(), &self.limiter, &keywords).await;

        // Stage 3: validate against community consensus.
        let outcomes = validation::validate_communities(
            self.model.as_ref(),
            self.search.as_ref(),
            &self.limiter,
            &chat_analysis,
            &candidates,
        )
        .await;

        let overall = scoring::aggregate(&outcomes, chat_analysis.confidence);
        info!(
            %run_id,
            communities = candidates.len(),
            validated = outcomes.len(),
            overall_validation_score = overall,
            "Pipeline complete"
        );

        ValidationReport::success(run_id, chat_analysis, candidates.len(), outcomes, overall)
    }
}
