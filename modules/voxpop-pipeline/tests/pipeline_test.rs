//! End-to-end pipeline tests: stub verdict service + stub community search.
//! No network, no LLM — every external collaborator is a canned trait impl.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use ai_client::VerdictModel;
use reddit_client::{CommunityInfo, PostInfo};
use voxpop_pipeline::traits::CommunitySearch;
use voxpop_pipeline::Pipeline;

// ---------------------------------------------------------------------------
// Stubs
// ---------------------------------------------------------------------------

/// Answers the stage-1 analysis prompt with a fixed verdict and the stage-3
/// consensus prompt with a fixed summary, telling them apart by marker.
struct StubModel {
    verdict: String,
    consensus: String,
}

#[async_trait]
impl VerdictModel for StubModel {
    async fn generate(&self, prompt: &str, _system: &str) -> Result<String> {
        if prompt.contains("COMMUNITY POSTS:") {
            Ok(self.consensus.clone())
        } else {
            Ok(self.verdict.clone())
        }
    }
}

/// A verdict service that is down.
struct FailingModel;

#[async_trait]
impl VerdictModel for FailingModel {
    async fn generate(&self, _prompt: &str, _system: &str) -> Result<String> {
        Err(anyhow!("connection refused"))
    }
}

#[derive(Default)]
struct StubSearch {
    communities: Vec<CommunityInfo>,
    posts: Vec<PostInfo>,
    community_queries: Mutex<Vec<String>>,
}

#[async_trait]
impl CommunitySearch for StubSearch {
    async fn search_communities(&self, query: &str, _limit: u32) -> Result<Vec<CommunityInfo>> {
        self.community_queries
            .lock()
            .unwrap()
            .push(query.to_string());
        Ok(self.communities.clone())
    }

    async fn search_posts(
        &self,
        _community: &str,
        _query: &str,
        _limit: u32,
    ) -> Result<Vec<PostInfo>> {
        Ok(self.posts.clone())
    }
}

/// A search backend where every call fails.
struct DownSearch;

#[async_trait]
impl CommunitySearch for DownSearch {
    async fn search_communities(&self, _query: &str, _limit: u32) -> Result<Vec<CommunityInfo>> {
        Err(anyhow!("503 service unavailable"))
    }

    async fn search_posts(
        &self,
        _community: &str,
        _query: &str,
        _limit: u32,
    ) -> Result<Vec<PostInfo>> {
        Err(anyhow!("503 service unavailable"))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const CONVERSATION: &str = "\
Person A: You're always so lazy and never help with anything
Person B: Maybe if you weren't so critical all the time, I'd want to help
Person A: That's just an excuse for being useless
Person B: I'm done with this conversation";

fn high_toxicity_verdict() -> String {
    r#"{
        "toxicity_level": "high",
        "toxic_person": "Person A",
        "flagged_phrases": ["gaslighting"],
        "behaviors": [],
        "confidence": 0.9
    }"#
    .to_string()
}

/// One community whose name and description match "gaslighting":
/// relevance 0.3 + 0.3 = 0.6, no vocabulary bonus.
fn gaslighting_community() -> CommunityInfo {
    CommunityInfo {
        display_name: "gaslighting".to_string(),
        title: "Recovering together".to_string(),
        public_description: "venting about gaslighting".to_string(),
        subscribers: Some(12_000),
        url: "/r/gaslighting/".to_string(),
    }
}

fn sample_post() -> PostInfo {
    PostInfo {
        title: "My partner rewrites every argument".to_string(),
        selftext: "Whenever I bring something up, the story changes.".to_string(),
        ups: 230,
        num_comments: 57,
        permalink: "/r/gaslighting/comments/abc/x/".to_string(),
        created_utc: 1_724_800_000.0,
    }
}

fn pipeline(model: impl VerdictModel + 'static, search: impl CommunitySearch + 'static) -> Pipeline {
    // High rate so limiter waits are negligible in tests.
    Pipeline::new(Arc::new(model), Arc::new(search), 1000.0, 10)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn supported_verdict_scores_eighty_three() {
    let model = StubModel {
        verdict: high_toxicity_verdict(),
        consensus: "The community strongly supports the toxicity assessment.".to_string(),
    };
    let search = StubSearch {
        communities: vec![gaslighting_community()],
        posts: vec![sample_post()],
        ..Default::default()
    };

    let report = pipeline(model, search).run(CONVERSATION).await;

    assert!(report.success);
    let validation = report.reddit_validation.expect("validation section");
    assert_eq!(validation.relevant_subreddits_found, 1);
    assert_eq!(validation.validation_results.len(), 1);

    let result = &validation.validation_results[0];
    assert_eq!(result.subreddit, "gaslighting");
    assert!((result.relevance_score - 0.6).abs() < 1e-9);
    assert_eq!(result.validation_score, 0.8);
    assert_eq!(result.sample_posts, 1);

    // weight = 0.6 * 1.1, weighted mean 0.8; 0.7*0.8 + 0.3*0.9 = 0.83
    assert!((validation.overall_validation_score - 0.83).abs() < 1e-9);
    assert!(validation.is_validated);

    let metadata = report.metadata.expect("metadata section");
    assert_eq!(metadata.subreddits_analyzed, 1);
    assert_eq!(metadata.posts_considered, 1);
}

#[tokio::test]
async fn prose_verdict_aborts_with_failure_report() {
    let model = StubModel {
        verdict: "This conversation seems pretty toxic to me.".to_string(),
        consensus: String::new(),
    };
    let search = StubSearch::default();

    let report = pipeline(model, search).run(CONVERSATION).await;

    assert!(!report.success);
    assert!(report.error.unwrap().contains("Malformed verdict"));
    assert!(report.chat_analysis.is_none());
    assert!(report.reddit_validation.is_none());
}

#[tokio::test]
async fn unreachable_verdict_service_aborts_with_failure_report() {
    let report = pipeline(FailingModel, StubSearch::default())
        .run(CONVERSATION)
        .await;

    assert!(!report.success);
    assert!(report.error.unwrap().contains("connection refused"));
}

#[tokio::test]
async fn search_outage_yields_empty_validation_not_failure() {
    let model = StubModel {
        verdict: high_toxicity_verdict(),
        consensus: String::new(),
    };

    let report = pipeline(model, DownSearch).run(CONVERSATION).await;

    // Stages 2 and 3 tolerate upstream failure by skipping candidates.
    assert!(report.success);
    let validation = report.reddit_validation.expect("validation section");
    assert_eq!(validation.relevant_subreddits_found, 0);
    assert!(validation.validation_results.is_empty());
    assert_eq!(validation.overall_validation_score, 0.0);
    assert!(!validation.is_validated);
}

#[tokio::test]
async fn community_without_matching_posts_is_skipped() {
    let model = StubModel {
        verdict: high_toxicity_verdict(),
        consensus: "supports".to_string(),
    };
    let search = StubSearch {
        communities: vec![gaslighting_community()],
        posts: vec![],
        ..Default::default()
    };

    let report = pipeline(model, search).run(CONVERSATION).await;

    assert!(report.success);
    let validation = report.reddit_validation.unwrap();
    assert_eq!(validation.relevant_subreddits_found, 1);
    assert!(validation.validation_results.is_empty());
    // Empty outcome list is the 0.0 short-circuit, not the neutral 0.5 path.
    assert_eq!(validation.overall_validation_score, 0.0);
}

#[tokio::test]
async fn empty_flagged_vocabulary_falls_back_to_extracted_keywords() {
    let model = StubModel {
        verdict: r#"{
            "toxicity_level": "low",
            "toxic_person": "None",
            "flagged_phrases": [],
            "behaviors": [],
            "confidence": 0.3
        }"#
        .to_string(),
        consensus: String::new(),
    };
    let search = Arc::new(StubSearch::default());

    let pipeline = Pipeline::new(
        Arc::new(model),
        search.clone(),
        1000.0,
        10,
    );
    let report = pipeline
        .run("gaslighting gaslighting happens constantly here")
        .await;

    assert!(report.success);
    let queries = search.community_queries.lock().unwrap();
    assert_eq!(queries.first().map(String::as_str), Some("gaslighting"));
}

#[tokio::test]
async fn contradicting_consensus_is_not_validated() {
    let model = StubModel {
        verdict: high_toxicity_verdict(),
        consensus: "The posts contradict the assessment; this reads as normal venting."
            .to_string(),
    };
    let search = StubSearch {
        communities: vec![gaslighting_community()],
        posts: vec![sample_post()],
        ..Default::default()
    };

    let report = pipeline(model, search).run(CONVERSATION).await;

    let validation = report.reddit_validation.unwrap();
    assert_eq!(validation.validation_results[0].validation_score, 0.2);
    // 0.7*0.2 + 0.3*0.9 = 0.41
    assert!((validation.overall_validation_score - 0.41).abs() < 1e-9);
    assert!(!validation.is_validated);
}
