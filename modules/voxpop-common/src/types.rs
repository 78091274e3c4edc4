use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Toxicity classification returned by the verdict service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToxicityLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ToxicityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToxicityLevel::None => write!(f, "none"),
            ToxicityLevel::Low => write!(f, "low"),
            ToxicityLevel::Medium => write!(f, "medium"),
            ToxicityLevel::High => write!(f, "high"),
        }
    }
}

/// Verdict produced once per input conversation. Immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnalysis {
    #[serde(skip_serializing)]
    pub raw_conversation: String,
    pub toxicity_level: ToxicityLevel,
    pub toxic_person: String,
    /// May be empty, never null.
    pub flagged_phrases: Vec<String>,
    /// May be empty, never null.
    pub behaviors: Vec<String>,
    /// Self-reported confidence in [0,1].
    pub confidence: f64,
}

impl ChatAnalysis {
    /// Discovery keywords: flagged phrases first, then behaviors.
    pub fn search_terms(&self) -> Vec<String> {
        self.flagged_phrases
            .iter()
            .chain(self.behaviors.iter())
            .cloned()
            .collect()
    }
}

/// A community returned by the platform search, scored for relevance.
/// `name` is the unique key within a search batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityCandidate {
    pub name: String,
    pub title: String,
    pub description: String,
    pub subscribers: u64,
    pub url: String,
    /// The keyword whose search surfaced this community.
    pub source_keyword: String,
    /// In [0,1], computed by `scoring::relevance`.
    pub relevance_score: f64,
}

/// A bounded excerpt of fetched post content, used as validation evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSnippet {
    pub title: String,
    pub body: String,
    pub upvotes: i64,
    pub comment_count: u64,
    pub permalink: String,
    pub created_at: DateTime<Utc>,
    /// The search term that matched this post.
    pub matched_term: String,
    /// Toxic-pattern identifiers found in title + body.
    pub pattern_hits: Vec<String>,
}

/// Per-community validation outcome. Independent of other communities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub community_name: String,
    pub relevance_score: f64,
    pub snippets: Vec<ContentSnippet>,
    /// Free-form summary from the verdict service.
    pub consensus_summary: String,
    /// In [0,1]: how much this community's content corroborates the verdict.
    pub validation_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toxicity_level_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ToxicityLevel::High).unwrap(),
            "\"high\""
        );
        let level: ToxicityLevel = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(level, ToxicityLevel::Medium);
    }

    #[test]
    fn search_terms_phrases_before_behaviors() {
        let analysis = ChatAnalysis {
            raw_conversation: String::new(),
            toxicity_level: ToxicityLevel::High,
            toxic_person: "Person A".to_string(),
            flagged_phrases: vec!["you're useless".to_string()],
            behaviors: vec!["insults".to_string()],
            confidence: 0.9,
        };
        assert_eq!(analysis.search_terms(), vec!["you're useless", "insults"]);
    }
}
