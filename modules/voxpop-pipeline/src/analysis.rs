//! Stage 1: normalize the conversation, pre-screen it with the toxic-pattern
//! heuristics, and ask the verdict service for a toxicity judgment.
//!
//! The verdict must come back as a JSON object. Parsing is strict: any
//! structural mismatch is a `MalformedVerdict` error, never a silent default.

use serde::Deserialize;
use tracing::{debug, info};

use ai_client::VerdictModel;
use voxpop_common::{
    anonymize, clean_text, detect_patterns, detect_pii, ChatAnalysis, ToxicityLevel, VoxpopError,
};

const ANALYSIS_SYSTEM: &str =
    "You are an expert in communication analysis and toxicity detection.";

/// Wire shape the verdict service is instructed to return.
#[derive(Debug, Deserialize)]
struct VerdictWire {
    toxicity_level: ToxicityLevel,
    toxic_person: String,
    #[serde(default)]
    flagged_phrases: Vec<String>,
    #[serde(default)]
    behaviors: Vec<String>,
    confidence: f64,
}

pub fn analysis_prompt(conversation: &str, pattern_hits: &[String]) -> String {
    let prescreen = if pattern_hits.is_empty() {
        "none".to_string()
    } else {
        pattern_hits.join(", ")
    };

    format!(
        "Analyze the following chat conversation for toxic behavior and extract key phrases.\n\
         \n\
         CHAT CONVERSATION:\n\
         {conversation}\n\
         \n\
         HEURISTIC PRE-SCREEN (regex/keyword hits, may be noisy):\n\
         {prescreen}\n\
         \n\
         Respond with exactly one JSON object in this format:\n\
         {{\n\
           \"toxicity_level\": \"none|low|medium|high\",\n\
           \"toxic_person\": \"Person A|Person B|Both|None\",\n\
           \"flagged_phrases\": [\"list\", \"of\", \"toxic\", \"phrases\"],\n\
           \"behaviors\": [\"list\", \"of\", \"toxic\", \"behaviors\"],\n\
           \"confidence\": 0.95\n\
         }}\n\
         \n\
         Focus on:\n\
         - Personal attacks, insults, harassment\n\
         - Aggressive language, threats\n\
         - Passive-aggressive behavior\n\
         - Manipulative language\n\
         - Exclusionary language"
    )
}

/// Verdict responses sometimes arrive wrapped in a markdown code fence
/// despite the prompt asking for bare JSON.
fn strip_fences(raw: &str) -> &str {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix("```json")
        .or_else(|| raw.strip_prefix("```"))
        .unwrap_or(raw);
    raw.strip_suffix("```").unwrap_or(raw).trim()
}

/// Strict parse of the verdict service's response into a `ChatAnalysis`.
pub fn parse_verdict(raw: &str, conversation: &str) -> Result<ChatAnalysis, VoxpopError> {
    let body = strip_fences(raw);
    let wire: VerdictWire = serde_json::from_str(body)
        .map_err(|e| VoxpopError::MalformedVerdict(e.to_string()))?;

    Ok(ChatAnalysis {
        raw_conversation: conversation.to_string(),
        toxicity_level: wire.toxicity_level,
        toxic_person: wire.toxic_person,
        flagged_phrases: wire.flagged_phrases,
        behaviors: wire.behaviors,
        confidence: wire.confidence.clamp(0.0, 1.0),
    })
}

/// Run stage 1 end to end. The returned analysis carries the normalized,
/// anonymized conversation — raw contact data never reaches the verdict
/// service or any later stage.
pub async fn analyze(
    model: &dyn VerdictModel,
    conversation: &str,
) -> Result<ChatAnalysis, VoxpopError> {
    let normalized = anonymize(&clean_text(conversation));

    let residual = detect_pii(&normalized);
    if !residual.is_empty() {
        return Err(VoxpopError::PiiDetected(residual.join(", ")));
    }

    let pattern_hits = detect_patterns(&normalized);
    debug!(hits = pattern_hits.len(), "Heuristic pre-screen complete");

    let prompt = analysis_prompt(&normalized, &pattern_hits);
    let response = model
        .generate(&prompt, ANALYSIS_SYSTEM)
        .await
        .map_err(|e| VoxpopError::Verdict(e.to_string()))?;

    let analysis = parse_verdict(&response, &normalized)?;
    info!(
        toxicity_level = %analysis.toxicity_level,
        confidence = analysis.confidence,
        flagged_phrases = analysis.flagged_phrases.len(),
        "Chat analysis complete"
    );
    Ok(analysis)
}
