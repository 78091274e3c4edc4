use regex::Regex;
use std::sync::LazyLock;

/// Regex patterns for toxic language. Matched case-insensitively; the source
/// string doubles as the pattern identifier in `detect_patterns` output.
const TOXIC_PATTERN_SOURCES: &[&str] = &[
    r"\b(loser|idiot|stupid|ugly|worthless|fat|useless)\b",
    r"\b(hate|despise|can't stand)\b.*\b(you|your)\b",
    r"\b(always|never)\b.*\b(you)\b",
    r"\b(you're|you are)\b.*\b(crazy|insane|delusional)\b",
    r"\b(shut up|shut your mouth|be quiet)\b",
    r"\b(nobody|no one)\b.*\b(love|like|care about)\b.*\b(you)\b",
];

/// Relationship-conflict vocabulary checked as plain substrings.
pub const TOXIC_KEYWORDS: &[&str] = &[
    "toxic",
    "gaslighting",
    "narcissist",
    "manipulation",
    "emotional abuse",
    "controlling",
    "jealous",
    "cheating",
    "lying",
    "trust issues",
    "breakup",
    "divorce",
    "argument",
    "fight",
    "conflict",
    "disrespect",
    "insults",
    "name calling",
    "yelling",
    "silent treatment",
    "guilt trip",
    "passive aggressive",
    "stonewalling",
    "criticism",
];

static TOXIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TOXIC_PATTERN_SOURCES
        .iter()
        .map(|src| Regex::new(&format!("(?i){src}")).unwrap())
        .collect()
});

/// Match text against the fixed regex list, then the keyword list.
/// Returns matched pattern identifiers in regex-order then keyword-order,
/// without dedup. Empty input yields an empty result. Side-effect-free.
pub fn detect_patterns(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let text_lower = text.to_lowercase();

    for (regex, src) in TOXIC_PATTERNS.iter().zip(TOXIC_PATTERN_SOURCES) {
        if regex.is_match(&text_lower) {
            found.push((*src).to_string());
        }
    }

    for keyword in TOXIC_KEYWORDS {
        if text_lower.contains(keyword) {
            found.push(format!("keyword: {keyword}"));
        }
    }

    found
}
