use serde::Serialize;

/// How a community's discourse relates to the verdict service's toxicity
/// judgment. The verdict service answers in free text; `classify` is the one
/// boundary where that text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusStance {
    Supports,
    PartiallySupports,
    Contradicts,
    Inconclusive,
    Unknown,
}

impl ConsensusStance {
    /// Validation score assigned to each stance.
    pub fn score(self) -> f64 {
        match self {
            ConsensusStance::Supports => 0.8,
            ConsensusStance::PartiallySupports => 0.5,
            ConsensusStance::Contradicts => 0.2,
            ConsensusStance::Inconclusive => 0.3,
            ConsensusStance::Unknown => 0.4,
        }
    }

    /// Map a free-text consensus summary to a stance. "Partially" is checked
    /// before "support" so partial agreement never scores as full support.
    pub fn classify(summary: &str) -> Self {
        let summary = summary.to_lowercase();

        if summary.contains("partially") {
            ConsensusStance::PartiallySupports
        } else if summary.contains("support") && !summary.contains("contradict") {
            ConsensusStance::Supports
        } else if summary.contains("contradict") {
            ConsensusStance::Contradicts
        } else if summary.contains("inconclusive") {
            ConsensusStance::Inconclusive
        } else {
            ConsensusStance::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports() {
        let stance = ConsensusStance::classify(
            "The community strongly supports the toxicity assessment.",
        );
        assert_eq!(stance, ConsensusStance::Supports);
        assert_eq!(stance.score(), 0.8);
    }

    #[test]
    fn partial_support_before_full() {
        let stance =
            ConsensusStance::classify("The discussions partially support the analysis.");
        assert_eq!(stance, ConsensusStance::PartiallySupports);
        assert_eq!(stance.score(), 0.5);
    }

    #[test]
    fn contradiction_wins_over_support_mention() {
        let stance = ConsensusStance::classify(
            "Rather than support it, the posts contradict the assessment.",
        );
        assert_eq!(stance, ConsensusStance::Contradicts);
        assert_eq!(stance.score(), 0.2);
    }

    #[test]
    fn inconclusive() {
        let stance = ConsensusStance::classify("The evidence is inconclusive.");
        assert_eq!(stance, ConsensusStance::Inconclusive);
        assert_eq!(stance.score(), 0.3);
    }

    #[test]
    fn unknown_fallback() {
        let stance = ConsensusStance::classify("Interesting discussion about weather.");
        assert_eq!(stance, ConsensusStance::Unknown);
        assert_eq!(stance.score(), 0.4);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(
            ConsensusStance::classify("SUPPORTS the analysis"),
            ConsensusStance::Supports
        );
    }
}
