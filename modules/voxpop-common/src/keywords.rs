use std::collections::HashMap;

/// Common English words filtered out before frequency ranking.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see", "two",
    "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use", "that", "with",
    "have", "this", "will", "your", "from", "they", "know", "want", "been", "good", "much",
    "some", "time", "very", "when", "come", "here", "just", "like", "long", "make", "many",
    "more", "only", "over", "such", "take", "than", "them", "well", "were", "what", "about",
    "after", "again", "also", "back", "because", "before", "being", "between", "both", "could",
    "does", "doing", "down", "during", "each", "even", "every", "first", "going", "into", "itself",
    "might", "most", "must", "never", "often", "once", "other", "people", "really", "right",
    "said", "same", "should", "since", "still", "their", "then", "there", "these", "thing",
    "things", "think", "those", "through", "under", "until", "upon", "where", "which", "while",
    "would", "yeah", "yes", "always", "maybe", "something", "anything", "everything", "nothing",
    "someone", "anyone", "everyone",
];

/// Extract up to `max_keywords` keywords from free text, ranked by descending
/// frequency. Ties break by first-seen order. Tokens are lowercased, stripped
/// of punctuation, and dropped if they have two or fewer characters or appear
/// in the stop list. Returns an empty vec when nothing survives filtering —
/// the caller treats that as insufficient signal, not an error.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for raw in text.split_whitespace() {
        let token: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '\'')
            .collect::<String>()
            .to_lowercase();

        if token.len() <= 2 || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }

        match counts.get_mut(&token) {
            Some(count) => *count += 1,
            None => {
                counts.insert(token.clone(), 1);
                order.push(token);
            }
        }
    }

    // Stable sort: first-seen order is the tiebreak for equal frequencies.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(max_keywords);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_ranked_with_stop_words_dropped() {
        let keywords = extract_keywords("toxic toxic gaslighting the a", 2);
        assert_eq!(keywords, vec!["toxic", "gaslighting"]);
    }

    #[test]
    fn ties_break_by_first_seen_order() {
        let keywords = extract_keywords("manipulation controlling jealous", 3);
        assert_eq!(keywords, vec!["manipulation", "controlling", "jealous"]);
    }

    #[test]
    fn short_tokens_dropped() {
        assert!(extract_keywords("a an to of it", 5).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_result() {
        assert!(extract_keywords("", 5).is_empty());
    }

    #[test]
    fn punctuation_stripped() {
        let keywords = extract_keywords("gaslighting! gaslighting?", 1);
        assert_eq!(keywords, vec!["gaslighting"]);
    }
}
