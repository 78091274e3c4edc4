use regex::Regex;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").unwrap());
static MD_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]\(.*?\)").unwrap());
static MD_BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").unwrap());
static MD_ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*.*?\*").unwrap());
static NEWLINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\n\s*").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap());
static HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]{2,}").unwrap());

/// Strip URLs, markdown links and emphasis, and collapse runs of whitespace.
/// Line breaks are kept: one message per line is the structure `anonymize`
/// uses to recognize speaker labels.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = URL_RE.replace_all(text, "");
    let text = MD_LINK_RE.replace_all(&text, "");
    let text = MD_BOLD_RE.replace_all(&text, "");
    let text = MD_ITALIC_RE.replace_all(&text, "");
    let text = NEWLINE_RE.replace_all(&text, "\n");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Heuristic anonymization before any text leaves the process.
/// Emails, phone numbers, and @handles are replaced with placeholders.
/// Capitalized tokens that are not sentence-initial are treated as names.
pub fn anonymize(text: &str) -> String {
    let text = EMAIL_RE.replace_all(text, "[EMAIL]");
    let text = PHONE_RE.replace_all(&text, "[PHONE]");
    let text = HANDLE_RE.replace_all(&text, "[USER]");
    redact_names(&text)
}

/// Replace non-sentence-initial capitalized words with [NAME].
/// Sentence-initial words (after ., !, ?, :, or a line break) are kept, which
/// also preserves speaker labels like "Person A:" at the start of lines.
fn redact_names(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut sentence_start = true;
    for token in text.split_inclusive(char::is_whitespace) {
        let word = token.trim_end_matches(char::is_whitespace);
        let trailing = &token[word.len()..];

        if !sentence_start && is_name_like(word) {
            let stripped = word.trim_end_matches(|c: char| c.is_ascii_punctuation());
            out.push_str("[NAME]");
            out.push_str(&word[stripped.len()..]);
        } else {
            out.push_str(word);
        }
        out.push_str(trailing);

        if !word.is_empty() {
            sentence_start = word.ends_with(['.', '!', '?', ':']);
        }
        if trailing.contains('\n') {
            sentence_start = true;
        }
    }
    out
}

fn is_name_like(word: &str) -> bool {
    let stripped = word.trim_end_matches(|c: char| c.is_ascii_punctuation());
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let rest: Vec<char> = chars.collect();
            !rest.is_empty() && rest.iter().all(|c| c.is_lowercase())
        }
        _ => false,
    }
}

/// Bound text to at most `max_bytes`, cutting at a character boundary so
/// multibyte content never splits. Snippet bodies and prompt excerpts are
/// clipped with this before they travel anywhere.
pub fn clip_bytes(s: &str, max_bytes: usize) -> &str {
    match s.char_indices().find(|(i, c)| i + c.len_utf8() > max_bytes) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// Check if text still contains PII patterns. Returns descriptions of what was found.
/// Used as a guard after anonymization, before text is sent to the verdict service.
pub fn detect_pii(text: &str) -> Vec<String> {
    let mut findings = Vec::new();

    if PHONE_RE.is_match(text) {
        findings.push("phone number detected".to_string());
    }
    if EMAIL_RE.is_match(text) {
        findings.push("email address detected".to_string());
    }
    if HANDLE_RE.is_match(text) {
        findings.push("user handle detected".to_string());
    }

    findings
}
