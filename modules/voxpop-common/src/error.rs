use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoxpopError {
    #[error("Verdict service error: {0}")]
    Verdict(String),

    #[error("Malformed verdict: {0}")]
    MalformedVerdict(String),

    #[error("Community search error: {0}")]
    Search(String),

    #[error("PII detected after anonymization: {0}")]
    PiiDetected(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
