use thiserror::Error;

/// Reasons a knowledge base cannot be built or loaded
#[derive(Debug, Error)]
pub enum KbError {
    #[error("intent {intent} has no patterns")]
    NoPatterns { intent: usize },
    #[error("pattern {pattern:?} of intent {intent} is empty after normalization")]
    EmptyPattern { intent: usize, pattern: String },
    #[error("keyword bucket {bucket:?} has an empty keyword")]
    EmptyKeyword { bucket: String },
    #[error("greeting list is empty")]
    NoGreetings,
    #[error("fallback list is empty")]
    NoFallbacks,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
