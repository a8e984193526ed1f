//! Runtime configuration for a chat engine.
//! Load once at startup from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::delay::TypingDelay;
use crate::error::KbError;
use crate::knowledge::KnowledgeBase;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// JSON knowledge base to load instead of the built-in one.
    pub kb_path: Option<PathBuf>,
    /// Pacing of the typing indicator.
    pub typing: TypingDelay,
}

impl ChatConfig {
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key: &str| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = TypingDelay::default();
        let millis = |key: &str, default: u64| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            kb_path: lookup("CHAT_KB_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            typing: TypingDelay {
                base_ms: millis("CHAT_TYPING_BASE_MS", defaults.base_ms),
                per_char_ms: millis("CHAT_TYPING_PER_CHAR_MS", defaults.per_char_ms),
                max_ms: millis("CHAT_TYPING_MAX_MS", defaults.max_ms),
            },
        }
    }

    pub fn load_knowledge_base(&self) -> Result<KnowledgeBase, KbError> {
        match &self.kb_path {
            Some(path) => KnowledgeBase::from_path(path),
            None => KnowledgeBase::builtin(),
        }
    }
}
