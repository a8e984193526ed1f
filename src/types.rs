//! Core data types for the knowledge base and resolution results

use serde::{Deserialize, Serialize};

/// A cluster of trigger phrases mapped to one canned response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub patterns: Vec<String>,
    pub response: String,
}

/// Secondary keyword table consulted only when no intent pattern matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordBucket {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One entry of a session's message history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
}

/// Which branch of the resolver produced a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Resolution {
    /// A pattern of `intent` was found in the normalized input
    #[serde(rename = "intent")]
    Intent { intent: usize, pattern: usize },
    /// A keyword of the named bucket matched and the bucket routes to `intent`
    #[serde(rename = "keyword")]
    Keyword { bucket: String, intent: usize },
    /// Nothing matched; `index` points into the fallback list
    #[serde(rename = "fallback")]
    Fallback { index: usize },
}

impl Intent {
    pub fn new<P, S>(patterns: P, response: impl Into<String>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            response: response.into(),
        }
    }
}

impl KeywordBucket {
    pub fn new<K, S>(name: impl Into<String>, keywords: K) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::Fallback { .. })
    }
}
