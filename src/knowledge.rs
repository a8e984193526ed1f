//! Knowledge base - the immutable intent table the resolver matches against
//!
//! A `KnowledgeBase` is built once from static configuration and never
//! mutated afterwards. Construction does the work the resolver would
//! otherwise repeat on every call: patterns are normalized up front and each
//! keyword bucket is joined to its target intent.

use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::KbError;
use crate::normalize::normalize;
use crate::types::{Intent, KeywordBucket, Resolution};

const BUILTIN_KB: &str = include_str!("../data/portfolio_kb.json");

/// Default keyword buckets, in the order they are tried
const DEFAULT_BUCKETS: &[(&str, &[&str])] = &[
    (
        "skills",
        &["skill", "tech", "stack", "know", "language", "framework"],
    ),
    (
        "projects",
        &["project", "work", "built", "create", "made", "portfolio"],
    ),
    (
        "contact",
        &[
            "contact",
            "email",
            "hire",
            "reach",
            "connect",
            "available",
            "phone",
        ],
    ),
    ("resume", &["resume", "cv", "download", "curriculum"]),
    (
        "social",
        &["social", "instagram", "twitter", "youtube", "linkedin"],
    ),
];

/// On-disk shape of a knowledge base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbDocument {
    pub intents: Vec<Intent>,
    pub greetings: Vec<String>,
    pub fallbacks: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub keyword_buckets: Option<Vec<KeywordBucket>>,
}

/// A keyword bucket joined to the intent it answers with
#[derive(Debug, Clone)]
pub(crate) struct BucketRoute {
    pub(crate) name: String,
    /// Keywords as declared, matched as raw substrings of normalized input
    pub(crate) keywords: Vec<String>,
    /// First intent whose raw patterns contain the bucket name
    pub(crate) intent: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    intents: Vec<Intent>,
    normalized_patterns: Vec<Vec<String>>,
    greetings: Vec<String>,
    fallbacks: Vec<String>,
    suggestions: Vec<String>,
    buckets: Vec<KeywordBucket>,
    routes: Vec<BucketRoute>,
    route_index: AHashMap<String, Option<usize>>,
}

impl KnowledgeBase {
    /// Validate and index a knowledge base; buckets are tried in the given order
    pub fn new(
        intents: Vec<Intent>,
        greetings: Vec<String>,
        fallbacks: Vec<String>,
        suggestions: Vec<String>,
        buckets: Vec<KeywordBucket>,
    ) -> Result<Self, KbError> {
        if greetings.is_empty() {
            return Err(KbError::NoGreetings);
        }
        if fallbacks.is_empty() {
            return Err(KbError::NoFallbacks);
        }

        let mut normalized_patterns = Vec::with_capacity(intents.len());
        for (i, intent) in intents.iter().enumerate() {
            if intent.patterns.is_empty() {
                return Err(KbError::NoPatterns { intent: i });
            }
            let mut normalized = Vec::with_capacity(intent.patterns.len());
            for pattern in &intent.patterns {
                let n = normalize(pattern);
                // An empty pattern is a substring of every input.
                if n.is_empty() {
                    return Err(KbError::EmptyPattern {
                        intent: i,
                        pattern: pattern.clone(),
                    });
                }
                normalized.push(n);
            }
            normalized_patterns.push(normalized);
        }

        let mut routes = Vec::with_capacity(buckets.len());
        let mut route_index = AHashMap::with_capacity(buckets.len());
        for bucket in &buckets {
            let intent = intents
                .iter()
                .position(|it| it.patterns.iter().any(|p| p.contains(bucket.name.as_str())));
            if intent.is_none() {
                debug!(bucket = %bucket.name, "keyword bucket has no matching intent");
            }

            // Same hazard as an empty pattern.
            if bucket.keywords.iter().any(|k| k.is_empty()) {
                return Err(KbError::EmptyKeyword {
                    bucket: bucket.name.clone(),
                });
            }

            route_index.entry(bucket.name.clone()).or_insert(intent);
            routes.push(BucketRoute {
                name: bucket.name.clone(),
                keywords: bucket.keywords.clone(),
                intent,
            });
        }

        Ok(Self {
            intents,
            normalized_patterns,
            greetings,
            fallbacks,
            suggestions,
            buckets,
            routes,
            route_index,
        })
    }

    /// Build from a parsed document, using the default buckets if it has none
    pub fn from_document(doc: KbDocument) -> Result<Self, KbError> {
        let buckets = doc
            .keyword_buckets
            .unwrap_or_else(Self::default_keyword_buckets);
        Self::new(
            doc.intents,
            doc.greetings,
            doc.fallbacks,
            doc.suggestions,
            buckets,
        )
    }

    /// Parse and build a knowledge base from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, KbError> {
        let doc: KbDocument = serde_json::from_str(json)?;
        let kb = Self::from_document(doc)?;
        info!(intents = kb.intents.len(), source = "json", "knowledge base loaded");
        Ok(kb)
    }

    /// Read and build a knowledge base from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, KbError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let doc: KbDocument = serde_json::from_str(&raw)?;
        let kb = Self::from_document(doc)?;
        info!(
            intents = kb.intents.len(),
            source = %path.display(),
            "knowledge base loaded"
        );
        Ok(kb)
    }

    /// The portfolio knowledge base compiled into the crate
    pub fn builtin() -> Result<Self, KbError> {
        let doc: KbDocument = serde_json::from_str(BUILTIN_KB)?;
        let kb = Self::from_document(doc)?;
        info!(intents = kb.intents.len(), source = "builtin", "knowledge base loaded");
        Ok(kb)
    }

    /// Built-in keyword buckets: skills, projects, contact, resume, social
    pub fn default_keyword_buckets() -> Vec<KeywordBucket> {
        DEFAULT_BUCKETS
            .iter()
            .map(|(name, kws)| KeywordBucket::new(*name, kws.iter().copied()))
            .collect()
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn greetings(&self) -> &[String] {
        &self.greetings
    }

    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn keyword_buckets(&self) -> &[KeywordBucket] {
        &self.buckets
    }

    /// Intent a bucket routes to, `None` if the bucket is unknown or unresolved
    pub fn bucket_target(&self, name: &str) -> Option<usize> {
        self.route_index.get(name).copied().flatten()
    }

    /// Text to show for a resolution produced against this knowledge base
    pub fn response_for(&self, resolution: &Resolution) -> &str {
        let text = match resolution {
            Resolution::Intent { intent, .. } | Resolution::Keyword { intent, .. } => {
                self.intents.get(*intent).map(|i| i.response.as_str())
            }
            Resolution::Fallback { index } => self.fallbacks.get(*index).map(String::as_str),
        };
        text.unwrap_or(self.fallbacks[0].as_str())
    }

    pub(crate) fn normalized_patterns(&self) -> &[Vec<String>] {
        &self.normalized_patterns
    }

    pub(crate) fn routes(&self) -> &[BucketRoute] {
        &self.routes
    }
}
