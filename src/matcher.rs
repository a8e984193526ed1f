//! Response resolver - ordered substring matching of user input against the
//! knowledge base
//!
//! Resolution is first-match-wins with no scoring:
//! 1. intents in declared order, each intent's patterns in declared order;
//! 2. keyword buckets in declared order, routed to their joined intent;
//! 3. a uniformly random fallback.
//!
//! Input that normalizes to nothing never matches an intent or bucket.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::knowledge::KnowledgeBase;
use crate::normalize::normalize;
use crate::types::Resolution;

/// Resolve user input to the branch that answers it, drawing from `rng` when
/// falling back
pub fn resolve_with<R: Rng>(kb: &KnowledgeBase, user_message: &str, rng: &mut R) -> Resolution {
    let input = normalize(user_message);

    if input.is_empty() {
        debug!("empty input, using fallback");
        return fallback(kb, rng);
    }

    if let Some(resolution) = match_patterns(kb, &input) {
        return resolution;
    }

    if let Some(resolution) = match_keywords(kb, &input) {
        return resolution;
    }

    debug!(input = %input, "no intent or keyword matched, using fallback");
    fallback(kb, rng)
}

/// Resolve with the thread-local RNG
pub fn resolve(kb: &KnowledgeBase, user_message: &str) -> Resolution {
    resolve_with(kb, user_message, &mut rand::thread_rng())
}

/// Response text for user input, drawing from `rng` when falling back
pub fn get_response_with<'kb, R: Rng>(
    kb: &'kb KnowledgeBase,
    user_message: &str,
    rng: &mut R,
) -> &'kb str {
    let resolution = resolve_with(kb, user_message, rng);
    kb.response_for(&resolution)
}

/// Response text for user input using the thread-local RNG
pub fn get_response<'kb>(kb: &'kb KnowledgeBase, user_message: &str) -> &'kb str {
    get_response_with(kb, user_message, &mut rand::thread_rng())
}

/// Uniform choice from the greeting list
pub fn pick_greeting_with<'kb, R: Rng>(kb: &'kb KnowledgeBase, rng: &mut R) -> &'kb str {
    kb.greetings()
        .choose(rng)
        .map(String::as_str)
        .unwrap_or_default()
}

/// Random greeting using the thread-local RNG
pub fn pick_greeting(kb: &KnowledgeBase) -> &str {
    pick_greeting_with(kb, &mut rand::thread_rng())
}

fn match_patterns(kb: &KnowledgeBase, input: &str) -> Option<Resolution> {
    for (intent, patterns) in kb.normalized_patterns().iter().enumerate() {
        for (pattern, normalized) in patterns.iter().enumerate() {
            if input.contains(normalized.as_str()) {
                debug!(intent, pattern = %normalized, "matched intent pattern");
                return Some(Resolution::Intent { intent, pattern });
            }
        }
    }
    None
}

fn match_keywords(kb: &KnowledgeBase, input: &str) -> Option<Resolution> {
    for route in kb.routes() {
        if !route.keywords.iter().any(|kw| input.contains(kw.as_str())) {
            continue;
        }
        match route.intent {
            Some(intent) => {
                debug!(bucket = %route.name, intent, "matched keyword bucket");
                return Some(Resolution::Keyword {
                    bucket: route.name.clone(),
                    intent,
                });
            }
            None => {
                debug!(bucket = %route.name, "keyword bucket matched but routes nowhere");
            }
        }
    }
    None
}

fn fallback<R: Rng>(kb: &KnowledgeBase, rng: &mut R) -> Resolution {
    let index = rng.gen_range(0..kb.fallbacks().len());
    Resolution::Fallback { index }
}
