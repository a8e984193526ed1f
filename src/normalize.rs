//! Text normalization applied to both user input and intent patterns

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_MATCHABLE: Regex = Regex::new(r"[^a-z0-9\s]").expect("Invalid regex pattern");
}

/// Canonicalize text for matching.
///
/// Lower-cases, drops every character outside `[a-z0-9\s]`, then trims.
/// Anything non-ASCII (emoji, punctuation, other scripts) therefore acts as
/// a separator at most, and a message made only of such characters
/// normalizes to the empty string.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_MATCHABLE.replace_all(&lower, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("How can I CONTACT you??"), "how can i contact you");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize("   hello  world \n"), "hello  world");
    }

    #[test]
    fn test_non_ascii_only_is_empty() {
        assert_eq!(normalize("🚀🔥 ¿¡"), "");
        assert_eq!(normalize("привет"), "");
        assert_eq!(normalize(""), "");
    }

    const SAMPLES: &[&str] = &[
        "Hi there, want to hire you?",
        "  Ünïcödé & émojis 👋 mixed in  ",
        "tabs\tand\nnewlines",
        "!!!",
        "İstanbul",
        "Straße",
        "Python 3.10+",
        "Ça va? C'est 100% OK — Straße!",
        "",
    ];

    #[test]
    fn test_idempotent() {
        for s in SAMPLES {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_output_alphabet() {
        for s in SAMPLES {
            let out = normalize(s);
            assert!(
                out.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace()),
                "unexpected character in {:?}",
                out
            );
        }
    }
}
