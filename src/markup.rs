//! Response markup: `**bold**` spans and `\n` line breaks, nothing else

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]+)\*\*").expect("Invalid regex pattern");
}

/// A piece of a rendered response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Segment<'a> {
    Text(&'a str),
    Bold(&'a str),
    LineBreak,
}

/// Split a response into text, bold and line-break segments.
///
/// An unpaired `**` is kept as literal text. Empty text segments are not
/// emitted, so `"a\n\nb"` yields two consecutive breaks.
pub fn parse_markup(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            segments.push(Segment::LineBreak);
        }

        let mut last = 0;
        for cap in BOLD.captures_iter(line) {
            let (Some(whole), Some(inner)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Text(&line[last..whole.start()]));
            }
            segments.push(Segment::Bold(inner.as_str()));
            last = whole.end();
        }
        if last < line.len() {
            segments.push(Segment::Text(&line[last..]));
        }
    }

    segments
}

/// The response with bold markers removed
pub fn plain_text(text: &str) -> String {
    BOLD.replace_all(text, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_text() {
        assert_eq!(
            parse_markup("I am **Rust** dev"),
            vec![
                Segment::Text("I am "),
                Segment::Bold("Rust"),
                Segment::Text(" dev"),
            ]
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(
            parse_markup("a\n\n**b:** c"),
            vec![
                Segment::Text("a"),
                Segment::LineBreak,
                Segment::LineBreak,
                Segment::Bold("b:"),
                Segment::Text(" c"),
            ]
        );
    }

    #[test]
    fn test_unpaired_markers_are_literal() {
        assert_eq!(parse_markup("5 ** 2"), vec![Segment::Text("5 ** 2")]);
        assert_eq!(parse_markup("****"), vec![Segment::Text("****")]);
    }

    #[test]
    fn test_bold_does_not_span_lines() {
        assert_eq!(
            parse_markup("**a\nb**"),
            vec![
                Segment::Text("**a"),
                Segment::LineBreak,
                Segment::Text("b**"),
            ]
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("📧 **Email:** me@x.dev"), "📧 Email: me@x.dev");
    }

    #[test]
    fn test_builtin_responses_parse() {
        let kb = crate::knowledge::KnowledgeBase::builtin().unwrap();
        for intent in kb.intents() {
            let segments = parse_markup(&intent.response);
            assert!(!segments.is_empty());
            for seg in segments {
                if let Segment::Bold(b) = seg {
                    assert!(!b.contains('*'));
                }
            }
        }
    }
}
