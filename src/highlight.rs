use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

/// Longest snippet returned for a sentence or description
pub const MAX_SNIPPET_CHARS: usize = 200;

/// Excerpt explaining why a result matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub field: &'static str,
    pub text: String,
}

impl Highlight {
    fn new(field: &'static str, text: &str) -> Self {
        Self {
            field,
            text: truncate(text.trim(), MAX_SNIPPET_CHARS),
        }
    }
}

fn contains_any(text: &str, terms: &[String]) -> bool {
    let lowered = text.to_lowercase();
    terms.iter().any(|term| lowered.contains(term.as_str()))
}

/// Highlight a name or title when it contains one of the query terms
pub fn highlight_field(field: &'static str, text: &str, terms: &[String]) -> Option<Highlight> {
    contains_any(text, terms).then(|| Highlight::new(field, text))
}

/// First sentence of `body` mentioning a query term
pub fn highlight_sentence(field: &'static str, body: &str, terms: &[String]) -> Option<Highlight> {
    body.unicode_sentences()
        .find(|sentence| contains_any(sentence, terms))
        .map(|sentence| Highlight::new(field, sentence))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
