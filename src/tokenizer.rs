use std::collections::{HashMap, HashSet};

lazy_static::lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = {
        [
            "a", "about", "above", "after", "again", "against", "all", "also", "am", "an",
            "and", "any", "are", "as", "at", "be", "because", "been", "before", "being",
            "below", "between", "but", "by", "can", "could", "did", "do", "does",
            "doing", "done", "down", "during", "each", "either", "else",
            "for", "from", "further", "had", "has", "have", "having", "he",
            "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "i",
            "if", "in", "into", "is", "it", "its", "itself", "just",
            "may", "me", "might", "must", "my", "myself", "neither",
            "no", "nor", "not", "now", "of", "off", "on", "once",
            "or", "other", "others", "ought", "our", "ours", "ourselves", "out", "over",
            "own", "same", "shall", "she", "should", "since", "so", "some",
            "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
            "there", "these", "they", "this", "those", "though", "through", "thus", "to",
            "too", "under", "unless", "until", "up", "upon", "us", "very", "was", "we",
            "were", "what", "whatever", "when", "where", "whether", "which", "while", "who",
            "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
            "you", "your", "yours", "yourself", "yourselves",
        ]
        .iter()
        .copied()
        .collect()
    };
}

/// Text normalizer shared by indexing and querying.
///
/// The pipeline is lowercase, punctuation to whitespace, split, stopword and
/// short-token removal, then suffix stripping. Both sides of the index must go
/// through the same pipeline or term frequencies will disagree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Lowercase and split into raw words, treating anything outside
    /// `[a-z0-9]` and whitespace as a separator.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        cleaned.split_whitespace().map(str::to_string).collect()
    }

    /// Remove single characters and stopwords
    fn stopword_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| t.len() > 1 && !STOPWORDS.contains(t.as_str()))
            .collect()
    }

    /// Apply stemming
    fn stemmer_filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().map(|t| stem(&t)).collect()
    }

    /// Full analysis pipeline
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let tokens = self.stopword_filter(tokens);
        self.stemmer_filter(tokens)
    }

    /// Analyze and count term frequencies
    pub fn analyze_with_frequencies(&self, text: &str) -> HashMap<String, usize> {
        let mut frequencies = HashMap::new();
        for token in self.analyze(text) {
            *frequencies.entry(token).or_insert(0) += 1;
        }
        frequencies
    }
}

/// Strip a common English suffix. Rules are tried longest first and the first
/// one whose suffix and length condition both hold wins.
pub fn stem(word: &str) -> String {
    let len = word.len();

    if len > 4 {
        if let Some(base) = word.strip_suffix("ies") {
            return format!("{}y", base);
        }
    }
    if len > 5 {
        if let Some(base) = word.strip_suffix("ing") {
            return base.to_string();
        }
    }
    if len > 4 {
        if let Some(base) = word.strip_suffix("ed") {
            return base.to_string();
        }
        if let Some(base) = word.strip_suffix("ly") {
            return base.to_string();
        }
    }
    if len > 3 && !word.ends_with("ss") {
        if let Some(base) = word.strip_suffix('s') {
            return base.to_string();
        }
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("Hello, World! getBatteryLevel() -> Promise<number>");
        assert_eq!(
            tokens,
            vec!["hello", "world", "getbatterylevel", "promise", "number"]
        );
    }

    #[test]
    fn test_punctuation_does_not_merge_words() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.analyze("battery-power"), vec!["battery", "power"]);
        assert_eq!(tokenizer.analyze("iOS/Android"), vec!["ios", "android"]);
    }

    #[test]
    fn test_analyze() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.analyze("The quick brown fox jumps");
        assert_eq!(tokens, vec!["quick", "brown", "fox", "jump"]);
    }

    #[test]
    fn test_stopword_only_query_is_empty() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.analyze("the a is").is_empty());
        assert!(tokenizer.analyze("?! -- ...").is_empty());
        assert!(tokenizer.analyze("").is_empty());
    }

    #[test]
    fn test_platform_words_survive() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.analyze("ios-only both"), vec!["ios", "only", "both"]);
        assert_eq!(
            tokenizer.analyze("android only APIs"),
            vec!["android", "only", "api"]
        );
    }

    #[test]
    fn test_short_tokens_dropped() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.analyze("0.0 to 1.0 x y level"), vec!["level"]);
    }

    #[test]
    fn test_stem_rules() {
        assert_eq!(stem("batteries"), "battery");
        assert_eq!(stem("running"), "runn");
        assert_eq!(stem("charged"), "charg");
        assert_eq!(stem("quickly"), "quick");
        assert_eq!(stem("levels"), "level");
        assert_eq!(stem("address"), "address");
        assert_eq!(stem("level"), "level");
    }

    #[test]
    fn test_stem_length_guards_fall_through() {
        // "ties" is too short for -ies, falls through to -s
        assert_eq!(stem("ties"), "tie");
        // "thing" is too short for -ing
        assert_eq!(stem("thing"), "thing");
        assert_eq!(stem("used"), "used");
        assert_eq!(stem("bus"), "bus");
    }

    #[test]
    fn test_frequencies() {
        let tokenizer = Tokenizer::new();
        let freqs = tokenizer.analyze_with_frequencies("battery level, battery state");
        assert_eq!(freqs.get("battery"), Some(&2));
        assert_eq!(freqs.get("level"), Some(&1));
        assert_eq!(freqs.get("state"), Some(&1));
    }
}
