use crate::document::{ApiKind, ApiRecord, DocChunk, DocId, DocumentRef, Platform};
use crate::error::InvalidFilter;
use crate::highlight::{highlight_field, highlight_sentence, Highlight};
use crate::index::SearchIndex;
use crate::tokenizer::Tokenizer;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;

const EXACT_NAME_BOOST: f64 = 3.0;
const PARTIAL_NAME_BOOST: f64 = 1.5;
const PLATFORM_MENTION_BOOST: f64 = 1.3;

/// BM25 parameters
#[derive(Debug, Clone, Copy)]
pub struct BM25 {
    k1: f64,
    b: f64,
}

impl Default for BM25 {
    fn default() -> Self {
        Self {
            k1: 1.2,  // Term frequency saturation parameter
            b: 0.75, // Length normalization parameter
        }
    }
}

impl BM25 {
    /// Inverse document frequency; a term missing from the corpus has df 0
    pub fn idf(&self, term: &str, index: &SearchIndex) -> f64 {
        let total_docs = index.total_documents() as f64;
        let doc_freq = index.doc_frequency(term) as f64;
        ((total_docs - doc_freq + 0.5) / (doc_freq + 0.5) + 1.0).ln()
    }

    /// Calculate BM25 score for a document
    pub fn score(
        &self,
        query_terms: &[String],
        term_frequencies: &HashMap<String, usize>,
        doc_length: usize,
        index: &SearchIndex,
    ) -> f64 {
        let avg_doc_length = index.avg_doc_length();
        let length_ratio = if avg_doc_length > 0.0 {
            doc_length as f64 / avg_doc_length
        } else {
            1.0
        };

        let mut score = 0.0;
        for term in query_terms {
            let tf = term_frequencies.get(term).copied().unwrap_or(0) as f64;
            if tf == 0.0 {
                continue;
            }

            let normalized_tf =
                (tf * (self.k1 + 1.0)) / (tf + self.k1 * (1.0 - self.b + self.b * length_ratio));
            score += self.idf(term, index) * normalized_tf;
        }

        score
    }
}

/// Which record kinds a search may return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Api,
    /// Documentation search; API records are still included
    Guide,
    #[default]
    All,
}

impl FromStr for SearchType {
    type Err = InvalidFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "guide" => Ok(Self::Guide),
            "all" | "" => Ok(Self::All),
            _ => Err(InvalidFilter::new("type", s)),
        }
    }
}

/// Platform constraint at the query boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFilter {
    Ios,
    Android,
    Both,
}

impl PlatformFilter {
    pub fn matches(&self, platform: Platform) -> bool {
        match self {
            Self::Ios => matches!(platform, Platform::Ios | Platform::IosOnly | Platform::Both),
            Self::Android => matches!(
                platform,
                Platform::Android | Platform::AndroidOnly | Platform::Both
            ),
            Self::Both => platform == Platform::Both,
        }
    }
}

impl FromStr for PlatformFilter {
    type Err = InvalidFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "both" => Ok(Self::Both),
            _ => Err(InvalidFilter::new("platform", s)),
        }
    }
}

impl FromStr for ApiKind {
    type Err = InvalidFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "method" => Ok(Self::Method),
            "property" => Ok(Self::Property),
            _ => Err(InvalidFilter::new("kind", s)),
        }
    }
}

/// Filters applied before scoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub search_type: SearchType,
    pub category: Option<String>,
    pub kind: Option<ApiKind>,
    pub platform: Option<PlatformFilter>,
}

impl SearchFilters {
    pub fn accepts_api(&self, api: &ApiRecord) -> bool {
        if let Some(category) = &self.category {
            if &api.category != category {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if api.kind != kind {
                return false;
            }
        }
        self.platform.map_or(true, |p| p.matches(api.platform))
    }

    /// Category and kind do not apply to chunks; an untagged chunk passes any
    /// platform constraint.
    pub fn accepts_chunk(&self, chunk: &DocChunk) -> bool {
        if self.search_type == SearchType::Api {
            return false;
        }
        match self.platform {
            Some(p) if !chunk.platforms.is_empty() => chunk.platforms.iter().any(|&tag| p.matches(tag)),
            _ => true,
        }
    }
}

/// The record a result points at
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "item", rename_all = "lowercase")]
pub enum SearchHit {
    Api(Arc<ApiRecord>),
    Documentation(Arc<DocChunk>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Api,
    Documentation,
}

/// Ranked search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub hit: SearchHit,
    /// Relevance on a 0-100 scale relative to the best hit
    pub score: u32,
    pub highlights: Vec<Highlight>,
}

impl SearchResult {
    pub fn result_type(&self) -> ResultType {
        match self.hit {
            SearchHit::Api(_) => ResultType::Api,
            SearchHit::Documentation(_) => ResultType::Documentation,
        }
    }

    /// Name for API hits, title for documentation hits
    pub fn label(&self) -> &str {
        match &self.hit {
            SearchHit::Api(api) => &api.name,
            SearchHit::Documentation(chunk) => &chunk.title,
        }
    }
}

/// Candidate with its raw boosted score
struct ScoredDocument {
    hit: SearchHit,
    score: f64,
}

fn name_boost(name: &str, query: &str) -> f64 {
    let name = name.to_lowercase();
    if name == query {
        EXACT_NAME_BOOST
    } else if name.contains(query) || query.contains(name.as_str()) {
        PARTIAL_NAME_BOOST
    } else {
        1.0
    }
}

/// Matches literal substrings of the raw query, so "iOS-specific" counts
fn platform_boost(chunk: &DocChunk, query: &str) -> f64 {
    let mut boost = 1.0;
    if query.contains("ios") && chunk.is_tagged(Platform::Ios) {
        boost *= PLATFORM_MENTION_BOOST;
    }
    if query.contains("android") && chunk.is_tagged(Platform::Android) {
        boost *= PLATFORM_MENTION_BOOST;
    }
    boost
}

/// Rank every filtered document against `query` and return at most `limit`
/// results, best first, scores normalized so the top hit is 100.
pub fn rank_documents(
    index: &SearchIndex,
    tokenizer: &Tokenizer,
    query: &str,
    limit: usize,
    filters: &SearchFilters,
) -> Vec<SearchResult> {
    let query_terms = tokenizer.analyze(query);
    if query_terms.is_empty() {
        return Vec::new();
    }

    let raw_query = query.trim().to_lowercase();
    let candidates: HashSet<&DocId> = index.search_or(&query_terms);
    let bm25 = BM25::default();

    let score_doc = |doc: DocumentRef<'_>| -> f64 {
        let doc_id = doc.id();
        if !candidates.contains(&doc_id) {
            return 0.0;
        }
        let term_frequencies = tokenizer.analyze_with_frequencies(&doc.searchable_text());
        bm25.score(&query_terms, &term_frequencies, index.doc_length(&doc_id), index)
    };

    let mut scored_docs = Vec::new();

    for api in index.apis().iter().filter(|api| filters.accepts_api(api)) {
        let score = score_doc(DocumentRef::Api(api)) * name_boost(&api.name, &raw_query);
        if score > 0.0 {
            scored_docs.push(ScoredDocument {
                hit: SearchHit::Api(Arc::clone(api)),
                score,
            });
        }
    }

    for chunk in index.chunks().iter().filter(|chunk| filters.accepts_chunk(chunk)) {
        let score = score_doc(DocumentRef::Chunk(chunk)) * platform_boost(chunk, &raw_query);
        if score > 0.0 {
            scored_docs.push(ScoredDocument {
                hit: SearchHit::Documentation(Arc::clone(chunk)),
                score,
            });
        }
    }

    // Stable, so ties keep corpus order
    scored_docs.sort_by(|a, b| b.score.total_cmp(&a.score));

    let max_score = match scored_docs.first() {
        Some(top) => top.score,
        None => return Vec::new(),
    };

    scored_docs
        .into_iter()
        .take(limit)
        .map(|doc| {
            let highlights = highlights_for(&doc.hit, &query_terms);
            SearchResult {
                score: (doc.score / max_score * 100.0).round() as u32,
                hit: doc.hit,
                highlights,
            }
        })
        .collect()
}

fn highlights_for(hit: &SearchHit, terms: &[String]) -> Vec<Highlight> {
    match hit {
        SearchHit::Api(api) => [
            highlight_field("name", &api.name, terms),
            highlight_field("description", &api.description, terms),
        ]
        .into_iter()
        .flatten()
        .collect(),
        SearchHit::Documentation(chunk) => [
            highlight_field("title", &chunk.title, terms),
            highlight_sentence("content", &chunk.content, terms),
        ]
        .into_iter()
        .flatten()
        .collect(),
    }
}
