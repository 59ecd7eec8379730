use crate::corpus::Corpus;
use crate::document::{ApiRecord, DocChunk};
use crate::fuzzy::{self, DEFAULT_LIMIT, DEFAULT_MAX_DISTANCE};
use crate::index::{IndexStats, SearchIndex};
use crate::ranking::{rank_documents, SearchFilters, SearchResult};
use crate::tokenizer::Tokenizer;
use crate::validation::{self, ValidationConfig, ValidationReport};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

/// Search options
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub limit: usize,
    pub filters: SearchFilters,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            filters: SearchFilters::default(),
        }
    }
}

/// Read-only search engine over one corpus build
#[derive(Debug)]
pub struct SearchEngine {
    index: SearchIndex,
    tokenizer: Tokenizer,
}

impl SearchEngine {
    /// Build a new engine from extractor output
    pub fn build(apis: Vec<ApiRecord>, chunks: Vec<DocChunk>) -> Self {
        let start = Instant::now();
        let index = SearchIndex::build(apis, chunks);
        tracing::info!(
            apis = index.apis().len(),
            chunks = index.chunks().len(),
            terms = index.stats().unique_terms,
            elapsed = ?start.elapsed(),
            "Built search index"
        );

        Self {
            index,
            tokenizer: Tokenizer::new(),
        }
    }

    pub fn from_corpus(corpus: Corpus) -> Self {
        Self::build(corpus.apis, corpus.chunks)
    }

    /// Ranked search across API records and documentation
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        let results = rank_documents(
            &self.index,
            &self.tokenizer,
            query,
            options.limit,
            &options.filters,
        );
        tracing::debug!(query, results = results.len(), "Search");
        results
    }

    /// Closest API records to a possibly misspelled name
    pub fn find_similar(&self, name: &str, max_distance: usize, limit: usize) -> Vec<Arc<ApiRecord>> {
        fuzzy::find_similar(name, self.index.apis(), max_distance, limit)
            .into_iter()
            .cloned()
            .collect()
    }

    /// [`find_similar`](Self::find_similar) with the default distance and limit
    pub fn suggest(&self, name: &str) -> Vec<Arc<ApiRecord>> {
        self.find_similar(name, DEFAULT_MAX_DISTANCE, DEFAULT_LIMIT)
    }

    pub fn get_api(&self, name: &str) -> Option<Arc<ApiRecord>> {
        self.index.get_api(name).cloned()
    }

    /// Related APIs of `name` that exist in the index, in declared order
    pub fn related_apis(&self, name: &str) -> Vec<Arc<ApiRecord>> {
        self.index
            .get_api(name)
            .map(|api| {
                api.related_apis
                    .iter()
                    .filter_map(|related| self.index.get_api(related).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn validate(&self, config: &ValidationConfig) -> ValidationReport {
        validation::validate(&self.index, config)
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }
}

/// Shared, swappable reference to the current engine.
///
/// Queries take a snapshot and run against it without holding the lock, so a
/// reload never mutates an index that is being read; it builds a new engine
/// and replaces the pointer.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    current: Arc<RwLock<Arc<SearchEngine>>>,
}

impl EngineHandle {
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    pub fn snapshot(&self) -> Arc<SearchEngine> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Install a freshly built engine, returning the previous one
    pub fn replace(&self, engine: SearchEngine) -> Arc<SearchEngine> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(engine))
    }
}
