use crate::document::{ApiRecord, DocChunk, DocId, DocumentRef};
use crate::tokenizer::Tokenizer;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Write-once search index over API records and documentation chunks.
///
/// Every field is filled by [`SearchIndex::build`] and never touched again,
/// so shared references can be read from any number of threads.
#[derive(Debug, Default)]
pub struct SearchIndex {
    apis: Vec<Arc<ApiRecord>>,
    api_positions: HashMap<String, usize>,
    chunks: Vec<Arc<DocChunk>>,
    /// term -> documents containing it, in build order
    postings: HashMap<String, Vec<DocId>>,
    doc_lengths: HashMap<DocId, usize>,
    doc_frequencies: HashMap<String, usize>,
    avg_doc_length: f64,
    doc_count: usize,
    total_terms: usize,
}

impl SearchIndex {
    /// Build the index from extractor output. API records are indexed first,
    /// then chunks; records without a name or id are skipped.
    pub fn build(apis: Vec<ApiRecord>, chunks: Vec<DocChunk>) -> Self {
        let mut builder = IndexBuilder::new(Tokenizer::new());
        for api in apis {
            builder.add_api(api);
        }
        for chunk in chunks {
            builder.add_chunk(chunk);
        }
        builder.finish()
    }

    pub fn apis(&self) -> &[Arc<ApiRecord>] {
        &self.apis
    }

    pub fn chunks(&self) -> &[Arc<DocChunk>] {
        &self.chunks
    }

    /// Exact (case-sensitive) name lookup
    pub fn get_api(&self, name: &str) -> Option<&Arc<ApiRecord>> {
        self.api_positions.get(name).map(|&pos| &self.apis[pos])
    }

    /// Get document IDs containing a term
    pub fn get_documents(&self, term: &str) -> Option<&Vec<DocId>> {
        self.postings.get(term)
    }

    /// Get number of documents containing a term (for IDF calculation)
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.doc_frequencies.get(term).copied().unwrap_or(0)
    }

    /// Build-time length of a document, 0 if unknown
    pub fn doc_length(&self, id: &DocId) -> usize {
        self.doc_lengths.get(id).copied().unwrap_or(0)
    }

    pub fn avg_doc_length(&self) -> f64 {
        self.avg_doc_length
    }

    /// Get total number of indexed documents
    pub fn total_documents(&self) -> usize {
        self.doc_count
    }

    /// Search for documents matching ANY term (OR query)
    pub fn search_or(&self, terms: &[String]) -> HashSet<&DocId> {
        terms
            .iter()
            .filter_map(|term| self.get_documents(term))
            .flatten()
            .collect()
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        let mut categories = BTreeMap::new();
        for api in &self.apis {
            *categories.entry(api.category.clone()).or_insert(0) += 1;
        }
        let mut doc_types = BTreeMap::new();
        for chunk in &self.chunks {
            *doc_types.entry(chunk.doc_type.as_str().to_string()).or_insert(0) += 1;
        }

        IndexStats {
            total_documents: self.doc_count,
            api_count: self.apis.len(),
            chunk_count: self.chunks.len(),
            unique_terms: self.postings.len(),
            total_terms: self.total_terms,
            avg_doc_length: self.avg_doc_length,
            categories,
            doc_types,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub total_documents: usize,
    pub api_count: usize,
    pub chunk_count: usize,
    pub unique_terms: usize,
    pub total_terms: usize,
    pub avg_doc_length: f64,
    /// API records per category
    pub categories: BTreeMap<String, usize>,
    /// Documentation chunks per doc type
    pub doc_types: BTreeMap<String, usize>,
}

/// Mutable accumulator consumed into a [`SearchIndex`]
pub(crate) struct IndexBuilder {
    tokenizer: Tokenizer,
    index: SearchIndex,
    chunk_ids: HashSet<String>,
}

impl IndexBuilder {
    pub(crate) fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            index: SearchIndex::default(),
            chunk_ids: HashSet::new(),
        }
    }

    pub(crate) fn add_api(&mut self, api: ApiRecord) {
        if api.name.trim().is_empty() {
            tracing::warn!("Skipping API record without a name");
            return;
        }
        if self.index.api_positions.contains_key(&api.name) {
            tracing::warn!(name = %api.name, "Skipping duplicate API record");
            return;
        }

        self.add_document(DocumentRef::Api(&api));
        self.index
            .api_positions
            .insert(api.name.clone(), self.index.apis.len());
        self.index.apis.push(Arc::new(api));
    }

    pub(crate) fn add_chunk(&mut self, chunk: DocChunk) {
        if chunk.id.trim().is_empty() {
            tracing::warn!(title = %chunk.title, "Skipping documentation chunk without an id");
            return;
        }
        if !self.chunk_ids.insert(chunk.id.clone()) {
            tracing::warn!(id = %chunk.id, "Skipping duplicate documentation chunk");
            return;
        }

        self.add_document(DocumentRef::Chunk(&chunk));
        self.index.chunks.push(Arc::new(chunk));
    }

    fn add_document(&mut self, doc: DocumentRef<'_>) {
        let doc_id = doc.id();
        let terms = self.tokenizer.analyze(&doc.searchable_text());

        let unique_terms: HashSet<&String> = terms.iter().collect();
        for term in unique_terms {
            self.index
                .postings
                .entry(term.clone())
                .or_default()
                .push(doc_id.clone());
            *self.index.doc_frequencies.entry(term.clone()).or_insert(0) += 1;
        }

        self.index.total_terms += terms.len();
        self.index.doc_lengths.insert(doc_id, terms.len());
        self.index.doc_count += 1;
    }

    pub(crate) fn finish(mut self) -> SearchIndex {
        self.index.avg_doc_length = if self.index.doc_count == 0 {
            0.0
        } else {
            self.index.total_terms as f64 / self.index.doc_count as f64
        };
        self.index
    }
}
