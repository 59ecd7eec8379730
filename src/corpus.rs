use crate::category::categorize;
use crate::document::{ApiRecord, DocChunk};
use crate::error::CorpusError;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Extractor output: every API record and documentation chunk of one build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Corpus {
    pub apis: Vec<ApiRecord>,
    pub chunks: Vec<DocChunk>,
}

impl Corpus {
    pub fn new(apis: Vec<ApiRecord>, chunks: Vec<DocChunk>) -> Self {
        Self { apis, chunks }
    }

    /// Load a corpus from a JSON file; a `.gz` extension means gzip-compressed JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let gzipped = path.extension().is_some_and(|ext| ext == "gz");
        let reader: Box<dyn Read> = if gzipped {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        let corpus = Self::from_reader(BufReader::new(reader)).map_err(|source| {
            CorpusError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::info!(
            path = %path.display(),
            apis = corpus.apis.len(),
            chunks = corpus.chunks.len(),
            "Loaded corpus"
        );
        Ok(corpus)
    }

    /// Parse JSON and fill in missing categories
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let mut corpus: Self = serde_json::from_reader(reader)?;
        corpus.fill_categories();
        Ok(corpus)
    }

    fn fill_categories(&mut self) {
        for api in &mut self.apis {
            if api.category.trim().is_empty() {
                api.category = categorize(&api.name).to_string();
            }
        }
    }
}
