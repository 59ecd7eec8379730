// Re-export main components
pub mod api;
pub mod category;
pub mod corpus;
pub mod document;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod highlight;
pub mod index;
pub mod ranking;
pub mod tokenizer;
pub mod validation;

// Re-export commonly used types
pub use corpus::Corpus;
pub use document::{ApiKind, ApiParameter, ApiRecord, DocChunk, DocType, Platform};
pub use engine::{EngineHandle, SearchEngine, SearchOptions};
pub use index::{IndexStats, SearchIndex};
pub use ranking::{PlatformFilter, ResultType, SearchFilters, SearchHit, SearchResult, SearchType};
pub use tokenizer::Tokenizer;
pub use validation::{ValidationConfig, ValidationReport};

// Re-export error types
pub use anyhow::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
