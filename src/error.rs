use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse corpus file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A filter value that does not name a known type, kind or platform
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} filter '{value}'")]
pub struct InvalidFilter {
    pub field: &'static str,
    pub value: String,
}

impl InvalidFilter {
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Fatal index diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("index validation failed: {}", .errors.join("; "))]
pub struct ValidationFailed {
    pub errors: Vec<String>,
}
