use crate::category::EXPECTED_CATEGORIES;
use crate::error::ValidationFailed;
use crate::index::SearchIndex;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Fewer API records than this is an error
    pub min_api_count: usize,
    /// Categories that should each have at least one API record
    pub expected_categories: Vec<String>,
    /// Descriptions shorter than this many characters are reported as thin
    pub min_description_len: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_api_count: 50,
            expected_categories: EXPECTED_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            min_description_len: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Emit every finding through tracing
    pub fn log(&self) {
        for error in &self.errors {
            tracing::error!("Index validation: {}", error);
        }
        for warning in &self.warnings {
            tracing::warn!("Index validation: {}", warning);
        }
    }

    pub fn into_result(self) -> Result<(), ValidationFailed> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationFailed {
                errors: self.errors,
            })
        }
    }
}

/// Startup diagnostics for a built index. Errors mark a corpus that is not
/// worth serving; warnings point at thin coverage. Neither stops the index
/// from answering queries.
pub fn validate(index: &SearchIndex, config: &ValidationConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if index.total_documents() == 0 {
        report.errors.push("index is empty".to_string());
        return report;
    }

    let api_count = index.apis().len();
    if api_count < config.min_api_count {
        report.errors.push(format!(
            "only {} API records indexed, expected at least {}",
            api_count, config.min_api_count
        ));
    }

    if index.chunks().is_empty() {
        report
            .warnings
            .push("no documentation chunks indexed".to_string());
    }

    let stats = index.stats();
    for category in &config.expected_categories {
        if !stats.categories.contains_key(category) {
            report
                .warnings
                .push(format!("no API records in category '{}'", category));
        }
    }

    let thin: Vec<&str> = index
        .apis()
        .iter()
        .filter(|api| api.description.trim().chars().count() < config.min_description_len)
        .map(|api| api.name.as_str())
        .collect();
    if !thin.is_empty() {
        report.warnings.push(format!(
            "{} API records have thin descriptions: {}",
            thin.len(),
            thin.join(", ")
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ApiRecord, DocChunk};

    #[test]
    fn test_empty_index_is_an_error() {
        let index = SearchIndex::build(Vec::new(), Vec::new());
        let report = validate(&index, &ValidationConfig::default());
        assert!(!report.is_valid());
        assert_eq!(report.errors, vec!["index is empty".to_string()]);
    }

    #[test]
    fn test_below_minimum_api_count() {
        let index = SearchIndex::build(
            vec![ApiRecord::new("getCarrier", "Get the carrier name").with_category("network")],
            vec![DocChunk::new("a", "Intro", "text")],
        );
        let report = validate(&index, &ValidationConfig::default());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("only 1 API records"));
        assert!(report.clone().into_result().is_err());
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let index = SearchIndex::build(
            vec![
                ApiRecord::new("getCarrier", "Get the carrier name").with_category("network"),
                ApiRecord::new("isTablet", "Tablet").with_category("device-identity"),
            ],
            Vec::new(),
        );
        let config = ValidationConfig {
            min_api_count: 2,
            expected_categories: vec!["network".to_string(), "location".to_string()],
            ..Default::default()
        };
        let report = validate(&index, &config);

        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.contains("no documentation chunks")));
        assert!(report.warnings.iter().any(|w| w.contains("'location'")));
        assert!(!report.warnings.iter().any(|w| w.contains("'network'")));
        assert!(report.warnings.iter().any(|w| w.contains("isTablet")));
        assert!(report.into_result().is_ok());
    }
}
