use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an API member is called or read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
    #[default]
    Method,
    Property,
}

impl ApiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Property => "property",
        }
    }
}

/// Platform applicability tag as produced by the extractors.
///
/// Unknown tags (`windows`, `web`, ...) deserialize as [`Platform::Other`]
/// so a single odd record does not reject the whole corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Ios,
    Android,
    IosOnly,
    AndroidOnly,
    #[default]
    Both,
    #[serde(other)]
    Other,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::IosOnly => "ios-only",
            Self::AndroidOnly => "android-only",
            Self::Both => "both",
            Self::Other => "other",
        }
    }
}

/// Documentation chunk flavour, derived from the source file it came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Api,
    #[default]
    Guide,
    Example,
    Troubleshooting,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Guide => "guide",
            Self::Example => "example",
            Self::Troubleshooting => "troubleshooting",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub description: String,
    pub optional: bool,
}

/// One public member of the library surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiRecord {
    pub name: String,
    pub kind: ApiKind,
    pub description: String,
    pub signature: String,
    pub return_type: String,
    pub parameters: Vec<ApiParameter>,
    pub platform: Platform,
    pub is_async: bool,
    pub examples: Vec<String>,
    pub related_apis: Vec<String>,
    pub category: String,
}

impl ApiRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_kind(mut self, kind: ApiKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>, return_type: impl Into<String>) -> Self {
        self.signature = signature.into();
        self.return_type = return_type.into();
        self
    }

    pub fn with_related(mut self, related: &[&str]) -> Self {
        self.related_apis = related.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Get the full searchable text
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = vec![
            self.name.as_str(),
            self.description.as_str(),
            self.signature.as_str(),
            self.return_type.as_str(),
        ];
        for param in &self.parameters {
            parts.push(param.name.as_str());
            parts.push(param.param_type.as_str());
            parts.push(param.description.as_str());
        }
        parts.extend(self.examples.iter().map(String::as_str));
        parts.push(self.category.as_str());
        parts.join(" ")
    }
}

/// A heading-bounded section of markdown documentation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocChunk {
    pub id: String,
    pub source: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub doc_type: DocType,
    pub level: u8,
    pub parent_id: Option<String>,
    pub api_mentions: Vec<String>,
    pub platforms: Vec<Platform>,
}

impl DocChunk {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            level: 2,
            ..Default::default()
        }
    }

    pub fn with_platforms(mut self, platforms: &[Platform]) -> Self {
        self.platforms = platforms.to_vec();
        self
    }

    pub fn with_mentions(mut self, mentions: &[&str]) -> Self {
        self.api_mentions = mentions.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_doc_type(mut self, doc_type: DocType) -> Self {
        self.doc_type = doc_type;
        self
    }

    /// Get the full searchable text (title + content + mentioned APIs)
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.title.as_str(), self.content.as_str()];
        parts.extend(self.api_mentions.iter().map(String::as_str));
        parts.join(" ")
    }

    pub fn is_tagged(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

/// Ranking-side view of either record kind.
///
/// The two id namespaces are kept disjoint by prefixing.
#[derive(Debug, Clone, Copy)]
pub enum DocumentRef<'a> {
    Api(&'a ApiRecord),
    Chunk(&'a DocChunk),
}

impl DocumentRef<'_> {
    pub fn id(&self) -> DocId {
        match self {
            Self::Api(api) => DocId::api(&api.name),
            Self::Chunk(chunk) => DocId::chunk(&chunk.id),
        }
    }

    pub fn searchable_text(&self) -> String {
        match self {
            Self::Api(api) => api.searchable_text(),
            Self::Chunk(chunk) => chunk.searchable_text(),
        }
    }
}

/// Document identifier: `api:<name>` or `doc:<chunk id>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    pub fn api(name: &str) -> Self {
        Self(format!("api:{}", name))
    }

    pub fn chunk(id: &str) -> Self {
        Self(format!("doc:{}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_searchable_text_field_order() {
        let mut api = ApiRecord::new("getBatteryLevel", "Get battery level")
            .with_signature("getBatteryLevel(): Promise<number>", "Promise<number>")
            .with_category("battery-power");
        api.parameters.push(ApiParameter {
            name: "unit".to_string(),
            param_type: "string".to_string(),
            description: "Output unit".to_string(),
            optional: true,
        });
        api.examples.push("const level = await getBatteryLevel();".to_string());

        assert_eq!(
            api.searchable_text(),
            "getBatteryLevel Get battery level getBatteryLevel(): Promise<number> Promise<number> \
             unit string Output unit const level = await getBatteryLevel(); battery-power"
        );
    }

    #[test]
    fn test_chunk_searchable_text() {
        let chunk = DocChunk::new("readme-3", "Battery Info", "Use getBatteryLevel to read charge.")
            .with_mentions(&["getBatteryLevel"]);
        assert_eq!(
            chunk.searchable_text(),
            "Battery Info Use getBatteryLevel to read charge. getBatteryLevel"
        );
    }

    #[test]
    fn test_doc_ids_are_disjoint() {
        let api = ApiRecord::new("intro", "");
        let chunk = DocChunk::new("intro", "Intro", "");
        assert_eq!(DocumentRef::Api(&api).id().as_str(), "api:intro");
        assert_eq!(DocumentRef::Chunk(&chunk).id().as_str(), "doc:intro");
        assert_ne!(DocumentRef::Api(&api).id(), DocumentRef::Chunk(&chunk).id());
    }

    #[test]
    fn test_deserialize_tolerates_missing_and_unknown_fields() {
        let api: ApiRecord = serde_json::from_str(
            r#"{"name": "isTablet", "kind": "property", "platform": "windows", "isAsync": false}"#,
        )
        .unwrap();
        assert_eq!(api.kind, ApiKind::Property);
        assert_eq!(api.platform, Platform::Other);
        assert!(api.description.is_empty());

        let chunk: DocChunk = serde_json::from_str(
            r#"{"id": "readme-1", "title": "Setup", "type": "troubleshooting", "platforms": ["ios"]}"#,
        )
        .unwrap();
        assert_eq!(chunk.doc_type, DocType::Troubleshooting);
        assert!(chunk.is_tagged(Platform::Ios));
    }
}
