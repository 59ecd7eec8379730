use crate::corpus::Corpus;
use crate::document::{ApiKind, ApiRecord};
use crate::engine::{EngineHandle, SearchEngine, SearchOptions};
use crate::error::InvalidFilter;
use crate::fuzzy::{DEFAULT_LIMIT, DEFAULT_MAX_DISTANCE};
use crate::index::IndexStats;
use crate::ranking::{PlatformFilter, SearchFilters, SearchResult, SearchType};
use crate::validation::{ValidationConfig, ValidationReport};
use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: EngineHandle,
    /// Corpus file re-read by `POST /reload`; reload is refused without one
    pub corpus_path: Option<PathBuf>,
    pub validation: ValidationConfig,
}

impl AppState {
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            engine: EngineHandle::new(engine),
            corpus_path: None,
            validation: ValidationConfig::default(),
        }
    }

    pub fn with_corpus_path(mut self, path: PathBuf) -> Self {
        self.corpus_path = Some(path);
        self
    }

    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }
}

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default, rename = "type")]
    pub search_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

impl SearchRequest {
    fn options(&self) -> Result<SearchOptions, InvalidFilter> {
        let filters = SearchFilters {
            search_type: self
                .search_type
                .as_deref()
                .map(str::parse::<SearchType>)
                .transpose()?
                .unwrap_or_default(),
            category: self.category.clone().filter(|c| !c.is_empty()),
            kind: self.kind.as_deref().map(str::parse::<ApiKind>).transpose()?,
            platform: self
                .platform
                .as_deref()
                .map(str::parse::<PlatformFilter>)
                .transpose()?,
        };

        Ok(SearchOptions {
            limit: self.limit.unwrap_or(10),
            filters,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SimilarRequest {
    pub name: String,
    #[serde(default)]
    pub max_distance: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    pub name: String,
    pub matches: Vec<Arc<ApiRecord>>,
}

#[derive(Debug, Serialize)]
pub struct ApiDetailResponse {
    pub api: Arc<ApiRecord>,
    pub related: Vec<Arc<ApiRecord>>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

// ========== Error Handling ==========

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = format!("{:#}", self.0);
        let status = if self.0.downcast_ref::<InvalidFilter>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("API error: {}", message);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ========== Handlers ==========

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn search(
    State(state): State<AppState>,
    Query(req): Query<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let options = req.options()?;
    let engine = state.engine.snapshot();
    let results = engine.search(&req.query, &options);

    Ok(Json(ApiResponse::success(SearchResponse {
        query: req.query,
        total: results.len(),
        results,
    })))
}

async fn similar(
    State(state): State<AppState>,
    Query(req): Query<SimilarRequest>,
) -> impl IntoResponse {
    let engine = state.engine.snapshot();
    let matches = engine.find_similar(
        &req.name,
        req.max_distance.unwrap_or(DEFAULT_MAX_DISTANCE),
        req.limit.unwrap_or(DEFAULT_LIMIT),
    );

    Json(ApiResponse::success(SimilarResponse {
        name: req.name,
        matches,
    }))
}

async fn get_api(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let engine = state.engine.snapshot();
    match engine.get_api(&name) {
        Some(api) => Json(ApiResponse::success(ApiDetailResponse {
            related: engine.related_apis(&name),
            api,
        }))
        .into_response(),
        None => {
            let suggestions: Vec<String> = engine
                .suggest(&name)
                .iter()
                .map(|api| api.name.clone())
                .collect();
            let message = if suggestions.is_empty() {
                format!("API '{}' not found", name)
            } else {
                format!("API '{}' not found. Did you mean: {}?", name, suggestions.join(", "))
            };
            (StatusCode::NOT_FOUND, Json(ApiResponse::<()>::error(message))).into_response()
        }
    }
}

async fn get_stats(State(state): State<AppState>) -> Json<ApiResponse<IndexStats>> {
    Json(ApiResponse::success(state.engine.snapshot().stats()))
}

async fn get_validation(State(state): State<AppState>) -> Json<ApiResponse<ValidationReport>> {
    let report = state.engine.snapshot().validate(&state.validation);
    Json(ApiResponse::success(report))
}

async fn reload(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let path = state
        .corpus_path
        .clone()
        .context("No corpus path configured for reload")?;

    let engine = tokio::task::spawn_blocking(move || -> anyhow::Result<SearchEngine> {
        let corpus = Corpus::load(&path)?;
        Ok(SearchEngine::from_corpus(corpus))
    })
    .await
    .context("Reload task panicked")??;

    let report = engine.validate(&state.validation);
    report.log();
    let stats = engine.stats();
    state.engine.replace(engine);
    tracing::info!(documents = stats.total_documents, "Reloaded search index");

    Ok(Json(ApiResponse::success(stats)))
}

// ========== Router ==========

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/search", get(search))
        .route("/similar", get(similar))
        .route("/apis/:name", get(get_api))
        .route("/stats", get(get_stats))
        .route("/validate", get(get_validation))
        .route("/reload", post(reload))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocChunk, Platform};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(SearchEngine::build(
            vec![
                ApiRecord::new("getBatteryLevel", "Get current battery level from 0.0 to 1.0")
                    .with_category("battery-power")
                    .with_related(&["getCarrier"]),
                ApiRecord::new("getCarrier", "Get the network carrier name")
                    .with_category("network")
                    .with_platform(Platform::AndroidOnly),
            ],
            vec![DocChunk::new("readme-1", "Battery Info", "Use getBatteryLevel to read charge.")],
        ))
    }

    async fn get_json(uri: &str) -> anyhow::Result<(StatusCode, Value)> {
        let response = create_router(state())
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, serde_json::from_slice(&bytes)?))
    }

    #[tokio::test]
    async fn test_search_endpoint() -> anyhow::Result<()> {
        let (status, body) = get_json("/search?query=battery%20level&limit=5").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["results"][0]["type"], "api");
        assert_eq!(body["data"]["results"][0]["item"]["name"], "getBatteryLevel");
        assert_eq!(body["data"]["results"][0]["score"], 100);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_rejects_bad_filter() -> anyhow::Result<()> {
        let (status, body) = get_json("/search?query=battery&platform=windows").await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_platform_filter() -> anyhow::Result<()> {
        let (_, body) = get_json("/search?query=carrier&platform=ios&type=api").await?;
        assert_eq!(body["data"]["total"], 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_similar_endpoint() -> anyhow::Result<()> {
        let (status, body) = get_json("/similar?name=getBattryLevel").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["matches"][0]["name"], "getBatteryLevel");
        Ok(())
    }

    #[tokio::test]
    async fn test_api_lookup() -> anyhow::Result<()> {
        let (status, body) = get_json("/apis/getBatteryLevel").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["related"][0]["name"], "getCarrier");

        let (status, body) = get_json("/apis/getCarier").await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap_or_default().contains("getCarrier"));
        Ok(())
    }

    #[tokio::test]
    async fn test_reload_without_path_fails() -> anyhow::Result<()> {
        let response = create_router(state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reload")
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        Ok(())
    }
}
