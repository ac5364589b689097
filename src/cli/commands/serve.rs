//! Explorer HTTP API server.
//!
//! Serves the precomputed pipeline artifacts plus grounded question
//! answering. Artifacts are loaded lazily on first access and cached
//! read-only for the life of the process; restart the server to pick up
//! regenerated files.

use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::embedding::OpenAIEmbedder;
use crate::error::ReferatError;
use crate::qa::QaEngine;
use crate::search::{keyword_search, KEYWORD_RESULT_CAP};
use crate::store::{self, DataPaths};
use crate::transcription::{Paragraph, StructuredTranscript};
use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tower::util::ServiceExt;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;

/// Shared application state with lazily-populated, read-only caches.
struct AppState {
    settings: Settings,
    paths: DataPaths,
    transcript: OnceCell<StructuredTranscript>,
    embeddings: OnceCell<Vec<Vec<f32>>>,
    summary: OnceCell<serde_json::Value>,
}

impl AppState {
    fn new(settings: Settings) -> Self {
        let paths = DataPaths::from_settings(&settings);
        Self {
            settings,
            paths,
            transcript: OnceCell::new(),
            embeddings: OnceCell::new(),
            summary: OnceCell::new(),
        }
    }

    async fn transcript(&self) -> Result<&StructuredTranscript, ReferatError> {
        self.transcript
            .get_or_try_init(|| async { store::read_json(&self.paths.structured_transcript()) })
            .await
    }

    async fn embeddings(&self) -> Result<&Vec<Vec<f32>>, ReferatError> {
        self.embeddings
            .get_or_try_init(|| async { store::read_json(&self.paths.embeddings()) })
            .await
    }

    async fn summary(&self) -> Result<&serde_json::Value, ReferatError> {
        self.summary
            .get_or_try_init(|| async { store::load_summary_or_empty(&self.paths.detailed_summary()) })
            .await
    }
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(settings));
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Referat API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Transcript", "GET  /api/transcript");
    Output::kv("Summary", "GET  /api/summary");
    Output::kv("Audio", "GET  /api/audio");
    Output::kv("Search", "GET  /api/search?q=&speaker=");
    Output::kv("Ask", "POST /api/ask");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/transcript", get(get_transcript))
        .route("/api/summary", get(get_summary))
        .route("/api/audio", get(get_audio))
        .route("/api/search", get(search_transcript))
        .route("/api/ask", post(ask_question))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    speaker: Option<u32>,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<SearchHit>,
    total: usize,
}

#[derive(Serialize)]
struct SearchHit {
    paragraph: Paragraph,
    index: usize,
}

#[derive(Deserialize)]
struct AskRequest {
    #[serde(default)]
    question: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn internal_error(e: impl std::fmt::Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn get_transcript(State(state): State<Arc<AppState>>) -> Response {
    match state.transcript().await {
        Ok(transcript) => Json(transcript).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn get_summary(State(state): State<Arc<AppState>>) -> Response {
    match state.summary().await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => internal_error(e),
    }
}

/// Serve the source recording for playback, honoring Range requests.
async fn get_audio(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let path = state.paths.audio();
    if !path.exists() {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Audio file not found: {}", path.display()),
            }),
        )
            .into_response();
    }

    match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(e) => internal_error(e),
    }
}

async fn search_transcript(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let transcript = match state.transcript().await {
        Ok(transcript) => transcript,
        Err(e) => return internal_error(e),
    };

    let results: Vec<SearchHit> =
        keyword_search(&transcript.paragraphs, &params.q, params.speaker, KEYWORD_RESULT_CAP)
            .into_iter()
            .map(|hit| SearchHit {
                paragraph: hit.paragraph.clone(),
                index: hit.index,
            })
            .collect();

    let total = results.len();
    Json(SearchResponse { results, total }).into_response()
}

async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Response {
    // Blank questions and missing credentials are answered before touching
    // the caches or the network.
    if let Some(early) = QaEngine::preflight(&request.question) {
        return Json(early).into_response();
    }

    let transcript = match state.transcript().await {
        Ok(transcript) => transcript,
        Err(e) => return internal_error(e),
    };
    let embeddings = match state.embeddings().await {
        Ok(embeddings) => embeddings,
        Err(e) => return internal_error(e),
    };

    let settings = &state.settings;
    let prompts = match Prompts::load(settings.prompts.custom_dir.as_deref()) {
        Ok(prompts) => prompts,
        Err(e) => return internal_error(e),
    };

    let embedder = Arc::new(OpenAIEmbedder::with_config(
        &settings.embedding.model,
        settings.embedding.dimensions as usize,
        settings.embedding.batch_size,
    ));

    let engine = QaEngine::new(embedder, &settings.qa.model, settings.qa.max_context_paragraphs)
        .with_prompts(prompts.qa);

    match engine.ask(&request.question, transcript, embeddings).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => internal_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request as HttpRequest;
    use std::path::Path;

    fn write_fixture_transcript(dir: &Path) {
        let transcript = StructuredTranscript {
            summary: "Two people talk about money.".to_string(),
            speakers: vec![0, 1],
            paragraphs: vec![
                Paragraph {
                    speaker: Some(0),
                    start: 0.0,
                    end: 4.0,
                    num_words: 4,
                    text: "Money was discussed today".to_string(),
                    sentences: Vec::new(),
                },
                Paragraph {
                    speaker: Some(1),
                    start: 4.0,
                    end: 8.0,
                    num_words: 3,
                    text: "Nothing else happened".to_string(),
                    sentences: Vec::new(),
                },
            ],
            ..Default::default()
        };
        store::write_json_pretty(&dir.join("transcript_structured.json"), &transcript).unwrap();
    }

    fn app_in(dir: &Path) -> Router {
        let mut settings = Settings::default();
        settings.general.data_dir = dir.to_string_lossy().to_string();
        router(Arc::new(AppState::new(settings)))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_search_no_match_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_transcript(dir.path());

        let response = app_in(dir.path())
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/search?q=xyz123notfound")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"results": [], "total": 0}));
    }

    #[tokio::test]
    async fn test_search_case_insensitive_with_index() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_transcript(dir.path());

        let response = app_in(dir.path())
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/search?q=money")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["results"][0]["index"], 0);
        assert_eq!(
            json["results"][0]["paragraph"]["text"],
            "Money was discussed today"
        );
    }

    #[tokio::test]
    async fn test_search_speaker_filter() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_transcript(dir.path());

        let response = app_in(dir.path())
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/search?speaker=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["results"][0]["index"], 1);
    }

    #[tokio::test]
    async fn test_ask_blank_question_short_circuits() {
        // No transcript fixture on disk: the blank-question path must answer
        // without loading anything.
        let dir = tempfile::tempdir().unwrap();

        let response = app_in(dir.path())
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/api/ask")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"question": "   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({"answer": "Please provide a question.", "sources": []})
        );
    }

    #[tokio::test]
    async fn test_ask_missing_question_field_treated_as_blank() {
        let dir = tempfile::tempdir().unwrap();

        let response = app_in(dir.path())
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/api/ask")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["answer"], "Please provide a question.");
    }

    #[tokio::test]
    async fn test_summary_missing_returns_empty_object() {
        let dir = tempfile::tempdir().unwrap();

        let response = app_in(dir.path())
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_audio_missing_returns_404() {
        let dir = tempfile::tempdir().unwrap();

        let response = app_in(dir.path())
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/audio")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_transcript_endpoint_serves_structured_transcript() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_transcript(dir.path());

        let response = app_in(dir.path())
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/transcript")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["summary"], "Two people talk about money.");
        assert_eq!(json["speakers"], serde_json::json!([0, 1]));
        assert_eq!(json["paragraphs"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_transcript_missing_returns_500() {
        let dir = tempfile::tempdir().unwrap();

        let response = app_in(dir.path())
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/transcript")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].is_string());
    }
}
