//! HTTP API routes.
//!
//! The wire format is the one the web frontend already speaks: every
//! success body carries `"success": true`, every failure body carries
//! `"success": false` and an `error` string.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{debug, error};

use herald_channels::DispatchError;
use herald_core::types::{ChannelDescriptor, ChannelFailure, DispatchReport, DispatchRequest};
use herald_rewrite::{RewriteError, RewriteStyle};

use crate::state::AppState;

/// Body of `POST /api/send-article`.
#[derive(Debug, Deserialize)]
pub struct SendArticleRequest {
    /// Article text to broadcast.
    #[serde(default)]
    pub article_text: String,

    /// Target channel ids. Empty means every registered channel.
    #[serde(default)]
    pub channels: Vec<String>,
}

/// Body of a successful `POST /api/send-article`.
#[derive(Debug, Serialize)]
pub struct SendArticleResponse {
    pub success: bool,
    pub sent: usize,
    pub total: usize,
    pub failed: Vec<ChannelFailure>,
}

impl From<DispatchReport> for SendArticleResponse {
    fn from(report: DispatchReport) -> Self {
        Self {
            success: true,
            sent: report.sent,
            total: report.total,
            failed: report.failures,
        }
    }
}

/// Body of `GET /api/channels`.
#[derive(Debug, Serialize)]
pub struct ChannelsResponse {
    pub success: bool,
    pub channels: Vec<ChannelDescriptor>,
}

/// Body of `POST /api/rewrite`.
#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub text: String,

    /// Style name. Missing means casual.
    pub style: Option<String>,
}

/// Body of a successful `POST /api/rewrite`.
#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub success: bool,
    pub style: RewriteStyle,
    pub text: String,
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/channels", get(list_channels))
        .route("/api/send-article", post(send_article))
        .route("/api/rewrite", post(rewrite_article))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "success": false,
            "error": message.into(),
        })),
    )
        .into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_channels(State(state): State<Arc<AppState>>) -> Response {
    let channels = state.store.load_or_empty().await;
    debug!("Listing {} channels", channels.len());
    Json(ChannelsResponse {
        success: true,
        channels,
    })
    .into_response()
}

async fn send_article(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendArticleRequest>,
) -> Response {
    let request = DispatchRequest {
        text: payload.article_text,
        target_ids: payload.channels,
    };

    match state.dispatcher.dispatch_article(&request).await {
        Ok(report) => (StatusCode::OK, Json(SendArticleResponse::from(report))).into_response(),
        Err(e @ (DispatchError::EmptyText | DispatchError::NoChannels)) => {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e @ DispatchError::AllFailed { .. }) => {
            error!("Dispatch failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

async fn rewrite_article(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RewriteRequest>,
) -> Response {
    let Some(rewriter) = state.rewriter.as_ref() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "rewrite backend not configured",
        );
    };

    let style = match payload.style.as_deref() {
        Some(raw) => match raw.parse::<RewriteStyle>() {
            Ok(style) => style,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        },
        None => RewriteStyle::default(),
    };

    match rewriter.rewrite(&payload.text, style).await {
        Ok(text) => Json(RewriteResponse {
            success: true,
            style,
            text,
        })
        .into_response(),
        Err(e @ RewriteError::EmptyInput) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e) => {
            error!("Rewrite failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ArticleDispatcher;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use herald_channels::{dispatch, ChannelError, ChannelSender, ChannelStore, DispatchPolicy};
    use herald_core::types::TextFormat;
    use herald_rewrite::{CompletionOptions, CompletionProvider, Rewriter};

    /// Fails the scripted channel ids, succeeds on the rest.
    struct ScriptedSender {
        fail: Vec<(String, String)>,
    }

    #[async_trait]
    impl ChannelSender for ScriptedSender {
        async fn send(
            &self,
            channel_id: &str,
            _text: &str,
            _format: TextFormat,
        ) -> herald_channels::Result<()> {
            if let Some((_, message)) = self.fail.iter().find(|(id, _)| id == channel_id) {
                return Err(ChannelError::channel("telegram", message.clone()));
            }
            Ok(())
        }
    }

    /// Runs the real dispatch pipeline over an in-memory registry.
    struct TestDispatcher {
        registry: Vec<ChannelDescriptor>,
        sender: ScriptedSender,
    }

    impl TestDispatcher {
        fn with_registry(registry: Vec<ChannelDescriptor>) -> Self {
            Self {
                registry,
                sender: ScriptedSender { fail: Vec::new() },
            }
        }
    }

    #[async_trait]
    impl ArticleDispatcher for TestDispatcher {
        async fn dispatch_article(
            &self,
            request: &DispatchRequest,
        ) -> Result<DispatchReport, DispatchError> {
            dispatch(request, &self.registry, &self.sender, DispatchPolicy::default()).await
        }
    }

    struct CannedProvider(String);

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(
            &self,
            _prompt: &str,
            _options: &CompletionOptions,
        ) -> herald_rewrite::Result<String> {
            Ok(self.0.clone())
        }
    }

    fn empty_store() -> (TempDir, ChannelStore) {
        let dir = TempDir::new().unwrap();
        let store = ChannelStore::new(dir.path().join("channels.json"));
        (dir, store)
    }

    fn app(state: AppState) -> Router {
        router(Arc::new(state))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, store) = empty_store();
        let state = AppState::new(
            Arc::new(TestDispatcher::with_registry(Vec::new())),
            store,
            None,
        );

        let response = app(state).oneshot(get_request("/api/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_channels_empty() {
        let (_dir, store) = empty_store();
        let state = AppState::new(
            Arc::new(TestDispatcher::with_registry(Vec::new())),
            store,
            None,
        );

        let response = app(state)
            .oneshot(get_request("/api/channels"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["channels"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_list_channels_returns_registry_order() {
        let (_dir, store) = empty_store();
        store
            .save(&[
                ChannelDescriptor::new("-100", "Alpha"),
                ChannelDescriptor::new("-200", "Beta"),
            ])
            .await
            .unwrap();
        let state = AppState::new(
            Arc::new(TestDispatcher::with_registry(Vec::new())),
            store,
            None,
        );

        let response = app(state)
            .oneshot(get_request("/api/channels"))
            .await
            .unwrap();

        let body = response_json(response).await;
        assert_eq!(body["channels"][0]["name"], "Alpha");
        assert_eq!(body["channels"][1]["id"], "-200");
    }

    #[tokio::test]
    async fn test_send_article_reports_partial_failure() {
        let (_dir, store) = empty_store();
        let dispatcher = TestDispatcher {
            registry: vec![
                ChannelDescriptor::new("-100", "Alpha"),
                ChannelDescriptor::new("-200", "Beta"),
            ],
            sender: ScriptedSender {
                fail: vec![("-200".to_string(), "blocked".to_string())],
            },
        };
        let state = AppState::new(Arc::new(dispatcher), store, None);

        let response = app(state)
            .oneshot(post_json(
                "/api/send-article",
                serde_json::json!({ "article_text": "Big news tonight." }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["sent"], 1);
        assert_eq!(body["total"], 2);
        assert_eq!(body["failed"][0]["channel"], "Beta");
        assert!(body["failed"][0]["error"]
            .as_str()
            .unwrap()
            .contains("blocked"));
    }

    #[tokio::test]
    async fn test_send_article_empty_text_is_rejected() {
        let (_dir, store) = empty_store();
        let dispatcher =
            TestDispatcher::with_registry(vec![ChannelDescriptor::new("-100", "Alpha")]);
        let state = AppState::new(Arc::new(dispatcher), store, None);

        let response = app(state)
            .oneshot(post_json(
                "/api/send-article",
                serde_json::json!({ "article_text": "   " }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "empty article text");
    }

    #[tokio::test]
    async fn test_send_article_missing_text_field_is_rejected() {
        let (_dir, store) = empty_store();
        let dispatcher =
            TestDispatcher::with_registry(vec![ChannelDescriptor::new("-100", "Alpha")]);
        let state = AppState::new(Arc::new(dispatcher), store, None);

        let response = app(state)
            .oneshot(post_json("/api/send-article", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "empty article text");
    }

    #[tokio::test]
    async fn test_send_article_without_channels_is_rejected() {
        let (_dir, store) = empty_store();
        let dispatcher = TestDispatcher::with_registry(Vec::new());
        let state = AppState::new(Arc::new(dispatcher), store, None);

        let response = app(state)
            .oneshot(post_json(
                "/api/send-article",
                serde_json::json!({ "article_text": "hello" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "no channels configured");
    }

    #[tokio::test]
    async fn test_rewrite_without_backend_is_unavailable() {
        let (_dir, store) = empty_store();
        let state = AppState::new(
            Arc::new(TestDispatcher::with_registry(Vec::new())),
            store,
            None,
        );

        let response = app(state)
            .oneshot(post_json(
                "/api/rewrite",
                serde_json::json!({ "text": "abc" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = response_json(response).await;
        assert_eq!(body["error"], "rewrite backend not configured");
    }

    #[tokio::test]
    async fn test_rewrite_sanitizes_and_echoes_style() {
        let (_dir, store) = empty_store();
        let provider = CannedProvider(
            "<think>draft</think>Вот переписанный текст:\nThe mayor opened the new bridge on Friday."
                .to_string(),
        );
        let rewriter = Rewriter::new(Arc::new(provider));
        let state = AppState::new(
            Arc::new(TestDispatcher::with_registry(Vec::new())),
            store,
            Some(Arc::new(rewriter)),
        );

        let response = app(state)
            .oneshot(post_json(
                "/api/rewrite",
                serde_json::json!({ "text": "source article", "style": "meme" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["style"], "meme");
        assert_eq!(body["text"], "The mayor opened the new bridge on Friday.");
    }

    #[tokio::test]
    async fn test_rewrite_unknown_style_is_rejected() {
        let (_dir, store) = empty_store();
        let rewriter = Rewriter::new(Arc::new(CannedProvider("out".to_string())));
        let state = AppState::new(
            Arc::new(TestDispatcher::with_registry(Vec::new())),
            store,
            Some(Arc::new(rewriter)),
        );

        let response = app(state)
            .oneshot(post_json(
                "/api/rewrite",
                serde_json::json!({ "text": "abc", "style": "formal" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("formal"));
    }

    #[tokio::test]
    async fn test_rewrite_empty_text_is_rejected() {
        let (_dir, store) = empty_store();
        let rewriter = Rewriter::new(Arc::new(CannedProvider("out".to_string())));
        let state = AppState::new(
            Arc::new(TestDispatcher::with_registry(Vec::new())),
            store,
            Some(Arc::new(rewriter)),
        );

        let response = app(state)
            .oneshot(post_json("/api/rewrite", serde_json::json!({ "text": " " })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Empty article text");
    }
}
