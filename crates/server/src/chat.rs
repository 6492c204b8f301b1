//! Chat transport for the dialogue engine.
//!
//! JSON API Endpoints:
//! - `POST /api/chat`          - next assistant reply for a transcript and customer profile
//! - `POST /api/chat/greeting` - opening line for a new conversation
//! - `GET  /api/catalog`       - products the engine can recommend

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pitchcraft_agent::DialogueEngine;
use pitchcraft_core::domain::conversation::Message;
use pitchcraft_core::domain::customer::CustomerProfile;
use pitchcraft_core::domain::product::Product;
use pitchcraft_core::errors::{ApplicationError, InterfaceError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct ChatState {
    engine: Arc<DialogueEngine>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    #[serde(rename = "customerData")]
    pub customer_data: CustomerProfile,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GreetingRequest {
    #[serde(rename = "customerData")]
    pub customer_data: CustomerProfile,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatError {
    pub error: String,
    pub correlation_id: String,
}

type Rejection = (StatusCode, Json<ChatError>);

pub fn router(engine: Arc<DialogueEngine>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chat/greeting", post(greeting))
        .route("/api/catalog", get(catalog))
        .with_state(ChatState { engine })
}

pub async fn chat(
    State(state): State<ChatState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, Rejection> {
    let correlation_id = Uuid::new_v4().to_string();
    let Json(request) = payload.map_err(|rejection| malformed(rejection, &correlation_id))?;

    let reply = state
        .engine
        .reply(&request.messages, &request.customer_data)
        .map_err(|error| failed(error, &correlation_id))?;

    info!(
        event_name = "http.chat.replied",
        correlation_id = %correlation_id,
        stage = reply.decision.stage.as_str(),
        rule = reply.decision.rule.as_str(),
        transcript_len = request.messages.len(),
        matched_products = reply.matched_products.len(),
        "chat reply composed"
    );

    Ok(Json(ChatResponse { message: reply.message }))
}

pub async fn greeting(
    State(state): State<ChatState>,
    payload: Result<Json<GreetingRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, Rejection> {
    let correlation_id = Uuid::new_v4().to_string();
    let Json(request) = payload.map_err(|rejection| malformed(rejection, &correlation_id))?;

    let message = state
        .engine
        .greeting(&request.customer_data)
        .map_err(|error| failed(error, &correlation_id))?;

    info!(event_name = "http.chat.greeted", correlation_id = %correlation_id, "greeting composed");
    Ok(Json(ChatResponse { message }))
}

pub async fn catalog(State(state): State<ChatState>) -> Json<Vec<Product>> {
    Json(state.engine.catalog().products().to_vec())
}

fn malformed(rejection: JsonRejection, correlation_id: &str) -> Rejection {
    warn!(
        event_name = "http.chat.malformed_request",
        correlation_id = %correlation_id,
        error = %rejection,
        "request body rejected"
    );
    (
        rejection.status(),
        Json(ChatError { error: rejection.body_text(), correlation_id: correlation_id.to_string() }),
    )
}

fn failed(error: ApplicationError, correlation_id: &str) -> Rejection {
    let interface = error.into_interface(correlation_id);
    match &interface {
        InterfaceError::BadRequest { message, .. } => {
            warn!(
                event_name = "http.chat.rejected",
                correlation_id = %correlation_id,
                error = %message,
                "engine rejected request"
            );
            (
                StatusCode::BAD_REQUEST,
                Json(ChatError {
                    error: message.clone(),
                    correlation_id: interface.correlation_id().to_string(),
                }),
            )
        }
        InterfaceError::Internal { message, .. } => {
            error!(
                event_name = "http.chat.failed",
                correlation_id = %correlation_id,
                error = %message,
                "engine failed to compose reply"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatError {
                    error: interface.user_message().to_string(),
                    correlation_id: interface.correlation_id().to_string(),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::{extract::State, Json, Router};
    use pitchcraft_agent::{DialogueEngine, FixedRandom};
    use pitchcraft_core::domain::conversation::Message;
    use pitchcraft_core::domain::customer::CustomerProfile;
    use pitchcraft_core::errors::{ApplicationError, DomainError};
    use pitchcraft_core::funnel::signals::SignalPatterns;
    use pitchcraft_core::sales::catalog::Catalog;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::chat::{catalog, chat, failed, router, ChatRequest, ChatState};

    fn engine() -> Arc<DialogueEngine> {
        Arc::new(
            DialogueEngine::with_random(
                Catalog::builtin(),
                SignalPatterns::default(),
                Arc::new(FixedRandom(12)),
            )
            .expect("engine builds"),
        )
    }

    fn app() -> Router {
        router(engine())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let response = app.oneshot(request).await.expect("route responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    fn customer() -> Value {
        json!({"name": "Alice", "email": "alice@example.com", "interests": ["design"]})
    }

    #[tokio::test]
    async fn chat_route_returns_scarcity_reply_for_hesitation() {
        let body = json!({
            "messages": [
                {"role": "assistant", "content": "Hi Alice!"},
                {"role": "user", "content": "I love design"},
                {"role": "assistant", "content": "Great choice."},
                {"role": "user", "content": "Hmm, that's expensive"}
            ],
            "customerData": customer()
        });

        let (status, payload) = post_json(app(), "/api/chat", body).await;

        assert_eq!(status, StatusCode::OK);
        let message = payload["message"].as_str().expect("message text");
        assert!(message.contains("only 12 spots remain"), "{message}");
        assert!(message.contains("$104"), "{message}");
    }

    #[tokio::test]
    async fn first_turn_reply_is_reciprocity() {
        let body = json!({
            "messages": [
                {"role": "assistant", "content": "Hi Alice!"},
                {"role": "user", "content": "hello"}
            ],
            "customerData": customer()
        });

        let (status, payload) = post_json(app(), "/api/chat", body).await;

        assert_eq!(status, StatusCode::OK);
        let message = payload["message"].as_str().expect("message text");
        assert!(message.starts_with("Alice"), "{message}");
        assert!(!message.contains('$'));
    }

    #[tokio::test]
    async fn empty_transcript_is_a_bad_request_with_correlation_id() {
        let body = json!({"messages": [], "customerData": customer()});

        let (status, payload) = post_json(app(), "/api/chat", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].as_str().is_some_and(|error| error.contains("transcript")));
        assert_eq!(payload["correlation_id"].as_str().map(str::len), Some(36));
    }

    #[tokio::test]
    async fn missing_customer_data_is_rejected_by_the_extractor() {
        let body = json!({"messages": [{"role": "user", "content": "hi"}]});

        let (status, payload) = post_json(app(), "/api/chat", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(payload["error"].as_str().is_some_and(|error| error.contains("customerData")));
    }

    #[tokio::test]
    async fn syntactically_broken_json_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"messages\": ["))
            .expect("request");

        let response = app().oneshot(request).await.expect("route responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn greeting_route_names_the_customer() {
        let (status, payload) =
            post_json(app(), "/api/chat/greeting", json!({"customerData": customer()})).await;

        assert_eq!(status, StatusCode::OK);
        let message = payload["message"].as_str().expect("message text");
        assert!(message.starts_with("Hi Alice!"), "{message}");
        assert!(message.ends_with("What brings you here today?"));
    }

    #[tokio::test]
    async fn greeting_rejects_blank_name() {
        let body = json!({"customerData": {"name": " ", "email": "alice@example.com"}});

        let (status, payload) = post_json(app(), "/api/chat/greeting", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].as_str().is_some_and(|error| error.contains("name")));
    }

    fn chat_request(latest: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![
                Message::assistant("Hi Alice!"),
                Message::user("ok"),
                Message::assistant("Sure."),
                Message::user(latest),
            ],
            customer_data: CustomerProfile::new("Alice", "alice@example.com", Vec::new()),
        }
    }

    #[tokio::test]
    async fn buy_intent_reply_anchors_on_fallback_product() {
        let Json(response) =
            chat(State(ChatState { engine: engine() }), Ok(Json(chat_request("I'm ready to buy"))))
                .await
                .expect("reply");

        assert!(response.message.contains("$897+"), "{}", response.message);
        assert!(response.message.contains("just $209"));
        assert!(response.message.contains("BONUS"));
        assert!(!response.message.contains("1. **Premium Web Development Course**"));
    }

    #[tokio::test]
    async fn signal_free_reply_lists_catalog_head() {
        let Json(response) =
            chat(State(ChatState { engine: engine() }), Ok(Json(chat_request("hmm okay"))))
                .await
                .expect("reply");

        assert!(response.message.contains("1. **Premium Web Development Course**"));
        assert!(response.message.contains("3. **AI & Machine Learning Bundle**"));
    }

    #[tokio::test]
    async fn catalog_lists_products_in_order() {
        let Json(products) = catalog(State(ChatState { engine: engine() })).await;

        let ids = products.iter().map(|product| product.id.0).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn internal_failures_hide_details_from_the_caller() {
        let (status, Json(body)) =
            failed(ApplicationError::Rendering("template blew up".to_string()), "req-9");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to process request");
        assert_eq!(body.correlation_id, "req-9");

        let (status, _) = failed(DomainError::EmptyTranscript.into(), "req-10");
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
