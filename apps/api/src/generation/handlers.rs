//! Axum route handlers for the generation endpoint.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::generation::builder::build_prompt;
use crate::models::program::GenerateForm;
use crate::state::AppState;

/// Success envelope: `{"success":true,"content":<markdown>}`.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub content: String,
}

/// POST /api/generate
///
/// Body parsing is deliberately manual: a malformed body is an unexpected
/// runtime failure (500 with the parse error as `details`), while missing or
/// out-of-enumeration fields are client errors (400). The upstream API is
/// only reached once the request is fully validated.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: String,
) -> AppResult<Json<GenerateResponse>> {
    let form: GenerateForm = serde_json::from_str(&body)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid JSON body: {e}")))?;

    let request = form.validate()?;
    let prompt = build_prompt(&request);

    info!(
        niveau = request.niveau.code(),
        attention = request.attention.code(),
        matiere = request.matiere.code(),
        passion = request.passion.code(),
        duree = request.duree.code(),
        "generating program"
    );

    let content = state.llm.generate(&prompt).await?;

    Ok(Json(GenerateResponse {
        success: true,
        content,
    }))
}

/// OPTIONS /api/generate: 200 with an empty body.
/// Browser preflights are usually answered by the CORS layer before reaching
/// this handler; this covers plain OPTIONS requests as well.
pub async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}

/// Every verb other than POST/OPTIONS on the generate route.
/// Responds before the body is ever inspected.
pub async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::LlmClient;
    use crate::routes::build_router;
    use crate::state::AppState;

    const API_KEY: &str = "test-key";

    /// Loopback server standing in for the Anthropic API. Returns its base URL.
    async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route("/v1/messages", post(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve upstream stub");
        });
        format!("http://{addr}")
    }

    fn state_with(llm: LlmClient) -> AppState {
        AppState {
            llm,
            config: Config {
                claude_api_key: Some(API_KEY.to_string()),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    /// State whose upstream is unroutable. Any call to it fails loudly,
    /// so a non-500 response proves the upstream was never reached.
    fn state_without_upstream() -> AppState {
        state_with(
            LlmClient::new(Some(API_KEY.to_string())).with_base_url("http://127.0.0.1:1"),
        )
    }

    fn full_body() -> Value {
        json!({
            "niveau": "1",
            "attention": "15",
            "matiere": "lecture",
            "passion": "animaux",
            "duree": "1 semaine",
        })
    }

    async fn send(
        state: AppState,
        method: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let app = build_router(state);
        let request = Request::builder()
            .method(method)
            .uri("/api/generate")
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .expect("request");
        let response = app.oneshot(request).await.expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_missing_field_is_400_and_upstream_untouched() {
        let mut body = full_body();
        body.as_object_mut().unwrap().remove("duree");
        let (status, payload) = send(state_without_upstream(), "POST", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["error"], "Données manquantes: duree");
    }

    #[tokio::test]
    async fn test_out_of_enumeration_value_is_400() {
        let mut body = full_body();
        body["niveau"] = json!("42");
        let (status, payload) = send(state_without_upstream(), "POST", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["error"], "Valeur invalide pour 'niveau': '42'");
    }

    #[tokio::test]
    async fn test_non_post_is_405_without_body_parsing() {
        let (status, payload) = send(state_without_upstream(), "GET", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(payload["error"], "Méthode non autorisée");
    }

    #[tokio::test]
    async fn test_options_is_200_with_empty_body() {
        let (status, payload) = send(state_without_upstream(), "OPTIONS", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload, Value::Null);
    }

    #[tokio::test]
    async fn test_malformed_json_is_500() {
        let app = build_router(state_without_upstream());
        let request = Request::builder()
            .method("POST")
            .uri("/api/generate")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_500_with_french_message() {
        let state = AppState {
            llm: LlmClient::new(None),
            config: Config {
                claude_api_key: None,
                port: 0,
                rust_log: "info".to_string(),
            },
        };
        let (status, payload) = send(state, "POST", Some(full_body())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload["error"], "Clé API manquante");
    }

    #[tokio::test]
    async fn test_upstream_error_body_is_passed_through_as_details() {
        let base = spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, "quota exceeded").await;
        let state = state_with(LlmClient::new(Some(API_KEY.to_string())).with_base_url(base));
        let (status, payload) = send(state, "POST", Some(full_body())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload["error"], "Erreur lors de la génération du programme");
        assert_eq!(payload["details"], "quota exceeded");
    }

    #[tokio::test]
    async fn test_successful_generation_returns_envelope() {
        let base = spawn_upstream(
            StatusCode::OK,
            r##"{"content":[{"type":"text","text":"# Programme\n\nJour 1"}],"usage":{"input_tokens":1,"output_tokens":2}}"##,
        )
        .await;
        let state = state_with(LlmClient::new(Some(API_KEY.to_string())).with_base_url(base));
        let (status, payload) = send(state, "POST", Some(full_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["success"], true);
        assert_eq!(payload["content"], "# Programme\n\nJour 1");
    }
}
