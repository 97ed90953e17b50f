//! HTTP client for the generation endpoint.
//!
//! One POST per submission, awaited to completion. No client-side timeout is
//! set; the transport's defaults apply.

use serde::Deserialize;
use thiserror::Error;

use crate::models::program::GenerateForm;

pub const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx from the endpoint, with the server's `error` message.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("réponse inattendue du serveur")]
    MalformedResponse,
}

#[derive(Debug, Deserialize)]
struct SuccessEnvelope {
    success: bool,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// Client for the program generation API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Submits the questionnaire and returns the generated markdown.
    pub async fn generate(&self, form: &GenerateForm) -> Result<String, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, GENERATE_PATH))
            .json(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: SuccessEnvelope = response.json().await?;
        if !envelope.success {
            return Err(ClientError::MalformedResponse);
        }
        Ok(envelope.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;

    async fn spawn_endpoint(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route(GENERATE_PATH, post(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve endpoint stub");
        });
        format!("http://{addr}")
    }

    fn form() -> GenerateForm {
        GenerateForm {
            niveau: Some("1".to_string()),
            attention: Some("15".to_string()),
            matiere: Some("maths".to_string()),
            passion: Some("voitures".to_string()),
            duree: Some("2 semaines".to_string()),
        }
    }

    #[tokio::test]
    async fn test_success_envelope_yields_content() {
        let base = spawn_endpoint(
            StatusCode::OK,
            r##"{"success":true,"content":"# Programme"}"##,
        )
        .await;
        let content = ApiClient::new(base).generate(&form()).await.expect("ok");
        assert_eq!(content, "# Programme");
    }

    #[tokio::test]
    async fn test_error_envelope_yields_server_message() {
        let base = spawn_endpoint(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Données manquantes: duree"}"#,
        )
        .await;
        let err = ApiClient::new(base).generate(&form()).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Données manquantes: duree");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_passed_as_is() {
        let base = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "panic at the gateway").await;
        let err = ApiClient::new(base).generate(&form()).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "panic at the gateway");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
