//! HTTP client for the assistant backend
//!
//! One shared `reqwest::Client` (connection pooling) behind the `AgentApi`
//! trait. No timeouts and no retries are applied here: every call runs to
//! completion or failure.

use crate::api::types::{
    AskRequest, AskResponse, CreateAck, HealthResponse, KnowledgeItem, KnowledgeList,
    NewKnowledgeItem,
};
use crate::config::Config;
use crate::error::ClientError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Chat answer endpoint
pub const ASK_PATH: &str = "/api/ask";
/// Knowledge listing and creation endpoint
pub const KNOWLEDGE_PATH: &str = "/api/knowledge";
/// Health check endpoint
pub const HEALTH_PATH: &str = "/health";

/// Operations the console needs from the backend
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Ask a question
    async fn ask(&self, request: AskRequest) -> Result<AskResponse, ClientError>;

    /// Fetch every knowledge item
    async fn list_knowledge(&self) -> Result<Vec<KnowledgeItem>, ClientError>;

    /// Store a new knowledge item
    async fn create_knowledge(&self, item: NewKnowledgeItem) -> Result<CreateAck, ClientError>;

    /// Query per-service availability
    async fn health(&self) -> Result<HealthResponse, ClientError>;
}

/// reqwest-backed implementation of [`AgentApi`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
}

impl ApiClient {
    /// Create a client for the configured base URL
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.config.api.base_url
    }

    /// Send a request and decode a JSON body
    ///
    /// Non-2xx statuses become `ClientError::Status`, unparsable bodies
    /// `ClientError::Decode`.
    async fn send_json<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let request_id = Uuid::new_v4().to_string();
        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            endpoint = %path,
        );

        async move {
            let start = Instant::now();
            let response = builder
                .header("X-Request-Id", &request_id)
                .send()
                .await
                .map_err(|e| {
                    tracing::warn!(error = %e, "Request failed to send");
                    ClientError::Transport(e)
                })?;

            let status = response.status();
            let body = response.text().await?;

            tracing::info!(
                status = status.as_u16(),
                duration_ms = start.elapsed().as_millis(),
                "Request completed"
            );

            if !status.is_success() {
                tracing::error!(
                    status_code = status.as_u16(),
                    error_body = %body,
                    "Backend returned error status"
                );
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            serde_json::from_str(&body).map_err(|e| {
                ClientError::Decode(format!("{} - Response body: {}", e, body))
            })
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl AgentApi for ApiClient {
    async fn ask(&self, request: AskRequest) -> Result<AskResponse, ClientError> {
        tracing::debug!(question_len = request.question.len(), "Asking question");
        let builder = self.http.post(self.config.endpoint(ASK_PATH)).json(&request);
        self.send_json(reqwest::Method::POST, ASK_PATH, builder).await
    }

    async fn list_knowledge(&self) -> Result<Vec<KnowledgeItem>, ClientError> {
        let builder = self.http.get(self.config.endpoint(KNOWLEDGE_PATH));
        let list: KnowledgeList = self
            .send_json(reqwest::Method::GET, KNOWLEDGE_PATH, builder)
            .await?;
        Ok(list.items)
    }

    async fn create_knowledge(&self, item: NewKnowledgeItem) -> Result<CreateAck, ClientError> {
        let builder = self.http.post(self.config.endpoint(KNOWLEDGE_PATH)).json(&item);
        self.send_json(reqwest::Method::POST, KNOWLEDGE_PATH, builder)
            .await
    }

    async fn health(&self) -> Result<HealthResponse, ClientError> {
        let builder = self.http.get(self.config.endpoint(HEALTH_PATH));
        self.send_json(reqwest::Method::GET, HEALTH_PATH, builder)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serial_test::serial;

    fn client_for(server: &ServerGuard) -> ApiClient {
        ApiClient::new(Config::with_base_url(&server.url()))
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new(Config::with_base_url("http://agent.test:8000/"));
        assert_eq!(client.base_url(), "http://agent.test:8000");
    }

    #[tokio::test]
    #[serial]
    async fn test_ask_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ask")
            .match_header("content-type", "application/json")
            .match_header("x-request-id", Matcher::Any)
            .match_body(Matcher::Json(serde_json::json!({
                "question": "How many vacation days?",
                "context": ""
            })))
            .with_status(200)
            .with_body(
                r#"{
                    "answer": "You get 20 days.",
                    "confidence": 0.91,
                    "sources": ["Vacation Policy"],
                    "classification": "recursos_humanos"
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client
            .ask(AskRequest {
                question: "How many vacation days?".to_string(),
                context: String::new(),
            })
            .await;

        mock.assert_async().await;
        let answer = result.unwrap();
        assert_eq!(answer.answer, "You get 20 days.");
        assert_eq!(answer.sources, vec!["Vacation Policy".to_string()]);
        assert_eq!(answer.classification, "recursos_humanos");
    }

    #[tokio::test]
    #[serial]
    async fn test_ask_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ask")
            .with_status(500)
            .with_body(r#"{"detail": "Error processing question"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client
            .ask(AskRequest {
                question: "hi".to_string(),
                context: String::new(),
            })
            .await;

        mock.assert_async().await;
        match result {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("Error processing question"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_ask_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ask")
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client
            .ask(AskRequest {
                question: "hi".to_string(),
                context: String::new(),
            })
            .await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert!(err.to_string().contains("This is not JSON"));
    }

    #[tokio::test]
    #[serial]
    async fn test_list_knowledge() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/knowledge")
            .with_status(200)
            .with_body(
                r#"{"items": [
                    {"id": 1, "title": "Vacation Policy", "category": "HR",
                     "content": "20 days", "updated_at": "2024-01-02 00:00:00"},
                    {"id": 2, "title": "API Guide", "category": "Tech",
                     "content": "Use tokens", "updated_at": "2024-01-03 00:00:00"}
                ]}"#,
            )
            .create_async()
            .await;

        let items = client_for(&server).list_knowledge().await.unwrap();

        mock.assert_async().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title, "API Guide");
    }

    #[tokio::test]
    #[serial]
    async fn test_create_knowledge_sends_all_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/knowledge")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "Onboarding",
                "category": "HR",
                "content": "Day one checklist"
            })))
            .with_status(200)
            .with_body(r#"{"message": "ok", "id": 12}"#)
            .create_async()
            .await;

        let ack = client_for(&server)
            .create_knowledge(NewKnowledgeItem {
                title: "Onboarding".to_string(),
                category: "HR".to_string(),
                content: "Day one checklist".to_string(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(ack.id, Some(12));
    }

    #[tokio::test]
    #[serial]
    async fn test_health_services() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(
                r#"{"status": "healthy", "services": {
                    "genai": true, "embedding": true,
                    "knowledge_base": false, "ml_classifier": true
                }}"#,
            )
            .create_async()
            .await;

        let health = client_for(&server).health().await.unwrap();

        mock.assert_async().await;
        assert_eq!(health.status.as_deref(), Some("healthy"));
        assert_eq!(health.services.get("knowledge_base"), Some(&false));
        assert_eq!(health.services.len(), 4);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) is not expected to run an HTTP server
        let client = ApiClient::new(Config::with_base_url("http://127.0.0.1:9"));
        let result = client.health().await;
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
