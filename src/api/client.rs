use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::models::{Message, RegistrationRequest, UserRecord};

use super::types::{AckResponse, ApiError, HealthResponse, HistoryResponse, UserResponse};

/// Thin wrapper over the backend's REST contract. One request per call,
/// no retries, and deliberately no timeout: a hung request keeps the
/// calling form disabled, matching the documented behavior.
pub struct ApiClient {
    http: Client,
    base_url: String,
    server_root: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url().to_string(),
            server_root: config.server_root(),
        }
    }

    /// `POST /register`. Returns the server's welcome message.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<String, ApiError> {
        let url = format!("{}/register", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let ack: AckResponse = Self::decode(response).await?;
        if ack.success {
            Ok(ack.message.unwrap_or_default())
        } else {
            Err(ApiError::Rejected(
                ack.error.unwrap_or_else(|| "Registration failed".to_string()),
            ))
        }
    }

    /// `GET /user/{email}`.
    pub async fn lookup_user(&self, email: &str) -> Result<UserRecord, ApiError> {
        let url = format!("{}{}", self.base_url, user_path(email));
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let parsed: UserResponse = Self::decode(response).await?;
        if !parsed.success {
            return Err(ApiError::Rejected(
                parsed.error.unwrap_or_else(|| "User not found".to_string()),
            ));
        }
        parsed
            .user
            .ok_or_else(|| ApiError::InvalidResponse("missing user payload".to_string()))
    }

    /// `GET /history/{email}`. Messages come back in server order and are
    /// passed through untouched.
    pub async fn fetch_history(&self, email: &str) -> Result<Vec<Message>, ApiError> {
        let url = format!("{}{}", self.base_url, history_path(email));
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let parsed: HistoryResponse = Self::decode(response).await?;
        if parsed.success {
            Ok(parsed.messages)
        } else {
            Err(ApiError::Rejected(
                parsed.error.unwrap_or_else(|| "User not found".to_string()),
            ))
        }
    }

    /// `GET /` on the server root. Returns a human-readable status line.
    pub async fn health(&self) -> Result<String, ApiError> {
        let response = self
            .http
            .get(self.server_root.clone())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let health: HealthResponse = Self::decode(response).await?;
        Ok(health.message.unwrap_or(health.status))
    }

    /// `POST /check-emails`: asks the backend to poll its inbox now.
    pub async fn check_emails(&self) -> Result<String, ApiError> {
        let url = format!("{}/check-emails", self.base_url);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let ack: AckResponse = Self::decode(response).await?;
        if ack.success {
            Ok(ack.message.unwrap_or_default())
        } else {
            Err(ApiError::Rejected(
                ack.error.unwrap_or_else(|| "Email check failed".to_string()),
            ))
        }
    }

    /// The backend returns its JSON envelope with 4xx/5xx statuses too, so
    /// the status line is never consulted; every body is decoded and the
    /// `success` flag decides the branch.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("undecodable response body: {}", e);
            ApiError::InvalidResponse(e.to_string())
        })
    }
}

fn user_path(email: &str) -> String {
    format!("/user/{}", urlencoding::encode(email))
}

fn history_path(email: &str) -> String {
    format!("/history/{}", urlencoding::encode(email))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig::new(&server.uri()).unwrap();
        ApiClient::new(&config)
    }

    fn sample_request() -> RegistrationRequest {
        RegistrationRequest {
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            occupation: "engineer".to_string(),
            interests: "computing".to_string(),
            hobbies: "chess".to_string(),
            personality: "curious".to_string(),
        }
    }

    #[test]
    fn email_path_segments_are_percent_encoded() {
        assert_eq!(user_path("ada@example.com"), "/user/ada%40example.com");
        assert_eq!(
            history_path("first last+tag@example.com"),
            "/history/first%20last%2Btag%40example.com"
        );
    }

    #[tokio::test]
    async fn register_success_returns_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "success": true,
                "message": "Welcome"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let message = client_for(&server).register(&sample_request()).await.unwrap();
        assert_eq!(message, "Welcome");
    }

    #[tokio::test]
    async fn register_failure_without_error_text_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({ "success": false })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).register(&sample_request()).await.unwrap_err();
        match err {
            ApiError::Rejected(text) => assert_eq!(text, "Registration failed"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn register_4xx_envelope_carries_server_error_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "success": false,
                "error": "Email already registered"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).register(&sample_request()).await.unwrap_err();
        match err {
            ApiError::Rejected(text) => assert_eq!(text, "Email already registered"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_a_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).register(&sample_request()).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let config = ApiConfig::new("http://127.0.0.1:1/api").unwrap();
        let err = ApiClient::new(&config)
            .register(&sample_request())
            .await
            .unwrap_err();
        match err {
            ApiError::Network(_) => {}
            other => panic!("expected Network, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_history_preserves_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex("^/history/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "messages": [
                    {"role": "user", "content": "A", "timestamp": "2026-08-06T10:00:00"},
                    {"role": "assistant", "content": "B", "timestamp": "2026-08-06T10:05:00"},
                    {"role": "user", "content": "C", "timestamp": "2026-08-06T10:10:00"}
                ]
            })))
            .mount(&server)
            .await;

        let messages = client_for(&server)
            .fetch_history("ada@example.com")
            .await
            .unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn health_prefers_the_message_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "running",
                "message": "Support Bot API"
            })))
            .mount(&server)
            .await;

        let config = ApiConfig::new(&format!("{}/api", server.uri())).unwrap();
        let status = ApiClient::new(&config).health().await.unwrap();
        assert_eq!(status, "Support Bot API");
    }

    #[tokio::test]
    async fn check_emails_reports_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/check-emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "Email check completed"
            })))
            .mount(&server)
            .await;

        let message = client_for(&server).check_emails().await.unwrap();
        assert_eq!(message, "Email check completed");
    }
}
