//! HTTP client for the `/chat` endpoints.

use std::time::Duration;

use reqwest::Url;

use crate::http::dto::{ErrorResponse, HistoryResponse, SendMessageRequest, SendMessageResponse};

use super::ClientError;

/// Talks to a running `noah serve`.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    base: Url,
}

impl ChatClient {
    /// Fails if `base_url` is not an absolute http(s)-style URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim_end_matches('/');
        let base = Url::parse(trimmed)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ClientError::InvalidUrl(base_url.to_string()))?;

        // Generation can take a while; allow more than the server's own
        // provider timeout.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            http,
            base_url: trimmed.to_string(),
            base,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /chat/message
    pub async fn send_message(
        &self,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<SendMessageResponse, ClientError> {
        let body = SendMessageRequest {
            message: message.to_string(),
            session_id: session_id.map(str::to_string),
        };
        let response = self
            .http
            .post(self.endpoint(&["chat", "message"]))
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    /// GET /chat/history/{session_id}
    pub async fn history(&self, session_id: &str) -> Result<HistoryResponse, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&["chat", "history", session_id]))
            .send()
            .await?;
        decode(response).await
    }

    /// Base URL plus `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or(text);
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_message_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/message"))
            .and(body_json(serde_json::json!({"message": "Hi", "sessionId": "s-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reply": "Hello!", "sessionId": "s-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatClient::new(&server.uri()).unwrap();
        let response = client.send_message("Hi", Some("s-1")).await.unwrap();
        assert_eq!(response.reply, "Hello!");
        assert_eq!(response.session_id, "s-1");
    }

    #[tokio::test]
    async fn test_error_body_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/message"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "Message too long"})),
            )
            .mount(&server)
            .await;

        let client = ChatClient::new(&server.uri()).unwrap();
        let err = client.send_message("x", None).await.unwrap_err();
        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Message too long");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_history_encodes_session_id_as_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chat/history/order%2342%3F%2Fx"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sessionId": "order#42?/x", "messages": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatClient::new(&server.uri()).unwrap();
        let history = client.history("order#42?/x").await.unwrap();
        assert_eq!(history.session_id, "order#42?/x");
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/support/chat/history/s-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sessionId": "s-1", "messages": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatClient::new(&format!("{}/support/", server.uri())).unwrap();
        assert!(client.history("s-1").await.is_ok());
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        assert!(matches!(
            ChatClient::new("localhost:4000"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            ChatClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_history_parses_stored_turns() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chat/history/s-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sessionId": "s-9",
                "messages": [
                    {"sender": "user", "text": "Hi", "createdAt": "2026-03-01T10:15:00Z"},
                    {"sender": "ai", "text": "Hello!", "createdAt": "2026-03-01T10:15:02Z"}
                ]
            })))
            .mount(&server)
            .await;

        let client = ChatClient::new(&format!("{}/", server.uri())).unwrap();
        let history = client.history("s-9").await.unwrap();
        assert_eq!(history.messages.len(), 2);
        assert_eq!(history.messages[1].text, "Hello!");
    }
}
