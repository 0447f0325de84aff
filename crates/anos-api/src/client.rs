//! HTTP client for a running relay, plus the input rules the terminal chat
//! loop enforces before anything is sent.

use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use anos_types::chat::{ChatReply, HistoryResponse, Turn};

/// Longest message the client will send, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// The only failure text users see, whatever went wrong.
pub const SEND_FAILED: &str = "Sorry, I couldn't get a response. Please try again.";

/// New per-run session id: `session_<uuid v7, simple form>`.
pub fn new_session_id() -> String {
    format!("session_{}", Uuid::now_v7().simple())
}

/// Send control state.
///
/// `IdleEmpty` means sending is disabled (no input, or the server is
/// offline). A send is only possible from `IdleReady`, and every send ends
/// back in `IdleEmpty` with the input cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    IdleEmpty,
    IdleReady,
    AwaitingReply,
}

impl SendState {
    /// State for the current input while idle.
    pub fn for_input(input: &str, online: bool) -> Self {
        if online && !input.trim().is_empty() {
            SendState::IdleReady
        } else {
            SendState::IdleEmpty
        }
    }

    pub fn can_send(self) -> bool {
        self == SendState::IdleReady
    }

    /// Start a send. `None` when sending is not allowed from this state.
    pub fn begin_send(self) -> Option<Self> {
        self.can_send().then_some(SendState::AwaitingReply)
    }

    /// Reply or error received.
    pub fn finish(self) -> Self {
        SendState::IdleEmpty
    }
}

/// Why a line of input was not sent.
#[derive(Debug, PartialEq, Eq)]
pub enum InputRejection {
    Empty,
    TooLong { chars: usize },
}

/// Trim `input` and check it against the client-side limits.
pub fn validate_input(input: &str) -> Result<&str, InputRejection> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputRejection::Empty);
    }
    let chars = trimmed.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        return Err(InputRejection::TooLong { chars });
    }
    Ok(trimmed)
}

/// Talks to one relay with one session id for its whole lifetime.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    session_id: String,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_id: new_session_id(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `true` when `GET /api/health` answers 2xx.
    pub async fn health(&self) -> bool {
        match self.http.get(self.url("/api/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Health check failed");
                false
            }
        }
    }

    /// `POST /api/chat` for this client's session.
    pub async fn send(&self, message: &str) -> anyhow::Result<ChatReply> {
        let response = self
            .http
            .post(self.url("/api/chat"))
            .json(&json!({ "message": message, "sessionId": self.session_id }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("relay answered {status}: {body}");
        }
        Ok(response.json::<ChatReply>().await?)
    }

    /// `GET /api/history/{sessionId}`.
    pub async fn history(&self) -> anyhow::Result<Vec<Turn>> {
        let response = self
            .http
            .get(self.url(&format!("/api/history/{}", self.session_id)))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<HistoryResponse>().await?.history)
    }

    /// `DELETE /api/history/{sessionId}`. The session id is kept.
    pub async fn clear(&self) -> anyhow::Result<()> {
        self.http
            .delete(self.url(&format!("/api/history/{}", self.session_id)))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_session_id_format() {
        let id = new_session_id();
        assert!(id.starts_with("session_"));
        assert_eq!(id.len(), "session_".len() + 32);
        assert_ne!(id, new_session_id());
    }

    #[test]
    fn test_send_state_transitions() {
        assert_eq!(SendState::for_input("", true), SendState::IdleEmpty);
        assert_eq!(SendState::for_input("   ", true), SendState::IdleEmpty);
        assert_eq!(SendState::for_input("hi", false), SendState::IdleEmpty);
        assert_eq!(SendState::for_input("hi", true), SendState::IdleReady);

        let awaiting = SendState::IdleReady.begin_send().unwrap();
        assert_eq!(awaiting, SendState::AwaitingReply);
        assert!(awaiting.begin_send().is_none());
        assert_eq!(awaiting.finish(), SendState::IdleEmpty);

        assert!(SendState::IdleEmpty.begin_send().is_none());
    }

    #[test]
    fn test_validate_input() {
        assert_eq!(validate_input("  hello  "), Ok("hello"));
        assert_eq!(validate_input(" \t "), Err(InputRejection::Empty));

        let exact = "a".repeat(MAX_MESSAGE_CHARS);
        assert!(validate_input(&exact).is_ok());

        let long = "é".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(
            validate_input(&long),
            Err(InputRejection::TooLong {
                chars: MAX_MESSAGE_CHARS + 1
            })
        );
    }

    #[tokio::test]
    async fn test_send_posts_message_and_session() {
        let server = MockServer::start().await;
        let client = ChatClient::new(format!("{}/", server.uri()));

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({"message": "hi", "sessionId": client.session_id()})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "reply": "hello",
                "sessionId": client.session_id(),
                "timestamp": "2025-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client.send("hi").await.unwrap();
        assert_eq!(reply.reply, "hello");
        assert_eq!(reply.session_id, client.session_id());
    }

    #[tokio::test]
    async fn test_send_non_2xx_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({"error": "API quota exceeded. Please try again later."})),
            )
            .mount(&server)
            .await;

        let client = ChatClient::new(server.uri());
        assert!(client.send("hi").await.is_err());
    }

    #[tokio::test]
    async fn test_health_reflects_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "message": "Anos AI Server is running",
                "timestamp": "2025-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;

        assert!(ChatClient::new(server.uri()).health().await);
        assert!(!ChatClient::new("http://127.0.0.1:1").health().await);
    }

    #[tokio::test]
    async fn test_history_and_clear_use_session_path() {
        let server = MockServer::start().await;
        let client = ChatClient::new(server.uri());
        let history_path = format!("/api/history/{}", client.session_id());

        Mock::given(method("GET"))
            .and(path(history_path.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "history": [
                    {"role": "user", "text": "hi", "timestamp": "2025-01-01T00:00:00Z"},
                    {"role": "assistant", "text": "hello", "timestamp": "2025-01-01T00:00:01Z"}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(history_path.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Conversation history cleared"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let history = client.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].text, "hello");

        let before = client.session_id().to_string();
        client.clear().await.unwrap();
        assert_eq!(client.session_id(), before);
    }
}
