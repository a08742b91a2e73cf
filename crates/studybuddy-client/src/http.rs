//! `reqwest` implementation of [`ChatApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use studybuddy_config::ApiConfig;
use tracing::debug;

use crate::api::{ChatApi, ChatRequest};
use crate::response::ChatResponse;
use crate::ChatError;

const CSRF_HEADER: &str = "X-CSRF-TOKEN";

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl From<&ApiConfig> for HttpSettings {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            request_timeout: config.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
    csrf_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TipsPayload {
    #[serde(default)]
    tips: Vec<String>,
}

/// HTTP client for the study assistant API. Keeps a cookie jar so the
/// session cookie set alongside the CSRF token is sent back on `/chat`.
pub struct HttpChatApi {
    settings: HttpSettings,
    http: reqwest::Client,
}

impl HttpChatApi {
    pub fn new(settings: HttpSettings) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ChatError::Client(e.to_string()))?;
        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &HttpSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.settings.base_url.trim_end_matches('/'))
    }

    async fn get_json(&self, url: &str) -> Result<(StatusCode, String), ChatError> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        Ok((status, body))
    }
}

/// Full `/chat` URL with `message` and `history` query parameters.
pub fn chat_url(base_url: &str, message: &str, history: &str) -> String {
    format!(
        "{}/chat?message={}&history={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(message),
        urlencoding::encode(history)
    )
}

/// Decode a `/chat` body. A body that parses as a chat response is used
/// regardless of status, since the server reports failures in `error`.
pub(crate) fn decode_chat_body(status: StatusCode, body: &str) -> Result<ChatResponse, ChatError> {
    let parsed = serde_json::from_str::<ChatResponse>(body);
    if status.is_success() {
        return parsed.map_err(|e| ChatError::Parse(e.to_string()));
    }
    match parsed {
        Ok(response) if response.error_message().is_some() => Ok(response),
        _ => Err(ChatError::Http(format!("HTTP {status}: {body}"))),
    }
}

fn decode_payload<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ChatError> {
    if !status.is_success() {
        return Err(ChatError::Http(format!("HTTP {status}: {body}")));
    }
    serde_json::from_str(body).map_err(|e| ChatError::Parse(e.to_string()))
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn fetch_csrf_token(&self) -> Result<String, ChatError> {
        let (status, body) = self.get_json(&self.endpoint("csrf-token")).await?;
        let payload: TokenPayload = decode_payload(status, &body)?;
        payload
            .csrf_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ChatError::Parse("no 'csrf_token' field in response".into()))
    }

    async fn fetch_tips(&self) -> Result<Vec<String>, ChatError> {
        let (status, body) = self.get_json(&self.endpoint("chat-tips")).await?;
        let payload: TipsPayload = decode_payload(status, &body)?;
        Ok(payload.tips)
    }

    async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, ChatError> {
        let url = chat_url(&self.settings.base_url, request.message, request.history);
        debug!(len = url.len(), "chat API request");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(CSRF_HEADER, request.csrf_token)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        decode_chat_body(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_url_encodes_message_and_history() {
        let url = chat_url(
            "https://api.example.com/",
            "exam on 5/10 & more",
            r#"[{"role":"user","content":"hi"}]"#,
        );
        assert_eq!(
            url,
            "https://api.example.com/chat?message=exam%20on%205%2F10%20%26%20more\
             &history=%5B%7B%22role%22%3A%22user%22%2C%22content%22%3A%22hi%22%7D%5D"
        );
    }

    #[test]
    fn success_body_decodes() {
        let resp = decode_chat_body(StatusCode::OK, r#"{"agent_response":"hi"}"#).unwrap();
        assert_eq!(resp.agent_response.as_deref(), Some("hi"));
    }

    #[test]
    fn malformed_success_body_is_parse_error() {
        let err = decode_chat_body(StatusCode::OK, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ChatError::Parse(_)));
    }

    #[test]
    fn error_status_with_error_field_is_passed_through() {
        let resp =
            decode_chat_body(StatusCode::FORBIDDEN, r#"{"error":"CSRF token missing"}"#).unwrap();
        assert_eq!(resp.error_message(), Some("CSRF token missing"));
    }

    #[test]
    fn error_status_without_error_field_is_http_error() {
        let err = decode_chat_body(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
        match err {
            ChatError::Http(msg) => {
                assert!(msg.contains("502"));
                assert!(msg.contains("upstream down"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn payload_decoding_rejects_error_status() {
        let err = decode_payload::<TipsPayload>(StatusCode::NOT_FOUND, "nope").unwrap_err();
        assert!(matches!(err, ChatError::Http(_)));
    }

    #[test]
    fn tips_payload_defaults_to_empty() {
        let payload: TipsPayload = decode_payload(StatusCode::OK, "{}").unwrap();
        assert!(payload.tips.is_empty());
    }

    #[test]
    fn settings_from_config() {
        let config = ApiConfig {
            request_timeout_secs: Some(30),
            ..ApiConfig::default()
        };
        let settings = HttpSettings::from(&config);
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = HttpChatApi::new(HttpSettings {
            base_url: "http://localhost:8000/".into(),
            connect_timeout: Duration::from_secs(1),
            request_timeout: None,
        })
        .unwrap();
        assert_eq!(api.endpoint("csrf-token"), "http://localhost:8000/csrf-token");
    }

    mod wire {
        use std::sync::Arc;
        use std::time::Duration;

        use mockito::{Matcher, Server};

        use crate::api::ChatApi;
        use crate::http::{HttpChatApi, HttpSettings};
        use crate::session::ChatSession;
        use crate::ChatError;
        use crate::view::NullView;

        fn api_for(server: &Server) -> HttpChatApi {
            HttpChatApi::new(HttpSettings {
                base_url: server.url(),
                connect_timeout: Duration::from_secs(5),
                request_timeout: Some(Duration::from_secs(5)),
            })
            .unwrap()
        }

        #[tokio::test]
        async fn csrf_token_is_requested_as_json() {
            let mut server = Server::new_async().await;
            let mock = server
                .mock("GET", "/csrf-token")
                .match_header("accept", "application/json")
                .with_body(r#"{"csrf_token":"tok-1"}"#)
                .create_async()
                .await;

            let token = api_for(&server).fetch_csrf_token().await.unwrap();
            assert_eq!(token, "tok-1");
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn missing_or_empty_token_leaves_session_without_one() {
            for body in [r#"{}"#, r#"{"csrf_token":""}"#] {
                let mut server = Server::new_async().await;
                let _token = server
                    .mock("GET", "/csrf-token")
                    .with_body(body)
                    .create_async()
                    .await;
                let api = Arc::new(api_for(&server));

                let err = api.fetch_csrf_token().await.unwrap_err();
                assert!(matches!(err, ChatError::Parse(_)), "body {body}: {err:?}");

                let session = ChatSession::initialize(api, Arc::new(NullView)).await;
                assert!(!session.has_token());
            }
        }

        #[tokio::test]
        async fn chat_carries_token_history_and_session_cookie() {
            let mut server = Server::new_async().await;
            let _token = server
                .mock("GET", "/csrf-token")
                .with_header("set-cookie", "sb_session=abc123; Path=/")
                .with_body(r#"{"csrf_token":"tok"}"#)
                .create_async()
                .await;
            let chat = server
                .mock("GET", "/chat")
                .match_query(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("message".into(), "a b".into()),
                    Matcher::UrlEncoded(
                        "history".into(),
                        r#"[{"role":"user","content":"a b"}]"#.into(),
                    ),
                ]))
                .match_header("accept", "application/json")
                .match_header("x-csrf-token", "tok")
                .match_header("cookie", Matcher::Regex("sb_session=abc123".into()))
                .with_body(r#"{"agent_response":"hello"}"#)
                .create_async()
                .await;

            let mut session =
                ChatSession::initialize(Arc::new(api_for(&server)), Arc::new(NullView)).await;
            assert!(session.has_token());

            let reply = session.send_user_message("a b").await.unwrap().unwrap();
            assert_eq!(reply.text, "hello");
            assert_eq!(session.transcript().len(), 2);
            chat.assert_async().await;
        }

        #[tokio::test]
        async fn rejected_chat_reports_server_error_and_rolls_back() {
            let mut server = Server::new_async().await;
            let _token = server
                .mock("GET", "/csrf-token")
                .with_body(r#"{"csrf_token":"stale"}"#)
                .create_async()
                .await;
            let _chat = server
                .mock("GET", "/chat")
                .match_query(Matcher::Any)
                .with_status(403)
                .with_body(r#"{"error":"CSRF token mismatch"}"#)
                .create_async()
                .await;

            let mut session =
                ChatSession::initialize(Arc::new(api_for(&server)), Arc::new(NullView)).await;
            let err = session.send_user_message("hi").await.unwrap_err();
            assert!(matches!(err, ChatError::Application(ref m) if m == "CSRF token mismatch"));
            assert!(session.transcript().is_empty());
        }

        #[tokio::test]
        async fn tips_are_fetched() {
            let mut server = Server::new_async().await;
            let _tips = server
                .mock("GET", "/chat-tips")
                .with_body(r#"{"tips":["Plan my week","Try: **Review Chapter 2**"]}"#)
                .create_async()
                .await;

            let tips = api_for(&server).fetch_tips().await.unwrap();
            assert_eq!(tips, vec!["Plan my week", "Try: **Review Chapter 2**"]);
        }

        #[tokio::test]
        async fn tips_server_failure_is_http_error() {
            let mut server = Server::new_async().await;
            let _tips = server
                .mock("GET", "/chat-tips")
                .with_status(500)
                .with_body("boom")
                .create_async()
                .await;

            let err = api_for(&server).fetch_tips().await.unwrap_err();
            assert!(matches!(err, ChatError::Http(ref m) if m.contains("500")));
        }
    }
}
