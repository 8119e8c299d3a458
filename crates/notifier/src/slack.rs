//! Slack notifier — delivers messages via `chat.postMessage`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Notifier, NotifyError};

/// Slack Web API client scoped to posting channel messages.
pub struct SlackNotifier {
    token: String,
    api_url: String,
    client: reqwest::Client,
}

impl SlackNotifier {
    /// Create a notifier posting to the given `chat.postMessage` URL.
    ///
    /// The URL is configurable so tests (and unusual deployments) can point
    /// at a stand-in server.
    pub fn new(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: api_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

/// Slack responds 200 even for refused messages; `ok` carries the verdict.
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, channel: &str, message: &str) -> Result<(), NotifyError> {
        debug!(channel = %channel, "Posting message to Slack");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(&PostMessageRequest {
                channel,
                text: message,
            })
            .send()
            .await?
            .error_for_status()?;

        let body: PostMessageResponse = response.json().await?;
        if body.ok {
            debug!(channel = %channel, "Slack accepted message");
            Ok(())
        } else {
            Err(NotifyError::Api {
                detail: body.error.unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_posts_channel_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat.postMessage"))
            .and(bearer_token("xoxb-test"))
            .and(body_partial_json(serde_json::json!({
                "channel": "#releases",
                "text": "hello"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let notifier =
            SlackNotifier::new("xoxb-test", format!("{}/api/chat.postMessage", server.uri()));
        notifier.send("#releases", "hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_message_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": false,
                "error": "channel_not_found"
            })))
            .mount(&server)
            .await;

        let notifier = SlackNotifier::new("xoxb-test", server.uri());
        let err = notifier.send("#nope", "hello").await.unwrap_err();
        match err {
            NotifyError::Api { detail } => assert_eq!(detail, "channel_not_found"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let notifier = SlackNotifier::new("xoxb-test", server.uri());
        let err = notifier.send("#releases", "hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::Http(_)));
    }
}
