//! Chat backend boundary and its HTTP implementation.
//!
//! The backend's own reasoning is opaque to the assistant; this module only
//! moves `{message, language}` out and `{reply}` back, and classifies
//! everything else as a [`TransportFailure`].

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use winnow_core::config::BackendConfig;
use winnow_core::error::WinnowError;

use crate::types::{ChatReply, ChatReplyBody, ChatRequest};

/// Assistant text used when the backend answered 2xx without a usable reply.
pub const NO_RESPONSE: &str = "No response";

/// Diagnostic used when nothing better is known.
pub const GENERIC_FAILURE: &str = "AI failed. Backend not responding.";

/// Why a chat call produced no reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    #[error("Backend server not reachable at {base_url}")]
    Unreachable { base_url: String, detail: String },
    #[error("request timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },
    #[error("backend returned HTTP {status}")]
    Status {
        status: u16,
        server_message: Option<String>,
    },
    #[error("request cancelled before a reply arrived")]
    Cancelled,
    #[error("{0}")]
    Request(String),
}

impl TransportFailure {
    /// Best available human-readable cause: the server's own message, else
    /// the transport error, else a generic fallback.
    pub fn diagnostic(&self) -> String {
        if let TransportFailure::Status {
            server_message: Some(message),
            ..
        } = self
        {
            if !message.trim().is_empty() {
                return message.clone();
            }
        }
        let text = self.to_string();
        if text.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            text
        }
    }
}

/// The remote chat collaborator.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportFailure>;
}

/// `ChatBackend` over HTTP using `reqwest`.
pub struct HttpChatClient {
    client: reqwest::Client,
    base_url: String,
    endpoint: String,
    timeout: Duration,
    auth_token: RwLock<Option<String>>,
}

impl std::fmt::Debug for HttpChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatClient")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("has_token", &self.has_token())
            .finish()
    }
}

impl HttpChatClient {
    pub fn new(config: &BackendConfig) -> Result<Self, WinnowError> {
        let timeout = config.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WinnowError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            endpoint: config.chat_url(),
            timeout,
            auth_token: RwLock::new(config.auth_token.clone().filter(|t| !t.is_empty())),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    fn token(&self) -> Option<String> {
        self.auth_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear_token(&self) {
        let mut token = self
            .auth_token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if token.take().is_some() {
            tracing::warn!("Chat backend rejected credentials, dropping auth token");
        }
    }

    fn classify(&self, err: reqwest::Error) -> TransportFailure {
        if err.is_timeout() {
            TransportFailure::Timeout {
                after: self.timeout,
            }
        } else if err.is_connect() {
            TransportFailure::Unreachable {
                base_url: self.base_url.clone(),
                detail: err.to_string(),
            }
        } else {
            TransportFailure::Request(err.to_string())
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportFailure> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.clear_token();
        }
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let server_message = serde_json::from_slice::<ChatReplyBody>(&body)
                .ok()
                .and_then(|b| b.reply);
            tracing::debug!(status = status.as_u16(), "Chat backend returned an error status");
            return Err(TransportFailure::Status {
                status: status.as_u16(),
                server_message,
            });
        }

        // A 2xx body without a usable reply, JSON or not, still counts as answered.
        let reply = serde_json::from_slice::<ChatReplyBody>(&body)
            .ok()
            .and_then(|b| b.reply)
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::debug!(bytes = body.len(), "Chat reply had no usable text");
                NO_RESPONSE.to_string()
            });
        Ok(ChatReply { reply })
    }
}
