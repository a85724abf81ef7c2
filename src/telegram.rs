//! Minimal Telegram Bot API client for message delivery.

use crate::config::SecretString;
use crate::error::DeliveryError;
use serde::Serialize;

/// Default Bot API endpoint root.
pub const DEFAULT_API_ROOT: &str = "https://api.telegram.org";

/// Rendering mode requested for every outbound message.
const PARSE_MODE: &str = "markdown";

/// Request body for the `sendMessage` method.
#[derive(Debug, Clone, Serialize)]
struct SendMessage<'a> {
    text: &'a str,
    chat_id: &'a str,
    parse_mode: &'a str,
}

/// Client issuing `sendMessage` calls against the Bot API.
///
/// The underlying `reqwest::Client` pools connections across calls; each
/// emission still maps to exactly one request. Failures are returned to the
/// caller, never retried here.
pub struct TelegramClient {
    /// HTTP client (shared, connection pooling).
    http: reqwest::Client,
    /// Bot credential, part of the request URL.
    token: SecretString,
    /// API root without trailing slash.
    api_root: String,
}

impl TelegramClient {
    /// Create a client against the public Bot API.
    pub fn new(token: SecretString, http: reqwest::Client) -> Self {
        Self {
            http,
            token,
            api_root: DEFAULT_API_ROOT.to_string(),
        }
    }

    /// Point the client at a different API root (self-hosted Bot API server).
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into().trim_end_matches('/').to_string();
        self
    }

    /// Send one message to a chat. One request, no retries.
    ///
    /// A non-2xx response or a transport failure is a [`DeliveryError`];
    /// deciding whether to surface or swallow it is the sink's concern.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let url = format!("{}/bot{}/sendMessage", self.api_root, self.token.expose());
        let body = SendMessage {
            text,
            chat_id,
            parse_mode: PARSE_MODE,
        };

        let response = match self.http.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, chat_id = %chat_id, "failed to reach telegram");
                metrics::counter!(
                    "telesink_delivery_errors_total",
                    "chat_id" => chat_id.to_string()
                )
                .increment(1);
                return Err(DeliveryError::Request(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::debug!(chat_id = %chat_id, "message delivered");
            metrics::counter!(
                "telesink_messages_sent_total",
                "chat_id" => chat_id.to_string()
            )
            .increment(1);
            Ok(())
        } else {
            tracing::error!(status = %status, chat_id = %chat_id, "telegram rejected message");
            metrics::counter!(
                "telesink_delivery_errors_total",
                "chat_id" => chat_id.to_string()
            )
            .increment(1);
            Err(DeliveryError::Status { status })
        }
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the token never appears in debug output
        f.debug_struct("TelegramClient")
            .field("api_root", &self.api_root)
            .finish()
    }
}
