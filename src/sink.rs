//! Sink orchestration: throttle, format, deliver.

use crate::config::{resolve_env_vars, SecretString, SinkConfig};
use crate::error::{ConfigError, DeliveryError};
use crate::event::LogEvent;
use crate::format::{DefaultFormatter, MessageFormatter};
use crate::telegram::TelegramClient;
use crate::throttle::RateGate;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Forwards log events to one Telegram chat, one request per event, spaced
/// by the rate gate.
///
/// Construction fixes the credential, the chat id and the formatter for the
/// sink's lifetime. The sink is `Send + Sync`; concurrent emitters
/// serialize through the gate state, so the spacing contract holds under
/// concurrent logging callers.
///
/// # Example
///
/// ```ignore
/// use telesink::{LogEvent, Level, SinkConfig, TelegramSink};
///
/// let sink = TelegramSink::new(SinkConfig::new("${TELEGRAM_BOT_TOKEN}", "42"))?;
/// sink.emit(&LogEvent::new(Level::Error, "payment job failed")).await;
/// ```
pub struct TelegramSink {
    client: TelegramClient,
    chat_id: String,
    formatter: Arc<dyn MessageFormatter>,
    gate: RateGate,
    /// Instant the last delivery was initiated. Guarded so concurrent
    /// emitters cannot race past the gate.
    last_emission: Mutex<Option<Instant>>,
}

impl TelegramSink {
    /// Build a sink from configuration with the default formatter.
    ///
    /// `${VAR}` patterns in the bot token and chat id are resolved from the
    /// environment before validation.
    pub fn new(config: SinkConfig) -> Result<Self, ConfigError> {
        Self::with_formatter(config, Arc::new(DefaultFormatter))
    }

    /// Build a sink with a custom formatter.
    pub fn with_formatter(
        config: SinkConfig,
        formatter: Arc<dyn MessageFormatter>,
    ) -> Result<Self, ConfigError> {
        let token = resolve_env_vars(config.bot_token.expose())?;
        let chat_id = resolve_env_vars(&config.chat_id)?;

        if token.is_empty() {
            return Err(ConfigError::ValidationError(
                "bot token is empty".to_string(),
            ));
        }
        if chat_id.is_empty() {
            return Err(ConfigError::ValidationError("chat id is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        let client =
            TelegramClient::new(SecretString::new(token), http).with_api_root(config.api_root);

        tracing::info!(
            chat_id = %chat_id,
            min_interval_ms = config.min_interval.as_millis() as u64,
            "telegram sink ready"
        );

        Ok(Self {
            client,
            chat_id,
            formatter,
            gate: RateGate::new(config.min_interval),
            last_emission: Mutex::new(None),
        })
    }

    /// Forward one event, swallowing delivery failures.
    ///
    /// A sink must not fail the operation that logged. Failures are
    /// reported through `tracing` and dropped; use [`try_emit`] to observe
    /// them instead.
    ///
    /// [`try_emit`]: TelegramSink::try_emit
    pub async fn emit(&self, event: &LogEvent) {
        if let Err(e) = self.try_emit(event).await {
            tracing::error!(
                error = %e,
                level = %event.level,
                "dropping log event after delivery failure"
            );
        }
    }

    /// Forward one event, surfacing the delivery failure to the caller.
    ///
    /// Suspends through the throttle wait and the network round-trip;
    /// control returns only once delivery has succeeded or failed.
    pub async fn try_emit(&self, event: &LogEvent) -> Result<(), DeliveryError> {
        self.pass_gate().await;
        let text = self.formatter.format(event);
        self.client.send_message(&self.chat_id, &text).await
    }

    /// Wait out the rate gate and stamp the emission time.
    ///
    /// The lock is held across the wait, so concurrent emitters pass the
    /// gate one at a time. The stamp is taken before delivery starts; it
    /// marks initiation, not completion.
    async fn pass_gate(&self) {
        let mut last = self.last_emission.lock().await;
        if let Some(previous) = *last {
            if let Some(wait) = self.gate.required_wait(previous.elapsed()) {
                tracing::debug!(wait_ms = wait.as_millis() as u64, "throttling emission");
                metrics::counter!("telesink_throttled_total").increment(1);
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl std::fmt::Debug for TelegramSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSink")
            .field("chat_id", &self.chat_id)
            .field("gate", &self.gate)
            .finish()
    }
}
