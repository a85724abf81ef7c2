// src/lib.rs
//! Telesink - Rate-limited forwarding of log events to Telegram chats.
//!
//! A sink receives structured log events from an application's logging
//! pipeline and posts them to the Telegram Bot API as formatted messages,
//! enforcing a minimum spacing between requests. Delivery is best-effort,
//! synchronous and in-process; there is no batching and no persistence.
//!
//! # Example
//!
//! ```ignore
//! use telesink::{Level, LogEvent, SinkConfig, TelegramSink};
//!
//! let sink = TelegramSink::new(SinkConfig::new("${TELEGRAM_BOT_TOKEN}", "-100200300"))?;
//! sink.emit(&LogEvent::new(Level::Error, "payment job failed")).await;
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod queue;
pub mod sink;
pub mod telegram;
pub mod throttle;

// Re-export commonly used types
pub use config::{resolve_env_vars, SecretString, SinkConfig, DEFAULT_REQUEST_TIMEOUT};
pub use error::{ConfigError, DeliveryError, QueueError};
pub use event::{Level, LogEvent};
pub use format::{DefaultFormatter, MessageFormatter, TemplateFormatter};
pub use queue::{EventQueue, SinkWorker, DEFAULT_QUEUE_CAPACITY};
pub use sink::TelegramSink;
pub use telegram::{TelegramClient, DEFAULT_API_ROOT};
pub use throttle::{RateGate, DEFAULT_MIN_INTERVAL};
