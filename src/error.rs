//! Centralized error types for telesink using thiserror.

use thiserror::Error;

/// Errors related to sink configuration and construction.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    ValidationError(String),
    #[error("invalid message template: {message}")]
    InvalidTemplate { message: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Errors related to delivering a message to the Telegram Bot API.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("telegram returned status {status}")]
    Status { status: reqwest::StatusCode },
}

/// Errors related to event queue operations.
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("event queue closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::ValidationError("chat id is empty".to_string());
        assert_eq!(err.to_string(), "invalid configuration: chat id is empty");
    }

    #[test]
    fn config_error_invalid_template_display() {
        let err = ConfigError::InvalidTemplate {
            message: "unexpected end of template".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid message template: unexpected end of template"
        );
    }

    #[test]
    fn delivery_error_status_display() {
        let err = DeliveryError::Status {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
        };
        assert_eq!(
            err.to_string(),
            "telegram returned status 429 Too Many Requests"
        );
    }

    #[test]
    fn queue_error_display() {
        let err = QueueError::Closed;
        assert_eq!(err.to_string(), "event queue closed");
    }
}
