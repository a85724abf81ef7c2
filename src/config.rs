//! Sink configuration and secret handling.

use crate::error::ConfigError;
use crate::telegram::DEFAULT_API_ROOT;
use crate::throttle::DEFAULT_MIN_INTERVAL;
use regex::Regex;
use std::time::Duration;

/// Default bound on a single delivery request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Wrapper for secrets that never appears in logs.
///
/// The `Debug` and `Display` implementations always show `[REDACTED]`
/// instead of the actual value, so a bot token cannot leak through log
/// output or error messages.
///
/// # Example
///
/// ```
/// use telesink::SecretString;
///
/// let secret = SecretString::new("123456:bot-token".to_string());
/// assert_eq!(format!("{:?}", secret), "[REDACTED]");
/// assert_eq!(secret.expose(), "123456:bot-token");
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new `SecretString` from a regular `String`.
    pub fn new(s: String) -> Self {
        SecretString(s)
    }

    /// Exposes the underlying secret value.
    ///
    /// Never pass the result to logging functions or any output visible to
    /// unauthorized users.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString::new(s.to_string())
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// Resolves `${VAR_NAME}` patterns in a string.
///
/// Lets bootstrap code keep credentials out of source: pass
/// `"${TELEGRAM_BOT_TOKEN}"` and the value is read from the environment at
/// sink construction. Undefined variables are an error listing every
/// missing name.
pub fn resolve_env_vars(value: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("Invalid regex");

    let mut result = value.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(value) {
        let full_match = cap.get(0).unwrap().as_str();
        let var_name = &cap[1];

        match std::env::var(var_name) {
            Ok(var_value) => {
                result = result.replace(full_match, &var_value);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(result)
    } else {
        Err(ConfigError::ValidationError(format!(
            "undefined environment variable{}: {}",
            if errors.len() > 1 { "s" } else { "" },
            errors.join(", ")
        )))
    }
}

/// Construction parameters for a [`TelegramSink`](crate::TelegramSink).
///
/// `bot_token` and `chat_id` may contain `${VAR}` patterns; they are
/// resolved from the environment when the sink is built. Both are immutable
/// for the sink's lifetime once construction succeeds.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Bot credential used to authenticate against the Bot API.
    pub bot_token: SecretString,
    /// Destination chat, channel or group identifier.
    pub chat_id: String,
    /// Minimum spacing between outbound messages.
    pub min_interval: Duration,
    /// Bound on a single delivery request.
    pub request_timeout: Duration,
    /// Bot API endpoint root (override for self-hosted API servers).
    pub api_root: String,
}

impl SinkConfig {
    /// Create a configuration with default interval, timeout and API root.
    pub fn new(bot_token: impl Into<SecretString>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            min_interval: DEFAULT_MIN_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            api_root: DEFAULT_API_ROOT.to_string(),
        }
    }

    /// Override the minimum spacing between outbound messages.
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Point the sink at a different Bot API root.
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn secret_string_redacts_in_debug_and_display() {
        let secret = SecretString::new("123456:super-secret-token".to_string());

        let debug_output = format!("{:?}", secret);
        assert!(!debug_output.contains("super-secret-token"));
        assert!(debug_output.contains("[REDACTED]"));

        let display_output = format!("{}", secret);
        assert!(!display_output.contains("super-secret-token"));
        assert!(display_output.contains("[REDACTED]"));

        assert_eq!(secret.expose(), "123456:super-secret-token");
    }

    #[test]
    fn secret_string_from_str_and_string() {
        let a: SecretString = "token".into();
        let b: SecretString = String::from("token").into();
        assert_eq!(a.expose(), b.expose());
    }

    #[test]
    #[serial]
    fn resolve_env_vars_substitutes_single_variable() {
        temp_env::with_var("TEST_SINK_TOKEN", Some("123456:abc"), || {
            let result = resolve_env_vars("${TEST_SINK_TOKEN}");
            assert_eq!(result.unwrap(), "123456:abc");
        });
    }

    #[test]
    #[serial]
    fn resolve_env_vars_preserves_text_around_variables() {
        temp_env::with_var("TEST_SINK_CHAT", Some("-100200300"), || {
            let result = resolve_env_vars("chat:${TEST_SINK_CHAT}:end");
            assert_eq!(result.unwrap(), "chat:-100200300:end");
        });
    }

    #[test]
    fn resolve_env_vars_returns_unchanged_without_pattern() {
        let input = "123456:plain-token";
        let result = resolve_env_vars(input);
        assert_eq!(result.unwrap(), input);
    }

    #[test]
    #[serial]
    fn resolve_env_vars_error_on_undefined_variable() {
        temp_env::with_var("UNDEFINED_SINK_VAR", None::<&str>, || {
            let result = resolve_env_vars("${UNDEFINED_SINK_VAR}");
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("UNDEFINED_SINK_VAR"));
        });
    }

    #[test]
    #[serial]
    fn resolve_env_vars_error_lists_all_undefined_variables() {
        temp_env::with_vars(
            [("UNDEFINED_A", None::<&str>), ("UNDEFINED_B", None::<&str>)],
            || {
                let result = resolve_env_vars("${UNDEFINED_A}/${UNDEFINED_B}");
                assert!(result.is_err());
                let msg = result.unwrap_err().to_string();
                assert!(msg.contains("UNDEFINED_A"));
                assert!(msg.contains("UNDEFINED_B"));
            },
        );
    }

    #[test]
    fn config_defaults() {
        let config = SinkConfig::new("token", "42");
        assert_eq!(config.chat_id, "42");
        assert_eq!(config.min_interval, DEFAULT_MIN_INTERVAL);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.api_root, DEFAULT_API_ROOT);
    }

    #[test]
    fn config_builder_overrides() {
        let config = SinkConfig::new("token", "42")
            .with_min_interval(Duration::from_secs(1))
            .with_request_timeout(Duration::from_secs(2))
            .with_api_root("http://localhost:8081");
        assert_eq!(config.min_interval, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.api_root, "http://localhost:8081");
    }

    #[test]
    fn config_debug_does_not_expose_token() {
        let config = SinkConfig::new("123456:secret-token", "42");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
