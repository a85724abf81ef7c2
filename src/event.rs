//! Log event model consumed by the sink.

use chrono::{DateTime, Utc};

/// Severity of a log event, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Verbose,
    Debug,
    Information,
    Warning,
    Error,
    Fatal,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::Verbose => "VERBOSE",
            Level::Debug => "DEBUG",
            Level::Information => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        };
        f.write_str(name)
    }
}

/// One structured log event handed to the sink by the logging pipeline.
///
/// The sink never mutates an event; it reads the severity, the message text
/// (already rendered by the producing pipeline) and the optional error
/// description. Must implement `Clone` as required by the event queue.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// Severity of the event.
    pub level: Level,
    /// Rendered message text.
    pub message: String,
    /// Full string representation of an attached error, if any
    /// (message plus stack trace, as produced by the pipeline).
    pub error: Option<String>,
    /// When the event was produced.
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    /// Create an event with no attached error, stamped now.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach an error description to the event.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Verbose < Level::Debug);
        assert!(Level::Debug < Level::Information);
        assert!(Level::Information < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn level_display_names() {
        assert_eq!(Level::Verbose.to_string(), "VERBOSE");
        assert_eq!(Level::Debug.to_string(), "DEBUG");
        assert_eq!(Level::Information.to_string(), "INFO");
        assert_eq!(Level::Warning.to_string(), "WARNING");
        assert_eq!(Level::Error.to_string(), "ERROR");
        assert_eq!(Level::Fatal.to_string(), "FATAL");
    }

    #[test]
    fn new_event_has_no_error() {
        let event = LogEvent::new(Level::Information, "service started");
        assert_eq!(event.level, Level::Information);
        assert_eq!(event.message, "service started");
        assert!(event.error.is_none());
    }

    #[test]
    fn with_error_attaches_description() {
        let event = LogEvent::new(Level::Error, "query failed")
            .with_error("timeout after 30s\n   at db::query");
        assert_eq!(
            event.error.as_deref(),
            Some("timeout after 30s\n   at db::query")
        );
    }

    #[test]
    fn event_clone_preserves_fields() {
        let event = LogEvent::new(Level::Fatal, "out of memory").with_error("oom");
        let cloned = event.clone();
        assert_eq!(cloned.level, event.level);
        assert_eq!(cloned.message, event.message);
        assert_eq!(cloned.error, event.error);
        assert_eq!(cloned.timestamp, event.timestamp);
    }
}
