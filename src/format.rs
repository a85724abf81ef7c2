//! Message formatting for outbound Telegram text.
//!
//! Formatting is a strategy selected once at sink construction. The default
//! renders events as Markdown code blocks with a severity prefix; the
//! template formatter covers custom layouts via minijinja.

use crate::error::ConfigError;
use crate::event::{Level, LogEvent};
use minijinja::{context, Environment};

/// Markdown code-block delimiter wrapped around every formatted message.
const CODE_BLOCK: &str = "```";

/// Strategy turning a log event into the final outbound message text.
///
/// Implementations must be `Send + Sync`; the sink stores the formatter
/// behind an `Arc<dyn MessageFormatter>` chosen at construction time and
/// fixed thereafter.
pub trait MessageFormatter: Send + Sync {
    /// Produce the final message text for one event.
    fn format(&self, event: &LogEvent) -> String;
}

/// Literal prefix tag for a severity level.
fn level_prefix(level: Level) -> &'static str {
    match level {
        Level::Verbose => "*VERBOSE* ",
        Level::Debug => "*DEBUG* ",
        Level::Information => "*INFO* ",
        Level::Warning => "*WARNING* ",
        Level::Error => "ERROR: ",
        Level::Fatal => "*FATAL* ",
    }
}

/// Default formatter: severity prefix, optional error suffix, code block.
///
/// The attached error, when present, is appended after two line breaks.
/// No truncation is applied; over-length messages are rejected by the API
/// and surface as delivery failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl MessageFormatter for DefaultFormatter {
    fn format(&self, event: &LogEvent) -> String {
        let prefix = level_prefix(event.level);
        let mut text = String::with_capacity(
            2 * CODE_BLOCK.len() + prefix.len() + event.message.len(),
        );
        text.push_str(CODE_BLOCK);
        text.push_str(prefix);
        text.push_str(&event.message);
        if let Some(error) = &event.error {
            text.push_str("\n\n");
            text.push_str(error);
        }
        text.push_str(CODE_BLOCK);
        text
    }
}

/// Formatter rendering a minijinja template with the event as context.
///
/// The template sees `level`, `message`, `error` (empty string when absent)
/// and `timestamp` (RFC 3339). The source is validated at construction; a
/// render failure at emission time falls back to the default format with a
/// warning rather than dropping the event.
pub struct TemplateFormatter {
    source: String,
    env: Environment<'static>,
}

impl TemplateFormatter {
    /// Compile a template formatter, validating the template source.
    pub fn new(source: impl Into<String>) -> Result<Self, ConfigError> {
        let source = source.into();
        let mut probe = Environment::new();
        probe
            .add_template("message", &source)
            .map_err(|e| ConfigError::InvalidTemplate {
                message: e.to_string(),
            })?;
        drop(probe);
        Ok(Self {
            source,
            env: Environment::new(),
        })
    }
}

impl MessageFormatter for TemplateFormatter {
    fn format(&self, event: &LogEvent) -> String {
        let ctx = context! {
            level => event.level.to_string(),
            message => &event.message,
            error => event.error.as_deref().unwrap_or(""),
            timestamp => event.timestamp.to_rfc3339(),
        };
        match self.env.render_str(&self.source, ctx) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "failed to render message template, using default format"
                );
                DefaultFormatter.format(event)
            }
        }
    }
}

impl std::fmt::Debug for TemplateFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateFormatter")
            .field("source", &self.source)
            .finish()
    }
}
