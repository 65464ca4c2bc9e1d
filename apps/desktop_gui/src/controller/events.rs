//! Bridge-to-UI events and error modeling for the dashboard controller.

use shared::{
    domain::CommandEntry,
    error::{ErrorCode, FeedError},
    protocol::DetectionStatus,
};

pub enum UiEvent {
    Info(String),
    CommandLogLoaded {
        source: String,
        entries: Vec<CommandEntry>,
        detection: Vec<DetectionStatus>,
    },
    DetectionStatusChanged(DetectionStatus),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Io,
    Parse,
    Validation,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadCommandLog,
    Detection,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("failed to read")
            || message_lower.contains("no such file")
            || message_lower.contains("permission denied")
            || message_lower.contains("not found")
        {
            UiErrorCategory::Io
        } else if message_lower.contains("malformed")
            || message_lower.contains("expected")
            || message_lower.contains("did not match any variant")
            || message_lower.contains("eof while parsing")
        {
            UiErrorCategory::Parse
        } else if message_lower.contains("invalid")
            || message_lower.contains("duplicate")
            || message_lower.contains("unrecognized")
            || message_lower.contains("must not be empty")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("disconnected")
            || message_lower.contains("queue is full")
            || message_lower.contains("unavailable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_feed_error(context: UiErrorContext, err: &FeedError) -> Self {
        let category = match err.code() {
            ErrorCode::Parse => UiErrorCategory::Parse,
            ErrorCode::Validation => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn headline(&self) -> String {
        let what = match self.context {
            UiErrorContext::BackendStartup => "Backend startup failed",
            UiErrorContext::LoadCommandLog => "Could not load command history",
            UiErrorContext::Detection => "Detection toggle failed",
        };
        let kind = match self.category {
            UiErrorCategory::Io => "file access",
            UiErrorCategory::Parse => "malformed data",
            UiErrorCategory::Validation => "invalid entry",
            UiErrorCategory::Transport => "bridge",
            UiErrorCategory::Unknown => "unexpected",
        };
        format!("{what} ({kind}): {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use shared::error::CommandLogError;

    use super::*;

    #[test]
    fn classifies_missing_log_file_as_io() {
        let err = UiError::from_message(
            UiErrorContext::LoadCommandLog,
            "failed to read command log '/tmp/x.json': No such file or directory (os error 2)",
        );
        assert_eq!(err.category(), UiErrorCategory::Io);
        assert_eq!(err.context(), UiErrorContext::LoadCommandLog);
    }

    #[test]
    fn classifies_bridge_disconnect_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::Detection,
            "Backend bridge disconnected; restart the dashboard",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn feed_validation_errors_keep_their_category() {
        let feed_err = FeedError::from(CommandLogError::UnrecognizedKind {
            index: 2,
            value: "telepathy".to_string(),
        });
        let err = UiError::from_feed_error(UiErrorContext::LoadCommandLog, &feed_err);
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(
            err.headline(),
            "Could not load command history (invalid entry): invalid command entry: entry 2: unrecognized kind 'telepathy'"
        );
    }
}
