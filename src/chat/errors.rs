//! Error types surfaced by the chat bridge.
use std::fmt;

/// Failures of a single chat exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Connection, timeout, or body read failure.
    Transport { message: String },
    /// The service answered with a non-success status.
    Status { code: u16, body: String },
    /// The body was not `{"response": "<text>"}`.
    Payload { message: String },
    /// The HTTP client could not be constructed.
    ClientBuild { message: String },
    /// No transport is configured.
    Unavailable,
}

impl ChatError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }

    pub fn status(code: u16, body: impl Into<String>) -> Self {
        Self::Status {
            code,
            body: body.into(),
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { message } => write!(f, "Transport failure: {}", message),
            Self::Status { code, body } if body.is_empty() => {
                write!(f, "Request failed with status {}", code)
            }
            Self::Status { code, body } => {
                write!(f, "Request failed with status {} ({})", code, body)
            }
            Self::Payload { message } => write!(f, "Malformed response: {}", message),
            Self::ClientBuild { message } => write!(f, "HTTP client unavailable: {}", message),
            Self::Unavailable => write!(f, "Chat transport unavailable"),
        }
    }
}

impl std::error::Error for ChatError {}

/// Reasons a send is dropped before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRejected {
    /// An exchange is already in flight.
    Busy,
    /// Nothing to send.
    Empty,
}

impl fmt::Display for ChatRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "Message processing already in progress, ignoring request"),
            Self::Empty => write!(f, "Empty message, ignoring request"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_body_when_present() {
        assert_eq!(
            ChatError::status(500, "").to_string(),
            "Request failed with status 500"
        );
        assert_eq!(
            ChatError::status(404, "no route").to_string(),
            "Request failed with status 404 (no route)"
        );
    }
}
