//! Error types for the transport layer.

/// Errors that can occur while talking to the backend API.
///
/// The split mirrors how callers react: timeouts and network failures get
/// a generic message, [`Api`](TransportError::Api) carries the server's
/// human-readable `detail`, and [`Unauthorized`](TransportError::Unauthorized)
/// is the one variant whose side effects (token eviction, forced
/// navigation) have already happened by the time the caller sees it.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request exceeded the configured budget.
    #[error("request timed out")]
    Timeout,

    /// The request never produced a response (DNS, refused connection,
    /// closed socket).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server rejected the presented credential (HTTP 401).
    ///
    /// By the time this error reaches a caller, the stored token has been
    /// removed and the unauthorized hook has fired. The rejection is
    /// still propagated so the caller can resolve its own outcome.
    #[error("authorization denied")]
    Unauthorized { detail: Option<String> },

    /// Any other non-success status. `detail` is the server's
    /// `{"detail": ...}` body field when it sent one.
    #[error("request failed with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    /// A success response whose body didn't match the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),

    /// Reading or writing the durable token store failed.
    #[error("token storage failed: {0}")]
    Storage(#[source] std::io::Error),
}

impl TransportError {
    /// The server-provided detail message, when the server sent one.
    ///
    /// This is what gets surfaced verbatim as the session's `last_error`;
    /// every other variant falls back to a generic per-operation message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether this is the authorization-denied case.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
